//! Streaming XML encoding helpers
//!
//! Output is compact (no indentation) and attribute order is exactly the
//! order in which [`Attrs`] were pushed, so encoding the same tree twice
//! yields the same bytes. An element closed without any content is written
//! self-closing.

use std::fmt::Display;
use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;

/// Ordered attribute list for one start tag
#[derive(Debug, Default, Clone)]
pub struct Attrs(Vec<(&'static str, String)>);

impl Attrs {
    /// Empty attribute list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute
    pub fn with(mut self, name: &'static str, value: impl Display) -> Self {
        self.0.push((name, value.to_string()));
        self
    }

    /// Append an attribute if a value is present
    pub fn opt<T: Display>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// Append an on/off attribute as `1`/`0`
    pub fn flag(self, name: &'static str, value: Option<bool>) -> Self {
        self.opt(name, value.map(|v| if v { "1" } else { "0" }))
    }

    /// Whether no attribute was pushed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn apply<'a>(&'a self, mut start: BytesStart<'a>) -> BytesStart<'a> {
        for (name, value) in &self.0 {
            start.push_attribute((*name, value.as_str()));
        }
        start
    }
}

/// Streaming writer emitting qualified names
pub struct XmlWriter<W: Write> {
    inner: Writer<W>,
    /// Start tag not yet written, waiting to learn whether it has content
    pending: Option<(String, Attrs)>,
}

impl<W: Write> XmlWriter<W> {
    /// Wrap a byte sink
    pub fn new(sink: W) -> Self {
        Self {
            inner: Writer::new(sink),
            pending: None,
        }
    }

    fn flush_pending(&mut self) -> Result<()> {
        if let Some((name, attrs)) = self.pending.take() {
            let start = attrs.apply(BytesStart::new(name.as_str()));
            self.inner.write_event(Event::Start(start))?;
        }
        Ok(())
    }

    /// `<?xml version="1.0" encoding="UTF-8" standalone="yes"?>` followed by a newline
    pub fn declaration(&mut self) -> Result<()> {
        self.flush_pending()?;
        self.inner.write_event(Event::Decl(BytesDecl::new(
            "1.0",
            Some("UTF-8"),
            Some("yes"),
        )))?;
        self.inner.get_mut().write_all(b"\n")?;
        Ok(())
    }

    /// Open an element
    pub fn start(&mut self, name: &str, attrs: Attrs) -> Result<()> {
        self.flush_pending()?;
        self.pending = Some((name.to_string(), attrs));
        Ok(())
    }

    /// Write a self-closing element
    pub fn empty(&mut self, name: &str, attrs: Attrs) -> Result<()> {
        self.flush_pending()?;
        let start = attrs.apply(BytesStart::new(name));
        self.inner.write_event(Event::Empty(start))?;
        Ok(())
    }

    /// Close an element
    pub fn end(&mut self, name: &str) -> Result<()> {
        match self.pending.take() {
            Some((open, attrs)) if open == name => {
                let start = attrs.apply(BytesStart::new(open.as_str()));
                self.inner.write_event(Event::Empty(start))?;
            }
            pending => {
                self.pending = pending;
                self.flush_pending()?;
                self.inner.write_event(Event::End(BytesEnd::new(name)))?;
            }
        }
        Ok(())
    }

    /// Escaped character data; empty text leaves the element empty
    pub fn text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.flush_pending()?;
        self.inner.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// `<name w:val="..."/>`, the most common OOXML leaf shape
    pub fn val(&mut self, name: &str, value: impl Display) -> Result<()> {
        self.empty(name, Attrs::new().with("w:val", value))
    }

    /// Element holding text; `xml:space="preserve"` is added when the text
    /// starts or ends with whitespace
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        let attrs = if needs_preserve(text) {
            Attrs::new().with("xml:space", "preserve")
        } else {
            Attrs::new()
        };
        if text.is_empty() {
            return self.empty(name, attrs);
        }
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    /// Recover the underlying sink
    pub fn into_inner(self) -> W {
        self.inner.into_inner()
    }
}

fn needs_preserve(text: &str) -> bool {
    text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<()>) -> String {
        let mut w = XmlWriter::new(Vec::new());
        f(&mut w).unwrap();
        String::from_utf8(w.into_inner()).unwrap()
    }

    #[test]
    fn test_attribute_order_is_insertion_order() {
        let xml = render(|w| {
            w.empty(
                "wp:extent",
                Attrs::new().with("cx", 100).with("cy", 200),
            )
        });
        assert_eq!(xml, r#"<wp:extent cx="100" cy="200"/>"#);
    }

    #[test]
    fn test_optional_attributes() {
        let xml = render(|w| {
            w.empty(
                "w:u",
                Attrs::new()
                    .opt("w:val", Some("single"))
                    .opt::<&str>("w:color", None)
                    .flag("w:x", Some(false)),
            )
        });
        assert_eq!(xml, r#"<w:u w:val="single" w:x="0"/>"#);
    }

    #[test]
    fn test_text_element_preserve() {
        assert_eq!(
            render(|w| w.text_element("w:t", "hello")),
            "<w:t>hello</w:t>"
        );
        assert_eq!(
            render(|w| w.text_element("w:t", " hello")),
            r#"<w:t xml:space="preserve"> hello</w:t>"#
        );
        assert_eq!(
            render(|w| w.text_element("w:t", "a < b")),
            "<w:t>a &lt; b</w:t>"
        );
        assert_eq!(render(|w| w.text_element("w:t", "")), "<w:t/>");
    }

    #[test]
    fn test_element_without_content_self_closes() {
        let xml = render(|w| {
            w.start("w:body", Attrs::new())?;
            w.start("w:p", Attrs::new().with("w:rsidR", "00A1"))?;
            w.start("w:r", Attrs::new())?;
            w.start("w:rPr", Attrs::new())?;
            w.end("w:rPr")?;
            w.text_element("w:t", "x")?;
            w.end("w:r")?;
            w.start("w:r", Attrs::new())?;
            w.text("")?;
            w.end("w:r")?;
            w.end("w:p")?;
            w.end("w:body")
        });
        assert_eq!(
            xml,
            r#"<w:body><w:p w:rsidR="00A1"><w:r><w:rPr/><w:t>x</w:t></w:r><w:r/></w:p></w:body>"#
        );
    }

    #[test]
    fn test_declaration() {
        let xml = render(|w| w.declaration());
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n"
        );
    }
}
