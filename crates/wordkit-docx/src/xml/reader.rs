//! Pull-based XML decoding helpers
//!
//! Every container decoder walks its children with [`XmlReader::next_node`]
//! and hands anything it does not model to [`XmlReader::skip`], so unknown
//! markup is consumed up to its matching end tag and dropped.

use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{DocxError, Result};

/// A start tag together with whether it was self-closing
#[derive(Debug, Clone)]
pub struct Element<'a> {
    start: BytesStart<'a>,
    empty: bool,
}

/// One item inside an element's content
#[derive(Debug)]
pub enum XmlNode<'a> {
    /// A child element
    Element(Element<'a>),
    /// Character data (entities already resolved)
    Text(String),
}

/// Streaming reader over an in-memory XML part
pub struct XmlReader<'a> {
    inner: Reader<&'a [u8]>,
}

impl<'a> XmlReader<'a> {
    /// Create a reader over XML bytes
    pub fn new(xml: &'a [u8]) -> Self {
        let mut inner = Reader::from_reader(xml);
        // Whitespace inside w:t is content
        inner.config_mut().trim_text(false);
        Self { inner }
    }

    /// Advance to the root element, skipping the prolog
    pub fn root(&mut self) -> Result<Element<'a>> {
        loop {
            match self.inner.read_event()? {
                Event::Start(start) => return Ok(Element { start, empty: false }),
                Event::Empty(start) => return Ok(Element { start, empty: true }),
                Event::Eof => return Err(DocxError::malformed("document has no root element")),
                _ => {}
            }
        }
    }

    /// Next child element or text of `parent`, or `None` once its end tag is consumed
    pub fn next_node(&mut self, parent: &Element<'_>) -> Result<Option<XmlNode<'a>>> {
        if parent.empty {
            return Ok(None);
        }
        loop {
            match self.inner.read_event()? {
                Event::Start(start) => {
                    return Ok(Some(XmlNode::Element(Element { start, empty: false })))
                }
                Event::Empty(start) => {
                    return Ok(Some(XmlNode::Element(Element { start, empty: true })))
                }
                Event::Text(text) => {
                    return Ok(Some(XmlNode::Text(text.unescape()?.into_owned())));
                }
                Event::CData(data) => {
                    let bytes = data.into_inner();
                    return Ok(Some(XmlNode::Text(
                        String::from_utf8_lossy(&bytes).into_owned(),
                    )));
                }
                Event::End(_) => return Ok(None),
                Event::Eof => {
                    return Err(DocxError::malformed(format!(
                        "unexpected end of stream inside <{}>",
                        parent.name()
                    )))
                }
                // Comments, processing instructions, doctype
                _ => {}
            }
        }
    }

    /// Next child element of `parent`, ignoring character data
    pub fn next_element(&mut self, parent: &Element<'_>) -> Result<Option<Element<'a>>> {
        while let Some(node) = self.next_node(parent)? {
            if let XmlNode::Element(el) = node {
                return Ok(Some(el));
            }
        }
        Ok(None)
    }

    /// Consume an element's whole subtree, discarding it
    pub fn skip(&mut self, el: &Element<'_>) -> Result<()> {
        if el.empty {
            return Ok(());
        }
        log::trace!("skipping unrecognized element <{}>", el.name());
        self.inner.read_to_end(el.start.name()).map_err(|e| {
            DocxError::malformed(format!("unterminated <{}>: {}", el.name(), e))
        })?;
        Ok(())
    }

    /// Concatenated character data of an element; nested elements are skipped
    pub fn text(&mut self, el: &Element<'_>) -> Result<String> {
        let mut text = String::new();
        while let Some(node) = self.next_node(el)? {
            match node {
                XmlNode::Text(t) => text.push_str(&t),
                XmlNode::Element(child) => self.skip(&child)?,
            }
        }
        Ok(text)
    }

    /// Skip everything left inside `el`
    pub fn finish(&mut self, el: &Element<'_>) -> Result<()> {
        while let Some(child) = self.next_element(el)? {
            self.skip(&child)?;
        }
        Ok(())
    }
}

impl<'a> Element<'a> {
    /// Local name of the element (prefix stripped)
    pub fn local_name(&self) -> &[u8] {
        self.start.local_name().into_inner()
    }

    /// Qualified name as written, for diagnostics
    pub fn name(&self) -> String {
        String::from_utf8_lossy(self.start.name().as_ref()).into_owned()
    }

    /// Whether the element was written self-closing
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Attribute value by local name; namespace declarations are never matched
    pub fn attr(&self, local: &str) -> Result<Option<String>> {
        for attr in self.start.attributes() {
            let attr = attr?;
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }
            if attr.key.local_name().as_ref() == local.as_bytes() {
                return Ok(Some(attr.unescape_value()?.into_owned()));
            }
        }
        Ok(None)
    }

    /// The common `w:val` attribute
    pub fn val(&self) -> Result<Option<String>> {
        self.attr("val")
    }

    /// Attribute parsed with `FromStr`; unparseable values are `BadAttribute`
    pub fn parse_attr<T: FromStr>(&self, local: &str) -> Result<Option<T>> {
        match self.attr(local)? {
            Some(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| DocxError::bad_attribute(local, value)),
            None => Ok(None),
        }
    }

    /// Attribute holding an on/off value
    pub fn on_off_attr(&self, local: &str) -> Result<Option<bool>> {
        match self.attr(local)? {
            Some(value) => parse_on_off(local, &value).map(Some),
            None => Ok(None),
        }
    }

    /// Toggle element such as `<w:b/>`: a missing `w:val` means on
    pub fn toggle(&self) -> Result<bool> {
        Ok(self.on_off_attr("val")?.unwrap_or(true))
    }
}

/// Parse an OOXML on/off value
pub fn parse_on_off(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "on" => Ok(true),
        "0" | "false" | "off" => Ok(false),
        _ => Err(DocxError::bad_attribute(name, value)),
    }
}
