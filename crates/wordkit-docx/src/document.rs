//! The main document part (`word/document.xml`)
//!
//! ```xml
//! <w:document xmlns:w="..." ...>
//!   <w:body>
//!     <w:p>...</w:p>
//!     <w:tbl>...</w:tbl>
//!     <w:sectPr>...</w:sectPr>
//!   </w:body>
//! </w:document>
//! ```

use std::io::Write;

use crate::drawing::Drawing;
use crate::error::{DocxError, Result};
use crate::paragraph::Paragraph;
use crate::section::SectPr;
use crate::table::Table;
use crate::xml::namespace::DOCUMENT_PREFIXES;
use crate::xml::{Attrs, Element, FromXml, ToXml, XmlReader, XmlWriter};

/// A parsed or built Word document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub body: Body,
}

/// Block-level content in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    pub items: Vec<BodyItem>,
}

/// Block-level elements
#[derive(Debug, Clone, PartialEq)]
pub enum BodyItem {
    Paragraph(Paragraph),
    Table(Table),
    /// Section properties; the last one describes the final section
    SectPr(SectPr),
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from XML bytes
    ///
    /// Paragraphs without inline content are dropped.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut r = XmlReader::new(xml);
        let root = r.root()?;
        if root.local_name() != b"document" {
            return Err(DocxError::malformed(format!(
                "expected <w:document>, found <{}>",
                root.name()
            )));
        }
        Self::read_xml(&mut r, &root)
    }

    /// Serialize the part, including the XML declaration
    pub fn write_to<W: Write>(&self, sink: W) -> Result<W> {
        let mut w = XmlWriter::new(sink);
        w.declaration()?;
        self.write_xml(&mut w)?;
        Ok(w.into_inner())
    }

    /// Serialize the part to a string
    pub fn to_xml(&self) -> Result<String> {
        let bytes = self.write_to(Vec::new())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Top-level paragraphs, excluding those inside tables
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.items.iter().filter_map(|item| match item {
            BodyItem::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.items.iter().filter_map(|item| match item {
            BodyItem::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Section properties of the final section
    pub fn section(&self) -> Option<&SectPr> {
        self.body.items.iter().rev().find_map(|item| match item {
            BodyItem::SectPr(s) => Some(s),
            _ => None,
        })
    }

    /// Every paragraph, including those inside table cells, in document order
    pub fn all_paragraphs(&self) -> Vec<&Paragraph> {
        let mut out = Vec::new();
        for item in &self.body.items {
            match item {
                BodyItem::Paragraph(p) => out.push(p),
                BodyItem::Table(t) => {
                    for row in &t.rows {
                        for cell in &row.cells {
                            out.extend(cell.paragraphs.iter());
                        }
                    }
                }
                BodyItem::SectPr(_) => {}
            }
        }
        out
    }

    /// Every drawing in document order
    pub fn drawings(&self) -> Vec<&Drawing> {
        self.all_paragraphs()
            .into_iter()
            .flat_map(Paragraph::drawings)
            .collect()
    }

    /// Plain text: one line per paragraph and per table row, each ending in
    /// `\n`; cells of a row are separated by tabs
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        for item in &self.body.items {
            match item {
                BodyItem::Paragraph(p) => lines.push(p.text()),
                BodyItem::Table(t) => {
                    for row in &t.rows {
                        let cells: Vec<String> = row.cells.iter().map(|c| c.text()).collect();
                        lines.push(cells.join("\t"));
                    }
                }
                BodyItem::SectPr(_) => {}
            }
        }
        let mut text = String::new();
        for line in lines {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }
}

impl Body {
    /// Insert a block, keeping a trailing section properties element last
    ///
    /// Returns the index of the inserted item.
    pub fn push(&mut self, item: BodyItem) -> usize {
        let index = match self.items.last() {
            Some(BodyItem::SectPr(_)) if !matches!(item, BodyItem::SectPr(_)) => {
                self.items.len() - 1
            }
            _ => self.items.len(),
        };
        self.items.insert(index, item);
        index
    }

    /// Insert a paragraph and return it
    pub fn push_paragraph(&mut self, paragraph: Paragraph) -> &mut Paragraph {
        let index = self.push(BodyItem::Paragraph(paragraph));
        match &mut self.items[index] {
            BodyItem::Paragraph(p) => p,
            _ => unreachable!("a paragraph was just inserted"),
        }
    }

    /// Insert a table and return it
    pub fn push_table(&mut self, table: Table) -> &mut Table {
        let index = self.push(BodyItem::Table(table));
        match &mut self.items[index] {
            BodyItem::Table(t) => t,
            _ => unreachable!("a table was just inserted"),
        }
    }

    /// The `n`th top-level paragraph
    pub fn paragraph_mut(&mut self, n: usize) -> Option<&mut Paragraph> {
        self.items
            .iter_mut()
            .filter_map(|item| match item {
                BodyItem::Paragraph(p) => Some(p),
                _ => None,
            })
            .nth(n)
    }

    /// The `n`th table
    pub fn table_mut(&mut self, n: usize) -> Option<&mut Table> {
        self.items
            .iter_mut()
            .filter_map(|item| match item {
                BodyItem::Table(t) => Some(t),
                _ => None,
            })
            .nth(n)
    }

    /// Replace the trailing section properties, or append them
    pub fn set_section(&mut self, sect: SectPr) {
        match self.items.last_mut() {
            Some(BodyItem::SectPr(existing)) => *existing = sect,
            _ => self.items.push(BodyItem::SectPr(sect)),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ToXml for Document {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        let mut attrs = Attrs::new();
        for (prefix, uri) in DOCUMENT_PREFIXES {
            attrs = attrs.with(xmlns_attr(prefix), uri);
        }
        attrs = attrs.with("mc:Ignorable", "wp14");
        w.start("w:document", attrs)?;
        self.body.write_xml(w)?;
        w.end("w:document")
    }
}

fn xmlns_attr(prefix: &str) -> &'static str {
    match prefix {
        "wpc" => "xmlns:wpc",
        "mc" => "xmlns:mc",
        "r" => "xmlns:r",
        "wp14" => "xmlns:wp14",
        "wp" => "xmlns:wp",
        "w" => "xmlns:w",
        "wpg" => "xmlns:wpg",
        "wps" => "xmlns:wps",
        "a" => "xmlns:a",
        _ => "xmlns:pic",
    }
}

impl FromXml for Document {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut doc = Document::new();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"body" => doc.body = Body::read_xml(r, &child)?,
                _ => r.skip(&child)?,
            }
        }
        Ok(doc)
    }
}

impl ToXml for Body {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        w.start("w:body", Attrs::new())?;
        self.items.write_xml(w)?;
        w.end("w:body")
    }
}

impl FromXml for Body {
    fn read_xml<'a>(r: &mut XmlReader<'a>, el: &Element<'a>) -> Result<Self> {
        let mut body = Body::default();
        while let Some(child) = r.next_element(el)? {
            match child.local_name() {
                b"p" => {
                    let paragraph = Paragraph::read_xml(r, &child)?;
                    if !paragraph.is_empty() {
                        body.items.push(BodyItem::Paragraph(paragraph));
                    }
                }
                b"tbl" => body.items.push(BodyItem::Table(Table::read_xml(r, &child)?)),
                b"sectPr" => body.items.push(BodyItem::SectPr(SectPr::read_xml(r, &child)?)),
                _ => r.skip(&child)?,
            }
        }
        Ok(body)
    }
}

impl ToXml for BodyItem {
    fn write_xml<W: Write>(&self, w: &mut XmlWriter<W>) -> Result<()> {
        match self {
            BodyItem::Paragraph(p) => p.write_xml(w),
            BodyItem::Table(t) => t.write_xml(w),
            BodyItem::SectPr(s) => s.write_xml(w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::PageSize;

    #[test]
    fn test_parse_simple_document() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Hello</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:pPr><w:jc w:val="center"/></w:pPr></w:p>
    <w:tbl><w:tblPr/><w:tblGrid/><w:tr><w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
    <w:sectPr><w:pgSz w:w="11906" w:h="16838"/></w:sectPr>
  </w:body>
</w:document>"#;

        let doc = Document::parse(xml).unwrap();
        assert_eq!(doc.body.len(), 3);
        assert_eq!(doc.paragraphs().count(), 1);
        assert_eq!(doc.tables().count(), 1);
        assert_eq!(doc.plain_text(), "Hello\nA\n");
        assert_eq!(
            doc.section().unwrap().page_size.as_ref().unwrap().width,
            11906
        );
    }

    #[test]
    fn test_wrong_root_is_malformed() {
        let err = Document::parse(b"<w:styles/>").unwrap_err();
        assert!(matches!(err, DocxError::MalformedXml(_)));
    }

    #[test]
    fn test_truncated_document_is_malformed() {
        let err = Document::parse(b"<w:document><w:body><w:p><w:r>").unwrap_err();
        assert!(matches!(err, DocxError::MalformedXml(_)));
    }

    #[test]
    fn test_root_declares_prefixes() {
        let xml = Document::new().to_xml().unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:document xmlns:wpc="));
        for (prefix, uri) in DOCUMENT_PREFIXES {
            assert!(xml.contains(&format!(r#"xmlns:{prefix}="{uri}""#)));
        }
        assert!(xml.ends_with("<w:body/></w:document>"));
    }

    #[test]
    fn test_push_keeps_section_last() {
        let mut body = Body::default();
        body.push(BodyItem::SectPr(SectPr::new(PageSize::A4)));
        assert_eq!(body.push(BodyItem::Paragraph(Paragraph::with_text("a"))), 0);
        assert_eq!(body.push(BodyItem::Paragraph(Paragraph::with_text("b"))), 1);
        assert!(matches!(body.items.last(), Some(BodyItem::SectPr(_))));

        body.set_section(SectPr::new(PageSize::A3));
        assert_eq!(body.len(), 3);
    }

    #[test]
    fn test_write_parse_write_is_stable() {
        let mut doc = Document::new();
        doc.body.push(BodyItem::Paragraph(Paragraph::with_text(" spaced ")));
        doc.body.push(BodyItem::Table(Table::new(2, 2)));
        doc.body.set_section(SectPr::new(PageSize::A4));

        let first = doc.to_xml().unwrap();
        let parsed = Document::parse(first.as_bytes()).unwrap();
        assert_eq!(parsed, doc);
        assert_eq!(parsed.to_xml().unwrap(), first);
    }
}
