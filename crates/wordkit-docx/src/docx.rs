//! The document aggregate: tree, shared resources and template

use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;
use std::sync::Arc;

use crate::archive::OoxmlArchive;
use crate::builder::{ParagraphMut, TableMut};
use crate::config::{Compression, DocxConfig};
use crate::document::Document;
use crate::error::Result;
use crate::package::{read_package, write_package};
use crate::paragraph::Paragraph;
use crate::registry::Resources;
use crate::section::SectPr;
use crate::table::Table;
use crate::template::{core_relationships, EmbeddedTemplate, TemplateSource};
use crate::units::PageSize;

/// A Word document being built or edited
///
/// # Example
///
/// ```no_run
/// use wordkit_docx::{Docx, PageSize};
///
/// let mut docx = Docx::new(PageSize::A4);
/// docx.add_paragraph().add_text("hello").bold();
/// docx.add_paragraph().add_link("example", "http://example.com");
/// docx.save("hello.docx")?;
/// # Ok::<(), wordkit_docx::DocxError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Docx {
    document: Document,
    resources: Resources,
    template: Arc<dyn TemplateSource>,
    compression: Compression,
}

impl Docx {
    /// Empty document on the embedded template
    pub fn new(page: PageSize) -> Self {
        let mut document = Document::new();
        document.body.set_section(SectPr::new(page));
        Self {
            document,
            resources: Resources::with_relationships(core_relationships()),
            template: Arc::new(EmbeddedTemplate),
            compression: Compression::default(),
        }
    }

    /// Empty document on a caller-supplied template
    ///
    /// The template's document relationships seed the relationship list.
    pub fn with_template(template: Arc<dyn TemplateSource>, page: PageSize) -> Result<Self> {
        let relationships = template.relationships()?;
        let mut document = Document::new();
        document.body.set_section(SectPr::new(page));
        Ok(Self {
            document,
            resources: Resources::with_relationships(relationships),
            template,
            compression: Compression::default(),
        })
    }

    /// Empty document configured by a [`DocxConfig`]
    pub fn from_config(config: &DocxConfig) -> Result<Self> {
        let mut docx = Self::with_template(config.template_source(), config.page.size)?;
        docx.compression = config.output.compression;
        Ok(docx)
    }

    /// Parse a package held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_archive("document", OoxmlArchive::from_bytes(bytes)?)
    }

    /// Parse a package from a seekable source
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_archive("document", OoxmlArchive::from_reader(reader)?)
    }

    /// Parse a `.docx` file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_archive(&name, OoxmlArchive::open(path)?)
    }

    fn from_archive(name: &str, archive: OoxmlArchive) -> Result<Self> {
        let unpacked = read_package(name, archive)?;
        Ok(Self {
            document: unpacked.document,
            resources: unpacked.resources,
            template: Arc::new(unpacked.template),
            compression: Compression::default(),
        })
    }

    /// Stream the package into a seekable sink
    pub fn write_to<W: Write + Seek>(&self, sink: W) -> Result<W> {
        write_package(
            sink,
            self.template.as_ref(),
            &self.document,
            &self.resources,
            self.compression,
        )
    }

    /// The complete package as bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.write_to(Cursor::new(Vec::new()))?.into_inner())
    }

    /// Write the package to a file
    ///
    /// The archive is built in memory first, so a failure leaves no partial
    /// file behind.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    pub fn set_compression(&mut self, compression: Compression) -> &mut Self {
        self.compression = compression;
        self
    }

    /// Append an empty paragraph to the body
    pub fn add_paragraph(&mut self) -> ParagraphMut<'_> {
        let paragraph = self.document.body.push_paragraph(Paragraph::new());
        ParagraphMut::new(paragraph, &self.resources)
    }

    /// Append a `rows` x `cols` table with automatic widths
    pub fn add_table(&mut self, rows: usize, cols: usize) -> TableMut<'_> {
        let table = self.document.body.push_table(Table::new(rows, cols));
        TableMut::new(table, &self.resources)
    }

    /// Append a table with explicit row heights and column widths in twips
    pub fn add_table_with_dimensions(
        &mut self,
        row_heights: &[u32],
        col_widths: &[u32],
    ) -> TableMut<'_> {
        let table = self
            .document
            .body
            .push_table(Table::with_dimensions(row_heights, col_widths));
        TableMut::new(table, &self.resources)
    }

    /// Replace the section properties of the final section
    pub fn set_section(&mut self, sect: SectPr) -> &mut Self {
        self.document.body.set_section(sect);
        self
    }

    /// Handle on the `n`th top-level paragraph
    pub fn paragraph_mut(&mut self, n: usize) -> Option<ParagraphMut<'_>> {
        let resources = &self.resources;
        self.document
            .body
            .paragraph_mut(n)
            .map(|p| ParagraphMut::new(p, resources))
    }

    /// Handle on the `n`th table
    pub fn table_mut(&mut self, n: usize) -> Option<TableMut<'_>> {
        let resources = &self.resources;
        self.document
            .body
            .table_mut(n)
            .map(|t| TableMut::new(t, resources))
    }

    /// Target of a relationship id
    pub fn resolve_target(&self, id: &str) -> Result<String> {
        self.resources.resolve_target(id)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Relationships, media and id counters
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn template(&self) -> &dyn TemplateSource {
        self.template.as_ref()
    }

    /// Plain text of the body
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }
}

impl Default for Docx {
    fn default() -> Self {
        Self::new(PageSize::A4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::BodyItem;
    use crate::relationships::Relationships;

    #[test]
    fn test_new_document() {
        let docx = Docx::new(PageSize::A4);
        assert_eq!(docx.document().body.len(), 1);
        assert!(docx.document().section().is_some());
        assert_eq!(docx.resources().relationships.len(), 5);
        assert_eq!(docx.template().name(), "default");
    }

    #[test]
    fn test_new_content_goes_before_section() {
        let mut docx = Docx::new(PageSize::A3);
        docx.add_paragraph().add_text("one");
        docx.add_table(1, 1);
        docx.add_paragraph().add_text("two");

        let items = &docx.document().body.items;
        assert!(matches!(items[0], BodyItem::Paragraph(_)));
        assert!(matches!(items[1], BodyItem::Table(_)));
        assert!(matches!(items[2], BodyItem::Paragraph(_)));
        assert!(matches!(items[3], BodyItem::SectPr(_)));
    }

    #[test]
    fn test_handles_reacquired_by_index() {
        let mut docx = Docx::default();
        docx.add_paragraph().add_text("first");
        docx.add_paragraph().add_text("second");
        docx.add_table(2, 2);

        docx.paragraph_mut(1).unwrap().add_text(" again");
        docx.table_mut(0)
            .unwrap()
            .cell(1, 1)
            .unwrap()
            .add_paragraph()
            .add_text("D");
        assert!(docx.paragraph_mut(2).is_none());
        assert!(docx.table_mut(1).is_none());

        assert_eq!(docx.plain_text(), "first\nsecond again\n\t\n\tD\n");
    }

    #[test]
    fn test_links_continue_after_core_relationships() {
        let mut docx = Docx::default();
        let mut p = docx.add_paragraph();
        p.add_link("a", "http://a.example");
        let rels = docx.resources().relationships.of_type(Relationships::TYPE_HYPERLINK);
        assert_eq!(rels[0].id, "rId6");
    }
}
