//! # wordkit-docx
//!
//! Build and parse OOXML word-processing documents (`.docx`).
//!
//! This crate provides functionality to:
//! - Build documents from paragraphs, runs, hyperlinks, tables, pictures and shapes
//! - Parse existing packages into the same tree, skipping markup it does not model
//! - Write packages deterministically, so the same tree always yields the same bytes
//!
//! ## Example: Building a Document
//!
//! ```no_run
//! use wordkit_docx::{Docx, Justification, PageSize};
//!
//! let mut docx = Docx::new(PageSize::A4);
//! let mut title = docx.add_paragraph();
//! title.justification(Justification::Center);
//! title.add_text("Quarterly report").bold().size(32);
//!
//! let mut table = docx.add_table(2, 2);
//! if let Some(mut cell) = table.cell(0, 0) {
//!     cell.add_paragraph().add_text("Revenue");
//! }
//!
//! docx.save("report.docx")?;
//! # Ok::<(), wordkit_docx::DocxError>(())
//! ```
//!
//! ## Example: Reading a Document
//!
//! ```no_run
//! use wordkit_docx::Docx;
//!
//! let docx = Docx::open("report.docx")?;
//! for paragraph in docx.document().paragraphs() {
//!     println!("{}", paragraph.text());
//! }
//! # Ok::<(), wordkit_docx::DocxError>(())
//! ```

pub mod archive;
pub mod builder;
pub mod config;
pub mod document;
pub mod docx;
pub mod drawing;
pub mod error;
pub mod image;
pub mod media;
pub mod package;
pub mod paragraph;
pub mod registry;
pub mod relationships;
pub mod run;
pub mod section;
pub mod table;
pub mod template;
pub mod units;
pub mod xml;

pub use archive::OoxmlArchive;
pub use builder::{CellMut, ParagraphMut, ShapeSpec, TableMut};
pub use config::{Compression, DocxConfig};
pub use document::{Body, BodyItem, Document};
pub use docx::Docx;
pub use drawing::{
    Anchor, Canvas, ColorChoice, Drawing, Extent, GraphicData, Group, GroupChild, Inline, Line,
    LineFill, NonVisualProps, Picture, Shape, ShapeElem, ShapeProperties, Wrap,
};
pub use error::{DocxError, Result};
pub use crate::image::{ImageInfo, ImageKind};
pub use paragraph::{Hyperlink, HyperlinkTarget, Paragraph, ParagraphChild, ParagraphProperties};
pub use registry::{IdRegistry, Resources};
pub use relationships::{Relationship, Relationships};
pub use run::{Break, BreakType, Run, RunChild, RunProperties};
pub use section::SectPr;
pub use table::{Borders, Table, TableCell, TableRow, TableWidth};
pub use template::{ArchiveTemplate, DirTemplate, EmbeddedTemplate, TemplateSource};
pub use units::{Border, Color, Justification, PageSize, Shading, VerticalAlignment, WidthType};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
