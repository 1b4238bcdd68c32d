//! Template sources for the fixed parts of a package
//!
//! A document only generates `word/document.xml`, its relationships and the
//! media parts. Everything else (content types, package relationships,
//! properties, styles, theme, font table, settings) comes from a template.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::archive::{OoxmlArchive, CONTENT_TYPES_PART, DOCUMENT_PART, DOCUMENT_RELS_PART, MEDIA_DIR};
use crate::error::{DocxError, Result};
use crate::relationships::{Relationship, Relationships};

/// Name of the compiled-in template
pub const DEFAULT_TEMPLATE: &str = "default";

/// Template parts in the order they are written
pub const TEMPLATE_PARTS: [&str; 9] = [
    CONTENT_TYPES_PART,
    "_rels/.rels",
    "docProps/app.xml",
    "docProps/core.xml",
    "word/theme/theme1.xml",
    "word/styles.xml",
    "word/fontTable.xml",
    "word/settings.xml",
    "word/webSettings.xml",
];

/// Where the non-generated parts of a package come from
pub trait TemplateSource: Debug + Send + Sync {
    /// Template name, for diagnostics
    fn name(&self) -> &str;

    /// Part paths in write order; never includes the document, its
    /// relationships or media
    fn parts(&self) -> Vec<String>;

    /// Contents of one part
    fn read_part(&self, path: &str) -> Result<Vec<u8>>;

    /// Relationship list a new document starts from
    fn relationships(&self) -> Result<Relationships> {
        Relationships::parse(&self.read_part(DOCUMENT_RELS_PART)?)
    }
}

macro_rules! embedded_part {
    ($path:literal) => {
        ($path, include_bytes!(concat!("../templates/default/", $path)) as &[u8])
    };
}

const EMBEDDED_PARTS: [(&str, &[u8]); 9] = [
    embedded_part!("[Content_Types].xml"),
    embedded_part!("_rels/.rels"),
    embedded_part!("docProps/app.xml"),
    embedded_part!("docProps/core.xml"),
    embedded_part!("word/theme/theme1.xml"),
    embedded_part!("word/styles.xml"),
    embedded_part!("word/fontTable.xml"),
    embedded_part!("word/settings.xml"),
    embedded_part!("word/webSettings.xml"),
];

/// Relationships from the document to the standard template parts
const CORE_RELATIONSHIPS: [(&str, &str); 5] = [
    (Relationships::TYPE_STYLES, "styles.xml"),
    (Relationships::TYPE_THEME, "theme/theme1.xml"),
    (Relationships::TYPE_FONT_TABLE, "fontTable.xml"),
    (Relationships::TYPE_SETTINGS, "settings.xml"),
    (Relationships::TYPE_WEB_SETTINGS, "webSettings.xml"),
];

/// `rId1`..`rId5` pointing at styles, theme, font table, settings and web settings
pub fn core_relationships() -> Relationships {
    let rels = Relationships::new();
    for (n, (rel_type, target)) in CORE_RELATIONSHIPS.iter().enumerate() {
        rels.push(Relationship {
            id: format!("rId{}", n + 1),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode: None,
        });
    }
    rels
}

/// The compiled-in default template
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplate;

impl TemplateSource for EmbeddedTemplate {
    fn name(&self) -> &str {
        DEFAULT_TEMPLATE
    }

    fn parts(&self) -> Vec<String> {
        TEMPLATE_PARTS.iter().map(|p| p.to_string()).collect()
    }

    fn read_part(&self, path: &str) -> Result<Vec<u8>> {
        EMBEDDED_PARTS
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, bytes)| bytes.to_vec())
            .ok_or_else(|| DocxError::Template(format!("{DEFAULT_TEMPLATE}: no part {path}")))
    }

    fn relationships(&self) -> Result<Relationships> {
        Ok(core_relationships())
    }
}

/// A template unpacked in a directory, laid out like the package itself
#[derive(Debug, Clone)]
pub struct DirTemplate {
    name: String,
    root: PathBuf,
}

impl DirTemplate {
    /// Template rooted at `root`; parts are read lazily
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());
        Self { name, root }
    }

    /// Template `<dir>/<name>/`
    pub fn named(dir: impl AsRef<Path>, name: &str) -> Self {
        Self {
            name: name.to_string(),
            root: dir.as_ref().join(name),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn parts(&self) -> Vec<String> {
        TEMPLATE_PARTS.iter().map(|p| p.to_string()).collect()
    }

    fn read_part(&self, path: &str) -> Result<Vec<u8>> {
        let file = self.root.join(path);
        std::fs::read(&file).map_err(|e| {
            DocxError::Template(format!("{}: cannot read {}: {}", self.name, file.display(), e))
        })
    }
}

/// Every part of an existing package except the ones a document generates
#[derive(Debug, Clone)]
pub struct ArchiveTemplate {
    name: String,
    archive: OoxmlArchive,
}

impl ArchiveTemplate {
    pub fn new(name: impl Into<String>, archive: OoxmlArchive) -> Self {
        Self {
            name: name.into(),
            archive,
        }
    }

    /// Load a `.docx`/`.dotx` file as a template
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(name, OoxmlArchive::open(path)?))
    }

    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(name, OoxmlArchive::from_bytes(bytes)?))
    }

    pub fn archive(&self) -> &OoxmlArchive {
        &self.archive
    }
}

fn is_generated(path: &str) -> bool {
    path == DOCUMENT_PART || path == DOCUMENT_RELS_PART || path.starts_with(MEDIA_DIR)
}

impl TemplateSource for ArchiveTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    /// Standard parts first, in their usual order, then the rest sorted
    fn parts(&self) -> Vec<String> {
        let mut parts: Vec<String> = TEMPLATE_PARTS
            .iter()
            .filter(|p| self.archive.contains(p))
            .map(|p| p.to_string())
            .collect();
        for path in self.archive.file_list() {
            if !is_generated(path) && !TEMPLATE_PARTS.contains(&path) {
                parts.push(path.to_string());
            }
        }
        parts
    }

    fn read_part(&self, path: &str) -> Result<Vec<u8>> {
        self.archive
            .get(path)
            .map(<[u8]>::to_vec)
            .ok_or_else(|| DocxError::Template(format!("{}: no part {path}", self.name)))
    }
}
