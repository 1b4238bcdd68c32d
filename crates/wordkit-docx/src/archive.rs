//! Archive handling for DOCX/DOTX files
//!
//! DOCX and DOTX files are ZIP archives containing XML files and resources.
//! [`OoxmlArchive`] unpacks every entry into memory so parts can be looked up
//! by path without holding on to the source.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use zip::read::ZipArchive;

use crate::error::{DocxError, Result};

/// Path of the main document part
pub const DOCUMENT_PART: &str = "word/document.xml";
/// Path of the main document's relationships part
pub const DOCUMENT_RELS_PART: &str = "word/_rels/document.xml.rels";
/// Directory holding media parts
pub const MEDIA_DIR: &str = "word/media/";
/// Path of the content types part
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Represents an unpacked OOXML package
#[derive(Debug, Clone, Default)]
pub struct OoxmlArchive {
    /// All files in the archive, keyed by path
    files: HashMap<String, Vec<u8>>,
}

impl OoxmlArchive {
    /// Open and unpack a DOCX/DOTX file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Unpack an archive held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }

    /// Create from any reader that implements Read + Seek
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut files = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let name = file.name().to_string();

            // Skip directories
            if name.ends_with('/') {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(name, contents);
        }

        log::debug!("unpacked {} parts", files.len());
        Ok(Self { files })
    }

    /// Get a file's contents by path
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(|v| v.as_slice())
    }

    /// A part that must be present
    pub fn require(&self, path: &str) -> Result<&[u8]> {
        self.get(path)
            .ok_or_else(|| DocxError::MissingPart(path.to_string()))
    }

    /// Get the main document content (word/document.xml)
    pub fn document_xml(&self) -> Result<&[u8]> {
        self.require(DOCUMENT_PART)
    }

    /// Get the document relationships (word/_rels/document.xml.rels)
    pub fn document_rels_xml(&self) -> Result<&[u8]> {
        self.require(DOCUMENT_RELS_PART)
    }

    /// Media parts as (file name, bytes), sorted by name
    pub fn media(&self) -> Vec<(&str, &[u8])> {
        let mut media: Vec<(&str, &[u8])> = self
            .files
            .iter()
            .filter_map(|(path, bytes)| {
                path.strip_prefix(MEDIA_DIR)
                    .filter(|name| !name.is_empty() && !name.contains('/'))
                    .map(|name| (name, bytes.as_slice()))
            })
            .collect();
        media.sort_by(|a, b| a.0.cmp(b.0));
        media
    }

    /// Check if a file exists in the archive
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// All part paths, sorted
    pub fn file_list(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.files.keys().map(|s| s.as_str()).collect();
        paths.sort_unstable();
        paths
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, path: impl Into<String>, contents: Vec<u8>) {
        self.files.insert(path.into(), contents);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::test_archives::zip_parts;
    use super::*;

    #[test]
    fn test_file_operations() {
        let mut archive = OoxmlArchive::default();

        assert!(archive.is_empty());

        archive.set("test.xml", b"<root/>".to_vec());
        assert!(archive.contains("test.xml"));
        assert_eq!(archive.get("test.xml"), Some(&b"<root/>"[..]));
        let err = archive.require("other.xml").unwrap_err();
        assert!(matches!(err, DocxError::MissingPart(p) if p == "other.xml"));
    }

    #[test]
    fn test_from_bytes_and_media() {
        let bytes = zip_parts(&[
            (DOCUMENT_PART, b"<w:document/>"),
            ("word/media/image2.png", b"b"),
            ("word/media/image1.png", b"a"),
            ("word/media/nested/x.png", b"c"),
            ("docProps/app.xml", b"<Properties/>"),
        ]);
        let archive = OoxmlArchive::from_bytes(&bytes).unwrap();

        assert_eq!(archive.len(), 5);
        assert_eq!(archive.document_xml().unwrap(), b"<w:document/>");
        let media = archive.media();
        assert_eq!(
            media,
            vec![("image1.png", &b"a"[..]), ("image2.png", &b"b"[..])]
        );
        assert_eq!(archive.file_list()[0], "docProps/app.xml");
    }

    #[test]
    fn test_missing_rels_part() {
        let bytes = zip_parts(&[(DOCUMENT_PART, b"<w:document/>")]);
        let archive = OoxmlArchive::from_bytes(&bytes).unwrap();
        let err = archive.document_rels_xml().unwrap_err();
        assert!(matches!(err, DocxError::MissingPart(p) if p == DOCUMENT_RELS_PART));
    }

    #[test]
    fn test_not_a_zip() {
        let err = OoxmlArchive::from_bytes(b"plain text").unwrap_err();
        assert!(matches!(err, DocxError::Archive(_)));
    }
}
