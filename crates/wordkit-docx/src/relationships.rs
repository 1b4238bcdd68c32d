//! Relationships of the main document part (`word/_rels/document.xml.rels`)
//!
//! Every reference from `word/document.xml` to another part or to an
//! external URL goes through an `rId<N>` listed here. The list keeps
//! insertion order so serialization is deterministic.
//!
//! ```xml
//! <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
//!   <Relationship Id="rId1" Type=".../styles" Target="styles.xml"/>
//!   <Relationship Id="rId6" Type=".../hyperlink" Target="https://example.com" TargetMode="External"/>
//! </Relationships>
//! ```

use std::io::Write;

use parking_lot::RwLock;

use crate::error::{DocxError, Result};
use crate::xml::namespace::RELATIONSHIPS;
use crate::xml::{Attrs, XmlReader, XmlWriter};

/// One entry of a relationships part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// `rId<N>`
    pub id: String,
    /// Relationship type URI (see the `TYPE_*` constants)
    pub rel_type: String,
    /// Part path relative to `word/`, or an external URL
    pub target: String,
    /// `External` for URLs; absent for parts inside the package
    pub target_mode: Option<String>,
}

/// Ordered, internally synchronized relationship list
#[derive(Debug, Default)]
pub struct Relationships {
    list: RwLock<Vec<Relationship>>,
}

/// Common relationship type URIs
impl Relationships {
    /// Hyperlink relationship type
    pub const TYPE_HYPERLINK: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
    /// Image relationship type
    pub const TYPE_IMAGE: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
    /// Styles relationship type
    pub const TYPE_STYLES: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    /// Theme relationship type
    pub const TYPE_THEME: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    /// Font table relationship type
    pub const TYPE_FONT_TABLE: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/fontTable";
    /// Settings relationship type
    pub const TYPE_SETTINGS: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
    /// Web settings relationship type
    pub const TYPE_WEB_SETTINGS: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/webSettings";
    /// Numbering relationship type
    pub const TYPE_NUMBERING: &'static str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
}

impl Relationships {
    /// Create an empty relationship list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a relationships part
    ///
    /// Entries without an `Id` or `Target` are ignored, as are repeated ids.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut r = XmlReader::new(xml);
        let root = r.root()?;
        if root.local_name() != b"Relationships" {
            return Err(DocxError::malformed(format!(
                "expected <Relationships>, found <{}>",
                root.name()
            )));
        }

        let mut list: Vec<Relationship> = Vec::new();
        while let Some(el) = r.next_element(&root)? {
            if el.local_name() == b"Relationship" {
                if let (Some(id), Some(target)) = (el.attr("Id")?, el.attr("Target")?) {
                    if list.iter().any(|rel| rel.id == id) {
                        log::warn!("ignoring duplicate relationship id {id}");
                    } else {
                        list.push(Relationship {
                            id,
                            rel_type: el.attr("Type")?.unwrap_or_default(),
                            target,
                            target_mode: el.attr("TargetMode")?.filter(|m| !m.is_empty()),
                        });
                    }
                }
            }
            r.skip(&el)?;
        }

        Ok(Self {
            list: RwLock::new(list),
        })
    }

    /// Append a relationship with a pre-allocated id
    pub fn push(&self, rel: Relationship) {
        self.list.write().push(rel);
    }

    /// Target of the relationship with the given id
    pub fn resolve_target(&self, id: &str) -> Result<String> {
        self.list
            .read()
            .iter()
            .find(|rel| rel.id == id)
            .map(|rel| rel.target.clone())
            .ok_or_else(|| DocxError::RefIdNotFound(id.to_string()))
    }

    /// Full relationship for an id
    pub fn get(&self, id: &str) -> Option<Relationship> {
        self.list.read().iter().find(|rel| rel.id == id).cloned()
    }

    /// Whether a relationship id exists
    pub fn contains(&self, id: &str) -> bool {
        self.list.read().iter().any(|rel| rel.id == id)
    }

    /// Copy of the list in insertion order
    pub fn snapshot(&self) -> Vec<Relationship> {
        self.list.read().clone()
    }

    /// Relationships of one type, in insertion order
    pub fn of_type(&self, rel_type: &str) -> Vec<Relationship> {
        self.list
            .read()
            .iter()
            .filter(|rel| rel.rel_type == rel_type)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.list.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.read().is_empty()
    }

    /// Highest numeric suffix among `rId<N>` ids, 0 when none
    pub fn max_id(&self) -> u32 {
        self.list
            .read()
            .iter()
            .filter_map(|rel| extract_id_number(&rel.id))
            .max()
            .unwrap_or(0)
    }

    /// Serialize the part, including the XML declaration
    ///
    /// The list is held under the read lock while writing.
    pub fn write_to<W: Write>(&self, sink: W) -> Result<W> {
        let mut w = XmlWriter::new(sink);
        w.declaration()?;
        w.start("Relationships", Attrs::new().with("xmlns", RELATIONSHIPS))?;
        for rel in self.list.read().iter() {
            w.empty(
                "Relationship",
                Attrs::new()
                    .with("Id", &rel.id)
                    .with("Type", &rel.rel_type)
                    .with("Target", &rel.target)
                    .opt("TargetMode", rel.target_mode.as_deref()),
            )?;
        }
        w.end("Relationships")?;
        Ok(w.into_inner())
    }

    /// Serialize the part to a string
    pub fn to_xml(&self) -> Result<String> {
        let bytes = self.write_to(Vec::new())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Clone for Relationships {
    fn clone(&self) -> Self {
        Self {
            list: RwLock::new(self.snapshot()),
        }
    }
}

/// Extract the numeric portion from a relationship ID (e.g., "rId5" -> 5)
pub(crate) fn extract_id_number(id: &str) -> Option<u32> {
    id.strip_prefix("rId")
        .or_else(|| id.strip_prefix("RId"))
        .or_else(|| id.strip_prefix("rid"))
        .and_then(|num_str| num_str.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(id: &str, rel_type: &str, target: &str, mode: Option<&str>) -> Relationship {
        Relationship {
            id: id.to_string(),
            rel_type: rel_type.to_string(),
            target: target.to_string(),
            target_mode: mode.map(str::to_string),
        }
    }

    #[test]
    fn test_parse_relationships() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
            <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
        </Relationships>"#;

        let rels = Relationships::parse(xml).unwrap();

        assert_eq!(rels.resolve_target("rId1").unwrap(), "https://example.com");
        assert_eq!(rels.resolve_target("rId2").unwrap(), "styles.xml");
        assert_eq!(
            rels.get("rId1").unwrap().target_mode.as_deref(),
            Some("External")
        );
        assert_eq!(rels.len(), 2);
        assert_eq!(rels.max_id(), 2);
    }

    #[test]
    fn test_empty_relationships() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
        </Relationships>"#;

        let rels = Relationships::parse(xml).unwrap();
        assert!(rels.is_empty());
        assert_eq!(rels.max_id(), 0);
    }

    #[test]
    fn test_resolve_missing_id() {
        let rels = Relationships::new();
        let err = rels.resolve_target("rId42").unwrap_err();
        assert!(matches!(err, DocxError::RefIdNotFound(id) if id == "rId42"));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let xml = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId3" Type="t" Target="first.xml"/>
            <Relationship Id="rId3" Type="t" Target="second.xml"/>
        </Relationships>"#;
        let rels = Relationships::parse(xml).unwrap();
        assert_eq!(rels.len(), 1);
        assert_eq!(rels.resolve_target("rId3").unwrap(), "first.xml");
    }

    #[test]
    fn test_to_xml() {
        let rels = Relationships::new();
        rels.push(rel("rId1", Relationships::TYPE_STYLES, "styles.xml", None));
        rels.push(rel(
            "rId2",
            Relationships::TYPE_HYPERLINK,
            "https://example.com/?a=1&b=2",
            Some("External"),
        ));

        let xml = rels.to_xml().unwrap();
        assert_eq!(
            xml,
            concat!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n",
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
                r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
                r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/?a=1&amp;b=2" TargetMode="External"/>"#,
                "</Relationships>"
            )
        );

        let reparsed = Relationships::parse(xml.as_bytes()).unwrap();
        assert_eq!(reparsed.snapshot(), rels.snapshot());
    }

    #[test]
    fn test_iteration_order() {
        let rels = Relationships::new();
        rels.push(rel("rId3", "type1", "first.xml", None));
        rels.push(rel("rId1", "type2", "second.xml", None));
        rels.push(rel("rId2", "type1", "third.xml", None));

        let targets: Vec<String> = rels.snapshot().into_iter().map(|r| r.target).collect();
        assert_eq!(targets, vec!["first.xml", "second.xml", "third.xml"]);
        assert_eq!(rels.of_type("type1").len(), 2);
        assert_eq!(rels.max_id(), 3);
    }

    #[test]
    fn test_extract_id_number() {
        assert_eq!(extract_id_number("rId1"), Some(1));
        assert_eq!(extract_id_number("rId123"), Some(123));
        assert_eq!(extract_id_number("RId5"), Some(5));
        assert_eq!(extract_id_number("rid10"), Some(10));
        assert_eq!(extract_id_number("invalid"), None);
        assert_eq!(extract_id_number("rIdabc"), None);
    }
}
