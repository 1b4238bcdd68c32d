//! Namespace URIs and the fixed prefix map declared on `<w:document>`

/// WordprocessingML main namespace
pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// Office document relationships namespace (`r:id`, `r:embed`)
pub const R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// WordprocessingML drawing namespace (`wp:inline`, `wp:anchor`)
pub const WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
/// Word 2010 drawing extensions
pub const WP14: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingDrawing";
/// Word 2010 shapes
pub const WPS: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingShape";
/// Word 2010 groups
pub const WPG: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingGroup";
/// Word 2010 canvases
pub const WPC: &str = "http://schemas.microsoft.com/office/word/2010/wordprocessingCanvas";
/// DrawingML main namespace
pub const A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// DrawingML picture namespace
pub const PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";
/// Markup compatibility namespace
pub const MC: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";

/// Package relationships namespace (root of `.rels` parts)
pub const RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

/// `a:graphicData/@uri` of a picture payload
pub const URI_PICTURE: &str = PIC;
/// `a:graphicData/@uri` of a shape payload
pub const URI_SHAPE: &str = WPS;
/// `a:graphicData/@uri` of a group payload
pub const URI_GROUP: &str = WPG;
/// `a:graphicData/@uri` of a canvas payload
pub const URI_CANVAS: &str = WPC;

/// Prefixes declared on the document element, in declaration order
pub const DOCUMENT_PREFIXES: [(&str, &str); 10] = [
    ("wpc", WPC),
    ("mc", MC),
    ("r", R),
    ("wp14", WP14),
    ("wp", WP),
    ("w", W),
    ("wpg", WPG),
    ("wps", WPS),
    ("a", A),
    ("pic", PIC),
];

/// Look up the namespace URI bound to one of the fixed prefixes
pub fn uri_for_prefix(prefix: &str) -> Option<&'static str> {
    DOCUMENT_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, uri)| *uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_lookup() {
        assert_eq!(uri_for_prefix("w"), Some(W));
        assert_eq!(uri_for_prefix("pic"), Some(PIC));
        assert_eq!(uri_for_prefix("v"), None);
    }

    #[test]
    fn test_prefixes_are_unique() {
        for (i, (a, _)) in DOCUMENT_PREFIXES.iter().enumerate() {
            for (b, _) in DOCUMENT_PREFIXES.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
