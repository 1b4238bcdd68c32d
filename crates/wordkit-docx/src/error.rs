//! Error types for DOCX operations

use thiserror::Error;

/// Errors that can occur while building, parsing or packaging a document
#[derive(Error, Debug)]
pub enum DocxError {
    /// Error reading or writing the ZIP archive
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Error reading or writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the XML tokenizer
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The XML token stream ended early or is otherwise unusable
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// An attribute value could not be parsed into its typed form
    #[error("Bad value for attribute {name}: {value:?}")]
    BadAttribute {
        /// Local name of the attribute
        name: String,
        /// Raw attribute value
        value: String,
    },

    /// Image bytes could not be recognized
    #[error("Unrecognized image: {0}")]
    BadImage(String),

    /// Required part not found in the package
    #[error("Required part not found: {0}")]
    MissingPart(String),

    /// No relationship carries the requested id
    #[error("Relationship id not found: {0}")]
    RefIdNotFound(String),

    /// Template part missing or unreadable
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration file could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl DocxError {
    /// Create a bad attribute error
    pub fn bad_attribute(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::BadAttribute {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Create a malformed XML error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedXml(reason.into())
    }
}

impl From<quick_xml::events::attributes::AttrError> for DocxError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(quick_xml::Error::InvalidAttr(err))
    }
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, DocxError>;
