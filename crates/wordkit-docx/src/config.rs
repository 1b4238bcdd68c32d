//! Document configuration loaded from TOML
//!
//! ```toml
//! [template]
//! name = "corporate"
//! dir = "templates"
//!
//! [page]
//! size = "A3"
//!
//! [output]
//! compression = "stored"
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use zip::CompressionMethod;

use crate::error::Result;
use crate::template::{DirTemplate, EmbeddedTemplate, TemplateSource, DEFAULT_TEMPLATE};
use crate::units::PageSize;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DocxConfig {
    pub template: TemplateConfig,
    pub page: PageConfig,
    pub output: OutputConfig,
}

/// Which template supplies the fixed parts
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub name: String,
    /// Directory holding `<name>/`; the embedded template is used when unset
    pub dir: Option<PathBuf>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_TEMPLATE.to_string(),
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub size: PageSize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub compression: Compression,
}

/// ZIP entry compression
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    #[default]
    Deflated,
    Stored,
}

impl Compression {
    pub fn method(self) -> CompressionMethod {
        match self {
            Self::Deflated => CompressionMethod::Deflated,
            Self::Stored => CompressionMethod::Stored,
        }
    }
}

impl DocxConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Read and parse a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Template source selected by the `[template]` section
    pub fn template_source(&self) -> Arc<dyn TemplateSource> {
        match &self.template.dir {
            Some(dir) => Arc::new(DirTemplate::named(dir, &self.template.name)),
            None => {
                if self.template.name != DEFAULT_TEMPLATE {
                    log::warn!(
                        "template {:?} requested without a template dir, using the embedded one",
                        self.template.name
                    );
                }
                Arc::new(EmbeddedTemplate)
            }
        }
    }
}
