//! Supported document formats and extension-based detection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A text syntax the converter can read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    Json,
    Yaml,
    Xml,
}

/// Which in-memory model a format parses into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Null/bool/number/string/sequence/mapping values (JSON, YAML)
    Value,
    /// Element trees with attributes (XML)
    Tree,
}

impl Format {
    /// Resolve a format from a file extension such as `json`, `.yml` or `XML`
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim().trim_start_matches('.');
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "xml" => Some(Format::Xml),
            _ => None,
        }
    }

    /// Resolve a format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Canonical file extension used when writing this format
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Xml => "xml",
        }
    }

    /// Upper-case name for messages
    pub fn display_name(&self) -> &'static str {
        match self {
            Format::Json => "JSON",
            Format::Yaml => "YAML",
            Format::Xml => "XML",
        }
    }

    pub fn model_kind(&self) -> ModelKind {
        match self {
            Format::Json | Format::Yaml => ModelKind::Value,
            Format::Xml => ModelKind::Tree,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| {
            format!(
                "Unknown format '{}'. Use 'json', 'yaml', 'yml' or 'xml'",
                s.trim()
            )
        })
    }
}
