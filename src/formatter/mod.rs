//! Output serialization for JSON, YAML and XML

pub mod json;
pub mod xml;
pub mod yaml;

use crate::conversion::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::format::Format;
use crate::model::Document;

/// Writes documents as text in a target format
pub struct DocumentFormatter {
    config: ConversionConfig,
}

impl DocumentFormatter {
    /// Create a new formatter with configuration
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Serialize a document whose model matches `format`
    pub fn format(&self, document: &Document, format: Format) -> ConversionResult<String> {
        let output = match (document, format) {
            (Document::Value(value), Format::Json) => json::serialize(value, &self.config)?,
            (Document::Value(value), Format::Yaml) => yaml::serialize(value)?,
            (Document::Tree(node), Format::Xml) => xml::serialize(node, &self.config)?,
            (document, format) => {
                return Err(ConversionError::conversion(
                    ConversionErrorKind::ConversionFailed {
                        message: format!(
                            "cannot write a {} document as {}",
                            document.model_name(),
                            format.display_name()
                        ),
                    },
                ))
            }
        };
        Ok(output)
    }
}
