//! Document sources and syntax parsing
//!
//! Each format has a reader that turns text into the model the format uses:
//! JSON and YAML become [`Value`]s, XML becomes a [`Node`] tree.

pub mod directory;
pub mod filter;
pub mod json;
pub mod xml;
pub mod yaml;

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult, ParseResult};
use crate::format::Format;
use crate::model::{Document, Node, Value};
use std::io::Read;
use std::path::PathBuf;

/// Where a document's text comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentSource {
    /// Raw text input
    String(String),
    /// Single file path
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl DocumentSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            DocumentSource::String(_) => "string input".to_string(),
            DocumentSource::File(path) => format!("file: {}", path.display()),
            DocumentSource::Stdin => "standard input".to_string(),
        }
    }

    /// Check if the source exists and is accessible
    pub fn exists(&self) -> bool {
        match self {
            DocumentSource::String(_) | DocumentSource::Stdin => true,
            DocumentSource::File(path) => path.is_file(),
        }
    }

    /// Get the size of the source in bytes, if known before reading
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            DocumentSource::String(s) => Some(s.len() as u64),
            DocumentSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            DocumentSource::Stdin => None,
        }
    }

    /// Format implied by the file extension, if any
    pub fn format_hint(&self) -> Option<Format> {
        match self {
            DocumentSource::File(path) => Format::from_path(path),
            DocumentSource::String(_) | DocumentSource::Stdin => None,
        }
    }

    /// Read the whole source into memory
    pub fn read_content(&self) -> ConversionResult<String> {
        match self {
            DocumentSource::String(content) => Ok(content.clone()),
            DocumentSource::File(path) => std::fs::read_to_string(path)
                .map_err(|e| ConversionError::io(&e, Some(path.clone()))),
            DocumentSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|e| ConversionError::io(&e, None))?;
                Ok(buffer)
            }
        }
    }

    /// Read and parse the source as `format`
    pub fn parse(&self, format: Format) -> ConversionResult<Document> {
        let content = self.read_content()?;
        parse_document(&content, format).map_err(ConversionError::ParseError)
    }
}

/// Parse text in the given format into its document model
pub fn parse_document(content: &str, format: Format) -> ParseResult<Document> {
    match format {
        Format::Json => json::parse(content).map(Document::Value),
        Format::Yaml => yaml::parse(content).map(Document::Value),
        Format::Xml => xml::parse(content).map(Document::Tree),
    }
}

/// Parse JSON or YAML text into a value
pub fn parse_value(content: &str, format: Format) -> ConversionResult<Value> {
    match parse_document(content, format)? {
        Document::Value(value) => Ok(value),
        Document::Tree(_) => Err(ConversionError::conversion(
            ConversionErrorKind::ConversionFailed {
                message: format!("{} does not parse into a value", format.display_name()),
            },
        )),
    }
}

/// Parse XML text into an element tree
pub fn parse_tree(content: &str) -> ConversionResult<Node> {
    xml::parse(content).map_err(ConversionError::ParseError)
}

/// Show the offending line with a caret under the error column
pub(crate) fn error_preview(content: &str, line: usize, column: usize) -> Option<String> {
    let error_line = content.lines().nth(line.checked_sub(1)?)?;
    let caret = " ".repeat(column.saturating_sub(1).min(error_line.chars().count()));
    Some(format!("{}\n{}^", error_line, caret))
}
