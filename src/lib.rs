//! Data format converter
//!
//! Converts documents between XML, JSON and YAML. JSON and YAML share a
//! generic value model; XML is read into a tagged tree and bridged to values
//! by folding repeated sibling tags into sequences.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod format;
pub mod formatter;
pub mod model;
pub mod parser;
pub mod validation;

// Re-export commonly used types
pub use conversion::{
    convert, convert_formats, tree_to_value, value_to_tree, ConversionConfig, ConversionEngine,
    ConversionResult, ConvertedDocument,
};
pub use error::{ConversionError, ConversionErrorKind, FormattingError, ParseError};
pub use format::Format;
pub use model::{Document, Mapping, Node, Number, Value};
pub use parser::DocumentSource;

/// Convert with a custom configuration and return only the output text
pub fn convert_with_config(
    from: Format,
    to: Format,
    input: &str,
    config: &ConversionConfig,
) -> Result<String, ConversionError> {
    let engine = ConversionEngine::new(config.clone());
    Ok(engine.convert(from, to, input)?.content)
}
