//! JSON writer backed by serde_json

use crate::conversion::ConversionConfig;
use crate::error::{FormattingError, FormattingResult};
use crate::model::Value;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Serialize a value as JSON, indented by `indent_size` spaces when pretty
pub fn serialize(value: &Value, config: &ConversionConfig) -> FormattingResult<String> {
    if !config.pretty {
        return serde_json::to_string(value)
            .map_err(|e| FormattingError::serialization(e.to_string()));
    }

    let indent = vec![b' '; usize::from(config.indent_size)];
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(&indent));
    value
        .serialize(&mut serializer)
        .map_err(|e| FormattingError::serialization(e.to_string()))?;

    String::from_utf8(buffer).map_err(|e| FormattingError::serialization(e.to_string()))
}
