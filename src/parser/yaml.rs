//! YAML reader backed by serde_yaml
//!
//! Only plain data is accepted: documents using custom `!tags` are rejected
//! instead of being turned into application types.

use crate::error::{ParseError, ParseResult};
use crate::format::Format;
use crate::model::Value;
use crate::parser::error_preview;

/// Parse a single YAML document into a value. An empty document is null.
pub fn parse(content: &str) -> ParseResult<Value> {
    if content.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_yaml::from_str(content).map_err(|e| {
        let location = e.location().map(|loc| (loc.line(), loc.column()));
        let error = ParseError::new(Format::Yaml, e.to_string(), location);
        match location.and_then(|(line, column)| error_preview(content, line, column)) {
            Some(preview) => error.with_preview(preview),
            None => error,
        }
    })
}
