//! JSON reader backed by serde_json

use crate::error::{ParseError, ParseResult};
use crate::format::Format;
use crate::model::Value;
use crate::parser::error_preview;

/// Parse JSON text into a value, keeping key order and integer-ness
pub fn parse(content: &str) -> ParseResult<Value> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(
            Format::Json,
            "Empty JSON document".to_string(),
            None,
        ));
    }

    serde_json::from_str(content).map_err(|e| {
        let (line, column) = (e.line(), e.column());
        let location = (line > 0).then_some((line, column));
        let error = ParseError::new(Format::Json, e.to_string(), location);
        match error_preview(content, line, column) {
            Some(preview) => error.with_preview(preview),
            None => error,
        }
    })
}
