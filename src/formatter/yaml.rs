//! YAML writer backed by serde_yaml
//!
//! Block style with two-space indentation; serde_yaml does not expose an
//! indent setting.

use crate::error::{FormattingError, FormattingResult};
use crate::model::Value;

/// Serialize a value as a YAML document
pub fn serialize(value: &Value) -> FormattingResult<String> {
    serde_yaml::to_string(value).map_err(|e| FormattingError::serialization(e.to_string()))
}
