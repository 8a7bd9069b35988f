//! Error types and handling infrastructure for format conversion

use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

use crate::format::Format;

/// Core error types for the conversion process
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("Unsupported conversion: {from} -> {to}")]
    UnsupportedFormat { from: String, to: String },

    #[error("Nesting depth {depth} exceeds the limit of {limit}")]
    StructuralAmbiguity { depth: usize, limit: usize },

    #[error("Input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: usize, limit: usize },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Conversion failed: {message}")]
    ConversionFailed { message: String },
}

impl ConversionErrorKind {
    pub fn unsupported(source: impl Into<String>, dest: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            from: source.into(),
            to: dest.into(),
        }
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error(transparent)]
    FormattingError(#[from] FormattingError),

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn parse(format: Format, message: String, location: Option<(usize, usize)>) -> Self {
        Self::ParseError(ParseError::new(format, message, location))
    }

    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn unsupported(source: impl Into<String>, dest: impl Into<String>) -> Self {
        Self::conversion(ConversionErrorKind::unsupported(source, dest))
    }

    /// The io error is kept as the source so `{:#}` shows the OS detail
    pub fn io(error: &std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Conversion {
            kind: ConversionErrorKind::io(error.to_string(), path),
            source: Some(anyhow::Error::new(std::io::Error::new(
                error.kind(),
                error.to_string(),
            ))),
        }
    }

    /// Borrow the conversion kind, if this is a conversion-stage error
    pub fn kind(&self) -> Option<&ConversionErrorKind> {
        match self {
            Self::Conversion { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// True when the requested format pair is outside the supported matrix
    pub fn is_unsupported_format(&self) -> bool {
        matches!(
            self.kind(),
            Some(ConversionErrorKind::UnsupportedFormat { .. })
        )
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "{} syntax error at line {}, column {}: {}",
                        err.format.display_name(),
                        line,
                        col,
                        err.message
                    )
                } else {
                    format!("{} syntax error: {}", err.format.display_name(), err.message)
                }
            }
            Self::FormattingError(err) => {
                format!("Output error: {}", err)
            }
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::UnsupportedFormat { from, to } => {
                    format!(
                        "Unsupported conversion from '{}' to '{}'. Supported formats are xml, json and yaml",
                        from, to
                    )
                }
                ConversionErrorKind::StructuralAmbiguity { depth, limit } => {
                    format!(
                        "Document nesting is too deep: reached depth {} (limit: {})",
                        depth, limit
                    )
                }
                ConversionErrorKind::InputTooLarge { size, limit } => {
                    format!("Input file too large: {} bytes (limit: {} bytes)", size, limit)
                }
                ConversionErrorKind::Io {
                    message,
                    path: Some(path),
                } => {
                    format!("{}: {}", path.display(), message)
                }
                _ => self.to_string(),
            },
            Self::Other(err) => {
                format!("Unexpected error: {}", err)
            }
        }
    }
}

/// Syntax errors reported by the JSON, YAML and XML readers
#[derive(Debug, Clone)]
pub struct ParseError {
    pub format: Format,
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub input_preview: Option<String>,
}

impl ParseError {
    pub fn new(format: Format, message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            format,
            message,
            location,
            input_preview: None,
        }
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} syntax error: {}", self.format.display_name(), self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Output serialization errors
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    #[error("Invalid XML element name '{name}'")]
    InvalidName { name: String },

    #[error("Serialization failed: {message}")]
    Serialization { message: String },
}

impl FormattingError {
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience result type for formatting operations
pub type FormattingResult<T> = Result<T, FormattingError>;

/// Turn a byte offset into a 1-based (line, column) pair
pub fn offset_to_location(content: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(content.len());
    let before = content.get(..offset).unwrap_or(content);
    let line = before.matches('\n').count() + 1;
    let column = before.rfind('\n').map_or(before.len(), |p| before.len() - p - 1) + 1;
    (line, column)
}
