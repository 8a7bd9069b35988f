use crate::conversion::config::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::parser::DocumentSource;

/// Check the source size before attempting to read it.
/// This avoids loading very large files into memory if the user-configured
/// limit is smaller than the file.
pub fn check_source_size_before_read(
    source: &DocumentSource,
    config: &ConversionConfig,
) -> ConversionResult<()> {
    match source.estimated_size() {
        Some(size) => check_size(size as usize, config),
        None => Ok(()),
    }
}

/// Check text that is already in memory (stdin, strings) against the limit
pub fn check_input_size(content: &str, config: &ConversionConfig) -> ConversionResult<()> {
    check_size(content.len(), config)
}

fn check_size(size: usize, config: &ConversionConfig) -> ConversionResult<()> {
    if size > config.memory_limit {
        return Err(ConversionError::conversion(
            ConversionErrorKind::InputTooLarge {
                size,
                limit: config.memory_limit,
            },
        ));
    }
    Ok(())
}
