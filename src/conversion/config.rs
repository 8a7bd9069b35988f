//! Configuration options for format conversion

use crate::conversion::value_to_tree::DEFAULT_ROOT_TAG;

/// Conversion configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionConfig {
    /// Root element tag used when writing XML from JSON or YAML
    pub root_tag: String,
    /// Spaces per indentation level for JSON and XML output (0-8)
    pub indent_size: u8,
    /// Pretty-print output (vs compact)
    pub pretty: bool,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before XML output
    pub xml_declaration: bool,
    /// Maximum nesting depth
    pub max_depth: Option<usize>,
    /// Maximum input size in bytes
    pub memory_limit: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            root_tag: DEFAULT_ROOT_TAG.to_string(),
            indent_size: 4,
            pretty: true,
            xml_declaration: true,
            max_depth: Some(1000), // Reasonable limit to prevent stack overflow
            memory_limit: 100 * 1024 * 1024, // 100MB
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output without XML declaration
    pub fn compact() -> Self {
        Self {
            pretty: false,
            xml_declaration: false,
            ..Default::default()
        }
    }

    /// Tighter limits for documents from untrusted sources
    pub fn untrusted() -> Self {
        Self {
            max_depth: Some(64),
            memory_limit: 10 * 1024 * 1024, // 10MB
            ..Default::default()
        }
    }

    /// Set the XML root element tag
    pub fn with_root_tag(mut self, tag: impl Into<String>) -> Self {
        self.root_tag = tag.into();
        self
    }

    /// Set indentation size
    pub fn with_indent_size(mut self, size: u8) -> Result<Self, String> {
        if size > 8 {
            return Err("Indent size must be 0-8 spaces".to_string());
        }
        self.indent_size = size;
        Ok(self)
    }

    /// Enable/disable pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable/disable the XML declaration
    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set memory limit
    pub fn with_memory_limit(mut self, limit_bytes: usize) -> Self {
        self.memory_limit = limit_bytes;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.indent_size > 8 {
            return Err("Indent size must be 0-8 spaces".to_string());
        }

        if !crate::formatter::xml::is_valid_name(&self.root_tag) {
            return Err(format!(
                "Root tag '{}' is not a valid XML element name",
                self.root_tag
            ));
        }

        if self.memory_limit < 1024 {
            return Err("Memory limit must be at least 1KB".to_string());
        }

        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err("Max depth must be at least 1".to_string());
            }
        }

        Ok(())
    }
}
