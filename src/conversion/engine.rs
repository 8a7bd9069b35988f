//! Format dispatcher: parse, bridge models, serialize

use crate::conversion::config::ConversionConfig;
use crate::conversion::limits;
use crate::conversion::stats::{ConversionStatistics, PerformanceTracker};
use crate::conversion::tree_to_value::tree_to_value;
use crate::conversion::value_to_tree::value_to_tree;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::format::{Format, ModelKind};
use crate::formatter::DocumentFormatter;
use crate::model::Document;
use crate::parser::{self, DocumentSource};
use crate::validation::{tree_depth, value_depth, DepthGuard};
use std::path::Path;
use tracing::debug;

/// Core conversion result
#[derive(Debug, Clone)]
pub struct ConvertedDocument {
    pub content: String,
    pub metadata: ConversionMetadata,
}

impl ConvertedDocument {
    /// Get the serialized output
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Get the length of the output in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the output is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Metadata about the conversion process
#[derive(Debug, Clone)]
pub struct ConversionMetadata {
    pub source_format: Format,
    pub target_format: Format,
    pub input_size: u64,
    pub output_size: u64,
    /// Nesting depth of the parsed input
    pub depth: usize,
    pub processing_time_ms: u64,
    pub statistics: ConversionStatistics,
}

/// Main conversion engine
pub struct ConversionEngine {
    config: ConversionConfig,
    formatter: DocumentFormatter,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        let formatter = DocumentFormatter::new(config.clone());
        Self { config, formatter }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert `input` from one format to another.
    ///
    /// Nothing is produced unless every stage succeeds.
    pub fn convert(
        &self,
        from: Format,
        to: Format,
        input: &str,
    ) -> ConversionResult<ConvertedDocument> {
        let tracker = PerformanceTracker::start();

        let document = self.parse(from, input)?;
        let depth = document_depth(&document);

        let document = self.bridge(document, to);
        debug!(model = document.model_name(), target = %to, "serializing");
        let content = self.formatter.format(&document, to)?;

        let input_size = input.len() as u64;
        let output_size = content.len() as u64;
        let statistics = tracker.finish(input_size, output_size);
        debug!(
            from = %from,
            to = %to,
            input_size,
            output_size,
            "conversion finished"
        );

        Ok(ConvertedDocument {
            content,
            metadata: ConversionMetadata {
                source_format: from,
                target_format: to,
                input_size,
                output_size,
                depth,
                processing_time_ms: statistics.processing_time_ms,
                statistics,
            },
        })
    }

    /// Parse and check a document without converting it
    pub fn parse(&self, format: Format, input: &str) -> ConversionResult<Document> {
        self.config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;
        limits::check_input_size(input, &self.config)?;

        debug!(format = %format, bytes = input.len(), "parsing input");
        let document = parser::parse_document(input, format)?;

        if let Some(limit) = self.config.max_depth {
            let guard = DepthGuard::new(limit);
            match &document {
                Document::Value(value) => guard.check_value(value)?,
                Document::Tree(node) => guard.check_tree(node)?,
            }
        }

        Ok(document)
    }

    /// Read a source and convert it
    pub fn convert_source(
        &self,
        source: &DocumentSource,
        from: Format,
        to: Format,
    ) -> ConversionResult<ConvertedDocument> {
        // Check source size before reading to avoid loading very large files
        limits::check_source_size_before_read(source, &self.config)?;
        let content = source.read_content()?;
        self.convert(from, to, &content)
    }

    /// Convert a file, inferring both formats from the path extensions.
    ///
    /// The output file is only created after the conversion succeeded.
    pub fn convert_file(&self, input: &Path, output: &Path) -> ConversionResult<ConvertedDocument> {
        let (from, to) = match (Format::from_path(input), Format::from_path(output)) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(ConversionError::unsupported(
                    format_identifier(input),
                    format_identifier(output),
                ))
            }
        };
        self.convert_file_as(input, output, from, to)
    }

    /// Convert a file with explicitly chosen formats
    pub fn convert_file_as(
        &self,
        input: &Path,
        output: &Path,
        from: Format,
        to: Format,
    ) -> ConversionResult<ConvertedDocument> {
        let source = DocumentSource::File(input.to_path_buf());
        let converted = self.convert_source(&source, from, to)?;

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConversionError::io(&e, Some(parent.to_path_buf())))?;
            }
        }
        std::fs::write(output, &converted.content)
            .map_err(|e| ConversionError::io(&e, Some(output.to_path_buf())))?;

        debug!(input = %input.display(), output = %output.display(), "wrote output file");
        Ok(converted)
    }

    /// Move a document into the model the target format writes
    fn bridge(&self, document: Document, to: Format) -> Document {
        match (document, to.model_kind()) {
            (Document::Tree(node), ModelKind::Value) => {
                debug!(root = %node.tag, "folding element tree into value");
                Document::Value(tree_to_value(&node))
            }
            (Document::Value(value), ModelKind::Tree) => {
                debug!(root = %self.config.root_tag, "unfolding value into element tree");
                Document::Tree(value_to_tree(&value, &self.config.root_tag))
            }
            (document, _) => document,
        }
    }
}

fn document_depth(document: &Document) -> usize {
    match document {
        Document::Value(value) => value_depth(value),
        Document::Tree(node) => tree_depth(node),
    }
}

/// Extension text used when reporting an unsupported path
fn format_identifier(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Convert between two formats named by identifier (`json`, `yaml`, `yml`,
/// `xml`) using the default configuration
pub fn convert(source: &str, dest: &str, raw: &str) -> ConversionResult<String> {
    match (Format::from_extension(source), Format::from_extension(dest)) {
        (Some(from), Some(to)) => convert_formats(from, to, raw),
        _ => Err(ConversionError::unsupported(source, dest)),
    }
}

/// Convert between two formats using the default configuration
pub fn convert_formats(from: Format, to: Format, raw: &str) -> ConversionResult<String> {
    let engine = ConversionEngine::new(ConversionConfig::default());
    Ok(engine.convert(from, to, raw)?.content)
}
