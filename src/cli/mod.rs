//! Command-line interface module

use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::conversion::{ConversionConfig, ConversionResult};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::format::Format;
use crate::parser::DocumentSource;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dataconv")]
#[command(about = "Convert documents between XML, JSON and YAML")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Input file, directory, or '-' for standard input
    #[arg()]
    pub input: Option<String>,

    /// Output file or directory (default: stdout)
    #[arg()]
    pub output: Option<PathBuf>,

    /// Input format (json, yaml, yml, xml); inferred from the extension by default
    #[arg(long, value_parser = parse_format)]
    pub from: Option<Format>,

    /// Output format (json, yaml, yml, xml); inferred from the output extension by default
    #[arg(long, value_parser = parse_format)]
    pub to: Option<Format>,

    /// Root element tag when writing XML from JSON or YAML (default: data)
    #[arg(long)]
    pub root_tag: Option<String>,

    /// Spaces per indentation level for JSON and XML (0-8, default: 4)
    #[arg(long)]
    pub indent: Option<u8>,

    /// Disable pretty-printing
    #[arg(long)]
    pub plain: bool,

    /// Omit the <?xml ...?> declaration from XML output
    #[arg(long)]
    pub no_xml_declaration: bool,

    /// Maximum nesting depth accepted (default: 1000)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Maximum input size (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Continue converting other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Only check that the input parses, don't convert
    #[arg(long)]
    pub validate_only: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

fn parse_format(value: &str) -> Result<Format, String> {
    value.parse()
}

/// Where the CLI reads from
#[derive(Debug, Clone, PartialEq)]
pub enum InputTarget {
    Stdin,
    File(PathBuf),
    Directory(PathBuf),
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let conversion_config = Self::create_conversion_config(&args)?;

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> ConversionResult<ConversionConfig> {
        let defaults = ConversionConfig::default();
        let config = ConversionConfig {
            root_tag: args.root_tag.clone().unwrap_or(defaults.root_tag),
            indent_size: args.indent.unwrap_or(defaults.indent_size),
            pretty: !args.plain,
            xml_declaration: !args.no_xml_declaration,
            max_depth: args.max_depth.or(defaults.max_depth),
            memory_limit: parse_memory_limit(&args.memory_limit)?,
        };

        // Validate configuration
        config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;

        Ok(config)
    }

    /// Classify the input argument
    pub fn input_target(&self) -> ConversionResult<InputTarget> {
        match self.args.input.as_deref() {
            None | Some("-") => Ok(InputTarget::Stdin),
            Some(input) => {
                let path = PathBuf::from(input);
                if path.is_dir() {
                    Ok(InputTarget::Directory(path))
                } else if path.is_file() {
                    Ok(InputTarget::File(path))
                } else {
                    Err(ConversionError::conversion(ConversionErrorKind::io(
                        "Input path does not exist".to_string(),
                        Some(path),
                    )))
                }
            }
        }
    }

    /// Source for single-document input
    pub fn document_source(&self, target: &InputTarget) -> Option<DocumentSource> {
        match target {
            InputTarget::Stdin => Some(DocumentSource::Stdin),
            InputTarget::File(path) => Some(DocumentSource::File(path.clone())),
            InputTarget::Directory(_) => None,
        }
    }

    /// Input format: `--from`, else the input extension
    pub fn source_format(&self, input: Option<&Path>) -> ConversionResult<Format> {
        if let Some(format) = self.args.from {
            return Ok(format);
        }
        match input {
            Some(path) => Format::from_path(path)
                .ok_or_else(|| ConversionError::unsupported(identifier(path), self.target_label())),
            None => Err(ConversionError::conversion(ConversionErrorKind::configuration(
                "Cannot infer the input format from standard input; use --from".to_string(),
            ))),
        }
    }

    /// Output format: `--to`, else the output extension
    pub fn target_format(&self) -> ConversionResult<Format> {
        if let Some(format) = self.args.to {
            return Ok(format);
        }
        match &self.args.output {
            Some(path) => Format::from_path(path).ok_or_else(|| {
                ConversionError::unsupported(self.source_label(), identifier(path))
            }),
            None => Err(ConversionError::conversion(ConversionErrorKind::configuration(
                "Cannot infer the output format; use --to or give an output file".to_string(),
            ))),
        }
    }

    fn source_label(&self) -> String {
        match (&self.args.from, self.args.input.as_deref()) {
            (Some(format), _) => format.to_string(),
            (None, Some(input)) => identifier(Path::new(input)),
            (None, None) => "-".to_string(),
        }
    }

    fn target_label(&self) -> String {
        match (&self.args.to, &self.args.output) {
            (Some(format), _) => format.to_string(),
            (None, Some(output)) => identifier(output),
            (None, None) => "stdout".to_string(),
        }
    }

    /// Check if we should continue on error
    pub fn continue_on_error(&self) -> bool {
        self.args.continue_on_error
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.args.verbose
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Check if only validation is requested
    pub fn is_validate_only(&self) -> bool {
        self.args.validate_only
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        match self.args.input.as_deref() {
            None | Some("-") => "standard input".to_string(),
            Some(input) => format!("'{}'", input),
        }
    }

    /// Get output destination description
    pub fn output_description(&self) -> String {
        if let Some(output) = &self.args.output {
            format!("'{}'", output.display())
        } else {
            "standard output".to_string()
        }
    }
}

fn identifier(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse memory limit string (e.g., "100MB", "1GB", "500KB")
pub fn parse_memory_limit(limit: &Option<String>) -> ConversionResult<usize> {
    let Some(limit_str) = limit else {
        return Ok(ConversionConfig::default().memory_limit);
    };
    let limit_str = limit_str.trim().to_uppercase();
    let invalid = || {
        ConversionError::conversion(ConversionErrorKind::Configuration {
            message: format!("Invalid memory limit: {}", limit_str),
        })
    };

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        return size.trim().parse::<usize>().map_err(|_| invalid());
    } else {
        // Assume bytes
        return limit_str.parse::<usize>().map_err(|_| invalid());
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as usize)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let pb = indicatif::ProgressBar::new(total);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    let message = error.user_message();
    CliUtils::show_error(&message);

    // Provide helpful suggestions
    match error {
        ConversionError::ParseError(err) => {
            if let Some(preview) = &err.input_preview {
                eprintln!("\n{}", preview);
            }
            eprintln!("\nTip: Use --validate-only to check syntax before conversion");
        }
        ConversionError::Conversion { kind, .. } => match kind {
            ConversionErrorKind::InputTooLarge { .. } => {
                eprintln!("\nTip: Use --memory-limit to raise the input size limit");
            }
            ConversionErrorKind::StructuralAmbiguity { .. } => {
                eprintln!("\nTip: Use --max-depth to accept more deeply nested documents");
            }
            ConversionErrorKind::UnsupportedFormat { .. } => {
                eprintln!("\nTip: Use --from and --to to name the formats explicitly");
            }
            _ => {}
        },
        _ => {}
    }

    // Show usage hint
    eprintln!("\nTry 'dataconv --help' for usage information.");
}
