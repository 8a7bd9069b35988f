//! Directory-wide conversion and validation

use crate::cli::path_mapping::map_input_to_output;
use crate::conversion::engine::ConversionEngine;
use crate::conversion::stats::ConversionStatistics;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::format::Format;
use crate::parser::directory::find_supported_files;
use crate::parser::DocumentSource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// How a directory is walked and how failures are treated
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    pub recursive: bool,
    pub continue_on_error: bool,
    /// Only pick up files of this format; `None` takes every supported file
    pub source_format: Option<Format>,
}

/// Outcome of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// (input, output) pairs that were written
    pub converted: Vec<(PathBuf, PathBuf)>,
    pub failed: Vec<(PathBuf, ConversionError)>,
    pub statistics: ConversionStatistics,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, input: &Path, result: ConversionResult<(PathBuf, ConversionStatistics)>) {
        match result {
            Ok((output, stats)) => {
                self.statistics.combine(&stats);
                self.converted.push((input.to_path_buf(), output));
            }
            Err(e) => {
                self.statistics.combine(&ConversionStatistics::for_failure());
                self.failed.push((input.to_path_buf(), e));
            }
        }
    }
}

/// List the files a batch run would visit
pub fn discover(input_dir: &Path, options: &BatchOptions) -> ConversionResult<Vec<PathBuf>> {
    find_supported_files(input_dir, options.recursive, options.source_format)
        .map_err(|e| ConversionError::io(&e, Some(input_dir.to_path_buf())))
}

/// Convert every supported file under `input_dir` to `target`, mirroring the
/// directory layout under `output_dir`.
///
/// `on_file` is called after each file with its result. Without
/// `continue_on_error` the first failure stops the run and is returned.
/// Inputs that map onto an output already written in this run (`a.json` and
/// `a.yaml` both becoming `a.xml`) fail instead of overwriting it.
pub fn convert_directory<F>(
    engine: &ConversionEngine,
    input_dir: &Path,
    output_dir: &Path,
    target: Format,
    options: &BatchOptions,
    mut on_file: F,
) -> ConversionResult<BatchReport>
where
    F: FnMut(&Path, Result<&Path, &ConversionError>),
{
    let files = discover(input_dir, options)?;
    info!(count = files.len(), dir = %input_dir.display(), "converting directory");
    let mut report = BatchReport::default();
    let mut written: HashMap<PathBuf, PathBuf> = HashMap::new();

    for input in files {
        let output = map_input_to_output(input_dir, &input, output_dir, target.extension());
        let result = match written.get(&output) {
            Some(first) => Err(output_collision(first, &input, &output)),
            None => convert_one(engine, &input, &output, target),
        };
        if result.is_ok() {
            written.insert(output.clone(), input.clone());
        }

        match &result {
            Ok(_) => on_file(&input, Ok(&output)),
            Err(e) => {
                warn!(file = %input.display(), error = %e, "conversion failed");
                on_file(&input, Err(e));
            }
        }

        let stop = result.is_err() && !options.continue_on_error;
        report.record(&input, result.map(|stats| (output, stats)));
        if stop {
            if let Some((_, error)) = report.failed.pop() {
                return Err(error);
            }
        }
    }

    Ok(report)
}

fn output_collision(first: &Path, input: &Path, output: &Path) -> ConversionError {
    ConversionError::conversion(ConversionErrorKind::ConversionFailed {
        message: format!(
            "{} and {} both map to {}; keeping the output of {}",
            first.display(),
            input.display(),
            output.display(),
            first.display()
        ),
    })
}

fn convert_one(
    engine: &ConversionEngine,
    input: &Path,
    output: &Path,
    target: Format,
) -> ConversionResult<ConversionStatistics> {
    let from = Format::from_path(input).ok_or_else(|| {
        ConversionError::unsupported(input.display().to_string(), target.extension())
    })?;
    let converted = engine.convert_file_as(input, output, from, target)?;
    Ok(converted.metadata.statistics)
}

/// Parse every supported file under `input_dir` without writing anything
pub fn validate_directory<F>(
    engine: &ConversionEngine,
    input_dir: &Path,
    options: &BatchOptions,
    mut on_file: F,
) -> ConversionResult<BatchReport>
where
    F: FnMut(&Path, Result<&Path, &ConversionError>),
{
    let files = discover(input_dir, options)?;
    let mut report = BatchReport::default();

    for input in files {
        let result = validate_file(engine, &input);
        match &result {
            Ok(_) => on_file(&input, Ok(&input)),
            Err(e) => on_file(&input, Err(e)),
        }
        report.record(&input, result.map(|stats| (input.clone(), stats)));
    }

    Ok(report)
}

/// Parse one file with the format its extension names
pub fn validate_file(engine: &ConversionEngine, input: &Path) -> ConversionResult<ConversionStatistics> {
    let format = Format::from_path(input)
        .ok_or_else(|| ConversionError::unsupported(input.display().to_string(), "validate"))?;
    let source = DocumentSource::File(input.to_path_buf());
    crate::conversion::limits::check_source_size_before_read(&source, engine.config())?;
    let content = source.read_content()?;
    engine.parse(format, &content)?;
    Ok(ConversionStatistics::for_conversion(
        content.len() as u64,
        0,
        std::time::Duration::ZERO,
    ))
}
