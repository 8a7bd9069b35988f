use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dataconv::cli::{handle_error, Args, CliConfig, CliUtils, InputTarget};
use dataconv::conversion::batch::{self, BatchOptions, BatchReport};
use dataconv::conversion::{limits, ConversionEngine, ConversionStatistics};
use dataconv::error::ConversionResult;
use dataconv::ConversionError;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            match error.downcast_ref::<ConversionError>() {
                Some(conversion_error) => handle_error(conversion_error),
                None => CliUtils::show_error(&format!("{:#}", error)),
            }
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries converted documents
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "dataconv=debug" } else { "dataconv=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Returns `Ok(false)` when some files failed but the run continued
fn run(args: Args) -> Result<bool> {
    let cli = CliConfig::from_args(args)?;
    let engine = ConversionEngine::new(cli.conversion_config.clone());
    let target = cli.input_target()?;
    info!(
        input = %cli.input_description(),
        output = %cli.output_description(),
        "starting"
    );

    if cli.is_validate_only() {
        return Ok(validate(&cli, &engine, &target)?);
    }

    match &target {
        InputTarget::Directory(dir) => Ok(convert_directory(&cli, &engine, dir)?),
        InputTarget::File(_) | InputTarget::Stdin => {
            convert_single(&cli, &engine, &target)?;
            Ok(true)
        }
    }
}

fn convert_single(
    cli: &CliConfig,
    engine: &ConversionEngine,
    target: &InputTarget,
) -> ConversionResult<()> {
    let input_path = match target {
        InputTarget::File(path) => Some(path.as_path()),
        _ => None,
    };
    let from = cli.source_format(input_path)?;
    let to = cli.target_format()?;

    let converted = match (input_path, &cli.args.output) {
        (Some(input), Some(output)) => {
            let converted = engine.convert_file_as(input, output, from, to)?;
            CliUtils::show_success(
                &format!("Converted {} -> {}", input.display(), output.display()),
                cli.is_quiet(),
            );
            converted
        }
        (_, output) => {
            let source = match cli.document_source(target) {
                Some(source) => source,
                None => return Ok(()),
            };
            limits::check_source_size_before_read(&source, &cli.conversion_config)?;
            let content = source.read_content()?;
            let converted = engine.convert(from, to, &content)?;
            match output {
                Some(path) => {
                    write_output(path, &converted.content)?;
                    CliUtils::show_success(
                        &format!("Converted to: {}", path.display()),
                        cli.is_quiet(),
                    );
                }
                None => print_document(&converted.content)?,
            }
            converted
        }
    };

    if cli.want_stats() && !cli.is_quiet() {
        print_statistics(&converted.metadata.statistics);
    }
    Ok(())
}

fn convert_directory(
    cli: &CliConfig,
    engine: &ConversionEngine,
    input_dir: &Path,
) -> ConversionResult<bool> {
    let output_dir = cli.args.output.as_deref().ok_or_else(|| {
        ConversionError::conversion(dataconv::ConversionErrorKind::configuration(
            "Output directory required for directory conversion".to_string(),
        ))
    })?;
    let to = cli.args.to.ok_or_else(|| {
        ConversionError::conversion(dataconv::ConversionErrorKind::configuration(
            "Directory conversion needs --to to name the output format".to_string(),
        ))
    })?;

    let options = batch_options(cli);
    let files = batch::discover(input_dir, &options)?;
    if files.is_empty() {
        CliUtils::show_warning(
            &format!("No convertible files found in {}", input_dir.display()),
            cli.is_quiet(),
        );
        return Ok(true);
    }

    let progress = (!cli.is_quiet()).then(|| CliUtils::create_progress_bar(files.len() as u64));
    let report = batch::convert_directory(
        engine,
        input_dir,
        output_dir,
        to,
        &options,
        |input, result| {
            let relative = input.strip_prefix(input_dir).unwrap_or(input);
            if let Some(pb) = &progress {
                pb.set_message(relative.display().to_string());
                pb.inc(1);
            }
            if let Err(e) = result {
                let message = format!("{}: {}", relative.display(), e.user_message());
                match &progress {
                    Some(pb) => pb.suspend(|| CliUtils::show_error(&message)),
                    None => CliUtils::show_error(&message),
                }
            }
        },
    );
    if let Some(pb) = &progress {
        pb.finish_and_clear();
    }
    let report = report?;

    finish_batch(cli, &report, "Converted");
    Ok(report.is_success())
}

fn validate(cli: &CliConfig, engine: &ConversionEngine, target: &InputTarget) -> ConversionResult<bool> {
    match target {
        InputTarget::Directory(dir) => {
            let report = batch::validate_directory(engine, dir, &batch_options(cli), |input, result| {
                let relative = input.strip_prefix(dir).unwrap_or(input);
                match result {
                    Ok(_) => CliUtils::show_success(&relative.display().to_string(), cli.is_quiet()),
                    Err(e) => {
                        CliUtils::show_error(&format!("{}: {}", relative.display(), e.user_message()))
                    }
                }
            })?;
            finish_batch(cli, &report, "Validated");
            Ok(report.is_success())
        }
        InputTarget::File(path) => {
            let stats = batch::validate_file(engine, path)?;
            CliUtils::show_success(&format!("Valid {}", path.display()), cli.is_quiet());
            if cli.want_stats() && !cli.is_quiet() {
                print_statistics(&stats);
            }
            Ok(true)
        }
        InputTarget::Stdin => {
            let format = cli.source_format(None)?;
            let source = dataconv::DocumentSource::Stdin;
            let content = source.read_content()?;
            engine.parse(format, &content)?;
            CliUtils::show_success(&format!("Valid {}", format.display_name()), cli.is_quiet());
            Ok(true)
        }
    }
}

fn batch_options(cli: &CliConfig) -> BatchOptions {
    BatchOptions {
        recursive: cli.args.recursive,
        continue_on_error: cli.continue_on_error(),
        source_format: cli.args.from,
    }
}

fn finish_batch(cli: &CliConfig, report: &BatchReport, verb: &str) {
    let stats = &report.statistics;
    if report.is_success() {
        CliUtils::show_success(&format!("{} {} files", verb, stats.file_count), cli.is_quiet());
    } else {
        CliUtils::show_warning(
            &format!(
                "{} {} files, {} failed",
                verb, stats.file_count, stats.failed_count
            ),
            false,
        );
    }
    if cli.want_stats() && !cli.is_quiet() {
        print_statistics(stats);
    }
}

fn write_output(path: &Path, content: &str) -> ConversionResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConversionError::io(&e, Some(parent.to_path_buf())))?;
        }
    }
    std::fs::write(path, content).map_err(|e| ConversionError::io(&e, Some(path.to_path_buf())))
}

fn print_document(content: &str) -> ConversionResult<()> {
    let mut stdout = std::io::stdout().lock();
    let result = if content.ends_with('\n') {
        stdout.write_all(content.as_bytes())
    } else {
        writeln!(stdout, "{}", content)
    };
    result.map_err(|e| ConversionError::io(&e, None))
}

fn print_statistics(stats: &ConversionStatistics) {
    eprintln!("\nConversion Statistics:");
    eprintln!("{}", stats.summary());
    eprintln!(
        "Input: {}, output: {}, elapsed: {}",
        CliUtils::format_file_size(stats.input_size_bytes),
        CliUtils::format_file_size(stats.output_size_bytes),
        CliUtils::format_duration(Duration::from_millis(stats.processing_time_ms))
    );
}
