//! Integration tests for directory batches

use dataconv::conversion::batch::{convert_directory, validate_directory, BatchOptions};
use dataconv::conversion::ConversionEngine;
use dataconv::{ConversionConfig, Format};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.json"), r#"{"name": "Alice"}"#).unwrap();
    fs::write(dir.path().join("b.xml"), "<user><name>Bob</name></user>").unwrap();
    fs::write(dir.path().join("readme.txt"), "ignored").unwrap();
    fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
    fs::write(dir.path().join("nested/deeper/c.yml"), "name: Carol\n").unwrap();
    dir
}

fn engine() -> ConversionEngine {
    ConversionEngine::new(ConversionConfig::default())
}

#[test]
fn recursive_batch_mirrors_layout() {
    let input = tree();
    let output = TempDir::new().unwrap();
    let options = BatchOptions {
        recursive: true,
        ..Default::default()
    };

    let mut visited: Vec<PathBuf> = Vec::new();
    let report = convert_directory(
        &engine(),
        input.path(),
        output.path(),
        Format::Json,
        &options,
        |path, result| {
            assert!(result.is_ok(), "{} failed", path.display());
            visited.push(path.to_path_buf());
        },
    )
    .unwrap();

    assert_eq!(visited.len(), 3);
    assert!(report.is_success());
    assert_eq!(report.statistics.file_count, 3);

    for (name, expected) in [
        ("a.json", "Alice"),
        ("b.json", "Bob"),
        ("nested/deeper/c.json", "Carol"),
    ] {
        let content = fs::read_to_string(output.path().join(name)).unwrap();
        assert_eq!(content, format!("{{\n    \"name\": \"{}\"\n}}", expected));
    }
    assert!(!output.path().join("readme.json").exists());
}

#[test]
fn flat_batch_skips_subdirectories() {
    let input = tree();
    let output = TempDir::new().unwrap();

    let report = convert_directory(
        &engine(),
        input.path(),
        output.path(),
        Format::Yaml,
        &BatchOptions::default(),
        |_, _| {},
    )
    .unwrap();

    assert_eq!(report.converted.len(), 2);
    assert!(output.path().join("a.yaml").exists());
    assert!(output.path().join("b.yaml").exists());
    assert!(!output.path().join("nested").exists());
}

#[test]
fn source_format_filter() {
    let input = tree();
    let output = TempDir::new().unwrap();
    let options = BatchOptions {
        recursive: true,
        source_format: Some(Format::Yaml),
        ..Default::default()
    };

    let report = convert_directory(
        &engine(),
        input.path(),
        output.path(),
        Format::Xml,
        &options,
        |_, _| {},
    )
    .unwrap();

    assert_eq!(report.converted.len(), 1);
    let xml = fs::read_to_string(output.path().join("nested/deeper/c.xml")).unwrap();
    assert!(xml.contains("<name>Carol</name>"));
}

#[test]
fn continue_on_error_reports_each_failure() {
    let input = tree();
    fs::write(input.path().join("bad.json"), "{\"unterminated\": ").unwrap();
    fs::write(input.path().join("worse.xml"), "<a><b></a>").unwrap();
    let output = TempDir::new().unwrap();
    let options = BatchOptions {
        recursive: true,
        continue_on_error: true,
        ..Default::default()
    };

    let mut errors = 0;
    let report = convert_directory(
        &engine(),
        input.path(),
        output.path(),
        Format::Yaml,
        &options,
        |_, result| {
            if result.is_err() {
                errors += 1;
            }
        },
    )
    .unwrap();

    assert_eq!(errors, 2);
    assert_eq!(report.failed.len(), 2);
    assert_eq!(report.converted.len(), 3);
    assert_eq!(report.statistics.failed_count, 2);
    assert!(!output.path().join("bad.yaml").exists());
    assert!(!output.path().join("worse.yaml").exists());
}

#[test]
fn first_failure_aborts_without_continue() {
    let input = tree();
    fs::write(input.path().join("aa-bad.json"), "{").unwrap();
    let output = TempDir::new().unwrap();

    let err = convert_directory(
        &engine(),
        input.path(),
        output.path(),
        Format::Yaml,
        &BatchOptions::default(),
        |_, _| {},
    )
    .unwrap_err();
    assert!(err.user_message().contains("JSON syntax error"));
    // a.json sorts before aa-bad.json and was already written
    assert!(output.path().join("a.yaml").exists());
    assert!(!output.path().join("b.yaml").exists());
}

#[test]
fn validation_writes_nothing() {
    let input = tree();
    fs::write(input.path().join("bad.yaml"), "a: [").unwrap();
    let options = BatchOptions {
        recursive: true,
        ..Default::default()
    };

    let report = validate_directory(&engine(), input.path(), &options, |_, _| {}).unwrap();
    assert_eq!(report.converted.len(), 3);
    assert_eq!(report.failed.len(), 1);
    assert!(!input.path().join("a.xml").exists());
}
