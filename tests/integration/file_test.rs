//! Integration tests for file conversion workflow

use assert_matches::assert_matches;
use dataconv::conversion::ConversionEngine;
use dataconv::{ConversionConfig, ConversionError, ConversionErrorKind, Format, Value};
use std::fs;
use tempfile::tempdir;

fn engine() -> ConversionEngine {
    ConversionEngine::new(ConversionConfig::default())
}

#[test]
fn json_file_to_xml_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("people.json");
    let output = dir.path().join("people.xml");
    fs::write(
        &input,
        r#"{"person": [{"name": "Ada", "born": 1815}, {"name": "Alan", "born": 1912}]}"#,
    )
    .unwrap();

    let result = engine().convert_file(&input, &output).unwrap();
    assert_eq!(result.metadata.source_format, Format::Json);
    assert_eq!(result.metadata.target_format, Format::Xml);

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, result.content);
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(written.contains("<person>\n        <name>Ada</name>"));
    assert_eq!(written.matches("<person>").count(), 2);
}

#[test]
fn xml_file_to_yml_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("feed.xml");
    let output = dir.path().join("feed.yml");
    fs::write(
        &input,
        "<?xml version=\"1.0\"?>\n<feed version=\"2\">\n  <entry>a</entry>\n  <entry>b</entry>\n</feed>\n",
    )
    .unwrap();

    engine().convert_file(&input, &output).unwrap();

    let back: Value = serde_yaml::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(back.get("version"), Some(&Value::from("2")));
    assert_eq!(
        back.get("entry"),
        Some(&Value::Sequence(vec![Value::from("a"), Value::from("b")]))
    );
}

#[test]
fn uppercase_extensions_are_recognized() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("CONFIG.YAML");
    let output = dir.path().join("config.Json");
    fs::write(&input, "port: 8080\n").unwrap();

    engine().convert_file(&input, &output).unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "{\n    \"port\": 8080\n}"
    );
}

#[test]
fn unsupported_pair_creates_no_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    let output = dir.path().join("notes.json");
    fs::write(&input, "just text").unwrap();

    let err = engine().convert_file(&input, &output).unwrap_err();
    assert_matches!(
        err.kind(),
        Some(ConversionErrorKind::UnsupportedFormat { from, to }) if from == "txt" && to == "json"
    );
    assert!(!output.exists());
}

#[test]
fn syntax_error_creates_no_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.yaml");
    let output = dir.path().join("broken.json");
    fs::write(&input, "key: [1, 2\nother: x\n").unwrap();

    let err = engine().convert_file(&input, &output).unwrap_err();
    assert_matches!(err, ConversionError::ParseError(ref e) if e.format == Format::Yaml);
    assert!(err.user_message().starts_with("YAML syntax error"));
    assert!(!output.exists());
}

#[test]
fn missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let err = engine()
        .convert_file(&dir.path().join("absent.json"), &dir.path().join("out.xml"))
        .unwrap_err();
    assert_matches!(err.kind(), Some(ConversionErrorKind::Io { path: Some(_), .. }));
}

#[test]
fn oversized_file_is_rejected_before_reading() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("big.json");
    let output = dir.path().join("big.yaml");
    fs::write(&input, format!("[\"{}\"]", "x".repeat(4096))).unwrap();

    let engine = ConversionEngine::new(ConversionConfig::default().with_memory_limit(1024));
    let err = engine.convert_file(&input, &output).unwrap_err();
    assert_matches!(err.kind(), Some(ConversionErrorKind::InputTooLarge { limit: 1024, .. }));
    assert!(!output.exists());
}

#[test]
fn explicit_formats_override_extensions() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("payload.data");
    let output = dir.path().join("payload.out");
    fs::write(&input, "<r><v>1</v></r>").unwrap();

    engine()
        .convert_file_as(&input, &output, Format::Xml, Format::Json)
        .unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "{\n    \"v\": \"1\"\n}"
    );
}
