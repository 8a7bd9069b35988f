//! End-to-end tests running the dataconv binary

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn dataconv() -> Command {
    Command::new(env!("CARGO_BIN_EXE_dataconv"))
}

fn run(args: &[&str]) -> Output {
    dataconv()
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run dataconv")
}

fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = dataconv()
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start dataconv");
    if let Some(mut stdin) = child.stdin.take() {
        // The process may exit before reading, e.g. on argument errors
        let _ = stdin.write_all(input.as_bytes());
    }
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn converts_file_to_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.json");
    let output = dir.path().join("out.xml");
    fs::write(&input, r#"{"a": 1, "b": [2, 3]}"#).unwrap();

    let result = run(&[
        input.to_str().unwrap(),
        output.to_str().unwrap(),
        "--plain",
        "--no-xml-declaration",
    ]);

    assert!(result.status.success(), "stderr: {}", stderr(&result));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "<data><a>1</a><b>2</b><b>3</b></data>"
    );
    assert!(stdout(&result).is_empty());
}

#[test]
fn writes_to_stdout_without_output_path() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.xml");
    fs::write(&input, "<root><item>1</item><item>2</item></root>").unwrap();

    let result = run(&[input.to_str().unwrap(), "--to", "json", "--indent", "2"]);
    assert!(result.status.success(), "stderr: {}", stderr(&result));
    assert_eq!(stdout(&result), "{\n  \"item\": [\n    \"1\",\n    \"2\"\n  ]\n}\n");
}

#[test]
fn reads_standard_input() {
    let result = run_with_stdin(&["-", "--from", "json", "--to", "yaml"], r#"{"k": [1, 2]}"#);
    assert!(result.status.success(), "stderr: {}", stderr(&result));
    assert_eq!(stdout(&result), "k:\n- 1\n- 2\n");
}

#[test]
fn stdin_requires_source_format() {
    let result = run_with_stdin(&["-", "--to", "yaml"], "{}");
    assert!(!result.status.success());
    assert!(stderr(&result).contains("--from"));
}

#[test]
fn custom_root_tag() {
    let result = run_with_stdin(
        &["-", "--from", "yaml", "--to", "xml", "--plain", "--root-tag", "config"],
        "name: app\n",
    );
    assert!(result.status.success(), "stderr: {}", stderr(&result));
    assert_eq!(
        stdout(&result),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><config><name>app</name></config>\n"
    );
}

#[test]
fn unsupported_extension_fails_without_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    let output = dir.path().join("notes.json");
    fs::write(&input, "hello").unwrap();

    let result = run(&[input.to_str().unwrap(), output.to_str().unwrap()]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("Unsupported conversion"));
    assert!(!output.exists());
}

#[test]
fn syntax_error_reports_location() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.json");
    let output = dir.path().join("bad.yaml");
    fs::write(&input, "{\n  \"a\": 1,\n  \"b\": \n}").unwrap();

    let result = run(&[input.to_str().unwrap(), output.to_str().unwrap()]);
    assert!(!result.status.success());
    let err = stderr(&result);
    assert!(err.contains("JSON syntax error at line 4"), "stderr: {}", err);
    assert!(!output.exists());
}

#[test]
fn validate_only_checks_syntax() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.yml");
    let bad = dir.path().join("bad.xml");
    fs::write(&good, "a: 1\n").unwrap();
    fs::write(&bad, "<a><b></a>").unwrap();

    let result = run(&["--validate-only", good.to_str().unwrap()]);
    assert!(result.status.success(), "stderr: {}", stderr(&result));
    assert!(stderr(&result).contains("Valid"));

    let result = run(&["--validate-only", bad.to_str().unwrap()]);
    assert!(!result.status.success());
    assert!(stderr(&result).contains("XML syntax error"));
}

#[test]
fn converts_directory_recursively() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::create_dir_all(input.path().join("sub")).unwrap();
    fs::write(input.path().join("a.json"), r#"{"x": 1}"#).unwrap();
    fs::write(input.path().join("sub/b.xml"), "<r><y>2</y></r>").unwrap();

    let result = run(&[
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        "--to",
        "yaml",
        "--recursive",
        "--quiet",
    ]);

    assert!(result.status.success(), "stderr: {}", stderr(&result));
    assert_eq!(fs::read_to_string(output.path().join("a.yaml")).unwrap(), "x: 1\n");
    assert_eq!(
        fs::read_to_string(output.path().join("sub/b.yaml")).unwrap(),
        "y: '2'\n"
    );
}

#[test]
fn directory_with_failures_exits_nonzero_when_continuing() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::write(input.path().join("a.json"), "{").unwrap();
    fs::write(input.path().join("b.json"), r#"{"ok": true}"#).unwrap();

    let result = run(&[
        input.path().to_str().unwrap(),
        output.path().to_str().unwrap(),
        "--to",
        "xml",
        "--continue-on-error",
        "--quiet",
    ]);

    assert!(!result.status.success());
    assert!(output.path().join("b.xml").exists());
    assert!(!output.path().join("a.xml").exists());
    assert!(stderr(&result).contains("1 failed"));
}

#[test]
fn stats_are_printed_on_request() {
    let result = run_with_stdin(&["-", "--from", "json", "--to", "json", "--stats"], "[1]");
    assert!(result.status.success(), "stderr: {}", stderr(&result));
    assert!(stderr(&result).contains("Conversion Statistics"));
}
