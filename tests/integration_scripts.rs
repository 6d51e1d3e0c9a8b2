// Drive the winforth binary through its standard input and check what it prints.

use std::{
    io::Write,
    process::{Command, Output, Stdio},
};
use tempfile::NamedTempFile;

fn run_winforth(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_winforth"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("WINFORTH_PATH")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to run interpreter");

    // The child may exit without reading its input, so a failed write is not an error here.
    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(input.as_bytes());
    }

    child.wait_with_output().expect("Failed to wait on interpreter")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_banner_and_ok() {
    let output = run_winforth(&[], "1 2 + .\n");
    let stdout = stdout_of(&output);

    assert!(output.status.success());
    assert!(stdout.contains("type 'bye' to quit"), "Missing banner in output");
    assert!(stdout.contains("3  ok"), "Missing '3  ok' in output: {}", stdout);
}

#[test]
fn test_error_reports_stack_and_recovers() {
    let output = run_winforth(&[], "1 2 nope 3\n.s\n");
    let stdout = stdout_of(&output);

    assert!(stdout.contains("nope ??"), "Missing unknown word report: {}", stdout);
    assert!(stdout.contains("Stack trace: 1 2 <2>"), "Missing stack trace: {}", stdout);
    assert!(stdout.contains("<0> ok"), "Stack was not cleared: {}", stdout);
    assert!(stderr_of(&output).contains('\x07'), "Missing bell on stderr");
}

#[test]
fn test_multi_line_definition() {
    let output = run_winforth(&[], ": sq\ndup *\n;\n7 sq .\n");
    let stdout = stdout_of(&output);

    assert!(stdout.contains("sq  ok"), "Missing definition echo: {}", stdout);
    assert!(stdout.contains("49  ok"), "Missing result: {}", stdout);
}

#[test]
fn test_bye() {
    let output = run_winforth(&[], "1 . bye\n2 .\n");
    let stdout = stdout_of(&output);

    assert!(output.status.success());
    assert!(stdout.contains("1 "), "Missing output before bye: {}", stdout);
    assert!(!stdout.contains("2 "), "Evaluated input after bye: {}", stdout);
    assert!(stderr_of(&output).contains("Quaerendo invenietis."));
}

#[test]
fn test_files_load_before_the_prompt() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b": greet .\" hello\" ;\n").unwrap();
    file.flush().unwrap();

    let path = file.path().to_string_lossy().to_string();
    let output = run_winforth(&[&path], "greet\n");
    let stdout = stdout_of(&output);

    assert!(stdout.contains(&format!("loading {}", path)), "Missing loading line: {}", stdout);
    assert!(stdout.contains("hello ok"), "Word from file not available: {}", stdout);
}

#[test]
fn test_no_repl() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"6 7 * .\n").unwrap();
    file.flush().unwrap();

    let path = file.path().to_string_lossy().to_string();
    let output = run_winforth(&["--no-repl", &path], "99 .\n");
    let stdout = stdout_of(&output);

    assert!(output.status.success());
    assert!(stdout.contains("42  ok"), "Missing file output: {}", stdout);
    assert_eq!(stdout.matches(" ok").count(), 1, "Read from stdin with --no-repl: {}", stdout);
}
