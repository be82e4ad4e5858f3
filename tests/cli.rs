use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn get_rox_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rox"))
}

/// Write `source` to a per-test file in the temp directory.
fn script(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rox-cli-{}-{}.rox", std::process::id(), name));
    fs::write(&path, source).expect("Failed to write script");
    path
}

fn run_script(name: &str, source: &str) -> Output {
    let path = script(name, source);
    let output = get_rox_binary()
        .arg(&path)
        .output()
        .expect("Failed to execute rox");
    let _ = fs::remove_file(&path);
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_run_file_success() {
    let output = run_script("success", "var a = 1;\n{ var a = 2; print a; }\nprint a;\n");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "2\n1\n");
    assert_eq!(stderr(&output), "");
}

#[test]
fn test_syntax_error_exit_code() {
    let output = run_script("syntax", "print 1;\nprint ;\n");

    assert_eq!(output.status.code(), Some(65));
    assert_eq!(stdout(&output), "");
    assert_eq!(stderr(&output), "[line 2] Error at ';': Expected expression\n");
}

#[test]
fn test_runtime_error_exit_code() {
    let output = run_script("runtime", "print \"ok\";\nprint 1/0;\n");

    assert_eq!(output.status.code(), Some(70));
    assert_eq!(stdout(&output), "ok\n");
    assert_eq!(stderr(&output), "Division by zero.\n[line 2]\n");
}

#[test]
fn test_too_many_scripts_is_usage_error() {
    let output = get_rox_binary()
        .arg("a.rox")
        .arg("b.rox")
        .output()
        .expect("Failed to execute rox");

    assert_eq!(output.status.code(), Some(64));
    assert!(stderr(&output).contains("Usage: rox [script]"));
}

#[test]
fn test_missing_file_fails() {
    let output = get_rox_binary()
        .arg("definitely-not-here.rox")
        .output()
        .expect("Failed to execute rox");

    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to open file"));
}

#[test]
fn test_prompt_keeps_going_after_errors() {
    let mut child = get_rox_binary()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn rox");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"var a = 1;\nprint a +;\nprint a / 0;\nprint a;\n")
        .expect("Failed to write to stdin");

    let output = child.wait_with_output().expect("Failed to wait for rox");

    assert!(output.status.success(), "prompt never exits non-zero");
    assert_eq!(stdout(&output), "> > > > 1\n> ");

    let errors = stderr(&output);
    assert!(errors.contains("[line 1] Error at ';': Expected expression"));
    assert!(errors.contains("Division by zero.\n[line 1]"));
}

#[test]
fn test_tokenize() {
    let path = script("tokenize", "var x = 3;\n\"hi\"");
    let output = get_rox_binary()
        .arg("tokenize")
        .arg(&path)
        .output()
        .expect("Failed to execute rox");
    let _ = fs::remove_file(&path);

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "VAR var null\nIDENTIFIER x null\nEQUAL = null\nNUMBER 3 3.0\nSEMICOLON ; null\nSTRING \"hi\" hi\nEOF  null\n"
    );
}

#[test]
fn test_tokenize_json() {
    let path = script("tokenize-json", "print 1;");
    let output = get_rox_binary()
        .arg("tokenize")
        .arg("--json")
        .arg(&path)
        .output()
        .expect("Failed to execute rox");
    let _ = fs::remove_file(&path);

    assert!(output.status.success());

    let tokens: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    let tokens = tokens.as_array().expect("a JSON array");

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0]["token_type"], "PRINT");
    assert_eq!(tokens[1]["token_type"]["NUMBER"], 1.0);
    assert_eq!(tokens[3]["line"], 1);
}

#[test]
fn test_tokenize_reports_lex_errors() {
    let path = script("tokenize-err", "@");
    let output = get_rox_binary()
        .arg("tokenize")
        .arg(&path)
        .output()
        .expect("Failed to execute rox");
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(65));
    assert_eq!(stderr(&output), "[line 1] Error: Unexpected character: @\n");
    assert_eq!(stdout(&output), "EOF  null\n");
}

#[test]
fn test_parse_prints_tree() {
    let path = script("parse", "print 1 + 2 * 3;");
    let output = get_rox_binary()
        .arg("parse")
        .arg(&path)
        .output()
        .expect("Failed to execute rox");
    let _ = fs::remove_file(&path);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "(print (+ 1.0 (* 2.0 3.0)))\n");
}

#[test]
fn test_evaluate_expression() {
    let path = script("evaluate", "(1 + 2) * \"\" == nil or 4 / 2");
    let output = get_rox_binary()
        .arg("evaluate")
        .arg(&path)
        .output()
        .expect("Failed to execute rox");
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(70));
    assert_eq!(stderr(&output), "Operands must be numbers.\n[line 1]\n");

    let path = script("evaluate-ok", "1 == 2 or 4 / 2");
    let output = get_rox_binary()
        .arg("evaluate")
        .arg(&path)
        .output()
        .expect("Failed to execute rox");
    let _ = fs::remove_file(&path);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "2\n");
}

#[test]
fn test_log_flag_writes_log_file() {
    let log = std::env::temp_dir().join(format!("rox-cli-{}.log", std::process::id()));
    let path = script("logged", "print 1;");
    let output = get_rox_binary()
        .arg("--log")
        .arg("--log-file")
        .arg(&log)
        .arg(&path)
        .output()
        .expect("Failed to execute rox");
    let _ = fs::remove_file(&path);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "1\n");

    let contents = fs::read_to_string(&log).expect("log file exists");
    let _ = fs::remove_file(&log);
    assert!(contents.contains("Logger initialized"));
}
