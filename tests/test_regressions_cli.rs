use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::tempdir;

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_txtql")
}

fn write_file(path: &Path, content: &str) {
    fs::write(path, content).expect("failed to write test file");
}

fn txtql() -> Command {
    let mut cmd = Command::new(bin());
    cmd.env_remove("TXTQL_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

#[test]
fn test_query_prints_matching_lines_with_terminators() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("app.log");
    write_file(&file, "WARN disk error\nINFO ok\nWARN retry\n");

    let output = txtql()
        .args([
            "query",
            &format!("select line from '{}' starting warn", file.display()),
        ])
        .output()
        .expect("command should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "WARN disk error\nWARN retry\n"
    );
}

#[test]
fn test_no_match_exits_zero_with_message() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("app.log");
    write_file(&file, "alpha\n");

    let output = txtql()
        .args([
            "query",
            &format!("select line from '{}' containing zeta", file.display()),
        ])
        .output()
        .expect("command should run");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "(no matching lines)\n"
    );
}

#[test]
fn test_invalid_query_exits_nonzero_with_single_error() {
    let output = txtql()
        .args(["query", "select line data.txt containing x"])
        .output()
        .expect("command should run");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "no partial output on failure");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Missing 'from' keyword"),
        "unexpected stderr:\n{}",
        stderr
    );
}

#[test]
fn test_missing_file_exits_nonzero() {
    let dir = tempdir().expect("temp dir");
    let missing = dir.path().join("nope.txt");

    let output = txtql()
        .args([
            "query",
            &format!("select line from '{}'", missing.display()),
        ])
        .output()
        .expect("command should run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Could not open file") && stderr.contains("nope.txt"),
        "unexpected stderr:\n{}",
        stderr
    );
}

#[test]
fn test_json_format_written_to_output_file_is_json() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("data.txt");
    let out = dir.path().join("out.json");
    write_file(&file, "one\ntwo\nthree\n");

    let output = txtql()
        .args([
            "-F",
            "json",
            "-o",
            out.to_str().expect("utf8 path"),
            "query",
            &format!("select line from '{}' containing t reverse", file.display()),
        ])
        .output()
        .expect("command should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let file_content = fs::read_to_string(&out).expect("output file should exist");
    let value: serde_json::Value =
        serde_json::from_str(&file_content).expect("output file should hold JSON");
    assert_eq!(value["count"], 2);
    assert_eq!(value["lines"][0]["number"], 3);
    assert_eq!(value["lines"][0]["text"], "three\n");
    assert_eq!(value["lines"][1]["number"], 2);
}

#[test]
fn test_line_numbers_flag() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("data.txt");
    write_file(&file, "a\nb\nc\n");

    let output = txtql()
        .args([
            "query",
            "-n",
            &format!("select line from '{}' not containing b", file.display()),
        ])
        .output()
        .expect("command should run");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "     1: a\n     3: c\n"
    );
}

#[test]
fn test_case_sensitive_flag_and_config_file() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("data.txt");
    let config = dir.path().join("txtql.toml");
    write_file(&file, "err: bad\n");
    write_file(&config, "case_sensitive = true\n");
    let query = format!("select line from '{}' containing ERR", file.display());

    let flag = txtql()
        .args(["--case-sensitive", "query", &query])
        .output()
        .expect("command should run");
    assert_eq!(
        String::from_utf8_lossy(&flag.stdout),
        "(no matching lines)\n"
    );

    let from_config = txtql()
        .args(["--config", config.to_str().expect("utf8 path"), "query", &query])
        .output()
        .expect("command should run");
    assert_eq!(
        String::from_utf8_lossy(&from_config.stdout),
        "(no matching lines)\n"
    );

    let default = txtql()
        .args(["query", &query])
        .output()
        .expect("command should run");
    assert_eq!(String::from_utf8_lossy(&default.stdout), "err: bad\n");
}

#[test]
fn test_explain_does_not_read_the_file() {
    let output = txtql()
        .args([
            "explain",
            "select line from /no/such/file.txt containing a or hasword >= 2 b limit 3",
        ])
        .output()
        .expect("command should run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("/no/such/file.txt"));
    assert!(stdout.contains("hasword"));
    assert!(stdout.contains("limit 3"));
}

#[test]
fn test_repl_reads_queries_from_stdin() {
    let dir = tempdir().expect("temp dir");
    let file = dir.path().join("data.txt");
    write_file(&file, "x1\ny2\n");

    let mut child = txtql()
        .arg("repl")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("command should start");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        writeln!(stdin, "select line from '{}' ending '2'", file.display()).expect("write");
        writeln!(stdin, "select line from").expect("write");
        writeln!(stdin, "quit").expect("write");
    }

    let output = child.wait_with_output().expect("command should finish");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Tiny text-query runner."));
    assert!(stdout.contains("y2\n"));
    assert!(!stdout.contains("x1"));
    assert!(stdout.contains("Error: Missing filename after 'from'"));
    assert!(stdout.contains("bye!"));
}

#[test]
fn test_repl_warns_about_query_only_flags() {
    let dir = tempdir().expect("temp dir");
    let out_file = dir.path().join("out.json");

    let mut child = txtql()
        .args(["-F", "json", "-o"])
        .arg(&out_file)
        .arg("repl")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("command should start");

    {
        let stdin = child.stdin.as_mut().expect("stdin");
        writeln!(stdin, "quit").expect("write");
    }

    let output = child.wait_with_output().expect("command should finish");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--format and --output are ignored by repl"));
    assert!(!out_file.exists());
}
