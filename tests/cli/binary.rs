use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn numcheck(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_numcheck"));
    cmd.current_dir(dir)
        .env_remove("NUMCHECK_ROOT")
        .env("NO_COLOR", "1");
    cmd
}

fn run_numcheck(dir: &Path, args: &[&str]) -> Output {
    numcheck(dir).args(args).output().expect("run numcheck")
}

fn run_numcheck_with_stdin(dir: &Path, args: &[&str], input: &str) -> Output {
    let mut child = numcheck(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn numcheck");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait numcheck")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

fn put(dir: &Path, root: &str, id: &str, value: &str) {
    let out = run_numcheck(dir, &["--root", root, "put", "--id", id, "--value", value]);
    assert!(out.status.success(), "put failed: {}", stderr(&out));
}

#[test]
fn check_single_id_sets_exit_status() {
    let tmp = TempDir::new().expect("tmpdir");
    let dir = tmp.path();
    put(dir, "data", "2", "24");
    put(dir, "data", "3", "10");

    let invalid = run_numcheck(dir, &["--root", "data", "check", "--id", "2"]);
    assert_eq!(invalid.status.code(), Some(1));
    assert_eq!(stdout(&invalid).trim(), "result invalid: result too high: 24");

    let valid = run_numcheck(dir, &["--root", "data", "check", "--id", "3"]);
    assert_eq!(valid.status.code(), Some(0));
    assert_eq!(stdout(&valid).trim(), "result valid");

    let missing = run_numcheck(dir, &["--root", "data", "check", "--id", "-4"]);
    assert_eq!(missing.status.code(), Some(1));
    assert_eq!(stdout(&missing).trim(), "result invalid: Not found: -4");
}

#[test]
fn no_subcommand_reads_ids_from_stdin() {
    let tmp = TempDir::new().expect("tmpdir");
    let dir = tmp.path();
    put(dir, "data", "2", "24");
    put(dir, "data", "9", "1");

    let out = run_numcheck_with_stdin(dir, &["--root", "data"], "2\nx\n\n9\n");
    assert!(out.status.success(), "loop failed: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "result invalid: result too high: 24\n\
         result invalid: invalid id: x\n\
         result valid\n"
    );
    assert!(stderr(&out).contains("checked 3 ids: 1 valid, 2 invalid"));
}

#[test]
fn json_check_loop_keeps_stderr_quiet() {
    let tmp = TempDir::new().expect("tmpdir");
    let dir = tmp.path();
    put(dir, "data", "1", "7");

    let out = run_numcheck_with_stdin(dir, &["--root", "data", "check", "--format", "json"], "1\n");
    assert!(out.status.success());
    let envelope: serde_json::Value = serde_json::from_str(stdout(&out).trim()).expect("json");
    assert_eq!(envelope["valid"], true);
    assert!(stderr(&out).is_empty(), "unexpected stderr: {}", stderr(&out));
}

#[test]
fn unknown_format_is_reported_as_error() {
    let tmp = TempDir::new().expect("tmpdir");
    let out = run_numcheck(tmp.path(), &["--root", "data", "check", "--id", "1", "--format", "yaml"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Error:"), "stderr: {}", stderr(&out));
    assert!(stderr(&out).contains("unknown format 'yaml'"));
}

#[test]
fn root_comes_from_env_when_flag_absent() {
    let tmp = TempDir::new().expect("tmpdir");
    let dir = tmp.path();
    let root = dir.join("from-env");

    let out = numcheck(dir)
        .env("NUMCHECK_ROOT", &root)
        .args(["put", "--id", "5", "--value", "11"])
        .output()
        .expect("run numcheck");
    assert!(out.status.success(), "put failed: {}", stderr(&out));
    assert!(root.join("numbers.db").exists());

    let out = numcheck(dir)
        .env("NUMCHECK_ROOT", &root)
        .args(["check", "--id", "5"])
        .output()
        .expect("run numcheck");
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out).trim(), "result invalid: result too high: 11");

    let flag_root = dir.join("from-flag");
    let out = numcheck(dir)
        .env("NUMCHECK_ROOT", &root)
        .args(["--root", flag_root.to_str().unwrap(), "init"])
        .output()
        .expect("run numcheck");
    assert!(out.status.success());
    assert!(flag_root.join("numbers.db").exists());
}

#[test]
fn config_file_and_list() {
    let tmp = TempDir::new().expect("tmpdir");
    let dir = tmp.path();
    std::fs::write(dir.join("numcheck.toml"), "root = \"store\"\nactor = \"cli-test\"\n")
        .expect("write config");

    for (id, value) in [("3", "30"), ("-1", "4")] {
        let out = run_numcheck(dir, &["put", "--id", id, "--value", value]);
        assert!(out.status.success(), "put failed: {}", stderr(&out));
    }

    let out = run_numcheck(dir, &["list"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "-1\t4\n3\t30\n");

    let audit = std::fs::read_to_string(dir.join("store").join("broker.events.jsonl"))
        .expect("audit log");
    assert!(audit.contains("\"actor\":\"cli-test\""));
}

#[test]
fn bad_config_file_fails_with_error() {
    let tmp = TempDir::new().expect("tmpdir");
    let dir = tmp.path();
    std::fs::write(dir.join("numcheck.toml"), "threshold = 20\n").expect("write config");

    let out = run_numcheck(dir, &["list"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Config error"));
}
