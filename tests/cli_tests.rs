//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SCHEMA: &str = r#"
ENV_VAR = true
ARGV_VAR = true
FILE_VAR = true
APP_BOOL = { required = true, type = "boolean" }
APP_PORT = { required = true, type = "number", acceptable_values = [2000, 3000, 4000] }
APP_DEFAULT = { required = true, default = "app default" }
TIE_VAR = { required = true, tie_breaker = "file" }
"#;

const ENV_FILE: &str = "FILE_VAR=this variable came from the .env file\n\
APP_BOOL=false\n\
APP_PORT=3000\n\
TIE_VAR='from the .env file'\n";

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("unified-env"))
}

fn fixture() -> TempDir {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("schema.toml"), SCHEMA).expect("write schema");
    fs::write(tmp.path().join(".env"), ENV_FILE).expect("write env file");
    tmp
}

#[test]
fn test_cli_version() {
    cmd().arg("--version").assert().success().stdout(predicate::str::contains("unified-env"));
}

#[test]
fn test_cli_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merge env variables"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("parse"));
}

#[test]
fn test_generate_merges_all_sources() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .env("ENV_VAR", "from process env")
        .env("TIE_VAR", "env loses to the file")
        .args(["generate", "--schema", "schema.toml", "--file", ".env", "--"])
        .args(["--ARGV_VAR", "from", "argv", "--TIE_VAR=argv loses too"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""ENV_VAR": "from process env""#))
        .stdout(predicate::str::contains(r#""ARGV_VAR": "from argv""#))
        .stdout(predicate::str::contains(r#""APP_BOOL": false"#))
        .stdout(predicate::str::contains(r#""APP_PORT": 3000"#))
        .stdout(predicate::str::contains(r#""APP_DEFAULT": "app default""#))
        .stdout(predicate::str::contains(r#""TIE_VAR": "from the .env file""#));
}

#[test]
fn test_generate_respects_order() {
    let tmp = fixture();
    fs::write(tmp.path().join("small.toml"), "NAME = true\n").expect("write schema");
    fs::write(tmp.path().join("name.env"), "NAME=file\n").expect("write env file");

    cmd()
        .current_dir(tmp.path())
        .env("NAME", "env")
        .args(["generate", "-s", "small.toml", "-f", "name.env", "--order", "file,env"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""NAME": "file""#));
}

#[test]
fn test_generate_reports_failure() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .env_remove("ENV_VAR")
        .args(["generate", "--schema", "schema.toml", "--order", "env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Errors occurred - see log messages for details"))
        .stderr(predicate::str::contains("Missing required variable."));
}

#[test]
fn test_generate_missing_env_file() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["generate", "--schema", "schema.toml", "--file", "nope.env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot find file:"));
}

#[test]
fn test_generate_rejects_invalid_order() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["generate", "--schema", "schema.toml", "--order", "env,registry"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid source 'registry'"));
}

#[test]
fn test_generate_rejects_invalid_log_level() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["generate", "--schema", "schema.toml", "--log-level", "loud"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("logLevel: loud"));
}

#[test]
fn test_parse_argv() {
    cmd()
        .args(["parse", "argv", "--", "--DEV", "--TEST=awesome", "sauce"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""DEV": "true""#))
        .stdout(predicate::str::contains(r#""TEST": "awesome sauce""#));
}

#[test]
fn test_parse_file() {
    let tmp = fixture();
    cmd()
        .current_dir(tmp.path())
        .args(["parse", "file", ".env"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""APP_PORT": "3000""#))
        .stdout(predicate::str::contains(r#""TIE_VAR": "from the .env file""#));
}
