//! Tests of the headless modes of the `signup_tui` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn signup_tui() -> Command {
    let mut cmd = Command::cargo_bin("signup_tui").unwrap();
    for var in [
        "SIGNUP_URL",
        "SIGNUP_LOCATION_FILE",
        "SIGNUP_OUTPUT",
        "SIGNUP_LOG_FILE",
        "SIGNUP_CONFIG",
        "SIGNUP_NO_ALT_SCREEN",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn print_config_emits_json() {
    signup_tui()
        .args(["--print-config", "--no-alt-screen", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"alt_screen\": false"))
        .stdout(predicate::str::contains("\"verbosity\": 1"));
}

#[test]
fn print_config_merges_file_and_env() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("signup.toml");
    fs::write(&config, "output = \"from-file.jsonl\"\n").unwrap();

    signup_tui()
        .arg("--print-config")
        .env("SIGNUP_CONFIG", &config)
        .env("SIGNUP_URL", "http://localhost/?lastName=Env")
        .assert()
        .success()
        .stdout(predicate::str::contains("from-file.jsonl"))
        .stdout(predicate::str::contains("lastName=Env"));
}

#[test]
fn self_check_renders_prefilled_form() {
    signup_tui()
        .args(["--self-check", "--url", "http://localhost/?email=a%40b.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First Name"))
        .stdout(predicate::str::contains("Email Address"))
        .stdout(predicate::str::contains("a@b.com"))
        .stdout(predicate::str::contains("Submit"));
}

#[test]
fn self_check_reads_location_file() {
    let dir = tempfile::tempdir().unwrap();
    let location = dir.path().join("location");
    fs::write(&location, "http://localhost/?firstName=Stored\n").unwrap();

    signup_tui()
        .arg("--self-check")
        .arg("--location-file")
        .arg(&location)
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored"));
}

#[test]
fn relative_url_fails() {
    signup_tui()
        .args(["--self-check", "--url", "/signup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid setting url"));
}

#[test]
fn broken_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("signup.toml");
    fs::write(&config, "alt_screen = \"sometimes\"\n").unwrap();

    signup_tui()
        .arg("--print-config")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn self_check_does_not_create_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("submissions.jsonl");

    signup_tui()
        .arg("--self-check")
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(!output.exists());
}
