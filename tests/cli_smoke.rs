#![allow(clippy::unwrap_used)]
//! CLI smoke tests to verify basic command functionality.
//!
//! Every test points `XDG_CONFIG_HOME` at a temporary directory and avoids
//! paths that would reach a translation provider over the network.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn namecast(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("namecast").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(config_home: &TempDir, contents: &str) {
    let dir = config_home.path().join("namecast");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

const ALL_DISABLED: &str = r"
[providers.google]
enabled = false
";

#[test]
fn test_help_displays_usage() {
    let home = TempDir::new().unwrap();
    namecast(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("several translation providers"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--pick"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_version_displays_version() {
    let home = TempDir::new().unwrap();
    namecast(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_formats_lists_all_formats_with_samples() {
    let home = TempDir::new().unwrap();
    namecast(&home)
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("HELLO_WORLD"))
        .stdout(predicate::str::contains("hello_world"))
        .stdout(predicate::str::contains("helloWorld"))
        .stdout(predicate::str::contains("(default)"));
}

#[test]
fn test_providers_list_without_config() {
    let home = TempDir::new().unwrap();
    namecast(&home)
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("Google Translate"))
        .stdout(predicate::str::contains("Tencent Translate"))
        .stdout(predicate::str::contains("disabled"));
}

#[test]
fn test_providers_reports_missing_credentials() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        r"
        [providers.glm]
        enabled = true
        ",
    );
    namecast(&home)
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please configure GLM API key first"));
}

#[test]
fn test_configure_show_prints_settings() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        r#"
        [namecast]
        format = "camel"
        "#,
    );
    namecast(&home)
        .args(["configure", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current settings"))
        .stdout(predicate::str::contains("camel"));
}

#[test]
fn test_blank_input_is_a_no_op() {
    let home = TempDir::new().unwrap();
    namecast(&home)
        .write_stdin("   \n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_no_enabled_providers_exits_with_config_code() {
    let home = TempDir::new().unwrap();
    write_config(&home, ALL_DISABLED);
    namecast(&home)
        .arg("hello world")
        .assert()
        .code(exitcode::CONFIG)
        .stderr(predicate::str::contains("No translation providers are enabled"));
}

#[test]
fn test_watch_without_providers_exits_with_config_code() {
    let home = TempDir::new().unwrap();
    write_config(&home, ALL_DISABLED);
    namecast(&home)
        .arg("watch")
        .write_stdin("hello\n")
        .assert()
        .code(exitcode::CONFIG);
}

#[test]
fn test_watch_with_empty_stdin_exits_cleanly() {
    let home = TempDir::new().unwrap();
    namecast(&home)
        .arg("watch")
        .write_stdin("")
        .assert()
        .success();
}

#[test]
fn test_invalid_config_reports_parse_error() {
    let home = TempDir::new().unwrap();
    write_config(&home, "[namecast\nformat = ");
    namecast(&home)
        .arg("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_unknown_provider_in_config_is_rejected() {
    let home = TempDir::new().unwrap();
    write_config(
        &home,
        r"
        [providers.bing]
        enabled = true
        ",
    );
    namecast(&home)
        .arg("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider(s) in config: bing"));
}

#[test]
fn test_unknown_format_is_rejected() {
    let home = TempDir::new().unwrap();
    namecast(&home)
        .args(["-f", "kebab", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("kebab"));
}
