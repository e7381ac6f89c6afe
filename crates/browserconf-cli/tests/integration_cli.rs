//! End-to-end tests for the `browserconf` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn browserconf(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("browserconf").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn resolve_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_resolve_prints_configuration() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("browserconf.toml"),
        r#"
subresourceIntegrityEnabled = true
differentialLoadingMode = true
mainEntryPath = "src/main.ts"
"#,
    )
    .unwrap();

    let config = resolve_json(browserconf(&temp).args(["resolve", "--compact"]));

    assert_eq!(config["output"]["crossOriginLoading"], "anonymous");
    assert_eq!(config["devtool"], false);
    assert_eq!(config["node"], false);
    assert_eq!(config["target"], serde_json::json!(["web", "es5"]));
    assert_eq!(config["optimization"]["runtimeChunk"], "single");

    let plugins: Vec<&str> = config["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["plugin"].as_str().unwrap())
        .collect();
    assert_eq!(plugins, ["subresource-integrity", "common-js-usage-warn"]);
}

#[test]
fn test_bundler_v4_has_no_target() {
    let temp = TempDir::new().unwrap();
    let config = resolve_json(browserconf(&temp).args(["resolve", "--bundler-version", "4"]));

    assert!(config.get("target").is_none());
    assert_eq!(config["output"]["crossOriginLoading"], false);
}

#[test]
fn test_environment_overrides_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("browserconf.toml"),
        "hotModuleReplacementEnabled = false\n",
    )
    .unwrap();

    let config = resolve_json(
        browserconf(&temp)
            .env("BROWSERCONF_HOT_MODULE_REPLACEMENT_ENABLED", "true")
            .env("BROWSERCONF_SOURCE_MAP_SETTINGS__STYLES", "true")
            .args(["resolve"]),
    );

    let plugins: Vec<&str> = config["plugins"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["plugin"].as_str().unwrap())
        .collect();
    assert_eq!(
        plugins,
        ["source-map-dev-tool", "common-js-usage-warn", "hot-module-replacement"]
    );
    assert_eq!(config["module"]["rules"].as_array().unwrap().len(), 1);
}

#[test]
fn test_plugins_lists_names_in_order() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("browserconf.json"),
        r#"{ "extractLicenses": true, "allowedCommonJsDependencyList": ["moment"] }"#,
    )
    .unwrap();

    browserconf(&temp)
        .arg("plugins")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "license-extraction (3rdpartylicenses.txt)\ncommon-js-usage-warn (allowed: moment)\n",
        ));
}

#[test]
fn test_unsupported_bundler_version_fails() {
    let temp = TempDir::new().unwrap();

    browserconf(&temp)
        .args(["resolve", "--bundler-version", "3.12.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported bundler version"));
}

#[test]
fn test_missing_options_file_fails() {
    let temp = TempDir::new().unwrap();

    browserconf(&temp)
        .args(["resolve", "--options", "nowhere.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere.toml"));
}

#[test]
fn test_quiet_keeps_stderr_clean() {
    let temp = TempDir::new().unwrap();

    browserconf(&temp)
        .args(["--quiet", "resolve"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
