//! Tests for layered configuration

use clap::Parser;
use minelab::cli::Args;
use minelab::config::{Config, ENV_API_URL, ENV_TIMEOUT_SECS};
use minelab_sdk::AnalysisKind;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

fn args_with_config(path: &Path, extra: &[&str]) -> Args {
    let mut argv = vec!["minelab", "--config", path.to_str().unwrap()];
    argv.extend_from_slice(extra);
    Args::try_parse_from(argv).unwrap()
}

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

fn write_config(dir: &Path, yaml: &str) -> std::path::PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}

// ============================================================================
// Layer precedence
// ============================================================================

#[test]
fn test_empty_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "");

    let config = Config::resolve(&args_with_config(&path, &[]), env_of(&[])).unwrap();

    assert_eq!(config.api_url, "http://127.0.0.1:8000");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(
        config.endpoints.endpoint(AnalysisKind::Cluster).path,
        "/api/kmeans-clustering/"
    );
}

#[test]
fn test_file_values_apply() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "api_url: http://mining.local:9000\ntimeout_secs: 5\nhistory_file: /tmp/h.json\n",
    );

    let config = Config::resolve(&args_with_config(&path, &[]), env_of(&[])).unwrap();

    assert_eq!(config.api_url, "http://mining.local:9000");
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(config.history_file, Path::new("/tmp/h.json"));
}

#[test]
fn test_env_beats_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "api_url: http://from-file\ntimeout_secs: 5\n");
    let env = env_of(&[(ENV_API_URL, "http://from-env"), (ENV_TIMEOUT_SECS, "12")]);

    let config = Config::resolve(&args_with_config(&path, &[]), env).unwrap();

    assert_eq!(config.api_url, "http://from-env");
    assert_eq!(config.timeout, Duration::from_secs(12));
}

#[test]
fn test_flags_beat_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "api_url: http://from-file\n");
    let env = env_of(&[(ENV_API_URL, "http://from-env"), (ENV_TIMEOUT_SECS, "12")]);
    let args = args_with_config(&path, &["--api-url", "http://from-flag", "--timeout-secs", "2"]);

    let config = Config::resolve(&args, env).unwrap();

    assert_eq!(config.api_url, "http://from-flag");
    assert_eq!(config.timeout, Duration::from_secs(2));
}

#[test]
fn test_blank_env_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "api_url: http://from-file\n");
    let env = env_of(&[(ENV_API_URL, "  "), (ENV_TIMEOUT_SECS, "")]);

    let config = Config::resolve(&args_with_config(&path, &[]), env).unwrap();

    assert_eq!(config.api_url, "http://from-file");
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_invalid_timeout_env_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "");
    let env = env_of(&[(ENV_TIMEOUT_SECS, "soon")]);

    let err = Config::resolve(&args_with_config(&path, &[]), env).unwrap_err();
    assert!(format!("{:#}", err).contains(ENV_TIMEOUT_SECS));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");

    assert!(Config::resolve(&args_with_config(&path, &[]), env_of(&[])).is_err());
}

#[test]
fn test_malformed_yaml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(dir.path(), "timeout_secs: [1, 2\n");

    assert!(Config::resolve(&args_with_config(&path, &[]), env_of(&[])).is_err());
}
