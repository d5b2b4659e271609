#![allow(clippy::unwrap_used)]
// Loading and saving `config.toml`.

use pretty_assertions::assert_eq;

use zonedesk_config::{Config, load_config, save_config};

#[test]
fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_file_overrides_only_given_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "base_url = \"https://proxy.example.org\"\nzone = \"example.org\"\n",
    )
    .unwrap();

    let config = load_config(Some(&path)).unwrap();
    assert_eq!(config.base_url, "https://proxy.example.org");
    assert_eq!(config.zone, "example.org");
    assert_eq!(config.pdns_prefix, "/pdns");
    assert_eq!(config.timeout, 30);

    let console = config.to_console_config().unwrap();
    assert_eq!(console.zone, "example.org.");
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "timeout = \"soon\"\n").unwrap();

    assert!(load_config(Some(&path)).is_err());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config {
        zone: "lab.internal.".into(),
        insecure: true,
        timeout: 5,
        ..Config::default()
    };

    let written = save_config(&config, Some(&path)).unwrap();
    assert_eq!(written, path);

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.to_lowercase().contains("api_key"));

    assert_eq!(load_config(Some(&path)).unwrap(), config);
}
