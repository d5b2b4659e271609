//! Configuration for the zonedesk console.
//!
//! Where the services live, layered from built-in defaults, an optional
//! TOML file and `ZONEDESK_*` environment variables, then validated into a
//! `zonedesk_core::ConsoleConfig`. The API key is absent:
//! nothing in this crate reads or writes a credential.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use zonedesk_core::ConsoleConfig;
use zonedesk_core::config::{
    DEFAULT_PDNS_PREFIX, DEFAULT_SURL_PREFIX, DEFAULT_TIMEOUT_SECS, DEFAULT_ZONE,
};

pub const ENV_PREFIX: &str = "ZONEDESK_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// Contents of `config.toml`. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Proxy origin both services sit behind.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Zone to manage. A trailing dot is added if missing.
    #[serde(default = "default_zone")]
    pub zone: String,

    /// Path prefix of the zone API on the proxy.
    #[serde(default = "default_pdns_prefix")]
    pub pdns_prefix: String,

    /// Path of the short-URL collection on the proxy.
    #[serde(default = "default_surl_prefix")]
    pub surl_prefix: String,

    /// Accept self-signed certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            zone: default_zone(),
            pdns_prefix: default_pdns_prefix(),
            surl_prefix: default_surl_prefix(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}
fn default_zone() -> String {
    DEFAULT_ZONE.into()
}
fn default_pdns_prefix() -> String {
    DEFAULT_PDNS_PREFIX.into()
}
fn default_surl_prefix() -> String {
    DEFAULT_SURL_PREFIX.into()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "zonedesk", "zonedesk").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("zonedesk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Defaults, then the TOML file at `path`, then `ZONEDESK_*` variables.
///
/// A missing file is not an error; the layer is simply empty.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Load config from `path`, or the platform config path when `None`.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    let config: Config = figment(&path).extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path` (or the platform path).
pub fn save_config(cfg: &Config, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(path)
}

// ── Validation ──────────────────────────────────────────────────────

impl Config {
    /// Validate and normalize into the runtime config.
    pub fn to_console_config(&self) -> Result<ConsoleConfig, ConfigError> {
        let base_url: Url = self.base_url.parse().map_err(|e| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("{e}: {}", self.base_url),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "base_url".into(),
                reason: format!("expected http or https, got '{}'", base_url.scheme()),
            });
        }

        let zone = self.zone.trim();
        if zone.is_empty() || zone == "." {
            return Err(ConfigError::Validation {
                field: "zone".into(),
                reason: "must not be empty".into(),
            });
        }

        if self.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        Ok(ConsoleConfig {
            base_url,
            zone: normalize_zone(zone),
            pdns_prefix: normalize_prefix(&self.pdns_prefix),
            surl_prefix: normalize_prefix(&self.surl_prefix),
            timeout: Duration::from_secs(self.timeout),
            accept_invalid_certs: self.insecure,
        })
    }
}

/// Zone names are absolute: `c3.wtf` becomes `c3.wtf.`.
fn normalize_zone(zone: &str) -> String {
    if zone.ends_with('.') {
        zone.to_owned()
    } else {
        format!("{zone}.")
    }
}

/// One leading slash, no trailing slash; empty stays empty.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
