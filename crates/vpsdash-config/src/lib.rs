//! Shared configuration for vpsdash.
//!
//! TOML profiles, session token storage (env + keyring), and translation
//! to `vpsdash_core::DashboardConfig`. The CLI layers its global flags
//! on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use vpsdash_core::config::MAX_LATENCY_SCALE;
use vpsdash_core::{BackendConfig, Currency, DashboardConfig};

const KEYRING_SERVICE: &str = "vpsdash";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("credential store error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Explicit name, else `default_profile`, else `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile { name: name.into() })
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// HTTP timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
            currency: default_currency(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    10
}
fn default_currency() -> String {
    "cny".into()
}
fn default_backend() -> String {
    "mock".into()
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// `"mock"` or `"http"`.
    #[serde(default = "default_backend")]
    pub backend: String,

    /// API root for the http backend (e.g. "https://panel.example.com/api").
    pub url: Option<String>,

    /// Login email remembered between sessions.
    pub email: Option<String>,

    /// Environment variable holding a session token.
    pub token_env: Option<String>,

    /// Multiplier on the mock backend's simulated delays.
    pub latency_scale: Option<f64>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Override display currency.
    pub currency: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: None,
            email: None,
            token_env: None,
            latency_scale: None,
            timeout: None,
            currency: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "vpsdash", "vpsdash").map_or_else(
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
    p.push("vpsdash");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Defaults, then `path` if it exists, then `VPSDASH_*` variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("VPSDASH_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(&path, cfg)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Session tokens ──────────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/token"),
    )?)
}

/// Find a stored session token: `token_env` first, then the keyring.
pub fn resolve_session_token(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            if !val.trim().is_empty() {
                return Some(SecretString::from(val));
            }
        }
    }

    match keyring_entry(profile_name).and_then(|e| e.get_password().map_err(ConfigError::from)) {
        Ok(secret) => Some(SecretString::from(secret)),
        Err(e) => {
            debug!(profile = profile_name, error = %e, "no stored session token");
            None
        }
    }
}

pub fn store_session_token(profile_name: &str, token: &SecretString) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(token.expose_secret())?;
    Ok(())
}

/// Remove any stored token. A missing entry is not an error.
pub fn clear_session_token(profile_name: &str) -> Result<(), ConfigError> {
    match keyring_entry(profile_name)?.delete_credential() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

// ── Profile translation ─────────────────────────────────────────────

/// Build a `DashboardConfig` from a profile with no CLI overrides.
///
/// The session token is resolved from `token_env` or the keyring.
pub fn profile_to_dashboard_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<DashboardConfig, ConfigError> {
    let backend = backend_config(profile)?;

    let currency = match profile.currency.as_deref() {
        Some(code) => parse_currency(code)?,
        None => Currency::default(),
    };

    Ok(DashboardConfig {
        backend,
        currency,
        session_token: resolve_session_token(profile, profile_name),
    })
}

/// Check that a profile translates cleanly, without touching the keyring.
pub fn validate_profile(profile: &Profile) -> Result<(), ConfigError> {
    backend_config(profile)?;
    if let Some(code) = profile.currency.as_deref() {
        parse_currency(code)?;
    }
    Ok(())
}

fn backend_config(profile: &Profile) -> Result<BackendConfig, ConfigError> {
    match profile.backend.to_ascii_lowercase().as_str() {
        "mock" => {
            let latency_scale = profile.latency_scale.unwrap_or(1.0);
            if !(0.0..=MAX_LATENCY_SCALE).contains(&latency_scale) {
                return Err(invalid(
                    "latency_scale",
                    format!(
                        "expected a number from 0 to {MAX_LATENCY_SCALE}, got {latency_scale}"
                    ),
                ));
            }
            Ok(BackendConfig::Mock { latency_scale })
        }
        "http" => {
            let raw = profile
                .url
                .as_deref()
                .ok_or_else(|| invalid("url", "required when backend = \"http\""))?;
            let url: url::Url = raw
                .parse()
                .map_err(|_| invalid("url", format!("invalid URL: {raw}")))?;
            let timeout = Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout));
            Ok(BackendConfig::Http { url, timeout })
        }
        other => Err(invalid(
            "backend",
            format!("expected 'mock' or 'http', got '{other}'"),
        )),
    }
}

pub fn parse_currency(code: &str) -> Result<Currency, ConfigError> {
    Currency::from_str(code.trim())
        .map_err(|_| invalid("currency", format!("expected cny, usd or eur, got '{code}'")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.timeout, 10);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load_keeps_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            default_profile: Some("panel".into()),
            defaults: Defaults::default(),
            profiles: HashMap::from([(
                "panel".to_owned(),
                Profile {
                    backend: "http".into(),
                    url: Some("https://panel.example.com/api".into()),
                    email: Some("demo@example.com".into()),
                    timeout: Some(5),
                    ..Profile::default()
                },
            )]),
        };
        save_config_to(&path, &cfg).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.active_profile_name(None), "panel");
        let profile = loaded.profile("panel").unwrap();
        assert_eq!(profile.backend, "http");
        assert_eq!(profile.email.as_deref(), Some("demo@example.com"));
        assert!(loaded.profile("missing").is_err());
    }

    #[test]
    fn backend_defaults_to_mock_when_omitted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[profiles.local]\nlatency_scale = 0.0\n").unwrap();

        let cfg = load_config_from(&path).unwrap();
        let backend = backend_config(cfg.profile("local").unwrap()).unwrap();
        assert_eq!(backend, BackendConfig::Mock { latency_scale: 0.0 });
    }

    #[test]
    fn http_profile_translates() {
        let profile = Profile {
            backend: "HTTP".into(),
            url: Some("https://panel.example.com/api".into()),
            timeout: Some(3),
            ..Profile::default()
        };
        let backend = backend_config(&profile).unwrap();
        assert_eq!(
            backend,
            BackendConfig::Http {
                url: "https://panel.example.com/api".parse().unwrap(),
                timeout: Duration::from_secs(3),
            }
        );
    }

    #[test]
    fn http_profile_requires_valid_url() {
        let mut profile = Profile {
            backend: "http".into(),
            ..Profile::default()
        };
        assert!(matches!(
            backend_config(&profile),
            Err(ConfigError::Validation { ref field, .. }) if field == "url"
        ));

        profile.url = Some("not a url".into());
        assert!(backend_config(&profile).is_err());
    }

    #[test]
    fn rejects_unknown_backend_and_bad_scale() {
        let profile = Profile {
            backend: "grpc".into(),
            ..Profile::default()
        };
        assert!(backend_config(&profile).is_err());

        let profile = Profile {
            latency_scale: Some(-1.0),
            ..Profile::default()
        };
        assert!(backend_config(&profile).is_err());
    }

    #[test]
    fn rejects_latency_scale_above_maximum() {
        for scale in [1e20, f64::INFINITY, MAX_LATENCY_SCALE + 1.0] {
            let profile = Profile {
                latency_scale: Some(scale),
                ..Profile::default()
            };
            assert!(matches!(
                validate_profile(&profile),
                Err(ConfigError::Validation { ref field, .. }) if field == "latency_scale"
            ));
        }
        let profile = Profile {
            latency_scale: Some(MAX_LATENCY_SCALE),
            ..Profile::default()
        };
        assert!(validate_profile(&profile).is_ok());
    }

    #[test]
    fn validate_profile_checks_currency() {
        let profile = Profile {
            currency: Some("btc".into()),
            ..Profile::default()
        };
        assert!(matches!(
            validate_profile(&profile),
            Err(ConfigError::Validation { ref field, .. }) if field == "currency"
        ));
        assert!(validate_profile(&Profile::default()).is_ok());
    }

    #[test]
    fn currency_codes() {
        assert_eq!(parse_currency("USD").unwrap(), Currency::Usd);
        assert_eq!(parse_currency(" eur ").unwrap(), Currency::Eur);
        assert!(parse_currency("gbp").is_err());
    }
}
