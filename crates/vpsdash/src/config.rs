//! CLI configuration: a thin layer over `vpsdash_config`.
//!
//! Re-exports the shared types and merges `GlobalOpts` flag overrides
//! (--backend, --url, --token, ...) on top of the active profile.

use clap::ValueEnum;
use secrecy::SecretString;
use tracing::debug;

use vpsdash_core::DashboardConfig;

use crate::cli::{BackendKind, ColorMode, CurrencyArg, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use vpsdash_config::{
    Config, Profile, clear_session_token, config_path, load_config, save_config,
    store_session_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Fill unset `--output` / `--color` from the config file's `[defaults]`.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&config.defaults.color, true).ok();
    }
}

/// The profile to run against, with flag overrides applied.
///
/// A missing profile is only an error when it was asked for explicitly;
/// otherwise the mock backend is used.
pub fn effective_profile(global: &GlobalOpts, config: &Config) -> Result<Profile, CliError> {
    let name = active_profile_name(global, config);
    let mut profile = match config.profiles.get(&name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            });
        }
        None => Profile::default(),
    };

    // Flag > env > profile > [defaults]
    if let Some(kind) = global.backend {
        profile.backend = backend_name(kind).into();
    }
    if let Some(ref url) = global.url {
        profile.url = Some(url.clone());
        if global.backend.is_none() {
            profile.backend = backend_name(BackendKind::Http).into();
        }
    }
    if let Some(scale) = global.latency_scale {
        profile.latency_scale = Some(scale);
    }
    profile.timeout = global
        .timeout
        .or(profile.timeout)
        .or(Some(config.defaults.timeout));
    profile.currency = global
        .currency
        .map(|c| currency_code(c).to_owned())
        .or(profile.currency)
        .or_else(|| Some(config.defaults.currency.clone()));

    Ok(profile)
}

/// Build the `DashboardConfig` for data commands.
pub fn dashboard_config(global: &GlobalOpts, config: &Config) -> Result<DashboardConfig, CliError> {
    let name = active_profile_name(global, config);
    let profile = effective_profile(global, config)?;
    let mut dashboard = vpsdash_config::profile_to_dashboard_config(&profile, &name)?;

    if let Some(ref token) = global.token {
        dashboard.session_token = Some(SecretString::from(token.clone()));
    }
    debug!(
        profile = %name,
        backend = %profile.backend,
        has_token = dashboard.session_token.is_some(),
        "resolved dashboard config"
    );
    Ok(dashboard)
}

pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

pub fn backend_name(kind: BackendKind) -> &'static str {
    match kind {
        BackendKind::Mock => "mock",
        BackendKind::Http => "http",
    }
}

fn currency_code(c: CurrencyArg) -> &'static str {
    match c {
        CurrencyArg::Cny => "cny",
        CurrencyArg::Usd => "usd",
        CurrencyArg::Eur => "eur",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use clap::Parser;
    use vpsdash_config::Defaults;
    use vpsdash_core::{BackendConfig, Currency};

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["vpsdash"];
        argv.extend_from_slice(args);
        argv.push("overview");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        Config {
            default_profile: Some(name.into()),
            defaults: Defaults::default(),
            profiles: HashMap::from([(name.to_owned(), profile)]),
        }
    }

    #[test]
    fn no_profile_falls_back_to_mock() {
        let cfg = Config::default();
        let dash = dashboard_config(&global(&["--latency-scale", "0"]), &cfg).unwrap();
        assert_eq!(dash.backend, BackendConfig::Mock { latency_scale: 0.0 });
        assert_eq!(dash.currency, Currency::Cny);
    }

    #[test]
    fn explicit_missing_profile_is_an_error() {
        let cfg = Config::default();
        let err = effective_profile(&global(&["--profile", "work"]), &cfg).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref name, .. } if name == "work"));
    }

    #[test]
    fn url_flag_switches_to_http() {
        let cfg = config_with("home", Profile::default());
        let dash = dashboard_config(
            &global(&["--url", "https://panel.example.com/api", "--timeout", "4"]),
            &cfg,
        )
        .unwrap();
        match dash.backend {
            BackendConfig::Http { url, timeout } => {
                assert_eq!(url.as_str(), "https://panel.example.com/api");
                assert_eq!(timeout.as_secs(), 4);
            }
            other @ BackendConfig::Mock { .. } => panic!("expected http, got {other:?}"),
        }
    }

    #[test]
    fn flags_beat_profile_values() {
        let cfg = config_with(
            "home",
            Profile {
                currency: Some("eur".into()),
                latency_scale: Some(2.0),
                ..Profile::default()
            },
        );
        let dash = dashboard_config(
            &global(&["--currency", "usd", "--token", "abc", "--latency-scale", "0.5"]),
            &cfg,
        )
        .unwrap();
        assert_eq!(dash.currency, Currency::Usd);
        assert_eq!(dash.backend, BackendConfig::Mock { latency_scale: 0.5 });
        assert!(dash.session_token.is_some());
    }

    #[test]
    fn defaults_fill_output_and_color() {
        let mut cfg = Config::default();
        cfg.defaults.output = "yaml".into();
        cfg.defaults.color = "never".into();

        let mut g = global(&[]);
        apply_defaults(&mut g, &cfg);
        assert_eq!(g.output_format(), OutputFormat::Yaml);
        assert_eq!(g.color_mode(), ColorMode::Never);

        let mut explicit = global(&["-o", "json"]);
        apply_defaults(&mut explicit, &cfg);
        assert_eq!(explicit.output_format(), OutputFormat::Json);
    }
}
