//! Config subcommand handlers.

use std::io::IsTerminal;

use dialoguer::{Input, Select};

use crate::cli::{BackendKind, ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

// ── Helpers ─────────────────────────────────────────────────────────

/// Human-readable TOML-style view of the config.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);
    let _ = writeln!(out, "currency = \"{}\"", cfg.defaults.currency);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "backend = \"{}\"", p.backend);
        if let Some(ref url) = p.url {
            let _ = writeln!(out, "url = \"{url}\"");
        }
        if let Some(ref email) = p.email {
            let _ = writeln!(out, "email = \"{email}\"");
        }
        if let Some(ref env) = p.token_env {
            let _ = writeln!(out, "token_env = \"{env}\"");
        }
        if let Some(scale) = p.latency_scale {
            let _ = writeln!(out, "latency_scale = {scale}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(ref currency) = p.currency {
            let _ = writeln!(out, "currency = \"{currency}\"");
        }
    }

    out.trim_end().to_owned()
}

/// Prompts only make sense with a terminal and without `--yes`.
fn interactive(global: &GlobalOpts) -> bool {
    !global.yes && std::io::stdin().is_terminal()
}

fn prompt_backend(global: &GlobalOpts) -> Result<BackendKind, CliError> {
    if let Some(kind) = global.backend {
        return Ok(kind);
    }
    if global.url.is_some() {
        return Ok(BackendKind::Http);
    }
    if !interactive(global) {
        return Ok(BackendKind::Mock);
    }
    let choices = &["Mock (built-in demo data)", "HTTP (a deployed dashboard API)"];
    let selection = Select::new()
        .with_prompt("Backend")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    Ok(if selection == 0 {
        BackendKind::Mock
    } else {
        BackendKind::Http
    })
}

fn prompt_url(global: &GlobalOpts) -> Result<String, CliError> {
    if let Some(ref url) = global.url {
        return Ok(url.clone());
    }
    if !interactive(global) {
        return Err(CliError::Validation {
            field: "url".into(),
            reason: "pass --url when creating an http profile non-interactively".into(),
        });
    }
    Input::new()
        .with_prompt("API URL")
        .default("https://panel.example.com/api".into())
        .interact_text()
        .map_err(prompt_err)
}

fn build_profile(email: Option<String>, global: &GlobalOpts) -> Result<Profile, CliError> {
    let backend = prompt_backend(global)?;
    let url = match backend {
        BackendKind::Http => Some(prompt_url(global)?),
        BackendKind::Mock => None,
    };

    let email = match email {
        Some(e) => Some(e),
        None if interactive(global) => {
            let e: String = Input::new()
                .with_prompt("Account email (optional)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;
            Some(e).filter(|e| !e.trim().is_empty())
        }
        None => None,
    };

    let profile = Profile {
        backend: config::backend_name(backend).into(),
        url,
        email,
        latency_scale: global.latency_scale,
        timeout: global.timeout,
        ..Profile::default()
    };
    vpsdash_config::validate_profile(&profile)?;
    Ok(profile)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts, mut cfg: Config) -> Result<(), CliError> {
    match args.command {
        // ── Init: guided setup ──────────────────────────────────────
        ConfigCommand::Init { name, email } => {
            let path = config::config_path();
            output::notice(
                &format!("vpsdash configuration\n   Config path: {}\n", path.display()),
                global.quiet || !interactive(global),
            );

            let profile_name = match name.or_else(|| global.profile.clone()) {
                Some(n) => n,
                None if interactive(global) => Input::new()
                    .with_prompt("Profile name")
                    .default("default".into())
                    .interact_text()
                    .map_err(prompt_err)?,
                None => "default".into(),
            };

            let profile = build_profile(email, global)?;
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            let written = config::save_config(&cfg)?;
            output::notice(
                &format!(
                    "✓ Configuration written to {}\n  Active profile: {profile_name}",
                    written.display()
                ),
                global.quiet,
            );
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let out =
                output::render_single(global.output_format(), &cfg, format_config, |c| {
                    c.active_profile_name(None)
                })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available: config::available_profiles(&cfg),
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::notice(&format!("✓ Default profile set to '{name}'"), global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use vpsdash_config::Defaults;

    use super::*;

    #[test]
    fn format_lists_profiles_sorted() {
        let cfg = Config {
            default_profile: Some("b".into()),
            defaults: Defaults::default(),
            profiles: HashMap::from([
                (
                    "b".to_owned(),
                    Profile {
                        backend: "http".into(),
                        url: Some("https://panel.example.com/api".into()),
                        ..Profile::default()
                    },
                ),
                ("a".to_owned(), Profile::default()),
            ]),
        };

        let text = format_config(&cfg);
        let a = text.find("[profiles.a]").unwrap_or(usize::MAX);
        let b = text.find("[profiles.b]").unwrap_or(usize::MAX);
        assert!(a < b, "{text}");
        assert!(text.contains("url = \"https://panel.example.com/api\""));
        assert!(text.starts_with("default_profile = \"b\""));
    }
}
