//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use secrecy::SecretString;

use vpsdash_core::format::{DEFAULT_DATE_PATTERN, format_date};

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action is refused.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// The given password, or a hidden prompt for one.
pub fn password_or_prompt(given: Option<String>, label: &str) -> Result<SecretString, CliError> {
    let raw = match given {
        Some(p) => p,
        None => rpassword::prompt_password(format!("{label}: ")).map_err(prompt_err)?,
    };
    Ok(SecretString::from(raw))
}

/// New password plus its confirmation. A password passed on the command
/// line or environment stands for both.
pub fn new_password(given: Option<String>) -> Result<(SecretString, SecretString), CliError> {
    if let Some(p) = given {
        return Ok((SecretString::from(p.clone()), SecretString::from(p)));
    }
    let first = rpassword::prompt_password("New password: ").map_err(prompt_err)?;
    let second = rpassword::prompt_password("Confirm password: ").map_err(prompt_err)?;
    Ok((SecretString::from(first), SecretString::from(second)))
}

/// Steady-ticking spinner on stderr; hidden under `--quiet`.
pub fn spinner(message: &'static str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub fn date(dt: &DateTime<Utc>) -> String {
    format_date(dt, DEFAULT_DATE_PATTERN)
}

/// Date only, for tables.
pub fn day(dt: &DateTime<Utc>) -> String {
    format_date(dt, "YYYY-MM-DD")
}
