//! Login, logout, registration and password reset.

use dialoguer::Input;
use tracing::warn;

use vpsdash_core::{Dashboard, RegisterForm, ResetPasswordForm};

use crate::cli::{GlobalOpts, LoginArgs, RegisterArgs, ResetPasswordArgs, ResetPasswordCommand};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::account::user_detail;
use super::util;

pub async fn login(
    dashboard: &Dashboard,
    args: LoginArgs,
    global: &GlobalOpts,
    config: &Config,
) -> Result<(), CliError> {
    let profile_name = config::active_profile_name(global, config);

    let remembered = config
        .profiles
        .get(&profile_name)
        .and_then(|p| p.email.clone());
    let email = match args.email.or(remembered) {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(util::prompt_err)?,
    };
    let password = util::password_or_prompt(args.password, "Password")?;

    let session = dashboard.login(&email, &password).await?;

    if let Err(e) = config::store_session_token(&profile_name, &session.token) {
        warn!(error = %e, "session token not persisted");
        output::notice(
            "Note: no credential store available; pass --token or set VPSDASH_TOKEN next time.",
            global.quiet,
        );
    }

    output::notice(
        &format!("✓ Logged in as {} <{}>", session.user.name, session.user.email),
        global.quiet,
    );
    let out = output::render_single(global.output_format(), &session.user, user_detail, |u| {
        u.id.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn logout(
    dashboard: &Dashboard,
    global: &GlobalOpts,
    config: &Config,
) -> Result<(), CliError> {
    dashboard.logout().await?;

    let profile_name = config::active_profile_name(global, config);
    if let Err(e) = config::clear_session_token(&profile_name) {
        warn!(error = %e, "stored session token not removed");
    }
    output::notice("✓ Logged out", global.quiet);
    Ok(())
}

pub async fn register(
    dashboard: &Dashboard,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (password, confirm_password) = util::new_password(args.password)?;
    let form = RegisterForm {
        email: args.email,
        password,
        confirm_password,
        invite_code: args.invite_code,
    };

    let message = dashboard.register(&form).await?;
    output::notice(&format!("✓ {message}"), global.quiet);
    Ok(())
}

pub async fn reset_password(
    dashboard: &Dashboard,
    args: ResetPasswordArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let message = match args.command {
        ResetPasswordCommand::SendCode { email } => dashboard.send_reset_code(&email).await?,
        ResetPasswordCommand::Confirm {
            email,
            code,
            password,
        } => {
            let (new_password, confirm_password) = util::new_password(password)?;
            let form = ResetPasswordForm {
                email,
                code,
                new_password,
                confirm_password,
            };
            dashboard.reset_password(&form).await?
        }
    };
    output::notice(&format!("✓ {message}"), global.quiet);
    Ok(())
}
