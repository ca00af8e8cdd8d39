//! Profile display and edits, password change.

use tracing::warn;

use vpsdash_core::{ChangePasswordForm, Dashboard, ProfileUpdate, User};

use crate::cli::{AccountArgs, AccountCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

use super::util;

pub(super) fn user_detail(u: &User) -> String {
    [
        format!("ID:    {}", u.id),
        format!("Name:  {}", u.name),
        format!("Email: {}", u.email),
    ]
    .join("\n")
}

fn print_user(user: &User, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(global.output_format(), user, user_detail, |u| {
        u.email.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    dashboard: &Dashboard,
    args: AccountArgs,
    global: &GlobalOpts,
    config: &Config,
) -> Result<(), CliError> {
    match args.command {
        AccountCommand::Show => print_user(&dashboard.account().await?, global),

        AccountCommand::Update { name } => {
            let user = dashboard.update_profile(&ProfileUpdate { name }).await?;
            output::notice("✓ Profile updated", global.quiet);
            print_user(&user, global)
        }

        AccountCommand::ChangePassword {
            current_password,
            password,
        } => {
            let current_password = util::password_or_prompt(current_password, "Current password")?;
            let (new_password, confirm_password) = util::new_password(password)?;
            let form = ChangePasswordForm {
                current_password,
                new_password,
                confirm_password,
            };
            let message = dashboard.change_password(&form).await?;

            let profile_name = config::active_profile_name(global, config);
            if let Err(e) = config::clear_session_token(&profile_name) {
                warn!(error = %e, "stored session token not removed");
            }
            output::notice(&format!("✓ {message}"), global.quiet);
            Ok(())
        }
    }
}
