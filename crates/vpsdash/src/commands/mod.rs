//! Command dispatch: bridges CLI args -> `Dashboard` calls -> output formatting.

pub mod account;
pub mod announcements;
pub mod auth;
pub mod checkout;
pub mod config_cmd;
pub mod downloads;
pub mod nodes;
pub mod overview;
pub mod plans;
pub mod subscriptions;
pub mod util;

use vpsdash_core::Dashboard;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    dashboard: &Dashboard,
    global: &GlobalOpts,
    config: &Config,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(dashboard, args, global, config).await,
        Command::Logout => auth::logout(dashboard, global, config).await,
        Command::Register(args) => auth::register(dashboard, args, global).await,
        Command::ResetPassword(args) => auth::reset_password(dashboard, args, global).await,
        Command::Account(args) => account::handle(dashboard, args, global, config).await,
        Command::Overview => overview::handle(dashboard, global).await,
        Command::Subscriptions(args) => subscriptions::handle(dashboard, &args, global).await,
        Command::Plans(args) => plans::handle(dashboard, args, global).await,
        Command::Nodes(args) => nodes::handle(dashboard, args, global).await,
        Command::Announcements(args) => announcements::handle(dashboard, args, global).await,
        Command::Downloads(args) => downloads::handle(dashboard, &args, global),
        Command::Checkout(args) => checkout::handle(dashboard, args, global).await,
        // Config and Completions are handled before a backend is built
        Command::Config(_) | Command::Completions(_) => Err(CliError::Config {
            message: "command does not use a backend".into(),
        }),
    }
}
