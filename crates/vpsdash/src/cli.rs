//! Clap derive structures for the `vpsdash` CLI.
//!
//! Defines the command tree, global flags, and the value enums shared by
//! handlers. Only clap types appear here so `build.rs` can include it.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// vpsdash -- subscription dashboard from the terminal
#[derive(Debug, Parser)]
#[command(
    name = "vpsdash",
    version,
    about = "Manage your proxy subscription: account, plans, nodes and checkout",
    long_about = "Command-line client for the vpsdash subscription dashboard.\n\n\
        Talks to a deployed dashboard API, or to the built-in mock backend\n\
        with demo data when no server is configured.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "VPSDASH_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend to talk to (overrides profile)
    #[arg(long, short = 'b', env = "VPSDASH_BACKEND", global = true)]
    pub backend: Option<BackendKind>,

    /// API root for the http backend (overrides profile)
    #[arg(long, short = 'u', env = "VPSDASH_URL", global = true)]
    pub url: Option<String>,

    /// Session token (overrides the stored one)
    #[arg(long, env = "VPSDASH_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Multiplier on simulated mock latency (0 disables it)
    #[arg(long, env = "VPSDASH_LATENCY_SCALE", global = true)]
    pub latency_scale: Option<f64>,

    /// Display currency
    #[arg(long, env = "VPSDASH_CURRENCY", global = true)]
    pub currency: Option<CurrencyArg>,

    /// Output format [default: table]
    #[arg(long, short = 'o', env = "VPSDASH_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "VPSDASH_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Built-in demo data with simulated latency
    Mock,
    /// A deployed dashboard API
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CurrencyArg {
    Cny,
    Usd,
    Eur,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PeriodArg {
    Monthly,
    Quarterly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PaymentArg {
    Alipay,
    Wechat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    Windows,
    Macos,
    Ios,
    Android,
    Linux,
    Openwrt,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login(LoginArgs),

    /// Sign out and forget the stored session token
    Logout,

    /// Create a new account
    Register(RegisterArgs),

    /// Recover a forgotten password
    ResetPassword(ResetPasswordArgs),

    /// Show or edit the signed-in account
    #[command(alias = "me")]
    Account(AccountArgs),

    /// Balance, traffic usage and expiry
    #[command(alias = "ov")]
    Overview,

    /// List active and past subscriptions
    #[command(alias = "subs")]
    Subscriptions(SubscriptionsArgs),

    /// List purchasable plans
    Plans(PlansArgs),

    /// List proxy nodes
    #[command(alias = "n")]
    Nodes(NodesArgs),

    /// Show recent announcements
    #[command(alias = "news")]
    Announcements(AnnouncementsArgs),

    /// Client download links per platform
    Downloads(DownloadsArgs),

    /// Purchase a plan
    #[command(alias = "buy")]
    Checkout(CheckoutArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (defaults to the profile's email)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Password; prompted for when absent
    #[arg(long, env = "VPSDASH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Account email
    #[arg(long, short = 'e')]
    pub email: String,

    /// Invitation code
    #[arg(long, short = 'i')]
    pub invite_code: Option<String>,

    /// Password; prompted for (twice) when absent
    #[arg(long, env = "VPSDASH_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct ResetPasswordArgs {
    #[command(subcommand)]
    pub command: ResetPasswordCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResetPasswordCommand {
    /// Email a verification code
    SendCode {
        /// Account email
        #[arg(long, short = 'e')]
        email: String,
    },

    /// Set a new password using the emailed code
    Confirm {
        /// Account email
        #[arg(long, short = 'e')]
        email: String,

        /// Verification code from the email
        #[arg(long, short = 'c')]
        code: String,

        /// New password; prompted for (twice) when absent
        #[arg(long, env = "VPSDASH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

// ── Account ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// Show the profile
    Show,

    /// Change profile fields
    Update {
        /// New display name
        #[arg(long, short = 'n')]
        name: String,
    },

    /// Change the password; the session ends on success
    ChangePassword {
        /// Current password; prompted for when absent
        #[arg(long, env = "VPSDASH_CURRENT_PASSWORD", hide_env_values = true)]
        current_password: Option<String>,

        /// New password; prompted for (twice) when absent
        #[arg(long, env = "VPSDASH_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

// ── Catalog ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SubscriptionsArgs {
    /// Print one-tap import links for supported clients
    #[arg(long)]
    pub import_links: bool,
}

#[derive(Debug, Args)]
pub struct PlansArgs {
    /// Only show plans billed for this period
    #[arg(long)]
    pub period: Option<PeriodArg>,
}

#[derive(Debug, Args)]
pub struct NodesArgs {
    /// Only show nodes in this region group
    #[arg(long, short = 'g')]
    pub group: Option<String>,

    /// Case-insensitive match on node name or tag
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// List the region groups instead of nodes
    #[arg(long, conflicts_with_all = ["group", "search", "test_latency", "links"])]
    pub groups: bool,

    /// Measure latency afresh before listing
    #[arg(long)]
    pub test_latency: bool,

    /// Print a share link per node instead of the status table
    #[arg(long)]
    pub links: bool,
}

#[derive(Debug, Args)]
pub struct AnnouncementsArgs {
    /// Max announcements to show
    #[arg(long, short = 'l', default_value = "5")]
    pub limit: u32,
}

#[derive(Debug, Args)]
pub struct DownloadsArgs {
    /// Only show this platform
    #[arg(long)]
    pub platform: Option<PlatformArg>,
}

// ── Checkout ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Plan ID (see `vpsdash plans`)
    #[arg(long)]
    pub plan: String,

    /// Account username the plan is bound to
    #[arg(long)]
    pub username: String,

    /// Coupon code
    #[arg(long, short = 'c')]
    pub coupon: Option<String>,

    /// Payment method
    #[arg(long, default_value = "alipay")]
    pub payment: PaymentArg,

    /// Show the quote without placing the order
    #[arg(long)]
    pub dry_run: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create a profile with guided setup
    Init {
        /// Profile name
        #[arg(long)]
        name: Option<String>,

        /// Account email remembered for `login`
        #[arg(long)]
        email: Option<String>,
    },

    /// Display the current configuration
    Show,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Print the config file location
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
