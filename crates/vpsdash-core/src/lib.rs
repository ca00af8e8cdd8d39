//! Domain layer between `vpsdash-api` and the CLI.
//!
//! - **[`Dashboard`]**: Facade over the backend port. Converts wire types
//!   into the domain [`model`], runs form validation before any network
//!   call, and drives checkout submission.
//!
//! - **Checkout** ([`checkout`]): [`OrderDraft`] is an immutable value
//!   updated through pure functions; [`CheckoutSession`] holds the current
//!   draft and the submission lock.
//!
//! - **Pricing** ([`pricing`], [`coupon`]): `Decimal` arithmetic with
//!   half-up rounding to cents and a fixed coupon table.
//!
//! - **Presentation helpers** ([`format`], [`traffic`], [`nodes`]): pure
//!   functions the renderers share.

pub mod checkout;
pub mod config;
pub mod convert;
pub mod coupon;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod model;
pub mod nodes;
pub mod pricing;
pub mod traffic;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use checkout::{CheckoutPhase, CheckoutSession, OrderDraft, PaymentMethod, Receipt};
pub use config::{BackendConfig, DashboardConfig};
pub use coupon::{Coupon, CouponBook, CouponError};
pub use dashboard::{
    ChangePasswordForm, Dashboard, ProfileUpdate, RegisterForm, ResetPasswordForm, Session,
};
pub use error::CoreError;
pub use format::{Currency, TimeLeft};
pub use nodes::NodeFilter;
pub use pricing::{DiscountMultiplier, PriceBreakdown, compute_total};
pub use traffic::{TrafficLevel, TrafficStatus, classify};

pub use model::{
    AccountOverview, Announcement, AnnouncementKind, BillingPeriod, ClientDownload, HealthLevel,
    ImportClient, ImportLink, Node, NodeStatus, Plan, Platform, Protocol, Recharge,
    RenewalProgress, Subscription, SubscriptionStatus, Traffic, User,
};
