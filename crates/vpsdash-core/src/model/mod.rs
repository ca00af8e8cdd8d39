// ── Domain model ──
//
// Canonical dashboard types. Wire responses from `vpsdash-api` are
// converted into these in `crate::convert`; renderers only ever see these.

pub mod account;
pub mod announcement;
pub mod download;
pub mod node;
pub mod plan;
pub mod subscription;

// ── Re-exports ──────────────────────────────────────────────────────

pub use account::{AccountOverview, Recharge, RenewalProgress, Traffic, User};
pub use announcement::{Announcement, AnnouncementKind};
pub use download::{ClientDownload, Platform};
pub use node::{HealthLevel, Node, NodeStatus, Protocol};
pub use plan::{BillingPeriod, Plan};
pub use subscription::{ImportClient, ImportLink, Subscription, SubscriptionStatus};
