// ── Subscription domain type ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Expired,
    Cancelled,
    Unknown,
}

/// A subscription the account owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: u64,
    pub name: String,
    /// Billing kind as reported by the backend, e.g. `monthly`.
    pub billing: String,
    pub status: SubscriptionStatus,
    pub expire_date: DateTime<Utc>,
    /// Import URL for proxy clients.
    pub subscribe_url: String,
}

/// Proxy clients that accept a one-tap subscription import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum ImportClient {
    Shadowrocket,
    Clash,
    Stash,
}

impl ImportClient {
    fn deep_link_prefix(self) -> &'static str {
        match self {
            Self::Shadowrocket => "shadowrocket://add/sub?url=",
            Self::Clash => "clash://install-config?url=",
            Self::Stash => "stash://install-config?url=",
        }
    }
}

/// A client-specific deep link that imports a subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportLink {
    pub client: ImportClient,
    pub url: String,
}

impl Subscription {
    /// Deep links for every [`ImportClient`], with the subscribe URL
    /// percent-encoded into the `url` query parameter.
    pub fn import_links(&self) -> Vec<ImportLink> {
        let encoded: String =
            url::form_urlencoded::byte_serialize(self.subscribe_url.as_bytes()).collect();
        ImportClient::iter()
            .map(|client| ImportLink {
                client,
                url: format!("{}{encoded}", client.deep_link_prefix()),
            })
            .collect()
    }
}
