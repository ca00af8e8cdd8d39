// ── Plan domain type ──

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BillingPeriod {
    Monthly,
    Quarterly,
}

/// A purchasable subscription tier. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub period: BillingPeriod,
    pub price: Decimal,
    /// List price before the standing promotion; equals `price` when none.
    pub original_price: Decimal,
    pub traffic_quota: String,
    pub speed_limit: String,
    pub device_limit: String,
    pub node_count: String,
    pub popular: bool,
}

impl Plan {
    /// Standing saving against the list price, never negative.
    pub fn savings(&self) -> Decimal {
        (self.original_price - self.price).max(Decimal::ZERO)
    }
}
