// ── Traffic status classification ──

use serde::{Deserialize, Serialize};
use strum::Display;

/// At or above this percentage the quota is nearly exhausted.
pub const CRITICAL_PERCENT: u64 = 90;
/// At or above this percentage the user is warned.
pub const WARNING_PERCENT: u64 = 80;

pub const CRITICAL_MESSAGE: &str = "Traffic nearly exhausted, please top up";
pub const WARNING_MESSAGE: &str = "Traffic usage has exceeded 80%";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TrafficLevel {
    Normal,
    Warning,
    Critical,
}

/// Derived view of a traffic quota. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficStatus {
    pub level: TrafficLevel,
    pub threshold_crossed: bool,
    pub message: String,
    pub percent: f64,
}

/// Classify `used` bytes against a `total` quota.
///
/// A zero quota reads as 0% used. Threshold comparisons are done in integer
/// space so the 80/90 boundaries are exact.
pub fn classify(used: u64, total: u64) -> TrafficStatus {
    if total == 0 {
        return TrafficStatus {
            level: TrafficLevel::Normal,
            threshold_crossed: false,
            message: String::new(),
            percent: 0.0,
        };
    }

    let scaled = u128::from(used) * 100;
    let total_wide = u128::from(total);
    let at_least = |pct: u64| scaled >= u128::from(pct) * total_wide;

    let (level, message) = if at_least(CRITICAL_PERCENT) {
        (TrafficLevel::Critical, CRITICAL_MESSAGE)
    } else if at_least(WARNING_PERCENT) {
        (TrafficLevel::Warning, WARNING_MESSAGE)
    } else {
        (TrafficLevel::Normal, "")
    };

    TrafficStatus {
        level,
        threshold_crossed: level != TrafficLevel::Normal,
        message: message.to_owned(),
        percent: ratio_percent(used, total),
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn ratio_percent(used: u64, total: u64) -> f64 {
    used as f64 / total as f64 * 100.0
}
