// ── Account domain types ──

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::traffic::{TrafficStatus, classify};

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recharge {
    pub amount: Decimal,
    pub date: DateTime<Utc>,
}

/// Traffic quota counters, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Traffic {
    pub used: u64,
    pub total: u64,
    pub reset_date: Option<DateTime<Utc>>,
}

impl Traffic {
    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.used)
    }

    pub fn status(&self) -> TrafficStatus {
        classify(self.used, self.total)
    }
}

/// Position within the current subscription term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenewalProgress {
    pub start_date: DateTime<Utc>,
    pub total_days: u32,
    pub days_used: u32,
}

impl RenewalProgress {
    /// Share of the term already used, 0-100.
    pub fn percent(&self) -> f64 {
        if self.total_days == 0 {
            return 0.0;
        }
        (f64::from(self.days_used) / f64::from(self.total_days) * 100.0).min(100.0)
    }
}

/// Everything the overview screen shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOverview {
    pub balance: Decimal,
    pub last_recharge: Option<Recharge>,
    pub traffic: Traffic,
    pub renewal: Option<RenewalProgress>,
    pub expire_date: DateTime<Utc>,
    pub days_remaining: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traffic::TrafficLevel;

    #[test]
    fn traffic_remaining_saturates() {
        let t = Traffic {
            used: 120,
            total: 100,
            reset_date: None,
        };
        assert_eq!(t.remaining(), 0);
        assert_eq!(t.status().level, TrafficLevel::Critical);
    }

    #[test]
    fn renewal_percent() {
        let p = RenewalProgress {
            start_date: Utc::now(),
            total_days: 365,
            days_used: 342,
        };
        assert!((p.percent() - 93.698_630_137).abs() < 1e-6);

        let empty = RenewalProgress {
            total_days: 0,
            ..p
        };
        assert!(empty.percent().abs() < f64::EPSILON);
    }
}
