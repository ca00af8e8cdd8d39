// ── Display formatting ──
//
// Pure value-to-string helpers shared by every renderer.

use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::pricing::round2;

const BYTE_UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Pattern used when none is given.
pub const DEFAULT_DATE_PATTERN: &str = "YYYY-MM-DD HH:mm:ss";

/// Display currency.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Currency {
    #[default]
    Cny,
    Usd,
    Eur,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Cny => "¥",
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }
}

/// Human-readable byte count in 1024 steps, trailing zeros dropped.
///
/// `format_bytes(1536, 2)` is `"1.5 KB"`; zero is `"0 B"`.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 B".into();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!(
        "{} {}",
        trim_fraction(&format!("{value:.decimals$}")),
        BYTE_UNITS[unit]
    )
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Insert `,` every three digits of an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `¥1,234.50` style amount, rounded half-up to cents. The sign follows
/// the symbol: `¥-1,000.01`.
pub fn format_currency(amount: Decimal, currency: Currency) -> String {
    let fixed = format!("{:.2}", round2(amount));
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    format!(
        "{}{sign}{}.{frac_part}",
        currency.symbol(),
        group_thousands(int_part)
    )
}

/// Thousands-separated integer.
pub fn format_number(value: i64) -> String {
    let grouped = group_thousands(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `value / total` as a percentage string; `"0%"` when `total` is zero.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn format_percentage(value: u64, total: u64, decimals: usize) -> String {
    if total == 0 {
        return "0%".into();
    }
    let pct = value as f64 / total as f64 * 100.0;
    format!("{pct:.decimals$}%")
}

/// Render `dt` with `YYYY`, `MM`, `DD`, `HH`, `mm`, `ss` tokens.
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> String {
    pattern
        .replace("YYYY", &format!("{:04}", dt.year()))
        .replace("MM", &format!("{:02}", dt.month()))
        .replace("DD", &format!("{:02}", dt.day()))
        .replace("HH", &format!("{:02}", dt.hour()))
        .replace("mm", &format!("{:02}", dt.minute()))
        .replace("ss", &format!("{:02}", dt.second()))
}

// ── Relative time ────────────────────────────────────────────────────

/// Coarse time remaining until a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TimeLeft {
    Expired,
    Days(i64),
    Hours(i64),
    UnderAnHour,
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expired => f.write_str("expired"),
            Self::Days(1) => f.write_str("1 day"),
            Self::Days(n) => write!(f, "{n} days"),
            Self::Hours(1) => f.write_str("1 hour"),
            Self::Hours(n) => write!(f, "{n} hours"),
            Self::UnderAnHour => f.write_str("less than 1 hour"),
        }
    }
}

/// Whole days, else whole hours, until `target`.
pub fn time_from_now<Tz: TimeZone>(target: &DateTime<Tz>, now: &DateTime<Tz>) -> TimeLeft {
    let diff = target.clone().signed_duration_since(now.clone());
    if diff < chrono::Duration::zero() {
        return TimeLeft::Expired;
    }
    let days = diff.num_days();
    if days > 0 {
        return TimeLeft::Days(days);
    }
    let hours = diff.num_hours();
    if hours > 0 {
        TimeLeft::Hours(hours)
    } else {
        TimeLeft::UnderAnHour
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn bytes_scale_and_trim() {
        assert_eq!(format_bytes(0, 2), "0 B");
        assert_eq!(format_bytes(512, 2), "512 B");
        assert_eq!(format_bytes(1024, 2), "1 KB");
        assert_eq!(format_bytes(1536, 2), "1.5 KB");
        assert_eq!(format_bytes(150 * 1024 * 1024 * 1024, 2), "150 GB");
        assert_eq!(format_bytes(97_323_443_487, 2), "90.64 GB");
        assert_eq!(format_bytes(1536, 0), "2 KB");
    }

    #[test]
    fn bytes_cap_at_petabytes() {
        let eb = 1024_u64.pow(6);
        assert_eq!(format_bytes(eb, 2), "1024 PB");
    }

    #[test]
    fn currency_groups_thousands() {
        let d = |s: &str| Decimal::from_str(s).unwrap();
        assert_eq!(format_currency(d("128.5"), Currency::Cny), "¥128.50");
        assert_eq!(format_currency(d("1234567.891"), Currency::Usd), "$1,234,567.89");
        assert_eq!(format_currency(d("0"), Currency::Eur), "€0.00");
        assert_eq!(format_currency(d("-1000.005"), Currency::Cny), "¥-1,000.01");
    }

    #[test]
    fn currency_parses_case_insensitively() {
        assert_eq!(Currency::from_str("USD").unwrap(), Currency::Usd);
        assert_eq!(Currency::Eur.to_string(), "eur");
    }

    #[test]
    fn numbers_group_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(-1_234_567), "-1,234,567");
    }

    #[test]
    fn percentage_handles_zero_total() {
        assert_eq!(format_percentage(5, 0, 1), "0%");
        assert_eq!(format_percentage(1, 3, 1), "33.3%");
        assert_eq!(format_percentage(342, 365, 0), "94%");
    }

    #[test]
    fn date_tokens() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 2).unwrap();
        assert_eq!(format_date(&dt, DEFAULT_DATE_PATTERN), "2026-03-07 09:05:02");
        assert_eq!(format_date(&dt, "DD/MM/YYYY"), "07/03/2026");
    }

    #[test]
    fn relative_time_buckets() {
        let now = Utc::now();
        assert_eq!(time_from_now(&(now - Duration::seconds(1)), &now), TimeLeft::Expired);
        assert_eq!(time_from_now(&(now + Duration::days(23)), &now), TimeLeft::Days(23));
        assert_eq!(
            time_from_now(&(now + Duration::hours(5) + Duration::minutes(3)), &now),
            TimeLeft::Hours(5)
        );
        assert_eq!(
            time_from_now(&(now + Duration::minutes(59)), &now),
            TimeLeft::UnderAnHour
        );
        assert_eq!(TimeLeft::Days(23).to_string(), "23 days");
        assert_eq!(TimeLeft::Hours(1).to_string(), "1 hour");
    }
}
