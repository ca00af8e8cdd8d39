//! Wire types for the dashboard backend.
//!
//! All types match the JSON bodies exchanged with `/api/` endpoints.
//! Field names use camelCase via `#[serde(rename_all = "camelCase")]`.
//! Amounts travel as JSON numbers; `vpsdash-core` converts them to
//! fixed-point decimals before doing any arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Envelope ─────────────────────────────────────────────────────────

/// Standard response envelope.
///
/// ```json
/// { "code": 0, "message": "ok", "data": { ... } }
/// ```
/// `code` of `0` or `200` means success; a body without a `code` is
/// rejected.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        matches!(self.code, Some(0 | 200))
    }
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: u64,
    pub email: String,
    pub name: String,
}

/// From `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

/// Body of `PUT /user/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
}

/// Generic `{ success, message }` acknowledgement used by register and
/// password-reset endpoints. A bare `{ code: 0, message }` envelope decodes
/// as a success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

fn default_true() -> bool {
    true
}

// ── Account ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeResponse {
    pub amount: f64,
    pub date: DateTime<Utc>,
}

/// Traffic counters in bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficResponse {
    pub used: u64,
    pub total: u64,
    #[serde(default)]
    pub reset_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPeriodResponse {
    pub start_date: DateTime<Utc>,
    pub total_days: u32,
    pub days_used: u32,
}

/// From `GET /account/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatsResponse {
    pub balance: f64,
    #[serde(default)]
    pub last_recharge: Option<RechargeResponse>,
    pub traffic: TrafficResponse,
    #[serde(default)]
    pub subscription: Option<SubscriptionPeriodResponse>,
    pub expire_date: DateTime<Utc>,
    pub days_remaining: i64,
}

// ── Subscriptions & plans ────────────────────────────────────────────

/// An owned subscription (from `GET /subscriptions`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: u64,
    pub name: String,
    /// Billing kind, e.g. `monthly`.
    #[serde(rename = "type")]
    pub kind: String,
    /// One of: `active`, `expired`, `cancelled`.
    pub status: String,
    pub expire_date: DateTime<Utc>,
    pub subscribe_url: String,
}

/// A purchasable plan (from `GET /subscriptions/plans`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub id: String,
    pub name: String,
    /// One of: `monthly`, `quarterly`.
    pub period: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    pub traffic: String,
    pub speed: String,
    pub devices: String,
    pub nodes: String,
    #[serde(default)]
    pub popular: bool,
}

// ── Nodes ────────────────────────────────────────────────────────────

/// Proxy node status (from `GET /nodes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResponse {
    pub id: u64,
    pub name: String,
    pub group: String,
    #[serde(default)]
    pub flag: String,
    /// Protocol: `vless`, `vmess`, `trojan`, `shadowsocks`.
    #[serde(rename = "type")]
    pub protocol: String,
    /// Round-trip latency in milliseconds.
    pub latency: u32,
    /// Load percentage, 0-100.
    pub load: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    /// One of: `online`, `offline`, `maintenance`, `warning`.
    pub status: String,
}

// ── Announcements ────────────────────────────────────────────────────

/// From `GET /announcements?limit=N`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementResponse {
    pub id: u64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub link: Option<String>,
    /// One of: `info`, `warning`, `success`.
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

// ── Orders ───────────────────────────────────────────────────────────

/// Body of `POST /subscriptions/purchase`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub plan_id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    /// One of: `alipay`, `wechat`.
    pub payment_method: String,
    pub total_amount: f64,
}

/// Purchase acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub success: bool,
    pub order_id: String,
    pub amount_charged: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_codes() {
        let ok: Envelope = serde_json::from_str(r#"{"code":0,"data":{}}"#).unwrap();
        assert!(ok.is_success());
        let ok200: Envelope = serde_json::from_str(r#"{"code":200}"#).unwrap();
        assert!(ok200.is_success());
        let bare: Envelope = serde_json::from_str(r#"{"token":"t"}"#).unwrap();
        assert!(!bare.is_success());
        let bad: Envelope = serde_json::from_str(r#"{"code":1001,"message":"nope"}"#).unwrap();
        assert!(!bad.is_success());
    }

    #[test]
    fn node_uses_type_field_for_protocol() {
        let node: NodeResponse = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "JP 01",
            "group": "Japan",
            "type": "trojan",
            "latency": 89,
            "load": 42,
            "status": "online"
        }))
        .unwrap();
        assert_eq!(node.protocol, "trojan");
        assert!(node.tags.is_empty());
        assert!(node.flag.is_empty());
    }

    #[test]
    fn order_request_omits_missing_coupon() {
        let req = OrderRequest {
            plan_id: "basic-monthly".into(),
            username: "alice".into(),
            coupon_code: None,
            payment_method: "alipay".into(),
            total_amount: 29.9,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["planId"], "basic-monthly");
        assert!(json.get("couponCode").is_none());
    }
}
