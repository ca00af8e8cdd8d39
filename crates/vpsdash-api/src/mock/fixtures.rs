// Static fixtures served by the mock backend.
//
// Dates are anchored on the caller-supplied `now` so the demo account
// always shows the same relative picture (23 days left, reset in 7 days).

use chrono::{DateTime, Duration, Utc};

use crate::types::{
    AccountStatsResponse, AnnouncementResponse, NodeResponse, PlanResponse, RechargeResponse,
    SubscriptionPeriodResponse, SubscriptionResponse, TrafficResponse,
};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Demo login that always maps to user id 1.
pub const DEMO_EMAIL: &str = "demo@example.com";

pub(crate) const SUBSCRIPTION_TOTAL_DAYS: u32 = 365;
pub(crate) const DAYS_REMAINING: u32 = 23;

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
fn gib(amount: f64) -> u64 {
    (amount * GIB).round() as u64
}

pub(crate) fn account_stats(now: DateTime<Utc>) -> AccountStatsResponse {
    let days_used = SUBSCRIPTION_TOTAL_DAYS - DAYS_REMAINING;
    AccountStatsResponse {
        balance: 128.50,
        last_recharge: Some(RechargeResponse {
            amount: 100.0,
            date: now - Duration::days(15),
        }),
        traffic: TrafficResponse {
            used: gib(90.64),
            total: gib(150.0),
            reset_date: Some(now + Duration::days(7)),
        },
        subscription: Some(SubscriptionPeriodResponse {
            start_date: now - Duration::days(i64::from(days_used)),
            total_days: SUBSCRIPTION_TOTAL_DAYS,
            days_used,
        }),
        expire_date: now + Duration::days(i64::from(DAYS_REMAINING)),
        days_remaining: i64::from(DAYS_REMAINING),
    }
}

pub(crate) fn subscriptions(now: DateTime<Utc>) -> Vec<SubscriptionResponse> {
    vec![SubscriptionResponse {
        id: 1,
        name: "Lite 50G".into(),
        kind: "monthly".into(),
        status: "active".into(),
        expire_date: now + Duration::days(i64::from(DAYS_REMAINING)),
        subscribe_url: "https://example.com/subscribe/abc123".into(),
    }]
}

pub(crate) fn announcements(now: DateTime<Utc>) -> Vec<AnnouncementResponse> {
    vec![AnnouncementResponse {
        id: 1,
        title: "Welcome to vpsdash".into(),
        content: "Some access addresses were blocked recently. If the service endpoint is \
                  unreachable, check the website for the latest entry address."
            .into(),
        link: Some("https://example.com/status".into()),
        kind: "info".into(),
        created_at: now,
    }]
}

#[allow(clippy::too_many_arguments)]
fn plan(
    id: &str,
    name: &str,
    period: &str,
    price: f64,
    original_price: f64,
    traffic: &str,
    (speed, devices, nodes): (&str, &str, &str),
    popular: bool,
) -> PlanResponse {
    PlanResponse {
        id: id.into(),
        name: name.into(),
        period: period.into(),
        price,
        original_price: Some(original_price),
        traffic: traffic.into(),
        speed: speed.into(),
        devices: devices.into(),
        nodes: nodes.into(),
        popular,
    }
}

/// The six-plan catalog: three tiers, billed monthly or quarterly.
pub(crate) fn plans() -> Vec<PlanResponse> {
    let basic = ("100Mbps", "3 devices", "10+ nodes");
    let standard = ("200Mbps", "5 devices", "20+ nodes");
    let premium = ("500Mbps", "10 devices", "50+ nodes");
    vec![
        plan("basic-monthly", "Basic", "monthly", 29.9, 39.9, "100GB", basic, false),
        plan("standard-monthly", "Standard", "monthly", 49.9, 69.9, "300GB", standard, true),
        plan("premium-monthly", "Premium", "monthly", 99.9, 129.9, "Unlimited", premium, false),
        plan("basic-quarterly", "Basic", "quarterly", 79.9, 119.7, "100GB/mo", basic, false),
        plan("standard-quarterly", "Standard", "quarterly", 139.9, 209.7, "300GB/mo", standard, false),
        plan("premium-quarterly", "Premium", "quarterly", 279.9, 389.7, "Unlimited", premium, false),
    ]
}

#[allow(clippy::too_many_arguments)]
fn node(
    id: u64,
    name: &str,
    (group, flag): (&str, &str),
    protocol: &str,
    latency: u32,
    load: u8,
    tags: &[&str],
    status: &str,
) -> NodeResponse {
    NodeResponse {
        id,
        name: name.into(),
        group: group.into(),
        flag: flag.into(),
        protocol: protocol.into(),
        latency,
        load,
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        status: status.into(),
    }
}

pub(crate) fn nodes() -> Vec<NodeResponse> {
    let hk = ("Hong Kong", "hk");
    let jp = ("Japan", "jp");
    let us = ("United States", "us");
    vec![
        node(1, "HK 01 [High speed]", hk, "vless", 45, 35, &["Streaming", "Low ratio"], "online"),
        node(2, "HK 02 [Native]", hk, "vmess", 52, 68, &["Netflix", "Disney+"], "online"),
        node(3, "JP 01 [Softbank]", jp, "trojan", 89, 42, &["Softbank", "Gaming"], "online"),
        node(4, "JP 02 [IIJ]", jp, "vless", 95, 25, &["IIJ"], "online"),
        node(5, "US 01 [CN2]", us, "shadowsocks", 168, 15, &["CN2 GIA", "4K"], "online"),
        node(6, "US 02 [9929]", us, "vmess", 175, 10, &["Unicom 9929"], "online"),
        node(7, "SG 01", ("Singapore", "sg"), "trojan", 120, 55, &["ChatGPT"], "online"),
        node(8, "KR 01", ("South Korea", "kr"), "vless", 65, 88, &["Oracle"], "warning"),
    ]
}
