// ── API-to-domain type conversions ──
//
// Bridges raw `vpsdash_api::types` responses into canonical
// `vpsdash_core::model` types. Amounts become `Decimal`, free-form status
// strings become enums, and missing optional data gets sensible defaults.

use std::str::FromStr;

use vpsdash_api::types::{
    AccountStatsResponse, AnnouncementResponse, NodeResponse, PlanResponse, SubscriptionResponse,
    UserResponse,
};

use crate::error::CoreError;
use crate::model::{
    AccountOverview, Announcement, AnnouncementKind, BillingPeriod, Node, NodeStatus, Plan,
    Protocol, Recharge, RenewalProgress, Subscription, SubscriptionStatus, Traffic, User,
};
use crate::pricing::to_decimal;

impl From<UserResponse> for User {
    fn from(u: UserResponse) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
        }
    }
}

impl From<AccountStatsResponse> for AccountOverview {
    fn from(s: AccountStatsResponse) -> Self {
        Self {
            balance: to_decimal(s.balance),
            last_recharge: s.last_recharge.map(|r| Recharge {
                amount: to_decimal(r.amount),
                date: r.date,
            }),
            traffic: Traffic {
                used: s.traffic.used,
                total: s.traffic.total,
                reset_date: s.traffic.reset_date,
            },
            renewal: s.subscription.map(|p| RenewalProgress {
                start_date: p.start_date,
                total_days: p.total_days,
                days_used: p.days_used,
            }),
            expire_date: s.expire_date,
            days_remaining: s.days_remaining,
        }
    }
}

impl TryFrom<PlanResponse> for Plan {
    type Error = CoreError;

    fn try_from(p: PlanResponse) -> Result<Self, Self::Error> {
        let period = BillingPeriod::from_str(p.period.trim()).map_err(|_| CoreError::Api {
            message: format!("plan {} has unknown billing period {:?}", p.id, p.period),
            status: None,
        })?;
        let price = to_decimal(p.price);
        Ok(Self {
            id: p.id,
            name: p.name,
            period,
            price,
            original_price: p.original_price.map_or(price, to_decimal),
            traffic_quota: p.traffic,
            speed_limit: p.speed,
            device_limit: p.devices,
            node_count: p.nodes,
            popular: p.popular,
        })
    }
}

fn subscription_status(raw: &str) -> SubscriptionStatus {
    match raw.to_ascii_lowercase().as_str() {
        "active" => SubscriptionStatus::Active,
        "expired" => SubscriptionStatus::Expired,
        "cancelled" | "canceled" => SubscriptionStatus::Cancelled,
        _ => SubscriptionStatus::Unknown,
    }
}

impl From<SubscriptionResponse> for Subscription {
    fn from(s: SubscriptionResponse) -> Self {
        Self {
            id: s.id,
            name: s.name,
            billing: s.kind,
            status: subscription_status(&s.status),
            expire_date: s.expire_date,
            subscribe_url: s.subscribe_url,
        }
    }
}

fn protocol(raw: &str) -> Protocol {
    match raw.to_ascii_lowercase().as_str() {
        "vless" => Protocol::Vless,
        "vmess" => Protocol::Vmess,
        "trojan" => Protocol::Trojan,
        "shadowsocks" | "ss" => Protocol::Shadowsocks,
        _ => Protocol::Other,
    }
}

fn node_status(raw: &str) -> NodeStatus {
    match raw.to_ascii_lowercase().as_str() {
        "online" => NodeStatus::Online,
        "warning" => NodeStatus::Warning,
        "maintenance" => NodeStatus::Maintenance,
        _ => NodeStatus::Offline,
    }
}

impl From<NodeResponse> for Node {
    fn from(n: NodeResponse) -> Self {
        Self {
            id: n.id,
            name: n.name,
            group: n.group,
            flag: n.flag,
            protocol: protocol(&n.protocol),
            latency_ms: n.latency,
            load: n.load.min(100),
            tags: n.tags,
            status: node_status(&n.status),
        }
    }
}

fn announcement_kind(raw: &str) -> AnnouncementKind {
    match raw.to_ascii_lowercase().as_str() {
        "warning" => AnnouncementKind::Warning,
        "success" => AnnouncementKind::Success,
        _ => AnnouncementKind::Info,
    }
}

impl From<AnnouncementResponse> for Announcement {
    fn from(a: AnnouncementResponse) -> Self {
        Self {
            id: a.id,
            title: a.title,
            content: a.content,
            link: a.link.filter(|l| !l.trim().is_empty()),
            kind: announcement_kind(&a.kind),
            created_at: a.created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn plan_response(period: &str, original: Option<f64>) -> PlanResponse {
        PlanResponse {
            id: "standard-monthly".into(),
            name: "Standard".into(),
            period: period.into(),
            price: 49.9,
            original_price: original,
            traffic: "300GB".into(),
            speed: "200Mbps".into(),
            devices: "5 devices".into(),
            nodes: "20+ nodes".into(),
            popular: true,
        }
    }

    #[test]
    fn plan_amounts_become_decimals() {
        let plan = Plan::try_from(plan_response("monthly", Some(69.9))).unwrap();
        assert_eq!(plan.price, Decimal::new(4990, 2));
        assert_eq!(plan.original_price, Decimal::new(6990, 2));
        assert_eq!(plan.period, BillingPeriod::Monthly);
    }

    #[test]
    fn missing_original_price_falls_back_to_price() {
        let plan = Plan::try_from(plan_response("Quarterly", None)).unwrap();
        assert_eq!(plan.original_price, plan.price);
        assert_eq!(plan.savings(), Decimal::ZERO);
    }

    #[test]
    fn unknown_period_is_an_error() {
        assert!(matches!(
            Plan::try_from(plan_response("weekly", None)),
            Err(CoreError::Api { .. })
        ));
    }

    #[test]
    fn node_strings_map_to_enums() {
        let node = Node::from(NodeResponse {
            id: 5,
            name: "KR 01".into(),
            group: "Korea".into(),
            flag: String::new(),
            protocol: "SS".into(),
            latency: 60,
            load: 130,
            tags: vec![],
            status: "maintenance".into(),
        });
        assert_eq!(node.protocol, Protocol::Shadowsocks);
        assert_eq!(node.status, NodeStatus::Maintenance);
        assert_eq!(node.load, 100);
    }
}
