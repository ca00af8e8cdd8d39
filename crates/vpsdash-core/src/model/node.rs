// ── Node domain types ──

use serde::{Deserialize, Serialize};
use strum::Display;

/// Latency above this many milliseconds is poor.
pub const LATENCY_ERROR_MS: u32 = 200;
/// Latency above this many milliseconds is degraded.
pub const LATENCY_WARNING_MS: u32 = 100;
/// Load above this percentage is poor.
pub const LOAD_ERROR_PERCENT: u8 = 80;
/// Load above this percentage is degraded.
pub const LOAD_WARNING_PERCENT: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Protocol {
    Vless,
    Vmess,
    Trojan,
    Shadowsocks,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeStatus {
    Online,
    Warning,
    Maintenance,
    Offline,
}

impl NodeStatus {
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Online | Self::Warning)
    }
}

/// Traffic-light grading for latency and load readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HealthLevel {
    Good,
    Warning,
    Error,
}

/// A proxy endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: u64,
    pub name: String,
    /// Region group, e.g. `Hong Kong`.
    pub group: String,
    pub flag: String,
    pub protocol: Protocol,
    pub latency_ms: u32,
    /// Load percentage, 0-100.
    pub load: u8,
    pub tags: Vec<String>,
    pub status: NodeStatus,
}

impl Node {
    pub fn latency_level(&self) -> HealthLevel {
        match self.latency_ms {
            ms if ms > LATENCY_ERROR_MS => HealthLevel::Error,
            ms if ms > LATENCY_WARNING_MS => HealthLevel::Warning,
            _ => HealthLevel::Good,
        }
    }

    pub fn load_level(&self) -> HealthLevel {
        match self.load {
            l if l > LOAD_ERROR_PERCENT => HealthLevel::Error,
            l if l > LOAD_WARNING_PERCENT => HealthLevel::Warning,
            _ => HealthLevel::Good,
        }
    }

    /// Copyable `protocol://id@group:443` link for manual client setup.
    pub fn share_link(&self) -> String {
        format!("{}://{}@{}:443", self.protocol, self.id, self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(latency_ms: u32, load: u8) -> Node {
        Node {
            id: 1,
            name: "HK 01".into(),
            group: "Hong Kong".into(),
            flag: String::new(),
            protocol: Protocol::Vless,
            latency_ms,
            load,
            tags: vec![],
            status: NodeStatus::Online,
        }
    }

    #[test]
    fn latency_thresholds_are_exclusive() {
        assert_eq!(node(100, 0).latency_level(), HealthLevel::Good);
        assert_eq!(node(101, 0).latency_level(), HealthLevel::Warning);
        assert_eq!(node(200, 0).latency_level(), HealthLevel::Warning);
        assert_eq!(node(201, 0).latency_level(), HealthLevel::Error);
    }

    #[test]
    fn load_thresholds_are_exclusive() {
        assert_eq!(node(0, 50).load_level(), HealthLevel::Good);
        assert_eq!(node(0, 51).load_level(), HealthLevel::Warning);
        assert_eq!(node(0, 81).load_level(), HealthLevel::Error);
    }

    #[test]
    fn share_link_names_protocol_node_and_group() {
        assert_eq!(node(45, 35).share_link(), "vless://1@Hong Kong:443");

        let trojan = Node {
            id: 7,
            group: "Singapore".into(),
            protocol: Protocol::Trojan,
            ..node(120, 55)
        };
        assert_eq!(trojan.share_link(), "trojan://7@Singapore:443");
    }
}
