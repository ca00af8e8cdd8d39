// ── Client downloads ──
//
// Static per-platform download links. Not served by the backend.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Platform {
    Windows,
    Macos,
    Ios,
    Android,
    Linux,
    Openwrt,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Macos => "macOS",
            Self::Ios => "iOS",
            Self::Android => "Android",
            Self::Linux => "Linux",
            Self::Openwrt => "OpenWrt",
        }
    }

    pub fn download_url(self) -> &'static str {
        match self {
            Self::Windows => "https://example.com/windows-client.exe",
            Self::Macos => "https://example.com/macos-client.dmg",
            Self::Ios => "https://apps.apple.com/app/shadowrocket/id932747118",
            Self::Android => "https://example.com/android-client.apk",
            Self::Linux => "https://example.com/linux-client.tar.gz",
            Self::Openwrt => "https://example.com/openwrt-client.ipk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientDownload {
    pub platform: Platform,
    pub label: &'static str,
    pub url: &'static str,
}

impl From<Platform> for ClientDownload {
    fn from(platform: Platform) -> Self {
        Self {
            platform,
            label: platform.label(),
            url: platform.download_url(),
        }
    }
}

/// Every platform, in display order.
pub fn catalog() -> Vec<ClientDownload> {
    Platform::iter().map(ClientDownload::from).collect()
}
