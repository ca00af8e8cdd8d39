// ── Runtime backend configuration ──
//
// These types describe *which* backend to talk to and how. They never
// touch disk: the CLI builds a `DashboardConfig` from its profile and
// hands it to `Dashboard::from_config`.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::format::Currency;

pub use vpsdash_api::MAX_LATENCY_SCALE;

/// Backend selection.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendConfig {
    /// In-process fixtures. `latency_scale` multiplies the simulated
    /// delays; `0.0` disables them and values above
    /// [`MAX_LATENCY_SCALE`] are refused.
    Mock { latency_scale: f64 },
    /// A deployed dashboard service. `url` is the API root
    /// (e.g. `https://panel.example.com/api`).
    Http { url: Url, timeout: Duration },
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Mock { latency_scale: 1.0 }
    }
}

/// Everything `Dashboard` needs to start.
#[derive(Debug, Clone, Default)]
pub struct DashboardConfig {
    pub backend: BackendConfig,
    pub currency: Currency,
    /// Previously issued token to resume a session without logging in.
    pub session_token: Option<SecretString>,
}
