// reqwest client construction for the HTTP backend.
//
// The request timeout is the only knob; every request carries the
// `vpsdash/<version>` user agent.

use std::time::Duration;

use crate::error::Error;

/// The dashboard's 10 s request budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub const USER_AGENT: &str = concat!("vpsdash/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl TransportConfig {
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::ClientSetup(e.to_string()))
    }

    /// Whole seconds, as reported in timeout errors.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_ten_second_budget() {
        let transport = TransportConfig::default();
        assert_eq!(transport.timeout_secs(), 10);
        assert!(transport.build_client().is_ok());
    }

    #[test]
    fn sub_second_timeout_reports_zero() {
        let transport = TransportConfig {
            timeout: Duration::from_millis(200),
        };
        assert_eq!(transport.timeout_secs(), 0);
    }
}
