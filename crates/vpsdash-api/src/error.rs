use thiserror::Error;

/// Top-level error type for the `vpsdash-api` crate.
///
/// Covers every failure mode of the backend port: credential checks,
/// transport, HTTP status mapping, and the `{ code, message, data }`
/// response envelope. `vpsdash-core` maps these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login refused (empty or wrong credentials).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The backend answered 401 -- the held token is gone or revoked.
    #[error("Session expired -- please log in again")]
    SessionExpired,

    /// The backend answered 403.
    #[error("Access denied")]
    Forbidden,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The HTTP client could not be constructed.
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    // ── Backend responses ───────────────────────────────────────────
    /// The backend answered 404 for the given path.
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    /// The backend answered 5xx.
    #[error("Server error (HTTP {status}) -- please retry later")]
    Server { status: u16 },

    /// The envelope carried a business code other than 0/200, or a
    /// mocked call refused its input.
    #[error("Request rejected: {message}")]
    Rejected { message: String, code: Option<i64> },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if logging in again might resolve this error.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Returns `true` if this is a transient error worth re-triggering.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } | Self::Server { .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::NotFound { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_transient() {
        assert!(Error::Server { status: 502 }.is_transient());
        assert!(Error::Timeout { timeout_secs: 10 }.is_transient());
        assert!(
            !Error::Rejected {
                message: "bad".into(),
                code: Some(1)
            }
            .is_transient()
        );
    }

    #[test]
    fn only_session_expiry_asks_for_login() {
        assert!(Error::SessionExpired.is_auth_expired());
        assert!(!Error::Forbidden.is_auth_expired());
        assert!(Error::NotFound { path: "/x".into() }.is_not_found());
    }
}
