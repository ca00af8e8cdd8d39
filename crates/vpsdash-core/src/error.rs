// ── Core error types ──
//
// User-facing errors from vpsdash-core. Consumers never see HTTP status
// codes or JSON parse failures directly; the `From<vpsdash_api::Error>`
// impl translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

use crate::coupon::CouponError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Backend request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Plan not found: {id}")]
    PlanNotFound { id: String },

    #[error("Resource not found: {path}")]
    NotFound { path: String },

    // ── Checkout errors ──────────────────────────────────────────────
    #[error(transparent)]
    Coupon(#[from] CouponError),

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Checkout cannot {action} while {phase}")]
    InvalidTransition { action: String, phase: String },

    #[error("Request rejected by backend: {message}")]
    Rejected { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<vpsdash_api::Error> for CoreError {
    fn from(err: vpsdash_api::Error) -> Self {
        match err {
            vpsdash_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            vpsdash_api::Error::SessionExpired => CoreError::AuthenticationFailed {
                message: "Session expired -- please log in again".into(),
            },
            vpsdash_api::Error::Forbidden => CoreError::AuthenticationFailed {
                message: "Access denied for this account".into(),
            },
            vpsdash_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            vpsdash_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            vpsdash_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            vpsdash_api::Error::ClientSetup(msg) => CoreError::Internal(msg),
            vpsdash_api::Error::NotFound { path } => CoreError::NotFound { path },
            vpsdash_api::Error::Server { status } => CoreError::Api {
                message: "Server error, please retry later".into(),
                status: Some(status),
            },
            vpsdash_api::Error::Rejected { message, .. } => CoreError::Rejected { message },
            vpsdash_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response format: {message}"),
                status: None,
            },
        }
    }
}
