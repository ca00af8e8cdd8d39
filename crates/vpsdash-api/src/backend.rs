// Backend port
//
// Every call the dashboard makes against the account service goes through
// this trait. `MockBackend` answers from static fixtures after a simulated
// delay; `HttpBackend` talks to a real deployment. Pricing and validation
// never touch it, so they stay synchronous and testable on their own.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::Error;
use crate::types::{
    AccountStatsResponse, ActionResponse, AnnouncementResponse, LoginResponse, NodeResponse,
    OrderConfirmation, OrderRequest, PlanResponse, SubscriptionResponse, UpdateProfileRequest,
    UserResponse,
};

/// Async interface to the account service.
///
/// One in-flight call per user action; implementations hold at most a
/// session token as mutable state.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short identifier for logs (`"mock"`, `"http"`).
    fn kind(&self) -> &'static str;

    /// Install a previously issued session token (e.g. read back from the
    /// keyring) without logging in again.
    fn restore_session(&self, token: SecretString);

    /// Authenticate and hold the issued token for subsequent calls.
    async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error>;

    /// Drop the held session.
    async fn logout(&self) -> Result<(), Error>;

    async fn register(
        &self,
        email: &str,
        password: &SecretString,
        invite_code: Option<&str>,
    ) -> Result<ActionResponse, Error>;

    /// Ask the service to mail a password-reset code.
    async fn send_reset_code(&self, email: &str) -> Result<ActionResponse, Error>;

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &SecretString,
    ) -> Result<ActionResponse, Error>;

    /// Profile of the signed-in user.
    async fn user_info(&self) -> Result<UserResponse, Error>;

    /// Change the editable profile fields; returns the updated profile.
    async fn update_profile(&self, update: &UpdateProfileRequest) -> Result<UserResponse, Error>;

    async fn change_password(
        &self,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<ActionResponse, Error>;

    async fn account_stats(&self) -> Result<AccountStatsResponse, Error>;

    async fn subscriptions(&self) -> Result<Vec<SubscriptionResponse>, Error>;

    async fn plans(&self) -> Result<Vec<PlanResponse>, Error>;

    async fn nodes(&self) -> Result<Vec<NodeResponse>, Error>;

    /// Node list with freshly measured latencies.
    async fn measure_latency(&self) -> Result<Vec<NodeResponse>, Error>;

    async fn announcements(&self, limit: u32) -> Result<Vec<AnnouncementResponse>, Error>;

    /// Place an order. The mock resolves after a delay with a fixed
    /// success shape; no retry or idempotency key is involved.
    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, Error>;
}
