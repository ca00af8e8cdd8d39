// HTTP backend
//
// Talks to a deployed dashboard service over JSON/HTTPS. Auth flows live in
// `auth.rs`; transport mechanics in `client.rs`; data endpoints below.

mod auth;
mod client;

use async_trait::async_trait;
use secrecy::SecretString;

use crate::backend::Backend;
use crate::error::Error;
use crate::types::{
    AccountStatsResponse, ActionResponse, AnnouncementResponse, LoginResponse, NodeResponse,
    OrderConfirmation, OrderRequest, PlanResponse, SubscriptionResponse, UpdateProfileRequest,
    UserResponse,
};

pub use client::HttpBackend;

impl HttpBackend {
    /// `GET /user/info`
    pub async fn user_info(&self) -> Result<UserResponse, Error> {
        self.get("user/info", &[]).await
    }

    /// `PUT /user/info`
    pub async fn update_profile(
        &self,
        update: &UpdateProfileRequest,
    ) -> Result<UserResponse, Error> {
        self.put("user/info", update).await
    }

    /// `GET /account/stats`
    pub async fn account_stats(&self) -> Result<AccountStatsResponse, Error> {
        self.get("account/stats", &[]).await
    }

    /// `GET /subscriptions`
    pub async fn subscriptions(&self) -> Result<Vec<SubscriptionResponse>, Error> {
        self.get("subscriptions", &[]).await
    }

    /// `GET /subscriptions/plans`
    pub async fn plans(&self) -> Result<Vec<PlanResponse>, Error> {
        self.get("subscriptions/plans", &[]).await
    }

    /// `GET /nodes`
    pub async fn nodes(&self) -> Result<Vec<NodeResponse>, Error> {
        self.get("nodes", &[]).await
    }

    /// `GET /announcements?limit=N`
    pub async fn announcements(&self, limit: u32) -> Result<Vec<AnnouncementResponse>, Error> {
        self.get("announcements", &[("limit", limit.to_string())])
            .await
    }

    /// `POST /subscriptions/purchase`
    pub async fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, Error> {
        self.post("subscriptions/purchase", order).await
    }
}

#[async_trait]
impl Backend for HttpBackend {
    fn kind(&self) -> &'static str {
        "http"
    }

    fn restore_session(&self, token: SecretString) {
        self.session.set(token);
    }

    async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        HttpBackend::login(self, email, password).await
    }

    async fn logout(&self) -> Result<(), Error> {
        HttpBackend::logout(self).await
    }

    async fn register(
        &self,
        email: &str,
        password: &SecretString,
        invite_code: Option<&str>,
    ) -> Result<ActionResponse, Error> {
        HttpBackend::register(self, email, password, invite_code).await
    }

    async fn send_reset_code(&self, email: &str) -> Result<ActionResponse, Error> {
        HttpBackend::send_reset_code(self, email).await
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &SecretString,
    ) -> Result<ActionResponse, Error> {
        HttpBackend::reset_password(self, email, code, new_password).await
    }

    async fn user_info(&self) -> Result<UserResponse, Error> {
        HttpBackend::user_info(self).await
    }

    async fn update_profile(&self, update: &UpdateProfileRequest) -> Result<UserResponse, Error> {
        HttpBackend::update_profile(self, update).await
    }

    async fn change_password(
        &self,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<ActionResponse, Error> {
        HttpBackend::change_password(self, current_password, new_password).await
    }

    async fn account_stats(&self) -> Result<AccountStatsResponse, Error> {
        HttpBackend::account_stats(self).await
    }

    async fn subscriptions(&self) -> Result<Vec<SubscriptionResponse>, Error> {
        HttpBackend::subscriptions(self).await
    }

    async fn plans(&self) -> Result<Vec<PlanResponse>, Error> {
        HttpBackend::plans(self).await
    }

    async fn nodes(&self) -> Result<Vec<NodeResponse>, Error> {
        HttpBackend::nodes(self).await
    }

    /// The service measures latency on every node listing.
    async fn measure_latency(&self) -> Result<Vec<NodeResponse>, Error> {
        HttpBackend::nodes(self).await
    }

    async fn announcements(&self, limit: u32) -> Result<Vec<AnnouncementResponse>, Error> {
        HttpBackend::announcements(self, limit).await
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, Error> {
        HttpBackend::submit_order(self, order).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    #[test]
    fn api_url_joins_without_double_slashes() {
        let backend = HttpBackend::with_client(
            reqwest::Client::new(),
            Url::parse("https://panel.example.com/api/").unwrap(),
            10,
        );
        assert_eq!(
            backend.api_url("/nodes").unwrap().as_str(),
            "https://panel.example.com/api/nodes"
        );
        assert_eq!(
            backend.api_url("account/stats").unwrap().as_str(),
            "https://panel.example.com/api/account/stats"
        );
    }
}
