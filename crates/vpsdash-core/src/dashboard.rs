// ── Dashboard facade ──
//
// Single entry point consumers use. Holds the backend port behind an
// `Arc<dyn Backend>`, converts wire types into the domain model and keeps
// pricing and validation out of the async path.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info};

use vpsdash_api::types::UpdateProfileRequest;
use vpsdash_api::{Backend, HttpBackend, Latency, MAX_LATENCY_SCALE, MockBackend, TransportConfig};

use crate::checkout::{CheckoutSession, Receipt};
use crate::config::{BackendConfig, DashboardConfig};
use crate::coupon::CouponBook;
use crate::error::CoreError;
use crate::format::Currency;
use crate::model::download::catalog;
use crate::model::{
    AccountOverview, Announcement, BillingPeriod, ClientDownload, Node, Plan, Platform,
    Subscription, User,
};
use crate::nodes::NodeFilter;
use crate::validate::{
    validate_display_name, validate_email, validate_password_change, validate_password_match,
    validate_password_strength, validate_reset_code,
};

/// An authenticated session: the user plus the token to persist.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub token: SecretString,
}

/// Registration form input.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub invite_code: Option<String>,
}

/// Password-reset form input.
#[derive(Debug, Clone)]
pub struct ResetPasswordForm {
    pub email: String,
    pub code: String,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

/// Editable profile fields.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub name: String,
}

/// Change-password form input.
#[derive(Debug, Clone)]
pub struct ChangePasswordForm {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

pub struct Dashboard {
    backend: Arc<dyn Backend>,
    currency: Currency,
    coupons: CouponBook,
}

impl Dashboard {
    pub fn new(backend: Arc<dyn Backend>, currency: Currency) -> Self {
        Self {
            backend,
            currency,
            coupons: CouponBook::standard(),
        }
    }

    /// Build the configured backend and restore any saved session.
    pub fn from_config(config: &DashboardConfig) -> Result<Self, CoreError> {
        let backend: Arc<dyn Backend> = match &config.backend {
            BackendConfig::Mock { latency_scale } => {
                let latency =
                    Latency::scaled(*latency_scale).ok_or_else(|| CoreError::Config {
                        message: format!(
                            "latency scale must be between 0 and {MAX_LATENCY_SCALE}, \
                             got {latency_scale}"
                        ),
                    })?;
                Arc::new(MockBackend::new(latency))
            }
            BackendConfig::Http { url, timeout } => {
                let transport = TransportConfig { timeout: *timeout };
                Arc::new(HttpBackend::new(url.clone(), &transport)?)
            }
        };
        debug!(backend = backend.kind(), "dashboard backend ready");

        if let Some(token) = &config.session_token {
            backend.restore_session(token.clone());
        }

        Ok(Self::new(backend, config.currency))
    }

    pub fn backend_kind(&self) -> &'static str {
        self.backend.kind()
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    // ── Auth ─────────────────────────────────────────────────────────

    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Session, CoreError> {
        let resp = self.backend.login(email.trim(), password).await?;
        info!(user_id = resp.user.id, "logged in");
        Ok(Session {
            user: resp.user.into(),
            token: SecretString::from(resp.token),
        })
    }

    pub async fn logout(&self) -> Result<(), CoreError> {
        self.backend.logout().await?;
        info!("logged out");
        Ok(())
    }

    /// Validate the form locally, then register. Returns the backend's
    /// acknowledgement message.
    pub async fn register(&self, form: &RegisterForm) -> Result<String, CoreError> {
        validate_email(form.email.trim())?;
        validate_password_match(
            form.password.expose_secret(),
            form.confirm_password.expose_secret(),
        )?;
        validate_password_strength(form.password.expose_secret())?;

        let invite = form
            .invite_code
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        let resp = self
            .backend
            .register(form.email.trim(), &form.password, invite)
            .await?;
        acknowledged(resp.success, resp.message)
    }

    pub async fn send_reset_code(&self, email: &str) -> Result<String, CoreError> {
        validate_email(email.trim())?;
        let resp = self.backend.send_reset_code(email.trim()).await?;
        acknowledged(resp.success, resp.message)
    }

    pub async fn reset_password(&self, form: &ResetPasswordForm) -> Result<String, CoreError> {
        validate_email(form.email.trim())?;
        validate_reset_code(&form.code)?;
        validate_password_match(
            form.new_password.expose_secret(),
            form.confirm_password.expose_secret(),
        )?;
        validate_password_strength(form.new_password.expose_secret())?;

        let resp = self
            .backend
            .reset_password(form.email.trim(), form.code.trim(), &form.new_password)
            .await?;
        acknowledged(resp.success, resp.message)
    }

    // ── Account ──────────────────────────────────────────────────────

    pub async fn account(&self) -> Result<User, CoreError> {
        Ok(self.backend.user_info().await?.into())
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, CoreError> {
        validate_display_name(&update.name)?;
        let request = UpdateProfileRequest {
            name: update.name.trim().to_owned(),
        };
        let user: User = self.backend.update_profile(&request).await?.into();
        info!(user_id = user.id, "profile updated");
        Ok(user)
    }

    /// Validate the form locally, then change the password. The backend
    /// ends the session on success.
    pub async fn change_password(&self, form: &ChangePasswordForm) -> Result<String, CoreError> {
        validate_password_change(
            form.current_password.expose_secret(),
            form.new_password.expose_secret(),
            form.confirm_password.expose_secret(),
        )?;

        let resp = self
            .backend
            .change_password(&form.current_password, &form.new_password)
            .await?;
        info!("password changed");
        acknowledged(resp.success, resp.message)
    }

    // ── Data ─────────────────────────────────────────────────────────

    pub async fn overview(&self) -> Result<AccountOverview, CoreError> {
        Ok(self.backend.account_stats().await?.into())
    }

    pub async fn subscriptions(&self) -> Result<Vec<Subscription>, CoreError> {
        let subs = self.backend.subscriptions().await?;
        Ok(subs.into_iter().map(Subscription::from).collect())
    }

    /// Plan catalog, optionally narrowed to one billing period.
    pub async fn plans(&self, period: Option<BillingPeriod>) -> Result<Vec<Plan>, CoreError> {
        let plans = self
            .backend
            .plans()
            .await?
            .into_iter()
            .map(Plan::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(plans
            .into_iter()
            .filter(|p| period.is_none_or(|want| p.period == want))
            .collect())
    }

    pub async fn find_plan(&self, id: &str) -> Result<Plan, CoreError> {
        let id = id.trim();
        self.plans(None)
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::PlanNotFound { id: id.to_owned() })
    }

    pub async fn nodes(&self, filter: &NodeFilter) -> Result<Vec<Node>, CoreError> {
        let nodes = self.backend.nodes().await?;
        Ok(nodes
            .into_iter()
            .map(Node::from)
            .filter(|n| filter.matches(n))
            .collect())
    }

    /// Like [`Dashboard::nodes`], with latencies measured afresh.
    pub async fn measure_latency(&self, filter: &NodeFilter) -> Result<Vec<Node>, CoreError> {
        let nodes = self.backend.measure_latency().await?;
        debug!(count = nodes.len(), "latency test finished");
        Ok(nodes
            .into_iter()
            .map(Node::from)
            .filter(|n| filter.matches(n))
            .collect())
    }

    /// Latest first.
    pub async fn announcements(&self, limit: u32) -> Result<Vec<Announcement>, CoreError> {
        let mut items: Vec<Announcement> = self
            .backend
            .announcements(limit)
            .await?
            .into_iter()
            .map(Announcement::from)
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    pub fn downloads(&self, platform: Option<Platform>) -> Vec<ClientDownload> {
        catalog()
            .into_iter()
            .filter(|d| platform.is_none_or(|p| d.platform == p))
            .collect()
    }

    // ── Checkout ─────────────────────────────────────────────────────

    pub fn new_checkout(&self) -> CheckoutSession {
        CheckoutSession::new(self.coupons.clone())
    }

    /// Submit the session's draft and wait for the backend.
    ///
    /// On a backend error the session is unlocked again; nothing is
    /// retried automatically.
    pub async fn submit(&self, session: &mut CheckoutSession) -> Result<Receipt, CoreError> {
        let request = session.begin_submit()?;
        debug!(plan = %request.plan_id, amount = request.total_amount, "submitting order");

        match self.backend.submit_order(&request).await {
            Ok(confirmation) => session.complete(confirmation).cloned(),
            Err(e) => {
                session.abort_submit()?;
                Err(e.into())
            }
        }
    }
}

fn acknowledged(success: bool, message: String) -> Result<String, CoreError> {
    if success {
        Ok(message)
    } else {
        Err(CoreError::Rejected { message })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::new(Arc::new(MockBackend::instant()), Currency::Cny)
    }

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[tokio::test]
    async fn plans_filter_by_period() {
        let d = dashboard();
        assert_eq!(d.plans(None).await.unwrap().len(), 6);
        let quarterly = d.plans(Some(BillingPeriod::Quarterly)).await.unwrap();
        assert_eq!(quarterly.len(), 3);
        assert!(quarterly.iter().all(|p| p.period == BillingPeriod::Quarterly));
    }

    #[tokio::test]
    async fn unknown_plan_is_not_found() {
        let err = dashboard().find_plan("gold-yearly").await.unwrap_err();
        assert!(matches!(err, CoreError::PlanNotFound { .. }));
    }

    #[tokio::test]
    async fn register_validates_before_calling_backend() {
        let d = dashboard();
        let mut form = RegisterForm {
            email: "new@example.com".into(),
            password: secret("abc12345"),
            confirm_password: secret("abc12346"),
            invite_code: None,
        };
        assert!(matches!(
            d.register(&form).await,
            Err(CoreError::ValidationFailed { .. })
        ));

        form.confirm_password = secret("abc12345");
        assert!(d.register(&form).await.is_ok());
    }

    #[tokio::test]
    async fn overview_converts_amounts() {
        let overview = dashboard().overview().await.unwrap();
        assert_eq!(overview.balance, rust_decimal::Decimal::new(12850, 2));
        assert_eq!(overview.days_remaining, 23);
    }

    #[test]
    fn downloads_filter_by_platform() {
        let d = dashboard();
        assert_eq!(d.downloads(None).len(), 6);
        let ios = d.downloads(Some(Platform::Ios));
        assert_eq!(ios.len(), 1);
        assert!(ios[0].url.contains("apple.com"));
    }

    #[test]
    fn from_config_picks_backend() {
        let mock = Dashboard::from_config(&DashboardConfig::default()).unwrap();
        assert_eq!(mock.backend_kind(), "mock");

        let http = Dashboard::from_config(&DashboardConfig {
            backend: BackendConfig::Http {
                url: "https://panel.example.com/api".parse().unwrap(),
                timeout: std::time::Duration::from_secs(5),
            },
            ..DashboardConfig::default()
        })
        .unwrap();
        assert_eq!(http.backend_kind(), "http");
    }

    #[test]
    fn from_config_refuses_huge_latency_scale() {
        let result = Dashboard::from_config(&DashboardConfig {
            backend: BackendConfig::Mock {
                latency_scale: 1e20,
            },
            ..DashboardConfig::default()
        });
        assert!(matches!(result, Err(CoreError::Config { .. })));
    }

    #[tokio::test]
    async fn profile_update_trims_and_validates() {
        let d = dashboard();
        assert_eq!(d.account().await.unwrap().name, "Demo User");

        let err = d
            .update_profile(&ProfileUpdate { name: "   ".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));

        let user = d
            .update_profile(&ProfileUpdate {
                name: " Demo Admin ".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.name, "Demo Admin");
        assert_eq!(d.account().await.unwrap().name, "Demo Admin");
    }

    #[tokio::test]
    async fn change_password_validates_before_calling_backend() {
        let d = dashboard();
        let mut form = ChangePasswordForm {
            current_password: secret("abc12345"),
            new_password: secret("abc12345"),
            confirm_password: secret("abc12345"),
        };
        assert!(matches!(
            d.change_password(&form).await,
            Err(CoreError::ValidationFailed { .. })
        ));

        form.current_password = secret("wrong");
        assert!(matches!(
            d.change_password(&form).await,
            Err(CoreError::Rejected { ref message }) if message == "current password is incorrect"
        ));

        form.current_password = secret("123456");
        assert_eq!(
            d.change_password(&form).await.unwrap(),
            "password changed, please log in again"
        );
    }

    #[tokio::test]
    async fn measure_latency_applies_filter() {
        let d = dashboard();
        let filter = NodeFilter {
            group: Some("Japan".into()),
            ..NodeFilter::default()
        };
        let nodes = d.measure_latency(&filter).await.unwrap();
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|n| n.group == "Japan"));
        assert!(nodes.iter().all(|n| (30..230).contains(&n.latency_ms)));
    }
}
