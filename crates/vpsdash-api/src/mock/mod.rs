// Mock backend
//
// Answers every call from static fixtures after an artificial delay that
// stands in for network latency. Used for demos, the default CLI profile,
// and as the test double for the core crate.

mod fixtures;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::auth::SessionSlot;
use crate::backend::Backend;
use crate::error::Error;
use crate::types::{
    AccountStatsResponse, ActionResponse, AnnouncementResponse, LoginResponse, NodeResponse,
    OrderConfirmation, OrderRequest, PlanResponse, SubscriptionResponse, UpdateProfileRequest,
    UserResponse,
};

pub use fixtures::DEMO_EMAIL;

/// Largest accepted multiplier for [`Latency::scaled`].
pub const MAX_LATENCY_SCALE: f64 = 100.0;

/// Simulated per-call latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub login: Duration,
    pub register: Duration,
    pub send_reset_code: Duration,
    pub reset_password: Duration,
    pub load_data: Duration,
    pub nodes: Duration,
    /// Re-measuring node latency.
    pub latency_test: Duration,
    /// Profile and password changes.
    pub update_account: Duration,
    pub submit_order: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(800),
            register: Duration::from_millis(1000),
            send_reset_code: Duration::from_millis(1000),
            reset_password: Duration::from_millis(1500),
            load_data: Duration::from_millis(300),
            nodes: Duration::from_millis(500),
            latency_test: Duration::from_millis(1500),
            update_account: Duration::from_millis(1000),
            submit_order: Duration::from_millis(1500),
        }
    }
}

impl Latency {
    /// No artificial delay at all.
    pub fn none() -> Self {
        Self {
            login: Duration::ZERO,
            register: Duration::ZERO,
            send_reset_code: Duration::ZERO,
            reset_password: Duration::ZERO,
            load_data: Duration::ZERO,
            nodes: Duration::ZERO,
            latency_test: Duration::ZERO,
            update_account: Duration::ZERO,
            submit_order: Duration::ZERO,
        }
    }

    /// Default latencies multiplied by `factor`.
    ///
    /// `None` unless `factor` lies in `0.0..=MAX_LATENCY_SCALE`.
    pub fn scaled(factor: f64) -> Option<Self> {
        if !(0.0..=MAX_LATENCY_SCALE).contains(&factor) {
            return None;
        }
        let scale = |base: Duration| Duration::try_from_secs_f64(base.as_secs_f64() * factor).ok();
        let d = Self::default();
        Some(Self {
            login: scale(d.login)?,
            register: scale(d.register)?,
            send_reset_code: scale(d.send_reset_code)?,
            reset_password: scale(d.reset_password)?,
            load_data: scale(d.load_data)?,
            nodes: scale(d.nodes)?,
            latency_test: scale(d.latency_test)?,
            update_account: scale(d.update_account)?,
            submit_order: scale(d.submit_order)?,
        })
    }
}

/// Range of re-measured node latencies, in milliseconds.
const MEASURED_LATENCY_MS: std::ops::Range<u32> = 30..230;

/// Current password the mock refuses in `change_password`.
const WRONG_PASSWORD: &str = "wrong";

/// In-process stand-in for the account service.
#[derive(Debug)]
pub struct MockBackend {
    latency: Latency,
    session: SessionSlot,
    user: RwLock<UserResponse>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

fn demo_user() -> UserResponse {
    UserResponse {
        id: 1,
        email: DEMO_EMAIL.to_owned(),
        name: "Demo User".into(),
    }
}

impl MockBackend {
    pub fn new(latency: Latency) -> Self {
        Self {
            latency,
            session: SessionSlot::new(),
            user: RwLock::new(demo_user()),
        }
    }

    /// Mock with no artificial delay.
    pub fn instant() -> Self {
        Self::new(Latency::none())
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Whether a session token is currently held.
    pub fn has_session(&self) -> bool {
        self.session.is_active()
    }

    fn current_user(&self) -> UserResponse {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_user(&self, user: UserResponse) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = user;
    }

    async fn delay(&self, d: Duration) {
        if !d.is_zero() {
            tokio::time::sleep(d).await;
        }
    }
}

/// Stable pseudo user id derived from the email address.
fn user_id_for(email: &str) -> u64 {
    if email == DEMO_EMAIL {
        return 1;
    }
    let hash = email
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    hash % 1000
}

#[async_trait]
impl Backend for MockBackend {
    fn kind(&self) -> &'static str {
        "mock"
    }

    fn restore_session(&self, token: SecretString) {
        self.session.set(token);
    }

    async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        debug!(email, "mock login");
        self.delay(self.latency.login).await;

        if email.trim().is_empty() || password.expose_secret().is_empty() {
            return Err(Error::Authentication {
                message: "incorrect email or password".into(),
            });
        }

        let token = format!("mock_jwt_token_{}", Utc::now().timestamp_millis());
        self.session.set(SecretString::from(token.clone()));

        let user = if email == DEMO_EMAIL {
            demo_user()
        } else {
            UserResponse {
                id: user_id_for(email),
                email: email.to_owned(),
                name: email.split('@').next().unwrap_or(email).to_owned(),
            }
        };
        self.set_user(user.clone());
        Ok(LoginResponse { token, user })
    }

    async fn logout(&self) -> Result<(), Error> {
        debug!("mock logout");
        self.session.clear();
        Ok(())
    }

    async fn register(
        &self,
        email: &str,
        password: &SecretString,
        invite_code: Option<&str>,
    ) -> Result<ActionResponse, Error> {
        debug!(email, ?invite_code, "mock register");
        self.delay(self.latency.register).await;

        if email.trim().is_empty() || password.expose_secret().is_empty() {
            return Err(Error::Rejected {
                message: "email and password are required".into(),
                code: None,
            });
        }

        Ok(ActionResponse {
            success: true,
            message: "registration successful".into(),
        })
    }

    async fn send_reset_code(&self, email: &str) -> Result<ActionResponse, Error> {
        debug!(email, "mock send reset code");
        self.delay(self.latency.send_reset_code).await;
        Ok(ActionResponse {
            success: true,
            message: "verification code sent".into(),
        })
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        _new_password: &SecretString,
    ) -> Result<ActionResponse, Error> {
        debug!(email, "mock reset password");
        self.delay(self.latency.reset_password).await;

        if code.trim().is_empty() {
            return Err(Error::Rejected {
                message: "please enter the verification code".into(),
                code: None,
            });
        }

        Ok(ActionResponse {
            success: true,
            message: "password reset successful".into(),
        })
    }

    async fn user_info(&self) -> Result<UserResponse, Error> {
        self.delay(self.latency.load_data).await;
        Ok(self.current_user())
    }

    async fn update_profile(&self, update: &UpdateProfileRequest) -> Result<UserResponse, Error> {
        debug!(name = %update.name, "mock update profile");
        self.delay(self.latency.update_account).await;

        let name = update.name.trim();
        if name.is_empty() {
            return Err(Error::Rejected {
                message: "display name cannot be empty".into(),
                code: None,
            });
        }

        let mut user = self.current_user();
        name.clone_into(&mut user.name);
        self.set_user(user.clone());
        Ok(user)
    }

    async fn change_password(
        &self,
        current_password: &SecretString,
        _new_password: &SecretString,
    ) -> Result<ActionResponse, Error> {
        debug!("mock change password");
        self.delay(self.latency.update_account).await;

        if current_password.expose_secret() == WRONG_PASSWORD {
            return Err(Error::Rejected {
                message: "current password is incorrect".into(),
                code: None,
            });
        }

        Ok(ActionResponse {
            success: true,
            message: "password changed, please log in again".into(),
        })
    }

    async fn account_stats(&self) -> Result<AccountStatsResponse, Error> {
        self.delay(self.latency.load_data).await;
        Ok(fixtures::account_stats(Utc::now()))
    }

    async fn subscriptions(&self) -> Result<Vec<SubscriptionResponse>, Error> {
        self.delay(self.latency.load_data).await;
        Ok(fixtures::subscriptions(Utc::now()))
    }

    async fn plans(&self) -> Result<Vec<PlanResponse>, Error> {
        self.delay(self.latency.load_data).await;
        Ok(fixtures::plans())
    }

    async fn nodes(&self) -> Result<Vec<NodeResponse>, Error> {
        self.delay(self.latency.nodes).await;
        Ok(fixtures::nodes())
    }

    async fn measure_latency(&self) -> Result<Vec<NodeResponse>, Error> {
        debug!("mock latency test");
        self.delay(self.latency.latency_test).await;
        let mut rng = rand::thread_rng();
        Ok(fixtures::nodes()
            .into_iter()
            .map(|mut node| {
                node.latency = rng.gen_range(MEASURED_LATENCY_MS);
                node
            })
            .collect())
    }

    async fn announcements(&self, limit: u32) -> Result<Vec<AnnouncementResponse>, Error> {
        self.delay(self.latency.load_data).await;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(fixtures::announcements(Utc::now())
            .into_iter()
            .take(limit)
            .collect())
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderConfirmation, Error> {
        debug!(plan = %order.plan_id, amount = order.total_amount, "mock submit order");
        self.delay(self.latency.submit_order).await;

        if order.username.trim().is_empty() {
            return Err(Error::Rejected {
                message: "username is required".into(),
                code: None,
            });
        }

        let id = uuid::Uuid::new_v4().simple().to_string();
        Ok(OrderConfirmation {
            success: true,
            order_id: format!("ORD-{}", id[..12].to_uppercase()),
            amount_charged: order.total_amount,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[tokio::test(start_paused = true)]
    async fn login_waits_for_simulated_latency() {
        let backend = MockBackend::new(Latency::default());
        let start = tokio::time::Instant::now();

        let resp = backend.login(DEMO_EMAIL, &secret("123456")).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(800));
        assert_eq!(resp.user.id, 1);
        assert_eq!(resp.user.name, "Demo User");
        assert!(resp.token.starts_with("mock_jwt_token_"));
        assert!(backend.has_session());
    }

    #[tokio::test]
    async fn login_rejects_empty_credentials() {
        let backend = MockBackend::instant();
        let err = backend.login("", &secret("pw")).await.unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
        let err = backend.login("a@b.c", &secret("")).await.unwrap_err();
        assert!(matches!(err, Error::Authentication { .. }));
        assert!(!backend.has_session());
    }

    #[tokio::test]
    async fn login_derives_name_from_email() {
        let backend = MockBackend::instant();
        let resp = backend.login("alice@example.com", &secret("pw")).await.unwrap();
        assert_eq!(resp.user.name, "alice");
        assert!(resp.user.id < 1000);

        backend.logout().await.unwrap();
        assert!(!backend.has_session());
    }

    #[tokio::test]
    async fn reset_password_requires_code() {
        let backend = MockBackend::instant();
        let err = backend
            .reset_password("a@b.c", "  ", &secret("abc12345"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rejected { .. }));

        let ok = backend
            .reset_password("a@b.c", "123456", &secret("abc12345"))
            .await
            .unwrap();
        assert!(ok.success);
    }

    #[tokio::test(start_paused = true)]
    async fn submit_order_echoes_amount_after_delay() {
        let backend = MockBackend::new(Latency::default());
        let start = tokio::time::Instant::now();
        let order = OrderRequest {
            plan_id: "basic-monthly".into(),
            username: "alice".into(),
            coupon_code: Some("VIP20".into()),
            payment_method: "wechat".into(),
            total_amount: 23.92,
        };

        let confirmation = backend.submit_order(&order).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert!(confirmation.success);
        assert!(confirmation.order_id.starts_with("ORD-"));
        assert_eq!(confirmation.order_id.len(), 16);
        assert!((confirmation.amount_charged - 23.92).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn fixtures_match_catalog() {
        let backend = MockBackend::instant();
        let plans = backend.plans().await.unwrap();
        assert_eq!(plans.len(), 6);
        assert_eq!(plans.iter().filter(|p| p.popular).count(), 1);

        let nodes = backend.nodes().await.unwrap();
        assert_eq!(nodes.len(), 8);

        let stats = backend.account_stats().await.unwrap();
        assert_eq!(stats.days_remaining, 23);
        assert_eq!(stats.traffic.total, 150 * 1024 * 1024 * 1024);

        assert!(backend.announcements(0).await.unwrap().is_empty());
        assert_eq!(backend.announcements(5).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn user_info_follows_login_and_profile_updates() {
        let backend = MockBackend::instant();
        assert_eq!(backend.user_info().await.unwrap().name, "Demo User");

        backend.login("alice@example.com", &secret("pw")).await.unwrap();
        let user = backend
            .update_profile(&UpdateProfileRequest {
                name: "  Alice  ".into(),
            })
            .await
            .unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(backend.user_info().await.unwrap(), user);
    }

    #[tokio::test]
    async fn update_profile_rejects_blank_name() {
        let backend = MockBackend::instant();
        let err = backend
            .update_profile(&UpdateProfileRequest { name: " ".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rejected { .. }));
        assert_eq!(backend.user_info().await.unwrap().name, "Demo User");
    }

    #[tokio::test(start_paused = true)]
    async fn change_password_checks_current_password() {
        let backend = MockBackend::new(Latency::default());
        let start = tokio::time::Instant::now();

        let ok = backend
            .change_password(&secret("123456"), &secret("abc12345"))
            .await
            .unwrap();
        assert!(ok.success);
        assert!(start.elapsed() >= Duration::from_millis(1000));

        let err = backend
            .change_password(&secret(WRONG_PASSWORD), &secret("abc12345"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, Error::Rejected { ref message, .. } if message == "current password is incorrect")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn measure_latency_remeasures_every_node() {
        let backend = MockBackend::new(Latency::default());
        let start = tokio::time::Instant::now();

        let nodes = backend.measure_latency().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(nodes.len(), fixtures::nodes().len());
        assert!(nodes.iter().all(|n| MEASURED_LATENCY_MS.contains(&n.latency)));
    }

    #[test]
    fn scaled_latency() {
        let half = Latency::scaled(0.5).unwrap();
        assert_eq!(half.login, Duration::from_millis(400));
        assert_eq!(Latency::scaled(0.0), Some(Latency::none()));
    }

    #[test]
    fn scaled_latency_rejects_out_of_range_factors() {
        assert_eq!(Latency::scaled(-1.0), None);
        assert_eq!(Latency::scaled(f64::NAN), None);
        assert_eq!(Latency::scaled(1e20), None);
        assert!(Latency::scaled(MAX_LATENCY_SCALE).is_some());
    }
}
