#![allow(clippy::unwrap_used)]
// End-to-end checkout through `Dashboard` over the mock backend.

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use secrecy::SecretString;

use vpsdash_api::types::{
    AccountStatsResponse, ActionResponse, AnnouncementResponse, LoginResponse, NodeResponse,
    OrderConfirmation, OrderRequest, PlanResponse, SubscriptionResponse, UpdateProfileRequest,
    UserResponse,
};
use vpsdash_api::{Backend, Latency, MockBackend};
use vpsdash_core::{
    CheckoutPhase, CoreError, Currency, Dashboard, PaymentMethod, TrafficLevel,
};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_checkout_with_coupon_completes_after_delay() {
    let dashboard = Dashboard::new(Arc::new(MockBackend::new(Latency::default())), Currency::Cny);

    let plan = dashboard.find_plan("standard-monthly").await.unwrap();
    let mut session = dashboard.new_checkout();
    assert_eq!(session.phase(), CheckoutPhase::Empty);

    session.select_plan(plan).unwrap();
    assert_eq!(session.phase(), CheckoutPhase::PlanSelected);

    let multiplier = session.apply_coupon(" welcome10 ").unwrap();
    assert_eq!(multiplier.value(), dec("0.9"));

    session.set_username("alice").unwrap();
    session.set_payment_method(PaymentMethod::Wechat).unwrap();
    assert_eq!(session.phase(), CheckoutPhase::Submittable);

    let pricing = session.draft().pricing().unwrap();
    assert_eq!(pricing.final_amount, dec("44.91"));
    assert_eq!(pricing.discount_amount, dec("4.99"));

    let start = tokio::time::Instant::now();
    let receipt = dashboard.submit(&mut session).await.unwrap();

    assert!(start.elapsed() >= Duration::from_millis(1500));
    assert_eq!(session.phase(), CheckoutPhase::Completed);
    assert_eq!(receipt.amount_charged, dec("44.91"));
    assert_eq!(receipt.coupon_code.as_deref(), Some("WELCOME10"));
    assert_eq!(receipt.payment_method, PaymentMethod::Wechat);
    assert!(receipt.order_id.starts_with("ORD-"));
    assert_eq!(session.receipt(), Some(&receipt));
}

#[tokio::test]
async fn test_rejected_coupon_leaves_full_price() {
    let dashboard = Dashboard::new(Arc::new(MockBackend::instant()), Currency::Cny);
    let mut session = dashboard.new_checkout();
    session
        .select_plan(dashboard.find_plan("premium-quarterly").await.unwrap())
        .unwrap();

    session.apply_coupon("SPECIAL50").unwrap();
    assert_eq!(session.draft().total(), dec("139.95"));

    let err = session.apply_coupon("SPECIAL5").unwrap_err();
    assert!(matches!(err, CoreError::Coupon(_)));
    assert_eq!(session.draft().total(), dec("279.9"));
    assert_eq!(session.draft().coupon_code(), None);
}

#[tokio::test]
async fn test_submit_without_username_is_validation_error() {
    let dashboard = Dashboard::new(Arc::new(MockBackend::instant()), Currency::Cny);
    let mut session = dashboard.new_checkout();
    session
        .select_plan(dashboard.find_plan("basic-monthly").await.unwrap())
        .unwrap();

    let err = dashboard.submit(&mut session).await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));
    assert_eq!(session.phase(), CheckoutPhase::PlanSelected);
}

#[tokio::test]
async fn test_overview_traffic_is_normal_for_demo_account() {
    let dashboard = Dashboard::new(Arc::new(MockBackend::instant()), Currency::Cny);
    let overview = dashboard.overview().await.unwrap();

    let status = overview.traffic.status();
    assert_eq!(status.level, TrafficLevel::Normal);
    assert!(!status.threshold_crossed);
    assert!(overview.renewal.unwrap().percent() > 90.0);
}

// ── Failure path ────────────────────────────────────────────────────

/// Backend whose order endpoint always fails with a server error.
struct FailingOrders {
    inner: MockBackend,
    attempts: AtomicUsize,
}

#[async_trait]
impl Backend for FailingOrders {
    fn kind(&self) -> &'static str {
        "failing"
    }

    fn restore_session(&self, token: SecretString) {
        self.inner.restore_session(token);
    }

    async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, vpsdash_api::Error> {
        self.inner.login(email, password).await
    }

    async fn logout(&self) -> Result<(), vpsdash_api::Error> {
        self.inner.logout().await
    }

    async fn register(
        &self,
        email: &str,
        password: &SecretString,
        invite_code: Option<&str>,
    ) -> Result<ActionResponse, vpsdash_api::Error> {
        self.inner.register(email, password, invite_code).await
    }

    async fn send_reset_code(&self, email: &str) -> Result<ActionResponse, vpsdash_api::Error> {
        self.inner.send_reset_code(email).await
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &SecretString,
    ) -> Result<ActionResponse, vpsdash_api::Error> {
        self.inner.reset_password(email, code, new_password).await
    }

    async fn user_info(&self) -> Result<UserResponse, vpsdash_api::Error> {
        self.inner.user_info().await
    }

    async fn update_profile(
        &self,
        update: &UpdateProfileRequest,
    ) -> Result<UserResponse, vpsdash_api::Error> {
        self.inner.update_profile(update).await
    }

    async fn change_password(
        &self,
        current_password: &SecretString,
        new_password: &SecretString,
    ) -> Result<ActionResponse, vpsdash_api::Error> {
        self.inner
            .change_password(current_password, new_password)
            .await
    }

    async fn account_stats(&self) -> Result<AccountStatsResponse, vpsdash_api::Error> {
        self.inner.account_stats().await
    }

    async fn subscriptions(&self) -> Result<Vec<SubscriptionResponse>, vpsdash_api::Error> {
        self.inner.subscriptions().await
    }

    async fn plans(&self) -> Result<Vec<PlanResponse>, vpsdash_api::Error> {
        self.inner.plans().await
    }

    async fn nodes(&self) -> Result<Vec<NodeResponse>, vpsdash_api::Error> {
        self.inner.nodes().await
    }

    async fn measure_latency(&self) -> Result<Vec<NodeResponse>, vpsdash_api::Error> {
        self.inner.measure_latency().await
    }

    async fn announcements(
        &self,
        limit: u32,
    ) -> Result<Vec<AnnouncementResponse>, vpsdash_api::Error> {
        self.inner.announcements(limit).await
    }

    async fn submit_order(
        &self,
        _order: &OrderRequest,
    ) -> Result<OrderConfirmation, vpsdash_api::Error> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(vpsdash_api::Error::Server { status: 502 })
    }
}

#[tokio::test]
async fn test_backend_failure_unlocks_session_without_retry() {
    let backend = Arc::new(FailingOrders {
        inner: MockBackend::instant(),
        attempts: AtomicUsize::new(0),
    });
    let dashboard = Dashboard::new(backend.clone(), Currency::Cny);

    let mut session = dashboard.new_checkout();
    session
        .select_plan(dashboard.find_plan("basic-monthly").await.unwrap())
        .unwrap();
    session.set_username("alice").unwrap();

    let err = dashboard.submit(&mut session).await.unwrap_err();

    assert!(matches!(err, CoreError::Api { status: Some(502), .. }));
    assert_eq!(backend.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(session.phase(), CheckoutPhase::Submittable);
    assert!(session.receipt().is_none());
}
