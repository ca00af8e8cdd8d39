// ── Checkout flow ──
//
// `OrderDraft` is an immutable value: every edit returns a new draft and
// nothing derived (totals, submittability) is ever stored on it.
// `CheckoutSession` holds the current draft plus the submission lock and
// walks Empty -> PlanSelected -> Submittable -> Submitting -> Completed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{info, warn};

use vpsdash_api::types::{OrderConfirmation, OrderRequest};

use crate::coupon::{CouponBook, CouponError, normalize};
use crate::error::CoreError;
use crate::model::Plan;
use crate::pricing::{DiscountMultiplier, PriceBreakdown, compute_total, to_decimal, to_f64};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PaymentMethod {
    #[default]
    Alipay,
    Wechat,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            Self::Alipay => "Alipay",
            Self::Wechat => "WeChat Pay",
        }
    }
}

// ── OrderDraft ───────────────────────────────────────────────────────

/// In-progress, unsaved checkout state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OrderDraft {
    plan: Option<Plan>,
    username: String,
    coupon_code: Option<String>,
    multiplier: DiscountMultiplier,
    payment_method: PaymentMethod,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    pub fn multiplier(&self) -> DiscountMultiplier {
        self.multiplier
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    #[must_use]
    pub fn with_plan(self, plan: Plan) -> Self {
        Self {
            plan: Some(plan),
            ..self
        }
    }

    #[must_use]
    pub fn with_username(self, username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_payment_method(self, payment_method: PaymentMethod) -> Self {
        Self {
            payment_method,
            ..self
        }
    }

    /// Resolve `code` against `book`.
    ///
    /// On success the code and multiplier are recorded. On failure the
    /// returned draft is back at full price with no coupon, so a stale
    /// discount from an earlier code never survives.
    pub fn apply_coupon(
        self,
        book: &CouponBook,
        code: &str,
    ) -> (Self, Result<DiscountMultiplier, CouponError>) {
        match book.resolve(code) {
            Ok(multiplier) => (
                Self {
                    coupon_code: Some(normalize(code)),
                    multiplier,
                    ..self
                },
                Ok(multiplier),
            ),
            Err(e) => (self.without_coupon(), Err(e)),
        }
    }

    #[must_use]
    pub fn without_coupon(self) -> Self {
        Self {
            coupon_code: None,
            multiplier: DiscountMultiplier::FULL_PRICE,
            ..self
        }
    }

    /// Plan chosen and a non-blank username entered.
    pub fn can_submit(&self) -> bool {
        self.plan.is_some() && !self.username.trim().is_empty()
    }

    /// Totals for the selected plan under the current multiplier.
    pub fn pricing(&self) -> Option<PriceBreakdown> {
        self.plan
            .as_ref()
            .map(|p| compute_total(p.price, self.multiplier))
    }

    /// Amount payable; zero with no plan selected.
    pub fn total(&self) -> Decimal {
        self.pricing().map_or(Decimal::ZERO, |b| b.final_amount)
    }

    /// Wire request for this draft, if it is submittable.
    pub fn to_request(&self) -> Result<OrderRequest, CoreError> {
        let Some(plan) = self.plan.as_ref() else {
            return Err(CoreError::ValidationFailed {
                message: "please select a plan".into(),
            });
        };
        if self.username.trim().is_empty() {
            return Err(CoreError::ValidationFailed {
                message: "please enter a username".into(),
            });
        }
        Ok(OrderRequest {
            plan_id: plan.id.clone(),
            username: self.username.trim().to_owned(),
            coupon_code: self.coupon_code.clone(),
            payment_method: self.payment_method.to_string(),
            total_amount: to_f64(self.total()),
        })
    }
}

// ── Receipt ──────────────────────────────────────────────────────────

/// What the user sees after a successful order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order_id: String,
    pub plan_id: String,
    pub plan_name: String,
    pub username: String,
    pub coupon_code: Option<String>,
    pub payment_method: PaymentMethod,
    pub amount_charged: Decimal,
}

// ── CheckoutSession ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CheckoutPhase {
    Empty,
    PlanSelected,
    Submittable,
    Submitting,
    Completed,
}

#[derive(Debug, Clone)]
enum Lock {
    Editing,
    Submitting,
    Completed(Receipt),
}

/// Owns the current draft for one checkout.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    draft: OrderDraft,
    coupons: CouponBook,
    lock: Lock,
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new(CouponBook::standard())
    }
}

impl CheckoutSession {
    pub fn new(coupons: CouponBook) -> Self {
        Self {
            draft: OrderDraft::new(),
            coupons,
            lock: Lock::Editing,
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn phase(&self) -> CheckoutPhase {
        match self.lock {
            Lock::Submitting => CheckoutPhase::Submitting,
            Lock::Completed(_) => CheckoutPhase::Completed,
            Lock::Editing if self.draft.can_submit() => CheckoutPhase::Submittable,
            Lock::Editing if self.draft.plan().is_some() => CheckoutPhase::PlanSelected,
            Lock::Editing => CheckoutPhase::Empty,
        }
    }

    pub fn receipt(&self) -> Option<&Receipt> {
        match &self.lock {
            Lock::Completed(r) => Some(r),
            _ => None,
        }
    }

    fn ensure_editable(&self, action: &str) -> Result<(), CoreError> {
        match self.lock {
            Lock::Editing => Ok(()),
            _ => Err(CoreError::InvalidTransition {
                action: action.into(),
                phase: self.phase().to_string(),
            }),
        }
    }

    /// Swap the draft through a pure update.
    fn edit(&mut self, action: &str, f: impl FnOnce(OrderDraft) -> OrderDraft) -> Result<(), CoreError> {
        self.ensure_editable(action)?;
        self.draft = f(std::mem::take(&mut self.draft));
        Ok(())
    }

    pub fn select_plan(&mut self, plan: Plan) -> Result<(), CoreError> {
        self.edit("select a plan", |d| d.with_plan(plan))
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> Result<(), CoreError> {
        let username = username.into();
        self.edit("change the username", |d| d.with_username(username))
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), CoreError> {
        self.edit("change the payment method", |d| d.with_payment_method(method))
    }

    /// Apply a coupon. A rejected code also clears any earlier discount.
    pub fn apply_coupon(&mut self, code: &str) -> Result<DiscountMultiplier, CoreError> {
        self.ensure_editable("apply a coupon")?;
        let (draft, outcome) = std::mem::take(&mut self.draft).apply_coupon(&self.coupons, code);
        self.draft = draft;
        match outcome {
            Ok(m) => {
                info!(code = %normalize(code), percent_off = %m.percent_off(), "coupon applied");
                Ok(m)
            }
            Err(e) => {
                warn!(error = %e, "coupon rejected");
                Err(e.into())
            }
        }
    }

    pub fn clear_coupon(&mut self) -> Result<(), CoreError> {
        self.edit("clear the coupon", OrderDraft::without_coupon)
    }

    /// Lock the draft and hand out the request to send.
    pub fn begin_submit(&mut self) -> Result<OrderRequest, CoreError> {
        self.ensure_editable("submit")?;
        let request = self.draft.to_request()?;
        self.lock = Lock::Submitting;
        Ok(request)
    }

    /// Record the backend's confirmation and finish the checkout.
    pub fn complete(&mut self, confirmation: OrderConfirmation) -> Result<&Receipt, CoreError> {
        if !matches!(self.lock, Lock::Submitting) {
            return Err(CoreError::InvalidTransition {
                action: "complete".into(),
                phase: self.phase().to_string(),
            });
        }
        if !confirmation.success {
            self.lock = Lock::Editing;
            return Err(CoreError::Rejected {
                message: format!("order {} was not accepted", confirmation.order_id),
            });
        }

        let plan = self.draft.plan().ok_or_else(|| {
            CoreError::Internal("submitting checkout lost its plan".into())
        })?;
        let receipt = Receipt {
            order_id: confirmation.order_id,
            plan_id: plan.id.clone(),
            plan_name: plan.name.clone(),
            username: self.draft.username().trim().to_owned(),
            coupon_code: self.draft.coupon_code().map(str::to_owned),
            payment_method: self.draft.payment_method(),
            amount_charged: to_decimal(confirmation.amount_charged),
        };
        info!(order_id = %receipt.order_id, amount = %receipt.amount_charged, "order completed");

        self.lock = Lock::Completed(receipt);
        match &self.lock {
            Lock::Completed(r) => Ok(r),
            _ => Err(CoreError::Internal("receipt missing after completion".into())),
        }
    }

    /// Unlock after a failed submission so the user can retry by hand.
    pub fn abort_submit(&mut self) -> Result<(), CoreError> {
        match self.lock {
            Lock::Submitting => {
                self.lock = Lock::Editing;
                Ok(())
            }
            _ => Err(CoreError::InvalidTransition {
                action: "abort".into(),
                phase: self.phase().to_string(),
            }),
        }
    }
}
