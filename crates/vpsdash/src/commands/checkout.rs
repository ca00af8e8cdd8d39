//! Plan purchase: build a draft, quote it, confirm, submit.

use rust_decimal::Decimal;
use serde::Serialize;

use vpsdash_core::format::format_currency;
use vpsdash_core::{Currency, Dashboard, OrderDraft, PaymentMethod, Receipt};

use crate::cli::{CheckoutArgs, GlobalOpts, PaymentArg};
use crate::error::CliError;
use crate::output;

use super::util;

/// What the user is about to pay.
#[derive(Debug, Serialize)]
struct Quote {
    plan_id: String,
    plan_name: String,
    username: String,
    payment_method: PaymentMethod,
    coupon_code: Option<String>,
    original_amount: Decimal,
    discount_amount: Decimal,
    final_amount: Decimal,
}

impl Quote {
    fn from_draft(draft: &OrderDraft) -> Option<Self> {
        let plan = draft.plan()?;
        let price = draft.pricing()?;
        Some(Self {
            plan_id: plan.id.clone(),
            plan_name: format!("{} ({})", plan.name, plan.period),
            username: draft.username().to_owned(),
            payment_method: draft.payment_method(),
            coupon_code: draft.coupon_code().map(str::to_owned),
            original_amount: price.original_amount,
            discount_amount: price.discount_amount,
            final_amount: price.final_amount,
        })
    }

    fn detail(&self, currency: Currency) -> String {
        let mut lines = vec![
            format!("Plan:     {}", self.plan_name),
            format!("Username: {}", self.username),
            format!("Payment:  {}", self.payment_method.label()),
            format!("Price:    {}", format_currency(self.original_amount, currency)),
        ];
        if let Some(ref code) = self.coupon_code {
            lines.push(format!(
                "Discount: -{} ({code})",
                format_currency(self.discount_amount, currency)
            ));
        }
        lines.push(format!(
            "Total:    {}",
            format_currency(self.final_amount, currency)
        ));
        lines.join("\n")
    }
}

fn receipt_detail(r: &Receipt, currency: Currency) -> String {
    let mut lines = vec![
        format!("Order:    {}", r.order_id),
        format!("Plan:     {} ({})", r.plan_name, r.plan_id),
        format!("Username: {}", r.username),
        format!("Payment:  {}", r.payment_method.label()),
    ];
    if let Some(ref code) = r.coupon_code {
        lines.push(format!("Coupon:   {code}"));
    }
    lines.push(format!(
        "Charged:  {}",
        format_currency(r.amount_charged, currency)
    ));
    lines.join("\n")
}

fn payment(arg: PaymentArg) -> PaymentMethod {
    match arg {
        PaymentArg::Alipay => PaymentMethod::Alipay,
        PaymentArg::Wechat => PaymentMethod::Wechat,
    }
}

pub async fn handle(
    dashboard: &Dashboard,
    args: CheckoutArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let currency = dashboard.currency();
    let plan = dashboard.find_plan(&args.plan).await?;

    let mut session = dashboard.new_checkout();
    session.select_plan(plan)?;
    session.set_username(args.username)?;
    session.set_payment_method(payment(args.payment))?;

    if let Some(ref code) = args.coupon {
        let multiplier = session.apply_coupon(code)?;
        output::notice(
            &format!("✓ Coupon applied: {}% off", multiplier.percent_off().normalize()),
            global.quiet,
        );
    }

    if !session.draft().can_submit() {
        return Err(CliError::Validation {
            field: "username".into(),
            reason: "a username is required to place an order".into(),
        });
    }
    let quote = Quote::from_draft(session.draft()).ok_or_else(|| CliError::Checkout {
        message: "no plan selected".into(),
    })?;

    if args.dry_run {
        let out = output::render_single(
            global.output_format(),
            &quote,
            |q| q.detail(currency),
            |q| q.final_amount.to_string(),
        )?;
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    output::notice(&quote.detail(currency), global.quiet);
    let prompt = format!(
        "Pay {} with {}?",
        format_currency(quote.final_amount, currency),
        quote.payment_method.label()
    );
    if !util::confirm(&prompt, global.yes)? {
        output::notice("Checkout cancelled", global.quiet);
        return Ok(());
    }

    let bar = util::spinner("Submitting order...", global.quiet);
    let result = dashboard.submit(&mut session).await;
    bar.finish_and_clear();
    let receipt = result?;

    output::notice("✓ Order placed", global.quiet);
    let out = output::render_single(
        global.output_format(),
        &receipt,
        |r| receipt_detail(r, currency),
        |r| r.order_id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
