//! Plan catalog.

use tabled::Tabled;

use vpsdash_core::format::format_currency;
use vpsdash_core::{BillingPeriod, Currency, Dashboard, Plan};

use crate::cli::{GlobalOpts, PeriodArg, PlansArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct PlanRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Was")]
    original: String,
    #[tabled(rename = "Traffic")]
    traffic: String,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Devices")]
    devices: String,
    #[tabled(rename = "")]
    popular: String,
}

fn row(p: &Plan, currency: Currency) -> PlanRow {
    PlanRow {
        id: p.id.clone(),
        name: p.name.clone(),
        period: p.period.to_string(),
        price: format_currency(p.price, currency),
        original: if p.original_price > p.price {
            format_currency(p.original_price, currency)
        } else {
            String::new()
        },
        traffic: p.traffic_quota.clone(),
        speed: p.speed_limit.clone(),
        devices: p.device_limit.clone(),
        popular: if p.popular { "★".into() } else { String::new() },
    }
}

fn period(arg: PeriodArg) -> BillingPeriod {
    match arg {
        PeriodArg::Monthly => BillingPeriod::Monthly,
        PeriodArg::Quarterly => BillingPeriod::Quarterly,
    }
}

pub async fn handle(
    dashboard: &Dashboard,
    args: PlansArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let plans = dashboard.plans(args.period.map(period)).await?;
    let currency = dashboard.currency();
    let out = output::render_list(
        global.output_format(),
        &plans,
        |p| row(p, currency),
        |p| p.id.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
