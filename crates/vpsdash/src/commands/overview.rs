//! Account overview: balance, traffic and expiry.

use vpsdash_core::format::{format_bytes, format_currency, format_percentage};
use vpsdash_core::{AccountOverview, Currency, Dashboard};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(o: &AccountOverview, currency: Currency, color: bool) -> String {
    let status = o.traffic.status();
    let usage = format!(
        "{} / {} ({})",
        format_bytes(o.traffic.used, 2),
        format_bytes(o.traffic.total, 2),
        format_percentage(o.traffic.used, o.traffic.total, 1),
    );

    let mut lines = vec![format!("Balance:   {}", format_currency(o.balance, currency))];
    if let Some(ref r) = o.last_recharge {
        lines.push(format!(
            "Recharged: {} on {}",
            format_currency(r.amount, currency),
            util::day(&r.date)
        ));
    }
    lines.push(format!(
        "Traffic:   {}",
        output::paint_traffic(&usage, status.level, color)
    ));
    lines.push(format!(
        "Remaining: {}",
        format_bytes(o.traffic.remaining(), 2)
    ));
    if status.threshold_crossed {
        lines.push(format!(
            "           {}",
            output::paint_traffic(&status.message, status.level, color)
        ));
    }
    if let Some(ref reset) = o.traffic.reset_date {
        lines.push(format!("Resets:    {}", util::day(reset)));
    }
    lines.push(format!(
        "Expires:   {} ({} days left)",
        util::date(&o.expire_date),
        o.days_remaining
    ));
    if let Some(ref renewal) = o.renewal {
        lines.push(format!(
            "Term:      day {} of {} ({:.0}%)",
            renewal.days_used,
            renewal.total_days,
            renewal.percent()
        ));
    }
    lines.join("\n")
}

pub async fn handle(dashboard: &Dashboard, global: &GlobalOpts) -> Result<(), CliError> {
    let overview = dashboard.overview().await?;
    let currency = dashboard.currency();
    let color = output::should_color(global.color_mode());

    let out = output::render_single(
        global.output_format(),
        &overview,
        |o| detail(o, currency, color),
        |o| o.balance.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
