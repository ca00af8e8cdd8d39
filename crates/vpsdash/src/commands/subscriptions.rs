//! Subscription listing and client import links.

use serde::Serialize;
use tabled::Tabled;

use vpsdash_core::{Dashboard, ImportClient, Subscription};

use crate::cli::{GlobalOpts, SubscriptionsArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct SubscriptionRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Billing")]
    billing: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Expires")]
    expires: String,
    #[tabled(rename = "Subscribe URL")]
    url: String,
}

impl From<&Subscription> for SubscriptionRow {
    fn from(s: &Subscription) -> Self {
        Self {
            id: s.id,
            name: s.name.clone(),
            billing: s.billing.clone(),
            status: s.status.to_string(),
            expires: util::day(&s.expire_date),
            url: s.subscribe_url.clone(),
        }
    }
}

/// One deep link per subscription and client.
#[derive(Clone, Serialize, Tabled)]
struct ImportRow {
    #[tabled(rename = "Subscription")]
    subscription: String,
    #[tabled(rename = "Client")]
    client: ImportClient,
    #[tabled(rename = "Import URL")]
    url: String,
}

fn import_rows(subs: &[Subscription]) -> Vec<ImportRow> {
    subs.iter()
        .flat_map(|s| {
            s.import_links().into_iter().map(|link| ImportRow {
                subscription: s.name.clone(),
                client: link.client,
                url: link.url,
            })
        })
        .collect()
}

pub async fn handle(
    dashboard: &Dashboard,
    args: &SubscriptionsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let subs = dashboard.subscriptions().await?;

    if args.import_links {
        let rows = import_rows(&subs);
        let out = output::render_list(global.output_format(), &rows, ImportRow::clone, |r| {
            r.url.clone()
        })?;
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let out = output::render_list(global.output_format(), &subs, |s| SubscriptionRow::from(s), |s| {
        s.subscribe_url.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
