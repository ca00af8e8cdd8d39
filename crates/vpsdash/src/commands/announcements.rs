//! Announcements, latest first.

use tabled::Tabled;

use vpsdash_core::{Announcement, Dashboard};

use crate::cli::{AnnouncementsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AnnouncementRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Content")]
    content: String,
    #[tabled(rename = "Link")]
    link: String,
}

impl From<&Announcement> for AnnouncementRow {
    fn from(a: &Announcement) -> Self {
        Self {
            date: util::day(&a.created_at),
            kind: a.kind.to_string(),
            title: a.title.clone(),
            content: a.content.clone(),
            link: a.link.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(
    dashboard: &Dashboard,
    args: AnnouncementsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let items = dashboard.announcements(args.limit).await?;
    let out = output::render_list(global.output_format(), &items, |a| AnnouncementRow::from(a), |a| {
        a.title.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
