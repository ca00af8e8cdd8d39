//! Client download links.

use tabled::Tabled;

use vpsdash_core::{ClientDownload, Dashboard, Platform};

use crate::cli::{DownloadsArgs, GlobalOpts, PlatformArg};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DownloadRow {
    #[tabled(rename = "Platform")]
    platform: &'static str,
    #[tabled(rename = "URL")]
    url: &'static str,
}

fn platform(arg: PlatformArg) -> Platform {
    match arg {
        PlatformArg::Windows => Platform::Windows,
        PlatformArg::Macos => Platform::Macos,
        PlatformArg::Ios => Platform::Ios,
        PlatformArg::Android => Platform::Android,
        PlatformArg::Linux => Platform::Linux,
        PlatformArg::Openwrt => Platform::Openwrt,
    }
}

pub fn handle(
    dashboard: &Dashboard,
    args: &DownloadsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let links = dashboard.downloads(args.platform.map(platform));
    let out = output::render_list(
        global.output_format(),
        &links,
        |d: &ClientDownload| DownloadRow {
            platform: d.label,
            url: d.url,
        },
        |d| d.url.to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
