//! Node listing with latency and load grading.

use serde::Serialize;
use tabled::Tabled;

use vpsdash_core::nodes::groups;
use vpsdash_core::{Dashboard, Node, NodeFilter};

use crate::cli::{GlobalOpts, NodesArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Latency")]
    latency: String,
    #[tabled(rename = "Load")]
    load: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Tags")]
    tags: String,
}

fn row(n: &Node, color: bool) -> NodeRow {
    NodeRow {
        id: n.id,
        name: format!("{} {}", n.flag, n.name).trim().to_owned(),
        group: n.group.clone(),
        protocol: n.protocol.to_string(),
        latency: output::paint_health(&format!("{} ms", n.latency_ms), n.latency_level(), color),
        load: output::paint_health(&format!("{}%", n.load), n.load_level(), color),
        status: n.status.to_string(),
        tags: n.tags.join(", "),
    }
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Group")]
    name: String,
}

/// Serialized form of `--links` output.
#[derive(Clone, Serialize, Tabled)]
struct NodeLink {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Link")]
    link: String,
}

pub async fn handle(
    dashboard: &Dashboard,
    args: NodesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if args.groups {
        let all = dashboard.nodes(&NodeFilter::default()).await?;
        let names = groups(&all);
        let out = output::render_list(
            global.output_format(),
            &names,
            |g| GroupRow {
                name: (*g).to_owned(),
            },
            |g| (*g).to_owned(),
        )?;
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let filter = NodeFilter {
        group: args.group,
        keyword: args.search,
    };
    let nodes = if args.test_latency {
        let bar = util::spinner("Testing latency...", global.quiet);
        let result = dashboard.measure_latency(&filter).await;
        bar.finish_and_clear();
        result?
    } else {
        dashboard.nodes(&filter).await?
    };

    if args.links {
        let links: Vec<NodeLink> = nodes
            .iter()
            .map(|n| NodeLink {
                name: n.name.clone(),
                link: n.share_link(),
            })
            .collect();
        let out =
            output::render_list(global.output_format(), &links, NodeLink::clone, |l| {
                l.link.clone()
            })?;
        output::print_output(&out, global.quiet);
        return Ok(());
    }

    let color = output::should_color(global.color_mode());
    let out = output::render_list(
        global.output_format(),
        &nodes,
        |n| row(n, color),
        |n| n.name.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
