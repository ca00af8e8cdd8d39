//! Rendering of command results for `--output`.
//!
//! Lists become `tabled` tables, single records become key/value blocks,
//! and `json`/`yaml` serialize the domain value itself. `plain` prints one
//! scriptable value per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use vpsdash_core::{HealthLevel, TrafficLevel};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// `auto` colors only an interactive stdout, and honours `NO_COLOR`.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Green / yellow / red by health.
pub fn paint_health(text: &str, level: HealthLevel, color: bool) -> String {
    if !color {
        return text.to_owned();
    }
    match level {
        HealthLevel::Good => text.green().to_string(),
        HealthLevel::Warning => text.yellow().to_string(),
        HealthLevel::Error => text.red().to_string(),
    }
}

pub fn paint_traffic(text: &str, level: TrafficLevel, color: bool) -> String {
    if !color {
        return text.to_owned();
    }
    match level {
        TrafficLevel::Normal => text.green().to_string(),
        TrafficLevel::Warning => text.yellow().to_string(),
        TrafficLevel::Critical => text.red().bold().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// `to_row` projects each item onto its table row; `id_fn` picks the value
/// printed for `plain`.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Like [`render_list`] for one record; `table` prints `detail_fn`'s
/// key/value block.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Rendered output goes to stdout unless `--quiet`.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let _ = writeln!(io::stdout().lock(), "{output}");
}

/// Status line on stderr, suppressed by `--quiet`.
pub fn notice(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: u32,
        name: &'static str,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "Name")]
        name: String,
    }

    fn items() -> Vec<Item> {
        vec![Item { id: 1, name: "alpha" }, Item { id: 2, name: "beta" }]
    }

    fn row(i: &Item) -> ItemRow {
        ItemRow {
            name: i.name.into(),
        }
    }

    #[test]
    fn plain_lists_one_id_per_line() {
        let out = render_list(OutputFormat::Plain, &items(), row, |i| i.id.to_string()).unwrap();
        assert_eq!(out, "1\n2");
    }

    #[test]
    fn compact_json_is_single_line() {
        let out =
            render_list(OutputFormat::JsonCompact, &items(), row, |i| i.id.to_string()).unwrap();
        assert_eq!(out, r#"[{"id":1,"name":"alpha"},{"id":2,"name":"beta"}]"#);
    }

    #[test]
    fn table_uses_row_headers() {
        let out = render_list(OutputFormat::Table, &items(), row, |i| i.id.to_string()).unwrap();
        assert!(out.contains("Name"));
        assert!(out.contains("beta"));
    }

    #[test]
    fn yaml_single() {
        let out = render_single(
            OutputFormat::Yaml,
            &Item { id: 7, name: "x" },
            |_| String::new(),
            |i| i.id.to_string(),
        )
        .unwrap();
        assert!(out.contains("id: 7"));
    }

    #[test]
    fn colors_off_leave_text_untouched() {
        assert_eq!(paint_health("12 ms", HealthLevel::Error, false), "12 ms");
        assert_ne!(paint_health("12 ms", HealthLevel::Error, true), "12 ms");
    }
}
