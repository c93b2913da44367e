//! CLI command implementations for fleetdash.
//!
//! Provides subcommand handlers for:
//! - `fleetdash serve`: run the operator dashboard
//! - `fleetdash snapshot <tab>`: one synchronous refresh of a tab
//! - `fleetdash radar name=score...`: print a radar chart as SVG
//! - `fleetdash health`: probe the agent backend
//! - `fleetdash activity --days N`: summarize the activity log
//! - `fleetdash config show|init|set|reset`: configuration management

use std::time::Instant;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::analytics::logger::ActivityLog;
use crate::analytics::reporter::{self, ActivitySummary, Count};
use crate::config;
use crate::fetch::source::INTELLIGENCE_PATH;
use crate::fetch::{HttpTransport, Source, Transport};
use crate::model::Agent;
use crate::radar::RadarChart;
use crate::scheduler::{Controller, Tab, intelligence_job, run_jobs, tab_regions};
use crate::utils::format::{title_case, truncate};

/// Output format for report commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Html,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            Some("html") => Self::Html,
            _ => Self::Table,
        }
    }
}

// ---------------------------------------------------------------------------
// fleetdash serve
// ---------------------------------------------------------------------------

pub fn run_serve(addr: Option<String>, no_browser: bool) -> Result<()> {
    let cfg = config::load();
    crate::web::serve(&cfg, addr, no_browser)
}

// ---------------------------------------------------------------------------
// fleetdash snapshot
// ---------------------------------------------------------------------------

/// Run one refresh pass of `tab` against the backend and print its regions.
pub fn run_snapshot(tab: &str, format: OutputFormat) -> Result<()> {
    let tab: Tab = tab.parse()?;
    let cfg = config::load();
    let transport = HttpTransport::new(&cfg.backend.base_url);
    let (primary, intelligence) = cfg.refresh.periods();

    let mut controller = Controller::new(primary, intelligence, Instant::now())
        .with_chat_target(&cfg.chat.default_target);
    let mut jobs = controller.select_tab(tab);
    jobs.push(intelligence_job());
    run_jobs(&mut controller, &transport, jobs);

    let view = controller.view();
    match format {
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            for id in tab_regions(tab) {
                let html = view.get(&id).unwrap_or_default();
                map.insert(id, serde_json::Value::String(html.to_string()));
            }
            println!("{}", serde_json::to_string_pretty(&map)?);
        }
        _ => {
            for id in tab_regions(tab) {
                println!("{}", format!("<!-- {id} -->").dimmed());
                println!("{}", view.get(&id).unwrap_or_default());
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// fleetdash radar
// ---------------------------------------------------------------------------

/// Print a radar chart for `name=score` pairs.
pub fn run_radar(scores: &[String], size: f64, color: &str, no_labels: bool) -> Result<()> {
    let (labels, values) = parse_scores(scores)?;
    let chart = RadarChart::new(size, &values, color);
    let svg = if no_labels {
        chart.to_svg()
    } else {
        chart.with_labels(&labels).to_svg()
    };
    println!("{svg}");
    Ok(())
}

fn parse_scores(scores: &[String]) -> Result<(Vec<String>, Vec<f64>)> {
    let mut labels = Vec::with_capacity(scores.len());
    let mut values = Vec::with_capacity(scores.len());
    for pair in scores {
        let Some((name, score)) = pair.split_once('=') else {
            bail!("expected name=score, got {pair:?}");
        };
        let score: f64 = score
            .trim()
            .parse()
            .with_context(|| format!("invalid score in {pair:?}"))?;
        labels.push(title_case(name.trim()));
        values.push(score);
    }
    Ok((labels, values))
}

// ---------------------------------------------------------------------------
// fleetdash health
// ---------------------------------------------------------------------------

/// Check configuration and probe each backend endpoint.
pub fn run_health() -> Result<()> {
    println!("{}", "fleetdash Health Check".bold().cyan());
    println!("{}", "=".repeat(40));

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let cfg = config::load();
    print_health_item(
        "Global config",
        global_exists,
        if global_exists {
            "~/.fleetdash/config.toml found"
        } else {
            "not found (run `fleetdash config init` to create)"
        },
    );
    print_health_item("Backend", true, &cfg.backend.base_url);

    let transport = HttpTransport::new(&cfg.backend.base_url);
    for agent in Agent::ALL {
        probe(&transport, agent.name(), &Source::Primary(agent).path());
    }
    probe(&transport, "Intelligence", INTELLIGENCE_PATH);

    let log = ActivityLog::from_config(&cfg.logging);
    let log_exists = log.path().is_some_and(|p| p.exists());
    print_health_item(
        "Activity log",
        log_exists,
        &if log_exists {
            format!("{} entries", log.read_all().len())
        } else if cfg.logging.enabled {
            "no log file yet".to_string()
        } else {
            "disabled".to_string()
        },
    );

    Ok(())
}

fn probe(transport: &dyn Transport, name: &str, path: &str) {
    let started = Instant::now();
    let result = transport.get_json(path);
    let ms = started.elapsed().as_millis();
    match result {
        Ok(_) => print_health_item(name, true, &format!("{path} ({ms}ms)")),
        Err(e) => print_health_item(name, false, &truncate(&format!("{path}: {e:#}"), 60)),
    }
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<25} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// fleetdash activity
// ---------------------------------------------------------------------------

/// Summarize the operator activity log.
pub fn run_activity(days: Option<u32>, format: OutputFormat) -> Result<()> {
    let cfg = config::load();
    let log = ActivityLog::from_config(&cfg.logging);
    let summary = reporter::summarize(&log.read_since_days(days));

    if summary.total == 0 {
        println!(
            "{}",
            "No activity yet. Use the dashboard to record some.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Csv => print_activity_csv(&summary),
        OutputFormat::Table | OutputFormat::Html => print_activity_table(&summary, days),
    }
    Ok(())
}

fn print_activity_table(s: &ActivitySummary, days: Option<u32>) {
    let title = match days {
        Some(days) => format!("fleetdash Activity (last {days} days)"),
        None => "fleetdash Activity".to_string(),
    };
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("  {} {}", "Total events:  ".bold(), s.total);
    println!("  {} {}", "Tab switches:  ".bold(), s.tab_switches);
    println!(
        "  {} {} ({} failed)",
        "Actions:       ".bold(),
        s.actions,
        s.failed_actions
    );
    println!("  {} {}", "Chat sends:    ".bold(), s.chat_sends);
    println!("  {} {}", "Fetch failures:".bold(), s.fetch_failures);

    print_counts("Most Visited Tabs", &s.tabs);
    print_counts("Most Frequent Failures", &s.failing);
}

fn print_counts(title: &str, counts: &[Count]) {
    if counts.is_empty() {
        return;
    }
    println!();
    println!("{}", title.bold().cyan());
    for (i, c) in counts.iter().take(10).enumerate() {
        let line = format!("  {:<30} {:>6}", truncate(&c.subject, 30), c.count);
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_activity_csv(s: &ActivitySummary) {
    println!("group,subject,count");
    for c in &s.tabs {
        println!("tab,{},{}", c.subject, c.count);
    }
    for c in &s.failing {
        println!("failure,{},{}", c.subject, c.count);
    }
}

// ---------------------------------------------------------------------------
// fleetdash config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective fleetdash Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);

    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    if global_exists {
        println!("  {} {}", "✓".green(), "~/.fleetdash/config.toml".dimmed());
    } else {
        println!(
            "  {} {}",
            "·".dimmed(),
            "~/.fleetdash/config.toml (not found)".dimmed()
        );
    }
    if project_exists {
        println!("  {} {}", "✓".green(), ".fleetdash.toml".dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), ".fleetdash.toml (not found)".dimmed());
    }
    println!(
        "  {} {}",
        "·".dimmed(),
        "FLEETDASH_* environment variables".dimmed()
    );
    Ok(())
}

/// Initialize a default config file at `~/.fleetdash/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing_defaults_to_table() {
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("html")), OutputFormat::Html);
        assert_eq!(OutputFormat::from_str_opt(Some("xml")), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
    }

    #[test]
    fn scores_parse_into_labels_and_values() {
        let args = vec!["reasoning=80".to_string(), "tool_use = 42.5".to_string()];
        let (labels, values) = parse_scores(&args).unwrap();
        assert_eq!(labels, vec!["Reasoning", "Tool Use"]);
        assert_eq!(values, vec![80.0, 42.5]);
    }

    #[test]
    fn malformed_scores_are_rejected() {
        assert!(parse_scores(&["reasoning".to_string()]).is_err());
        assert!(parse_scores(&["reasoning=high".to_string()]).is_err());
    }
}
