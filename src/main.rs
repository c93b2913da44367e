use anyhow::Result;
use clap::{Parser, Subcommand};

use fleetdash::cli;

#[derive(Debug, Parser)]
#[command(name = "fleetdash")]
#[command(about = "Operations dashboard for the agent fleet")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the dashboard server
    Serve {
        /// Address to bind (default from config: 127.0.0.1:7777)
        #[arg(long)]
        addr: Option<String>,
        /// Do not open a browser window
        #[arg(long)]
        no_browser: bool,
    },
    /// Refresh one tab against the backend and print its regions
    Snapshot {
        /// Tab key: overview, garves, soren, shelby, atlas, mercury, sentinel, chat
        tab: String,
        /// Output format: html (default), json
        #[arg(long, default_value = "html")]
        format: String,
    },
    /// Print a radar chart SVG for name=score pairs
    Radar {
        /// Dimension scores, e.g. reasoning=80 memory=65 tools=40
        #[arg(required = true, num_args = 1..)]
        scores: Vec<String>,
        /// Chart width and height in pixels
        #[arg(long, default_value = "220")]
        size: f64,
        /// Fill and stroke color
        #[arg(long, default_value = "#58a6ff")]
        color: String,
        /// Omit the axis labels
        #[arg(long)]
        no_labels: bool,
    },
    /// Probe the agent backend endpoints
    Health,
    /// Summarize the operator activity log
    Activity {
        /// Only include the last N days of data
        #[arg(long)]
        days: Option<u32>,
        /// Output format: table (default), json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Show the effective merged configuration
    Show,
    /// Write a default config to ~/.fleetdash/config.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Set a dotted key, e.g. `refresh.primary_ms 3000`
    Set { key: String, value: String },
    /// Reset the global config to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Serve { addr, no_browser } => cli::run_serve(addr, no_browser),
        Commands::Snapshot { tab, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_snapshot(&tab, fmt)
        }
        Commands::Radar {
            scores,
            size,
            color,
            no_labels,
        } => cli::run_radar(&scores, size, &color, no_labels),
        Commands::Health => cli::run_health(),
        Commands::Activity { days, format } => {
            let fmt = cli::OutputFormat::from_str_opt(Some(&format));
            cli::run_activity(days, fmt)
        }
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(),
            ConfigAction::Init { force } => cli::run_config_init(force),
            ConfigAction::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigAction::Reset => cli::run_config_reset(),
        },
    }
}
