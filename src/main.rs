use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use igpulse::config::Config;
use igpulse::dashboard::{DashboardController, FilterState, Period};
use igpulse::interactions::{InteractionKind, Sentiment};
use igpulse::output::terminal;
use igpulse::sheets::client::SheetsClient;

/// igpulse: sentiment dashboard for Instagram DMs and comments.
///
/// Reads interactions from Google Sheets, falls back to sample data when the
/// sheets are unavailable, and shows sentiment, top participants and topics.
#[derive(Parser)]
#[command(name = "igpulse", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Live dashboard, refetched on a timer until Ctrl-C
    Watch {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Fetch once and print the dashboard
    Snapshot {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print the snapshot as JSON instead of the terminal view
        #[arg(long)]
        json: bool,
    },

    /// Show configuration status (API key, sheet ids, refresh period)
    Status,
}

#[derive(Args)]
struct FilterArgs {
    /// Interactions to show: dm or comments
    #[arg(long, default_value = "dm")]
    kind: InteractionKind,

    /// Time window: today, 7d, 30d, all, or a day count
    #[arg(long, default_value = "30d")]
    period: Period,

    /// Only show one sentiment: positive, neutral or negative
    #[arg(long)]
    sentiment: Option<Sentiment>,

    /// Search by @handle or profile id
    #[arg(long, default_value = "")]
    search: String,
}

impl FilterArgs {
    fn filter_state(&self) -> FilterState {
        FilterState {
            query: self.search.clone(),
            period: self.period,
            sentiment: self.sentiment,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so `snapshot --json` stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("igpulse=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Watch { filters } => {
            let config = Config::load()?;
            let mut controller = build_controller(&config, &filters)?;
            let refresh_secs = controller.refresh_interval().as_secs();

            controller.start();

            let ctrl_c = async {
                let _ = tokio::signal::ctrl_c().await;
            };
            controller
                .watch_until(ctrl_c, |snapshot| {
                    // Clear the screen and redraw from the top
                    print!("\x1B[2J\x1B[H");
                    terminal::display_dashboard(snapshot);
                    println!(
                        "  {}",
                        format!("Refreshing every {refresh_secs}s. Press Ctrl-C to quit.").dimmed()
                    );
                })
                .await;

            controller.stop();
            info!("Dashboard closed");
        }

        Commands::Snapshot { filters, json } => {
            let config = Config::load()?;
            let controller = build_controller(&config, &filters)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner().template("  {spinner} {msg}")?,
            );
            spinner.set_message(format!("Fetching {} interactions...", controller.kind()));
            spinner.enable_steady_tick(Duration::from_millis(100));

            controller.refresh().await;

            spinner.finish_and_clear();

            let snapshot = controller.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                terminal::display_dashboard(&snapshot);
            }
        }

        Commands::Status => {
            let config = Config::load()?;
            if config.has_api_key() {
                println!("Google API key: {}", "configured".green());
            } else {
                println!("Google API key: {}", "not set (sample data mode)".yellow());
                println!("  Set GOOGLE_API_KEY in your .env file to read the live sheets.");
            }
            println!("Sheets API: {}", config.sheets_api_url);
            println!("DM sheet: {}", config.dm_sheet_id);
            println!("Comments sheet: {}", config.comments_sheet_id);
            println!("Range: {}", config.sheet_range);
            println!("Refresh period: {}s", config.refresh_interval.as_secs());
            if !config.has_api_key() {
                println!(
                    "  {}",
                    "Sample data is dated 2025-01-15; pass --period all to see it.".dimmed()
                );
            }
        }
    }

    Ok(())
}

fn build_controller(config: &Config, filters: &FilterArgs) -> Result<DashboardController> {
    let source = Arc::new(SheetsClient::from_config(config)?);
    Ok(DashboardController::new(filters.kind, source)
        .with_refresh_interval(config.refresh_interval)
        .with_filters(filters.filter_state()))
}
