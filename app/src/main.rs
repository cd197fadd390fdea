// In app/src/main.rs

use analytics::AnalyticsEngine;
use anyhow::Result;
use app_config::Settings;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use core_types::{Symbol, ValueSeries};
use std::path::{Path, PathBuf};
use strategies::ma_crossover::MACrossover;
use strategies::SignalGenerator;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Dual moving-average crossover signal generator.")]
struct Cli {
    /// Directory holding `base.toml` and the environment-specific overrides.
    #[arg(long, global = true, default_value = "config")]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetches daily closes from the quote provider and renders the signals.
    Signals {
        /// The symbol to analyse (e.g., "AAPL").
        #[arg(short, long)]
        symbol: Option<String>,

        /// Start date in YYYY-MM-DD format (inclusive).
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// End date in YYYY-MM-DD format (exclusive).
        #[arg(long)]
        end_date: Option<NaiveDate>,

        #[command(flatten)]
        strategy: StrategyArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Renders the signals for a chart payload saved on disk.
    Analyze {
        /// Path of the saved chart JSON.
        #[arg(short, long)]
        input: PathBuf,

        /// Label used in the report; defaults to the configured symbol.
        #[arg(short, long)]
        symbol: Option<String>,

        #[command(flatten)]
        strategy: StrategyArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Default)]
struct StrategyArgs {
    /// Window of the short moving average.
    #[arg(long)]
    short_window: Option<i64>,

    /// Window of the long moving average.
    #[arg(long)]
    long_window: Option<i64>,

    /// Leading positions forced to Hold (default: long window - 1).
    #[arg(long, allow_negative_numbers = true)]
    warmup: Option<i64>,
}

#[derive(Args, Debug, Default)]
struct OutputArgs {
    /// Write the JSON report to this path.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only print rows carrying a Buy or Sell.
    #[arg(long)]
    signals_only: bool,

    /// Do not print the table.
    #[arg(long)]
    quiet: bool,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings_from(&cli.config_dir)?;
    init_tracing(&settings.app.log_level);

    tracing::info!(environment = %settings.app.environment, "Starting crossover application");

    // Match on the parsed command and call the appropriate handler.
    match cli.command {
        Commands::Signals {
            symbol,
            start_date,
            end_date,
            strategy,
            output,
        } => {
            let mut settings = settings;
            if let Some(symbol) = symbol {
                settings.market.symbol = symbol;
            }
            if let Some(start_date) = start_date {
                settings.market.start_date = start_date;
            }
            if let Some(end_date) = end_date {
                settings.market.end_date = end_date;
            }
            apply_overrides(&mut settings, &strategy, &output);
            app_config::validate(&settings)?;
            handle_signals(&settings).await?;
        }
        Commands::Analyze {
            input,
            symbol,
            strategy,
            output,
        } => {
            let mut settings = settings;
            if let Some(symbol) = symbol {
                settings.market.symbol = symbol;
            }
            apply_overrides(&mut settings, &strategy, &output);
            app_config::validate(&settings)?;
            handle_analyze(&settings, &input).await?;
        }
    }

    tracing::info!("Crossover application has finished successfully.");

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_target("hyper", tracing::Level::WARN) // Silence HTTP client internals
                .with_target("reqwest", tracing::Level::WARN)
                .with_default(level),
        );
    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Layers command-line flags over the loaded settings.
fn apply_overrides(settings: &mut Settings, strategy: &StrategyArgs, output: &OutputArgs) {
    if let Some(short_window) = strategy.short_window {
        settings.strategy.short_window = short_window;
    }
    if let Some(long_window) = strategy.long_window {
        settings.strategy.long_window = long_window;
    }
    if strategy.warmup.is_some() {
        settings.strategy.warmup = strategy.warmup;
    }
    if let Some(path) = &output.output {
        settings.output.json_path = Some(path.to_string_lossy().into_owned());
    }
    if output.signals_only {
        settings.output.signals_only = true;
    }
    if output.quiet {
        settings.output.print_table = false;
    }
}

// --- "Signals" Subcommand Logic ---

/// Handles the logic for the `signals` subcommand.
async fn handle_signals(settings: &Settings) -> Result<()> {
    let symbol = settings.market.symbol();
    let client = api_client::new(&settings.provider)?;

    tracing::info!(
        symbol = %symbol,
        start = %settings.market.start_date,
        end = %settings.market.end_date,
        "Fetching daily closes."
    );
    let prices = client
        .get_daily_closes(&symbol, settings.market.start_date, settings.market.end_date)
        .await?;

    render_run(settings, &symbol, &prices)
}

// --- "Analyze" Subcommand Logic ---

/// Handles the logic for the `analyze` subcommand.
async fn handle_analyze(settings: &Settings, input: &Path) -> Result<()> {
    let symbol = settings.market.symbol();
    tracing::info!(path = %input.display(), "Loading saved chart.");
    let prices = api_client::load_chart_file(input).await?;

    render_run(settings, &symbol, &prices)
}

/// Runs the crossover rule and hands the result to the renderer.
fn render_run(settings: &Settings, symbol: &Symbol, prices: &ValueSeries) -> Result<()> {
    let generator = MACrossover::new(settings.strategy.clone())?;
    tracing::info!(generator = generator.name(), "Generating signals.");
    let output = generator.generate(prices)?;

    let engine = AnalyticsEngine::new();
    let report = engine.build_report(symbol, prices, &output)?;

    if let Some(path) = &settings.output.json_path {
        engine.write_json(&report, Path::new(path))?;
    }
    if settings.output.print_table {
        print!("{}", engine.render_table(&report, settings.output.signals_only));
    }

    Ok(())
}
