// In crates/app-config/src/types.rs

use chrono::NaiveDate;
use serde::Deserialize;

use core_types::Symbol;
use strategies::types::MACrossoverSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the historical quote provider.
    pub provider: ProviderSettings,
    /// Which instrument and date range to analyse.
    pub market: MarketSettings,
    /// Windows and warmup of the crossover rule.
    #[serde(default)]
    pub strategy: MACrossoverSettings,
    /// Where and how the result is rendered.
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProviderSettings {
    /// The base URL of the chart API (e.g., "https://query1.finance.yahoo.com").
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent sent with every request; some providers reject the default one.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketSettings {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl MarketSettings {
    pub fn symbol(&self) -> Symbol {
        Symbol(self.symbol.clone())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct OutputSettings {
    /// Optional path of the JSON report.
    #[serde(default)]
    pub json_path: Option<String>,
    /// Print the text table to stdout.
    #[serde(default = "default_print_table")]
    pub print_table: bool,
    /// Only print rows that carry a Buy or Sell.
    #[serde(default)]
    pub signals_only: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            json_path: None,
            print_table: default_print_table(),
            signals_only: false,
        }
    }
}

/// Helper functions for serde defaults
fn default_timeout_secs() -> u64 { 30 }
fn default_user_agent() -> String { "Mozilla/5.0 (compatible; crossover/0.1)".to_string() }
fn default_print_table() -> bool { true }
