// In crates/app-config/src/lib.rs

use config::{Config, Environment, File, FileFormat};
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::Settings;

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings_from(config_dir: &Path) -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let base = config_dir.join("base");
    let env_specific = config_dir.join(&environment);

    let settings = Config::builder()
        // 1. Load the base configuration file.
        .add_source(File::with_name(&base.to_string_lossy()))
        // 2. Load the environment-specific configuration file.
        .add_source(File::with_name(&env_specific.to_string_lossy()).required(false))
        // 3. Load settings from environment variables (e.g., `APP__MARKET__SYMBOL=MSFT`).
        // The prefix is `APP`, separator is `__`.
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    finish(settings)
}

/// Parses settings from an in-memory TOML document, without any other source.
pub fn parse_settings(toml: &str) -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?;
    finish(settings)
}

fn finish(settings: Config) -> Result<Settings> {
    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;
    validate(&settings)?;
    Ok(settings)
}

/// Rejects settings that would only fail later, deep inside a run.
pub fn validate(settings: &Settings) -> Result<()> {
    if settings.market.end_date < settings.market.start_date {
        return Err(Error::Invalid(format!(
            "market.end_date ({}) is before market.start_date ({})",
            settings.market.end_date, settings.market.start_date
        )));
    }
    if settings.market.symbol.trim().is_empty() {
        return Err(Error::Invalid("market.symbol must not be empty".into()));
    }
    settings.strategy.validate()?;
    Ok(())
}
