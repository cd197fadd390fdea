// In crates/api-client/src/lib.rs

use app_config::types::ProviderSettings;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use core_types::{Symbol, TimeSeries, ValueSeries};
use std::path::Path;
use std::time::Duration;

pub mod error;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use types::*;

/// Constructs a new `QuoteClient` from the provider settings.
pub fn new(settings: &ProviderSettings) -> Result<QuoteClient> {
    QuoteClient::new(settings)
}

impl QuoteClient {
    /// Constructs a new QuoteClient from ProviderSettings.
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;
        Ok(QuoteClient {
            http_client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches daily closing prices for `symbol` between `start` (inclusive)
    /// and `end` (exclusive).
    ///
    /// Bars without a close are kept as missing values so that the caller
    /// sees the real trading calendar.
    pub async fn get_daily_closes(
        &self,
        symbol: &Symbol,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ValueSeries> {
        let url = chart_url(&self.base_url, symbol, start, end);
        tracing::debug!(%url, "Requesting daily chart.");

        let response_body = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(Error::RequestFailed)?
            .text()
            .await
            .map_err(Error::RequestFailed)?;

        let series = parse_chart_response(&response_body)?;
        tracing::info!(
            symbol = %symbol,
            observations = series.len(),
            missing = series.len() - series.defined_count(),
            "Received daily closes."
        );
        Ok(series)
    }
}

/// Builds the chart request URL for a daily-interval query.
pub fn chart_url(base_url: &str, symbol: &Symbol, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
        base_url,
        symbol.0,
        midnight_utc(start),
        midnight_utc(end)
    )
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

/// Converts a raw chart payload into a price series of closes.
pub fn parse_chart_response(body: &str) -> Result<ValueSeries> {
    let response: types::ChartResponse = serde_json::from_str(body)?;

    if let Some(err) = response.chart.error {
        return Err(Error::ApiError {
            code: err.code,
            description: err.description,
        });
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| Error::MissingData("chart.result is empty".into()))?;

    if result.timestamp.is_empty() {
        return Ok(ValueSeries::empty());
    }

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|block| block.close)
        .ok_or_else(|| Error::MissingData("no quote block in indicators".into()))?;

    let timestamps = result
        .timestamp
        .iter()
        .map(|&secs| {
            DateTime::<Utc>::from_timestamp(secs, 0)
                .ok_or_else(|| Error::MissingData(format!("timestamp {} is out of range", secs)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TimeSeries::from_parts(timestamps, closes)?)
}

/// Reads a previously saved chart payload from disk.
pub async fn load_chart_file(path: &Path) -> Result<ValueSeries> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_chart_response(&content)
}
