// In crates/api-client/src/types.rs

use reqwest::Client;
use serde::Deserialize;

/// The client for the historical chart API.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The base URL of the chart API.
    pub base_url: String,
}

/// Top-level envelope of a chart response.
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    /// Present on success; usually a single entry.
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    /// Present when the provider rejects the request.
    #[serde(default)]
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    /// Bar timestamps in seconds since the epoch. Absent for empty ranges.
    #[serde(default)]
    pub timestamp: Vec<i64>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

/// One column per price field; `null` entries mark bars without a print.
#[derive(Debug, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}
