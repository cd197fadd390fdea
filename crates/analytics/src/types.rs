// In crates/analytics/src/types.rs

use chrono::{DateTime, Utc};
use core_types::{Signal, Symbol};
use serde::{Deserialize, Serialize};

/// One aligned position of the run: price, both averages and the signal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub timestamp: DateTime<Utc>,
    pub close: Option<f64>,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub signal: Signal,
    /// `+1` buy, `-1` sell, `0` hold, for renderers that plot a signal column.
    pub signal_code: i8,
}

/// A Buy or Sell marker, placed at the close price of its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalMarker {
    pub timestamp: DateTime<Utc>,
    pub signal: Signal,
    /// `None` only if the close itself is missing at that position.
    pub price: Option<f64>,
}

/// Headline numbers of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub observations: usize,
    pub missing_closes: usize,
    pub short_window: usize,
    pub long_window: usize,
    pub warmup: usize,
    pub short_ma_defined: usize,
    pub long_ma_defined: usize,
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,
}

/// Everything the renderer overlays: price, both averages and the markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossoverReport {
    pub symbol: Symbol,
    pub summary: ReportSummary,
    pub markers: Vec<SignalMarker>,
    pub rows: Vec<ReportRow>,
}

impl CrossoverReport {
    pub fn buys(&self) -> impl Iterator<Item = &SignalMarker> + '_ {
        self.markers.iter().filter(|m| m.signal == Signal::Buy)
    }

    pub fn sells(&self) -> impl Iterator<Item = &SignalMarker> + '_ {
        self.markers.iter().filter(|m| m.signal == Signal::Sell)
    }
}
