// In crates/strategies/src/types.rs

use core_types::{Error, Result, Signal, SignalSeries, ValueSeries};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MACrossoverSettings {
    // Window of the fast ("short") simple moving average.
    #[serde(default = "default_short_window")]
    pub short_window: i64,
    // Window of the slow ("long") simple moving average.
    #[serde(default = "default_long_window")]
    pub long_window: i64,
    // Leading positions forced to Hold. Defaults to `long_window - 1`.
    #[serde(default)]
    pub warmup: Option<i64>,
}

impl Default for MACrossoverSettings {
    fn default() -> Self {
        Self {
            short_window: default_short_window(),
            long_window: default_long_window(),
            warmup: None,
        }
    }
}

fn default_short_window() -> i64 { 20 }
fn default_long_window() -> i64 { 50 }

/// Validated, core-level parameters derived from [`MACrossoverSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossoverParams {
    pub short_window: usize,
    pub long_window: usize,
    pub warmup: usize,
}

impl MACrossoverSettings {
    /// Checks the raw settings and converts them into core parameters.
    ///
    /// Windows must be at least 1 and the warmup must not be negative.
    /// When no warmup is configured, the long window minus one is used so
    /// that no signal is considered before the slow average exists.
    pub fn validate(&self) -> Result<CrossoverParams> {
        let short_window = positive_window("short_window", self.short_window)?;
        let long_window = positive_window("long_window", self.long_window)?;

        let warmup = match self.warmup {
            Some(w) if w < 0 => {
                return Err(Error::InvalidParameter(format!(
                    "warmup must be non-negative, got {}",
                    w
                )));
            }
            Some(w) => usize::try_from(w).map_err(|_| {
                Error::InvalidParameter(format!("warmup {} is out of range", w))
            })?,
            None => long_window - 1,
        };

        Ok(CrossoverParams {
            short_window,
            long_window,
            warmup,
        })
    }
}

fn positive_window(name: &str, value: i64) -> Result<usize> {
    if value <= 0 {
        return Err(Error::InvalidParameter(format!(
            "{} must be a positive integer, got {}",
            name, value
        )));
    }
    usize::try_from(value)
        .map_err(|_| Error::InvalidParameter(format!("{} {} is out of range", name, value)))
}

/// Everything a renderer needs: both averages and the signals, all aligned
/// to the timestamps of the input price series.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverOutput {
    pub params: CrossoverParams,
    pub short_ma: ValueSeries,
    pub long_ma: ValueSeries,
    pub signals: SignalSeries,
}

impl CrossoverOutput {
    pub fn count(&self, signal: Signal) -> usize {
        self.signals.values().filter(|s| **s == signal).count()
    }
}
