use crate::error::Result;
use crate::types::{CrossoverReport, ReportRow, ReportSummary, SignalMarker};
use core_types::{Signal, Symbol, ValueSeries};
use std::fmt::Write as _;
use std::path::Path;
use strategies::CrossoverOutput;

/// The engine responsible for turning a crossover run into a renderable report.
#[derive(Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Joins the price series with the run output into one aligned report.
    ///
    /// Fails with `MisalignedSeries` if any of the derived series does not
    /// share the price series' timestamps.
    pub fn build_report(
        &self,
        symbol: &Symbol,
        prices: &ValueSeries,
        output: &CrossoverOutput,
    ) -> Result<CrossoverReport> {
        prices.ensure_aligned(&output.short_ma)?;
        prices.ensure_aligned(&output.long_ma)?;
        prices.ensure_aligned(&output.signals)?;

        let rows: Vec<ReportRow> = prices
            .iter()
            .zip(output.short_ma.values())
            .zip(output.long_ma.values())
            .zip(output.signals.values())
            .map(|(((price, short_ma), long_ma), signal)| ReportRow {
                timestamp: price.timestamp,
                close: price.value,
                short_ma: *short_ma,
                long_ma: *long_ma,
                signal: *signal,
                signal_code: signal.as_i8(),
            })
            .collect();

        let markers: Vec<SignalMarker> = rows
            .iter()
            .filter(|row| row.signal.is_actionable())
            .map(|row| SignalMarker {
                timestamp: row.timestamp,
                signal: row.signal,
                price: row.close,
            })
            .collect();

        let summary = ReportSummary {
            observations: prices.len(),
            missing_closes: prices.len() - prices.defined_count(),
            short_window: output.params.short_window,
            long_window: output.params.long_window,
            warmup: output.params.warmup,
            short_ma_defined: output.short_ma.defined_count(),
            long_ma_defined: output.long_ma.defined_count(),
            buy_signals: output.count(Signal::Buy),
            sell_signals: output.count(Signal::Sell),
            first_timestamp: prices.first().map(|obs| obs.timestamp),
            last_timestamp: prices.last().map(|obs| obs.timestamp),
        };

        tracing::debug!(
            symbol = %symbol,
            rows = rows.len(),
            markers = markers.len(),
            "Built crossover report."
        );

        Ok(CrossoverReport {
            symbol: symbol.clone(),
            summary,
            markers,
            rows,
        })
    }

    pub fn to_json(&self, report: &CrossoverReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Writes the report as pretty JSON, creating parent directories as needed.
    pub fn write_json(&self, report: &CrossoverReport, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json(report)?)?;
        tracing::info!(path = %path.display(), "Report written.");
        Ok(())
    }

    /// Renders a fixed-width text table for the terminal.
    pub fn render_table(&self, report: &CrossoverReport, signals_only: bool) -> String {
        let summary = &report.summary;
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{} | SMA({}) vs SMA({}) | warmup {}",
            report.symbol, summary.short_window, summary.long_window, summary.warmup
        );
        let _ = writeln!(
            out,
            "{:<10}  {:>12}  {:>12}  {:>12}  {:<6}",
            "Date",
            "Close",
            format!("SMA({})", summary.short_window),
            format!("SMA({})", summary.long_window),
            "Signal"
        );
        let _ = writeln!(out, "{}", "-".repeat(60));

        for row in report
            .rows
            .iter()
            .filter(|row| !signals_only || row.signal.is_actionable())
        {
            let _ = writeln!(
                out,
                "{:<10}  {:>12}  {:>12}  {:>12}  {:<6}",
                row.timestamp.format("%Y-%m-%d"),
                cell(row.close),
                cell(row.short_ma),
                cell(row.long_ma),
                if row.signal.is_actionable() { row.signal.to_string() } else { String::new() }
            );
        }

        let _ = writeln!(out, "{}", "-".repeat(60));
        let _ = writeln!(
            out,
            "{} observations ({} missing) | {} buy | {} sell",
            summary.observations, summary.missing_closes, summary.buy_signals, summary.sell_signals
        );
        out
    }
}

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}
