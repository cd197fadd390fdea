// In crates/strategies/src/ma_crossover.rs

use crate::moving_average;
use crate::types::{CrossoverOutput, CrossoverParams, MACrossoverSettings};
use crate::SignalGenerator;
use core_types::{Error, Result, Signal, SignalSeries, ValueSeries};
use itertools::Itertools;

/// Emits a signal at each position where the short average crosses the long one.
///
/// A position yields `Buy` when the short average moves from at-or-below to
/// strictly above the long average, and `Sell` for the symmetric move. Every
/// position before `warmup`, and every position where the current or the
/// previous value of either average is undefined, yields `Hold`.
///
/// Both series must share the same timestamps; otherwise
/// `Error::MisalignedSeries` is returned.
pub fn generate(short_ma: &ValueSeries, long_ma: &ValueSeries, warmup: usize) -> Result<SignalSeries> {
    short_ma.ensure_aligned(long_ma)?;

    let mut signals = vec![Signal::Hold; short_ma.len()];

    // Walk consecutive (previous, current) pairs; position 0 has no
    // predecessor and always stays Hold.
    let pairs = short_ma.values().zip(long_ma.values()).tuple_windows::<(_, _)>();
    for (offset, (previous, current)) in pairs.enumerate() {
        let position = offset + 1;
        if position < warmup {
            continue;
        }
        signals[position] = crossover(previous, current);
    }

    short_ma.derive(signals)
}

/// The crossover rule for a single pair of consecutive positions.
fn crossover(previous: (&Option<f64>, &Option<f64>), current: (&Option<f64>, &Option<f64>)) -> Signal {
    let (Some(prev_short), Some(prev_long), Some(short), Some(long)) =
        (*previous.0, *previous.1, *current.0, *current.1)
    else {
        return Signal::Hold;
    };

    if short > long && prev_short <= prev_long {
        // Bullish crossover: short line just crossed above the long line.
        Signal::Buy
    } else if short < long && prev_short >= prev_long {
        // Bearish crossover: short line just crossed below the long line.
        Signal::Sell
    } else {
        Signal::Hold
    }
}

/// The dual moving-average crossover generator.
#[derive(Debug, Clone)]
pub struct MACrossover {
    /// The validated core parameters.
    params: CrossoverParams,
}

impl MACrossover {
    /// Creates a new `MACrossover` from its settings, validating them.
    pub fn new(settings: MACrossoverSettings) -> Result<Self> {
        let params = settings.validate()?;
        if params.short_window >= params.long_window {
            tracing::warn!(
                short_window = params.short_window,
                long_window = params.long_window,
                "Short window is not smaller than the long window."
            );
        }
        Ok(Self { params })
    }

    /// Runs both averages and the crossover rule over a price series.
    pub fn run(&self, prices: &ValueSeries) -> Result<CrossoverOutput> {
        let CrossoverParams {
            short_window,
            long_window,
            warmup,
        } = self.params;

        tracing::info!(
            short_window,
            long_window,
            warmup,
            observations = prices.len(),
            "Running moving-average crossover."
        );
        if prices.len() < long_window {
            // Degenerate but valid: the run still returns all-Hold output.
            let shortfall = Error::InsufficientData {
                required: long_window,
                available: prices.len(),
            };
            tracing::warn!(error = %shortfall, "Every position will be Hold.");
        }

        // The two averages share nothing, so they can be computed side by side.
        let (short_ma, long_ma) = rayon::join(
            || moving_average::compute(prices, short_window),
            || moving_average::compute(prices, long_window),
        );
        let short_ma = short_ma?;
        let long_ma = long_ma?;

        let signals = generate(&short_ma, &long_ma, warmup)?;

        let output = CrossoverOutput {
            params: self.params,
            short_ma,
            long_ma,
            signals,
        };
        tracing::info!(
            buys = output.count(Signal::Buy),
            sells = output.count(Signal::Sell),
            "Signal generation finished."
        );

        Ok(output)
    }
}

impl SignalGenerator for MACrossover {
    fn name(&self) -> &'static str {
        "MACrossover"
    }

    fn generate(&self, prices: &ValueSeries) -> Result<CrossoverOutput> {
        self.run(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use core_types::TimeSeries;
    use Signal::{Buy, Hold, Sell};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 3, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn series(values: &[Option<f64>]) -> ValueSeries {
        let timestamps = (0..values.len() as i64).map(day).collect();
        TimeSeries::from_parts(timestamps, values.to_vec()).unwrap()
    }

    fn defined(values: &[f64]) -> ValueSeries {
        series(&values.iter().copied().map(Some).collect::<Vec<_>>())
    }

    fn signals(s: &SignalSeries) -> Vec<Signal> {
        s.values().copied().collect()
    }

    // ---------------------------------------------------------
    // 1. Crossover detection
    // ---------------------------------------------------------
    #[test]
    fn test_buy_and_sell_at_crossings() {
        let short = defined(&[1.0, 1.0, 3.0, 3.0, 1.0, 1.0]);
        let long = defined(&[2.0; 6]);
        let out = generate(&short, &long, 0).unwrap();
        assert_eq!(signals(&out), vec![Hold, Hold, Buy, Hold, Sell, Hold]);
    }

    #[test]
    fn test_equality_is_never_a_signal() {
        let short = defined(&[2.0, 2.0, 2.0]);
        let long = defined(&[2.0, 2.0, 2.0]);
        for warmup in 0..5 {
            let out = generate(&short, &long, warmup).unwrap();
            assert_eq!(signals(&out), vec![Hold, Hold, Hold]);
        }
    }

    #[test]
    fn test_equality_can_precede_a_crossing() {
        // Touch, then cross above; touch, then cross below.
        let short = defined(&[2.0, 3.0, 2.0, 1.0]);
        let long = defined(&[2.0; 4]);
        let out = generate(&short, &long, 0).unwrap();
        assert_eq!(signals(&out), vec![Hold, Buy, Hold, Sell]);
    }

    #[test]
    fn test_no_double_fire_while_above() {
        let short = defined(&[1.0, 3.0, 4.0, 5.0, 6.0, 1.0, 0.5]);
        let long = defined(&[2.0; 7]);
        let out = generate(&short, &long, 0).unwrap();
        assert_eq!(signals(&out), vec![Hold, Buy, Hold, Hold, Hold, Sell, Hold]);
    }

    // ---------------------------------------------------------
    // 2. Warmup and undefined values
    // ---------------------------------------------------------
    #[test]
    fn test_warmup_masks_early_crossings() {
        let short = defined(&[1.0, 1.0, 3.0, 3.0, 1.0, 1.0]);
        let long = defined(&[2.0; 6]);
        let out = generate(&short, &long, 3).unwrap();
        // The Buy at index 2 is masked; the Sell at index 4 survives.
        assert_eq!(signals(&out), vec![Hold, Hold, Hold, Hold, Sell, Hold]);

        let out = generate(&short, &long, 100).unwrap();
        assert!(signals(&out).iter().all(|s| *s == Hold));
    }

    #[test]
    fn test_undefined_values_yield_hold() {
        // Index 2 would be a Buy, but the previous long value is undefined.
        let short = series(&[Some(1.0), Some(1.0), Some(3.0), Some(1.0)]);
        let long = series(&[None, None, Some(2.0), Some(2.0)]);
        let out = generate(&short, &long, 0).unwrap();
        assert_eq!(signals(&out), vec![Hold, Hold, Hold, Sell]);
    }

    #[test]
    fn test_undefined_is_not_read_as_zero() {
        // If the missing long values were zeros, index 2 would be a Sell.
        let short = defined(&[-1.0, -1.0, -1.0]);
        let long = series(&[None, None, Some(0.0)]);
        let out = generate(&short, &long, 0).unwrap();
        assert_eq!(signals(&out), vec![Hold, Hold, Hold]);
    }

    // ---------------------------------------------------------
    // 3. Errors and purity
    // ---------------------------------------------------------
    #[test]
    fn test_misaligned_lengths_are_rejected() {
        let short = defined(&[1.0, 2.0, 3.0]);
        let long = defined(&[1.0, 2.0]);
        let err = generate(&short, &long, 0).unwrap_err();
        assert!(matches!(err, Error::MisalignedSeries { .. }));
    }

    #[test]
    fn test_misaligned_timestamps_are_rejected() {
        let short = defined(&[1.0, 2.0]);
        let long = TimeSeries::from_parts(vec![day(0), day(2)], vec![Some(1.0), Some(2.0)]).unwrap();
        let err = generate(&short, &long, 0).unwrap_err();
        assert!(matches!(err, Error::MisalignedSeries { .. }));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let short = defined(&[1.0, 3.0, 1.0, 3.0, 1.0]);
        let long = defined(&[2.0; 5]);
        let first = generate(&short, &long, 0).unwrap();
        let second = generate(&short, &long, 0).unwrap();
        assert_eq!(first, second);
        assert!(short.ensure_aligned(&first).is_ok());
    }

    #[test]
    fn test_empty_and_single_inputs() {
        let empty = generate(&ValueSeries::empty(), &ValueSeries::empty(), 0).unwrap();
        assert!(empty.is_empty());

        let one = generate(&defined(&[3.0]), &defined(&[2.0]), 0).unwrap();
        assert_eq!(signals(&one), vec![Hold]);
    }

    // ---------------------------------------------------------
    // 4. End-to-end through MACrossover
    // ---------------------------------------------------------
    fn strategy(short: i64, long: i64, warmup: Option<i64>) -> MACrossover {
        MACrossover::new(MACrossoverSettings {
            short_window: short,
            long_window: long,
            warmup,
        })
        .unwrap()
    }

    #[test]
    fn test_run_produces_aligned_output() {
        // Falls, then rallies, then falls again.
        let prices = defined(&[10.0, 9.0, 8.0, 7.0, 8.0, 10.0, 12.0, 11.0, 8.0, 6.0, 5.0]);
        let out = strategy(2, 4, None).run(&prices).unwrap();

        assert!(prices.ensure_aligned(&out.short_ma).is_ok());
        assert!(prices.ensure_aligned(&out.long_ma).is_ok());
        assert!(prices.ensure_aligned(&out.signals).is_ok());
        assert_eq!(out.short_ma.defined_count(), 10);
        assert_eq!(out.long_ma.defined_count(), 8);

        // short: -, 9.5, 8.5, 7.5, 7.5, 9, 11, 11.5, 9.5, 7, 5.5
        // long:  -, -, -, 8.5, 8, 8.25, 9.25, 10.25, 10.25, 9.25, 7.5
        assert_eq!(
            signals(&out.signals),
            vec![Hold, Hold, Hold, Hold, Hold, Buy, Hold, Hold, Sell, Hold, Hold]
        );
        assert_eq!(out.count(Buy), 1);
        assert_eq!(out.count(Sell), 1);
    }

    #[test]
    fn test_run_on_short_input_is_all_hold() {
        let prices = defined(&[1.0, 2.0, 3.0]);
        let out = strategy(2, 5, None).run(&prices).unwrap();
        assert_eq!(out.long_ma.defined_count(), 0);
        assert_eq!(signals(&out.signals), vec![Hold, Hold, Hold]);
    }

    #[test]
    fn test_run_with_maximal_long_window_is_all_hold() {
        let prices = defined(&[1.0, 2.0, 3.0, 4.0]);
        let out = strategy(2, i64::MAX, Some(0)).run(&prices).unwrap();
        assert_eq!(out.long_ma.defined_count(), 0);
        assert_eq!(out.short_ma.defined_count(), 3);
        assert_eq!(signals(&out.signals), vec![Hold; 4]);
    }

    #[test]
    fn test_invalid_settings_fail_construction() {
        let err = MACrossover::new(MACrossoverSettings {
            short_window: 0,
            long_window: 5,
            warmup: None,
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }

    #[test]
    fn test_trait_object_dispatch() {
        let generator: Box<dyn SignalGenerator> = Box::new(strategy(1, 2, Some(0)));
        assert_eq!(generator.name(), "MACrossover");
        let out = generator.generate(&defined(&[1.0, 3.0, 1.0])).unwrap();
        // short = price; long: -, 2, 2
        assert_eq!(signals(&out.signals), vec![Hold, Hold, Sell]);
    }
}
