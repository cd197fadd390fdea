// In crates/strategies/src/moving_average.rs

use core_types::{Error, Result, ValueSeries};

/// Computes the simple moving average of `series` over `window` observations.
///
/// The result has the same timestamps as the input. A position is defined
/// only when it closes a run of `window` consecutive defined inputs; all
/// other positions are `None`. Non-finite inputs count as missing.
pub fn compute(series: &ValueSeries, window: usize) -> Result<ValueSeries> {
    if window == 0 {
        return Err(Error::InvalidParameter(
            "moving average window must be at least 1, got 0".into(),
        ));
    }

    if series.len() < window {
        tracing::debug!(
            window,
            available = series.len(),
            "Not enough observations for a single defined average."
        );
        return series.derive(vec![None; series.len()]);
    }

    let inputs: Vec<Option<f64>> = series
        .values()
        .map(|value| (*value).filter(|v| v.is_finite()))
        .collect();

    // Length of the current run of defined inputs. A window is only averaged
    // once it lies entirely inside one run.
    let mut run = 0usize;
    let values = inputs
        .iter()
        .enumerate()
        .map(|(i, value)| {
            run = if value.is_some() { run + 1 } else { 0 };
            (run >= window).then(|| window_mean(&inputs[i + 1 - window..=i]))
        })
        .collect();

    series.derive(values)
}

/// Mean of a fully defined window, summed afresh so that values which have
/// left the window leave no rounding behind.
fn window_mean(window: &[Option<f64>]) -> f64 {
    window.iter().flatten().sum::<f64>() / window.len() as f64
}
