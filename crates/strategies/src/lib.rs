// In crates/strategies/src/lib.rs

use core_types::{Result, ValueSeries};
pub mod ma_crossover;
pub mod moving_average;
pub mod types;

pub use types::{CrossoverOutput, CrossoverParams, MACrossoverSettings};

/// The universal interface for a signal generator.
///
/// A generator takes a complete, time-ordered price series and produces the
/// derived indicator series together with the discrete signal series. Unlike a
/// live strategy it holds no state between calls: the same input always
/// yields the same output.
pub trait SignalGenerator {
    /// The name of the generator.
    fn name(&self) -> &'static str;

    fn generate(&self, prices: &ValueSeries) -> Result<CrossoverOutput>;
}
