// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A ticker symbol as understood by the quote provider (e.g., "AAPL").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The discrete outcome of the crossover rule at a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Signal {
    /// The conventional numeric encoding: `+1` buy, `-1` sell, `0` hold.
    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }

    pub fn is_actionable(self) -> bool {
        self != Signal::Hold
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
        };
        f.write_str(label)
    }
}

/// A single timestamped value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation<T> {
    pub timestamp: DateTime<Utc>,
    pub value: T,
}

impl<T> Observation<T> {
    pub fn new(timestamp: DateTime<Utc>, value: T) -> Self {
        Self { timestamp, value }
    }
}

/// An immutable, strictly time-ordered sequence of observations.
///
/// Series are never mutated once built. Derived series (moving averages,
/// signals) are created with [`TimeSeries::derive`], which reuses the
/// timestamp index of the source so that alignment holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries<T> {
    observations: Vec<Observation<T>>,
}

/// A numeric series where `None` marks a missing or undefined value.
pub type ValueSeries = TimeSeries<Option<f64>>;

/// The output of the crossover rule.
pub type SignalSeries = TimeSeries<Signal>;

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        Self { observations: Vec::new() }
    }
}

impl<T> TimeSeries<T> {
    /// Builds a series, rejecting duplicate or out-of-order timestamps.
    pub fn new(observations: Vec<Observation<T>>) -> Result<Self> {
        if let Some(index) = observations
            .windows(2)
            .position(|pair| pair[1].timestamp <= pair[0].timestamp)
        {
            return Err(Error::UnorderedTimestamps { index: index + 1 });
        }
        Ok(Self { observations })
    }

    /// Builds a series from parallel timestamp and value vectors.
    pub fn from_parts(timestamps: Vec<DateTime<Utc>>, values: Vec<T>) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(Error::MisalignedSeries {
                reason: format!(
                    "{} timestamps but {} values",
                    timestamps.len(),
                    values.len()
                ),
            });
        }
        let observations = timestamps
            .into_iter()
            .zip(values)
            .map(|(timestamp, value)| Observation { timestamp, value })
            .collect();
        Self::new(observations)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Positional access.
    pub fn get(&self, index: usize) -> Option<&Observation<T>> {
        self.observations.get(index)
    }

    /// Lookup by timestamp.
    pub fn value_at(&self, timestamp: &DateTime<Utc>) -> Option<&T> {
        self.observations
            .binary_search_by(|obs| obs.timestamp.cmp(timestamp))
            .ok()
            .map(|index| &self.observations[index].value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation<T>> {
        self.observations.iter()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.observations.iter().map(|obs| obs.timestamp)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.observations.iter().map(|obs| &obs.value)
    }

    pub fn first(&self) -> Option<&Observation<T>> {
        self.observations.first()
    }

    pub fn last(&self) -> Option<&Observation<T>> {
        self.observations.last()
    }

    /// Creates a new series over this series' timestamps with the given values.
    pub fn derive<U>(&self, values: Vec<U>) -> Result<TimeSeries<U>> {
        if values.len() != self.len() {
            return Err(Error::MisalignedSeries {
                reason: format!(
                    "derived series has {} values, source has {}",
                    values.len(),
                    self.len()
                ),
            });
        }
        let observations = self
            .observations
            .iter()
            .zip(values)
            .map(|(obs, value)| Observation {
                timestamp: obs.timestamp,
                value,
            })
            .collect();
        Ok(TimeSeries { observations })
    }

    /// Checks that both series share the same length and timestamp sequence.
    pub fn ensure_aligned<U>(&self, other: &TimeSeries<U>) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::MisalignedSeries {
                reason: format!("lengths differ ({} vs {})", self.len(), other.len()),
            });
        }
        if let Some(index) = self
            .timestamps()
            .zip(other.timestamps())
            .position(|(a, b)| a != b)
        {
            return Err(Error::MisalignedSeries {
                reason: format!("timestamps differ at index {}", index),
            });
        }
        Ok(())
    }
}

impl ValueSeries {
    /// Number of positions carrying a defined value.
    pub fn defined_count(&self) -> usize {
        self.values().filter(|v| v.is_some()).count()
    }
}

impl<'a, T> IntoIterator for &'a TimeSeries<T> {
    type Item = &'a Observation<T>;
    type IntoIter = std::slice::Iter<'a, Observation<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 3, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn series(values: &[Option<f64>]) -> ValueSeries {
        let timestamps = (0..values.len() as i64).map(day).collect();
        TimeSeries::from_parts(timestamps, values.to_vec()).unwrap()
    }

    #[test]
    fn test_rejects_duplicate_timestamps() {
        let err = TimeSeries::new(vec![
            Observation::new(day(0), 1.0),
            Observation::new(day(1), 2.0),
            Observation::new(day(1), 3.0),
        ])
        .unwrap_err();
        assert_eq!(err, Error::UnorderedTimestamps { index: 2 });
    }

    #[test]
    fn test_rejects_reordered_timestamps() {
        let err = TimeSeries::new(vec![
            Observation::new(day(1), 1.0),
            Observation::new(day(0), 2.0),
        ])
        .unwrap_err();
        assert_eq!(err, Error::UnorderedTimestamps { index: 1 });
    }

    #[test]
    fn test_from_parts_length_mismatch() {
        let err = TimeSeries::from_parts(vec![day(0), day(1)], vec![1.0]).unwrap_err();
        assert!(matches!(err, Error::MisalignedSeries { .. }));
    }

    #[test]
    fn test_empty_series_is_valid() {
        let s: ValueSeries = TimeSeries::new(Vec::new()).unwrap();
        assert!(s.is_empty());
        assert_eq!(s.len(), 0);
        assert!(s.first().is_none());
    }

    #[test]
    fn test_lookup_by_position_and_timestamp() {
        let s = series(&[Some(1.0), None, Some(3.0)]);
        assert_eq!(s.get(2).unwrap().value, Some(3.0));
        assert_eq!(s.value_at(&day(1)), Some(&None));
        assert_eq!(s.value_at(&day(0)), Some(&Some(1.0)));
        assert_eq!(s.value_at(&day(7)), None);
        assert_eq!(s.defined_count(), 2);
    }

    #[test]
    fn test_derive_keeps_timestamps_and_source() {
        let s = series(&[Some(1.0), Some(2.0)]);
        let derived = s.derive(vec![Signal::Hold, Signal::Buy]).unwrap();
        assert!(s.ensure_aligned(&derived).is_ok());
        assert_eq!(derived.get(1).unwrap().value, Signal::Buy);
        // The source is untouched.
        assert_eq!(s.get(1).unwrap().value, Some(2.0));

        assert!(s.derive(vec![Signal::Hold]).is_err());
    }

    #[test]
    fn test_alignment_detects_shifted_timestamps() {
        let a = series(&[Some(1.0), Some(2.0)]);
        let b = TimeSeries::from_parts(vec![day(0), day(5)], vec![Some(1.0), Some(2.0)]).unwrap();
        let err = a.ensure_aligned(&b).unwrap_err();
        assert!(matches!(err, Error::MisalignedSeries { .. }));

        let shorter = series(&[Some(1.0)]);
        assert!(a.ensure_aligned(&shorter).is_err());
    }

    #[test]
    fn test_signal_encoding() {
        assert_eq!(Signal::Buy.as_i8(), 1);
        assert_eq!(Signal::Sell.as_i8(), -1);
        assert_eq!(Signal::Hold.as_i8(), 0);
        assert_eq!(Signal::default(), Signal::Hold);
        assert!(!Signal::Hold.is_actionable());
        assert_eq!(Signal::Sell.to_string(), "SELL");
    }
}
