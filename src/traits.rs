//! Core traits for running median estimators
//!
//! Every estimator implements the base [`Estimator`] trait, which covers
//! ingestion and bookkeeping. [`MedianEstimator`] adds the median query and
//! [`QuantileEstimator`] the general rank query for estimators that can
//! answer it exactly.

use crate::value::MedianValue;
use core::fmt::Debug;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Error returned by a median or quantile query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedianError {
    /// No value has been added yet
    Empty,
}

impl core::fmt::Display for MedianError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MedianError::Empty => write!(f, "median of an empty stream is undefined"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MedianError {}

/// Error returned when a value cannot be ordered against the rest of the stream
///
/// The estimator is left exactly as it was before the rejected call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidValue {
    /// Value is NaN
    NaN,
    /// Value is positive or negative infinity
    Infinite,
}

impl core::fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InvalidValue::NaN => write!(f, "invalid value: NaN has no total order"),
            InvalidValue::Infinite => write!(f, "invalid value: value is not finite"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidValue {}

/// Core trait for all stream estimators
pub trait Estimator: Clone + Debug {
    /// The type of value this estimator ingests
    type Value: MedianValue;

    /// Add a value to the estimator
    ///
    /// Returns an error, and changes nothing, if the value is not finite.
    fn add(&mut self, value: Self::Value) -> Result<(), InvalidValue>;

    /// Reset estimator to empty state
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of values added
    fn count(&self) -> u64;

    /// Check if estimator is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Estimators that can report the median of everything seen so far
pub trait MedianEstimator: Estimator {
    /// Median of all values added so far
    ///
    /// For an even count this is the mean of the two middle values, so the
    /// result is a float even for integer streams.
    fn median(&self) -> Result<f64, MedianError>;

    /// Median, or `default` if the stream is empty
    fn median_or(&self, default: f64) -> f64 {
        self.median().unwrap_or(default)
    }
}

/// Estimators that can answer arbitrary rank queries exactly
pub trait QuantileEstimator: MedianEstimator {
    /// Value at the given rank (0.0 to 1.0), interpolating between neighbours
    ///
    /// rank=0.5 agrees with [`MedianEstimator::median`]
    fn quantile(&self, rank: f64) -> Result<f64, MedianError>;

    /// Get multiple quantiles at once
    fn quantiles(&self, ranks: &[f64]) -> Vec<Result<f64, MedianError>> {
        ranks.iter().map(|&r| self.quantile(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            MedianError::Empty.to_string(),
            "median of an empty stream is undefined"
        );
        assert!(InvalidValue::NaN.to_string().contains("NaN"));
        assert!(InvalidValue::Infinite.to_string().contains("not finite"));
    }
}
