//! Sorted-buffer median
//!
//! Keeps every value in one sorted vector. Inserts shift the tail of the
//! vector, so they cost O(n), but any rank can then be read directly. Useful
//! when queries far outnumber inserts, or when quantiles other than the
//! median are needed.

use crate::traits::{Estimator, InvalidValue, MedianError, MedianEstimator, QuantileEstimator};
use crate::value::{midpoint, MedianValue};
use core::cmp::Ordering;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Exact running median and quantiles over a sorted buffer
///
/// - O(n) insertion (binary search plus shift)
/// - O(1) median and quantile queries
/// - O(n) memory
///
/// # Example
///
/// ```
/// use streammedian::median::SortedMedian;
/// use streammedian::traits::{Estimator, MedianEstimator, QuantileEstimator};
///
/// let mut sorted = SortedMedian::new();
/// for value in [7, 1, 4, 10] {
///     sorted.add(value).unwrap();
/// }
///
/// assert_eq!(sorted.median(), Ok(5.5));
/// assert_eq!(sorted.quantile(0.0), Ok(1.0));
/// assert_eq!(sorted.quantile(1.0), Ok(10.0));
/// assert_eq!(sorted.as_slice(), &[1, 4, 7, 10]);
/// ```
#[derive(Clone, Debug)]
pub struct SortedMedian<T: MedianValue> {
    values: Vec<T>,
}

impl<T: MedianValue> Default for SortedMedian<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: MedianValue> SortedMedian<T> {
    /// Create an empty estimator
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Create an empty estimator with room for `capacity` values before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Number of values seen
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// All values seen, in ascending order
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Smallest value seen
    pub fn min(&self) -> Option<T> {
        self.values.first().copied()
    }

    /// Largest value seen
    pub fn max(&self) -> Option<T> {
        self.values.last().copied()
    }

    /// Value at a fractional position of the sorted buffer
    fn interpolate(&self, position: f64) -> Result<f64, MedianError> {
        let last = self.values.len().checked_sub(1).ok_or(MedianError::Empty)?;
        // position is within [0, last], so truncation is floor
        let below = (position as usize).min(last);
        let above = (below + 1).min(last);
        let fraction = position - below as f64;

        let low = self.values[below].to_f64();
        if fraction <= 0.0 || below == above {
            return Ok(low);
        }
        let high = self.values[above].to_f64();
        // same rounding as median()
        if fraction == 0.5 {
            return Ok(midpoint(low, high));
        }
        let gap = high - low;
        if gap.is_finite() {
            Ok(low + gap * fraction)
        } else {
            // neighbours more than f64::MAX apart
            Ok(low * (1.0 - fraction) + high * fraction)
        }
    }
}

impl<T: MedianValue> Estimator for SortedMedian<T> {
    type Value = T;

    fn add(&mut self, value: T) -> Result<(), InvalidValue> {
        let value = value.validate()?;
        // Insert after any equal values
        let index = self
            .values
            .partition_point(|probe| probe.total_cmp(&value) != Ordering::Greater);
        self.values.insert(index, value);
        Ok(())
    }

    fn clear(&mut self) {
        self.values.clear();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>() + self.values.capacity() * core::mem::size_of::<T>()
    }

    fn count(&self) -> u64 {
        self.values.len() as u64
    }
}

impl<T: MedianValue> MedianEstimator for SortedMedian<T> {
    fn median(&self) -> Result<f64, MedianError> {
        let n = self.values.len();
        if n == 0 {
            return Err(MedianError::Empty);
        }
        let mid = n / 2;
        if n % 2 == 1 {
            Ok(self.values[mid].to_f64())
        } else {
            Ok(midpoint(
                self.values[mid - 1].to_f64(),
                self.values[mid].to_f64(),
            ))
        }
    }
}

impl<T: MedianValue> QuantileEstimator for SortedMedian<T> {
    /// Linear interpolation between closest ranks
    ///
    /// The rank is clamped to [0, 1]; NaN is treated as 0.
    fn quantile(&self, rank: f64) -> Result<f64, MedianError> {
        if self.values.is_empty() {
            return Err(MedianError::Empty);
        }
        let rank = if rank.is_nan() { 0.0 } else { rank.clamp(0.0, 1.0) };
        let position = rank * (self.values.len() - 1) as f64;
        self.interpolate(position)
    }
}
