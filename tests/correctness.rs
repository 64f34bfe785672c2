//! Correctness and invariant tests for streammedian
//!
//! These tests check the properties that must hold after every insert, for
//! every estimator: agreement with a sort-on-query reference, order
//! independence, duplicate handling and the failure contract. They complement
//! the unit tests in each module.
//!
//! Run with: cargo test --test correctness --features full

// Require all estimator families
#[cfg(not(all(feature = "two-heap", feature = "sorted")))]
compile_error!(
    "Correctness tests require all features. Run: cargo test --test correctness --features full"
);

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use streammedian::median::{SortedMedian, TwoHeapMedian};
use streammedian::traits::{
    Estimator, InvalidValue, MedianError, MedianEstimator, QuantileEstimator,
};

/// Sort-on-query reference median
fn brute_force_median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Checks both half invariants of a two-heap estimator
fn assert_halves_consistent<T>(estimator: &TwoHeapMedian<T>, seen: usize)
where
    T: streammedian::value::MedianValue + PartialOrd,
{
    let lower = estimator.lower_len();
    let upper = estimator.upper_len();
    assert_eq!(lower + upper, seen, "values lost or duplicated");
    assert!(
        lower == upper || lower == upper + 1,
        "halves out of balance: lower={} upper={}",
        lower,
        upper
    );
    if let (Some(max), Some(min)) = (estimator.lower_max(), estimator.upper_min()) {
        assert!(max <= min, "halves out of order: {:?} > {:?}", max, min);
    }
}

fn random_values(seed: u64, n: usize, range: core::ops::Range<i64>) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(range.clone()) as f64).collect()
}

// ============================================================================
// Two-Heap Median
// ============================================================================

mod two_heap {
    use super::*;

    #[test]
    fn reference_scenarios() {
        let cases: [(&[i32], f64); 4] = [
            (&[5], 5.0),
            (&[5, 2], 3.5),
            (&[5, 2, 8], 5.0),
            (&[1, 1, 1, 1], 1.0),
        ];
        for (values, expected) in cases {
            let estimator = TwoHeapMedian::try_from_values(values.iter().copied()).unwrap();
            assert_eq!(estimator.median(), Ok(expected), "input {:?}", values);
        }
    }

    #[test]
    fn running_medians_with_outliers() {
        let mut estimator = TwoHeapMedian::new();
        let expected = [-5.0, 2.5, -5.0, 2.5, 0.0];
        for (value, want) in [-5, 10, -5, 10, 0].into_iter().zip(expected) {
            estimator.add(value).unwrap();
            assert_eq!(estimator.median(), Ok(want), "after adding {}", value);
        }
    }

    #[test]
    fn empty_query_fails_and_estimator_recovers() {
        let mut estimator = TwoHeapMedian::<i64>::new();
        assert_eq!(estimator.median(), Err(MedianError::Empty));
        assert_eq!(estimator.median(), Err(MedianError::Empty));

        estimator.add(3).unwrap();
        estimator.add(4).unwrap();
        assert_eq!(estimator.median(), Ok(3.5));
    }

    #[test]
    fn invariants_hold_after_every_insert() {
        let orders: Vec<(&str, Vec<f64>)> = vec![
            ("ascending", (0..500).map(f64::from).collect()),
            ("descending", (0..500).rev().map(f64::from).collect()),
            ("duplicates", vec![7.0; 500]),
            (
                "outliers",
                (0..500)
                    .map(|i| if i % 50 == 0 { 1e12 } else { f64::from(i % 7) })
                    .collect(),
            ),
            ("random", random_values(7, 500, -1000..1000)),
        ];

        for (name, values) in orders {
            let mut estimator = TwoHeapMedian::new();
            for (i, &v) in values.iter().enumerate() {
                estimator.add(v).unwrap();
                assert_halves_consistent(&estimator, i + 1);
            }
            assert_eq!(estimator.count(), values.len() as u64, "{}", name);
        }
    }

    #[test]
    fn agrees_with_brute_force_on_every_prefix() {
        for seed in 0..20 {
            let values = random_values(seed, 300, -50..50);
            let mut estimator = TwoHeapMedian::new();
            for (i, &v) in values.iter().enumerate() {
                estimator.add(v).unwrap();
                let expected = brute_force_median(&values[..=i]).unwrap();
                assert_eq!(
                    estimator.median(),
                    Ok(expected),
                    "seed {} prefix {}",
                    seed,
                    i + 1
                );
            }
        }
    }

    #[test]
    fn agrees_with_brute_force_on_fractional_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let values: Vec<f64> = (0..1000).map(|_| rng.gen_range(-1e6..1e6)).collect();
        let mut estimator = TwoHeapMedian::new();
        for (i, &v) in values.iter().enumerate() {
            estimator.add(v).unwrap();
            let expected = brute_force_median(&values[..=i]).unwrap();
            let actual = estimator.median().unwrap();
            assert!(
                (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                "prefix {}: {} vs {}",
                i + 1,
                actual,
                expected
            );
        }
    }

    #[test]
    fn final_median_is_order_independent() {
        let mut values = random_values(99, 257, -20..20);
        let expected = brute_force_median(&values).unwrap();
        let mut rng = StdRng::seed_from_u64(1234);

        for _ in 0..25 {
            values.shuffle(&mut rng);
            let estimator = TwoHeapMedian::try_from_values(values.iter().copied()).unwrap();
            assert_eq!(estimator.median(), Ok(expected));
        }
    }

    #[test]
    fn repeated_value_matches_any_order_of_equal_values() {
        let mut one_by_one = TwoHeapMedian::new();
        for _ in 0..101 {
            one_by_one.add(-2.5f32).unwrap();
        }
        assert_eq!(one_by_one.median(), Ok(-2.5));
        assert_eq!(one_by_one.lower_len(), 51);
        assert_eq!(one_by_one.upper_len(), 50);

        // Mixed signed zeros are equal values too
        let zeros = [0.0, -0.0, 0.0, -0.0];
        let estimator = TwoHeapMedian::try_from_values(zeros).unwrap();
        assert_eq!(estimator.median(), Ok(0.0));
    }

    #[test]
    fn rejected_values_leave_state_untouched() {
        let mut estimator = TwoHeapMedian::try_from_values([1.0, 2.0, 3.0]).unwrap();
        let (lower, upper) = (estimator.lower_len(), estimator.upper_len());

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(estimator.add(bad).is_err());
        }
        assert_eq!(estimator.add(-f64::NAN), Err(InvalidValue::NaN));

        assert_eq!(estimator.lower_len(), lower);
        assert_eq!(estimator.upper_len(), upper);
        assert_eq!(estimator.median(), Ok(2.0));
    }

    #[test]
    fn large_magnitudes_do_not_overflow() {
        let estimator = TwoHeapMedian::try_from_values([f64::MAX, f64::MAX * 0.5]).unwrap();
        let median = estimator.median().unwrap();
        assert!(median.is_finite());
        assert_eq!(median, f64::MAX * 0.75);
    }

    #[test]
    fn clear_resets_completely() {
        let mut estimator = TwoHeapMedian::try_from_values(0..100u64).unwrap();
        estimator.clear();

        assert!(estimator.is_empty());
        assert_eq!(estimator.lower_len(), 0);
        assert_eq!(estimator.upper_len(), 0);
        assert_eq!(estimator.median(), Err(MedianError::Empty));
    }
}

// ============================================================================
// Sorted Median
// ============================================================================

mod sorted {
    use super::*;

    #[test]
    fn agrees_with_two_heap_on_every_prefix() {
        let values = random_values(5, 1000, -500..500);
        let mut heaps = TwoHeapMedian::new();
        let mut sorted = SortedMedian::new();

        for &v in &values {
            heaps.add(v).unwrap();
            sorted.add(v).unwrap();
            assert_eq!(heaps.median(), sorted.median());
        }
    }

    #[test]
    fn buffer_is_always_sorted() {
        let values = random_values(11, 400, -100..100);
        let mut sorted = SortedMedian::new();
        for &v in &values {
            sorted.add(v).unwrap();
        }
        assert!(sorted.as_slice().windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(sorted.len(), values.len());
    }

    #[test]
    fn quantile_is_monotonically_nondecreasing() {
        let values = random_values(3, 500, -1000..1000);
        let mut sorted = SortedMedian::new();
        for &v in &values {
            sorted.add(v).unwrap();
        }

        let mut previous = f64::NEG_INFINITY;
        for i in 0..=100 {
            let q = sorted.quantile(i as f64 / 100.0).unwrap();
            assert!(q >= previous, "quantile decreased at rank {}", i);
            previous = q;
        }
    }

    #[test]
    fn quantile_extremes_are_exact() {
        let sorted = {
            let mut s = SortedMedian::new();
            for v in [4, -9, 17, 0, 3] {
                s.add(v).unwrap();
            }
            s
        };
        assert_eq!(sorted.quantile(0.0), Ok(-9.0));
        assert_eq!(sorted.quantile(1.0), Ok(17.0));
    }

    #[test]
    fn quantiles_stay_finite_at_large_magnitudes() {
        let mut sorted = SortedMedian::new();
        for v in [-f64::MAX, -1.0, 1.0, f64::MAX] {
            sorted.add(v).unwrap();
        }

        let mut previous = f64::NEG_INFINITY;
        for i in 0..=20 {
            let q = sorted.quantile(i as f64 / 20.0).unwrap();
            assert!(q.is_finite(), "quantile at rank {} overflowed", i);
            assert!(q >= previous, "quantile decreased at rank {}", i);
            previous = q;
        }
    }

    #[test]
    fn empty_query_fails() {
        let sorted = SortedMedian::<u32>::new();
        assert_eq!(sorted.median(), Err(MedianError::Empty));
        assert_eq!(sorted.quantile(0.9), Err(MedianError::Empty));
    }
}
