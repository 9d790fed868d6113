//! Partition scoring.
//!
//! Pure helpers used to score candidate partitions and to rank them.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Balance rate | total work / (stations × max load) × 100 |
//! | Variance | mean of squared deviations of station loads |
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 2.2

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{BalanceError, BalanceResult};

/// Population variance of station workloads.
///
/// Returns `f64::INFINITY` for an empty slice: an empty partition has no
/// meaningful spread and must never win a variance tie-break.
pub fn variance(workloads: &[f64]) -> f64 {
    if workloads.is_empty() {
        return f64::INFINITY;
    }
    let n = workloads.len() as f64;
    let mean = workloads.iter().sum::<f64>() / n;
    workloads.iter().map(|w| (w - mean).powi(2)).sum::<f64>() / n
}

/// Balance rate in percent: `total_work / (station_count * max_load) * 100`.
///
/// # Errors
/// [`BalanceError::UndefinedBalanceRate`] when `station_count == 0` or
/// `max_load` is not positive.
pub fn balance_rate(total_work: f64, station_count: usize, max_load: f64) -> BalanceResult<f64> {
    if station_count == 0 || max_load <= 0.0 || max_load.is_nan() {
        return Err(BalanceError::UndefinedBalanceRate {
            station_count,
            max_load,
        });
    }
    Ok(total_work / (station_count as f64 * max_load) * 100.0)
}

/// Largest workload, or 0 for an empty slice.
pub fn max_load(workloads: &[f64]) -> f64 {
    workloads.iter().copied().fold(0.0, f64::max)
}

/// Score of one candidate partition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionScore {
    /// Balance rate (percent). Higher is better.
    pub balance_rate: f64,
    /// Workload variance. Lower is better.
    pub variance: f64,
}

impl PartitionScore {
    /// Scores a list of station workloads.
    ///
    /// A non-empty line whose loads are all zero has no idle time and is
    /// scored as perfectly balanced.
    pub fn evaluate(workloads: &[f64]) -> Self {
        let total: f64 = workloads.iter().sum();
        let balance_rate = match balance_rate(total, workloads.len(), max_load(workloads)) {
            Ok(rate) => rate,
            Err(_) if !workloads.is_empty() => 100.0,
            Err(_) => 0.0,
        };
        Self {
            balance_rate,
            variance: variance(workloads),
        }
    }

    /// Ranks `self` against `other`. `Ordering::Less` means `self` ranks ahead.
    ///
    /// Balance rates closer than `tolerance` percentage points tie, and the
    /// lower variance wins.
    pub fn rank(&self, other: &Self, tolerance: f64) -> Ordering {
        if (self.balance_rate - other.balance_rate).abs() < tolerance {
            self.variance.total_cmp(&other.variance)
        } else {
            other.balance_rate.total_cmp(&self.balance_rate)
        }
    }

    /// Whether `self` strictly outranks `other`.
    #[inline]
    pub fn beats(&self, other: &Self, tolerance: f64) -> bool {
        self.rank(other, tolerance) == Ordering::Less
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_basic() {
        assert!((variance(&[40.0, 50.0]) - 25.0).abs() < 1e-10);
        assert!((variance(&[10.0, 10.0, 10.0]) - 0.0).abs() < 1e-10);
        // mean 4 → (9 + 1 + 1 + 9) / 4
        assert!((variance(&[1.0, 3.0, 5.0, 7.0]) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_variance_empty_is_infinite() {
        assert!(variance(&[]).is_infinite());
    }

    #[test]
    fn test_balance_rate() {
        assert!((balance_rate(50.0, 2, 40.0).unwrap() - 62.5).abs() < 1e-10);
        assert!((balance_rate(70.0, 2, 50.0).unwrap() - 70.0).abs() < 1e-10);
        assert!((balance_rate(30.0, 1, 30.0).unwrap() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_balance_rate_undefined() {
        assert!(matches!(
            balance_rate(10.0, 0, 10.0),
            Err(BalanceError::UndefinedBalanceRate { station_count: 0, .. })
        ));
        assert!(matches!(
            balance_rate(0.0, 3, 0.0),
            Err(BalanceError::UndefinedBalanceRate { .. })
        ));
    }

    #[test]
    fn test_max_load() {
        assert!((max_load(&[3.0, 9.0, 4.0]) - 9.0).abs() < 1e-10);
        assert!((max_load(&[]) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_evaluate_zero_work_line() {
        let score = PartitionScore::evaluate(&[0.0, 0.0]);
        assert!((score.balance_rate - 100.0).abs() < 1e-10);
        assert!((score.variance - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_rank_by_balance_rate() {
        let a = PartitionScore {
            balance_rate: 90.0,
            variance: 50.0,
        };
        let b = PartitionScore {
            balance_rate: 80.0,
            variance: 1.0,
        };
        assert_eq!(a.rank(&b, 0.1), Ordering::Less);
        assert_eq!(b.rank(&a, 0.1), Ordering::Greater);
        assert!(a.beats(&b, 0.1));
    }

    #[test]
    fn test_rank_tie_band_uses_variance() {
        let a = PartitionScore {
            balance_rate: 90.05,
            variance: 10.0,
        };
        let b = PartitionScore {
            balance_rate: 90.0,
            variance: 4.0,
        };
        // 0.05 < 0.1 → tie on rate, b has lower variance
        assert_eq!(b.rank(&a, 0.1), Ordering::Less);
        assert!(!a.beats(&b, 0.1));
    }

    #[test]
    fn test_rank_equal_scores() {
        let a = PartitionScore {
            balance_rate: 75.0,
            variance: 2.0,
        };
        assert_eq!(a.rank(&a, 0.1), Ordering::Equal);
        assert!(!a.beats(&a, 0.1));
    }
}
