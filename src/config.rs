//! Balancer configuration.
//!
//! The search caps are heuristic performance guards. They bound the cost of
//! exact search and are documented approximations, not correctness limits.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{BalanceError, BalanceResult};

/// Tuning knobs for [`LineBalancer`](crate::balancer::LineBalancer).
///
/// Deserializes with defaults for any missing field, so a partial JSON or
/// TOML document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    /// Largest step count (bottleneck included) solved by exact search.
    pub exact_search_threshold: usize,
    /// Tiers with at most this many non-bottleneck steps are fully permuted;
    /// larger tiers keep their natural order.
    pub max_permuted_tier_size: usize,
    /// Candidate partitions retained before exact search stops.
    pub max_candidates: usize,
    /// Balance rates closer than this (percentage points) are ties.
    pub balance_rate_tolerance: f64,
    /// Best-effort wall-clock limit for exact search.
    pub time_limit: Option<Duration>,
    /// Search nodes between wall-clock checks when `time_limit` is set.
    pub time_check_interval: u64,
    /// Collect the score of every retained candidate.
    pub trace: bool,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            exact_search_threshold: 12,
            max_permuted_tier_size: 6,
            max_candidates: 10_000,
            balance_rate_tolerance: 0.1,
            time_limit: None,
            time_check_interval: 1024,
            trace: false,
        }
    }
}

impl BalancerConfig {
    /// Sets the exact-search step threshold.
    pub fn with_exact_search_threshold(mut self, threshold: usize) -> Self {
        self.exact_search_threshold = threshold;
        self
    }

    /// Sets the largest fully permuted tier size.
    pub fn with_max_permuted_tier_size(mut self, size: usize) -> Self {
        self.max_permuted_tier_size = size;
        self
    }

    /// Sets the retained candidate cap.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    /// Sets the balance-rate tie band.
    pub fn with_balance_rate_tolerance(mut self, tolerance: f64) -> Self {
        self.balance_rate_tolerance = tolerance;
        self
    }

    /// Sets a wall-clock limit for exact search.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Sets how many search nodes pass between wall-clock checks.
    ///
    /// A higher value lowers overhead but lets the search overrun the
    /// limit by more.
    pub fn with_time_check_interval(mut self, interval: u64) -> Self {
        self.time_check_interval = interval;
        self
    }

    /// Enables or disables the candidate trace.
    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    /// Checks the configuration for unusable values.
    pub fn validate(&self) -> BalanceResult<()> {
        if !self.balance_rate_tolerance.is_finite() || self.balance_rate_tolerance < 0.0 {
            return Err(BalanceError::InvalidConfig(format!(
                "balance_rate_tolerance must be finite and non-negative, got {}",
                self.balance_rate_tolerance
            )));
        }
        if self.time_check_interval == 0 {
            return Err(BalanceError::InvalidConfig(
                "time_check_interval must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
