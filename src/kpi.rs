//! Line quality metrics (KPIs).
//!
//! Computes standard line-balancing performance indicators from a
//! finished balance.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Cycle time (C) | Slowest station load |
//! | Balance rate (E) | Σ loads / (stations × C) × 100 |
//! | Balance delay | 100 − E |
//! | Idle time | Σ (C − load) |
//! | Smoothness index | √Σ (C − load)² |
//! | Throughput | 3600 / C units per hour |
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 2.2

use crate::models::LineBalance;

/// Line performance indicators.
///
/// All time values are in seconds.
#[derive(Debug, Clone)]
pub struct LineKpi {
    /// Cycle time: slowest station load (s).
    pub cycle_time_secs: f64,
    /// Number of stations (one worker each).
    pub station_count: usize,
    /// Total work content (s).
    pub total_work_secs: f64,
    /// Balance rate (percent).
    pub balance_rate: f64,
    /// Share of paid station time that is idle (percent).
    pub balance_delay: f64,
    /// Idle time summed over all stations (s).
    pub total_idle_secs: f64,
    /// Idle time per station, in station order (s).
    pub idle_by_station: Vec<f64>,
    /// Smoothness index: root of summed squared idle times.
    pub smoothness_index: f64,
    /// Finished units per hour. `None` when the cycle time is zero.
    pub throughput_per_hour: Option<f64>,
}

impl LineKpi {
    /// Computes KPIs from a balance.
    pub fn calculate(balance: &LineBalance) -> Self {
        let cycle = balance.cycle_time_secs;
        let idle_by_station: Vec<f64> = balance
            .stations
            .iter()
            .map(|ws| ws.idle_secs(cycle))
            .collect();
        let total_idle_secs: f64 = idle_by_station.iter().sum();
        let smoothness_index = idle_by_station
            .iter()
            .map(|idle| idle * idle)
            .sum::<f64>()
            .sqrt();

        let throughput_per_hour = if cycle > 0.0 {
            Some(3600.0 / cycle)
        } else {
            None
        };

        Self {
            cycle_time_secs: cycle,
            station_count: balance.station_count(),
            total_work_secs: balance.total_work_secs,
            balance_rate: balance.balance_rate,
            balance_delay: 100.0 - balance.balance_rate,
            total_idle_secs,
            idle_by_station,
            smoothness_index,
            throughput_per_hour,
        }
    }

    /// Whether the line meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_balance_rate: f64, max_idle_secs: f64) -> bool {
        self.balance_rate >= min_balance_rate && self.total_idle_secs <= max_idle_secs
    }
}
