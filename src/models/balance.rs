//! Balancing result models.
//!
//! [`LineBalance`] is the selected partition together with its derived
//! statistics. [`BalanceReport`] is the flattened shape handed to external
//! collaborators for persistence and rendering.

use serde::{Deserialize, Serialize};

use super::WorkStation;
use crate::balancer::{SearchMode, SearchStatistics, SearchTrace};
use crate::stats::{self, PartitionScore};

/// The selected partition of a balancing run plus derived statistics.
#[derive(Debug, Clone)]
pub struct LineBalance {
    /// Stations in production order, numbered 1..N.
    pub stations: Vec<WorkStation>,
    /// Per-station load (seconds), aligned with `stations`.
    pub workloads: Vec<f64>,
    /// Population variance of `workloads`.
    pub variance: f64,
    /// Balance rate (percent, 0..=100).
    pub balance_rate: f64,
    /// Slowest station load (seconds).
    pub cycle_time_secs: f64,
    /// Sum of all step durations (seconds).
    pub total_work_secs: f64,
    /// ID of the isolated bottleneck step.
    pub bottleneck_id: String,
    /// Search path that produced the selected partition.
    pub mode: SearchMode,
    /// Counters collected during search.
    pub statistics: SearchStatistics,
    /// Candidate scores, when tracing was enabled.
    pub trace: Option<SearchTrace>,
}

impl LineBalance {
    /// Builds a balance from ordered stations, deriving all statistics.
    ///
    /// Station numbers are reassigned to 1..N.
    pub(crate) fn from_stations(
        mut stations: Vec<WorkStation>,
        bottleneck_id: String,
        mode: SearchMode,
        statistics: SearchStatistics,
    ) -> Self {
        for (i, ws) in stations.iter_mut().enumerate() {
            ws.number = i + 1;
        }
        let workloads: Vec<f64> = stations.iter().map(|s| s.total_secs).collect();
        let score = PartitionScore::evaluate(&workloads);
        let total_work_secs = workloads.iter().sum();
        let cycle_time_secs = stats::max_load(&workloads);

        Self {
            stations,
            workloads,
            variance: score.variance,
            balance_rate: score.balance_rate,
            cycle_time_secs,
            total_work_secs,
            bottleneck_id,
            mode,
            statistics,
            trace: None,
        }
    }

    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Number of workers (one per station).
    pub fn worker_count(&self) -> usize {
        self.stations.len()
    }

    /// Score of the selected partition.
    pub fn score(&self) -> PartitionScore {
        PartitionScore {
            balance_rate: self.balance_rate,
            variance: self.variance,
        }
    }

    /// Station holding the given step.
    pub fn station_of(&self, step_id: &str) -> Option<&WorkStation> {
        self.stations.iter().find(|s| s.contains(step_id))
    }

    /// Flattens the balance into the external output shape.
    pub fn to_report(&self) -> BalanceReport {
        BalanceReport {
            stations: self
                .stations
                .iter()
                .map(|ws| StationReport {
                    station_number: ws.number,
                    steps: ws.steps.iter().map(|s| s.id.clone()).collect(),
                    total_seconds: ws.total_secs,
                })
                .collect(),
            cycle_time_seconds: self.cycle_time_secs,
            station_count: self.stations.len(),
            balance_rate_percent: self.balance_rate,
            total_work_seconds: self.total_work_secs,
        }
    }
}

/// External output of a balancing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    /// Stations in production order.
    pub stations: Vec<StationReport>,
    /// Cycle time (seconds).
    pub cycle_time_seconds: f64,
    /// Number of stations (and workers).
    pub station_count: usize,
    /// Balance rate (percent).
    pub balance_rate_percent: f64,
    /// Total work content (seconds).
    pub total_work_seconds: f64,
}

/// One station in a [`BalanceReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationReport {
    /// Position on the line (1-based).
    pub station_number: usize,
    /// Step IDs in assignment order.
    pub steps: Vec<String>,
    /// Station load (seconds).
    pub total_seconds: f64,
}
