//! Workstation model.

use serde::{Deserialize, Serialize};

use super::ProcessStep;
use crate::validation::TierSpan;

/// A workstation: an ordered, non-empty group of steps handled by one worker.
///
/// Stations are numbered 1..N in production order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkStation {
    /// Position on the line (1-based).
    pub number: usize,
    /// Assigned steps, in assignment order.
    pub steps: Vec<ProcessStep>,
    /// Summed step durations (seconds).
    pub total_secs: f64,
}

impl WorkStation {
    /// Creates a station from its steps, summing their durations.
    pub fn new(number: usize, steps: Vec<ProcessStep>) -> Self {
        let total_secs = steps.iter().map(|s| s.duration_secs).sum();
        Self {
            number,
            steps,
            total_secs,
        }
    }

    /// Number of steps at this station.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Whether the station holds the step with the given ID.
    pub fn contains(&self, step_id: &str) -> bool {
        self.steps.iter().any(|s| s.id == step_id)
    }

    /// IDs of assigned steps, in assignment order.
    pub fn step_ids(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.id.as_str()).collect()
    }

    /// Idle time against the given cycle time (seconds, never negative).
    pub fn idle_secs(&self, cycle_time_secs: f64) -> f64 {
        (cycle_time_secs - self.total_secs).max(0.0)
    }
}

impl TierSpan for WorkStation {
    fn min_level(&self) -> u32 {
        self.steps.iter().map(|s| s.level).min().unwrap_or(u32::MAX)
    }

    fn max_level(&self) -> u32 {
        self.steps.iter().map(|s| s.level).max().unwrap_or(0)
    }
}
