//! Greedy fallback.
//!
//! # Algorithm
//!
//! 1. Walk the non-bottleneck steps in natural (level, sequence) order.
//! 2. Append each step to the current station while the load stays within
//!    the cycle ceiling; otherwise open a new station.
//! 3. Before the first step of a tier above the bottleneck's, close the
//!    current station and give the bottleneck its own.
//!
//! Always yields exactly one candidate.
//!
//! # Complexity
//! O(n) after sorting.

use super::{Candidate, LineProblem, CEILING_EPSILON};
use crate::models::ProcessStep;
use crate::stats::PartitionScore;

/// Packs `problem` in a single natural-order pass.
pub(crate) fn pack(problem: &LineProblem<'_>) -> Candidate {
    let (before, after) = problem.others.split_at(problem.split);

    let mut stations: Vec<Vec<usize>> = Vec::new();
    let mut workloads: Vec<f64> = Vec::new();

    fill(problem, before, 0, &mut stations, &mut workloads);
    let bottleneck_at = stations.len();
    workloads.push(problem.bottleneck.duration_secs);
    fill(problem, after, before.len(), &mut stations, &mut workloads);

    Candidate {
        stations,
        bottleneck_at,
        score: PartitionScore::evaluate(&workloads),
    }
}

fn fill(
    problem: &LineProblem<'_>,
    run: &[&ProcessStep],
    offset: usize,
    stations: &mut Vec<Vec<usize>>,
    workloads: &mut Vec<f64>,
) {
    let mut current: Vec<usize> = Vec::new();
    let mut load = 0.0;

    for (i, step) in run.iter().enumerate() {
        if !current.is_empty() && load + step.duration_secs > problem.ceiling + CEILING_EPSILON {
            stations.push(std::mem::take(&mut current));
            workloads.push(load);
            load = 0.0;
        }
        current.push(offset + i);
        load += step.duration_secs;
    }

    if !current.is_empty() {
        stations.push(current);
        workloads.push(load);
    }
}
