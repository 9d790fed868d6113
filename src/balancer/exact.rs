//! Exact search: tier permutations with backtracking station assignment.
//!
//! # Algorithm
//!
//! For every ordering produced by [`TierOrderings`]:
//! 1. Place step `i` into each open station it fits (load stays within the
//!    cycle ceiling, level order of the following stations is kept), or into
//!    a new station appended at the end. Backtrack over every choice.
//! 2. At a leaf, insert the bottleneck station before the first station
//!    holding a tier above the bottleneck tier, then gate the layout with
//!    the level-order check.
//! 3. Score and retain the layout.
//!
//! Enumeration stops entirely once the candidate cap is reached or the
//! optional time limit elapses.
//!
//! # Complexity
//! Per ordering, the assignment tree has at most Bell(n) leaves, where n is
//! the number of non-bottleneck steps. The number of orderings is the
//! product of tier sizes' factorials (capped tiers count as 1).

use std::ops::ControlFlow;
use std::time::Instant;

use super::permutation::TierOrderings;
use super::statistics::{SearchStatistics, TruncationReason};
use super::{Candidate, LineProblem, CEILING_EPSILON};
use crate::config::BalancerConfig;
use crate::stats::PartitionScore;
use crate::validation::{is_level_ordered, TierSpan};

/// Outcome of an exact search run.
#[derive(Debug)]
pub(crate) struct ExactOutcome {
    pub candidates: Vec<Candidate>,
    pub truncation: Option<TruncationReason>,
}

/// A station under construction.
#[derive(Debug, Clone)]
struct OpenStation {
    members: Vec<usize>,
    load: f64,
    min_level: u32,
    max_level: u32,
}

impl OpenStation {
    fn empty() -> Self {
        Self {
            members: Vec::new(),
            load: 0.0,
            min_level: u32::MAX,
            max_level: 0,
        }
    }
}

impl TierSpan for OpenStation {
    fn min_level(&self) -> u32 {
        self.min_level
    }

    fn max_level(&self) -> u32 {
        self.max_level
    }
}

/// Runs exact search over `problem`.
pub(crate) fn search(
    problem: &LineProblem<'_>,
    config: &BalancerConfig,
    stats: &mut SearchStatistics,
) -> ExactOutcome {
    let orderings = TierOrderings::new(&problem.tiers(), config.max_permuted_tier_size);
    tracing::debug!(
        orderings = orderings.len(),
        steps = problem.others.len(),
        ceiling = problem.ceiling,
        "starting exact search"
    );

    let bottleneck = OpenStation {
        members: Vec::new(),
        load: problem.bottleneck.duration_secs,
        min_level: problem.bottleneck.level,
        max_level: problem.bottleneck.level,
    };

    let mut search = ExactSearch {
        problem,
        bottleneck,
        max_candidates: config.max_candidates,
        deadline: config.time_limit.map(|limit| Instant::now() + limit),
        check_interval: config.time_check_interval.max(1),
        stations: Vec::new(),
        candidates: Vec::new(),
        stats,
    };

    let mut truncation = None;
    for ordering in orderings {
        search.stats.on_ordering();
        search.stations.clear();
        if let ControlFlow::Break(reason) = search.assign(&ordering, 0) {
            truncation = Some(reason);
            break;
        }
    }

    ExactOutcome {
        candidates: search.candidates,
        truncation,
    }
}

struct ExactSearch<'p, 'a, 's> {
    problem: &'p LineProblem<'a>,
    bottleneck: OpenStation,
    max_candidates: usize,
    deadline: Option<Instant>,
    check_interval: u64,
    stations: Vec<OpenStation>,
    candidates: Vec<Candidate>,
    stats: &'s mut SearchStatistics,
}

impl ExactSearch<'_, '_, '_> {
    fn assign(&mut self, ordering: &[usize], depth: usize) -> ControlFlow<TruncationReason> {
        let Some(&step_idx) = ordering.get(depth) else {
            return self.record_leaf();
        };
        let step = self.problem.others[step_idx];
        let split_level = self.problem.bottleneck.level;

        for j in 0..self.stations.len() {
            let (load, saved) = {
                let station = &self.stations[j];
                (station.load, (station.min_level, station.max_level))
            };
            if load + step.duration_secs > self.problem.ceiling + CEILING_EPSILON {
                continue;
            }
            // The bottleneck station could never be placed between tiers
            // that share one station.
            let new_min = saved.0.min(step.level);
            let new_max = saved.1.max(step.level);
            if new_min < split_level && new_max > split_level {
                continue;
            }

            self.tick()?;
            self.push(j, step_idx);
            if is_level_ordered(&self.stations[j..]) {
                self.assign(ordering, depth + 1)?;
            }
            self.pop(j, saved);
        }

        self.tick()?;
        self.stations.push(OpenStation::empty());
        let last = self.stations.len() - 1;
        self.push(last, step_idx);
        let flow = self.assign(ordering, depth + 1);
        self.stations.pop();
        flow
    }

    fn push(&mut self, station: usize, step_idx: usize) {
        let step = self.problem.others[step_idx];
        let ws = &mut self.stations[station];
        ws.members.push(step_idx);
        ws.load += step.duration_secs;
        ws.min_level = ws.min_level.min(step.level);
        ws.max_level = ws.max_level.max(step.level);
    }

    fn pop(&mut self, station: usize, saved: (u32, u32)) {
        let ws = &mut self.stations[station];
        if let Some(step_idx) = ws.members.pop() {
            ws.load -= self.problem.others[step_idx].duration_secs;
        }
        (ws.min_level, ws.max_level) = saved;
    }

    fn tick(&mut self) -> ControlFlow<TruncationReason> {
        self.stats.on_node();
        if let Some(deadline) = self.deadline {
            if self.stats.nodes_explored % self.check_interval == 0 && Instant::now() >= deadline {
                return ControlFlow::Break(TruncationReason::TimeLimit);
            }
        }
        ControlFlow::Continue(())
    }

    fn record_leaf(&mut self) -> ControlFlow<TruncationReason> {
        if self.candidates.len() >= self.max_candidates {
            return ControlFlow::Break(TruncationReason::CandidateCap);
        }

        let split_level = self.problem.bottleneck.level;
        let position = self
            .stations
            .iter()
            .position(|s| s.max_level > split_level)
            .unwrap_or(self.stations.len());

        let mut layout: Vec<&OpenStation> = Vec::with_capacity(self.stations.len() + 1);
        layout.extend(&self.stations[..position]);
        layout.push(&self.bottleneck);
        layout.extend(&self.stations[position..]);

        let accepted = is_level_ordered(&layout);
        self.stats.on_leaf(accepted);
        if !accepted {
            return ControlFlow::Continue(());
        }

        let workloads: Vec<f64> = layout.iter().map(|s| s.load).collect();
        self.candidates.push(Candidate {
            stations: self.stations.iter().map(|s| s.members.clone()).collect(),
            bottleneck_at: position,
            score: PartitionScore::evaluate(&workloads),
        });

        if self.candidates.len() >= self.max_candidates {
            return ControlFlow::Break(TruncationReason::CandidateCap);
        }
        ControlFlow::Continue(())
    }
}
