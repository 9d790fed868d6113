//! Assembly-line balancer.
//!
//! Partitions process steps into ordered workstations under a cycle-time
//! ceiling, maximizing the balance rate and breaking ties by workload
//! variance.
//!
//! # Algorithm
//!
//! 1. Identify the bottleneck (longest step). It always gets a station of
//!    its own, and its duration becomes the cycle ceiling.
//! 2. Up to `exact_search_threshold` steps: enumerate tier permutations and
//!    every station packing of each ordering (exact search).
//! 3. Above the threshold, or when exact search finds nothing: one greedy
//!    pass in natural order.
//! 4. Select the best candidate: balance rate descending (within a tolerance
//!    band), then variance ascending, then enumeration order.
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 2-3

mod exact;
mod greedy;
mod permutation;
mod statistics;

pub use statistics::{SearchMode, SearchStatistics, SearchTrace, TruncationReason};

use std::cmp::Ordering;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::config::BalancerConfig;
use crate::error::{BalanceError, BalanceResult};
use crate::models::{LineBalance, ProcessStep, WorkStation};
use crate::stats::PartitionScore;
use crate::validation::{self, is_level_ordered};

/// Slack allowed when comparing a station load to the cycle ceiling.
pub(crate) const CEILING_EPSILON: f64 = 1e-9;

/// Returns the bottleneck step: the longest one.
///
/// Ties go to the step that comes first in (level, sequence_index) order,
/// then to the one that comes first in `steps`.
pub fn find_bottleneck(steps: &[ProcessStep]) -> Option<&ProcessStep> {
    let mut best: Option<&ProcessStep> = None;
    for step in steps {
        best = match best {
            None => Some(step),
            Some(current) => match step.duration_secs.total_cmp(&current.duration_secs) {
                Ordering::Greater => Some(step),
                Ordering::Equal if step.natural_cmp(current) == Ordering::Less => Some(step),
                _ => Some(current),
            },
        };
    }
    best
}

/// A balancing problem prepared for search.
#[derive(Debug)]
pub(crate) struct LineProblem<'a> {
    /// Non-bottleneck steps in natural order.
    pub others: Vec<&'a ProcessStep>,
    /// The isolated bottleneck step.
    pub bottleneck: &'a ProcessStep,
    /// Cycle ceiling (bottleneck duration).
    pub ceiling: f64,
    /// Number of `others` at or below the bottleneck tier.
    pub split: usize,
}

impl<'a> LineProblem<'a> {
    /// Prepares `steps`. Returns `None` for an empty list.
    pub(crate) fn new(steps: &'a [ProcessStep]) -> Option<Self> {
        let bottleneck = find_bottleneck(steps)?;
        let mut others: Vec<&ProcessStep> = steps
            .iter()
            .filter(|s| !std::ptr::eq(*s, bottleneck))
            .collect();
        others.sort_by(|a, b| a.natural_cmp(b));
        let split = others.partition_point(|s| s.level <= bottleneck.level);

        Some(Self {
            others,
            bottleneck,
            ceiling: bottleneck.duration_secs,
            split,
        })
    }

    /// Indices of `others`, grouped by tier (ascending).
    pub(crate) fn tiers(&self) -> Vec<Vec<usize>> {
        let mut tiers: Vec<Vec<usize>> = Vec::new();
        let mut current_level = None;
        for (i, step) in self.others.iter().enumerate() {
            if current_level == Some(step.level) {
                if let Some(tier) = tiers.last_mut() {
                    tier.push(i);
                }
            } else {
                tiers.push(vec![i]);
                current_level = Some(step.level);
            }
        }
        tiers
    }

    /// Builds the stations of `candidate`, bottleneck included.
    fn materialize(&self, candidate: &Candidate) -> Vec<WorkStation> {
        let mut stations: Vec<WorkStation> = candidate
            .stations
            .iter()
            .map(|members| {
                WorkStation::new(0, members.iter().map(|&i| self.others[i].clone()).collect())
            })
            .collect();
        let at = candidate.bottleneck_at.min(stations.len());
        stations.insert(at, WorkStation::new(0, vec![self.bottleneck.clone()]));
        stations
    }

    /// Final gate: level order and ceiling.
    fn check(&self, stations: &[WorkStation]) -> BalanceResult<()> {
        if !is_level_ordered(stations) {
            return Err(BalanceError::InfeasiblePartition {
                reason: "stations violate precedence-level order".into(),
            });
        }
        let overloaded = stations.iter().find(|ws| {
            !ws.contains(&self.bottleneck.id) && ws.total_secs > self.ceiling + CEILING_EPSILON
        });
        if let Some(ws) = overloaded {
            return Err(BalanceError::InfeasiblePartition {
                reason: format!(
                    "station load {} exceeds cycle ceiling {}",
                    ws.total_secs, self.ceiling
                ),
            });
        }
        Ok(())
    }
}

/// A scored candidate partition.
///
/// `stations` index into [`LineProblem::others`]; the bottleneck station
/// goes before `stations[bottleneck_at]`.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub stations: Vec<Vec<usize>>,
    pub bottleneck_at: usize,
    pub score: PartitionScore,
}

/// Index of the best candidate. Earlier candidates win exact ties.
fn select_best(candidates: &[Candidate], tolerance: f64) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, cand) in candidates.iter().enumerate() {
        match best {
            Some(b) if !cand.score.beats(&candidates[b].score, tolerance) => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Assembly-line balancer.
///
/// Stateless across calls: every search tree and candidate list lives only
/// inside one [`balance`](Self::balance) call, so one balancer can be shared
/// between threads.
///
/// # Example
///
/// ```
/// use u_line_balance::balancer::LineBalancer;
/// use u_line_balance::models::ProcessStep;
///
/// let steps = vec![
///     ProcessStep::new("S1").with_level(1).with_duration(20.0),
///     ProcessStep::new("S2").with_level(1).with_duration(20.0),
///     ProcessStep::new("S3").with_level(2).with_duration(50.0),
/// ];
///
/// let balance = LineBalancer::new().balance(&steps).unwrap();
/// assert_eq!(balance.station_count(), 2);
/// assert!((balance.balance_rate - 90.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineBalancer {
    config: BalancerConfig,
}

impl LineBalancer {
    /// Creates a balancer with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a balancer with the given configuration.
    pub fn with_config(config: BalancerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &BalancerConfig {
        &self.config
    }

    /// Balances `steps` into ordered workstations.
    ///
    /// # Errors
    /// - [`BalanceError::EmptyInput`] for an empty list.
    /// - [`BalanceError::InvalidInput`] for duplicate IDs, level 0, or
    ///   negative / non-finite durations.
    /// - [`BalanceError::InvalidConfig`] for an unusable configuration.
    /// - [`BalanceError::InfeasiblePartition`] if no valid partition could
    ///   be built.
    #[instrument(skip(self, steps), fields(step_count = steps.len()))]
    pub fn balance(&self, steps: &[ProcessStep]) -> BalanceResult<LineBalance> {
        let started = Instant::now();
        self.config.validate()?;
        if steps.is_empty() {
            return Err(BalanceError::EmptyInput);
        }
        validation::validate_steps(steps).map_err(BalanceError::InvalidInput)?;
        let problem = LineProblem::new(steps).ok_or(BalanceError::EmptyInput)?;
        debug!(
            bottleneck = %problem.bottleneck.id,
            ceiling = problem.ceiling,
            "identified bottleneck"
        );

        let mut stats = SearchStatistics::default();
        let mut mode = SearchMode::Greedy;
        let mut candidates = Vec::new();

        if steps.len() <= self.config.exact_search_threshold {
            mode = SearchMode::Exact;
            let outcome = exact::search(&problem, &self.config, &mut stats);
            if let Some(reason) = outcome.truncation {
                warn!(
                    ?reason,
                    retained = outcome.candidates.len(),
                    "exact search stopped early"
                );
            }
            stats.truncation = outcome.truncation;
            candidates = outcome.candidates;
            debug!(
                orderings = stats.orderings_explored,
                nodes = stats.nodes_explored,
                candidates = candidates.len(),
                "exact search finished"
            );
        } else {
            debug!(
                threshold = self.config.exact_search_threshold,
                "step count above exact-search threshold"
            );
        }

        if candidates.is_empty() {
            if mode == SearchMode::Exact {
                debug!("exact search found no candidates, falling back to greedy");
                stats.fell_back = true;
            }
            mode = SearchMode::Greedy;
            candidates.push(greedy::pack(&problem));
            stats.on_leaf(true);
        }

        let selected = select_best(&candidates, self.config.balance_rate_tolerance).ok_or_else(
            || BalanceError::InfeasiblePartition {
                reason: "no candidate partitions".into(),
            },
        )?;
        let stations = problem.materialize(&candidates[selected]);
        problem.check(&stations)?;

        stats.elapsed = started.elapsed();
        let mut balance =
            LineBalance::from_stations(stations, problem.bottleneck.id.clone(), mode, stats);
        if self.config.trace {
            balance.trace = Some(SearchTrace {
                scores: candidates.iter().map(|c| c.score).collect(),
                selected,
            });
        }

        info!(
            mode = %balance.mode,
            stations = balance.station_count(),
            cycle_time = balance.cycle_time_secs,
            balance_rate = balance.balance_rate,
            "line balanced"
        );
        Ok(balance)
    }
}
