//! Search statistics and the opt-in candidate trace.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::stats::PartitionScore;

/// Search path that produced a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchMode {
    /// Tier permutations with backtracking station assignment.
    Exact,
    /// Single pass in natural order.
    Greedy,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Exact => write!(f, "exact"),
            SearchMode::Greedy => write!(f, "greedy"),
        }
    }
}

/// Why exact search stopped before exhausting its orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TruncationReason {
    /// The retained-candidate cap was reached.
    CandidateCap,
    /// The configured wall-clock limit elapsed.
    TimeLimit,
}

/// Counters collected during one balancing run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    /// Step orderings (products of tier permutations) explored.
    pub orderings_explored: u64,
    /// Station placements tried, including new-station openings.
    pub nodes_explored: u64,
    /// Complete assignments reached.
    pub leaves_reached: u64,
    /// Complete assignments rejected by the level-order gate.
    pub leaves_rejected: u64,
    /// Candidates kept for selection.
    pub candidates_retained: u64,
    /// Set when exact search stopped early.
    pub truncation: Option<TruncationReason>,
    /// Whether greedy ran because exact search found nothing.
    pub fell_back: bool,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

impl SearchStatistics {
    #[inline]
    pub(crate) fn on_ordering(&mut self) {
        self.orderings_explored = self.orderings_explored.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_node(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_leaf(&mut self, accepted: bool) {
        self.leaves_reached = self.leaves_reached.saturating_add(1);
        if accepted {
            self.candidates_retained = self.candidates_retained.saturating_add(1);
        } else {
            self.leaves_rejected = self.leaves_rejected.saturating_add(1);
        }
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Orderings explored:   {}", self.orderings_explored)?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Leaves reached:       {}", self.leaves_reached)?;
        writeln!(f, "  Leaves rejected:      {}", self.leaves_rejected)?;
        writeln!(f, "  Candidates retained:  {}", self.candidates_retained)?;
        match self.truncation {
            Some(reason) => writeln!(f, "  Truncated:            {reason:?}")?,
            None => writeln!(f, "  Truncated:            no")?,
        }
        writeln!(f, "  Greedy fallback:      {}", self.fell_back)?;
        write!(f, "  Elapsed:              {:.3}ms", self.elapsed.as_secs_f64() * 1e3)
    }
}

/// Scores of every retained candidate, in enumeration order.
///
/// Collected only when [`BalancerConfig::trace`](crate::config::BalancerConfig::trace)
/// is enabled.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchTrace {
    /// Candidate scores in the order candidates were found.
    pub scores: Vec<PartitionScore>,
    /// Index into `scores` of the selected candidate.
    pub selected: usize,
}

impl SearchTrace {
    /// Score of the selected candidate.
    pub fn selected_score(&self) -> Option<&PartitionScore> {
        self.scores.get(self.selected)
    }
}
