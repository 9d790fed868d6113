//! Step orderings over precedence tiers.
//!
//! Steps of one tier are interchangeable, so every ordering of the line is a
//! concatenation of one permutation per tier, tiers ascending. Tiers larger
//! than the permutation cap contribute only their natural order.
//!
//! # Enumeration Order
//! Each tier's permutations run in lexicographic order starting from the
//! natural order. The product advances the highest tier fastest, so the
//! first ordering produced is always the natural one.

/// Lazy Cartesian product of per-tier permutations.
#[derive(Debug, Clone)]
pub(crate) struct TierOrderings {
    tiers: Vec<Vec<Vec<usize>>>,
    cursor: Vec<usize>,
    exhausted: bool,
}

impl TierOrderings {
    /// Builds the orderings of `tiers` (each a list of step indices in
    /// natural order). Tiers longer than `max_permuted` keep natural order.
    pub(crate) fn new(tiers: &[Vec<usize>], max_permuted: usize) -> Self {
        let tiers: Vec<Vec<Vec<usize>>> = tiers
            .iter()
            .map(|members| {
                if members.len() <= max_permuted {
                    permutations(members)
                } else {
                    vec![members.clone()]
                }
            })
            .collect();
        let cursor = vec![0; tiers.len()];
        Self {
            tiers,
            cursor,
            exhausted: false,
        }
    }

    /// Total number of orderings this product yields.
    pub(crate) fn len(&self) -> usize {
        self.tiers
            .iter()
            .map(Vec::len)
            .fold(1usize, |acc, n| acc.saturating_mul(n))
    }

    fn advance(&mut self) {
        for tier in (0..self.tiers.len()).rev() {
            self.cursor[tier] += 1;
            if self.cursor[tier] < self.tiers[tier].len() {
                return;
            }
            self.cursor[tier] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for TierOrderings {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let ordering = self
            .cursor
            .iter()
            .zip(&self.tiers)
            .flat_map(|(&pick, perms)| perms[pick].iter().copied())
            .collect();
        self.advance();
        Some(ordering)
    }
}

/// All permutations of `items` in lexicographic order of positions.
pub(crate) fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
    let mut positions: Vec<usize> = (0..items.len()).collect();
    let mut out = Vec::new();
    loop {
        out.push(positions.iter().map(|&p| items[p]).collect());
        if !next_permutation(&mut positions) {
            return out;
        }
    }
}

/// Rearranges `seq` into the next lexicographic permutation.
///
/// Returns `false` (leaving `seq` untouched) when `seq` is already the last one.
fn next_permutation(seq: &mut [usize]) -> bool {
    if seq.len() < 2 {
        return false;
    }
    let Some(pivot) = (0..seq.len() - 1).rev().find(|&i| seq[i] < seq[i + 1]) else {
        return false;
    };
    let Some(swap) = (pivot + 1..seq.len()).rev().find(|&j| seq[j] > seq[pivot]) else {
        return false;
    };
    seq.swap(pivot, swap);
    seq[pivot + 1..].reverse();
    true
}
