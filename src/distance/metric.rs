//! Distance functions between two (possibly partial) item orders.

use crate::model::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How far one ordering is from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Cook distance: summed absolute position differences.
    RankDisplacement,
    /// Kemeny/Hamming distance over pairwise preference vectors.
    PairwisePreference,
}

impl Metric {
    /// Distance between `a` and `b`, considering only ids in `universe`.
    pub fn distance(self, a: &[ItemId], b: &[ItemId], universe: &[ItemId]) -> u64 {
        match self {
            Metric::RankDisplacement => rank_displacement(a, b, universe),
            Metric::PairwisePreference => pairwise_preference(a, b, universe),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::RankDisplacement => "rank-displacement",
            Metric::PairwisePreference => "pairwise-preference",
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 0-based position of each id's first occurrence.
fn positions(order: &[ItemId]) -> HashMap<ItemId, usize> {
    let mut pos = HashMap::with_capacity(order.len());
    for (p, &id) in order.iter().enumerate() {
        pos.entry(id).or_insert(p);
    }
    pos
}

/// Rank-displacement (Cook) distance.
///
/// Sums `|posA - posB|` over ids of `universe` present in both orders.
/// Ids missing from either order contribute nothing.
///
/// # Examples
///
/// ```
/// use u_consensus::distance::rank_displacement;
///
/// assert_eq!(rank_displacement(&[1, 2, 3], &[3, 2, 1], &[1, 2, 3]), 4);
/// ```
pub fn rank_displacement(a: &[ItemId], b: &[ItemId], universe: &[ItemId]) -> u64 {
    let pos_a = positions(a);
    let pos_b = positions(b);
    universe
        .iter()
        .filter_map(|id| match (pos_a.get(id), pos_b.get(id)) {
            (Some(&pa), Some(&pb)) => Some(pa.abs_diff(pb) as u64),
            _ => None,
        })
        .sum()
}

/// Signed preference vector of `order` over all pairs `i < j` of `universe`.
///
/// Entry is `+1` if `universe[i]` precedes `universe[j]`, `-1` if it follows,
/// `0` if either is absent from `order`. Pairs are laid out row by row:
/// `(0,1), (0,2), .., (1,2), ..`.
pub fn pairwise_vector(order: &[ItemId], universe: &[ItemId]) -> Vec<i8> {
    let pos = positions(order);
    let located: Vec<Option<usize>> = universe.iter().map(|id| pos.get(id).copied()).collect();
    let n = universe.len();
    let mut v = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            v.push(preference(located[i], located[j]));
        }
    }
    v
}

#[inline]
pub(crate) fn preference(pi: Option<usize>, pj: Option<usize>) -> i8 {
    match (pi, pj) {
        (Some(pi), Some(pj)) if pi < pj => 1,
        (Some(_), Some(_)) => -1,
        _ => 0,
    }
}

/// Pairwise-preference (Hamming/Kemeny) distance.
///
/// Sum of absolute differences between the two [`pairwise_vector`]s.
/// Symmetric in `a` and `b`.
///
/// # Examples
///
/// ```
/// use u_consensus::distance::pairwise_preference;
///
/// // one swapped pair counts twice (+1 vs -1)
/// assert_eq!(pairwise_preference(&[1, 2, 3], &[2, 1, 3], &[1, 2, 3]), 2);
/// ```
pub fn pairwise_preference(a: &[ItemId], b: &[ItemId], universe: &[ItemId]) -> u64 {
    let va = pairwise_vector(a, universe);
    let vb = pairwise_vector(b, universe);
    va.iter()
        .zip(&vb)
        .map(|(&x, &y)| (x - y).unsigned_abs() as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const U: [ItemId; 3] = [1, 2, 3];

    #[test]
    fn test_cook_reversed() {
        assert_eq!(rank_displacement(&[1, 2, 3], &[3, 2, 1], &U), 4);
    }

    #[test]
    fn test_cook_missing_ids_contribute_zero() {
        // 3 is absent from b; 1 and 2 shift by one each
        assert_eq!(rank_displacement(&[3, 1, 2], &[1, 2], &U), 2);
    }

    #[test]
    fn test_cook_ignores_ids_outside_universe() {
        assert_eq!(rank_displacement(&[9, 1, 2], &[1, 2], &[1, 2]), 2);
    }

    #[test]
    fn test_pairwise_vector_layout() {
        assert_eq!(pairwise_vector(&[3, 1, 2], &U), vec![1, -1, -1]);
        assert_eq!(pairwise_vector(&[2], &U), vec![0, 0, 0]);
    }

    #[test]
    fn test_pairwise_adjacent_swap() {
        assert_eq!(pairwise_preference(&[1, 2, 3], &[2, 1, 3], &U), 2);
    }

    #[test]
    fn test_pairwise_reversed() {
        assert_eq!(pairwise_preference(&[1, 2, 3], &[3, 2, 1], &U), 6);
    }

    #[test]
    fn test_pairwise_partial_order() {
        // pairs touching the missing item 3 contribute 1 each
        assert_eq!(pairwise_preference(&[1, 2, 3], &[1, 2], &U), 2);
    }

    #[test]
    fn test_self_distance_zero() {
        for metric in [Metric::RankDisplacement, Metric::PairwisePreference] {
            assert_eq!(metric.distance(&[2, 3, 1], &[2, 3, 1], &U), 0);
        }
    }

    #[test]
    fn test_metric_serde_names() {
        let json = serde_json::to_string(&Metric::PairwisePreference).unwrap();
        assert_eq!(json, "\"pairwise-preference\"");
    }
}
