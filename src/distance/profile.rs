//! Per-expert data precomputed once per search.
//!
//! The universe and expert orders are fixed for a whole invocation; only the
//! candidate changes. A profile holds everything about one expert that a
//! distance evaluation needs, indexed by dense universe index, so scoring a
//! candidate only walks its position table.

use super::metric::{preference, Metric};

/// One expert's order prepared for repeated scoring against full candidates.
#[derive(Debug, Clone)]
pub enum ExpertProfile {
    RankDisplacement {
        /// `(universe index, position in the expert's restricted order)`.
        ranked: Vec<(usize, usize)>,
    },
    PairwisePreference {
        n: usize,
        /// Preference vector in row-by-row pair layout.
        prefs: Vec<i8>,
    },
}

impl ExpertProfile {
    /// Builds a profile from an order of dense universe indices
    /// (see [`ValidItemSet::restrict`](crate::model::ValidItemSet::restrict)).
    pub fn new(metric: Metric, restricted: &[usize], n: usize) -> Self {
        match metric {
            Metric::RankDisplacement => ExpertProfile::RankDisplacement {
                ranked: restricted.iter().enumerate().map(|(p, &idx)| (idx, p)).collect(),
            },
            Metric::PairwisePreference => {
                let mut located = vec![None; n];
                for (p, &idx) in restricted.iter().enumerate() {
                    located[idx] = Some(p);
                }
                let mut prefs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
                for i in 0..n {
                    for j in (i + 1)..n {
                        prefs.push(preference(located[i], located[j]));
                    }
                }
                ExpertProfile::PairwisePreference { n, prefs }
            }
        }
    }

    /// Distance from a full candidate given as `positions[item] = rank`.
    pub fn distance(&self, positions: &[usize]) -> u64 {
        match self {
            ExpertProfile::RankDisplacement { ranked } => ranked
                .iter()
                .map(|&(idx, p)| positions[idx].abs_diff(p) as u64)
                .sum(),
            ExpertProfile::PairwisePreference { n, prefs } => {
                let mut d = 0u64;
                let mut k = 0usize;
                for i in 0..*n {
                    let pi = positions[i];
                    for &pj in &positions[(i + 1)..*n] {
                        let c: i8 = if pi < pj { 1 } else { -1 };
                        d += (c - prefs[k]).unsigned_abs() as u64;
                        k += 1;
                    }
                }
                d
            }
        }
    }
}

/// Fills `positions` so that `positions[candidate[r]] = r`.
#[inline]
pub fn positions_of(candidate: &[usize], positions: &mut [usize]) {
    for (rank, &idx) in candidate.iter().enumerate() {
        positions[idx] = rank;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::metric::{pairwise_preference, rank_displacement};
    use crate::model::ItemId;

    const U: [ItemId; 4] = [10, 20, 30, 40];

    fn score(metric: Metric, candidate: &[usize], expert: &[usize]) -> u64 {
        let profile = ExpertProfile::new(metric, expert, U.len());
        let mut pos = vec![0; U.len()];
        positions_of(candidate, &mut pos);
        profile.distance(&pos)
    }

    fn ids(idx: &[usize]) -> Vec<ItemId> {
        idx.iter().map(|&i| U[i]).collect()
    }

    #[test]
    fn test_profile_matches_free_functions() {
        let candidates: [&[usize]; 3] = [&[0, 1, 2, 3], &[3, 1, 0, 2], &[2, 3, 1, 0]];
        let experts: [&[usize]; 3] = [&[0, 1, 2, 3], &[1, 3], &[]];
        for c in candidates {
            for e in experts {
                assert_eq!(
                    score(Metric::RankDisplacement, c, e),
                    rank_displacement(&ids(c), &ids(e), &U)
                );
                assert_eq!(
                    score(Metric::PairwisePreference, c, e),
                    pairwise_preference(&ids(c), &ids(e), &U)
                );
            }
        }
    }

    #[test]
    fn test_empty_expert_order() {
        assert_eq!(score(Metric::RankDisplacement, &[3, 2, 1, 0], &[]), 0);
        // every pair is unknown to the expert: 6 pairs × 1
        assert_eq!(score(Metric::PairwisePreference, &[3, 2, 1, 0], &[]), 6);
    }
}
