//! Expert competence weights relative to a chosen consensus.

use crate::distance::Metric;
use crate::model::{ExpertId, ExpertJudgment, ItemId, ValidItemSet};
use serde::{Deserialize, Serialize};

/// How closely one expert agrees with the consensus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competence {
    pub expert_id: ExpertId,
    pub expert_name: String,
    /// Distance between the consensus and this expert's restricted order.
    pub distance: u64,
    /// Normalized weight; weights of all experts sum to 1.
    pub weight: f64,
}

/// Normalized inverse-distance weights: `w_i ∝ 1 / (1 + d_i)`.
///
/// Falls back to uniform weights if the normalizer is not a positive finite
/// number. Empty input gives an empty vector.
pub fn inverse_distance_weights(distances: &[u64]) -> Vec<f64> {
    let raw: Vec<f64> = distances.iter().map(|&d| 1.0 / (1.0 + d as f64)).collect();
    let total: f64 = raw.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        let uniform = 1.0 / distances.len().max(1) as f64;
        return vec![uniform; distances.len()];
    }
    raw.into_iter().map(|r| r / total).collect()
}

/// Pairs precomputed distances (one per judgment, same order) with weights.
pub fn from_distances(judgments: &[ExpertJudgment], distances: &[u64]) -> Vec<Competence> {
    debug_assert_eq!(judgments.len(), distances.len());
    let weights = inverse_distance_weights(distances);
    judgments
        .iter()
        .zip(distances)
        .zip(weights)
        .map(|((j, &distance), weight)| Competence {
            expert_id: j.expert_id,
            expert_name: j.label(),
            distance,
            weight,
        })
        .collect()
}

/// Competence of each expert relative to `consensus` under `metric`.
///
/// Expert orders are restricted to `valid` before measuring.
///
/// # Examples
///
/// ```
/// use u_consensus::consensus::competence;
/// use u_consensus::distance::Metric;
/// use u_consensus::model::{ExpertJudgment, ValidItemSet};
///
/// let judgments = vec![
///     ExpertJudgment::new(1, "a", vec![1, 2, 3]),
///     ExpertJudgment::new(2, "b", vec![3, 2, 1]),
/// ];
/// let valid = ValidItemSet::filter(&[1, 2, 3], &judgments).unwrap();
/// let c = competence::evaluate(&[1, 2, 3], &judgments, Metric::RankDisplacement, &valid);
/// assert_eq!(c[0].distance, 0);
/// assert_eq!(c[1].distance, 4);
/// assert!((c[0].weight - 5.0 / 6.0).abs() < 1e-12);
/// ```
pub fn evaluate(
    consensus: &[ItemId],
    judgments: &[ExpertJudgment],
    metric: Metric,
    valid: &ValidItemSet,
) -> Vec<Competence> {
    let distances: Vec<u64> = judgments
        .iter()
        .map(|j| metric.distance(consensus, &valid.restrict_ids(&j.order), valid.ids()))
        .collect();
    from_distances(judgments, &distances)
}
