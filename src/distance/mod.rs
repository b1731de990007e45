//! Distance metrics between item orderings.
//!
//! - [`rank_displacement`]: Cook distance, paired with the additive criterion
//! - [`pairwise_preference`]: Hamming/Kemeny distance over pairwise
//!   preference vectors; symmetric, satisfies the triangle inequality on
//!   permutations
//!
//! [`ExpertProfile`] is the precomputed form used in the search hot path.
//!
//! # References
//!
//! - Kemeny & Snell (1962), *Mathematical Models in the Social Sciences*
//! - Cook & Seiford (1978), "Priority Ranking and Consensus Formation"

mod metric;
mod profile;

pub use metric::{pairwise_preference, pairwise_vector, rank_displacement, Metric};
pub use profile::{positions_of, ExpertProfile};
