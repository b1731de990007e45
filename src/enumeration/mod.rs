//! Permutation enumeration for the consensus search.
//!
//! Exhaustive permutation search is exact for small universes (n ≤ ~10) and
//! infeasible beyond. [`CandidateSpace`] caps the enumeration at
//! `min(n!, hard cap)` and flags it as limited once `n!` exceeds the soft
//! cap, so truncation is always reported. The order is deterministic for a
//! given universe order, which keeps tie sets stable across runs.
//!
//! [`CandidateSpace::slices`] cuts the enumeration into disjoint subtrees
//! that can be scored on separate threads while keeping their global
//! enumeration indices.

mod permutations;
mod space;

pub use permutations::SwapPermutations;
pub use space::{factorial, CandidateSpace, Slice, HARD_CAP, SOFT_CAP};
