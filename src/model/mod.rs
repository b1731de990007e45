//! Item & judgment model.
//!
//! - [`Item`], [`ExpertJudgment`]: caller-supplied snapshots
//! - [`ValidItemSet`]: items no expert excluded; the search universe
//! - [`RankingsMatrix`]: item × expert rank table with conflict detection

mod matrix;
mod types;
mod validity;

pub use matrix::{Conflict, ExpertColumn, MatrixRow, RankCell, RankingsMatrix};
pub use types::{ExpertId, ExpertJudgment, Item, ItemId};
pub use validity::ValidItemSet;
