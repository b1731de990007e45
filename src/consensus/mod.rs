//! Consensus selection and competence.
//!
//! [`ConsensusRunner`] takes items, expert judgments and a method name (or
//! an explicit [`Objective`]), searches the candidate rankings and returns a
//! [`ConsensusResult`]:
//!
//! 1. Reduce the catalog to the [`ValidItemSet`](crate::model::ValidItemSet)
//! 2. Precompute one [`ExpertProfile`](crate::distance::ExpertProfile) per expert
//! 3. Score candidates: capped enumeration (optionally parallel) or annealing
//! 4. Keep the minimum score and its ties; the first in search order wins
//! 5. Weigh experts by inverse distance to the winner
//!
//! # Key Types
//!
//! - [`Method`]: named presets (`kemeny-snell`, `cook-seiford`, `minimax`, `gv-median`)
//! - [`EngineConfig`]: caps, timeout, parallelism, search strategy
//! - [`Competence`]: per-expert distance and normalized weight

pub mod competence;
mod config;
mod method;
mod result;
mod runner;
pub(crate) mod selector;
pub(crate) mod stop;

pub use competence::Competence;
pub use config::{EngineConfig, SearchStrategy};
pub use method::{Criterion, Method, Objective};
pub use result::{ConsensusResult, RankedItem, TieRow};
pub use runner::ConsensusRunner;
