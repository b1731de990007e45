//! Expert rank aggregation.
//!
//! Several experts each submit an ordering of a shared set of items, and may
//! exclude items they consider unfit. The engine computes the consensus
//! ordering that best agrees with all of them:
//!
//! - **Model**: items, expert judgments, the valid-item filter, and the
//!   item × expert rankings matrix.
//! - **Distance**: rank-displacement (Cook) and pairwise-preference
//!   (Kemeny) distances between rankings.
//! - **Enumeration**: capped swap-order permutation generation, sliced into
//!   independent subtrees for parallel evaluation.
//! - **Consensus**: the selector over four classical methods
//!   (Kemeny–Snell, Cook–Seiford, minimax, GV-median), expert competence
//!   weights, timeouts and cancellation.
//! - **Anneal**: simulated-annealing fallback for item sets whose
//!   permutation count exceeds the enumeration cap.
//! - **Service**: the request/response boundary and repository interfaces.
//!
//! # Quick start
//!
//! ```
//! use u_consensus::{ConsensusRunner, EngineConfig, ExpertJudgment, Item};
//!
//! let items = vec![Item::new(1, "A"), Item::new(2, "B"), Item::new(3, "C")];
//! let judgments = vec![
//!     ExpertJudgment::new(1, "first", vec![1, 2, 3]),
//!     ExpertJudgment::new(2, "second", vec![1, 3, 2]),
//!     ExpertJudgment::new(3, "third", vec![1, 2, 3]),
//! ];
//!
//! let result =
//!     ConsensusRunner::run(&items, &judgments, "kemeny-snell", &EngineConfig::default()).unwrap();
//! assert_eq!(result.winner(), vec![1, 2, 3]);
//! assert!(!result.limited);
//! ```
//!
//! # References
//!
//! - Kemeny, J.G. & Snell, J.L. (1962). *Mathematical Models in the Social Sciences*
//! - Cook, W.D. & Seiford, L.M. (1978). "Priority ranking and consensus formation",
//!   *Management Science* 24(16)

pub mod anneal;
pub mod consensus;
pub mod distance;
pub mod enumeration;
pub mod error;
pub mod model;
pub mod service;
pub mod settings;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use consensus::{ConsensusResult, ConsensusRunner, EngineConfig, Method};
pub use error::{ConsensusError, Warning};
pub use model::{ExpertJudgment, Item};
pub use service::{respond, ConsensusRequest, ConsensusResponse};
