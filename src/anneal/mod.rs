//! Simulated annealing over candidate rankings.
//!
//! Used when the permutation space is too large to enumerate. Moves are
//! random swaps and insertions; worsening moves are accepted with the
//! Metropolis probability `exp(-delta / T)` under a cooling schedule. The
//! random generator is always seeded, so results are reproducible.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;

pub use config::{AnnealConfig, CoolingSchedule};
pub(crate) use runner::AnnealRunner;
