//! The engine's request/response boundary.
//!
//! - [`respond`]: pure function from [`ConsensusRequest`] to [`ConsensusResponse`]
//! - [`ItemCatalog`], [`JudgmentStore`]: repository interfaces for the
//!   surrounding application, with in-memory implementations
//! - [`ConsensusService`]: snapshots injected repositories and calls the engine

mod handler;
mod repository;
mod request;

pub use handler::ConsensusService;
pub use repository::{InMemoryCatalog, InMemoryJudgmentStore, ItemCatalog, JudgmentStore};
pub use request::{respond, ConsensusRequest, ConsensusResponse, ErrorBody, ErrorKind};
