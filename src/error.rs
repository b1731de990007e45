//! Fatal errors and recoverable warnings of a consensus run.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conditions that stop a consensus run without producing a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsensusError {
    #[error("no expert judgments were supplied")]
    NoExperts,

    #[error("every item is excluded by at least one expert")]
    NoValidItems,

    #[error("unknown consensus method: {0:?}")]
    UnknownMethod(String),

    #[error("search stopped before any candidate ranking was scored")]
    SearchExhausted,

    #[error("invalid engine configuration: {0}")]
    InvalidConfig(String),
}

/// Conditions that were recovered from; attached to a finished result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Warning {
    /// The requested method name was not recognized and `fallback` was used.
    #[serde(rename_all = "camelCase")]
    UnknownMethod { requested: String, fallback: String },

    /// Only part of the permutation space was searched.
    #[serde(rename_all = "camelCase")]
    SearchLimited { explored: u64, total: u64 },

    /// The caller's timeout expired; the result is the best found so far.
    #[serde(rename_all = "camelCase")]
    TimeoutPartial { explored: u64, elapsed_ms: u64 },

    /// The caller cancelled the search; the result is the best found so far.
    #[serde(rename_all = "camelCase")]
    Cancelled { explored: u64 },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnknownMethod {
                requested,
                fallback,
            } => write!(f, "unknown method {requested:?}, fell back to {fallback}"),
            Warning::SearchLimited { explored, total } => write!(
                f,
                "search limited: explored {explored} of {total} candidate rankings, result may be approximate"
            ),
            Warning::TimeoutPartial {
                explored,
                elapsed_ms,
            } => write!(
                f,
                "timeout after {elapsed_ms} ms: best of {explored} candidate rankings"
            ),
            Warning::Cancelled { explored } => {
                write!(f, "cancelled: best of {explored} candidate rankings")
            }
        }
    }
}
