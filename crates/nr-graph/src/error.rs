//! Graph-subsystem error type.
//!
//! "No reachable node matches" is not an error: search functions return
//! `Ok(None)` for it.  Everything here is caller misuse.

use thiserror::Error;

/// Errors produced by `nr-graph`.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node {0:?} not found in graph")]
    UnknownNode(String),

    #[error("invalid weight {weight} on edge {from:?} -> {to:?}")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("unknown search algorithm {0:?}")]
    UnknownAlgorithm(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
