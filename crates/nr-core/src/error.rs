//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
}

/// Shorthand result type for `nr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
