//! # Error Types
//!
//! Every fallible operation in WrenDB returns one of five error kinds.
//! The first four are validation failures: they are produced before any
//! file is mutated, are recovered at the request boundary, and carry a
//! human-readable reason for the caller to display. `Io` wraps an
//! underlying storage failure; after an `Io` error partway through an
//! insert the backing files are not guaranteed to be in a known-good
//! state (WrenDB does not implement multi-file atomicity).

use thiserror::Error;

/// Result type alias used throughout the engine.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for all WrenDB requests.
#[derive(Debug, Error)]
pub enum Error {
    /// A schema, table, or primary-key value collides with an existing one.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// An unknown schema, table, column, or index file was referenced.
    #[error("not found: {0}")]
    NotFound(String),

    /// A literal failed type conversion or violated a length bound.
    #[error("malformed literal: {0}")]
    MalformedLiteral(String),

    /// A malformed predicate, operator, or column spec from the front end.
    #[error("syntax rejected: {0}")]
    SyntaxRejected(String),

    /// The underlying storage failed mid-operation.
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the validation kinds that never leave files mutated.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}
