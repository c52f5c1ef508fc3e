//! # error.rs
//!
//! Defines the error types surfaced by the game crate.
//!
//! Grammar errors are raised when a piece is constructed from a movement
//! string that cannot be interpreted. Search errors report misuse of the
//! search entry point. Illegal moves are never errors; they are reported as
//! plain values by the resolver.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 02/02/2026

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error(
        "the repeated movement ('&') operator has been deprecated, \
         use the grouping ('()') operator instead"
    )]
    DeprecatedRepeat,

    #[error("unexpected token '{token}' in clause \"{clause}\"")]
    UnexpectedToken { token: char, clause: String },

    #[error("malformed distance \"{0}\"")]
    MalformedDistance(String),

    #[error("conflicting shape tokens in clause \"{0}\"")]
    ConflictingShape(String),

    #[error("rider group in clause \"{0}\" has no pattern")]
    EmptyPattern(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("search depth must be positive, got {0}")]
    NonPositiveDepth(u8),
}
