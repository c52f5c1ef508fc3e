//! # error.rs
//!
//! Defines the errors raised while loading a variant configuration.
//!
//! Every error that can be pinned to a line of the configuration carries the
//! 1-based line number, so a malformed file can be fixed without guessing.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 25/01/2026

use game::GrammarError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("line {line}: unknown piece symbol '{symbol}'")]
    UnknownSymbol { line: usize, symbol: char },

    #[error("board of {squares} squares exceeds the maximum of {max}")]
    BoardTooLarge { squares: usize, max: usize },

    #[error("line {line}: invalid movement grammar")]
    Grammar {
        line: usize,
        #[source]
        source: GrammarError,
    },
}
