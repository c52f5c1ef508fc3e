//! # grammar.rs
//!
//! Defines the parsed representation of a piece movement grammar.
//!
//! A movement grammar is a comma separated list of clauses, any of which may
//! legalise a move. Each clause is an expression tree whose leaves are atomic
//! steps (shape, heading, lateral side and distance constraints) and whose
//! inner nodes are riders (`n(...)`, a step repeated along a line) and
//! sequences (`a.b`, two moves through an intermediate square). Clause level
//! flags such as capture-only or first-move-only are lifted out of the tree
//! since they constrain the move as a whole.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 02/02/2026

use crate::{error::GrammarError, moves::move_parse::parse_grammar};

/// A distance specification for a single axis or for the Chebyshev distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span {
    Exact(u32),
    Any,
    Range(u32, Option<u32>),                                                    /* inclusive, None is unbounded       */
}

impl Span {
    pub fn matches(&self, value: u32) -> bool {
        match *self {
            Span::Exact(n) => n == value,
            Span::Any => true,
            Span::Range(lo, Some(hi)) => lo <= value && value <= hi,
            Span::Range(lo, None) => lo <= value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distance {
    Unbounded,
    Single(Span),
    Paired { first: Span, second: Span, strict: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Omni,
    Orthogonal,
    Diagonal,
    Free,                                                                       /* paired distances without a shape   */
}

/// Constraint on the forward axis, always relative to the piece direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Any,
    Forward { sideways: bool },
    Backward { sideways: bool },
    Vertical,
    Sideways,
}

/// Constraint on the sideways axis, relative to the piece direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lateral {
    Any,
    Right,
    Left,
    Either,
}

/// A single atomic movement step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    pub shape: Shape,
    pub heading: Heading,
    pub lateral: Lateral,
    pub distance: Distance,
    pub first_move: bool,
    pub dummy: bool,
    pub leaper: bool,
    pub locust: bool,
}

impl Default for Atom {
    fn default() -> Self {
        Atom {
            shape: Shape::Omni,
            heading: Heading::Any,
            lateral: Lateral::Any,
            distance: Distance::Unbounded,
            first_move: false,
            dummy: false,
            leaper: false,
            locust: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Fixed(u32),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Step(Atom),
    Ride {
        count: Count,
        pattern: Box<Expr>,
        leaper: bool,
        locust: bool,
    },
    Then(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn has_locust(&self) -> bool {
        match self {
            Expr::Step(atom) => atom.locust,
            Expr::Ride { pattern, locust, .. } => *locust || pattern.has_locust(),
            Expr::Then(first, second) => first.has_locust() || second.has_locust(),
        }
    }

    pub fn is_combinator(&self) -> bool {
        !matches!(self, Expr::Step(_))
    }
}

/// One comma separated alternative of a movement grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub source: String,
    pub expr: Expr,
    pub capture_only: bool,
    pub quiet_only: bool,
    pub first_move: bool,
    pub dummy: bool,
    pub king: bool,
    pub leaper: bool,
}

/// A fully parsed movement grammar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveGrammar {
    source: String,
    clauses: Vec<Clause>,
}

impl MoveGrammar {
    /// Parses a movement grammar.
    ///
    /// # Errors
    ///
    /// Fails on the deprecated `&` operator, unknown tokens, malformed
    /// distances, conflicting shapes and empty rider groups. Unbalanced
    /// parentheses are repaired with a warning instead.
    pub fn parse(source: &str) -> Result<Self, GrammarError> {
        parse_grammar(source)
    }

    pub(crate) fn from_clauses(source: String, clauses: Vec<Clause>) -> Self {
        MoveGrammar { source, clauses }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_king(&self) -> bool {
        self.clauses.iter().any(|c| c.king)
    }

    pub fn is_dummy(&self) -> bool {
        self.clauses.iter().any(|c| c.dummy)
    }

    pub fn has_locust(&self) -> bool {
        self.clauses.iter().any(|c| c.expr.has_locust())
    }
}
