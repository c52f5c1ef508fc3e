//! # constants.rs
//!
//! Defines game-wide constants and configuration values.
//!
//! This file contains constant definitions for board limits, the captured
//! piece sentinel, default piece values, and the search window. These
//! constants are used throughout the codebase to ensure consistency and allow
//! for easy modification of game parameters.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 25/01/2026

use crate::representations::piece::Square;

pub const MAX_SQUARES: usize = 4096;

pub const SENTINEL: Square = (-1, -1);

pub const DEFAULT_FILES: i32 = 8;
pub const DEFAULT_RANKS: i32 = 8;

pub const PAWN_VALUE: i32 = 1;
pub const KNIGHT_VALUE: i32 = 3;
pub const BISHOP_VALUE: i32 = 3;
pub const ROOK_VALUE: i32 = 5;
pub const QUEEN_VALUE: i32 = 9;
pub const KING_VALUE: i32 = 1000;

pub const KING_GRAMMAR: &str = "k1*";
pub const QUEEN_GRAMMAR: &str = "n*";
pub const ROOK_GRAMMAR: &str = "n+";
pub const BISHOP_GRAMMAR: &str = "nx";
pub const KNIGHT_GRAMMAR: &str = "~1/2";
pub const PAWN_GRAMMAR: &str = "o1>+, c1x>, oi2>+";

pub const EN_PASSANT_GRAMMAR: &str = "o1x>";

pub const SCORE_INFINITY: i32 = i32::MAX / 2;
