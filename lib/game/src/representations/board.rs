//! # board.rs
//!
//! Defines a board structure and operations for bitboard manipulation.
//!
//! This file contains the implementation of a `Board` struct, a set of squares
//! stored as a bitboard of type `U4096` laid over a position's bounds in row
//! major order. It is used for legal destination sets and attack maps, and
//! provides methods for setting, clearing, and querying squares along with
//! least significant bit scans and population counts.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 18/02/2024

use std::ops::{BitAnd, BitOrAssign};

use bnum::types::U4096;

use crate::{
    constants::MAX_SQUARES,
    representations::piece::{Bounds, Square},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub bounds: Bounds,
    pub bitboard: U4096,
}

impl Board {
    pub fn new(bounds: Bounds) -> Board {
        debug_assert!(
            bounds.area() <= MAX_SQUARES,
            "board of {} squares does not fit a bitboard",
            bounds.area()
        );

        Board {
            bounds,
            bitboard: U4096::ZERO,
        }
    }

    pub fn set_bit(&mut self, square: Square) {
        #[cfg(debug_assertions)]
        assert!(
            self.bounds.contains(square),
            "square {square:?} is off the board"
        );

        if let Some(index) = self.bounds.index(square) {
            self.bitboard.set_bit(index, true);
        }
    }

    pub fn clear_bit(&mut self, square: Square) {
        if let Some(index) = self.bounds.index(square) {
            self.bitboard.set_bit(index, false);
        }
    }

    pub fn get_bit(&self, square: Square) -> bool {
        self.bounds
            .index(square)
            .is_some_and(|index| self.bitboard.bit(index))
    }

    pub fn lsb(&self) -> Option<Square> {
        if self.bitboard.is_zero() {
            None
        } else {
            Some(self.bounds.square(self.bitboard.trailing_zeros()))
        }
    }

    pub fn count_bits(&self) -> u32 {
        self.bitboard.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.bitboard.is_zero()
    }

    /// The marked squares, lowest index first.
    pub fn squares(&self) -> Vec<Square> {
        let mut bits = self.bitboard;
        let mut result = Vec::with_capacity(self.count_bits() as usize);

        while !bits.is_zero() {
            let index = bits.trailing_zeros();
            result.push(self.bounds.square(index));
            bits.set_bit(index, false);
        }

        result
    }
}

impl BitOrAssign<&Board> for Board {
    fn bitor_assign(&mut self, rhs: &Board) {
        debug_assert_eq!(self.bounds, rhs.bounds);
        self.bitboard |= rhs.bitboard;
    }
}

impl BitAnd for &Board {
    type Output = Board;

    fn bitand(self, rhs: &Board) -> Board {
        debug_assert_eq!(self.bounds, rhs.bounds);
        Board {
            bounds: self.bounds,
            bitboard: self.bitboard & rhs.bitboard,
        }
    }
}
