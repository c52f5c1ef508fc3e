//! # threats.rs
//!
//! Implements threat, check and loss detection.
//!
//! A square is threatened for a side when some enemy piece has a capturing
//! move that removes whatever stands on it. Empty squares are probed as if a
//! friendly piece stood there, so the same resolver answers both "is my king
//! attacked" and "may my king pass through this square". Kings are the pieces
//! whose grammar carries the `k` flag; a side whose king sits on the sentinel
//! has lost.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 02/02/2026

use std::borrow::Cow;

use crate::{
    moves::move_list::{legal_moves_with, resolve_with, Rules},
    representations::{
        board::Board,
        piece::{Piece, Side, Square},
        position::{PieceId, Position},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Safe,
    Check { attackers: Vec<PieceId> },
    Lost,
}

fn captures_target(
    position: &Position,
    attacker: PieceId,
    square: Square,
    target: PieceId,
) -> bool {
    if position.piece(attacker).grammar().has_locust() {                        /* may jump it and land elsewhere     */
        return legal_moves_with(position, attacker, Rules::ATTACKS)
            .iter()
            .any(|(_, resolution)| resolution.captured.contains(&target));
    }

    resolve_with(position, attacker, square, Rules::ATTACKS)
        .is_some_and(|resolution| resolution.captured.contains(&target))
}

/// Enemy pieces that could capture on `square`, as if a piece of `side`
/// stood there.
pub fn threats(position: &Position, square: Square, side: Side) -> Vec<PieceId> {
    if !position.bounds.contains(square) {
        return Vec::new();
    }

    let (probe, target) = match position.occupant(square) {
        Some(id) if id.side == side => (Cow::Borrowed(position), id),
        occupant => {
            let mut probe = position.clone();
            if let Some(id) = occupant {
                probe.piece_mut(id).capture();
            }
            let target = probe.add(Piece::phantom(square, side, position.bounds));
            (Cow::Owned(probe), target)
        }
    };

    probe
        .alive(side.opposite())
        .filter(|&attacker| captures_target(&probe, attacker, square, target))
        .collect()
}

/// Every square `side` could capture on.
pub fn attack_board(position: &Position, side: Side) -> Board {
    let mut board = Board::new(position.bounds);

    for square in position.bounds.squares() {
        if !threats(position, square, side.opposite()).is_empty() {
            board.set_bit(square);
        }
    }

    board
}

/// A side has lost once any of its king-flagged pieces has been captured.
pub fn has_lost(position: &Position, side: Side) -> bool {
    position
        .kings(side)
        .any(|king| position.piece(king).is_captured())
}

pub fn check_status(position: &Position, side: Side) -> CheckStatus {
    if has_lost(position, side) {
        return CheckStatus::Lost;
    }

    let mut attackers = Vec::new();
    for king in position.kings(side) {
        for attacker in threats(position, position.piece(king).square(), side) {
            if !attackers.contains(&attacker) {
                attackers.push(attacker);
            }
        }
    }

    if attackers.is_empty() {
        CheckStatus::Safe
    } else {
        CheckStatus::Check { attackers }
    }
}

pub fn in_check(position: &Position, side: Side) -> bool {
    matches!(check_status(position, side), CheckStatus::Check { .. })
}
