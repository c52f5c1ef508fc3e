//! # position.rs
//!
//! Defines the two-sided collection of pieces that makes up a game position.
//!
//! A position owns one ordered piece list per side. There is no board grid:
//! occupancy is resolved by a linear scan for a live piece on the queried
//! square. Captured pieces keep their slot so that `PieceId`s stay valid for
//! the whole game, which is what lets move records and search results refer
//! to pieces by index.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 25/01/2026

use crate::representations::piece::{Bounds, Piece, Side, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceId {
    pub side: Side,
    pub index: usize,
}

impl PieceId {
    pub fn new(side: Side, index: usize) -> Self {
        PieceId { side, index }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Position {
    pub bounds: Bounds,
    pieces: [Vec<Piece>; 2],
    pub last_moved: Option<PieceId>,
}

impl Position {
    pub fn new(bounds: Bounds) -> Self {
        Position {
            bounds,
            pieces: [Vec::new(), Vec::new()],
            last_moved: None,
        }
    }

    /// Adds a piece to the collection of the side its direction points to.
    pub fn add(&mut self, piece: Piece) -> PieceId {
        let side = piece.side();
        let list = &mut self.pieces[side.index()];
        list.push(piece);

        PieceId::new(side, list.len() - 1)
    }

    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.side.index()][id.index]
    }

    pub fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.side.index()][id.index]
    }

    pub fn get(&self, id: PieceId) -> Option<&Piece> {
        self.pieces[id.side.index()].get(id.index)
    }

    pub fn pieces(&self, side: Side) -> &[Piece] {
        &self.pieces[side.index()]
    }

    pub fn ids(&self, side: Side) -> impl Iterator<Item = PieceId> + '_ {
        (0..self.pieces[side.index()].len()).map(move |i| PieceId::new(side, i))
    }

    /// Pieces of a side that are still on the board.
    pub fn alive(&self, side: Side) -> impl Iterator<Item = PieceId> + '_ {
        self.ids(side).filter(|&id| !self.piece(id).is_captured())
    }

    pub fn all_alive(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.alive(Side::White).chain(self.alive(Side::Black))
    }

    pub fn kings(&self, side: Side) -> impl Iterator<Item = PieceId> + '_ {
        self.ids(side).filter(|&id| self.piece(id).is_king())
    }

    pub fn occupant(&self, square: Square) -> Option<PieceId> {
        if !self.bounds.contains(square) {
            return None;
        }

        self.all_alive().find(|&id| self.piece(id).square() == square)
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.occupant(square).is_none()
    }

    /// Total value of this side's pieces parked on the sentinel.
    pub fn material_lost(&self, side: Side) -> i32 {
        self.pieces(side)
            .iter()
            .filter(|p| p.is_captured())
            .map(|p| p.value)
            .sum()
    }

    /// Material balance from `side`'s point of view: what the opponent has
    /// lost minus what `side` has lost.
    pub fn material_score(&self, side: Side) -> i32 {
        self.material_lost(side.opposite()) - self.material_lost(side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representations::piece::PieceKind;

    fn piece(kind: PieceKind, square: Square, side: Side) -> Piece {
        Piece::standard(kind, square, side, Bounds::default()).unwrap()
    }

    #[test]
    fn pieces_are_filed_by_direction() {
        let mut position = Position::new(Bounds::default());
        let rook = position.add(piece(PieceKind::Rook, (0, 0), Side::White));
        let queen = position.add(piece(PieceKind::Queen, (3, 7), Side::Black));

        assert_eq!(rook, PieceId::new(Side::White, 0));
        assert_eq!(queen, PieceId::new(Side::Black, 0));
        assert_eq!(position.occupant((3, 7)), Some(queen));
        assert!(position.is_empty((4, 4)));
    }

    #[test]
    fn captured_pieces_leave_the_board_but_keep_their_slot() {
        let mut position = Position::new(Bounds::default());
        let knight = position.add(piece(PieceKind::Knight, (1, 0), Side::White));
        position.add(piece(PieceKind::Queen, (3, 7), Side::Black));

        position.piece_mut(knight).capture();

        assert_eq!(position.occupant((1, 0)), None);
        assert_eq!(position.alive(Side::White).count(), 0);
        assert_eq!(position.ids(Side::White).count(), 1);
        assert_eq!(position.material_lost(Side::White), 3);
        assert_eq!(position.material_score(Side::Black), 3);
        assert_eq!(position.material_score(Side::White), -3);
    }
}
