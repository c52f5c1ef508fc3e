//! # game.rs
//!
//! Implements the turn loop wrapper around a live position.
//!
//! A `Game` owns the live position, remembers whose turn it is and keeps the
//! record of every applied move so that moves can be taken back. It is the
//! only place where the search's choice is applied to the live position.
//! After every move the side now to move is announced through the hooks,
//! followed by an alert for each of its kings that is under attack.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 02/02/2026

use crate::{
    error::SearchError,
    moves::{
        move_list::{make_move, undo_move, GameHooks, MoveRecord},
        threats::{check_status, has_lost, threats, CheckStatus},
    },
    representations::{
        piece::{Side, Square},
        position::Position,
    },
    search::minimax::{search, BestMove},
};

#[derive(Debug, Clone)]
pub struct Game {
    pub title: String,
    pub position: Position,
    pub side_to_move: Side,
    history: Vec<MoveRecord>,
}

impl Game {
    /// Starts a game with white to move.
    pub fn new(title: &str, position: Position) -> Self {
        Game {
            title: title.to_string(),
            position,
            side_to_move: Side::White,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The winner, once a side has lost a king.
    pub fn outcome(&self) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|&side| has_lost(&self.position, side))
            .map(Side::opposite)
    }

    pub fn check_status(&self, side: Side) -> CheckStatus {
        check_status(&self.position, side)
    }

    /// Moves the piece of the side to move standing on `from` to `to`.
    ///
    /// Returns `None` and changes nothing when there is no such piece, the
    /// game is already decided, or the move is illegal.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        hooks: &mut dyn GameHooks,
    ) -> Option<&MoveRecord> {
        if self.outcome().is_some() {
            return None;
        }

        let mover = self
            .position
            .occupant(from)
            .filter(|id| id.side == self.side_to_move)?;

        let record = make_move(&mut self.position, mover, to, hooks)?;
        self.history.push(record);
        self.side_to_move = self.side_to_move.opposite();

        hooks.turn_start(self.side_to_move, &self.position);
        self.announce_threats(hooks);

        self.history.last()
    }

    /// Lets the search pick and play a move for the side to move.
    ///
    /// # Errors
    ///
    /// Returns the search error for a depth of zero.
    pub fn play_best(
        &mut self,
        depth: u8,
        hooks: &mut dyn GameHooks,
    ) -> Result<Option<&MoveRecord>, SearchError> {
        match self.best_move(depth)? {
            Some(best) => Ok(self.play(best.from, best.to, hooks)),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns the search error for a depth of zero.
    pub fn best_move(&self, depth: u8) -> Result<Option<BestMove>, SearchError> {
        if self.outcome().is_some() {
            return Ok(None);
        }

        search(&self.position, self.side_to_move, depth).map(|outcome| outcome.best)
    }

    /// Takes back the last move and hands the turn back.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        undo_move(&mut self.position, record.clone());
        self.side_to_move = self.side_to_move.opposite();

        Some(record)
    }

    fn announce_threats(&self, hooks: &mut dyn GameHooks) {
        let side = self.side_to_move;

        for king in self.position.kings(side) {
            let piece = self.position.piece(king);
            if piece.is_captured() {
                continue;
            }

            let attackers = threats(&self.position, piece.square(), side);
            if !attackers.is_empty() {
                hooks.king_threatened(piece, &attackers);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        moves::move_list::NoHooks,
        representations::{
            piece::{Bounds, Piece, PieceKind},
            position::PieceId,
        },
    };
    use ntest::timeout;

    fn add(position: &mut Position, kind: PieceKind, square: Square, side: Side) {
        position.add(Piece::standard(kind, square, side, position.bounds).unwrap());
    }

    #[derive(Default)]
    struct Alerts {
        turns: Vec<Side>,
        threatened: Vec<Vec<PieceId>>,
    }

    impl GameHooks for Alerts {
        fn turn_start(&mut self, side: Side, _position: &Position) {
            self.turns.push(side);
        }

        fn king_threatened(&mut self, _king: &Piece, attackers: &[PieceId]) {
            self.threatened.push(attackers.to_vec());
        }
    }

    fn kings_and_rook() -> Game {
        let mut position = Position::new(Bounds::default());
        add(&mut position, PieceKind::King, (4, 0), Side::White);
        add(&mut position, PieceKind::Rook, (0, 1), Side::White);
        add(&mut position, PieceKind::King, (7, 7), Side::Black);
        Game::new("Test", position)
    }

    #[test]
    fn turns_alternate_and_wrong_side_is_refused() {
        let mut game = kings_and_rook();
        let mut hooks = Alerts::default();

        assert!(game.play((7, 7), (7, 6), &mut hooks).is_none());
        assert!(game.play((0, 1), (0, 7), &mut hooks).is_some());
        assert_eq!(game.side_to_move, Side::Black);
        assert_eq!(hooks.turns, vec![Side::Black]);
        assert_eq!(hooks.threatened.len(), 1);
    }

    #[test]
    fn undo_restores_the_turn_and_position() {
        let mut game = kings_and_rook();
        let before = game.position.clone();

        game.play((0, 1), (0, 5), &mut NoHooks).unwrap();
        let record = game.undo().unwrap();

        assert_eq!(record.to, (0, 5));
        assert_eq!(game.position, before);
        assert_eq!(game.side_to_move, Side::White);
        assert!(game.history().is_empty());
        assert!(game.undo().is_none());
    }

    #[test]
    #[timeout(10000)]
    fn capturing_a_king_ends_the_game() {
        let mut game = kings_and_rook();

        game.play((0, 1), (0, 7), &mut NoHooks).unwrap();
        game.play((7, 7), (6, 7), &mut NoHooks).unwrap();
        game.play((0, 7), (6, 7), &mut NoHooks).unwrap();

        assert_eq!(game.outcome(), Some(Side::White));
        assert_eq!(game.check_status(Side::Black), CheckStatus::Lost);
        assert!(game.play((4, 0), (4, 1), &mut NoHooks).is_none());
        assert_eq!(game.best_move(2), Ok(None));
    }
}
