pub mod representations {
	pub mod board;
	pub mod grammar;
	pub mod piece;
	pub mod position;
}

pub mod moves {
	pub mod move_parse;
	pub mod move_match;
	pub mod combinator;
	pub mod move_list;
	pub mod threats;
}

pub mod search {
	pub mod minimax;
}

pub mod constants;
pub mod error;
pub mod game;

pub use error::{GrammarError, SearchError};
pub use game::Game;
pub use moves::move_list::{GameHooks, MoveRecord, NoHooks};
pub use representations::{
	grammar::MoveGrammar,
	piece::{Bounds, Piece, PieceKind, Side, Square},
	position::{PieceId, Position},
};
