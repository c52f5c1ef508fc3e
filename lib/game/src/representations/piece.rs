//! # piece.rs
//!
//! Defines piece representation and properties.
//!
//! This file contains the `Piece` record, a plain value type holding a piece's
//! coordinates, direction, turn count, en passant flag and board bounds next to
//! its shared, pre-parsed movement grammar. Cloning a piece copies the plain
//! fields and bumps a reference count, which keeps whole-position clones cheap.
//! A captured piece is parked on the sentinel square and stays in its side's
//! collection for the rest of the game.
//!
//! Piece kinds are templated through `PieceTemplate`, which is also the factory
//! used to rebuild a piece in place when it promotes.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 25/01/2026

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::{
    constants::*,
    error::GrammarError,
    representations::grammar::MoveGrammar,
};

pub type Square = (i32, i32);

/// Board limits: `x_lim`/`y_lim` are exclusive, `lx_lim`/`ly_lim` inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x_lim: i32,
    pub y_lim: i32,
    pub lx_lim: i32,
    pub ly_lim: i32,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::new(DEFAULT_FILES, DEFAULT_RANKS, 0, 0)
    }
}

impl Bounds {
    pub const fn new(x_lim: i32, y_lim: i32, lx_lim: i32, ly_lim: i32) -> Self {
        Bounds { x_lim, y_lim, lx_lim, ly_lim }
    }

    pub fn contains(&self, (x, y): Square) -> bool {
        self.lx_lim <= x && x < self.x_lim && self.ly_lim <= y && y < self.y_lim
    }

    pub fn files(&self) -> i32 {
        self.x_lim.saturating_sub(self.lx_lim).max(0)
    }

    pub fn ranks(&self) -> i32 {
        self.y_lim.saturating_sub(self.ly_lim).max(0)
    }

    /// Number of squares, saturating instead of overflowing on huge limits.
    pub fn area(&self) -> usize {
        let area = self.files() as u64 * self.ranks() as u64;
        usize::try_from(area).unwrap_or(usize::MAX)
    }

    /// Row-major bit index of a square, `None` when off the board.
    pub fn index(&self, square: Square) -> Option<u32> {
        if !self.contains(square) {
            return None;
        }

        let (x, y) = square;
        Some(((y - self.ly_lim) * self.files() + (x - self.lx_lim)) as u32)
    }

    pub fn square(&self, index: u32) -> Square {
        let index = index as i32;
        (
            self.lx_lim + index % self.files(),
            self.ly_lim + index / self.files(),
        )
    }

    /// Every square on the board, file by file.
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        let bounds = *self;
        (bounds.lx_lim..bounds.x_lim)
            .flat_map(move |x| (bounds.ly_lim..bounds.y_lim).map(move |y| (x, y)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::White, Side::Black];

    /// The side moving toward increasing `y` is white.
    pub fn from_direction(direction: i32) -> Self {
        if direction >= 0 { Side::White } else { Side::Black }
    }

    pub fn direction(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    Custom,
}

impl PieceKind {
    /// Kinds a pawn-like piece may become on the far rank.
    pub const PROMOTIONS: [PieceKind; 5] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::King => "King",
            PieceKind::Queen => "Queen",
            PieceKind::Rook => "Rook",
            PieceKind::Bishop => "Bishop",
            PieceKind::Knight => "Knight",
            PieceKind::Pawn => "Pawn",
            PieceKind::Custom => "Custom",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "king" => PieceKind::King,
            "queen" => PieceKind::Queen,
            "rook" => PieceKind::Rook,
            "bishop" => PieceKind::Bishop,
            "knight" => PieceKind::Knight,
            "pawn" => PieceKind::Pawn,
            _ => PieceKind::Custom,
        }
    }

    pub fn default_behavior(self) -> Behavior {
        match self {
            PieceKind::Pawn => Behavior { pawn_like: true, castle_role: None },
            PieceKind::King => Behavior {
                pawn_like: false,
                castle_role: Some(CastleRole::King),
            },
            PieceKind::Rook => Behavior {
                pawn_like: false,
                castle_role: Some(CastleRole::Rook),
            },
            _ => Behavior::default(),
        }
    }

    fn table_index(self) -> Option<usize> {
        match self {
            PieceKind::King => Some(0),
            PieceKind::Queen => Some(1),
            PieceKind::Rook => Some(2),
            PieceKind::Bishop => Some(3),
            PieceKind::Knight => Some(4),
            PieceKind::Pawn => Some(5),
            PieceKind::Custom => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleRole {
    King,
    Rook,
}

/// Special-rule participation that the grammar itself cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Behavior {
    pub pawn_like: bool,
    pub castle_role: Option<CastleRole>,
}

/// Everything that defines a kind of piece, independent of where it stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceTemplate {
    pub name: Arc<str>,
    pub kind: PieceKind,
    pub symbols: [char; 2],                                                     /* white, black                       */
    pub value: i32,
    pub behavior: Behavior,
    grammar: Arc<MoveGrammar>,
}

fn standard_template(
    kind: PieceKind,
    symbols: [char; 2],
    value: i32,
    grammar: &str,
) -> PieceTemplate {
    PieceTemplate {
        name: kind.name().into(),
        kind,
        symbols,
        value,
        behavior: kind.default_behavior(),
        grammar: Arc::new(MoveGrammar::parse(grammar).unwrap()),
    }
}

lazy_static! {
    static ref STANDARD_TEMPLATES: [PieceTemplate; 6] = [
        standard_template(PieceKind::King, ['K', 'k'], KING_VALUE, KING_GRAMMAR),
        standard_template(PieceKind::Queen, ['Q', 'q'], QUEEN_VALUE, QUEEN_GRAMMAR),
        standard_template(PieceKind::Rook, ['R', 'r'], ROOK_VALUE, ROOK_GRAMMAR),
        standard_template(PieceKind::Bishop, ['B', 'b'], BISHOP_VALUE, BISHOP_GRAMMAR),
        standard_template(PieceKind::Knight, ['N', 'n'], KNIGHT_VALUE, KNIGHT_GRAMMAR),
        standard_template(PieceKind::Pawn, ['P', 'p'], PAWN_VALUE, PAWN_GRAMMAR),
    ];
}

impl PieceTemplate {
    /// The built-in template for a standard kind, `None` for custom kinds.
    pub fn standard(kind: PieceKind) -> Option<Self> {
        kind.table_index().map(|i| STANDARD_TEMPLATES[i].clone())
    }

    /// Builds a template from a movement grammar.
    ///
    /// # Arguments
    ///
    /// * `name` - Display name of the piece
    /// * `kind` - Kind the piece is treated as
    /// * `symbols` - Display characters for white and black
    /// * `value` - Material weight used by search scoring
    /// * `behavior` - Participation in en passant, promotion and castling
    /// * `grammar` - Movement grammar source
    pub fn new(
        name: &str,
        kind: PieceKind,
        symbols: [char; 2],
        value: i32,
        behavior: Behavior,
        grammar: &str,
    ) -> Result<Self, GrammarError> {
        Ok(PieceTemplate {
            name: name.into(),
            kind,
            symbols,
            value,
            behavior,
            grammar: Arc::new(MoveGrammar::parse(grammar)?),
        })
    }

    pub fn grammar(&self) -> &MoveGrammar {
        &self.grammar
    }

    pub fn spawn(&self, square: Square, side: Side, bounds: Bounds) -> Piece {
        Piece {
            name: self.name.clone(),
            kind: self.kind,
            symbol: self.symbols[side.index()],
            value: self.value,
            behavior: self.behavior,
            x: square.0,
            y: square.1,
            direction: side.direction(),
            turns: 0,
            en_passant: false,
            bounds,
            grammar: self.grammar.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub name: Arc<str>,
    pub kind: PieceKind,
    pub symbol: char,
    pub value: i32,
    pub behavior: Behavior,
    pub x: i32,
    pub y: i32,
    pub direction: i32,
    pub turns: u32,
    pub en_passant: bool,
    pub bounds: Bounds,
    grammar: Arc<MoveGrammar>,
}

impl Piece {
    /// Creates a standard piece, `None` for `PieceKind::Custom`.
    pub fn standard(
        kind: PieceKind,
        square: Square,
        side: Side,
        bounds: Bounds,
    ) -> Option<Self> {
        PieceTemplate::standard(kind).map(|t| t.spawn(square, side, bounds))
    }

    /// Creates a custom piece from a movement grammar.
    ///
    /// # Errors
    ///
    /// Returns the grammar error when the movement cannot be parsed, for
    /// example when it still uses the deprecated `&` operator.
    pub fn custom(
        name: &str,
        grammar: &str,
        value: i32,
        square: Square,
        side: Side,
        bounds: Bounds,
    ) -> Result<Self, GrammarError> {
        let symbol = name.chars().next().unwrap_or('?');
        let symbols = [symbol.to_ascii_uppercase(), symbol.to_ascii_lowercase()];

        PieceTemplate::new(
            name,
            PieceKind::Custom,
            symbols,
            value,
            Behavior::default(),
            grammar,
        )
        .map(|t| t.spawn(square, side, bounds))
    }

    /// An immobile stand-in placed on an empty square so that attacks on
    /// that square can be resolved as captures.
    pub fn phantom(square: Square, side: Side, bounds: Bounds) -> Self {
        Piece {
            name: "Phantom".into(),
            kind: PieceKind::Custom,
            symbol: '?',
            value: 0,
            behavior: Behavior::default(),
            x: square.0,
            y: square.1,
            direction: side.direction(),
            turns: 0,
            en_passant: false,
            bounds,
            grammar: Arc::default(),
        }
    }

    #[inline(always)]
    pub fn square(&self) -> Square {
        (self.x, self.y)
    }

    #[inline(always)]
    pub fn is_captured(&self) -> bool {
        self.square() == SENTINEL
    }

    #[inline(always)]
    pub fn side(&self) -> Side {
        Side::from_direction(self.direction)
    }

    pub fn grammar(&self) -> &MoveGrammar {
        &self.grammar
    }

    pub fn is_king(&self) -> bool {
        self.grammar.is_king()
    }

    pub fn is_dummy(&self) -> bool {
        self.grammar.is_dummy()
    }

    pub fn relocate(&mut self, square: Square) {
        (self.x, self.y) = square;
    }

    pub fn capture(&mut self) {
        self.relocate(SENTINEL);
        self.en_passant = false;
    }

    pub fn on_far_rank(&self) -> bool {
        if self.is_captured() {
            return false;
        }

        if self.direction > 0 {
            self.y == self.bounds.y_lim - 1
        } else {
            self.y == self.bounds.ly_lim
        }
    }

    /// Replaces this piece's identity with a standard kind in place. The
    /// square, direction, turn count and bounds carry over.
    ///
    /// Returns `false` and leaves the piece untouched for custom kinds.
    pub fn promote(&mut self, kind: PieceKind) -> bool {
        let Some(template) = PieceTemplate::standard(kind) else {
            return false;
        };

        let mut promoted = template.spawn(self.square(), self.side(), self.bounds);
        promoted.turns = self.turns;
        *self = promoted;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_bounds_report_their_area_without_overflow() {
        assert_eq!(Bounds::new(70000, 70000, 0, 0).area(), 4_900_000_000);

        let extreme = Bounds::new(i32::MAX, i32::MAX, i32::MIN, i32::MIN);
        assert_eq!(extreme.files(), i32::MAX);
        assert!(extreme.area() > MAX_SQUARES);

        assert_eq!(Bounds::new(0, 8, 4, 0).area(), 0);
    }

    #[test]
    fn bounds_respect_offsets() {
        let bounds = Bounds::new(6, 5, 1, 2);

        assert!(bounds.contains((1, 2)));
        assert!(bounds.contains((5, 4)));
        assert!(!bounds.contains((6, 4)));
        assert!(!bounds.contains((0, 3)));
        assert!(!bounds.contains(SENTINEL));

        assert_eq!(bounds.area(), 15);
        assert_eq!(bounds.squares().count(), 15);
        assert_eq!(bounds.squares().next(), Some((1, 2)));

        for square in bounds.squares() {
            let index = bounds.index(square).unwrap();
            assert_eq!(bounds.square(index), square);
        }
    }

    #[test]
    fn standard_pieces_carry_their_kind() {
        let bounds = Bounds::default();
        let king = Piece::standard(PieceKind::King, (4, 0), Side::White, bounds)
            .unwrap();
        let pawn = Piece::standard(PieceKind::Pawn, (4, 6), Side::Black, bounds)
            .unwrap();

        assert!(king.is_king());
        assert_eq!(king.symbol, 'K');
        assert_eq!(king.behavior.castle_role, Some(CastleRole::King));
        assert_eq!(pawn.symbol, 'p');
        assert_eq!(pawn.direction, -1);
        assert!(pawn.behavior.pawn_like);
        assert!(Piece::standard(PieceKind::Custom, (0, 0), Side::White, bounds)
            .is_none());
    }

    #[test]
    fn custom_piece_rejects_deprecated_grammar() {
        let bounds = Bounds::default();

        assert_eq!(
            Piece::custom("Zebra", "2&1+", 4, (0, 0), Side::White, bounds),
            Err(GrammarError::DeprecatedRepeat)
        );

        let zebra =
            Piece::custom("Zebra", "~2/3", 4, (0, 0), Side::Black, bounds)
                .unwrap();
        assert_eq!(zebra.symbol, 'z');
        assert_eq!(zebra.kind, PieceKind::Custom);
    }

    #[test]
    fn promotion_keeps_square_and_turns() {
        let bounds = Bounds::default();
        let mut pawn = Piece::standard(PieceKind::Pawn, (3, 7), Side::White, bounds)
            .unwrap();
        pawn.turns = 5;
        pawn.en_passant = true;

        assert!(pawn.on_far_rank());
        assert!(pawn.promote(PieceKind::Knight));
        assert_eq!(pawn.kind, PieceKind::Knight);
        assert_eq!(pawn.square(), (3, 7));
        assert_eq!(pawn.turns, 5);
        assert_eq!(pawn.value, KNIGHT_VALUE);
        assert_eq!(pawn.symbol, 'N');
        assert!(!pawn.en_passant);
        assert!(!pawn.promote(PieceKind::Custom));
    }

    #[test]
    fn capture_parks_on_sentinel() {
        let mut rook =
            Piece::standard(PieceKind::Rook, (0, 0), Side::White, Bounds::default())
                .unwrap();

        rook.capture();
        assert!(rook.is_captured());
        assert!(!rook.on_far_rank());
    }
}
