//! # move_list.rs
//!
//! Implements move resolution, legal move generation and move application.
//!
//! This file decides whether a piece may move to a square and what it
//! captures. The clauses of the piece's grammar are tried in order and the
//! first one that matches decides the outcome. A clause matches when its
//! expression expands to a route (see `combinator.rs`) whose squares are open
//! on the current position and whose capture mode agrees with the target
//! square. Locust segments collect the pieces they jump over as additional
//! captures.
//!
//! En passant and castling need several pieces to cooperate and are layered
//! on top of the grammar. Promotion is applied after a pawn-like piece lands
//! on its far rank. Applying a move returns a `MoveRecord` holding everything
//! needed to take it back.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 18/02/2024

use lazy_static::lazy_static;
use tracing::trace;

use crate::{
    constants::EN_PASSANT_GRAMMAR,
    moves::{
        combinator::{find_route, path_between, Segment},
        move_match::MoveContext,
        threats::threats,
    },
    representations::{
        board::Board,
        grammar::{Clause, MoveGrammar},
        piece::{CastleRole, Piece, PieceKind, Side, Square},
        position::{PieceId, Position},
    },
};

lazy_static! {
    static ref EN_PASSANT: MoveGrammar =
        MoveGrammar::parse(EN_PASSANT_GRAMMAR).unwrap();
}

/// Callbacks into whatever surrounds the engine: a renderer, a prompt, a
/// turn loop. Every method has a do-nothing default.
pub trait GameHooks {
    fn before_move(
        &mut self,
        _position: &Position,
        _mover: PieceId,
        _to: Square
    ) {}

    fn after_move(&mut self, _position: &Position, _record: &MoveRecord) {}

    fn turn_start(&mut self, _side: Side, _position: &Position) {}

    /// The kind a pawn-like piece on its far rank becomes. Anything outside
    /// `PieceKind::PROMOTIONS`, or `None`, means a queen.
    fn promotion_choice(&mut self, _piece: &Piece) -> Option<PieceKind> {
        None
    }

    fn king_threatened(&mut self, _king: &Piece, _attackers: &[PieceId]) {}
}

pub struct NoHooks;

impl GameHooks for NoHooks {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    Normal,
    EnPassant,
    Castle {
        rook: PieceId,
        rook_from: Square,
        rook_to: Square,
    },
}

/// The outcome of a legal move, before it is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub target: Square,
    pub captured: Vec<PieceId>,
    pub special: Special,
}

impl Resolution {
    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

/// An applied move, with snapshots of every piece it touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub mover: PieceId,
    pub from: Square,
    pub to: Square,
    pub captured: Vec<PieceId>,
    pub special: Special,
    pub promotion: Option<PieceKind>,
    mover_before: Piece,
    captured_before: Vec<(PieceId, Piece)>,
    rook_before: Option<(PieceId, Piece)>,
    last_moved_before: Option<PieceId>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Rules {
    pub castling: bool,
}

impl Rules {
    pub const FULL: Rules = Rules { castling: true };
    pub const ATTACKS: Rules = Rules { castling: false };                       /* castling never captures            */
}

/// Checks that every square a route passes over is usable, collecting the
/// pieces jumped by locust segments into `jumped`.
fn route_is_open(
    position: &Position,
    mover: &Piece,
    leaper: bool,
    route: &[Segment],
    jumped: &mut Vec<PieceId>,
) -> bool {
    let origin = mover.square();
    let side = mover.side();
    let occupied = |square: Square| {
        square != origin && !position.is_empty(square)
    };

    for (i, segment) in route.iter().enumerate() {
        let between = path_between(segment.from, segment.to);

        if segment.locust {
            if between.is_empty() {
                return false;
            }

            for square in between {
                match position.occupant(square) {
                    Some(id) if id.side != side
                        && !position.piece(id).is_dummy() =>
                    {
                        if !jumped.contains(&id) {
                            jumped.push(id);
                        }
                    }
                    _ => return false,
                }
            }
        } else if !leaper
            && !segment.leaper
            && between.into_iter().any(occupied)
        {
            return false;
        }

        let landing = i + 1 < route.len();
        if landing && !leaper && occupied(segment.to) {
            return false;
        }
    }

    true
}

fn match_clause(
    position: &Position,
    piece: &Piece,
    clause: &Clause,
    to: Square,
    occupant: Option<PieceId>,
    ctx: &MoveContext,
) -> Option<Vec<PieceId>> {
    if clause.dummy || (clause.first_move && piece.turns > 0) {
        return None;
    }

    if (clause.capture_only && occupant.is_none())
        || (clause.quiet_only && occupant.is_some())
    {
        return None;
    }

    let mut jumped = Vec::new();
    let mut accept = |route: &[Segment]| {
        jumped.clear();
        route_is_open(position, piece, clause.leaper, route, &mut jumped)
    };
    find_route(&clause.expr, piece.square(), to, ctx, &mut accept)?;

    let mut captured: Vec<PieceId> = occupant.into_iter().collect();
    captured.extend(jumped.into_iter().filter(|id| Some(*id) != occupant));

    Some(captured)
}

fn en_passant(
    position: &Position,
    id: PieceId,
    to: Square,
    ctx: &MoveContext,
) -> Option<Resolution> {
    let piece = position.piece(id);
    let victim_id = position.occupant((to.0, piece.y))?;
    let victim = position.piece(victim_id);

    let eligible = victim_id.side != id.side
        && victim.behavior.pawn_like
        && victim.en_passant
        && victim.turns == 1
        && position.last_moved == Some(victim_id)
        && !victim.is_dummy();

    if !eligible {
        return None;
    }

    let from = piece.square();
    EN_PASSANT
        .clauses()
        .iter()
        .any(|c| find_route(&c.expr, from, to, ctx, &mut |_| true).is_some())
        .then(|| Resolution {
            target: to,
            captured: vec![victim_id],
            special: Special::EnPassant,
        })
}

fn castle(position: &Position, id: PieceId, to: Square) -> Option<Resolution> {
    let king = position.piece(id);
    if king.behavior.castle_role != Some(CastleRole::King) || king.turns != 0 {
        return None;
    }

    let (x, y) = king.square();
    if to.1 != y || (to.0 - x).abs() != 2 {
        return None;
    }

    let step = (to.0 - x).signum();
    let mut rook_from = (x + step, y);
    let rook_id = loop {
        if !king.bounds.contains(rook_from) {
            return None;
        }
        if let Some(occupant) = position.occupant(rook_from) {
            break occupant;
        }
        rook_from.0 += step;
    };

    let rook = position.piece(rook_id);
    if rook_id.side != id.side
        || rook.behavior.castle_role != Some(CastleRole::Rook)
        || rook.turns != 0
        || (rook_from.0 - x).abs() < 3
    {
        return None;
    }

    for transit in (0..=2).map(|i| (x + step * i, y)) {
        let mut probe = position.clone();
        probe.piece_mut(id).relocate(transit);

        if !threats(&probe, transit, id.side).is_empty() {
            return None;
        }
    }

    Some(Resolution {
        target: to,
        captured: Vec::new(),
        special: Special::Castle {
            rook: rook_id,
            rook_from,
            rook_to: (x + step, y),
        },
    })
}

pub(crate) fn resolve_with(
    position: &Position,
    id: PieceId,
    to: Square,
    rules: Rules,
) -> Option<Resolution> {
    let piece = position.piece(id);
    if piece.is_captured() || !piece.bounds.contains(to) {
        return None;
    }

    let occupant = position.occupant(to);
    if let Some(other) = occupant {
        if other.side == id.side || position.piece(other).is_dummy() {
            return None;
        }
    }

    let ctx = MoveContext::of(piece);

    for clause in piece.grammar().clauses() {
        if let Some(captured) = match_clause(position, piece, clause, to, occupant, &ctx) {
            return Some(Resolution {
                target: to,
                captured,
                special: Special::Normal,
            });
        }
    }

    if occupant.is_none() {
        if piece.behavior.pawn_like {
            if let Some(resolution) = en_passant(position, id, to, &ctx) {
                return Some(resolution);
            }
        }

        if rules.castling {
            if let Some(resolution) = castle(position, id, to) {
                return Some(resolution);
            }
        }
    }

    None
}

/// Decides whether `id` may move to `to`, and what it would capture.
///
/// Never mutates the position; an illegal move is simply `None`.
pub fn resolve_move(position: &Position, id: PieceId, to: Square) -> Option<Resolution> {
    let resolution = resolve_with(position, id, to, Rules::FULL);

    if resolution.is_none() {
        trace!(piece = %position.piece(id).name, ?to, "move rejected");
    }

    resolution
}

pub(crate) fn legal_moves_with(
    position: &Position,
    id: PieceId,
    rules: Rules,
) -> Vec<(Square, Resolution)> {
    let piece = position.piece(id);
    if piece.is_captured() {
        return Vec::new();
    }

    piece
        .bounds
        .squares()
        .filter_map(|to| resolve_with(position, id, to, rules).map(|r| (to, r)))
        .collect()
}

/// Every destination the piece can legally reach, file by file.
pub fn legal_moves(position: &Position, id: PieceId) -> Vec<Square> {
    legal_moves_with(position, id, Rules::FULL)
        .into_iter()
        .map(|(to, _)| to)
        .collect()
}

/// Every legal `(piece, destination)` pair for a side.
pub fn generate_move_list(position: &Position, side: Side) -> Vec<(PieceId, Square)> {
    generate_resolutions(position, side)
        .into_iter()
        .map(|(id, resolution)| (id, resolution.target))
        .collect()
}

/// Every legal move of a side with its resolution, ready to be applied.
pub fn generate_resolutions(position: &Position, side: Side) -> Vec<(PieceId, Resolution)> {
    position
        .alive(side)
        .flat_map(|id| {
            legal_moves_with(position, id, Rules::FULL)
                .into_iter()
                .map(move |(_, resolution)| (id, resolution))
        })
        .collect()
}

pub fn destination_board(position: &Position, id: PieceId) -> Board {
    let mut board = Board::new(position.bounds);
    for to in legal_moves(position, id) {
        board.set_bit(to);
    }
    board
}

fn promote_if_due(
    position: &mut Position,
    id: PieceId,
    hooks: &mut dyn GameHooks,
) -> Option<PieceKind> {
    let piece = position.piece(id);
    if !piece.behavior.pawn_like || !piece.on_far_rank() {
        return None;
    }

    let kind = hooks
        .promotion_choice(piece)
        .filter(|kind| PieceKind::PROMOTIONS.contains(kind))
        .unwrap_or(PieceKind::Queen);

    position.piece_mut(id).promote(kind).then_some(kind)
}

/// Applies an already resolved move.
pub fn apply_resolution(
    position: &mut Position,
    id: PieceId,
    resolution: Resolution,
    hooks: &mut dyn GameHooks,
) -> MoveRecord {
    let to = resolution.target;
    hooks.before_move(position, id, to);

    let mover_before = position.piece(id).clone();
    let from = mover_before.square();
    let last_moved_before = position.last_moved;
    let captured_before = resolution
        .captured
        .iter()
        .map(|&victim| (victim, position.piece(victim).clone()))
        .collect();

    for &victim in &resolution.captured {
        position.piece_mut(victim).capture();
    }

    let rook_before = match resolution.special {
        Special::Castle { rook, rook_to, .. } => {
            let before = position.piece(rook).clone();
            let castled = position.piece_mut(rook);
            castled.relocate(rook_to);
            castled.turns += 1;
            Some((rook, before))
        }
        _ => None,
    };

    let mover = position.piece_mut(id);
    mover.relocate(to);
    mover.turns += 1;
    mover.en_passant =
        mover.behavior.pawn_like && (to.1 - from.1) * mover.direction == 2;
    position.last_moved = Some(id);

    let promotion = promote_if_due(position, id, hooks);

    let record = MoveRecord {
        mover: id,
        from,
        to,
        captured: resolution.captured,
        special: resolution.special,
        promotion,
        mover_before,
        captured_before,
        rook_before,
        last_moved_before,
    };

    hooks.after_move(position, &record);
    record
}

/// Resolves and applies a move. Returns `None`, leaving the position
/// untouched, when the move is illegal.
pub fn make_move(
    position: &mut Position,
    id: PieceId,
    to: Square,
    hooks: &mut dyn GameHooks,
) -> Option<MoveRecord> {
    let resolution = resolve_move(position, id, to)?;
    Some(apply_resolution(position, id, resolution, hooks))
}

/// Takes back a move applied to this position.
pub fn undo_move(position: &mut Position, record: MoveRecord) {
    *position.piece_mut(record.mover) = record.mover_before;

    for (id, piece) in record.captured_before {
        *position.piece_mut(id) = piece;
    }

    if let Some((id, piece)) = record.rook_before {
        *position.piece_mut(id) = piece;
    }

    position.last_moved = record.last_moved_before;
}

/// Relocates a piece to an empty square without consulting its grammar.
pub fn force_move(
    position: &mut Position,
    id: PieceId,
    to: Square,
    hooks: &mut dyn GameHooks,
) -> Option<MoveRecord> {
    let piece = position.piece(id);
    if piece.is_captured() || !piece.bounds.contains(to) || !position.is_empty(to) {
        return None;
    }

    let resolution = Resolution {
        target: to,
        captured: Vec::new(),
        special: Special::Normal,
    };
    Some(apply_resolution(position, id, resolution, hooks))
}

/// Moves a piece onto an enemy piece and captures it without consulting
/// the mover's grammar.
pub fn force_capture(
    position: &mut Position,
    id: PieceId,
    victim: PieceId,
    hooks: &mut dyn GameHooks,
) -> Option<MoveRecord> {
    let (piece, target) = (position.piece(id), position.piece(victim));
    if piece.is_captured() || target.is_captured() || victim.side == id.side {
        return None;
    }

    let resolution = Resolution {
        target: target.square(),
        captured: vec![victim],
        special: Special::Normal,
    };
    Some(apply_resolution(position, id, resolution, hooks))
}
