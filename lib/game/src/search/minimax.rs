//! # minimax.rs
//!
//! Implements the adversarial search.
//!
//! The search is a depth-bounded negamax with optional alpha-beta pruning.
//! Every node expands the legal moves of the side to move on a clone of the
//! position it was handed, so the caller's position is never touched. Leaves
//! are scored by material: the value of the opponent's captured pieces minus
//! the value of our own, seen from the side to move. A node is also a leaf
//! when either side has lost its king or when the side to move has no moves.
//!
//! At the root, the first move reaching the best score is kept; a later move
//! only replaces it when it scores strictly better.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 02/02/2026

use timed::timed;
use tracing::{debug, error};

use crate::{
    constants::SCORE_INFINITY,
    error::SearchError,
    moves::{
        move_list::{apply_resolution, generate_resolutions, NoHooks},
        threats::has_lost,
    },
    representations::{
        piece::{Side, Square},
        position::{PieceId, Position},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BestMove {
    pub piece: PieceId,
    pub from: Square,
    pub to: Square,
    pub score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    pub pruning: bool,
}

impl SearchConfig {
    pub fn new(depth: u8) -> Self {
        SearchConfig { depth, pruning: true }
    }

    pub fn exhaustive(depth: u8) -> Self {
        SearchConfig { depth, pruning: false }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best: Option<BestMove>,                                                 /* None when the side has no moves    */
    pub nodes: u64,
}

fn negamax(
    position: &Position,
    side: Side,
    depth: u8,
    mut alpha: i32,
    beta: i32,
    config: &SearchConfig,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    if depth == 0 || has_lost(position, side) || has_lost(position, side.opposite()) {
        return position.material_score(side);
    }

    let moves = generate_resolutions(position, side);
    if moves.is_empty() {
        return position.material_score(side);
    }

    let mut best = -SCORE_INFINITY;

    for (id, resolution) in moves {
        let mut child = position.clone();
        apply_resolution(&mut child, id, resolution, &mut NoHooks);

        let score = -negamax(
            &child,
            side.opposite(),
            depth - 1,
            -beta,
            -alpha,
            config,
            nodes,
        );

        if score > best {
            best = score;
        }

        if config.pruning {
            if best > alpha {
                alpha = best;
            }
            if alpha >= beta {
                break;
            }
        }
    }

    best
}

/// Searches `depth` plies ahead for `side` with alpha-beta pruning.
///
/// # Errors
///
/// Returns `SearchError::NonPositiveDepth` for a depth of zero.
#[timed(printer = "debug!")]
pub fn search(
    position: &Position,
    side: Side,
    depth: u8
) -> Result<SearchOutcome, SearchError> {
    search_with(position, side, SearchConfig::new(depth))
}

/// Searches with an explicit configuration.
///
/// # Errors
///
/// Returns `SearchError::NonPositiveDepth` for a depth of zero.
pub fn search_with(
    position: &Position,
    side: Side,
    config: SearchConfig,
) -> Result<SearchOutcome, SearchError> {
    if config.depth == 0 {
        error!("search depth must be positive");
        return Err(SearchError::NonPositiveDepth(config.depth));
    }

    let mut nodes = 0;
    let mut alpha = -SCORE_INFINITY;
    let beta = SCORE_INFINITY;
    let mut best: Option<BestMove> = None;

    for (id, resolution) in generate_resolutions(position, side) {
        let from = position.piece(id).square();
        let to = resolution.target;

        let mut child = position.clone();
        apply_resolution(&mut child, id, resolution, &mut NoHooks);

        let score = -negamax(
            &child,
            side.opposite(),
            config.depth - 1,
            -beta,
            -alpha,
            &config,
            &mut nodes,
        );

        if best.map_or(true, |b| score > b.score) {
            best = Some(BestMove { piece: id, from, to, score });
        }

        if config.pruning && score > alpha {
            alpha = score;
        }
    }

    debug!(
        ?side,
        depth = config.depth,
        pruning = config.pruning,
        nodes,
        best = ?best,
        "search finished"
    );

    Ok(SearchOutcome { best, nodes })
}
