//! # move_match.rs
//!
//! Implements the atomic movement predicate.
//!
//! This file evaluates a single atomic step of a movement grammar against a
//! start and end square. Every constraint of the atom is conjunctive: board
//! bounds, a non-null displacement, the dummy and first-move flags, the shape
//! of the displacement, the forward/backward heading and left/right side
//! (both relative to the piece's own direction), and finally the distance.
//! Occupancy is not considered here; that is the resolver's business.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 02/02/2026

use crate::representations::{
    grammar::{Atom, Distance, Heading, Lateral, Shape},
    piece::{Bounds, Piece, Square},
};

/// The parts of a piece's state that an atomic step depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveContext {
    pub direction: i32,
    pub turns: u32,
    pub bounds: Bounds,
}

impl MoveContext {
    pub fn of(piece: &Piece) -> Self {
        MoveContext {
            direction: piece.direction,
            turns: piece.turns,
            bounds: piece.bounds,
        }
    }
}

fn shape_matches(shape: Shape, ax: u32, ay: u32) -> bool {
    match shape {
        Shape::Omni => ax == 0 || ay == 0 || ax == ay,
        Shape::Orthogonal => ax == 0 || ay == 0,
        Shape::Diagonal => ax == ay,
        Shape::Free => true,
    }
}

fn heading_matches(heading: Heading, forward: i32) -> bool {
    match heading {
        Heading::Any => true,
        Heading::Forward { sideways: false } => forward > 0,
        Heading::Forward { sideways: true } => forward >= 0,
        Heading::Backward { sideways: false } => forward < 0,
        Heading::Backward { sideways: true } => forward <= 0,
        Heading::Vertical => forward != 0,
        Heading::Sideways => forward == 0,
    }
}

fn lateral_matches(lateral: Lateral, rightward: i32) -> bool {
    match lateral {
        Lateral::Any => true,
        Lateral::Right => rightward > 0,
        Lateral::Left => rightward < 0,
        Lateral::Either => rightward != 0,
    }
}

fn distance_matches(distance: Distance, ax: u32, ay: u32) -> bool {
    match distance {
        Distance::Unbounded => true,
        Distance::Single(span) => span.matches(ax.max(ay)),
        Distance::Paired { first, second, strict } => {
            (first.matches(ax) && second.matches(ay))
                || (!strict && first.matches(ay) && second.matches(ax))
        }
    }
}

/// Evaluates one atomic step from `from` to `to`.
///
/// # Examples
///
/// ```
/// use game::moves::move_match::{evaluate_atom, MoveContext};
/// use game::representations::grammar::{Expr, MoveGrammar};
/// use game::representations::piece::Bounds;
///
/// let knight = MoveGrammar::parse("~1/2").unwrap();
/// let Expr::Step(atom) = &knight.clauses()[0].expr else { unreachable!() };
/// let ctx = MoveContext { direction: 1, turns: 0, bounds: Bounds::default() };
///
/// assert!(evaluate_atom(atom, (1, 0), (2, 2), &ctx));
/// assert!(evaluate_atom(atom, (1, 0), (3, 1), &ctx));
/// assert!(!evaluate_atom(atom, (1, 0), (3, 2), &ctx));
/// ```
pub fn evaluate_atom(
    atom: &Atom,
    from: Square,
    to: Square,
    ctx: &MoveContext
) -> bool {
    if !ctx.bounds.contains(to) || from == to {
        return false;
    }

    if atom.dummy || (atom.first_move && ctx.turns > 0) {
        return false;
    }

    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let (ax, ay) = (dx.unsigned_abs(), dy.unsigned_abs());

    shape_matches(atom.shape, ax, ay)
        && heading_matches(atom.heading, dy * ctx.direction)
        && lateral_matches(atom.lateral, dx * ctx.direction)
        && distance_matches(atom.distance, ax, ay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representations::grammar::{Expr, MoveGrammar};

    fn atom(grammar: &str) -> Atom {
        let parsed = MoveGrammar::parse(grammar).unwrap();
        match &parsed.clauses()[0].expr {
            Expr::Step(atom) => atom.clone(),
            other => panic!("expected a step, got {other:?}"),
        }
    }

    fn ctx(direction: i32, turns: u32) -> MoveContext {
        MoveContext { direction, turns, bounds: Bounds::default() }
    }

    #[test]
    fn rook_slides_orthogonally_any_distance() {
        let rook = atom("n+");

        assert!(evaluate_atom(&rook, (0, 0), (0, 7), &ctx(1, 0)));
        assert!(evaluate_atom(&rook, (0, 0), (5, 0), &ctx(1, 0)));
        assert!(!evaluate_atom(&rook, (0, 0), (1, 2), &ctx(1, 0)));
        assert!(!evaluate_atom(&rook, (0, 0), (0, 0), &ctx(1, 0)));
    }

    #[test]
    fn destination_must_be_inside_bounds() {
        let king = atom("1*");
        let offset = MoveContext {
            direction: 1,
            turns: 0,
            bounds: Bounds::new(8, 8, 2, 0),
        };

        assert!(!evaluate_atom(&king, (7, 3), (8, 3), &ctx(1, 0)));
        assert!(!evaluate_atom(&king, (2, 3), (1, 3), &offset));
        assert!(evaluate_atom(&king, (3, 3), (2, 3), &offset));
        assert!(!evaluate_atom(&king, (0, 0), (0, -1), &ctx(1, 0)));
    }

    #[test]
    fn heading_is_relative_to_direction() {
        let push = atom("1>+");

        assert!(evaluate_atom(&push, (4, 1), (4, 2), &ctx(1, 0)));
        assert!(!evaluate_atom(&push, (4, 1), (4, 0), &ctx(1, 0)));
        assert!(evaluate_atom(&push, (4, 6), (4, 5), &ctx(-1, 0)));
        assert!(!evaluate_atom(&push, (4, 6), (5, 6), &ctx(1, 0)));

        let sideways = atom("1>=+");
        assert!(evaluate_atom(&sideways, (4, 6), (5, 6), &ctx(-1, 0)));
        assert!(!evaluate_atom(&sideways, (4, 6), (4, 7), &ctx(-1, 0)));

        let either = atom("1<>+");
        assert!(evaluate_atom(&either, (4, 4), (4, 3), &ctx(1, 0)));
        assert!(!evaluate_atom(&either, (4, 4), (3, 4), &ctx(1, 0)));

        let level = atom("n=");
        assert!(evaluate_atom(&level, (0, 4), (7, 4), &ctx(1, 0)));
        assert!(!evaluate_atom(&level, (0, 4), (1, 5), &ctx(1, 0)));
    }

    #[test]
    fn sides_flip_with_direction() {
        let right = atom("1xr>");

        assert!(evaluate_atom(&right, (3, 3), (4, 4), &ctx(1, 0)));
        assert!(!evaluate_atom(&right, (3, 3), (2, 4), &ctx(1, 0)));
        assert!(evaluate_atom(&right, (3, 3), (2, 2), &ctx(-1, 0)));
    }

    #[test]
    fn first_move_only_steps() {
        let double = atom("i2>+");

        assert!(evaluate_atom(&double, (0, 1), (0, 3), &ctx(1, 0)));
        assert!(!evaluate_atom(&double, (0, 1), (0, 3), &ctx(1, 1)));
    }

    #[test]
    fn dummy_never_moves() {
        assert!(!evaluate_atom(&atom("d1*"), (3, 3), (3, 4), &ctx(1, 0)));
    }

    #[test]
    fn distances_ranges_and_pairs() {
        let short = atom("2-3x");
        assert!(!evaluate_atom(&short, (0, 0), (1, 1), &ctx(1, 0)));
        assert!(evaluate_atom(&short, (0, 0), (2, 2), &ctx(1, 0)));
        assert!(evaluate_atom(&short, (0, 0), (3, 3), &ctx(1, 0)));
        assert!(!evaluate_atom(&short, (0, 0), (4, 4), &ctx(1, 0)));

        let camel = atom("1/3");
        assert!(evaluate_atom(&camel, (4, 4), (5, 7), &ctx(1, 0)));
        assert!(evaluate_atom(&camel, (4, 4), (1, 5), &ctx(1, 0)));

        let strict = atom("s1/3");
        assert!(evaluate_atom(&strict, (4, 4), (5, 7), &ctx(1, 0)));
        assert!(!evaluate_atom(&strict, (4, 4), (1, 5), &ctx(1, 0)));

        let wild = atom("1/n");
        assert!(evaluate_atom(&wild, (0, 0), (1, 6), &ctx(1, 0)));
        assert!(evaluate_atom(&wild, (0, 0), (5, 1), &ctx(1, 0)));
        assert!(!evaluate_atom(&wild, (0, 0), (2, 3), &ctx(1, 0)));
    }
}
