//! # combinator.rs
//!
//! Expands rider and sequence expressions into concrete routes.
//!
//! A route is the list of atomic segments a move is made of, each with its
//! start and end square. Riders split the displacement into equal unit steps
//! and evaluate their pattern once per step, chaining endpoints. Sequences
//! search the whole board for an intermediate square through which both
//! halves validate. Nested combinators are handled by keeping a stack of
//! pending goals, so that a failure anywhere in the expansion backtracks to
//! the most recent choice (the next rider count, or the next intermediate
//! square) instead of failing the whole move.
//!
//! Callers receive every complete candidate route through an `accept`
//! callback and decide whether it is usable on the current position, which
//! lets occupancy rules take part in the backtracking.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 02/02/2026

use crate::{
    moves::move_match::{evaluate_atom, MoveContext},
    representations::{
        grammar::{Count, Expr},
        piece::Square,
    },
};

/// One atomic hop of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: Square,
    pub to: Square,
    pub leaper: bool,
    pub locust: bool,
}

pub type Route = Vec<Segment>;

#[derive(Clone, Copy)]
struct Goal<'e> {
    expr: &'e Expr,
    to: Square,
    leaper: bool,
    locust: bool,
}

impl<'e> Goal<'e> {
    fn inner(&self, expr: &'e Expr, to: Square, leaper: bool, locust: bool) -> Self {
        Goal {
            expr,
            to,
            leaper: self.leaper || leaper,
            locust: self.locust || locust,
        }
    }
}

fn chebyshev(from: Square, to: Square) -> i32 {
    (to.0 - from.0).abs().max((to.1 - from.1).abs())
}

fn solve(
    goals: &[Goal],
    from: Square,
    ctx: &MoveContext,
    route: &mut Route,
    accept: &mut dyn FnMut(&[Segment]) -> bool,
) -> bool {
    let Some((goal, rest)) = goals.split_first() else {
        return accept(route);
    };

    match goal.expr {
        Expr::Step(atom) => {
            if !evaluate_atom(atom, from, goal.to, ctx) {
                return false;
            }

            route.push(Segment {
                from,
                to: goal.to,
                leaper: goal.leaper || atom.leaper,
                locust: goal.locust || atom.locust,
            });

            let found = solve(rest, goal.to, ctx, route, accept);
            if !found {
                route.pop();
            }
            found
        }

        Expr::Ride { count, pattern, leaper, locust } => {
            let (dx, dy) = (goal.to.0 - from.0, goal.to.1 - from.1);
            let counts = match *count {
                Count::Fixed(k) => match i32::try_from(k) {
                    Ok(k) if k > 0 => k..=k,
                    _ => return false,
                },
                Count::Wildcard => 1..=chebyshev(from, goal.to),                /* shortest count first               */
            };

            for k in counts {
                if dx % k != 0 || dy % k != 0 {
                    continue;
                }

                let (ux, uy) = (dx / k, dy / k);
                let mut expanded: Vec<Goal> = (1..=k)
                    .map(|i| {
                        let to = (from.0 + ux * i, from.1 + uy * i);
                        goal.inner(pattern, to, *leaper, *locust)
                    })
                    .collect();
                expanded.extend_from_slice(rest);

                if solve(&expanded, from, ctx, route, accept) {
                    return true;
                }
            }

            false
        }

        Expr::Then(first, second) => {
            for mid in ctx.bounds.squares() {
                let mut expanded = vec![
                    goal.inner(first, mid, false, false),
                    goal.inner(second, goal.to, false, false),
                ];
                expanded.extend_from_slice(rest);

                if solve(&expanded, from, ctx, route, accept) {
                    return true;
                }
            }

            false
        }
    }
}

/// Finds the first route realising `expr` from `from` to `to` that `accept`
/// agrees to.
pub fn find_route(
    expr: &Expr,
    from: Square,
    to: Square,
    ctx: &MoveContext,
    accept: &mut dyn FnMut(&[Segment]) -> bool,
) -> Option<Route> {
    let goal = Goal { expr, to, leaper: false, locust: false };
    let mut route = Route::new();

    solve(&[goal], from, ctx, &mut route, accept).then_some(route)
}

/// Expands a rider geometrically, without looking at the board.
pub fn evaluate_rider(
    expr: &Expr,
    from: Square,
    to: Square,
    ctx: &MoveContext
) -> Option<Route> {
    match expr {
        Expr::Ride { .. } => find_route(expr, from, to, ctx, &mut |_| true),
        _ => None,
    }
}

/// Expands a sequence geometrically, without looking at the board.
pub fn evaluate_then(
    expr: &Expr,
    from: Square,
    to: Square,
    ctx: &MoveContext
) -> Option<Route> {
    match expr {
        Expr::Then(_, _) => find_route(expr, from, to, ctx, &mut |_| true),
        _ => None,
    }
}

/// Squares strictly between two squares. The walk goes diagonally until one
/// axis is exhausted, then straight along the other.
pub fn path_between(from: Square, to: Square) -> Vec<Square> {
    let mut path = Vec::new();
    let (mut x, mut y) = from;

    loop {
        let (sx, sy) = ((to.0 - x).signum(), (to.1 - y).signum());
        if (sx, sy) == (0, 0) {
            break;
        }

        x += sx;
        y += sy;
        if (x, y) == to {
            break;
        }
        path.push((x, y));
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::representations::{grammar::MoveGrammar, piece::Bounds};

    fn expr(grammar: &str) -> Expr {
        MoveGrammar::parse(grammar).unwrap().clauses()[0].expr.clone()
    }

    fn ctx() -> MoveContext {
        MoveContext { direction: 1, turns: 0, bounds: Bounds::default() }
    }

    #[test]
    fn fixed_rider_checks_every_unit_step() {
        let double_knight = expr("2(~1/2)");

        assert!(evaluate_rider(&double_knight, (0, 0), (4, 4), &ctx()).is_none());

        let route = evaluate_rider(&double_knight, (0, 0), (2, 4), &ctx()).unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(route[0].to, (1, 2));
        assert_eq!(route[1].to, (2, 4));
        assert!(route.iter().all(|s| s.leaper));
    }

    #[test]
    fn wildcard_rider_prefers_the_shortest_count() {
        let rider = expr("n(1-2x)");

        let route = evaluate_rider(&rider, (0, 0), (4, 4), &ctx()).unwrap();
        assert_eq!(route.len(), 2);

        let route = evaluate_rider(&rider, (0, 0), (3, 3), &ctx()).unwrap();
        assert_eq!(route.len(), 3);
    }

    #[test]
    fn rider_counts_beyond_any_offset_never_match() {
        let pattern = Box::new(expr("1x"));
        let rider = |count| Expr::Ride {
            count: Count::Fixed(count),
            pattern: pattern.clone(),
            leaper: false,
            locust: false,
        };

        assert!(evaluate_rider(&rider(u32::MAX - 1), (0, 0), (2, 4), &ctx()).is_none());
        assert!(evaluate_rider(&rider(0), (0, 0), (2, 2), &ctx()).is_none());
        assert!(evaluate_rider(&rider(2), (0, 0), (2, 2), &ctx()).is_some());
    }

    #[test]
    fn rider_rejects_indivisible_displacement() {
        assert!(evaluate_rider(&expr("2(1+)"), (0, 0), (0, 3), &ctx()).is_none());
        assert!(evaluate_rider(&expr("n(1/2)"), (0, 0), (3, 3), &ctx()).is_none());
    }

    #[test]
    fn then_finds_an_intermediate_square() {
        let gryphon = expr("1x.n+");

        let route = evaluate_then(&gryphon, (0, 0), (1, 5), &ctx()).unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(route[0].to, (1, 1));
        assert_eq!(route[1].to, (1, 5));

        assert!(evaluate_then(&expr("1+.1+"), (0, 0), (3, 0), &ctx()).is_none());
    }

    #[test]
    fn rider_of_sequence_nests() {
        let route = evaluate_rider(&expr("2(1+.1x)"), (0, 0), (4, 2), &ctx())
            .unwrap();

        assert_eq!(route.len(), 4);
        assert_eq!(route[1].to, (2, 1));
        assert_eq!(route[3].to, (4, 2));
    }

    #[test]
    fn accept_can_reject_and_force_backtracking() {
        let gryphon = expr("1x.n+");
        let mut seen = 0;

        let route = find_route(&gryphon, (0, 0), (1, 5), &ctx(), &mut |route| {
            seen += 1;
            route[0].to != (1, 1)
        });

        assert!(route.is_none());
        assert_eq!(seen, 1);
    }

    #[test]
    fn locust_flag_reaches_every_segment() {
        let route = evaluate_rider(&expr("n(^2x>)"), (1, 1), (5, 5), &ctx())
            .unwrap();

        assert_eq!(route.len(), 2);
        assert!(route.iter().all(|s| s.locust));
    }

    #[test]
    fn paths_exclude_endpoints() {
        assert_eq!(path_between((0, 0), (0, 3)), vec![(0, 1), (0, 2)]);
        assert_eq!(path_between((0, 0), (3, 3)), vec![(1, 1), (2, 2)]);
        assert_eq!(path_between((0, 0), (1, 2)), vec![(1, 1)]);
        assert!(path_between((2, 2), (3, 3)).is_empty());
    }
}
