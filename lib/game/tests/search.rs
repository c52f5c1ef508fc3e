use ntest::timeout;

use game::{
    search::minimax::{search, search_with, SearchConfig},
    Bounds, Game, NoHooks, Piece, PieceId, PieceKind, Position, SearchError,
    Side, Square,
};

fn add(position: &mut Position, kind: PieceKind, square: Square, side: Side) -> PieceId {
    position.add(Piece::standard(kind, square, side, position.bounds).unwrap())
}

#[test]
#[timeout(10000)]
fn depth_one_prefers_the_bigger_capture() {
    let mut position = Position::new(Bounds::default());
    let rook = add(&mut position, PieceKind::Rook, (0, 0), Side::White);
    add(&mut position, PieceKind::Queen, (0, 6), Side::Black);
    add(&mut position, PieceKind::Knight, (7, 0), Side::Black);

    let best = search(&position, Side::White, 1).unwrap().best.unwrap();

    assert_eq!(best.piece, rook);
    assert_eq!(best.to, (0, 6));
    assert_eq!(best.score, 9);
}

#[test]
#[timeout(10000)]
fn depth_two_avoids_a_defended_piece() {
    let mut position = Position::new(Bounds::default());
    add(&mut position, PieceKind::Queen, (0, 0), Side::White);
    add(&mut position, PieceKind::Knight, (0, 5), Side::Black);
    add(&mut position, PieceKind::Rook, (7, 5), Side::Black);
    add(&mut position, PieceKind::Bishop, (5, 0), Side::Black);

    let best = search(&position, Side::White, 2).unwrap().best.unwrap();

    assert_eq!(best.to, (5, 0));
    assert_eq!(best.score, 3);
}

fn middlegame() -> Position {
    let mut position = Position::new(Bounds::default());
    add(&mut position, PieceKind::King, (4, 0), Side::White);
    add(&mut position, PieceKind::Rook, (0, 0), Side::White);
    add(&mut position, PieceKind::Knight, (2, 2), Side::White);
    add(&mut position, PieceKind::King, (4, 7), Side::Black);
    add(&mut position, PieceKind::Bishop, (5, 4), Side::Black);
    add(&mut position, PieceKind::Pawn, (3, 5), Side::Black);
    position
}

#[test]
#[timeout(120000)]
fn pruning_does_not_change_the_result() {
    let position = middlegame();

    for depth in 1..=3 {
        let pruned = search_with(&position, Side::White, SearchConfig::new(depth))
            .unwrap();
        let exhaustive =
            search_with(&position, Side::White, SearchConfig::exhaustive(depth))
                .unwrap();

        let (pruned_best, exhaustive_best) =
            (pruned.best.unwrap(), exhaustive.best.unwrap());

        assert_eq!(pruned_best.score, exhaustive_best.score, "depth {depth}");
        assert_eq!(pruned_best, exhaustive_best, "depth {depth}");
        assert!(pruned.nodes <= exhaustive.nodes);
    }
}

#[test]
#[timeout(60000)]
fn search_is_deterministic() {
    let position = middlegame();

    let first = search(&position, Side::Black, 2).unwrap();
    let second = search(&position, Side::Black, 2).unwrap();

    assert_eq!(first, second);
}

#[test]
fn non_positive_depth_is_an_error() {
    let position = middlegame();

    assert_eq!(
        search(&position, Side::White, 0),
        Err(SearchError::NonPositiveDepth(0))
    );
}

#[test]
#[timeout(60000)]
fn king_capture_is_decisive() {
    let mut position = Position::new(Bounds::default());
    add(&mut position, PieceKind::Rook, (0, 0), Side::White);
    add(&mut position, PieceKind::King, (0, 7), Side::Black);
    add(&mut position, PieceKind::Queen, (7, 0), Side::Black);

    let mut game = Game::new("King hunt", position);
    let record = game.play_best(2, &mut NoHooks).unwrap().unwrap();

    assert_eq!(record.to, (0, 7));
    assert_eq!(game.outcome(), Some(Side::White));
}
