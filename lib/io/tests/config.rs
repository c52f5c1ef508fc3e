use game::{
    moves::move_list::generate_move_list, Bounds, NoHooks, PieceKind, Side,
};
use io::{
    game_io::{format_game, parse_config, parse_config_file},
    move_io::format_move,
    ConfigError,
};
use ntest::timeout;

const STANDARD: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/standard.anm");
const CHECKERS: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../configs/checkers.anm");

#[test]
fn standard_chess_loads() {
    let config = parse_config_file(STANDARD).unwrap();

    assert_eq!(config.title, "Standard Chess");
    assert_eq!(config.bounds, Bounds::default());
    assert_eq!(config.templates.len(), 6);
    assert_eq!(config.position.pieces(Side::White).len(), 16);
    assert_eq!(config.position.pieces(Side::Black).len(), 16);

    let king = config.position.occupant((4, 0)).unwrap();
    assert_eq!(config.position.piece(king).kind, PieceKind::King);
    assert!(config.position.piece(king).is_king());

    let pawn = config.position.occupant((3, 6)).unwrap();
    assert_eq!(config.position.piece(pawn).symbol, 'p');
    assert_eq!(config.position.piece(pawn).direction, -1);
}

#[test]
#[timeout(10000)]
fn standard_opening_has_twenty_moves() {
    let config = parse_config_file(STANDARD).unwrap();

    assert_eq!(generate_move_list(&config.position, Side::White).len(), 20);
    assert_eq!(generate_move_list(&config.position, Side::Black).len(), 20);
}

#[test]
#[timeout(10000)]
fn checkers_men_step_diagonally_forward() {
    let config = parse_config_file(CHECKERS).unwrap();

    assert_eq!(config.position.pieces(Side::White).len(), 12);
    assert_eq!(config.position.pieces(Side::Black).len(), 12);
    assert_eq!(generate_move_list(&config.position, Side::White).len(), 7);
}

#[test]
fn moves_are_formatted_in_square_names() {
    let mut game = parse_config_file(STANDARD).unwrap().into_game();
    let bounds = game.position.bounds;

    let record = game.play((4, 1), (4, 3), &mut NoHooks).unwrap();
    assert_eq!(format_move(record, &bounds), "e2-e4");

    game.play((3, 6), (3, 4), &mut NoHooks).unwrap();
    let record = game.play((4, 3), (3, 4), &mut NoHooks).unwrap();
    assert_eq!(format_move(record, &bounds), "e4xd5");

    let shown = format_game(&game);
    assert!(shown.starts_with("Standard Chess\n"));
    assert!(shown.contains("Black to move"));
}

#[test]
fn missing_file_is_reported() {
    let error = parse_config_file("no/such/variant.anm").unwrap_err();
    assert!(matches!(error, ConfigError::Read { .. }));
}

#[test]
fn malformed_configs_are_rejected() {
    let deprecated = "Old\n8,8,0,0\n1\nRider,R,r,5,2&1+\n8/8/8/8/8/8/8/8\n";
    assert!(matches!(
        parse_config(deprecated),
        Err(ConfigError::Grammar { line: 4, .. })
    ));

    let unknown = "Odd\n2,2,0,0\n1\nKing,K,k,1000,k1*\nK1/1q\n";
    assert!(matches!(
        parse_config(unknown),
        Err(ConfigError::UnknownSymbol { line: 5, symbol: 'q' })
    ));

    let huge = "Huge\n65,64,0,0\n0\n64\n";
    assert!(matches!(
        parse_config(huge),
        Err(ConfigError::BoardTooLarge { squares: 4160, max: 4096 })
    ));

    let overflowing = "T\n70000,70000,0,0\n0\n";
    assert!(matches!(
        parse_config(overflowing),
        Err(ConfigError::BoardTooLarge { max: 4096, .. })
    ));

    let extreme = "T\n2147483647,2147483647,-2147483648,-2147483648\n0\n";
    assert!(matches!(
        parse_config(extreme),
        Err(ConfigError::BoardTooLarge { max: 4096, .. })
    ));

    let long_run = "Long\n8,1,0,0\n1\nKing,K,k,1000,k1*\nK99999999999\n";
    assert!(matches!(
        parse_config(long_run),
        Err(ConfigError::Malformed { line: 5, .. })
    ));

    let short_rank = "Short\n3,1,0,0\n1\nKing,K,k,1000,k1*\nK1\n";
    assert!(matches!(
        parse_config(short_rank),
        Err(ConfigError::Malformed { line: 5, .. })
    ));

    let truncated = "Truncated\n8,8,0,0\n2\nKing,K,k,1000,k1*\n";
    assert!(matches!(parse_config(truncated), Err(ConfigError::Malformed { .. })));
}

#[test]
fn offset_boards_and_blank_sides() {
    let contents = "\
Offset
6,3,2,1

1
Wall,_,w,inf,d
w3/4
";
    let config = parse_config(contents).unwrap();

    assert_eq!(config.bounds, Bounds::new(6, 3, 2, 1));
    assert_eq!(config.position.pieces(Side::White).len(), 0);

    let wall = config.position.occupant((2, 2)).unwrap();
    assert!(config.position.piece(wall).is_dummy());
    assert_eq!(config.position.piece(wall).value, u16::MAX as i32);
}
