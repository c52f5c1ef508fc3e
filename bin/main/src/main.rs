use std::{env, process};

use game::{GameHooks, MoveRecord, Piece, PieceId, Position};
use io::{
    game_io::{format_game, parse_config_file},
    move_io::format_move,
    piece_io::format_piece_types,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "configs/standard.anm";
const DEFAULT_DEPTH: u8 = 2;
const DEFAULT_MAX_PLIES: usize = 40;

struct ConsoleHooks;

impl GameHooks for ConsoleHooks {
    fn after_move(&mut self, position: &Position, record: &MoveRecord) {
        let piece = position.piece(record.mover);
        println!(
            "{:?} {} {}",
            piece.side(),
            piece.name,
            format_move(record, &position.bounds)
        );
    }

    fn king_threatened(&mut self, king: &Piece, attackers: &[PieceId]) {
        println!(
            "{:?} {} is in check from {} piece(s)",
            king.side(),
            king.name,
            attackers.len()
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let path = args.get(1).map_or(DEFAULT_CONFIG, String::as_str);
    let depth = args
        .get(2)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_DEPTH);
    let max_plies = args
        .get(3)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_MAX_PLIES);

    let config = match parse_config_file(path) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            process::exit(1);
        }
    };

    info!(path, depth, max_plies, "starting self-play");
    println!("{}", format_piece_types(&config.templates));

    let mut game = config.into_game();
    let mut hooks = ConsoleHooks;
    println!("{}", format_game(&game));

    for _ in 0..max_plies {
        match game.play_best(depth, &mut hooks) {
            Ok(Some(_)) => println!("{}", format_game(&game)),
            Ok(None) => {
                println!("{:?} has no moves left", game.side_to_move);
                return;
            }
            Err(e) => {
                error!("{e}");
                process::exit(1);
            }
        }

        if let Some(winner) = game.outcome() {
            println!("{winner:?} wins after {} plies", game.history().len());
            return;
        }
    }

    println!("No result after {max_plies} plies");
}
