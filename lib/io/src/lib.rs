pub mod board_io;
pub mod error;
pub mod game_io;
pub mod move_io;
pub mod piece_io;

pub use error::ConfigError;
pub use game_io::{parse_config, parse_config_file, Config};
