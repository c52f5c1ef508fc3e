//! # game_io.rs
//!
//! Implements variant configuration parsing and game formatting functions.
//!
//! This file contains functionality for reading variant configuration files,
//! parsing FEN-like placement strings, and formatting a running game for
//! display. A configuration names the variant, fixes the board limits,
//! defines every piece type with its movement grammar, and places the pieces.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 25/01/2026

use std::{collections::HashMap, fs, path::Path};

use game::{
    constants::MAX_SQUARES,
    moves::threats::CheckStatus,
    representations::piece::{Behavior, CastleRole, PieceTemplate},
    Bounds, Game, PieceKind, Position, Side,
};
use tracing::debug;

use crate::{
    board_io::format_position,
    error::ConfigError,
};

/// A parsed variant: its piece types and starting position.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub bounds: Bounds,
    pub templates: Vec<PieceTemplate>,
    pub position: Position,
}

impl Config {
    pub fn into_game(self) -> Game {
        Game::new(&self.title, self.position)
    }
}

fn malformed(line: usize, message: impl Into<String>) -> ConfigError {
    ConfigError::Malformed { line, message: message.into() }
}

fn parse_number<T: std::str::FromStr>(
    text: &str,
    line: usize,
    what: &str
) -> Result<T, ConfigError> {
    text.trim()
        .parse()
        .map_err(|_| malformed(line, format!("invalid {what}: {}", text.trim())))
}

fn parse_symbol(text: &str, line: usize) -> Result<char, ConfigError> {
    let mut chars = text.trim().chars();

    match (chars.next(), chars.next()) {
        (Some(symbol), None) => Ok(symbol),
        _ => Err(malformed(line, format!("invalid symbol: {}", text.trim()))),
    }
}

fn parse_bounds(text: &str, line: usize) -> Result<Bounds, ConfigError> {
    let parts: Vec<&str> = text.split(',').collect();
    if parts.len() != 4 {
        return Err(malformed(
            line,
            "board line must have 4 comma-separated values",
        ));
    }

    let bounds = Bounds::new(
        parse_number(parts[0], line, "x limit")?,
        parse_number(parts[1], line, "y limit")?,
        parse_number(parts[2], line, "lower x limit")?,
        parse_number(parts[3], line, "lower y limit")?,
    );

    if bounds.area() == 0 {
        return Err(malformed(line, "board has no squares"));
    }

    if bounds.area() > MAX_SQUARES {
        return Err(ConfigError::BoardTooLarge {
            squares: bounds.area(),
            max: MAX_SQUARES,
        });
    }

    Ok(bounds)
}

/// Parses a piece definition: `name,white,black,value,grammar`.
///
/// - Prefix the name with `^` for a pawn-like piece (en passant, promotion)
/// - Prefix the name with `#` for a piece that castles as the king
/// - Prefix the name with `!` for a piece that castles as the rook
/// - A name equal to a standard kind (`King`, `Queen`, ...) selects that kind
/// - A symbol of `_` means that side has no such piece
/// - A value of `inf` means `u16::MAX`
fn parse_piece(text: &str, line: usize) -> Result<PieceTemplate, ConfigError> {
    let parts: Vec<&str> = text.splitn(5, ',').collect();
    if parts.len() != 5 {
        return Err(malformed(
            line,
            "piece definition must have 5 comma-separated values",
        ));
    }

    let raw_name = parts[0].trim();
    let name = raw_name.trim_start_matches(['^', '#', '!']);
    let prefixes = &raw_name[..raw_name.len() - name.len()];
    if name.is_empty() {
        return Err(malformed(line, "piece name is empty"));
    }

    let kind = PieceKind::from_name(name);
    let defaults = kind.default_behavior();
    let behavior = Behavior {
        pawn_like: prefixes.contains('^') || defaults.pawn_like,
        castle_role: if prefixes.contains('#') {
            Some(CastleRole::King)
        } else if prefixes.contains('!') {
            Some(CastleRole::Rook)
        } else {
            defaults.castle_role
        },
    };

    let symbols = [parse_symbol(parts[1], line)?, parse_symbol(parts[2], line)?];

    let value = if parts[3].trim() == "inf" {
        u16::MAX as i32
    } else {
        parse_number(parts[3], line, "piece value")?
    };

    PieceTemplate::new(name, kind, symbols, value, behavior, parts[4].trim())
        .map_err(|source| ConfigError::Grammar { line, source })
}

/// Parses a FEN-like placement: ranks separated by `/`, top rank first,
/// digits for runs of empty squares.
fn parse_placement(
    text: &str,
    bounds: Bounds,
    templates: &[PieceTemplate],
    symbols: &HashMap<char, (usize, Side)>,
    line: usize,
) -> Result<Position, ConfigError> {
    let mut position = Position::new(bounds);
    let rows: Vec<&str> = text.split('/').collect();
    let too_wide = |rank: usize| {
        malformed(
            line,
            format!("rank {} has more than {} files", rank + 1, bounds.files()),
        )
    };

    if rows.len() != bounds.ranks() as usize {
        return Err(malformed(
            line,
            format!("expected {} ranks, found {}", bounds.ranks(), rows.len()),
        ));
    }

    for (i, row) in rows.iter().enumerate() {
        let y = bounds.y_lim - 1 - i as i32;
        let mut file: i32 = 0;
        let mut run: i32 = 0;

        for c in row.chars() {
            if let Some(digit) = c.to_digit(10) {
                run = run
                    .checked_mul(10)
                    .and_then(|run| run.checked_add(digit as i32))
                    .ok_or_else(|| too_wide(i))?;
                continue;
            }

            file = file.checked_add(run).ok_or_else(|| too_wide(i))?;
            run = 0;

            let &(index, side) = symbols
                .get(&c)
                .ok_or(ConfigError::UnknownSymbol { line, symbol: c })?;

            if file >= bounds.files() {
                return Err(too_wide(i));
            }

            let square = (bounds.lx_lim + file, y);
            position.add(templates[index].spawn(square, side, bounds));
            file += 1;
        }
        file = file.checked_add(run).ok_or_else(|| too_wide(i))?;

        if file != bounds.files() {
            return Err(malformed(
                line,
                format!("rank {} covers {} of {} files", i + 1, file, bounds.files()),
            ));
        }
    }

    Ok(position)
}

/// Parses a variant configuration.
///
/// The configuration must have the following format:
/// - First line: the variant title
/// - Second line: `x_lim,y_lim,lx_lim,ly_lim`
/// - Third line: the number `n` of piece definitions
/// - Next `n` lines: piece definitions in format
///   `name,white_char,black_char,value,grammar`
/// - Last line: FEN-like placement of the starting position
///
/// Blank lines are ignored; anything after the placement on its line is too.
///
/// # Examples
///
/// ```plaintext
/// Standard Chess
/// 8,8,0,0
/// 6
/// ^Pawn,P,p,1,o1>+, c1x>, oi2>+
/// !Rook,R,r,5,n+
/// Knight,N,n,3,~1/2
/// Bishop,B,b,3,nx
/// Queen,Q,q,9,n*
/// #King,K,k,1000,k1*
/// rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR
/// ```
pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    let mut next = |what: &str| {
        lines
            .next()
            .ok_or_else(|| malformed(contents.lines().count(), format!("missing {what}")))
    };

    let (_, title) = next("title")?;
    let (line, board) = next("board limits")?;
    let bounds = parse_bounds(board, line)?;

    let (line, count) = next("piece definition count")?;
    let count: usize = parse_number(count, line, "piece definition count")?;

    let mut templates = Vec::with_capacity(count);
    let mut symbols = HashMap::new();

    for _ in 0..count {
        let (line, text) = next("piece definition")?;
        let template = parse_piece(text, line)?;

        for (side, symbol) in Side::ALL.into_iter().zip(template.symbols) {
            if symbol == '_' {
                continue;
            }
            if symbols.insert(symbol, (templates.len(), side)).is_some() {
                return Err(malformed(line, format!("duplicate symbol '{symbol}'")));
            }
        }

        templates.push(template);
    }

    let (line, placement) = next("placement")?;
    let placement = placement.split_whitespace().next().unwrap_or_default();
    let position = parse_placement(placement, bounds, &templates, &symbols, line)?;

    debug!(
        title,
        pieces = templates.len(),
        squares = bounds.area(),
        "configuration parsed"
    );

    Ok(Config {
        title: title.to_string(),
        bounds,
        templates,
        position,
    })
}

/// Reads and parses a variant configuration file.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_config(&contents)
}

/// Formats a running game: title, board, side to move and its check status.
pub fn format_game(game: &Game) -> String {
    let mut result = String::new();
    let side = game.side_to_move;

    result.push_str(&format!("{}\n", game.title));
    result.push_str(&format_position(&game.position));
    result.push_str(&format!(
        "Move {}, {:?} to move",
        game.history().len() / 2 + 1,
        side
    ));

    match game.check_status(side) {
        CheckStatus::Safe => {}
        CheckStatus::Check { attackers } => {
            result.push_str(&format!(", in check by {} piece(s)", attackers.len()))
        }
        CheckStatus::Lost => result.push_str(", king captured"),
    }
    result.push('\n');

    result
}
