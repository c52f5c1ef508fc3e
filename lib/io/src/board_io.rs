//! # board_io.rs
//!
//! Implements board formatting and visualization functions.
//!
//! This file contains functionality for converting positions and square sets
//! into human-readable displays. Both are drawn on the same grid with Unicode
//! box-drawing characters, top rank first, labelled with rank numbers on the
//! left and file letters underneath. Square names follow the usual `a1`
//! convention for boards up to 26 files and switch to zero padded number pairs
//! beyond that.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 25/01/2026

use game::{representations::board::Board, Bounds, Position, Square};

pub fn format_square(square: Square, bounds: &Bounds) -> String {
    let file = square.0 - bounds.lx_lim;
    let rank = square.1 - bounds.ly_lim;

    if bounds.files() <= 26 {
        let file_char = (b'a' + file as u8) as char;
        format!("{}{}", file_char, rank + 1)
    } else {
        format!("{:02}{:02}", file, rank)
    }
}

/// Parses a square name produced by `format_square`.
pub fn parse_square(text: &str, bounds: &Bounds) -> Option<Square> {
    let text = text.trim();

    let (file, rank) = if bounds.files() <= 26 {
        let mut chars = text.chars();
        let file_char = chars.next()?.to_ascii_lowercase();
        if !file_char.is_ascii_lowercase() {
            return None;
        }
        let rank: i32 = chars.as_str().parse().ok()?;
        ((file_char as u8 - b'a') as i32, rank - 1)
    } else {
        if text.len() != 4 || !text.is_ascii() {
            return None;
        }
        (text[..2].parse().ok()?, text[2..].parse().ok()?)
    };

    let square = (bounds.lx_lim + file, bounds.ly_lim + rank);
    bounds.contains(square).then_some(square)
}

fn format_grid(bounds: &Bounds, cell: impl Fn(Square) -> char) -> String {
    let files = bounds.files() as usize;
    let ranks = bounds.ranks() as usize;
    if files == 0 || ranks == 0 {
        return String::new();
    }

    let mut result = String::new();
    result.push_str(
        &format!("   ╔{}╗\n", "═══╤".repeat(files - 1) + "═══")
    );

    for (i, y) in (bounds.ly_lim..bounds.y_lim).rev().enumerate() {
        let row: Vec<String> = (bounds.lx_lim..bounds.x_lim)
            .map(|x| cell((x, y)).to_string())
            .collect();

        result.push_str(
            &format!(
                "{:02} ║ {} ║\n",
                y - bounds.ly_lim + 1,
                row.join(" │ ")
            )
        );

        if i + 1 < ranks {
            result.push_str(
                &format!("   ╟{}╢\n", "───┼".repeat(files - 1) + "───")
            );
        }
    }

    result.push_str(
        &format!("   ╚{}╝\n     ", "═══╧".repeat(files - 1) + "═══")
    );

    for col in 0..files {
        let file_label = if files <= 26 {
            ((b'A' + col as u8) as char).to_string()
        } else {
            format!("{:02}", col)
        };
        result.push_str(&format!("{:3} ", file_label));
    }
    result.push('\n');

    result
}

/// Draws every live piece by its symbol.
pub fn format_position(position: &Position) -> String {
    format_grid(&position.bounds, |square| {
        position
            .occupant(square)
            .map_or(' ', |id| position.piece(id).symbol)
    })
}

/// Draws a square set, marking members with `mark`.
pub fn format_board(board: &Board, mark: char) -> String {
    format_grid(&board.bounds, |square| {
        if board.get_bit(square) { mark } else { ' ' }
    })
}
