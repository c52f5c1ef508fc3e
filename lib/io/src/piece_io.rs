//! # piece_io.rs
//!
//! Implements piece formatting and visualization functions.
//!
//! This file contains functionality for formatting piece types into
//! human-readable tables with Unicode box-drawing characters.
//!
//! # Author
//! Alden Luthfi
//!
//! # Date
//! 25/01/2026

use game::representations::piece::{CastleRole, PieceTemplate};

const MIN_WIDTH: usize = 12;

fn piece_rows(template: &PieceTemplate) -> Vec<String> {
    let symbol = |c: char| if c == '_' { "-".to_string() } else { c.to_string() };

    vec![
        template.name.to_string(),
        template.kind.name().to_string(),
        symbol(template.symbols[0]),
        symbol(template.symbols[1]),
        if template.value == u16::MAX as i32 {
            "∞".to_string()
        } else {
            template.value.to_string()
        },
        if template.grammar().is_king() { "*" } else { "" }.to_string(),
        if template.behavior.pawn_like { "*" } else { "" }.to_string(),
        match template.behavior.castle_role {
            Some(CastleRole::King) => "King",
            Some(CastleRole::Rook) => "Rook",
            None => "",
        }
        .to_string(),
        template.grammar().source().to_string(),
    ]
}

/// Formats a piece type as a column with 9 rows of information.
///
/// Returns a String formatted as a table column with box-drawing characters:
/// - Row 0: Piece name
/// - Row 1: Piece kind
/// - Row 2: White symbol ("-" if white has none)
/// - Row 3: Black symbol ("-" if black has none)
/// - Row 4: Piece value ("∞" for `inf`)
/// - Row 5: King status ("*" if king-flagged, empty otherwise)
/// - Row 6: Pawn-like status ("*" if it promotes and takes en passant)
/// - Row 7: Castling role
/// - Row 8: Movement grammar
pub fn format_piece(template: &PieceTemplate) -> String {
    let rows = piece_rows(template);
    let width = rows
        .iter()
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_WIDTH);

    let mut result = String::new();
    result.push_str(&format!("┌{}┐\n", "─".repeat(width + 2)));

    for row in rows {
        result.push_str(&format!("│ {:^width$} │\n", row));
    }

    result.push_str(&format!("└{}┘", "─".repeat(width + 2)));

    result
}

/// Lays the columns of several piece types side by side.
pub fn format_piece_types(templates: &[PieceTemplate]) -> String {
    let columns: Vec<Vec<String>> = templates
        .iter()
        .map(|t| format_piece(t).lines().map(str::to_string).collect())
        .collect();

    let height = columns.iter().map(Vec::len).max().unwrap_or(0);
    let mut result = String::new();

    for line in 0..height {
        let row: Vec<&str> = columns
            .iter()
            .map(|column| column.get(line).map_or("", String::as_str))
            .collect();
        result.push_str(&row.join(" "));
        result.push('\n');
    }

    result
}
