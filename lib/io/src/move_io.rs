use game::{
    moves::move_list::{MoveRecord, Special},
    Bounds, PieceKind,
};

use crate::board_io::format_square;

fn promotion_letter(kind: PieceKind) -> char {
    match kind {
        PieceKind::Knight => 'N',
        other => other.name().chars().next().unwrap_or('?'),
    }
}

/// Formats an applied move as `e2-e4`, `d1xd8`, `a7-a8=Q` or `e1-g1 (O-O)`.
pub fn format_move(record: &MoveRecord, bounds: &Bounds) -> String {
    let separator = if record.captured.is_empty() { '-' } else { 'x' };

    let mut result = format!(
        "{}{}{}",
        format_square(record.from, bounds),
        separator,
        format_square(record.to, bounds)
    );

    if let Some(kind) = record.promotion {
        result.push('=');
        result.push(promotion_letter(kind));
    }

    match record.special {
        Special::Castle { rook_from, .. } if rook_from.0 > record.from.0 => {
            result.push_str(" (O-O)")
        }
        Special::Castle { .. } => result.push_str(" (O-O-O)"),
        Special::EnPassant => result.push_str(" e.p."),
        Special::Normal => {}
    }

    if record.captured.len() > 1 {
        result.push_str(&format!(" [{} captured]", record.captured.len()));
    }

    result
}
