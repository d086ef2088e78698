//! Plain-text drawing of the board for the terminal front-end.

use std::fmt::Write as _;

use game_core::GridBoard;
use shared::domain::{CellIndex, GameSnapshot};

const CELL_WIDTH: usize = 5;

pub fn render_board(board: &GridBoard) -> String {
    let columns = board.layout().columns();
    let border = format!("+{}\n", format!("{}+", "-".repeat(CELL_WIDTH)).repeat(columns));

    let mut out = String::new();
    out.push_str(&border);
    for row_start in (0..board.cell_count()).step_by(columns) {
        out.push('|');
        for idx in row_start..row_start + columns {
            let cell = CellIndex(idx);
            let label = if !board.layout().contains(cell) {
                String::new()
            } else if board.has_token(cell) {
                "G".to_string()
            } else {
                cell.ordinal().to_string()
            };
            let marker = if board.is_active(cell) { '*' } else { ' ' };
            let _ = write!(out, "{marker}{label:^3}{marker}|");
        }
        out.push('\n');
        out.push_str(&border);
    }
    out
}

pub fn render_status(snapshot: &GameSnapshot) -> String {
    let position = snapshot
        .position
        .map(|cell| cell.ordinal().to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "moves: {} | interval: {}ms | state: {} | goblin: {}",
        snapshot.move_count,
        snapshot.move_interval_ms,
        snapshot.phase.label(),
        position
    )
}
