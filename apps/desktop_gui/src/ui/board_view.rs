//! Grid drawing for the goblin board.

use egui::{Color32, RichText, Stroke};
use game_core::GridBoard;
use shared::domain::CellIndex;

const CELL_SIZE: f32 = 96.0;
const CELL_GAP: f32 = 8.0;
const CELL_FILL: Color32 = Color32::from_rgb(52, 58, 64);
const ACTIVE_FILL: Color32 = Color32::from_rgb(46, 125, 50);
const ACTIVE_STROKE: Color32 = Color32::from_rgb(129, 199, 132);

/// Draws every cell; returns true when the goblin was clicked.
pub fn show_board(ui: &mut egui::Ui, board: &GridBoard) -> bool {
    let columns = board.layout().columns();
    let mut goblin_clicked = false;

    egui::Grid::new("goblin_board")
        .spacing([CELL_GAP, CELL_GAP])
        .show(ui, |ui| {
            for idx in 0..board.cell_count() {
                let cell = CellIndex(idx);
                let has_goblin = board.has_token(cell);
                let active = board.is_active(cell);

                let text = if has_goblin {
                    RichText::new("GOBLIN").strong().color(Color32::WHITE)
                } else {
                    RichText::new(cell.ordinal().to_string()).weak()
                };
                let mut button = egui::Button::new(text)
                    .fill(if active { ACTIVE_FILL } else { CELL_FILL })
                    .min_size(egui::vec2(CELL_SIZE, CELL_SIZE));
                if active {
                    button = button.stroke(Stroke::new(2.0, ACTIVE_STROKE));
                }

                let response = ui
                    .add(button)
                    .on_hover_text(hover_text(cell, columns, has_goblin));
                if has_goblin && response.clicked() {
                    goblin_clicked = true;
                }

                if (idx + 1) % columns == 0 {
                    ui.end_row();
                }
            }
        });

    goblin_clicked
}

fn hover_text(cell: CellIndex, columns: usize, has_goblin: bool) -> String {
    let place = format!("row {}, col {}", cell.row(columns), cell.col(columns));
    if has_goblin {
        format!("Click me if you can! ({place})")
    } else {
        place
    }
}
