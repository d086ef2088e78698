//! Presentation seams consumed by the controller, plus the in-memory board
//! model both front-ends draw from.

use std::fmt;

use shared::domain::{BoardLayout, CellIndex, Controls, MoveInterval};
use tracing::warn;

/// Owns the cells and the token. Implementations decide what a cell looks
/// like; the controller only keeps the handles it was given.
pub trait BoardRenderer {
    type Cell: Clone + fmt::Debug;
    type Token;

    /// Discards any previous board and returns one handle per cell, in
    /// index order.
    fn create_board(&mut self, layout: &BoardLayout) -> Vec<Self::Cell>;

    fn create_token(&mut self) -> Self::Token;

    /// Moves `token` into `cell`. A token has at most one container, so this
    /// also removes it from wherever it was.
    fn attach(&mut self, token: &Self::Token, cell: &Self::Cell);

    fn set_active(&mut self, cell: &Self::Cell, active: bool);
}

pub trait DisplaySink {
    fn set_move_count(&mut self, count: u64);

    fn set_controls(&mut self, _controls: Controls) {}

    fn set_move_interval(&mut self, _interval: MoveInterval) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    generation: u32,
    index: CellIndex,
}

impl GridCell {
    pub fn index(&self) -> CellIndex {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridToken {
    generation: u32,
}

#[derive(Debug, Clone, Default)]
struct CellSlot {
    active: bool,
    holds_token: bool,
}

/// In-memory board.
///
/// Every rebuild bumps the generation; handles from an older board are
/// rejected instead of touching the new one.
#[derive(Debug, Clone, Default)]
pub struct GridBoard {
    generation: u32,
    layout: BoardLayout,
    slots: Vec<CellSlot>,
    token_cell: Option<CellIndex>,
}

impl GridBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn cell_count(&self) -> usize {
        self.slots.len()
    }

    /// Whether `cell` belongs to the board currently on screen.
    pub fn is_current(&self, cell: &GridCell) -> bool {
        cell.generation == self.generation && cell.index.0 < self.slots.len()
    }

    pub fn token_cell(&self) -> Option<CellIndex> {
        self.token_cell
    }

    pub fn has_token(&self, index: CellIndex) -> bool {
        self.slots.get(index.0).is_some_and(|slot| slot.holds_token)
    }

    pub fn is_active(&self, index: CellIndex) -> bool {
        self.slots.get(index.0).is_some_and(|slot| slot.active)
    }

    pub fn cells_with_token(&self) -> Vec<CellIndex> {
        self.indices_where(|slot| slot.holds_token)
    }

    pub fn active_cells(&self) -> Vec<CellIndex> {
        self.indices_where(|slot| slot.active)
    }

    fn indices_where(&self, pred: impl Fn(&CellSlot) -> bool) -> Vec<CellIndex> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| pred(slot))
            .map(|(idx, _)| CellIndex(idx))
            .collect()
    }
}

impl BoardRenderer for GridBoard {
    type Cell = GridCell;
    type Token = GridToken;

    fn create_board(&mut self, layout: &BoardLayout) -> Vec<GridCell> {
        self.generation = self.generation.wrapping_add(1);
        self.layout = *layout;
        self.slots = vec![CellSlot::default(); layout.total_cells()];
        self.token_cell = None;

        let generation = self.generation;
        layout
            .cells()
            .map(|index| GridCell { generation, index })
            .collect()
    }

    fn create_token(&mut self) -> GridToken {
        GridToken {
            generation: self.generation,
        }
    }

    fn attach(&mut self, token: &GridToken, cell: &GridCell) {
        if token.generation != self.generation || !self.is_current(cell) {
            warn!(
                cell = cell.index.ordinal(),
                "ignoring attach for a token or cell from a discarded board"
            );
            return;
        }

        if let Some(previous) = self.token_cell.take() {
            self.slots[previous.0].holds_token = false;
        }
        self.slots[cell.index.0].holds_token = true;
        self.token_cell = Some(cell.index);

        debug_assert_eq!(self.cells_with_token(), vec![cell.index]);
    }

    fn set_active(&mut self, cell: &GridCell, active: bool) {
        if !self.is_current(cell) {
            warn!(
                cell = cell.index.ordinal(),
                "ignoring active marker for a cell from a discarded board"
            );
            return;
        }
        self.slots[cell.index.0].active = active;
    }
}

/// Keeps the last values pushed by the controller for a front-end to show.
#[derive(Debug, Clone, Default)]
pub struct CounterDisplay {
    move_count: u64,
    controls: Controls,
    move_interval: MoveInterval,
    updates: u64,
}

impl CounterDisplay {
    pub fn move_count(&self) -> u64 {
        self.move_count
    }

    pub fn controls(&self) -> Controls {
        self.controls
    }

    pub fn move_interval(&self) -> MoveInterval {
        self.move_interval
    }

    /// Number of counter pushes received; front-ends use it to flash the
    /// counter when it changes.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl DisplaySink for CounterDisplay {
    fn set_move_count(&mut self, count: u64) {
        self.move_count = count;
        self.updates += 1;
    }

    fn set_controls(&mut self, controls: Controls) {
        self.controls = controls;
    }

    fn set_move_interval(&mut self, interval: MoveInterval) {
        self.move_interval = interval;
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
