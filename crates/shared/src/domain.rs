use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const DEFAULT_TOTAL_CELLS: usize = 16;
pub const DEFAULT_COLUMNS: usize = 4;
pub const MIN_TOTAL_CELLS: usize = 2;

pub const DEFAULT_MOVE_INTERVAL_MS: u64 = 2000;
pub const MIN_MOVE_INTERVAL_MS: u64 = 500;
pub const MAX_MOVE_INTERVAL_MS: u64 = 5000;

/// Zero-based address of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex(pub usize);

impl CellIndex {
    /// 1-based number shown to players and in logs.
    pub fn ordinal(self) -> usize {
        self.0 + 1
    }

    /// 1-based row for a grid `columns` wide.
    pub fn row(self, columns: usize) -> usize {
        self.0 / columns + 1
    }

    /// 1-based column for a grid `columns` wide.
    pub fn col(self, columns: usize) -> usize {
        self.0 % columns + 1
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell {}", self.ordinal())
    }
}

/// Validated board geometry.
///
/// A layout always has room to relocate the token, which is what keeps
/// position selection with an exclusion terminating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardLayout {
    total_cells: usize,
    columns: usize,
}

impl BoardLayout {
    pub fn new(total_cells: usize, columns: usize) -> Result<Self, GameError> {
        if total_cells < MIN_TOTAL_CELLS {
            return Err(GameError::BoardTooSmall {
                min: MIN_TOTAL_CELLS,
                actual: total_cells,
            });
        }
        if columns == 0 {
            return Err(GameError::ZeroColumns);
        }
        Ok(Self {
            total_cells,
            columns,
        })
    }

    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.total_cells.div_ceil(self.columns)
    }

    pub fn contains(&self, cell: CellIndex) -> bool {
        cell.0 < self.total_cells
    }

    pub fn cells(&self) -> impl Iterator<Item = CellIndex> {
        (0..self.total_cells).map(CellIndex)
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            total_cells: DEFAULT_TOTAL_CELLS,
            columns: DEFAULT_COLUMNS,
        }
    }
}

/// Delay between two token moves, always within
/// [`MIN_MOVE_INTERVAL_MS`, `MAX_MOVE_INTERVAL_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct MoveInterval(u64);

impl MoveInterval {
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(MIN_MOVE_INTERVAL_MS, MAX_MOVE_INTERVAL_MS))
    }

    /// Multiplies the interval by `factor`, rounding to whole milliseconds
    /// before clamping. Callers validate the factor; a non-finite product
    /// saturates at the bounds.
    pub fn scaled(self, factor: f64) -> Self {
        let scaled = (self.0 as f64 * factor).round();
        if scaled.is_nan() || scaled <= MIN_MOVE_INTERVAL_MS as f64 {
            return Self(MIN_MOVE_INTERVAL_MS);
        }
        if scaled >= MAX_MOVE_INTERVAL_MS as f64 {
            return Self(MAX_MOVE_INTERVAL_MS);
        }
        Self(scaled as u64)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for MoveInterval {
    fn default() -> Self {
        Self(DEFAULT_MOVE_INTERVAL_MS)
    }
}

impl fmt::Display for MoveInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running,
    Paused,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
        }
    }
}

/// Enabled state of the start and pause controls.
///
/// Start is available whenever the game is not running. Pause stays
/// available once the token is on the board, even while stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub start_enabled: bool,
    pub pause_enabled: bool,
}

impl Controls {
    pub fn for_state(phase: Phase, token_placed: bool) -> Self {
        let running = phase == Phase::Running;
        Self {
            start_enabled: !running,
            pause_enabled: running || token_placed,
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::for_state(Phase::Idle, false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub position: Option<CellIndex>,
    pub phase: Phase,
    pub move_interval_ms: u64,
    pub move_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_rejects_boards_without_room_to_move() {
        assert_eq!(
            BoardLayout::new(1, 1),
            Err(GameError::BoardTooSmall { min: 2, actual: 1 })
        );
        assert_eq!(BoardLayout::new(16, 0), Err(GameError::ZeroColumns));
        assert!(BoardLayout::new(2, 1).is_ok());
    }

    #[test]
    fn default_layout_is_four_by_four() {
        let layout = BoardLayout::default();
        assert_eq!(layout.total_cells(), 16);
        assert_eq!(layout.rows(), 4);
        assert_eq!(layout.cells().count(), 16);
        assert!(layout.contains(CellIndex(15)));
        assert!(!layout.contains(CellIndex(16)));
    }

    #[test]
    fn cell_rows_and_columns_are_one_based() {
        let cell = CellIndex(6);
        assert_eq!(cell.ordinal(), 7);
        assert_eq!(cell.row(4), 2);
        assert_eq!(cell.col(4), 3);
        assert_eq!(cell.to_string(), "cell 7");
    }

    #[test]
    fn interval_scaling_rounds_and_clamps() {
        let interval = MoveInterval::default();
        assert_eq!(interval.scaled(0.7).as_millis(), 1400);
        assert_eq!(interval.scaled(1.3).as_millis(), 2600);
        assert_eq!(MoveInterval::from_millis(600).scaled(0.7).as_millis(), 500);
        assert_eq!(MoveInterval::from_millis(4500).scaled(1.3).as_millis(), 5000);
        assert_eq!(MoveInterval::from_millis(10).as_millis(), 500);
        assert_eq!(MoveInterval::from_millis(60_000).as_millis(), 5000);
    }

    #[test]
    fn repeated_speed_ups_settle_at_the_lower_bound() {
        let mut interval = MoveInterval::default();
        for _ in 0..20 {
            interval = interval.scaled(0.7);
        }
        assert_eq!(interval.as_millis(), MIN_MOVE_INTERVAL_MS);
    }

    #[test]
    fn controls_follow_phase_and_placement() {
        assert_eq!(
            Controls::for_state(Phase::Running, true),
            Controls {
                start_enabled: false,
                pause_enabled: true
            }
        );
        assert_eq!(
            Controls::for_state(Phase::Paused, true),
            Controls {
                start_enabled: true,
                pause_enabled: true
            }
        );
        assert_eq!(
            Controls::for_state(Phase::Idle, false),
            Controls {
                start_enabled: true,
                pause_enabled: false
            }
        );
        assert_eq!(Controls::default(), Controls::for_state(Phase::Idle, false));
    }

    #[test]
    fn snapshot_serializes_phase_in_snake_case() {
        let snapshot = GameSnapshot {
            position: Some(CellIndex(3)),
            phase: Phase::Running,
            move_interval_ms: 1400,
            move_count: 2,
        };
        let json = serde_json::to_value(snapshot).expect("serialize");
        assert_eq!(json["phase"], "running");
        assert_eq!(json["position"], 3);
        assert_eq!(json["move_count"], 2);
    }
}
