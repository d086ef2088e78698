//! Game rules for the goblin board: position selection, the move timer and
//! the start/pause/reset/speed state machine.

pub mod board;
pub mod config;
mod controller;
pub mod position;
pub mod scheduler;

pub use board::{BoardRenderer, CounterDisplay, DisplaySink, GridBoard, GridCell, GridToken};
pub use config::{load_settings, load_settings_from, GameSettings, SettingsError, SpeedFactors};
pub use controller::{GameController, GameState};
pub use position::choose_position;
pub use scheduler::{ManualScheduler, MissedTicks, TickScheduler, TimerHandle, TokioScheduler};
