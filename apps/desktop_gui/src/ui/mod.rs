//! UI layer for the goblin board: app shell and board drawing.

pub mod app;
pub mod board_view;

pub use app::GoblinApp;
