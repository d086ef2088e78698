//! Controller layer: keyboard mapping and input orchestration into the game.

pub mod events;
pub mod orchestration;
