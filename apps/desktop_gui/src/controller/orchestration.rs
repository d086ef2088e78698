//! Routing of UI input through the bounded input queue into the game.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::protocol::InputEvent;

use crate::ui::app::GuiGame;

pub fn dispatch_input(input_tx: &Sender<InputEvent>, event: InputEvent, status: &mut String) {
    match input_tx.try_send(event) {
        Ok(()) => {
            status.clear();
            tracing::debug!(event = event.name(), "queued ui input");
        }
        Err(TrySendError::Full(_)) => {
            *status = "Too many inputs at once; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Input queue closed; restart the game window".to_string();
        }
    }
}

/// Applies every queued input to the game, oldest first. Returns how many
/// were applied.
pub fn drain_inputs(input_rx: &Receiver<InputEvent>, game: &mut GuiGame) -> usize {
    let mut applied = 0;
    while let Ok(event) = input_rx.try_recv() {
        game.handle(event);
        applied += 1;
    }
    applied
}
