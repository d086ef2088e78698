//! Keyboard shortcuts translated into game input events.

use eframe::egui;
use shared::protocol::InputEvent;

pub fn key_char(key: egui::Key) -> Option<char> {
    match key {
        egui::Key::Space => Some(' '),
        egui::Key::R => Some('r'),
        egui::Key::Plus => Some('+'),
        egui::Key::Equals => Some('='),
        egui::Key::Minus => Some('-'),
        _ => None,
    }
}

pub fn map_key(key: egui::Key, modifiers: egui::Modifiers) -> Option<InputEvent> {
    let ch = key_char(key)?;
    InputEvent::from_key(ch, modifiers.command || modifiers.ctrl)
}

/// Collects the shortcut presses of this frame. Auto-repeat is ignored so
/// holding space does not flicker between start and pause.
pub fn collect_keyboard_events(input: &egui::InputState) -> Vec<InputEvent> {
    input
        .events
        .iter()
        .filter_map(|event| match event {
            egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                modifiers,
                ..
            } => map_key(*key, *modifiers),
            _ => None,
        })
        .collect()
}
