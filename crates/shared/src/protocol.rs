use serde::{Deserialize, Serialize};

pub const SPEED_UP_FACTOR: f64 = 0.7;
pub const SPEED_DOWN_FACTOR: f64 = 1.3;

/// Discrete player input. Each variant maps onto exactly one controller
/// operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    Start,
    Pause,
    Reset,
    SpeedUp,
    SpeedDown,
    TogglePlayPause,
}

impl InputEvent {
    /// Keyboard shortcuts: space toggles, ctrl/cmd+R resets, `+`/`=` speeds
    /// up and `-`/`_` slows down. Keys are matched case-insensitively.
    pub fn from_key(key: char, command_modifier: bool) -> Option<Self> {
        match key.to_ascii_lowercase() {
            ' ' => Some(Self::TogglePlayPause),
            'r' if command_modifier => Some(Self::Reset),
            '+' | '=' => Some(Self::SpeedUp),
            '-' | '_' => Some(Self::SpeedDown),
            _ => None,
        }
    }

    /// Parses a line typed into the terminal front-end. An empty line
    /// toggles, like pressing space.
    pub fn from_command(command: &str) -> Option<Self> {
        let command = command.trim();
        if command.is_empty() {
            return Some(Self::TogglePlayPause);
        }
        match command.to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "pause" => Some(Self::Pause),
            "reset" => Some(Self::Reset),
            "toggle" => Some(Self::TogglePlayPause),
            "faster" | "speed_up" => Some(Self::SpeedUp),
            "slower" | "speed_down" => Some(Self::SpeedDown),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(key), None) => Self::from_key(key, false),
                    _ => None,
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Pause => "pause",
            Self::Reset => "reset",
            Self::SpeedUp => "speed_up",
            Self::SpeedDown => "speed_down",
            Self::TogglePlayPause => "toggle_play_pause",
        }
    }
}
