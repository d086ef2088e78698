use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("board needs at least {min} cells to relocate the token, got {actual}")]
    BoardTooSmall { min: usize, actual: usize },
    #[error("board must have at least one column")]
    ZeroColumns,
    #[error("speed factor must be a positive finite number, got {0}")]
    InvalidSpeedFactor(f64),
}

/// Checks a factor handed to `set_speed` or read from settings.
pub fn validate_speed_factor(factor: f64) -> Result<f64, GameError> {
    if factor.is_finite() && factor > 0.0 {
        Ok(factor)
    } else {
        Err(GameError::InvalidSpeedFactor(factor))
    }
}
