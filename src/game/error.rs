use thiserror::Error;

/// Everything that can go wrong while setting up or driving a mission.
///
/// None of these are retryable; the page is expected to restart the mission.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("need at least {required} bases, got {got}")]
    NotEnoughBases { required: usize, got: usize },
    #[error("base index {index} out of range ({count} bases)")]
    BaseIndexOutOfRange { index: usize, count: usize },
    #[error("planet radius must be positive (got {value})")]
    InvalidPlanetRadius { value: f64 },
    #[error("{field} must be between 0 and 1 (got {value})")]
    RateOutOfRange { field: &'static str, value: f64 },
    #[error("counterdefense slope must be non-negative (got {value})")]
    InvalidSlope { value: f64 },
    #[error("coordinate precision must be between 1 and 12 digits (got {value})")]
    InvalidPrecision { value: u32 },
    #[error("session has no goal base")]
    NoGoal,
    #[error("probe is already in transit")]
    ProbeInTransit,
    #[error("mission is over")]
    MissionOver,
    #[error("invalid mission config: {0}")]
    Config(String),
}

pub type GameResult<T> = Result<T, GameError>;

pub(crate) fn check_rate(field: &'static str, value: f64) -> GameResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(GameError::RateOutOfRange { field, value })
    }
}

pub(crate) fn check_radius(value: f64) -> GameResult<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(GameError::InvalidPlanetRadius { value })
    }
}
