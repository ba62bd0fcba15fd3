//! Configuration errors
//!
//! The simulation itself cannot fail once a session exists. Everything that
//! can go wrong happens before the first tick, while a `WorldConfig` is parsed
//! or validated, and is reported as a `ConfigError`.

use std::fmt;

/// Reasons a `WorldConfig` is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A dimension, speed or spacing that must be strictly positive is not.
    NonPositive {
        /// Name of the offending field
        field: &'static str,
    },
    /// A pool was configured with zero slots.
    EmptyPool {
        /// Name of the offending field
        field: &'static str,
    },
    /// A `(min, max)` range has `min > max` or a negative bound.
    InvalidRange {
        /// Name of the offending field
        field: &'static str,
    },
    /// Wrap bounds are inverted or fall outside the screen.
    WrapBounds,
    /// The recycle radius is shorter than one tick of vertical travel.
    RecycleRadiusTooSmall {
        /// Configured radius
        radius: f32,
        /// Smallest radius that cannot leave gaps
        min: f32,
    },
    /// JSON could not be parsed into a config.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field } => write!(f, "{field} must be positive"),
            ConfigError::EmptyPool { field } => write!(f, "{field} must be at least 1"),
            ConfigError::InvalidRange { field } => {
                write!(f, "{field} must be a non-negative (min, max) with min <= max")
            }
            ConfigError::WrapBounds => {
                write!(f, "wrap bounds must satisfy 0 <= left < right <= screen_width")
            }
            ConfigError::RecycleRadiusTooSmall { radius, min } => {
                write!(f, "recycle_radius {radius} must exceed {min} (max vertical travel per tick)")
            }
            ConfigError::Parse(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
