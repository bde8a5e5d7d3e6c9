//! Startup and configuration errors
//!
//! Runtime problems (crowded placement, unknown level, ...) are logged and
//! degraded instead; only things that make the activity unusable end up here.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Background art does not match board size times the source image scale
    BackgroundMismatch { expected: (f32, f32), found: (f32, f32) },
    /// The asset catalog has no sub-image with this id
    MissingSubImage(&'static str),
    /// No levels configured
    EmptyLevelTable,
    /// A level entry is unusable
    InvalidLevel { level: u32, reason: String },
    /// Config text could not be parsed
    Parse(String),
    /// Config file could not be read
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BackgroundMismatch { expected, found } => write!(
                f,
                "background must be {}x{}, got {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            ConfigError::MissingSubImage(id) => write!(f, "asset has no sub-image '{id}'"),
            ConfigError::EmptyLevelTable => write!(f, "level table is empty"),
            ConfigError::InvalidLevel { level, reason } => {
                write!(f, "level {level}: {reason}")
            }
            ConfigError::Parse(msg) => write!(f, "invalid config: {msg}"),
            ConfigError::Io(msg) => write!(f, "cannot read config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_background_mismatch() {
        let err = ConfigError::BackgroundMismatch {
            expected: (2400.0, 1560.0),
            found: (2400.0, 1500.0),
        };
        assert_eq!(err.to_string(), "background must be 2400x1560, got 2400x1500");
    }

    #[test]
    fn test_from_serde_error() {
        let err: ConfigError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
