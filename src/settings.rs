//! Game configuration and per-level values
//!
//! Loaded from JSON on native; every field has a default so partial files work.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DECORATIONS, SOURCE_IMAGE_SCALE};
use crate::error::ConfigError;

/// Values that change from level to level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelParams {
    /// Nuggets to collect before the level is won
    pub nuggets_to_collect: u32,
    /// Zoom-in limit. Keep it reachable as `scale_min * zoom_factor^n`.
    pub scale_max: f32,
    /// Multiplicative zoom step per scroll tick
    pub zoom_factor: f32,
    /// Whether the teacher icon (tutorial) is offered
    pub tutorial_startable: bool,
}

impl LevelParams {
    pub const fn new(
        nuggets_to_collect: u32,
        scale_max: f32,
        zoom_factor: f32,
        tutorial_startable: bool,
    ) -> Self {
        Self {
            nuggets_to_collect,
            scale_max,
            zoom_factor,
            tutorial_startable,
        }
    }
}

/// Built-in level table. Higher level means more zooming.
pub const DEFAULT_LEVELS: [LevelParams; 3] = [
    LevelParams::new(3, 0.6, 1.3417, true),  // 2 zoom ticks from min to max
    LevelParams::new(6, 0.8, 1.2447, false), // 4 zoom ticks
    LevelParams::new(9, 1.0, 1.2010, false), // 6 zoom ticks
];

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed; `None` picks one from the clock at startup
    pub seed: Option<u64>,
    /// Stones scattered over the rock wall each level
    pub decorations_per_level: usize,
    /// Level table, level 1 first
    pub levels: Vec<LevelParams>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            decorations_per_level: DEFAULT_DECORATIONS,
            levels: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl GameConfig {
    /// Parameters for a 1-based level number
    pub fn level(&self, level: u32) -> Option<&LevelParams> {
        let index = usize::try_from(level).ok()?.checked_sub(1)?;
        self.levels.get(index)
    }

    /// Highest playable level
    pub fn max_level(&self) -> u32 {
        self.levels.len() as u32
    }

    /// Check the level table for values the viewport cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::EmptyLevelTable);
        }
        let scale_min = 1.0 / SOURCE_IMAGE_SCALE;
        for (i, params) in self.levels.iter().enumerate() {
            let level = i as u32 + 1;
            let reason = if params.nuggets_to_collect == 0 {
                Some("must collect at least one nugget".to_string())
            } else if params.zoom_factor <= 1.0 {
                Some(format!("zoom factor {} must be > 1", params.zoom_factor))
            } else if params.scale_max < scale_min {
                Some(format!(
                    "scale_max {} is below the minimum scale {scale_min}",
                    params.scale_max
                ))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidLevel { level, reason });
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded config: {} levels, {} decorations",
            config.levels.len(),
            config.decorations_per_level
        );
        Ok(config)
    }

    /// Load a JSON config file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let config = GameConfig::default();
        assert_eq!(config.max_level(), 3);
        assert_eq!(config.level(1).unwrap().nuggets_to_collect, 3);
        assert!(config.level(1).unwrap().tutorial_startable);
        assert_eq!(config.level(3).unwrap().scale_max, 1.0);
        assert!(config.level(0).is_none());
        assert!(config.level(4).is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7 }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.decorations_per_level, DEFAULT_DECORATIONS);
        assert_eq!(config.levels.len(), 3);
    }

    #[test]
    fn test_rejects_bad_zoom_factor() {
        let json = r#"{ "levels": [
            { "nuggets_to_collect": 2, "scale_max": 0.5, "zoom_factor": 1.0, "tutorial_startable": false }
        ] }"#;
        let err = GameConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLevel { level: 1, .. }));
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = GameConfig::from_json(r#"{ "levels": [] }"#).unwrap_err();
        assert_eq!(err, ConfigError::EmptyLevelTable);
    }
}
