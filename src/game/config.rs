use std::path::Path;

use serde::{Deserialize, Serialize};

/// Gameplay tunables.
///
/// Growth and scoring constants are per-frame values calibrated at
/// `reference_frame_rate`; the session converts them to delta-time updates
/// so behavior is independent of the actual refresh rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of bacteria alive at all times.
    pub bacteria_count: usize,

    /// Lives at game start.
    pub initial_lives: u32,

    /// Growth fraction at which a bacterium costs a life.
    pub loss_threshold: f32,

    /// Growth added per bacterium per reference frame.
    pub growth_rate: f32,

    /// Growth-rate increase awarded to the bacteria on every successful hit.
    pub hit_growth_rate_bonus: f32,

    /// Scoring numerator: points per hit are `ceil(score_constant / frames
    /// since the previous hit)`.
    pub score_constant: u32,

    /// Latitude/longitude subdivision of every generated sphere.
    pub sphere_detail: u32,

    /// Radius of the background field sphere.
    pub field_radius: f32,

    /// Radius of bacteria shells, slightly above the field so patches sit on
    /// its surface.
    pub bacteria_radius: f32,

    /// Frame rate the per-frame constants were tuned against.
    pub reference_frame_rate: f32,

    /// World-rotation radians per pixel of pointer drag.
    pub drag_sensitivity: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bacteria_count: 10,
            initial_lives: 3,
            loss_threshold: 0.25,
            growth_rate: 0.0001,
            hit_growth_rate_bonus: 0.0001,
            score_constant: 600,
            sphere_detail: 30,
            field_radius: 1.0,
            bacteria_radius: 1.005,
            reference_frame_rate: 60.0,
            drag_sensitivity: 0.01,
        }
    }
}

impl GameConfig {
    /// Load a config from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&contents)?)
    }

    /// Load a config from a RON file, falling back to defaults if the file
    /// is missing or malformed. A malformed file is worth a warning; a
    /// missing one is the normal case.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded game config from {}", path.display());
                config
            }
            Err(ConfigLoadError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Error type for config loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_constants() {
        let config = GameConfig::default();
        assert_eq!(config.bacteria_count, 10);
        assert_eq!(config.loss_threshold, 0.25);
        assert_eq!(config.growth_rate, 0.0001);
        assert_eq!(config.score_constant, 600);
        assert_eq!(config.sphere_detail, 30);
    }

    #[test]
    fn partial_ron_overrides_only_named_fields() {
        let config: GameConfig = ron::from_str("(bacteria_count: 4, initial_lives: 1)").unwrap();
        assert_eq!(config.bacteria_count, 4);
        assert_eq!(config.initial_lives, 1);
        assert_eq!(config.loss_threshold, GameConfig::default().loss_threshold);
    }
}
