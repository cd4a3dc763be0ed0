//! Demo configuration

use collision_engine::config::{Config, ConfigError, WorldConfig};
use serde::{Deserialize, Serialize};

/// Fleet simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// World extent and grid cell size
    pub world: WorldConfig,

    /// Number of small triangular ships
    pub basic_ships: usize,

    /// Number of dreadnaughts
    pub dreadnaughts: usize,

    /// Frames to simulate
    pub frames: u32,

    /// Fixed time step (seconds)
    pub delta_time: f32,

    /// Seed for spawn positions and wandering
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            basic_ships: 200,
            dreadnaughts: 6,
            frames: 600,
            delta_time: 1.0 / 60.0,
            seed: 0x5eed,
        }
    }
}

impl Config for DemoConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()
    }
}

/// Load settings from `path`, falling back to defaults when it cannot be used
pub fn load_or_default(path: Option<&str>) -> DemoConfig {
    let Some(path) = path else {
        log::info!("No config path given, using defaults");
        return DemoConfig::default();
    };

    match DemoConfig::load_from_file(path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            log::warn!("Failed to load config from {}: {}. Using defaults", path, e);
            DemoConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_or_default(Some("definitely/not/here.toml"));
        assert_eq!(config, DemoConfig::default());
        assert_eq!(load_or_default(None), DemoConfig::default());
    }

    #[test]
    fn test_nested_world_is_validated() {
        let mut config = DemoConfig::default();
        assert!(config.validate().is_ok());

        config.world.cell_size = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
