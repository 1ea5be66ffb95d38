//! World configuration: every numeric constant the generator depends on.
//!
//! Values are fixed at process start and never reloaded. The JSON form is
//! optional; any omitted field falls back to the defaults the game shipped
//! with (30px cells on a 1280x720 window).

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Explicit world seed. `None` lets the caller pick one at random.
    pub seed: Option<i64>,
    pub cell_size: f32,
    pub window_width: f32,
    pub window_height: f32,
    pub trunk_height: f32,
    pub tree_top_size: f32,
    /// Exclusive upper bound of every seeded draw.
    pub random_bound: u32,
    /// Draw value that plants a tree in a column.
    pub tree_sentinel: u32,
    /// Draws below this place a leaf.
    pub leaf_below: u32,
    /// Draws at or above this place a fruit.
    pub fruit_from: u32,
    pub noise_amplitude: f32,
    pub noise_frequency: f32,
    pub noise_octaves: u32,
    /// Seconds before an eaten fruit grows back.
    pub cycle_length: f32,
    pub fruit_energy: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            cell_size: 30.0,
            window_width: 1280.0,
            window_height: 720.0,
            trunk_height: 180.0,
            tree_top_size: 210.0,
            random_bound: 11,
            tree_sentinel: 1,
            leaf_below: 8,
            fruit_from: 9,
            noise_amplitude: 210.0,
            noise_frequency: 1.0 / 210.0,
            noise_octaves: 1,
            cycle_length: 30.0,
            fruit_energy: 10.0,
        }
    }
}

impl WorldConfig {
    /// Shift threshold and step of the world window: half the viewport.
    pub fn margin(&self) -> f32 {
        (self.window_width / 2.0).ceil()
    }

    /// Ground baseline `H0` the noise oscillates around.
    pub fn baseline_height(&self) -> f32 {
        self.window_height * 2.0 / 3.0
    }
}

pub fn load_world_config_from_path(path: &Path) -> Result<WorldConfig, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let config: WorldConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse world config JSON {}: {e}", path.display()))?;
    validate_world_config(&config)?;
    Ok(config)
}

pub fn validate_world_config(config: &WorldConfig) -> Result<(), String> {
    if config.cell_size <= 0.0 {
        return Err("World config validation failed: cell_size must be > 0".to_string());
    }
    if config.window_width <= 0.0 || config.window_height <= 0.0 {
        return Err(
            "World config validation failed: window_width and window_height must be > 0"
                .to_string(),
        );
    }
    if config.trunk_height < 0.0 || config.tree_top_size < 0.0 {
        return Err(
            "World config validation failed: trunk_height and tree_top_size must be >= 0"
                .to_string(),
        );
    }
    if config.random_bound == 0 {
        return Err("World config validation failed: random_bound must be > 0".to_string());
    }
    if config.tree_sentinel >= config.random_bound {
        return Err(format!(
            "World config validation failed: tree_sentinel {} is never drawn from [0, {})",
            config.tree_sentinel, config.random_bound
        ));
    }
    if config.leaf_below > config.fruit_from {
        return Err(format!(
            "World config validation failed: leaf_below ({}) must not exceed fruit_from ({})",
            config.leaf_below, config.fruit_from
        ));
    }
    if config.noise_amplitude < 0.0 || config.noise_frequency <= 0.0 {
        return Err(
            "World config validation failed: noise_amplitude must be >= 0 and noise_frequency > 0"
                .to_string(),
        );
    }
    if config.cycle_length <= 0.0 {
        return Err("World config validation failed: cycle_length must be > 0".to_string());
    }
    if config.fruit_from >= config.random_bound {
        log::warn!(
            "fruit_from {} >= random_bound {}: trees will never carry fruit",
            config.fruit_from,
            config.random_bound
        );
    }
    if config.window_height % config.cell_size != 0.0 {
        log::warn!(
            "window_height {} is not a multiple of cell_size {}; tree tops will sit off the ground grid",
            config.window_height,
            config.cell_size
        );
    }
    Ok(())
}
