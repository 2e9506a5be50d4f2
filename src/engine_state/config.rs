//! # World Configuration
//!
//! Every tunable of the world engine in one serde-backed struct. Missing JSON fields take
//! their defaults, so a config file only needs to name what it changes:
//!
//! ```json
//! { "seed": 1337, "render_distance": 4 }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WorldError};

/// Voxels above the terrain surface that trees and structures may fill, plus one.
///
/// A tree canopy tops out 8 voxels above the surface it grows from.
pub const FEATURE_HEADROOM: i32 = 9;

/// How chunk columns are filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainMode {
    /// Noise-driven biomes, terrain, vegetation and structures
    #[default]
    Noise,
    /// Flat grass at `base_height` over dirt and stone, without structures
    Flat,
}

/// Settings for generation, meshing and streaming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed of every noise field
    pub seed: u32,
    /// Horizontal edge length of a chunk column in voxels
    pub chunk_size: i32,
    /// Exclusive upper bound of meshed voxel heights
    pub max_height: i32,
    /// Terrain height where the noise sum is zero
    pub base_height: i32,
    /// Terrain height swing for a noise sum of +-1
    pub height_variation: i32,
    /// Chebyshev radius, in chunks, of the loaded square around the observer
    pub render_distance: i32,
    /// Extra chunks a loaded chunk may drift beyond `render_distance` before unloading
    pub unload_margin: i32,
    /// How chunk columns are filled
    pub terrain_mode: TerrainMode,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            chunk_size: 16,
            max_height: 64,
            base_height: 32,
            height_variation: 16,
            render_distance: 8,
            unload_margin: 2,
            terrain_mode: TerrainMode::Noise,
        }
    }
}

impl WorldConfig {
    /// Water fills every column below this height.
    pub fn sea_level(&self) -> i32 {
        self.base_height - 5
    }

    /// Chunks farther than this from the observer are unloaded.
    pub fn unload_distance(&self) -> i32 {
        self.render_distance + self.unload_margin
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| WorldError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    /// `WorldError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(WorldError::InvalidConfig(message));

        if self.chunk_size <= 0 {
            return invalid(format!("chunk_size must be positive, got {}", self.chunk_size));
        }
        if self.max_height <= 0 {
            return invalid(format!("max_height must be positive, got {}", self.max_height));
        }
        if self.base_height < 5 || self.base_height >= self.max_height {
            return invalid(format!(
                "base_height must be in [5, {}), got {}",
                self.max_height, self.base_height
            ));
        }
        if self.height_variation < 0 {
            return invalid(format!(
                "height_variation must not be negative, got {}",
                self.height_variation
            ));
        }
        if self.base_height - self.height_variation < 0 {
            return invalid(format!(
                "base_height - height_variation ({}) must not be negative",
                self.base_height - self.height_variation
            ));
        }
        let peak = self.base_height + self.height_variation + FEATURE_HEADROOM;
        if peak > self.max_height {
            return invalid(format!(
                "base_height + height_variation + {FEATURE_HEADROOM} ({peak}) must not exceed max_height ({})",
                self.max_height
            ));
        }
        if self.render_distance < 0 {
            return invalid(format!(
                "render_distance must not be negative, got {}",
                self.render_distance
            ));
        }
        if self.unload_margin < 0 {
            return invalid(format!(
                "unload_margin must not be negative, got {}",
                self.unload_margin
            ));
        }

        Ok(())
    }
}
