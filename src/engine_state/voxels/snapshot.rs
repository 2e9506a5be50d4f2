//! # Snapshot Module
//!
//! A plain serializable copy of the explicit voxels of a world, for hosts that save and
//! load worlds. Only non-air entries are written; air is implied everywhere else.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

use super::chunk::ChunkCoord;

/// One explicit voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VoxelEntry {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    /// Numeric `BlockType` id
    pub id: u8,
}

/// Every explicit voxel of a world, sorted by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub seed: u32,
    /// Chunks whose generation already ran, sorted
    #[serde(default)]
    pub chunks: Vec<ChunkCoord>,
    pub voxels: Vec<VoxelEntry>,
}

impl WorldSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
