//! # Chunk Module
//!
//! A chunk is a `chunk_size x chunk_size` column of voxels spanning every height in
//! `[0, max_height)`. Chunks are the unit of generation, meshing and streaming; they own no
//! voxel data themselves (the `VoxelStore` does) and are identified by [`ChunkCoord`].
//!
//! Two coarser grids over chunk coordinates gate one-shot structure placement:
//! village regions (`chunk / 8`) and portal regions (`chunk / 16`).

use cgmath::Point3;
use serde::{Deserialize, Serialize};

pub mod chunk_occupancy;

pub use chunk_occupancy::ChunkOccupancy;

/// Number of chunks along each axis of a village region.
pub const VILLAGE_REGION_SIZE: i32 = 8;
/// Number of chunks along each axis of a portal region.
pub const PORTAL_REGION_SIZE: i32 = 16;

/// The position of a chunk column in chunk units.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

/// A cell of a coarse grid over chunk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionKey {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk owning the voxel column at world `(x, z)`.
    ///
    /// Uses floor division so negative coordinates map to negative chunks.
    pub fn from_voxel(x: i32, z: i32, chunk_size: i32) -> Self {
        Self::new(x.div_euclid(chunk_size), z.div_euclid(chunk_size))
    }

    /// The chunk containing a continuous world position, such as the observer's.
    pub fn from_world_position(position: Point3<f32>, chunk_size: i32) -> Self {
        let size = chunk_size as f32;
        Self::new(
            (position.x / size).floor() as i32,
            (position.z / size).floor() as i32,
        )
    }

    /// The world `(x, z)` of the chunk's lowest corner.
    pub fn origin(&self, chunk_size: i32) -> (i32, i32) {
        (self.x * chunk_size, self.z * chunk_size)
    }

    /// The world `(x, z)` of the chunk's center column.
    pub fn center(&self, chunk_size: i32) -> (i32, i32) {
        let (x, z) = self.origin(chunk_size);
        (x + chunk_size / 2, z + chunk_size / 2)
    }

    /// `max(|dx|, |dz|)` between two chunks.
    pub fn chebyshev_distance(&self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// The four chunks sharing a vertical face with this one.
    pub fn face_neighbors(&self) -> [ChunkCoord; 4] {
        [
            ChunkCoord::new(self.x - 1, self.z),
            ChunkCoord::new(self.x + 1, self.z),
            ChunkCoord::new(self.x, self.z - 1),
            ChunkCoord::new(self.x, self.z + 1),
        ]
    }

    /// The key of the coarse grid cell containing this chunk.
    pub fn region(&self, region_size: i32) -> RegionKey {
        RegionKey {
            x: self.x.div_euclid(region_size),
            z: self.z.div_euclid(region_size),
        }
    }

    /// Whether the world column `(x, z)` belongs to this chunk.
    pub fn contains_column(&self, x: i32, z: i32, chunk_size: i32) -> bool {
        ChunkCoord::from_voxel(x, z, chunk_size) == *self
    }
}
