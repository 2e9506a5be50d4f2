//! # Chunk Occupancy Module
//!
//! A dense, padded snapshot of one chunk column taken from the sparse `VoxelStore` right
//! before meshing. It follows the same dual-storage idea as a compact chunk:
//!
//! 1. Bit vectors (`occupied`, `water`) cover the column plus a one-voxel ring on every
//!    side, so neighbour tests at the chunk border read the adjacent chunks' voxels
//!    without any bounds checks.
//! 2. A vector holds only the non-air voxels inside the column, in scan order.
//!
//! Scan order is x fastest, then z, then y.

use bitvec::vec::BitVec;
use cgmath::Point3;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, block_type::BlockType},
    store::VoxelStore,
};

use super::ChunkCoord;

/// A padded view of one chunk column and its face-adjacent border.
pub struct ChunkOccupancy {
    /// The chunk this snapshot was taken from
    coord: ChunkCoord,
    /// Horizontal edge length of the column
    chunk_size: i32,
    /// Height of the column
    max_height: i32,
    /// One bit per padded voxel: set when the voxel is not air
    occupied: BitVec,
    /// One bit per padded voxel: set when the voxel is water
    water: BitVec,
    /// Non-air voxels inside the column with their world positions
    blocks: Vec<(Point3<i32>, BlockType)>,
}

impl ChunkOccupancy {
    /// Reads the column at `coord` and its one-voxel border from `store`.
    ///
    /// The border includes `y = -1` and `y = max_height`, so faces at the bottom and top
    /// of the world are culled against whatever the store holds there (normally air).
    pub fn capture(store: &VoxelStore, coord: ChunkCoord, max_height: i32) -> Self {
        let chunk_size = store.chunk_size();
        let width = (chunk_size + 2) as usize;
        let height = (max_height + 2) as usize;
        let capacity = width * width * height;

        let mut occupied = BitVec::with_capacity(capacity);
        let mut water = BitVec::with_capacity(capacity);
        let mut blocks = Vec::new();

        let (origin_x, origin_z) = coord.origin(chunk_size);

        for local_y in -1..=max_height {
            for local_z in -1..=chunk_size {
                for local_x in -1..=chunk_size {
                    let position =
                        Point3::new(origin_x + local_x, local_y, origin_z + local_z);
                    let block = store.get_at(position);

                    occupied.push(!block.is_air());
                    water.push(block.is_water());

                    let inside = (0..chunk_size).contains(&local_x)
                        && (0..chunk_size).contains(&local_z)
                        && (0..max_height).contains(&local_y);
                    if inside && !block.is_air() {
                        blocks.push((position, block));
                    }
                }
            }
        }

        ChunkOccupancy {
            coord,
            chunk_size,
            max_height,
            occupied,
            water,
            blocks,
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Non-air voxels inside the column, in scan order.
    pub fn blocks(&self) -> &[(Point3<i32>, BlockType)] {
        &self.blocks
    }

    /// Whether the column holds no voxels at all.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Determines whether the face `side` of the voxel at world `position` is visible.
    ///
    /// A face is visible when the neighbour across it is air, or is water while the voxel
    /// itself is not water.
    ///
    /// # Arguments
    /// * `position` - World position of a voxel inside this column
    /// * `block` - The block at `position`
    /// * `side` - The face being tested
    pub fn is_face_visible(&self, position: Point3<i32>, block: BlockType, side: BlockSide) -> bool {
        let neighbour = position + side.offset();
        let index = self.padded_index(neighbour);

        if !self.occupied[index] {
            return true;
        }

        self.water[index] && !block.is_water()
    }

    /// Index of a world position in the padded bit vectors.
    fn padded_index(&self, position: Point3<i32>) -> usize {
        let (origin_x, origin_z) = self.coord.origin(self.chunk_size);
        let width = (self.chunk_size + 2) as usize;

        let i = (position.x - origin_x + 1) as usize;
        let k = (position.z - origin_z + 1) as usize;
        let j = (position.y + 1) as usize;

        debug_assert!(j < (self.max_height + 2) as usize);
        i + width * k + width * width * j
    }
}
