//! # Voxel Store Module
//!
//! The ground truth of world state: a sparse map from integer voxel coordinate to block
//! identity. Air is the implicit default and is never stored, so the map only ever holds
//! explicit non-air entries.
//!
//! Every mutation records which chunks may need a new mesh. A write inside a chunk marks
//! that chunk; a write on a chunk's border column additionally marks the face-adjacent
//! chunk whose boundary faces could change. The mesh manager drains these marks.

use std::collections::{HashMap, HashSet};

use cgmath::Point3;

use super::{block::block_type::BlockType, chunk::ChunkCoord};

/// Sparse block storage with change tracking.
///
/// # Examples
///
/// ```
/// use blockworld::{BlockType, VoxelStore};
///
/// let mut store = VoxelStore::new(16);
/// store.set(3, 40, -7, BlockType::STONE);
/// assert_eq!(store.get(3, 40, -7), BlockType::STONE);
///
/// store.set(3, 40, -7, BlockType::AIR);
/// assert!(store.is_empty());
/// ```
#[derive(Debug)]
pub struct VoxelStore {
    /// Explicit non-air voxels
    voxels: HashMap<Point3<i32>, BlockType>,
    /// Horizontal chunk edge length, used to find owning chunks
    chunk_size: i32,
    /// Chunks whose contents or borders changed since the last drain
    changed_chunks: HashSet<ChunkCoord>,
}

impl VoxelStore {
    /// Creates an empty store for chunks `chunk_size` voxels wide.
    pub fn new(chunk_size: i32) -> Self {
        VoxelStore {
            voxels: HashMap::new(),
            chunk_size,
            changed_chunks: HashSet::new(),
        }
    }

    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    /// Returns the block at `(x, y, z)`; air wherever nothing is stored.
    pub fn get(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.get_at(Point3::new(x, y, z))
    }

    /// Same as [`VoxelStore::get`] for a point.
    pub fn get_at(&self, position: Point3<i32>) -> BlockType {
        self.voxels.get(&position).copied().unwrap_or(BlockType::AIR)
    }

    /// Writes `block` at `(x, y, z)` and returns the block it replaced.
    ///
    /// Writing air removes the entry. When the voxel actually changes, the owning chunk
    /// and any face-adjacent chunk bordering the voxel are marked as changed.
    pub fn set(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> BlockType {
        self.set_at(Point3::new(x, y, z), block)
    }

    /// Same as [`VoxelStore::set`] for a point.
    pub fn set_at(&mut self, position: Point3<i32>, block: BlockType) -> BlockType {
        let replaced = if block.is_air() {
            self.voxels.remove(&position)
        } else {
            self.voxels.insert(position, block)
        };
        let previous = replaced.unwrap_or(BlockType::AIR);

        if previous != block {
            self.mark_changed(position.x, position.z);
        }

        previous
    }

    /// Whether an explicit entry exists at `(x, y, z)`.
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.voxels.contains_key(&Point3::new(x, y, z))
    }

    /// Number of explicit (non-air) entries.
    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Iterates over every explicit entry in arbitrary order.
    pub fn entries(&self) -> impl Iterator<Item = (Point3<i32>, BlockType)> + '_ {
        self.voxels.iter().map(|(position, block)| (*position, *block))
    }

    /// Removes every entry, marking each affected chunk as changed.
    pub fn clear(&mut self) {
        let positions: Vec<Point3<i32>> = self.voxels.keys().copied().collect();
        self.voxels.clear();
        for position in positions {
            self.mark_changed(position.x, position.z);
        }
    }

    /// Drains the set of chunks changed since the last call.
    pub fn take_changed_chunks(&mut self) -> HashSet<ChunkCoord> {
        std::mem::take(&mut self.changed_chunks)
    }

    /// Whether any chunk changed since the last drain.
    pub fn has_changes(&self) -> bool {
        !self.changed_chunks.is_empty()
    }

    /// Marks the chunk owning column `(x, z)` and any neighbour sharing that column's face.
    fn mark_changed(&mut self, x: i32, z: i32) {
        let owner = ChunkCoord::from_voxel(x, z, self.chunk_size);
        self.changed_chunks.insert(owner);

        let local_x = x.rem_euclid(self.chunk_size);
        let local_z = z.rem_euclid(self.chunk_size);
        let last = self.chunk_size - 1;

        if local_x == 0 {
            self.changed_chunks.insert(ChunkCoord::new(owner.x - 1, owner.z));
        }
        if local_x == last {
            self.changed_chunks.insert(ChunkCoord::new(owner.x + 1, owner.z));
        }
        if local_z == 0 {
            self.changed_chunks.insert(ChunkCoord::new(owner.x, owner.z - 1));
        }
        if local_z == last {
            self.changed_chunks.insert(ChunkCoord::new(owner.x, owner.z + 1));
        }
    }
}
