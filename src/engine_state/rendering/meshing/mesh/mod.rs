//! Mesh generation for voxel rendering.
//!
//! This module converts the voxels of one chunk column into flat, renderer-agnostic
//! attribute buffers.
//!
//! # Architecture
//! - [`ChunkMesh`]: position, normal, UV and color arrays of one chunk
//! - [`Face`]: a single visible voxel face and the six vertices it emits
//! - [`build_culled`]: hidden-face culling over a padded [`ChunkOccupancy`] snapshot
//!
//! # Usage
//! ```
//! use blockworld::{build_culled, BlockType, ChunkCoord, ChunkOccupancy, VoxelStore};
//!
//! let mut store = VoxelStore::new(16);
//! store.set(1, 1, 1, BlockType::STONE);
//!
//! let occupancy = ChunkOccupancy::capture(&store, ChunkCoord::new(0, 0), 64);
//! let mesh = build_culled(&occupancy).unwrap();
//! assert_eq!(mesh.vertex_count(), 36);
//! ```
//!
//! [`ChunkOccupancy`]: crate::engine_state::voxels::chunk::ChunkOccupancy

mod culled;
mod face;
mod mesh;

pub use culled::build_culled;
pub use face::Face;
pub use mesh::ChunkMesh;
