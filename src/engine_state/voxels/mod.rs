//! # Voxel Engine Core
//!
//! This module contains the voxel world itself: what a voxel is, where voxels live, and
//! how they come to exist.
//!
//! ## Architecture
//!
//! * **Block**: the closed set of block identities and their immutable property tables
//! * **Chunk**: chunk and region coordinates, plus padded occupancy snapshots for meshing
//! * **Store**: sparse voxel storage with changed-chunk tracking
//! * **Generation**: deterministic terrain, vegetation and structures
//! * **World**: owns the store and generators and answers spatial queries
//! * **Snapshot**: serializable copies of a world's explicit voxels
//!
//! ## Data Flow
//!
//! 1. The streamer asks the world to generate a chunk
//! 2. Terrain fills the chunk's columns, then structure planning overlays it
//! 3. Every write marks the owning (and bordering) chunks as changed
//! 4. The mesh manager drains those marks and rebuilds meshes
//!
//! Everything runs on one simulation thread, so the store needs no locking.

pub mod block;
pub mod chunk;
pub mod generation;
pub mod snapshot;
pub mod store;
pub mod world;
