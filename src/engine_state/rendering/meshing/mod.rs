//! Mesh generation and management for voxel rendering.
//!
//! This module turns voxel data into renderer-agnostic chunk meshes and keeps them in step
//! with the `VoxelStore`. The key goals are:
//! 1. Rebuild a chunk's mesh only when a voxel it depends on changed
//! 2. Always rebuild whole chunks
//! 3. Tell the renderer exactly which chunks need a re-upload
//!
//! # Architecture
//! - `MeshManager`: one slot per loaded chunk with its cached mesh and dirty flag
//! - `mesh/`: hidden-face culling and the flat mesh buffers
//!
//! # Dirty Tracking
//! The store records every chunk whose voxels (or bordering voxels) changed.
//! `MeshManager::refresh` drains that record, dirties the matching loaded slots, rebuilds
//! them, and queues them as pending uploads. Changes to chunks that are not loaded are
//! dropped; those chunks are meshed from scratch when they load.

use std::collections::HashMap;

use lru::LruCache;

mod mesh;

pub use mesh::*;

use crate::engine_state::voxels::{
    chunk::{ChunkCoord, ChunkOccupancy},
    store::VoxelStore,
};

/// Cached mesh state of one loaded chunk.
#[derive(Debug, Default)]
struct MeshSlot {
    /// The last built mesh; `None` when the chunk has no visible face
    mesh: Option<ChunkMesh>,
    /// Set when the mesh no longer matches the voxels
    dirty: bool,
    /// Number of times the mesh was built
    revision: u64,
}

/// Central manager for chunk meshes.
///
/// The `MeshManager` is responsible for:
/// - Building a mesh for every chunk the streamer loads
/// - Rebuilding meshes of loaded chunks whose voxels changed
/// - Releasing mesh buffers of unloaded chunks
/// - Handing rebuilt chunks to the renderer, oldest rebuild first
pub struct MeshManager {
    /// Height of the meshed column
    max_height: i32,
    /// Mesh state of each loaded chunk
    slots: HashMap<ChunkCoord, MeshSlot>,
    /// Chunks rebuilt since the renderer last took them, least recently rebuilt first
    pending_uploads: LruCache<ChunkCoord, ()>,
}

impl MeshManager {
    /// Creates an empty manager meshing voxels in `[0, max_height)`.
    pub fn new(max_height: i32) -> Self {
        MeshManager {
            max_height,
            slots: HashMap::new(),
            pending_uploads: LruCache::unbounded(),
        }
    }

    /// Builds the mesh of the chunk at `coord` from the store.
    ///
    /// # Returns
    /// The mesh, or `None` for a chunk without visible faces.
    pub fn build_mesh(&self, store: &VoxelStore, coord: ChunkCoord) -> Option<ChunkMesh> {
        let occupancy = ChunkOccupancy::capture(store, coord, self.max_height);
        build_culled(&occupancy)
    }

    /// Starts tracking `coord` with a dirty slot; the next `refresh` builds its mesh.
    ///
    /// Loading an already loaded chunk does nothing.
    ///
    /// # Returns
    /// `true` if the chunk was newly loaded.
    pub fn load(&mut self, coord: ChunkCoord) -> bool {
        if self.slots.contains_key(&coord) {
            return false;
        }

        self.slots.insert(
            coord,
            MeshSlot {
                dirty: true,
                ..Default::default()
            },
        );
        true
    }

    /// Stops tracking `coord`, releasing its mesh buffers.
    ///
    /// # Returns
    /// `true` if the chunk was loaded.
    pub fn unload(&mut self, coord: ChunkCoord) -> bool {
        self.pending_uploads.pop(&coord);
        self.slots.remove(&coord).is_some()
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.slots.contains_key(&coord)
    }

    /// Number of loaded chunks.
    pub fn loaded_count(&self) -> usize {
        self.slots.len()
    }

    /// Flags the mesh of a loaded chunk as stale.
    pub fn mark_dirty(&mut self, coord: ChunkCoord) {
        if let Some(slot) = self.slots.get_mut(&coord) {
            slot.dirty = true;
        }
    }

    pub fn is_dirty(&self, coord: ChunkCoord) -> bool {
        self.slots.get(&coord).is_some_and(|slot| slot.dirty)
    }

    /// How many times the mesh of `coord` was built, or `None` if it is not loaded.
    pub fn revision(&self, coord: ChunkCoord) -> Option<u64> {
        self.slots.get(&coord).map(|slot| slot.revision)
    }

    /// The current mesh of `coord`, if it is loaded and has visible faces.
    pub fn mesh(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.slots.get(&coord).and_then(|slot| slot.mesh.as_ref())
    }

    /// Applies the store's recorded changes and rebuilds every dirty mesh.
    ///
    /// # Returns
    /// The rebuilt chunks, sorted.
    pub fn refresh(&mut self, store: &mut VoxelStore) -> Vec<ChunkCoord> {
        for coord in store.take_changed_chunks() {
            self.mark_dirty(coord);
        }

        let mut dirty: Vec<ChunkCoord> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.dirty)
            .map(|(coord, _)| *coord)
            .collect();
        dirty.sort_unstable();

        for coord in &dirty {
            self.rebuild(store, *coord);
        }

        dirty
    }

    /// Takes the chunks rebuilt since the last call, least recently rebuilt first.
    pub fn take_pending_uploads(&mut self) -> Vec<ChunkCoord> {
        let mut uploads = Vec::with_capacity(self.pending_uploads.len());
        while let Some((coord, _)) = self.pending_uploads.pop_lru() {
            uploads.push(coord);
        }
        uploads
    }

    fn rebuild(&mut self, store: &VoxelStore, coord: ChunkCoord) {
        let mesh = self.build_mesh(store, coord);

        if let Some(slot) = self.slots.get_mut(&coord) {
            log::trace!(
                "Rebuilt mesh for chunk ({}, {}): {} vertices",
                coord.x,
                coord.z,
                mesh.as_ref().map_or(0, ChunkMesh::vertex_count)
            );
            slot.mesh = mesh;
            slot.dirty = false;
            slot.revision += 1;
            self.pending_uploads.push(coord, ());
        }
    }
}
