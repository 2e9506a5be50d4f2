//! # World Module
//!
//! This module provides the `World` struct, which owns the voxel store together with the
//! generators that fill it. It is the single entry point for chunk generation, block access
//! and spatial queries.
//!
//! ## Architecture
//!
//! The world is sparse: the `VoxelStore` only holds explicit non-air voxels, so untouched
//! space costs nothing and coordinates far outside generated chunks simply read as air.
//!
//! ## Chunk Generation
//!
//! Generating a chunk runs the terrain fill and then structure planning for that chunk.
//! A chunk is generated at most once per world; its voxels persist even after the
//! streamer unloads its mesh.
//!
//! ## Structure Events
//!
//! Structure placements are queued as [`StructureEvent`]s. The world holds no reference to
//! village or portal systems; the host drains the queue and routes each event.

use std::collections::HashSet;

use cgmath::{InnerSpace, Point3, Vector3};
use log::{debug, info, warn};
use web_time::Instant;

use crate::{
    core::error::{Result, WorldError},
    engine_state::{
        config::{TerrainMode, WorldConfig},
        voxels::{
            block::block_type::BlockType,
            chunk::ChunkCoord,
            generation::{
                noise_source::NoiseSource,
                structures::{StructureEvent, StructureListener, StructurePlanner},
                terrain::TerrainGenerator,
            },
            snapshot::{VoxelEntry, WorldSnapshot},
            store::VoxelStore,
        },
    },
};

/// The result of a voxel raycast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayHit {
    /// The first non-air voxel along the ray
    pub block_position: Point3<i32>,
    /// The last empty voxel before the hit, where a placed block would go
    pub place_position: Point3<i32>,
    /// The block that was hit
    pub block: BlockType,
}

/// A generated voxel world.
///
/// # Examples
///
/// ```
/// use blockworld::{ChunkCoord, World, WorldConfig};
///
/// let mut world = World::new(WorldConfig::default());
/// assert!(world.generate_chunk(ChunkCoord::new(0, 0)));
/// assert!(!world.generate_chunk(ChunkCoord::new(0, 0)));
/// assert!(world.surface_height(8, 8).is_some());
/// ```
pub struct World {
    config: WorldConfig,
    /// Ground truth of every voxel
    store: VoxelStore,
    terrain: TerrainGenerator,
    planner: StructurePlanner,
    /// Chunks whose generation already ran
    generated: HashSet<ChunkCoord>,
    /// Structures placed since the host last drained them
    pending_events: Vec<StructureEvent>,
}

impl World {
    /// Creates an empty world generated from simplex noise.
    pub fn new(config: WorldConfig) -> Self {
        let terrain = TerrainGenerator::new(&config);
        Self::with_terrain(config, terrain)
    }

    /// Creates an empty world whose generation samples `noise`.
    pub fn with_noise(config: WorldConfig, noise: Box<dyn NoiseSource>) -> Self {
        let terrain = TerrainGenerator::with_noise(&config, noise);
        Self::with_terrain(config, terrain)
    }

    fn with_terrain(config: WorldConfig, terrain: TerrainGenerator) -> Self {
        World {
            store: VoxelStore::new(config.chunk_size),
            planner: StructurePlanner::new(config.chunk_size),
            terrain,
            config,
            generated: HashSet::new(),
            pending_events: Vec::new(),
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn store(&self) -> &VoxelStore {
        &self.store
    }

    /// Mutable access to the store, for collaborators that edit voxels directly.
    pub fn store_mut(&mut self) -> &mut VoxelStore {
        &mut self.store
    }

    pub fn terrain(&self) -> &TerrainGenerator {
        &self.terrain
    }

    pub fn planner(&self) -> &StructurePlanner {
        &self.planner
    }

    /// Generates the chunk at `coord` if it has never been generated.
    ///
    /// Runs the terrain fill, then (in noise mode) structure planning, queueing an event
    /// for every structure placed.
    ///
    /// # Returns
    /// `true` if generation ran, `false` if the chunk was already generated.
    pub fn generate_chunk(&mut self, coord: ChunkCoord) -> bool {
        if !self.generated.insert(coord) {
            return false;
        }

        let start = Instant::now();
        self.terrain.take_noise_fallbacks();
        self.terrain.generate_chunk(&mut self.store, coord);

        if self.terrain.mode() == TerrainMode::Noise {
            let events = self.planner.plan_chunk(&mut self.store, &self.terrain, coord);
            self.pending_events.extend(events);
        }

        let fallbacks = self.terrain.take_noise_fallbacks();
        if fallbacks > 0 {
            warn!(
                "Noise failed {fallbacks} times in chunk ({}, {}), used plains at base height",
                coord.x, coord.z
            );
        }

        debug!(
            "Generated chunk ({}, {}) in {:?}",
            coord.x,
            coord.z,
            start.elapsed()
        );
        true
    }

    pub fn is_generated(&self, coord: ChunkCoord) -> bool {
        self.generated.contains(&coord)
    }

    /// Number of chunks generated so far.
    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.store.get(x, y, z)
    }

    /// Writes a block and returns the one it replaced.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> BlockType {
        self.store.set(x, y, z, block)
    }

    /// Collision predicate: whether the voxel at `(x, y, z)` blocks movement.
    pub fn is_solid_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.store.get(x, y, z).is_solid()
    }

    /// The y of the highest non-air voxel of column `(x, z)` within `[0, max_height)`.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        (0..self.config.max_height)
            .rev()
            .find(|&y| !self.store.get(x, y, z).is_air())
    }

    /// Walks the voxels pierced by a ray until one is not air.
    ///
    /// # Arguments
    /// * `origin` - Start of the ray in world space
    /// * `direction` - Ray direction; need not be normalized
    /// * `max_distance` - Distance along the ray after which the walk gives up
    ///
    /// # Returns
    /// The hit, or `None` if the ray met only air, `direction` is zero, or `max_distance`
    /// is not finite.
    pub fn raycast(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RayHit> {
        if !max_distance.is_finite() || direction.magnitude2() == 0.0 {
            return None;
        }
        let direction = direction.normalize();

        let mut voxel = Point3::new(
            origin.x.floor() as i32,
            origin.y.floor() as i32,
            origin.z.floor() as i32,
        );
        let step = direction.map(|d| if d > 0.0 { 1 } else { -1 });
        let t_delta = direction.map(|d| if d != 0.0 { 1.0 / d.abs() } else { f32::INFINITY });

        let boundary = |position: f32, cell: i32, d: f32, delta: f32| {
            if d == 0.0 {
                f32::INFINITY
            } else if d > 0.0 {
                (cell as f32 + 1.0 - position) * delta
            } else {
                (position - cell as f32) * delta
            }
        };
        let mut t_max = Vector3::new(
            boundary(origin.x, voxel.x, direction.x, t_delta.x),
            boundary(origin.y, voxel.y, direction.y, t_delta.y),
            boundary(origin.z, voxel.z, direction.z, t_delta.z),
        );

        let mut previous = voxel;
        let mut distance = 0.0;

        while distance <= max_distance {
            let block = self.store.get_at(voxel);
            if !block.is_air() {
                return Some(RayHit {
                    block_position: voxel,
                    place_position: previous,
                    block,
                });
            }

            previous = voxel;
            if t_max.x < t_max.y && t_max.x < t_max.z {
                distance = t_max.x;
                voxel.x += step.x;
                t_max.x += t_delta.x;
            } else if t_max.y < t_max.z {
                distance = t_max.y;
                voxel.y += step.y;
                t_max.y += t_delta.y;
            } else {
                distance = t_max.z;
                voxel.z += step.z;
                t_max.z += t_delta.z;
            }
        }

        None
    }

    /// Stamps a corrupted village centered on column `(center_x, center_z)`.
    pub fn place_sick_village(&mut self, center_x: i32, center_z: i32) -> StructureEvent {
        let event =
            self.planner
                .place_sick_village(&mut self.store, &self.terrain, center_x, center_z);
        self.pending_events.push(event.clone());
        event
    }

    /// Takes every structure event queued since the last drain, oldest first.
    pub fn drain_structure_events(&mut self) -> Vec<StructureEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Drains the queued structure events into `listener`.
    ///
    /// # Returns
    /// The number of events dispatched.
    pub fn dispatch_structure_events(&mut self, listener: &mut dyn StructureListener) -> usize {
        let events = self.drain_structure_events();
        for event in &events {
            event.dispatch(listener);
        }
        events.len()
    }

    /// Copies every explicit voxel and generated chunk key, sorted.
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut voxels: Vec<VoxelEntry> = self
            .store
            .entries()
            .map(|(position, block)| VoxelEntry {
                x: position.x,
                y: position.y,
                z: position.z,
                id: block.id(),
            })
            .collect();
        voxels.sort_unstable();

        let mut chunks: Vec<ChunkCoord> = self.generated.iter().copied().collect();
        chunks.sort_unstable();

        WorldSnapshot {
            seed: self.config.seed,
            chunks,
            voxels,
        }
    }

    /// Replaces the world contents with `snapshot`.
    ///
    /// Every id is checked before anything changes, so a failed restore leaves the world
    /// untouched. Structure regions of the restored chunks are re-claimed so they are not
    /// populated a second time.
    ///
    /// A snapshot taken under another seed reseeds the terrain through its current noise
    /// source; a fixed custom field keeps producing the same values.
    ///
    /// # Errors
    /// `WorldError::UnknownBlockId` for an id with no `BlockType`.
    pub fn restore(&mut self, snapshot: &WorldSnapshot) -> Result<()> {
        let blocks = snapshot
            .voxels
            .iter()
            .map(|entry| {
                BlockType::from_id(entry.id)
                    .map(|block| (Point3::new(entry.x, entry.y, entry.z), block))
                    .ok_or(WorldError::UnknownBlockId(entry.id))
            })
            .collect::<Result<Vec<_>>>()?;

        if snapshot.seed != self.config.seed {
            info!(
                "Restoring snapshot with seed {} over seed {}",
                snapshot.seed, self.config.seed
            );
            self.config.seed = snapshot.seed;
            self.terrain.reseed(snapshot.seed);
        }

        self.store.clear();
        for (position, block) in blocks {
            self.store.set_at(position, block);
        }

        self.planner = StructurePlanner::new(self.config.chunk_size);
        self.generated = snapshot.chunks.iter().copied().collect();
        if self.terrain.mode() == TerrainMode::Noise {
            for coord in &snapshot.chunks {
                self.planner.replay_regions(&self.terrain, *coord);
            }
        }
        self.pending_events.clear();

        info!(
            "Restored {} voxels across {} chunks",
            self.store.len(),
            self.generated.len()
        );
        Ok(())
    }
}
