//! # Engine State Module
//!
//! The core engine module that owns every piece of world-engine state and drives it one
//! simulation step at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - The context object built once and passed to whoever needs the world
//! * `config` - Tunables for generation, meshing and streaming
//! * `voxels` - Block identities, voxel storage, and world generation
//! * `rendering` - Chunk meshes and their dirty tracking
//! * `streaming` - Loading and unloading chunks around the observer
//!
//! ## Architecture
//!
//! There is no global state. `EngineState` owns the `World`, the `MeshManager` and the
//! `ChunkStreamer`, and gameplay code reaches the world only through it. Each call to
//! [`EngineState::tick`] runs synchronously to completion:
//!
//! 1. Deferred block edits whose delay elapsed are applied
//! 2. The streamer loads and unloads chunks around the observer
//! 3. Meshes of every loaded chunk touched since the last tick are rebuilt

use cgmath::Point3;
use log::info;
use web_time::{Duration, Instant};

use crate::core::{error::Result, timed_effects::TimedEffects};

use rendering::meshing::{ChunkMesh, MeshManager};
use streaming::ChunkStreamer;
use voxels::{
    block::block_type::BlockType,
    chunk::ChunkCoord,
    generation::structures::{StructureEvent, StructureListener},
    world::World,
};

pub mod config;
pub mod rendering;
pub mod streaming;
pub mod voxels;

use config::WorldConfig;

/// A voxel write waiting for its delay to elapse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockEdit {
    pub position: Point3<i32>,
    pub block: BlockType,
}

/// What a single engine tick did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Chunks that entered the loaded set
    pub loaded: Vec<ChunkCoord>,
    /// Chunks that left the loaded set
    pub unloaded: Vec<ChunkCoord>,
    /// Chunks whose mesh was rebuilt and needs a re-upload
    pub rebuilt: Vec<ChunkCoord>,
    /// Deferred block edits applied this tick
    pub edits_applied: usize,
}

/// The main state container for the world engine.
///
/// # Examples
///
/// ```
/// use blockworld::{BlockType, EngineState, WorldConfig};
/// use cgmath::Point3;
/// use web_time::Duration;
///
/// let config = WorldConfig {
///     render_distance: 1,
///     ..Default::default()
/// };
/// let mut engine = EngineState::new(config).unwrap();
///
/// let report = engine.tick(Point3::new(8.0, 40.0, 8.0), Duration::from_millis(16));
/// assert_eq!(report.loaded.len(), 9);
///
/// engine.set_block(3, 60, 3, BlockType::STONE);
/// assert_eq!(engine.get_block(3, 60, 3), BlockType::STONE);
/// ```
pub struct EngineState {
    world: World,
    meshes: MeshManager,
    streamer: ChunkStreamer,
    /// Block edits scheduled by gameplay effects
    scheduled_edits: TimedEffects<BlockEdit>,
}

impl EngineState {
    /// Validates `config` and builds the world, mesh manager and streamer.
    ///
    /// # Errors
    /// `WorldError::InvalidConfig` if `config` fails validation.
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_world(World::new(config)))
    }

    /// Wraps an existing world, such as one generated from custom noise or restored from a
    /// snapshot.
    pub fn from_world(world: World) -> Self {
        let config = world.config();
        info!(
            "Engine ready: seed {}, chunk size {}, render distance {}, {:?} terrain",
            config.seed, config.chunk_size, config.render_distance, config.terrain_mode
        );

        EngineState {
            meshes: MeshManager::new(config.max_height),
            streamer: ChunkStreamer::new(config),
            scheduled_edits: TimedEffects::new(),
            world,
        }
    }

    /// Advances the engine by one simulation step.
    ///
    /// # Arguments
    /// * `observer` - The observer's world position this step
    /// * `dt` - Simulation time since the previous tick
    pub fn tick(&mut self, observer: Point3<f32>, dt: Duration) -> TickReport {
        let start = Instant::now();

        let edits = self.scheduled_edits.tick(dt);
        let edits_applied = edits.len();
        for edit in edits {
            self.world.store_mut().set_at(edit.position, edit.block);
        }

        let stream = self
            .streamer
            .update(observer, &mut self.world, &mut self.meshes);

        if !stream.rebuilt.is_empty() {
            log::debug!(
                "Tick rebuilt {} meshes in {:?}",
                stream.rebuilt.len(),
                start.elapsed()
            );
        }

        TickReport {
            loaded: stream.loaded,
            unloaded: stream.unloaded,
            rebuilt: stream.rebuilt,
            edits_applied,
        }
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.world.get_block(x, y, z)
    }

    /// Writes a block now; the affected meshes rebuild on the next tick.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, block: BlockType) -> BlockType {
        self.world.set_block(x, y, z, block)
    }

    /// Queues a block write that is applied once `delay` of simulation time has passed.
    pub fn schedule_block_change(&mut self, delay: Duration, position: Point3<i32>, block: BlockType) {
        self.scheduled_edits
            .schedule(delay, BlockEdit { position, block });
    }

    /// Number of deferred edits not applied yet.
    pub fn pending_edit_count(&self) -> usize {
        self.scheduled_edits.len()
    }

    /// The current mesh of a loaded chunk with visible faces.
    pub fn chunk_mesh(&self, coord: ChunkCoord) -> Option<&ChunkMesh> {
        self.meshes.mesh(coord)
    }

    /// Takes the chunks the renderer should re-upload, least recently rebuilt first.
    pub fn take_pending_uploads(&mut self) -> Vec<ChunkCoord> {
        self.meshes.take_pending_uploads()
    }

    pub fn drain_structure_events(&mut self) -> Vec<StructureEvent> {
        self.world.drain_structure_events()
    }

    /// Routes queued structure events to `listener`, returning how many were dispatched.
    pub fn dispatch_structure_events(&mut self, listener: &mut dyn StructureListener) -> usize {
        self.world.dispatch_structure_events(listener)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn meshes(&self) -> &MeshManager {
        &self.meshes
    }

    pub fn streamer(&self) -> &ChunkStreamer {
        &self.streamer
    }
}
