#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Blockworld
//!
//! The world engine of an explorable block game: sparse voxel storage, deterministic
//! terrain, biome and structure generation, hidden-face culled chunk meshing, and
//! distance-based chunk streaming around a moving observer.
//!
//! ## Key Modules
//!
//! * `core` - The crate error type and the tick-driven effect queue
//! * `engine_state` - The engine context with the world, meshes and streamer
//!
//! ## Architecture
//!
//! Data flows one way through a single simulation thread:
//! * the streamer asks the world to generate chunks entering range
//! * terrain fills the voxel store, and structure planning overlays it
//! * the mesh manager turns changed chunks into flat mesh buffers
//! * an external renderer uploads the buffers it is handed
//!
//! Gameplay systems (villages, portals, inventory) sit outside the engine. They read and
//! write blocks through [`EngineState`] and receive structure placements as
//! [`StructureEvent`]s.
//!
//! ## Usage
//!
//! ```rust
//! use blockworld::{EngineState, WorldConfig};
//! use cgmath::Point3;
//! use web_time::Duration;
//!
//! let config = WorldConfig {
//!     render_distance: 2,
//!     ..Default::default()
//! };
//! let mut engine = EngineState::new(config).unwrap();
//! let report = engine.tick(Point3::new(0.0, 40.0, 0.0), Duration::from_millis(16));
//! assert_eq!(report.loaded.len(), 25);
//! ```

use cgmath::{Point3, Vector3};
use log::{info, warn};
use web_time::{Duration, Instant};

pub mod core;
pub mod engine_state;

pub use crate::core::{Result, TimedEffects, WorldError};
pub use engine_state::{
    config::{TerrainMode, WorldConfig},
    rendering::meshing::{build_culled, ChunkMesh, Face, MeshManager},
    streaming::{ChunkStreamer, StreamReport},
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType},
        chunk::{ChunkCoord, ChunkOccupancy, RegionKey},
        generation::{
            noise_source::{NoiseSource, SimplexNoiseSource},
            structures::{StructureBounds, StructureEvent, StructureListener, StructurePlanner},
            terrain::TerrainGenerator,
            Biome,
        },
        snapshot::{VoxelEntry, WorldSnapshot},
        store::VoxelStore,
        world::{RayHit, World},
    },
    BlockEdit, EngineState, TickReport,
};

/// Length of one simulated frame of the headless driver.
const FRAME: Duration = Duration::from_millis(50);
/// Number of frames the headless driver simulates.
const FRAMES: u32 = 200;
/// Observer walking speed of the headless driver, in voxels per second.
const WALK_SPEED: f32 = 12.0;

/// Logs structure placements in place of real village and portal systems.
struct LoggingListener;

impl StructureListener for LoggingListener {
    fn on_village(&mut self, anchor: Point3<i32>) {
        info!("Village ready at ({}, {}, {})", anchor.x, anchor.y, anchor.z);
    }

    fn on_portal(&mut self, anchor: Point3<i32>) {
        info!("Portal endpoint at ({}, {}, {})", anchor.x, anchor.y, anchor.z);
    }

    fn on_sick_village(&mut self, anchor: Point3<i32>, villagers: u32) {
        info!(
            "Corrupted village with {villagers} villagers at ({}, {}, {})",
            anchor.x, anchor.y, anchor.z
        );
    }
}

/// Runs the engine headless: an observer walks east across the world while chunks stream
/// in and out around them.
///
/// The first command line argument, if any, is the path of a JSON `WorldConfig`.
///
/// # Errors
/// Any error from loading or validating the configuration.
pub fn run() -> Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {path}");
            WorldConfig::load(path)?
        }
        None => WorldConfig::default(),
    };

    let start = Instant::now();
    let mut engine = EngineState::new(config)?;
    let mut listener = LoggingListener;
    let mut observer: Point3<f32> = Point3::new(8.0, 0.0, 8.0);
    let mut meshes_uploaded = 0;

    for frame in 0..FRAMES {
        observer.y = engine
            .world()
            .surface_height(observer.x.floor() as i32, observer.z.floor() as i32)
            .map_or(observer.y, |height| height as f32 + 2.0);

        let report = engine.tick(observer, FRAME);
        meshes_uploaded += engine.take_pending_uploads().len();
        engine.dispatch_structure_events(&mut listener);

        // Dig out the voxel in front of the observer every few seconds.
        if frame % 40 == 20 {
            let facing = Vector3::new(1.0, -0.5, 0.0);
            match engine.world().raycast(observer, facing, 8.0) {
                Some(hit) => {
                    engine.schedule_block_change(FRAME * 4, hit.block_position, BlockType::AIR)
                }
                None => warn!("Nothing to dig in front of the observer"),
            }
        }

        if !report.loaded.is_empty() || !report.unloaded.is_empty() {
            info!(
                "Frame {frame}: observer at chunk {:?}, {} loaded, {} unloaded, {} rebuilt",
                ChunkCoord::from_world_position(observer, engine.world().config().chunk_size),
                report.loaded.len(),
                report.unloaded.len(),
                report.rebuilt.len()
            );
        }

        observer.x += WALK_SPEED * FRAME.as_secs_f32();
    }

    info!(
        "Simulated {FRAMES} frames in {:?}: {} chunks generated, {} loaded, {} voxels stored, {} mesh uploads",
        start.elapsed(),
        engine.world().generated_count(),
        engine.streamer().loaded_count(),
        engine.world().store().len(),
        meshes_uploaded
    );

    Ok(())
}
