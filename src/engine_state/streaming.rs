//! # Chunk Streaming
//!
//! Keeps the set of loaded chunks centered on a moving observer. A chunk is loaded once it
//! comes within `render_distance` (Chebyshev, in chunks) of the observer's chunk, and
//! unloaded once it drifts beyond `render_distance + unload_margin`. The gap between the two
//! radii stops chunks from loading and unloading every tick when the observer walks back and
//! forth over a chunk border.
//!
//! Loading generates the chunk (a no-op after the first time) and builds its mesh.
//! Unloading only releases the mesh; voxels stay in the store. Every update ends with a
//! mesh refresh, so loaded chunks touched by a neighbour's trees or structures are rebuilt
//! in the same step.

use std::collections::HashSet;

use cgmath::Point3;
use log::debug;
use web_time::Instant;

use crate::engine_state::{
    config::WorldConfig,
    rendering::meshing::MeshManager,
    voxels::{chunk::ChunkCoord, world::World},
};

/// What a single streaming update changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamReport {
    /// Chunks loaded by this update, nearest first
    pub loaded: Vec<ChunkCoord>,
    /// Chunks unloaded by this update, sorted
    pub unloaded: Vec<ChunkCoord>,
    /// Chunks whose mesh was (re)built by this update, sorted
    pub rebuilt: Vec<ChunkCoord>,
}

/// The load/unload control loop.
pub struct ChunkStreamer {
    render_distance: i32,
    unload_distance: i32,
    chunk_size: i32,
    /// Chunks whose meshes are currently live
    loaded: HashSet<ChunkCoord>,
    /// The observer's chunk at the last update
    center: Option<ChunkCoord>,
}

impl ChunkStreamer {
    pub fn new(config: &WorldConfig) -> Self {
        ChunkStreamer {
            render_distance: config.render_distance,
            unload_distance: config.unload_distance(),
            chunk_size: config.chunk_size,
            loaded: HashSet::new(),
            center: None,
        }
    }

    /// Loads every chunk within `render_distance` of the observer and unloads every loaded
    /// chunk beyond the unload distance.
    ///
    /// # Arguments
    /// * `observer` - World position of the observer
    /// * `world` - Generates chunks entering range
    /// * `meshes` - Builds meshes for loaded chunks and releases unloaded ones
    pub fn update(
        &mut self,
        observer: Point3<f32>,
        world: &mut World,
        meshes: &mut MeshManager,
    ) -> StreamReport {
        let start = Instant::now();
        let center = ChunkCoord::from_world_position(observer, self.chunk_size);
        self.center = Some(center);

        let mut report = StreamReport::default();
        let r = self.render_distance;

        let mut wanted: Vec<ChunkCoord> = (-r..=r)
            .flat_map(|dx| (-r..=r).map(move |dz| ChunkCoord::new(center.x + dx, center.z + dz)))
            .filter(|coord| !self.loaded.contains(coord))
            .collect();
        wanted.sort_by_key(|coord| (coord.chebyshev_distance(center), *coord));

        for coord in wanted {
            world.generate_chunk(coord);
            meshes.load(coord);
            self.loaded.insert(coord);
            report.loaded.push(coord);
        }

        let unload_distance = self.unload_distance;
        let mut far: Vec<ChunkCoord> = self
            .loaded
            .iter()
            .filter(|coord| coord.chebyshev_distance(center) > unload_distance)
            .copied()
            .collect();
        far.sort_unstable();

        for coord in &far {
            self.loaded.remove(coord);
            meshes.unload(*coord);
        }
        report.unloaded = far;

        // Meshes are built after all generation so they see their neighbours' final voxels.
        report.rebuilt = meshes.refresh(world.store_mut());

        if !report.loaded.is_empty() || !report.unloaded.is_empty() {
            debug!(
                "Streamed around chunk ({}, {}): {} loaded, {} unloaded in {:?}",
                center.x,
                center.z,
                report.loaded.len(),
                report.unloaded.len(),
                start.elapsed()
            );
        }

        report
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.loaded.contains(&coord)
    }

    /// Every loaded chunk, sorted.
    pub fn loaded_chunks(&self) -> Vec<ChunkCoord> {
        let mut chunks: Vec<ChunkCoord> = self.loaded.iter().copied().collect();
        chunks.sort_unstable();
        chunks
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// The observer's chunk at the last update.
    pub fn center(&self) -> Option<ChunkCoord> {
        self.center
    }

    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }
}
