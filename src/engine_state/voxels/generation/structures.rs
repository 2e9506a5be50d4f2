//! # Structure Planning Module
//!
//! Decides, per generated chunk, whether a village or a portal is placed, and stamps the
//! structure into the `VoxelStore`.
//!
//! ## One-Shot Regions
//!
//! Decisions are gated on coarse grids over chunk coordinates (8 chunks per village
//! region, 16 per portal region). Once a region key is marked, every later decision for a
//! chunk in that region is `false`, so each region holds at most one structure of each
//! kind no matter how often or in which order its chunks are generated.
//!
//! ## Collaborators
//!
//! The planner holds no reference to village or portal managers. Each placement produces a
//! [`StructureEvent`] that the host drains and routes to its own systems, optionally via a
//! [`StructureListener`].

use std::collections::HashSet;

use cgmath::Point3;
use log::debug;

use crate::engine_state::voxels::{
    block::block_type::BlockType,
    chunk::{ChunkCoord, RegionKey, PORTAL_REGION_SIZE, VILLAGE_REGION_SIZE},
    generation::{column_rng, terrain::TerrainGenerator},
    store::VoxelStore,
};

/// Scale of the village decision noise over chunk coordinates.
pub const VILLAGE_NOISE_SCALE: f64 = 0.01;
/// A village region is claimed where the village noise exceeds this.
pub const VILLAGE_THRESHOLD: f64 = 0.5;
/// Scale of the portal decision noise over chunk coordinates.
pub const PORTAL_NOISE_SCALE: f64 = 0.005;
/// A portal region is claimed where the portal noise exceeds this.
pub const PORTAL_THRESHOLD: f64 = 0.8;

/// Half-width of the area cleared around a village center.
pub const VILLAGE_CLEAR_RADIUS: i32 = 15;
/// Height of the air cleared above the local terrain of a village.
pub const VILLAGE_CLEAR_HEIGHT: i32 = 8;
/// Half-width of the area cleared around a portal.
pub const PORTAL_CLEAR_RADIUS: i32 = 5;
/// Height of the air cleared above a portal's base.
pub const PORTAL_CLEAR_HEIGHT: i32 = 6;
/// Half-width of the obsidian frame (a 5x5 footprint).
pub const PORTAL_FRAME_RADIUS: i32 = 2;
/// Half-width of the area cleared around a corrupted village.
pub const SICK_VILLAGE_CLEAR_RADIUS: i32 = 12;
/// Height of the air cleared above the local terrain of a corrupted village.
pub const SICK_VILLAGE_CLEAR_HEIGHT: i32 = 6;
/// Number of sick villagers a corrupted village asks its collaborator to spawn.
pub const SICK_VILLAGERS: u32 = 5;

const SICK_VILLAGE_RNG_SALT: u64 = 0x51C4;

/// An inclusive axis-aligned box of voxels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureBounds {
    pub min: Point3<i32>,
    pub max: Point3<i32>,
}

impl StructureBounds {
    /// Whether the voxel `position` lies inside the box.
    pub fn contains(&self, position: Point3<i32>) -> bool {
        (self.min.x..=self.max.x).contains(&position.x)
            && (self.min.y..=self.max.y).contains(&position.y)
            && (self.min.z..=self.max.z).contains(&position.z)
    }

    /// Whether the two boxes share at least one voxel.
    pub fn intersects(&self, other: &StructureBounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
            && self.min.z <= other.max.z
            && other.min.z <= self.max.z
    }
}

/// A structure stamped into the world, waiting to be handed to its collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureEvent {
    /// A village whose NPCs should be spawned around `anchor`.
    Village {
        anchor: Point3<i32>,
        bounds: StructureBounds,
    },
    /// A portal whose teleport endpoint sits at `anchor`.
    Portal {
        anchor: Point3<i32>,
        bounds: StructureBounds,
    },
    /// A corrupted village that should be populated with `villagers` sick villagers.
    SickVillage {
        anchor: Point3<i32>,
        bounds: StructureBounds,
        villagers: u32,
    },
}

impl StructureEvent {
    pub fn anchor(&self) -> Point3<i32> {
        match self {
            StructureEvent::Village { anchor, .. }
            | StructureEvent::Portal { anchor, .. }
            | StructureEvent::SickVillage { anchor, .. } => *anchor,
        }
    }

    pub fn bounds(&self) -> StructureBounds {
        match self {
            StructureEvent::Village { bounds, .. }
            | StructureEvent::Portal { bounds, .. }
            | StructureEvent::SickVillage { bounds, .. } => *bounds,
        }
    }

    /// Routes this event to the matching listener callback.
    pub fn dispatch(&self, listener: &mut dyn StructureListener) {
        match self {
            StructureEvent::Village { anchor, .. } => listener.on_village(*anchor),
            StructureEvent::Portal { anchor, .. } => listener.on_portal(*anchor),
            StructureEvent::SickVillage {
                anchor, villagers, ..
            } => listener.on_sick_village(*anchor, *villagers),
        }
    }
}

/// Receives structure placements on behalf of gameplay systems.
pub trait StructureListener {
    /// A village was placed; populate it with villagers around `anchor`.
    fn on_village(&mut self, anchor: Point3<i32>);

    /// A portal was placed; register a teleport endpoint at `anchor`.
    fn on_portal(&mut self, anchor: Point3<i32>);

    /// A corrupted village was placed.
    fn on_sick_village(&mut self, _anchor: Point3<i32>, _villagers: u32) {}
}

/// Tracks claimed regions and stamps structures into the store.
#[derive(Debug)]
pub struct StructurePlanner {
    /// Horizontal chunk edge length, used to find chunk centers
    chunk_size: i32,
    /// Village regions that already hold (or were decided for) a village
    generated_villages: HashSet<RegionKey>,
    /// Portal regions that already hold (or were decided for) a portal
    generated_portals: HashSet<RegionKey>,
}

impl StructurePlanner {
    pub fn new(chunk_size: i32) -> Self {
        StructurePlanner {
            chunk_size,
            generated_villages: HashSet::new(),
            generated_portals: HashSet::new(),
        }
    }

    /// Places every structure the newly generated chunk `coord` calls for.
    ///
    /// # Returns
    /// One event per structure placed, village first.
    pub fn plan_chunk(
        &mut self,
        store: &mut VoxelStore,
        terrain: &TerrainGenerator,
        coord: ChunkCoord,
    ) -> Vec<StructureEvent> {
        let (center_x, center_z) = coord.center(self.chunk_size);
        let mut events = Vec::new();

        if self.should_generate_village(terrain, coord) {
            events.push(self.place_village(store, terrain, center_x, center_z));
        }

        if self.should_generate_portal(terrain, coord) {
            events.push(self.place_portal(store, terrain, center_x, center_z));
        }

        events
    }

    /// Decides whether `coord` gets a village, claiming its region when it does.
    ///
    /// Returns `true` at most once per village region.
    pub fn should_generate_village(&mut self, terrain: &TerrainGenerator, coord: ChunkCoord) -> bool {
        Self::claim_region(
            &mut self.generated_villages,
            terrain,
            coord,
            VILLAGE_REGION_SIZE,
            VILLAGE_NOISE_SCALE,
            VILLAGE_THRESHOLD,
        )
    }

    /// Decides whether `coord` gets a portal, claiming its region when it does.
    ///
    /// Returns `true` at most once per portal region.
    pub fn should_generate_portal(&mut self, terrain: &TerrainGenerator, coord: ChunkCoord) -> bool {
        Self::claim_region(
            &mut self.generated_portals,
            terrain,
            coord,
            PORTAL_REGION_SIZE,
            PORTAL_NOISE_SCALE,
            PORTAL_THRESHOLD,
        )
    }

    /// Whether the village region containing `coord` is already claimed.
    pub fn is_village_region_generated(&self, coord: ChunkCoord) -> bool {
        self.generated_villages
            .contains(&coord.region(VILLAGE_REGION_SIZE))
    }

    /// Whether the portal region containing `coord` is already claimed.
    pub fn is_portal_region_generated(&self, coord: ChunkCoord) -> bool {
        self.generated_portals
            .contains(&coord.region(PORTAL_REGION_SIZE))
    }

    /// Re-runs both region decisions for a chunk generated in an earlier session.
    ///
    /// The decisions are deterministic, so replaying them for every restored chunk marks
    /// exactly the regions the saved session marked, without placing anything.
    pub fn replay_regions(&mut self, terrain: &TerrainGenerator, coord: ChunkCoord) {
        self.should_generate_village(terrain, coord);
        self.should_generate_portal(terrain, coord);
    }

    fn claim_region(
        generated: &mut HashSet<RegionKey>,
        terrain: &TerrainGenerator,
        coord: ChunkCoord,
        region_size: i32,
        scale: f64,
        threshold: f64,
    ) -> bool {
        let key = coord.region(region_size);
        if generated.contains(&key) {
            return false;
        }

        let sample = terrain.sample_2d(f64::from(coord.x) * scale, f64::from(coord.z) * scale);
        if sample.is_some_and(|noise| noise > threshold) {
            generated.insert(key);
            return true;
        }

        false
    }

    /// Clears and flattens a village footprint and builds its houses.
    ///
    /// Four 6x4x6 houses surround a taller central shop. The ground of the whole
    /// footprint is set to grass at the terrain height of the center.
    pub fn place_village(
        &self,
        store: &mut VoxelStore,
        terrain: &TerrainGenerator,
        center_x: i32,
        center_z: i32,
    ) -> StructureEvent {
        let ground_y = terrain.height(center_x, center_z);
        let r = VILLAGE_CLEAR_RADIUS;

        for x in center_x - r..=center_x + r {
            for z in center_z - r..=center_z + r {
                let height = terrain.height(x, z);
                for y in height + 1..=height + VILLAGE_CLEAR_HEIGHT {
                    store.set(x, y, z, BlockType::AIR);
                }
                store.set(x, ground_y, z, BlockType::GRASS);
            }
        }

        let floor_y = ground_y + 1;
        Self::place_building(store, center_x - 8, floor_y, center_z - 8, 6, 4, 6);
        Self::place_building(store, center_x + 2, floor_y, center_z - 8, 6, 4, 6);
        Self::place_building(store, center_x - 8, floor_y, center_z + 2, 6, 4, 6);
        Self::place_building(store, center_x + 2, floor_y, center_z + 2, 6, 4, 6);
        Self::place_building(store, center_x - 3, floor_y, center_z - 3, 6, 5, 6);

        debug!("Placed village at ({center_x}, {floor_y}, {center_z})");

        StructureEvent::Village {
            anchor: Point3::new(center_x, floor_y, center_z),
            bounds: StructureBounds {
                min: Point3::new(center_x - r, ground_y, center_z - r),
                max: Point3::new(center_x + r, ground_y + VILLAGE_CLEAR_HEIGHT, center_z + r),
            },
        }
    }

    /// Builds a wooden house with its floor under `(x, y, z)`.
    ///
    /// Walls are `height` tall with a one-voxel opening on the front wall, and a roof
    /// overhangs every side by one voxel.
    fn place_building(
        store: &mut VoxelStore,
        x: i32,
        y: i32,
        z: i32,
        width: i32,
        height: i32,
        depth: i32,
    ) {
        for dx in 0..width {
            for dz in 0..depth {
                store.set(x + dx, y - 1, z + dz, BlockType::WOOD);
            }
        }

        for dy in 0..height {
            for dx in 0..width {
                for dz in 0..depth {
                    let on_wall = dx == 0 || dx == width - 1 || dz == 0 || dz == depth - 1;
                    let is_opening = dx == width / 2 && dz == 0 && dy == 1;
                    if on_wall && (dy == 0 || dy == height - 1 || !is_opening) {
                        store.set(x + dx, y + dy, z + dz, BlockType::WOOD);
                    }
                }
            }
        }

        for dx in -1..=width {
            for dz in -1..=depth {
                store.set(x + dx, y + height, z + dz, BlockType::WOOD);
            }
        }
    }

    /// Clears a pad and builds a 5x5 obsidian frame around a 3x3x3 portal core.
    pub fn place_portal(
        &self,
        store: &mut VoxelStore,
        terrain: &TerrainGenerator,
        center_x: i32,
        center_z: i32,
    ) -> StructureEvent {
        let ground_y = terrain.height(center_x, center_z) + 1;
        let clear = PORTAL_CLEAR_RADIUS;
        let frame = PORTAL_FRAME_RADIUS;

        for x in center_x - clear..=center_x + clear {
            for z in center_z - clear..=center_z + clear {
                for y in ground_y..=ground_y + PORTAL_CLEAR_HEIGHT {
                    store.set(x, y, z, BlockType::AIR);
                }
            }
        }

        for x in center_x - frame..=center_x + frame {
            for z in center_z - frame..=center_z + frame {
                store.set(x, ground_y, z, BlockType::OBSIDIAN);

                let on_rim = (x - center_x).abs() == frame || (z - center_z).abs() == frame;
                if on_rim {
                    for y in ground_y + 1..=ground_y + 4 {
                        store.set(x, y, z, BlockType::OBSIDIAN);
                    }
                    store.set(x, ground_y + 5, z, BlockType::OBSIDIAN);
                } else {
                    for y in ground_y + 1..=ground_y + 3 {
                        store.set(x, y, z, BlockType::PORTAL);
                    }
                }
            }
        }

        let anchor = Point3::new(center_x, ground_y + 1, center_z);
        debug!("Placed portal at ({}, {}, {})", anchor.x, anchor.y, anchor.z);

        StructureEvent::Portal {
            anchor,
            bounds: StructureBounds {
                min: Point3::new(center_x - clear, ground_y, center_z - clear),
                max: Point3::new(center_x + clear, ground_y + PORTAL_CLEAR_HEIGHT, center_z + clear),
            },
        }
    }

    /// Stamps a corrupted village: scattered obsidian ground and three ruined huts.
    ///
    /// Randomness is drawn from the world seed and the center, so the same call always
    /// produces the same ruin.
    pub fn place_sick_village(
        &self,
        store: &mut VoxelStore,
        terrain: &TerrainGenerator,
        center_x: i32,
        center_z: i32,
    ) -> StructureEvent {
        let mut rng = column_rng(terrain.seed(), SICK_VILLAGE_RNG_SALT, center_x, center_z);
        let ground_y = terrain.height(center_x, center_z);
        let r = SICK_VILLAGE_CLEAR_RADIUS;

        for x in center_x - r..=center_x + r {
            for z in center_z - r..=center_z + r {
                let height = terrain.height(x, z);
                for y in height + 1..=height + SICK_VILLAGE_CLEAR_HEIGHT {
                    store.set(x, y, z, BlockType::AIR);
                }
                if rng.f64() > 0.7 {
                    store.set(x, ground_y, z, BlockType::OBSIDIAN);
                }
            }
        }

        let floor_y = ground_y + 1;
        Self::place_ruin(store, &mut rng, center_x - 6, floor_y, center_z - 6);
        Self::place_ruin(store, &mut rng, center_x + 1, floor_y, center_z - 6);
        Self::place_ruin(store, &mut rng, center_x - 6, floor_y, center_z + 1);

        debug!("Placed corrupted village at ({center_x}, {floor_y}, {center_z})");

        StructureEvent::SickVillage {
            anchor: Point3::new(center_x, floor_y, center_z),
            bounds: StructureBounds {
                min: Point3::new(center_x - r, ground_y, center_z - r),
                max: Point3::new(center_x + r, ground_y + SICK_VILLAGE_CLEAR_HEIGHT, center_z + r),
            },
            villagers: SICK_VILLAGERS,
        }
    }

    /// A 5x3x5 obsidian shell with roughly 30% of its wall voxels missing.
    fn place_ruin(store: &mut VoxelStore, rng: &mut fastrand::Rng, x: i32, y: i32, z: i32) {
        const SIZE: i32 = 5;
        const HEIGHT: i32 = 3;

        for dy in 0..HEIGHT {
            for dx in 0..SIZE {
                for dz in 0..SIZE {
                    let kept = rng.f64() > 0.3;
                    let on_wall = dx == 0 || dx == SIZE - 1 || dz == 0 || dz == SIZE - 1;
                    if kept && on_wall {
                        store.set(x + dx, y + dy, z + dz, BlockType::OBSIDIAN);
                    }
                }
            }
        }
    }
}
