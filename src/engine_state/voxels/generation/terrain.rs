//! # Terrain Generation Module
//!
//! Pure functions of `(x, z)` and the seed that decide biome and height, plus the column
//! fill that writes terrain, water, ore and trees into the `VoxelStore`.
//!
//! ## Noise Fields
//!
//! | Field       | Scale          | Use                                   |
//! |-------------|----------------|---------------------------------------|
//! | biome       | 0.01           | water / mountains split               |
//! | temperature | 0.005          | desert / forest split                 |
//! | height      | 0.01/0.005/0.02| weighted 0.5 / 0.3 / 0.2              |
//! | ore (3D)    | 0.1            | emerald ore above 0.7                 |
//! | trees       | 0.1            | forest trees above 0.6                |

use std::cell::Cell;

use crate::engine_state::{
    config::{TerrainMode, WorldConfig},
    voxels::{
        block::block_type::BlockType,
        chunk::ChunkCoord,
        generation::{
            column_rng,
            noise_source::{sanitize, NoiseSource, SimplexNoiseSource},
            Biome,
        },
        store::VoxelStore,
    },
};

/// Scale of the biome noise field.
pub const BIOME_SCALE: f64 = 0.01;
/// The temperature field samples the same noise at this fraction of the biome scale.
pub const TEMPERATURE_SCALE_FACTOR: f64 = 0.5;
/// `(scale, weight)` of each height octave. The weights sum to one.
pub const HEIGHT_OCTAVES: [(f64, f64); 3] = [(0.01, 0.5), (0.005, 0.3), (0.02, 0.2)];
/// Scale of the 3D ore noise.
pub const ORE_SCALE: f64 = 0.1;
/// Ore replaces stone where the ore noise exceeds this.
pub const ORE_THRESHOLD: f64 = 0.7;
/// Scale of the tree placement noise.
pub const TREE_SCALE: f64 = 0.1;
/// Forest columns grow a tree where the tree noise exceeds this.
pub const TREE_THRESHOLD: f64 = 0.6;
/// Mountain surfaces more than this far above `base_height` are bare stone.
pub const MOUNTAIN_STONE_LINE: i32 = 8;
/// Number of dirt (or sand) layers under the surface voxel.
pub const SUBSURFACE_DEPTH: i32 = 3;

const TREE_RNG_SALT: u64 = 0x7EE5;

/// Generates biomes, heights and column contents from a fixed seed.
///
/// # Examples
///
/// ```
/// use blockworld::{TerrainGenerator, WorldConfig};
///
/// let terrain = TerrainGenerator::new(&WorldConfig::default());
/// let height = terrain.height(120, -40);
/// assert_eq!(height, terrain.height(120, -40));
/// assert!((16..=48).contains(&height));
/// ```
pub struct TerrainGenerator {
    /// The noise every field samples
    noise: Box<dyn NoiseSource>,
    /// Seed for per-column random detail
    seed: u32,
    base_height: i32,
    height_variation: i32,
    sea_level: i32,
    chunk_size: i32,
    mode: TerrainMode,
    /// Biome and height lookups that fell back since the last `take_noise_fallbacks`
    noise_fallbacks: Cell<u32>,
}

impl TerrainGenerator {
    /// Creates a generator sampling simplex noise seeded with `config.seed`.
    pub fn new(config: &WorldConfig) -> Self {
        Self::with_noise(config, Box::new(SimplexNoiseSource::new(config.seed)))
    }

    /// Creates a generator sampling a custom noise source.
    pub fn with_noise(config: &WorldConfig, noise: Box<dyn NoiseSource>) -> Self {
        TerrainGenerator {
            noise,
            seed: config.seed,
            base_height: config.base_height,
            height_variation: config.height_variation,
            sea_level: config.sea_level(),
            chunk_size: config.chunk_size,
            mode: config.terrain_mode,
            noise_fallbacks: Cell::new(0),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Moves every noise field and per-column random detail to `seed`, keeping the noise
    /// source itself.
    pub fn reseed(&mut self, seed: u32) {
        self.seed = seed;
        self.noise.reseed(seed);
    }

    pub fn base_height(&self) -> i32 {
        self.base_height
    }

    pub fn sea_level(&self) -> i32 {
        self.sea_level
    }

    pub fn mode(&self) -> TerrainMode {
        self.mode
    }

    /// Returns and resets the number of biome or height lookups that hit a failed noise
    /// evaluation.
    pub fn take_noise_fallbacks(&self) -> u32 {
        self.noise_fallbacks.take()
    }

    fn record_fallback(&self) {
        self.noise_fallbacks.set(self.noise_fallbacks.get().saturating_add(1));
    }

    /// Samples the 2D field, or `None` if the evaluation produced a non-finite value.
    pub fn sample_2d(&self, x: f64, z: f64) -> Option<f64> {
        sanitize(self.noise.noise_2d(x, z))
    }

    /// Samples the 3D field, or `None` if the evaluation produced a non-finite value.
    pub fn sample_3d(&self, x: f64, y: f64, z: f64) -> Option<f64> {
        sanitize(self.noise.noise_3d(x, y, z))
    }

    /// Classifies the column at `(x, z)`.
    ///
    /// The first matching rule wins: water, desert, mountains, forest, then plains. A failed
    /// noise evaluation yields plains.
    pub fn biome(&self, x: i32, z: i32) -> Biome {
        let (x, z) = (f64::from(x), f64::from(z));
        let temperature_scale = BIOME_SCALE * TEMPERATURE_SCALE_FACTOR;

        let (Some(n), Some(temperature)) = (
            self.sample_2d(x * BIOME_SCALE, z * BIOME_SCALE),
            self.sample_2d(x * temperature_scale, z * temperature_scale),
        ) else {
            self.record_fallback();
            return Biome::Plains;
        };

        if n < -0.3 {
            Biome::Water
        } else if temperature > 0.4 {
            Biome::Desert
        } else if n > 0.3 {
            Biome::Mountains
        } else if temperature > 0.1 {
            Biome::Forest
        } else {
            Biome::Plains
        }
    }

    /// The height of the surface voxel of column `(x, z)`.
    ///
    /// Always within `base_height +- height_variation`. A failed noise evaluation yields
    /// `base_height`.
    pub fn height(&self, x: i32, z: i32) -> i32 {
        let (x, z) = (f64::from(x), f64::from(z));
        let mut combined = 0.0;

        for (scale, weight) in HEIGHT_OCTAVES {
            match self.sample_2d(x * scale, z * scale) {
                Some(sample) => combined += sample * weight,
                None => {
                    self.record_fallback();
                    return self.base_height;
                }
            }
        }

        let height = (f64::from(self.base_height) + combined * f64::from(self.height_variation))
            .floor() as i32;
        height.clamp(
            self.base_height - self.height_variation,
            self.base_height + self.height_variation,
        )
    }

    /// Fills every column of `coord` according to the configured terrain mode.
    pub fn generate_chunk(&self, store: &mut VoxelStore, coord: ChunkCoord) {
        let (origin_x, origin_z) = coord.origin(self.chunk_size);

        for x in origin_x..origin_x + self.chunk_size {
            for z in origin_z..origin_z + self.chunk_size {
                match self.mode {
                    TerrainMode::Noise => self.fill_column(store, x, z),
                    TerrainMode::Flat => self.fill_flat_column(store, x, z),
                }
            }
        }
    }

    /// Writes terrain layers, sea water and vegetation for column `(x, z)`.
    pub fn fill_column(&self, store: &mut VoxelStore, x: i32, z: i32) {
        let biome = self.biome(x, z);
        let height = self.height(x, z);

        for y in 0..=height {
            let block = if y == height {
                self.surface_block(biome, y)
            } else if y >= height - SUBSURFACE_DEPTH {
                if biome == Biome::Desert {
                    BlockType::SAND
                } else {
                    BlockType::DIRT
                }
            } else if self.should_generate_ore(x, y, z) {
                BlockType::EMERALD_ORE
            } else {
                BlockType::STONE
            };

            store.set(x, y, z, block);
        }

        if height < self.sea_level {
            for y in height + 1..=self.sea_level {
                store.set(x, y, z, BlockType::WATER);
            }
        }

        if height >= self.sea_level && biome == Biome::Forest && self.should_generate_tree(x, z) {
            self.place_tree(store, x, height + 1, z);
        }
    }

    /// Writes the flat fallback column: grass at `base_height`, dirt, then stone.
    pub fn fill_flat_column(&self, store: &mut VoxelStore, x: i32, z: i32) {
        for y in 0..=self.base_height {
            let block = if y == self.base_height {
                BlockType::GRASS
            } else if y >= self.base_height - SUBSURFACE_DEPTH {
                BlockType::DIRT
            } else {
                BlockType::STONE
            };
            store.set(x, y, z, block);
        }
    }

    /// Grows a tree whose trunk starts at `(x, y, z)`.
    ///
    /// The trunk is 4 to 6 wood voxels tall. Leaves fill the cells within Manhattan
    /// distance 3 above the trunk top, keeping about 70% of them, and only replace air.
    pub fn place_tree(&self, store: &mut VoxelStore, x: i32, y: i32, z: i32) {
        let mut rng = column_rng(self.seed, TREE_RNG_SALT, x, z);
        let trunk_height = 4 + rng.i32(0..3);

        for i in 0..trunk_height {
            store.set(x, y + i, z, BlockType::WOOD);
        }

        let leaf_y = y + trunk_height - 1;
        for dx in -2..=2i32 {
            for dz in -2..=2i32 {
                for dy in 0..=2i32 {
                    let distance = dx.abs() + dz.abs() + dy;
                    if distance <= 3 && rng.f64() > 0.3 {
                        let (leaf_x, leaf_z, current_y) = (x + dx, z + dz, leaf_y + dy);
                        if store.get(leaf_x, current_y, leaf_z).is_air() {
                            store.set(leaf_x, current_y, leaf_z, BlockType::LEAVES);
                        }
                    }
                }
            }
        }
    }

    fn surface_block(&self, biome: Biome, y: i32) -> BlockType {
        match biome {
            Biome::Plains | Biome::Forest | Biome::Water => BlockType::GRASS,
            Biome::Desert => BlockType::SAND,
            Biome::Mountains => {
                if y > self.base_height + MOUNTAIN_STONE_LINE {
                    BlockType::STONE
                } else {
                    BlockType::GRASS
                }
            }
        }
    }

    fn should_generate_ore(&self, x: i32, y: i32, z: i32) -> bool {
        if y > self.base_height {
            return false;
        }

        self.sample_3d(
            f64::from(x) * ORE_SCALE,
            f64::from(y) * ORE_SCALE,
            f64::from(z) * ORE_SCALE,
        )
        .is_some_and(|sample| sample > ORE_THRESHOLD)
    }

    fn should_generate_tree(&self, x: i32, z: i32) -> bool {
        self.sample_2d(f64::from(x) * TREE_SCALE, f64::from(z) * TREE_SCALE)
            .is_some_and(|sample| sample > TREE_THRESHOLD)
    }
}
