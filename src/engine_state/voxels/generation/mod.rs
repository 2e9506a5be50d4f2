//! # Generation Module
//!
//! Deterministic procedural content for chunk columns:
//!
//! * **noise_source**: the seeded noise fields everything samples
//! * **terrain**: biomes, heights, column fill and vegetation
//! * **structures**: one-shot villages and portals gated by coarse region keys
//!
//! Every function here is total. A failed noise evaluation falls back to flat values
//! instead of aborting generation.

pub mod noise_source;
pub mod structures;
pub mod terrain;

/// A deterministic classification of a horizontal position.
///
/// Biomes are derived from noise on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Biome {
    Plains,
    Forest,
    Mountains,
    Desert,
    Water,
}

/// A random generator whose stream depends only on the world seed, a salt and a column.
///
/// Used wherever generation wants "random" detail (tree heights, leaf retention, ruined
/// walls) without giving up reproducibility.
pub(crate) fn column_rng(seed: u32, salt: u64, x: i32, z: i32) -> fastrand::Rng {
    let mixed = (u64::from(seed) << 32 | salt)
        ^ u64::from(x as u32).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ u64::from(z as u32).wrapping_mul(0xC2B2_AE3D_27D4_EB4F).rotate_left(31);
    fastrand::Rng::with_seed(mixed)
}
