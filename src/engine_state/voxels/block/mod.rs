//! # Block Module
//!
//! This module provides the block identity enumeration, block faces, and the immutable
//! data tables indexed by block type. Tables are resolved once at compile time so no
//! per-call string lookup happens on hot paths.

use block_type::{BlockType, BLOCK_TYPE_COUNT};

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Maps each block type to its material color as `0xRRGGBB`.
///
/// The array is indexed by `BlockType` as a `usize`.
pub static BLOCK_TYPE_TO_COLOR: [u32; BLOCK_TYPE_COUNT] = [
    0x000000, // AIR (never meshed)
    0x8B4513, // DIRT
    0x808080, // STONE
    0x228B22, // GRASS
    0xD2691E, // WOOD
    0x32CD32, // LEAVES
    0xF4A460, // SAND
    0x1E90FF, // WATER
    0x00FF7F, // EMERALD_ORE
    0x191970, // OBSIDIAN
    0x8A2BE2, // PORTAL
];

/// Maps each block type to the inventory item it drops, indexed by `BlockType`.
pub static BLOCK_TYPE_TO_ITEM_NAME: [Option<&str>; BLOCK_TYPE_COUNT] = [
    None,             // AIR
    Some("dirt"),     // DIRT
    Some("stone"),    // STONE
    Some("grass"),    // GRASS
    Some("wood"),     // WOOD
    Some("leaves"),   // LEAVES
    Some("sand"),     // SAND
    None,             // WATER
    None,             // EMERALD_ORE (drops emeralds, handled by gameplay)
    Some("obsidian"), // OBSIDIAN
    None,             // PORTAL
];

/// Resolves inventory item names to the block they place.
pub static BLOCK_NAME_TO_TYPE: phf::Map<&'static str, BlockType> = phf::phf_map! {
    "dirt" => BlockType::DIRT,
    "stone" => BlockType::STONE,
    "grass" => BlockType::GRASS,
    "wood" => BlockType::WOOD,
    "leaves" => BlockType::LEAVES,
    "sand" => BlockType::SAND,
    "obsidian" => BlockType::OBSIDIAN,
};
