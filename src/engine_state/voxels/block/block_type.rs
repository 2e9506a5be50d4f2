//! # Block Type Module
//!
//! This module defines the closed set of block identities in the voxel world. The same
//! enumeration is the contract shared with gameplay systems: inventory maps blocks to
//! items through it, and structure collaborators receive it in placement events.

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::{BlockTypeSize, BLOCK_NAME_TO_TYPE, BLOCK_TYPE_TO_COLOR, BLOCK_TYPE_TO_ITEM_NAME};

/// Enumerates all possible block types in the voxel world.
///
/// The discriminants are stable ids used by snapshots. `FromPrimitive` allows
/// conversion back from the compact integer form.
#[repr(u8)]
#[allow(non_camel_case_types)]
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive, Serialize, Deserialize,
)]
pub enum BlockType {
    /// Empty space. Never stored explicitly.
    #[default]
    AIR = 0,
    /// Subsurface layer under grass.
    DIRT = 1,
    /// Deep terrain and mountain peaks.
    STONE = 2,
    /// Surface of plains, forests and low mountains.
    GRASS = 3,
    /// Tree trunks and village buildings.
    WOOD = 4,
    /// Tree canopies.
    LEAVES = 5,
    /// Desert surface and subsurface.
    SAND = 6,
    /// Rendered, but does not hide faces of other water.
    WATER = 7,
    /// Rare ore embedded in deep stone.
    EMERALD_ORE = 8,
    /// Portal frames and corrupted structures.
    OBSIDIAN = 9,
    /// Teleport surface inside a portal frame.
    PORTAL = 10,
}

/// Number of block types, used to size the lookup tables.
pub const BLOCK_TYPE_COUNT: usize = 11;

impl BlockType {
    /// Converts a compact id back into a `BlockType`.
    ///
    /// # Returns
    /// `None` when `id` does not name a block.
    pub fn from_id(id: BlockTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(id)
    }

    /// The compact id of this block.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    pub fn is_air(self) -> bool {
        self == BlockType::AIR
    }

    pub fn is_water(self) -> bool {
        self == BlockType::WATER
    }

    /// Whether the block obstructs movement.
    ///
    /// Air and water are passable; everything else is solid.
    pub fn is_solid(self) -> bool {
        !matches!(self, BlockType::AIR | BlockType::WATER)
    }

    /// Whether breaking this block needs a pickaxe.
    pub fn requires_tool(self) -> bool {
        self == BlockType::OBSIDIAN
    }

    /// The flat material color as linear RGB in `[0, 1]`.
    pub fn color(self) -> [f32; 3] {
        let hex = BLOCK_TYPE_TO_COLOR[self as usize];
        [
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
        ]
    }

    /// The inventory item this block drops when broken, if any.
    pub fn item_name(self) -> Option<&'static str> {
        BLOCK_TYPE_TO_ITEM_NAME[self as usize]
    }

    /// Resolves an inventory item name to the block it places.
    pub fn from_item_name(name: &str) -> Option<Self> {
        BLOCK_NAME_TO_TYPE.get(name).copied()
    }
}
