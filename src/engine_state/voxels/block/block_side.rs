//! # Block Side Module
//!
//! This module defines the six axis-aligned faces of a voxel block and the geometry each
//! face contributes to a chunk mesh.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

/// Unit-cube corners of each face, counter-clockwise when seen from outside.
/// Indexed by `BlockSide as usize`.
static BLOCK_SIDE_TO_CORNERS: [[[i32; 3]; 4]; 6] = [
    [[0, 0, 1], [1, 0, 1], [1, 1, 1], [0, 1, 1]], // FRONT
    [[1, 0, 0], [0, 0, 0], [0, 1, 0], [1, 1, 0]], // BACK
    [[0, 0, 0], [1, 0, 0], [1, 0, 1], [0, 0, 1]], // BOTTOM
    [[0, 1, 1], [1, 1, 1], [1, 1, 0], [0, 1, 0]], // TOP
    [[0, 0, 1], [0, 1, 1], [0, 1, 0], [0, 0, 0]], // LEFT
    [[1, 0, 0], [1, 1, 0], [1, 1, 1], [1, 0, 1]], // RIGHT
];

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The offset from a voxel to the neighbour sharing this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        self.offset().cast::<f32>().unwrap_or(Vector3::new(0.0, 0.0, 0.0))
    }

    /// The four corners of this face on a unit cube at the origin.
    pub fn corners(self) -> [[i32; 3]; 4] {
        BLOCK_SIDE_TO_CORNERS[self as usize]
    }
}
