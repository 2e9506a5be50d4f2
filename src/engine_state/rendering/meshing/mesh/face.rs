use cgmath::Point3;

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType};

/// Texture coordinates of the four face corners, in corner order.
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// Corner order of the two triangles of a quad.
const QUAD_TRIANGLES: [usize; 6] = [0, 1, 2, 0, 2, 3];

/// A single visible face of one voxel.
///
/// A face becomes a quad of two triangles in the chunk mesh. Vertices are not shared
/// between faces, so each face owns its normal, UVs and flat color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// World position of the voxel this face belongs to
    pub position: Point3<i32>,
    /// Block of the voxel, which decides the face color
    pub block: BlockType,
    /// Which side of the voxel this face covers
    pub side: BlockSide,
}

impl Face {
    pub fn new(position: Point3<i32>, block: BlockType, side: BlockSide) -> Self {
        Face {
            position,
            block,
            side,
        }
    }

    /// The world-space corners of the face, counter-clockwise seen from outside.
    pub fn corners(&self) -> [[f32; 3]; 4] {
        self.side.corners().map(|[dx, dy, dz]| {
            [
                (self.position.x + dx) as f32,
                (self.position.y + dy) as f32,
                (self.position.z + dz) as f32,
            ]
        })
    }

    /// Appends the face's six vertices to the flat attribute buffers.
    ///
    /// # Arguments
    /// * `positions`, `normals`, `colors` - Three floats per vertex
    /// * `uvs` - Two floats per vertex
    pub fn push_vertices(
        &self,
        positions: &mut Vec<f32>,
        normals: &mut Vec<f32>,
        uvs: &mut Vec<f32>,
        colors: &mut Vec<f32>,
    ) {
        let corners = self.corners();
        let normal = self.side.normal();
        let color = self.block.color();

        for corner in QUAD_TRIANGLES {
            positions.extend_from_slice(&corners[corner]);
            normals.extend_from_slice(&[normal.x, normal.y, normal.z]);
            uvs.extend_from_slice(&CORNER_UVS[corner]);
            colors.extend_from_slice(&color);
        }
    }
}
