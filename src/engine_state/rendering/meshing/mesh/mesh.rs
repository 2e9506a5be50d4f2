//! Mesh data for one chunk column, laid out as flat attribute arrays.
//!
//! The layout is a triangle soup: no index buffer, three floats per position, normal and
//! color, two per UV. The vertex count is always a multiple of six.

use crate::engine_state::voxels::chunk::ChunkCoord;

/// The renderable geometry of one chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// The chunk this mesh was built from
    pub coord: ChunkCoord,
    /// `3 * N` world-space positions
    pub positions: Vec<f32>,
    /// `3 * N` outward face normals
    pub normals: Vec<f32>,
    /// `2 * N` texture coordinates
    pub uvs: Vec<f32>,
    /// `3 * N` linear RGB material colors
    pub colors: Vec<f32>,
}

impl ChunkMesh {
    pub fn new(coord: ChunkCoord) -> Self {
        ChunkMesh {
            coord,
            ..Default::default()
        }
    }

    /// Number of vertices `N`.
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of visible faces, two triangles each.
    pub fn face_count(&self) -> usize {
        self.vertex_count() / 6
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The position buffer as raw bytes for upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// The normal buffer as raw bytes for upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// The UV buffer as raw bytes for upload.
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// The color buffer as raw bytes for upload.
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}
