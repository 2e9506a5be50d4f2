//! Culled face meshing.
//!
//! Every non-air voxel contributes one quad per face whose neighbour is air, or is water
//! while the voxel itself is not. Fully enclosed voxels contribute nothing. Meshes are
//! always built for a whole chunk; there is no per-face patching.

use crate::engine_state::voxels::{block::block_side::BlockSide, chunk::ChunkOccupancy};

use super::{face::Face, mesh::ChunkMesh};

/// Builds the mesh of the chunk captured in `occupancy`.
///
/// # Returns
/// The mesh, or `None` when the chunk has no visible face.
pub fn build_culled(occupancy: &ChunkOccupancy) -> Option<ChunkMesh> {
    if occupancy.is_empty() {
        return None;
    }

    let mut mesh = ChunkMesh::new(occupancy.coord());

    for &(position, block) in occupancy.blocks() {
        for side in BlockSide::all() {
            if occupancy.is_face_visible(position, block, side) {
                Face::new(position, block, side).push_vertices(
                    &mut mesh.positions,
                    &mut mesh.normals,
                    &mut mesh.uvs,
                    &mut mesh.colors,
                );
            }
        }
    }

    if mesh.is_empty() {
        None
    } else {
        Some(mesh)
    }
}
