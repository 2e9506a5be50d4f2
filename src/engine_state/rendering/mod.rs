//! # Rendering Module
//!
//! The CPU side of rendering: chunk meshes ready to hand to an external renderer. Nothing
//! here talks to a graphics API; meshes are flat `f32` buffers with byte views for upload.

pub mod meshing;
