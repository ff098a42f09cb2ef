//! wgpu render backend for the water surface.
//!
//! Uploads the plane grid once, then each frame writes the camera and water
//! uniforms and draws the grid with the water program, filled or as lines.
//!
//! # Invariants
//! - The renderer never mutates the scene.
//! - The WGSL program mirrors `tidewater_shading` term for term.
//! - Wireframe indices are built on first use and kept afterwards.

mod gpu;
mod shaders;

pub use gpu::WaterRenderer;
