//! Renderer: one ray per pixel, marched through the voxel grid.
//!
//! # Invariants
//! - The renderer never mutates the grid or the camera.
//! - The pixel buffer is fully overwritten every frame; nothing accumulates.
//! - A frame always runs to completion; there is no mid-frame suspension.

pub mod buffer;
pub mod renderer;
pub mod trace;

pub use buffer::PixelBuffer;
pub use renderer::{Raycaster, RenderError, Renderer};
pub use trace::{march, RayHit, TraceError};

pub fn crate_info() -> &'static str {
    "voxelspace-render v0.1.0"
}
