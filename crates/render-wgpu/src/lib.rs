//! wgpu display backend for the voxelspace renderer.
//!
//! The frame is computed on the CPU; this crate only uploads the finished
//! pixel buffer to a texture and stretches it over the window surface.
//!
//! # Invariants
//! - The backend never touches world or camera state.
//! - Pixel orientation matches the buffer contract: row 0 is the bottom
//!   screen edge.

mod blit;
mod shaders;

pub use blit::{BlitError, PixelBlitRenderer};
