//! Shared types for the voxelspace engine.
//!
//! # Invariants
//! - A voxel value of zero always means empty.
//! - Grid dimensions are fixed at construction and never change.

pub mod settings;
pub mod voxel;

pub use settings::{GridDims, RenderSettings};
pub use voxel::{face_colors, Voxel};

pub fn crate_info() -> &'static str {
    "voxelspace-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
