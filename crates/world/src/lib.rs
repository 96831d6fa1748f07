//! World grid: fixed-size voxel storage and procedural generation.
//!
//! # Invariants
//! - The grid is read-only during rendering; only generation mutates it.
//! - A sealed grid keeps its entire boundary shell non-empty, so every ray
//!   that stays in bounds eventually hits something.

pub mod grid;

pub use grid::{GridError, VoxelGrid};

pub fn crate_info() -> &'static str {
    "voxelspace-world v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("world"));
    }
}
