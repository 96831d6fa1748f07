//! Camera: position, orientation, and ray direction derivation.
//!
//! # Invariants
//! - Azimuth stays in (-pi, pi]; altitude stays within `MAX_ALTITUDE`.
//! - Each axis keeps its fractional offset in [0, 1).
//! - The camera is read-only during a render pass; only the input layer
//!   mutates it, once per frame.

pub mod camera;
pub mod projection;

pub use camera::{AxisPosition, Camera, MAX_ALTITUDE};
pub use projection::{spherical_to_direction, wrap_azimuth, Projection};

pub fn crate_info() -> &'static str {
    "voxelspace-camera v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("camera"));
    }
}
