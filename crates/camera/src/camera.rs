use crate::projection::wrap_azimuth;
use glam::DVec3;
use voxelspace_common::GridDims;

/// Highest altitude the camera may tilt to, just under vertical.
pub const MAX_ALTITUDE: f64 = 7.0 * std::f64::consts::PI / 16.0;

/// Position along one axis as an integer cell plus a fractional in-cell
/// offset, effectively a fixed-point real.
///
/// The split supports sub-voxel movement without float/int aliasing: the
/// integer cell is always exact for collision checks, while the fraction
/// carries the sub-cell remainder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisPosition {
    pub cell: i32,
    pub frac: f64,
}

impl AxisPosition {
    /// Build from an explicit split. The fraction must already be in [0, 1).
    pub fn new(cell: i32, frac: f64) -> Self {
        debug_assert!((0.0..1.0).contains(&frac));
        Self { cell, frac }
    }

    /// Build from a continuous coordinate, renormalizing so that the
    /// fraction lands in [0, 1).
    pub fn from_value(value: f64) -> Self {
        let cell = value.floor();
        Self {
            cell: cell as i32,
            frac: value - cell,
        }
    }

    /// The continuous coordinate this split represents.
    pub fn value(self) -> f64 {
        self.cell as f64 + self.frac
    }

    /// The position shifted by a continuous delta, renormalized.
    pub fn offset(self, delta: f64) -> Self {
        Self::from_value(self.value() + delta)
    }
}

/// The movable viewpoint: a fixed-point position per axis plus two view
/// angles.
///
/// Azimuth is the horizontal rotation in (-pi, pi], zero facing +z, wrapping
/// at the antimeridian. Altitude is the vertical tilt, clamped to
/// `MAX_ALTITUDE` so the view never quite reaches the poles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: AxisPosition,
    pub y: AxisPosition,
    pub z: AxisPosition,
    pub azimuth: f64,
    pub altitude: f64,
}

impl Camera {
    /// Camera at the integer center of a grid, level and facing +z.
    pub fn centered_in(dims: GridDims) -> Self {
        let (cx, cy, cz) = dims.center();
        Self {
            x: AxisPosition::new(cx, 0.0),
            y: AxisPosition::new(cy, 0.0),
            z: AxisPosition::new(cz, 0.0),
            azimuth: 0.0,
            altitude: 0.0,
        }
    }

    /// Continuous world position, the ray origin for rendering.
    pub fn position(&self) -> DVec3 {
        DVec3::new(self.x.value(), self.y.value(), self.z.value())
    }

    /// Integer cell the camera currently occupies.
    pub fn cell(&self) -> (i32, i32, i32) {
        (self.x.cell, self.y.cell, self.z.cell)
    }

    /// Turn by the given angle deltas. Azimuth wraps into (-pi, pi];
    /// altitude clamps at `MAX_ALTITUDE`.
    pub fn rotate(&mut self, d_azimuth: f64, d_altitude: f64) {
        self.azimuth = wrap_azimuth(self.azimuth + d_azimuth);
        self.altitude = (self.altitude + d_altitude).clamp(-MAX_ALTITUDE, MAX_ALTITUDE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn from_value_renormalizes() {
        let p = AxisPosition::from_value(3.75);
        assert_eq!(p.cell, 3);
        assert!((p.frac - 0.75).abs() < 1e-12);

        let n = AxisPosition::from_value(-0.25);
        assert_eq!(n.cell, -1);
        assert!((n.frac - 0.75).abs() < 1e-12);
    }

    #[test]
    fn offset_crosses_cell_boundaries() {
        let p = AxisPosition::new(5, 0.9).offset(0.2);
        assert_eq!(p.cell, 6);
        assert!((p.frac - 0.1).abs() < 1e-12);
        assert!((0.0..1.0).contains(&p.frac));

        let q = AxisPosition::new(5, 0.1).offset(-0.2);
        assert_eq!(q.cell, 4);
        assert!((q.frac - 0.9).abs() < 1e-12);
    }

    #[test]
    fn value_round_trips() {
        for v in [0.0, 1.5, -2.25, 12.999] {
            assert!((AxisPosition::from_value(v).value() - v).abs() < 1e-12);
        }
    }

    #[test]
    fn centered_camera_matches_grid_center() {
        let cam = Camera::centered_in(GridDims::default());
        assert_eq!(cam.cell(), (12, 8, 20));
        assert_eq!(cam.position(), DVec3::new(12.0, 8.0, 20.0));
        assert_eq!(cam.azimuth, 0.0);
        assert_eq!(cam.altitude, 0.0);
    }

    #[test]
    fn azimuth_wraps_at_pi() {
        let mut cam = Camera::centered_in(GridDims::default());
        cam.rotate(PI + 0.1, 0.0);
        assert!(cam.azimuth > -PI && cam.azimuth <= PI);
        assert!((cam.azimuth - (-PI + 0.1)).abs() < 1e-12);
    }

    #[test]
    fn altitude_clamps_below_vertical() {
        let mut cam = Camera::centered_in(GridDims::default());
        for _ in 0..100 {
            cam.rotate(0.0, 0.1);
        }
        assert_eq!(cam.altitude, MAX_ALTITUDE);
        for _ in 0..200 {
            cam.rotate(0.0, -0.1);
        }
        assert_eq!(cam.altitude, -MAX_ALTITUDE);
    }
}
