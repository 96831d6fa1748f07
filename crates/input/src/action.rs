use voxelspace_camera::Camera;
use voxelspace_world::VoxelGrid;

/// A camera control action produced by the windowing layer once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Turn the view by angle deltas (radians).
    Rotate { d_azimuth: f64, d_altitude: f64 },
    /// Shift the camera by world-axis deltas, subject to collision.
    Move { dx: f64, dy: f64, dz: f64 },
    /// No-op (unbound input).
    Noop,
}

/// Apply one action to the camera. Returns whether the camera changed.
///
/// Rotation always applies (wrap and clamp live in the camera). Movement is
/// atomic: the destination cell after renormalizing all three axes must be
/// empty, or the whole move is discarded — there is no per-axis sliding.
pub fn apply_action(camera: &mut Camera, grid: &VoxelGrid, action: Action) -> bool {
    match action {
        Action::Rotate {
            d_azimuth,
            d_altitude,
        } => {
            let before = (camera.azimuth, camera.altitude);
            camera.rotate(d_azimuth, d_altitude);
            (camera.azimuth, camera.altitude) != before
        }
        Action::Move { dx, dy, dz } => {
            let x = camera.x.offset(dx);
            let y = camera.y.offset(dy);
            let z = camera.z.offset(dz);
            if grid.is_empty(x.cell, y.cell, z.cell) {
                camera.x = x;
                camera.y = y;
                camera.z = z;
                true
            } else {
                tracing::trace!(
                    cell = ?(x.cell, y.cell, z.cell),
                    "move blocked by occupied voxel"
                );
                false
            }
        }
        Action::Noop => false,
    }
}

/// Convert camera-relative motion into world-axis deltas.
///
/// `forward` moves along the view azimuth in the horizontal plane, `strafe`
/// to its right. Altitude does not bend ground movement.
pub fn walk_deltas(azimuth: f64, forward: f64, strafe: f64) -> (f64, f64) {
    let (sin_a, cos_a) = azimuth.sin_cos();
    let dx = forward * sin_a + strafe * cos_a;
    let dz = forward * cos_a - strafe * sin_a;
    (dx, dz)
}
