use glam::DVec3;
use voxelspace_common::Voxel;
use voxelspace_world::{GridError, VoxelGrid};

/// Errors from marching a single ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TraceError {
    /// The sample point left the grid before hitting anything. With a sealed
    /// world this is an invariant violation, surfaced instead of indexing
    /// out of range.
    #[error("ray escaped the grid at step {step}: {source}")]
    EscapedGrid { step: u32, source: GridError },
}

/// First non-empty voxel found along a ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayHit {
    pub color: Voxel,
    /// Step index at which the voxel was found; the hit distance in world
    /// units, since steps are unit-length.
    pub steps: u32,
}

/// March a ray through the grid and return the first non-empty voxel, or
/// `None` when `max_distance` steps pass without one.
///
/// Fixed-step sampling: the sample point is `origin + dir * step` for step =
/// 1..=max_distance, rounded to the nearest integer cell, then looked up.
/// Steps are unit increments along the normalized direction, not cell
/// boundary crossings; walls one voxel thick cannot be skipped because cells
/// are exactly one world unit across.
pub fn march(
    grid: &VoxelGrid,
    origin: DVec3,
    dir: DVec3,
    max_distance: u32,
) -> Result<Option<RayHit>, TraceError> {
    for step in 1..=max_distance {
        let p = origin + dir * step as f64;
        let (x, y, z) = (
            p.x.round() as i32,
            p.y.round() as i32,
            p.z.round() as i32,
        );
        let voxel = grid
            .voxel(x, y, z)
            .map_err(|source| TraceError::EscapedGrid { step, source })?;
        if !voxel.is_empty() {
            return Ok(Some(RayHit {
                color: voxel,
                steps: step,
            }));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelspace_common::{voxel::face_colors, GridDims};

    #[test]
    fn straight_ray_hits_the_far_wall() {
        let dims = GridDims::default();
        let grid = VoxelGrid::sealed_box(dims);
        let (cx, cy, cz) = dims.center();
        let origin = DVec3::new(cx as f64, cy as f64, cz as f64);

        // +x from the center: the green wall sits at x = 24, twelve units out.
        let hit = march(&grid, origin, DVec3::new(1.0, 0.0, 0.0), 100)
            .unwrap()
            .expect("sealed box must stop the ray");
        assert_eq!(hit.color, face_colors::POS_X);
        assert_eq!(hit.steps, (dims.width as i32 - 1 - cx) as u32);
    }

    #[test]
    fn each_axis_reaches_its_own_face() {
        let dims = GridDims::default();
        let grid = VoxelGrid::sealed_box(dims);
        let origin = DVec3::new(12.0, 8.0, 20.0);
        let cases = [
            (DVec3::new(-1.0, 0.0, 0.0), face_colors::NEG_X, 12),
            (DVec3::new(1.0, 0.0, 0.0), face_colors::POS_X, 12),
            (DVec3::new(0.0, -1.0, 0.0), face_colors::NEG_Y, 8),
            (DVec3::new(0.0, 1.0, 0.0), face_colors::POS_Y, 7),
            (DVec3::new(0.0, 0.0, -1.0), face_colors::NEG_Z, 20),
            (DVec3::new(0.0, 0.0, 1.0), face_colors::POS_Z, 19),
        ];
        for (dir, color, steps) in cases {
            let hit = march(&grid, origin, dir, 100).unwrap().unwrap();
            assert_eq!(hit.color, color, "wrong color along {dir:?}");
            assert_eq!(hit.steps, steps, "wrong distance along {dir:?}");
        }
    }

    #[test]
    fn empty_interior_exhausts_to_no_hit() {
        // A long open corridor with no shell: the ray must run out of budget
        // and report no hit, never crash.
        let grid = VoxelGrid::empty(GridDims::new(4, 4, 256));
        let origin = DVec3::new(2.0, 2.0, 2.0);
        let result = march(&grid, origin, DVec3::new(0.0, 0.0, 1.0), 100).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn escaping_the_grid_is_an_error_not_ub() {
        let grid = VoxelGrid::empty(GridDims::new(4, 4, 4));
        let origin = DVec3::new(2.0, 2.0, 2.0);
        let err = march(&grid, origin, DVec3::new(0.0, 0.0, 1.0), 100).unwrap_err();
        assert!(matches!(err, TraceError::EscapedGrid { step: 2, .. }));
    }

    #[test]
    fn fractional_origin_rounds_to_nearest_cell() {
        let mut grid = VoxelGrid::empty(GridDims::new(8, 8, 8));
        grid.set(4, 4, 6, Voxel(0xABCD00FF)).unwrap();
        // Origin at z = 4.6: the first sample lands at z = 5.6, rounding to 6.
        let origin = DVec3::new(4.0, 4.0, 4.6);
        let hit = march(&grid, origin, DVec3::new(0.0, 0.0, 1.0), 10)
            .unwrap()
            .unwrap();
        assert_eq!(hit.steps, 1);
        assert_eq!(hit.color, Voxel(0xABCD00FF));
    }

    #[test]
    fn diagonal_ray_cannot_skip_the_shell() {
        let dims = GridDims::default();
        let grid = VoxelGrid::sealed_box(dims);
        let origin = DVec3::new(12.0, 8.0, 20.0);
        let dir = DVec3::new(1.0, 0.3, -0.8).normalize();
        let hit = march(&grid, origin, dir, 100).unwrap();
        assert!(hit.is_some(), "sealed box let a diagonal ray through");
    }
}
