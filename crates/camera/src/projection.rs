use crate::camera::Camera;
use glam::DVec3;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use voxelspace_common::RenderSettings;

/// Wrap an angle into (-pi, pi].
pub fn wrap_azimuth(mut angle: f64) -> f64 {
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Convert view angles to a unit direction in world axes.
///
/// Azimuth must already be wrapped into (-pi, pi] and altitude reflected
/// into [-pi/2, pi/2]. The azimuth is folded into the first quadrant before
/// taking sin/cos, then the horizontal components are sign-corrected per the
/// azimuth's quadrant. At zero angles the result is exactly (0, 0, 1).
pub fn spherical_to_direction(azimuth: f64, altitude: f64) -> DVec3 {
    let (theta, sign_x, sign_z) = if azimuth >= 0.0 {
        if azimuth <= FRAC_PI_2 {
            (azimuth, 1.0, 1.0)
        } else {
            (PI - azimuth, 1.0, -1.0)
        }
    } else if azimuth >= -FRAC_PI_2 {
        (-azimuth, -1.0, 1.0)
    } else {
        (PI + azimuth, -1.0, -1.0)
    };

    let horizontal = altitude.cos();
    DVec3::new(
        sign_x * horizontal * theta.sin(),
        altitude.sin(),
        sign_z * horizontal * theta.cos(),
    )
}

/// Per-pixel ray direction derivation for a fixed output size and field of
/// view.
///
/// The terms that depend only on the pixel column are precomputed once: the
/// column's azimuth offset from the view axis and its distance to the image
/// plane. This changes no observable output, only the per-frame trig count.
#[derive(Debug, Clone)]
pub struct Projection {
    focal: f64,
    half_width: i32,
    half_height: i32,
    /// atan2(i, focal) per column offset i, indexed by i + half_width.
    azi_offset: Vec<f64>,
    /// hypot(i, focal) per column offset i, indexed by i + half_width.
    plane_dist: Vec<f64>,
}

impl Projection {
    pub fn new(settings: &RenderSettings) -> Self {
        let focal = settings.focal_length();
        let width = settings.width as i32;
        let half_width = width / 2;
        let half_height = (settings.height / 2) as i32;

        let mut azi_offset = Vec::with_capacity(settings.width as usize);
        let mut plane_dist = Vec::with_capacity(settings.width as usize);
        for i in -half_width..(width - half_width) {
            let i = i as f64;
            azi_offset.push(i.atan2(focal));
            plane_dist.push(i.hypot(focal));
        }

        tracing::debug!(focal, half_width, half_height, "built projection tables");

        Self {
            focal,
            half_width,
            half_height,
            azi_offset,
            plane_dist,
        }
    }

    /// Image-plane distance implied by the field of view.
    pub fn focal(&self) -> f64 {
        self.focal
    }

    pub fn half_width(&self) -> i32 {
        self.half_width
    }

    pub fn half_height(&self) -> i32 {
        self.half_height
    }

    /// Unit ray direction for the pixel at signed offset (i, j) from screen
    /// center, j increasing upward. Column offsets run from -half_width up
    /// to width - half_width exclusive, so an odd width puts its extra
    /// column on the positive side; rows behave the same way.
    ///
    /// The pixel is treated as the point (i, j, focal) on the image plane.
    /// Its azimuth offset is atan2(i, focal); its altitude offset is the
    /// angle the vertical offset j subtends against the in-plane distance
    /// hypot(i, focal). Adding the camera angles tilts the plane with the
    /// camera. If the combined altitude overshoots a pole the ray is
    /// reflected through it: altitude mirrors and azimuth flips by pi, so a
    /// ray passing the zenith comes down the far side instead of snapping.
    pub fn ray_direction(&self, camera: &Camera, i: i32, j: i32) -> DVec3 {
        let col = (i + self.half_width) as usize;
        let mut azi = wrap_azimuth(camera.azimuth + self.azi_offset[col]);
        let mut alt = camera.altitude + (j as f64).atan2(self.plane_dist[col]);

        if alt > FRAC_PI_2 {
            alt = PI - alt;
            azi = wrap_azimuth(azi + PI);
        } else if alt < -FRAC_PI_2 {
            alt = -PI - alt;
            azi = wrap_azimuth(azi + PI);
        }

        spherical_to_direction(azi, alt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelspace_common::GridDims;

    fn test_projection() -> Projection {
        Projection::new(&RenderSettings::default())
    }

    fn level_camera() -> Camera {
        Camera::centered_in(GridDims::default())
    }

    #[test]
    fn center_pixel_is_exactly_forward() {
        let proj = test_projection();
        let dir = proj.ray_direction(&level_camera(), 0, 0);
        assert_eq!(dir, DVec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn directions_are_unit_length() {
        let proj = test_projection();
        let mut cam = level_camera();
        for (azimuth, altitude) in [
            (0.0, 0.0),
            (1.0, 0.5),
            (-2.5, -1.0),
            (PI, 1.3),
            (-PI + 1e-6, -1.3),
            (FRAC_PI_2, 0.0),
            (-FRAC_PI_2, 0.0),
        ] {
            cam.azimuth = azimuth;
            cam.altitude = altitude;
            for (i, j) in [(0, 0), (-400, -300), (399, 299), (123, -17)] {
                let dir = proj.ray_direction(&cam, i, j);
                assert!(
                    (dir.length() - 1.0).abs() < 1e-9,
                    "non-unit direction {dir:?} at azi={azimuth} alt={altitude} pixel=({i},{j})"
                );
            }
        }
    }

    #[test]
    fn spherical_axes_have_exact_signs() {
        assert_eq!(spherical_to_direction(0.0, 0.0), DVec3::new(0.0, 0.0, 1.0));
        // theta folds to exactly zero for the forward and backward axes, so
        // those come out exact; east/west carry cos(pi/2) residue.
        let back = spherical_to_direction(PI, 0.0);
        assert_eq!(back, DVec3::new(0.0, 0.0, -1.0));
        let east = spherical_to_direction(FRAC_PI_2, 0.0);
        assert!((east - DVec3::new(1.0, 0.0, 0.0)).length() < 1e-15);
        let west = spherical_to_direction(-FRAC_PI_2, 0.0);
        assert!((west - DVec3::new(-1.0, 0.0, 0.0)).length() < 1e-15);
    }

    #[test]
    fn diagonal_quadrant_signs() {
        let frac_pi_4 = PI / 4.0;
        let ne = spherical_to_direction(frac_pi_4, 0.0);
        assert!(ne.x > 0.0 && ne.z > 0.0);
        let se = spherical_to_direction(PI - frac_pi_4, 0.0);
        assert!(se.x > 0.0 && se.z < 0.0);
        let nw = spherical_to_direction(-frac_pi_4, 0.0);
        assert!(nw.x < 0.0 && nw.z > 0.0);
        let sw = spherical_to_direction(-PI + frac_pi_4, 0.0);
        assert!(sw.x < 0.0 && sw.z < 0.0);
    }

    #[test]
    fn azimuth_wrap_is_continuous() {
        let a = spherical_to_direction(PI, 0.25);
        let b = spherical_to_direction(wrap_azimuth(-PI + 1e-9), 0.25);
        assert!((a - b).length() < 1e-8);
    }

    #[test]
    fn near_vertical_degenerates_to_vertical() {
        let up = spherical_to_direction(1.234, FRAC_PI_2);
        assert!(up.y > 1.0 - 1e-12);
        assert!(up.x.abs() < 1e-9 && up.z.abs() < 1e-9);
        let down = spherical_to_direction(-2.8, -FRAC_PI_2);
        assert!(down.y < -1.0 + 1e-12);
    }

    #[test]
    fn overshooting_the_zenith_reflects() {
        let proj = test_projection();
        let mut cam = level_camera();
        cam.altitude = crate::camera::MAX_ALTITUDE;
        // Top rows of the screen look past the zenith; the ray must come
        // down facing backwards, not produce altitude > pi/2.
        let dir = proj.ray_direction(&cam, 0, proj.half_height() - 1);
        assert!((dir.length() - 1.0).abs() < 1e-9);
        assert!(dir.z < 0.0, "reflected ray should face -z, got {dir:?}");
        assert!(dir.y > 0.0);
    }

    #[test]
    fn column_precompute_matches_direct_trig() {
        let proj = test_projection();
        let cam = level_camera();
        let focal = proj.focal();
        for (i, j) in [(-400, 0), (-1, 5), (250, -300)] {
            let azi = wrap_azimuth(cam.azimuth + (i as f64).atan2(focal));
            let alt = cam.altitude + (j as f64).atan2((i as f64).hypot(focal));
            let expected = spherical_to_direction(azi, alt);
            let got = proj.ray_direction(&cam, i, j);
            assert!((expected - got).length() < 1e-15);
        }
    }

    #[test]
    fn odd_width_tables_cover_the_last_column() {
        let settings = RenderSettings {
            width: 63,
            height: 47,
            ..RenderSettings::default()
        };
        let proj = Projection::new(&settings);
        // half_width = 31, columns run -31..=31.
        let dir = proj.ray_direction(&level_camera(), 31, 23);
        assert!((dir.length() - 1.0).abs() < 1e-9);
        assert!(dir.x > 0.0);
    }

    #[test]
    fn wrap_azimuth_range() {
        assert_eq!(wrap_azimuth(PI), PI);
        assert!((wrap_azimuth(-PI) - PI).abs() < 1e-12);
        assert!((wrap_azimuth(PI + 0.5) - (-PI + 0.5)).abs() < 1e-12);
        assert!((wrap_azimuth(-2.5 * PI) - (-PI / 2.0)).abs() < 1e-12);
    }
}
