use crate::voxel::{face_colors, Voxel};
use serde::{Deserialize, Serialize};

/// Fixed extents of the world grid along x, y, z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl GridDims {
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn volume(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Whether an integer coordinate lies inside the grid.
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as usize) < self.width
            && (y as usize) < self.height
            && (z as usize) < self.depth
    }

    /// Integer cell at the center of the grid.
    pub fn center(&self) -> (i32, i32, i32) {
        (
            (self.width / 2) as i32,
            (self.height / 2) as i32,
            (self.depth / 2) as i32,
        )
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::new(25, 16, 40)
    }
}

/// Render configuration: output size, field of view, ray budget, sky color.
///
/// Loadable from JSON via the CLI and overridable per flag. The focal length
/// is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Horizontal field of view in radians.
    pub fov: f64,
    /// Maximum ray length in world units before falling back to sky.
    pub max_draw_distance: u32,
    /// Color for rays that exhaust the draw distance.
    pub sky: Voxel,
}

impl RenderSettings {
    /// Image-plane distance implied by the field of view and output width.
    pub fn focal_length(&self) -> f64 {
        self.width as f64 / (2.0 * (self.fov / 2.0).tan())
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov: std::f64::consts::FRAC_PI_2,
            max_draw_distance: 100,
            sky: face_colors::SKY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dims_match_the_sealed_world() {
        let dims = GridDims::default();
        assert_eq!(dims.volume(), 25 * 16 * 40);
        assert_eq!(dims.center(), (12, 8, 20));
    }

    #[test]
    fn contains_rejects_out_of_range() {
        let dims = GridDims::new(4, 4, 4);
        assert!(dims.contains(0, 0, 0));
        assert!(dims.contains(3, 3, 3));
        assert!(!dims.contains(-1, 0, 0));
        assert!(!dims.contains(0, 4, 0));
        assert!(!dims.contains(0, 0, 4));
    }

    #[test]
    fn focal_length_for_90_degree_fov() {
        // tan(fov/2) = 1, so focal = width / 2.
        let settings = RenderSettings::default();
        assert!((settings.focal_length() - 400.0).abs() < 1e-12);
    }

    #[test]
    fn settings_round_trip_json() {
        let settings = RenderSettings {
            width: 320,
            height: 240,
            ..RenderSettings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: RenderSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let back: RenderSettings = serde_json::from_str(r#"{"width": 64}"#).unwrap();
        assert_eq!(back.width, 64);
        assert_eq!(back.height, 600);
        assert_eq!(back.max_draw_distance, 100);
    }
}
