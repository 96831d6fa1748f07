use std::collections::BTreeMap;
use voxelspace_common::Voxel;
use voxelspace_render::PixelBuffer;

/// Frame inspector for developer tooling.
///
/// Provides read-only queries against a rendered pixel buffer for debugging
/// and the CLI render report.
pub struct FrameInspector;

impl FrameInspector {
    /// Summarize a frame: how many pixels hit a voxel vs fell through to the
    /// sky color, and how many distinct colors appear.
    pub fn summary(buffer: &PixelBuffer, sky: Voxel) -> FrameSummary {
        let histogram = Self::color_histogram(buffer);
        let sky_pixels = histogram.get(&sky).copied().unwrap_or(0);
        let total = (buffer.width() * buffer.height()) as usize;
        FrameSummary {
            width: buffer.width(),
            height: buffer.height(),
            sky_pixels,
            hit_pixels: total - sky_pixels,
            distinct_colors: histogram.len(),
        }
    }

    /// Count pixels per color, in color order.
    pub fn color_histogram(buffer: &PixelBuffer) -> BTreeMap<Voxel, usize> {
        let mut histogram = BTreeMap::new();
        for y in 0..buffer.height() {
            for x in 0..buffer.width() {
                if let Some(color) = buffer.get(x, y) {
                    *histogram.entry(color).or_insert(0) += 1;
                }
            }
        }
        histogram
    }
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSummary {
    pub width: u32,
    pub height: u32,
    pub sky_pixels: usize,
    pub hit_pixels: usize,
    pub distinct_colors: usize,
}

impl std::fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Frame: {}x{} hits={} sky={} colors={}",
            self.width, self.height, self.hit_pixels, self.sky_pixels, self.distinct_colors
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxelspace_camera::Camera;
    use voxelspace_common::{voxel::face_colors, GridDims, RenderSettings};
    use voxelspace_render::{Raycaster, Renderer};
    use voxelspace_world::VoxelGrid;

    #[test]
    fn histogram_counts_every_pixel() {
        let mut buffer = PixelBuffer::new(3, 2);
        buffer.fill(face_colors::SKY);
        buffer.set(0, 0, face_colors::NEG_X);
        buffer.set(1, 0, face_colors::NEG_X);

        let histogram = FrameInspector::color_histogram(&buffer);
        assert_eq!(histogram[&face_colors::NEG_X], 2);
        assert_eq!(histogram[&face_colors::SKY], 4);
        assert_eq!(histogram.values().sum::<usize>(), 6);
    }

    #[test]
    fn summary_splits_sky_from_hits() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.fill(face_colors::SKY);
        buffer.set(2, 2, face_colors::POS_Z);

        let summary = FrameInspector::summary(&buffer, face_colors::SKY);
        assert_eq!(summary.sky_pixels, 15);
        assert_eq!(summary.hit_pixels, 1);
        assert_eq!(summary.distinct_colors, 2);
    }

    #[test]
    fn sealed_box_frame_has_no_sky() {
        let dims = GridDims::default();
        let grid = VoxelGrid::sealed_box(dims);
        let camera = Camera::centered_in(dims);
        let settings = RenderSettings {
            width: 64,
            height: 48,
            ..RenderSettings::default()
        };
        let raycaster = Raycaster::new(settings);
        let mut buffer = raycaster.make_buffer();
        raycaster.render(&grid, &camera, &mut buffer).unwrap();

        let summary = FrameInspector::summary(&buffer, settings.sky);
        assert_eq!(summary.sky_pixels, 0);
        assert_eq!(summary.hit_pixels, 64 * 48);
        assert!(summary.distinct_colors >= 2);
    }

    #[test]
    fn summary_displays_compactly() {
        let buffer = PixelBuffer::new(2, 2);
        let text = FrameInspector::summary(&buffer, face_colors::SKY).to_string();
        assert!(text.contains("2x2"));
        assert!(text.contains("sky=0"));
    }
}
