use crate::buffer::PixelBuffer;
use crate::trace::{march, TraceError};
use voxelspace_camera::{Camera, Projection};
use voxelspace_common::RenderSettings;
use voxelspace_world::VoxelGrid;

/// Errors from rendering a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Trace(#[from] TraceError),
    #[error("pixel buffer is {actual_w}x{actual_h}, renderer expects {expected_w}x{expected_h}")]
    BufferSizeMismatch {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },
}

/// Renderer-agnostic interface: read the world and camera, fill the pixel
/// buffer. A renderer never mutates either input.
pub trait Renderer {
    fn render(
        &self,
        grid: &VoxelGrid,
        camera: &Camera,
        target: &mut PixelBuffer,
    ) -> Result<(), RenderError>;
}

/// CPU ray-marching renderer: one ray per pixel, first hit wins.
///
/// The whole frame is computed synchronously on the calling thread. Rays are
/// mutually independent, so this is the natural place to parallelize, but
/// correctness does not depend on it and the output must not.
pub struct Raycaster {
    settings: RenderSettings,
    projection: Projection,
}

impl Raycaster {
    pub fn new(settings: RenderSettings) -> Self {
        let projection = Projection::new(&settings);
        Self {
            settings,
            projection,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// A pixel buffer matching this renderer's output size.
    pub fn make_buffer(&self) -> PixelBuffer {
        PixelBuffer::new(self.settings.width, self.settings.height)
    }
}

impl Renderer for Raycaster {
    fn render(
        &self,
        grid: &VoxelGrid,
        camera: &Camera,
        target: &mut PixelBuffer,
    ) -> Result<(), RenderError> {
        if target.width() != self.settings.width || target.height() != self.settings.height {
            return Err(RenderError::BufferSizeMismatch {
                expected_w: self.settings.width,
                expected_h: self.settings.height,
                actual_w: target.width(),
                actual_h: target.height(),
            });
        }

        let _span = tracing::debug_span!(
            "render_frame",
            azimuth = camera.azimuth,
            altitude = camera.altitude
        )
        .entered();

        let origin = camera.position();
        let half_w = self.projection.half_width();
        let half_h = self.projection.half_height();
        let width = self.settings.width as i32;
        let height = self.settings.height as i32;
        let mut hit_count: u64 = 0;
        let mut sky_count: u64 = 0;

        // Signed offsets from screen center; an odd width or height puts
        // its extra column or row on the positive side.
        for i in -half_w..(width - half_w) {
            for j in -half_h..(height - half_h) {
                let dir = self.projection.ray_direction(camera, i, j);
                let color = match march(grid, origin, dir, self.settings.max_draw_distance)? {
                    Some(hit) => {
                        hit_count += 1;
                        hit.color
                    }
                    None => {
                        sky_count += 1;
                        self.settings.sky
                    }
                };
                // j = -half_h is the bottom row of the buffer.
                target.set((i + half_w) as u32, (j + half_h) as u32, color);
            }
        }

        tracing::debug!(hit_count, sky_count, "frame complete");
        Ok(())
    }
}
