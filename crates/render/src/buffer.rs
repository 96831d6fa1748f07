use voxelspace_common::Voxel;

/// A 2-D array of RGBA pixels, one per screen pixel.
///
/// Row-major with row 0 at the **bottom** edge of the screen; the blit
/// backend draws it with the same orientation. The renderer overwrites every
/// pixel each frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Voxel>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Voxel::EMPTY; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Voxel> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Write one pixel. Out-of-range writes are a caller bug.
    pub fn set(&mut self, x: u32, y: u32, color: Voxel) {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[(y * self.width + x) as usize] = color;
    }

    pub fn fill(&mut self, color: Voxel) {
        self.pixels.fill(color);
    }

    /// Flatten to 4 bytes per pixel in RGBA channel order, rows in storage
    /// order (bottom row first). This is the exact layout the blit backend
    /// uploads.
    pub fn as_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.rgba8());
        }
        bytes
    }
}
