use serde::{Deserialize, Serialize};

/// A single cell value in the world grid.
///
/// Zero means empty (rays pass through). Any other value is a packed RGBA
/// color, one byte per channel with red in the most significant byte, shown
/// when a ray first reaches the cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Voxel(pub u32);

impl Voxel {
    /// The empty cell. Rays march straight through it.
    pub const EMPTY: Voxel = Voxel(0);

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Unpack into `[r, g, b, a]` bytes.
    pub fn rgba8(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl std::fmt::Display for Voxel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "empty")
        } else {
            write!(f, "#{:08X}", self.0)
        }
    }
}

/// Colors assigned to the six faces of the enclosing world box, plus the sky
/// fallback used when a ray exhausts its draw distance.
///
/// Color identity is tied to axis identity: x separates the red and green
/// walls, z the blue and purple walls, y the white floor and black ceiling.
pub mod face_colors {
    use super::Voxel;

    /// Wall at x = 0.
    pub const NEG_X: Voxel = Voxel(0xFF0000FF);
    /// Wall at x = width - 1.
    pub const POS_X: Voxel = Voxel(0x00FF00FF);
    /// Floor at y = 0.
    pub const NEG_Y: Voxel = Voxel(0xFFFFFFFF);
    /// Ceiling at y = height - 1.
    pub const POS_Y: Voxel = Voxel(0x000000FF);
    /// Wall at z = 0.
    pub const NEG_Z: Voxel = Voxel(0x0000FFFF);
    /// Wall at z = depth - 1.
    pub const POS_Z: Voxel = Voxel(0x770077FF);
    /// Default color for rays that never hit anything.
    pub const SKY: Voxel = Voxel(0x777777FF);
}
