use voxelspace_common::voxel::face_colors;
use voxelspace_common::{GridDims, Voxel};

/// Errors from voxel grid access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("voxel lookup ({x}, {y}, {z}) outside {width}x{height}x{depth} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        z: i32,
        width: usize,
        height: usize,
        depth: usize,
    },
}

/// A fixed-size 3-D array of voxels indexed by integer (x, y, z).
///
/// Storage order is `[x][y][z]` row-major. The ordering is part of the
/// contract: face colors are tied to axis identity, so flattening must not
/// permute axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    dims: GridDims,
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    /// Create a grid with every voxel empty.
    pub fn empty(dims: GridDims) -> Self {
        Self {
            dims,
            voxels: vec![Voxel::EMPTY; dims.volume()],
        }
    }

    /// Create a grid whose six bounding faces are solid walls of distinct
    /// colors and whose interior is empty.
    ///
    /// Face precedence at edges and corners is x, then z, then y, matching
    /// the assignment order the colors were defined for. The resulting box is
    /// closed: every boundary voxel is non-empty.
    pub fn sealed_box(dims: GridDims) -> Self {
        // The x/y/z loop order matches the flat storage order.
        let mut voxels = Vec::with_capacity(dims.volume());
        for x in 0..dims.width {
            for y in 0..dims.height {
                for z in 0..dims.depth {
                    let color = if x == 0 {
                        face_colors::NEG_X
                    } else if x == dims.width - 1 {
                        face_colors::POS_X
                    } else if z == 0 {
                        face_colors::NEG_Z
                    } else if z == dims.depth - 1 {
                        face_colors::POS_Z
                    } else if y == 0 {
                        face_colors::NEG_Y
                    } else if y == dims.height - 1 {
                        face_colors::POS_Y
                    } else {
                        Voxel::EMPTY
                    };
                    voxels.push(color);
                }
            }
        }
        tracing::debug!(
            width = dims.width,
            height = dims.height,
            depth = dims.depth,
            "generated sealed box world"
        );
        Self { dims, voxels }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if self.dims.contains(x, y, z) {
            Some(
                (x as usize * self.dims.height + y as usize) * self.dims.depth + z as usize,
            )
        } else {
            None
        }
    }

    /// Bounds-checked lookup.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        self.index(x, y, z).map(|i| self.voxels[i])
    }

    /// Lookup where going out of range is an invariant violation worth
    /// surfacing, not a silent miss. Ray marching uses this.
    pub fn voxel(&self, x: i32, y: i32, z: i32) -> Result<Voxel, GridError> {
        self.get(x, y, z).ok_or(GridError::OutOfBounds {
            x,
            y,
            z,
            width: self.dims.width,
            height: self.dims.height,
            depth: self.dims.depth,
        })
    }

    /// Collision query for camera movement. Out-of-range cells count as
    /// occupied so movement can never leave the grid.
    pub fn is_empty(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z).is_some_and(|v| v.is_empty())
    }

    /// Write a voxel. Used by generation and test fixtures; the renderer
    /// never mutates the grid.
    pub fn set(&mut self, x: i32, y: i32, z: i32, voxel: Voxel) -> Result<(), GridError> {
        match self.index(x, y, z) {
            Some(i) => {
                self.voxels[i] = voxel;
                Ok(())
            }
            None => Err(GridError::OutOfBounds {
                x,
                y,
                z,
                width: self.dims.width,
                height: self.dims.height,
                depth: self.dims.depth,
            }),
        }
    }

    /// Verify the closed-shell invariant: every voxel on the outer boundary
    /// is non-empty.
    pub fn is_sealed(&self) -> bool {
        let (w, h, d) = (
            self.dims.width as i32,
            self.dims.height as i32,
            self.dims.depth as i32,
        );
        for x in 0..w {
            for y in 0..h {
                for z in 0..d {
                    let on_shell =
                        x == 0 || x == w - 1 || y == 0 || y == h - 1 || z == 0 || z == d - 1;
                    if on_shell && self.is_empty(x, y, z) {
                        return false;
                    }
                }
            }
        }
        true
    }
}
