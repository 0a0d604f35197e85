//! Vector-field volumes.
//!
//! A volume is a dense `nx × ny × nz` grid of 3-component vectors, usually one
//! magnetization snapshot from a simulation run. The visualizer only ever reads
//! volumes; a new frame is shown by binding a different volume, never by
//! mutating the bound one.
//!
//! ```ignore
//! let grid = VectorGrid::from_fn(GridShape::new(16, 16, 4), |i, j, _k| {
//!     Vec3::new(i as f32 - 8.0, j as f32 - 8.0, 1.0)
//! })?;
//! visualizer.bind(Arc::new(grid));
//! ```

use glam::Vec3;

use crate::error::VolumeError;

/// Grid dimensions along x, y and z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl GridShape {
    pub const fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// True if any dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0 || self.nz == 0
    }

    /// Dimensions as floats, in axis order.
    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.nx as f32, self.ny as f32, self.nz as f32)
    }
}

impl From<(usize, usize, usize)> for GridShape {
    fn from((nx, ny, nz): (usize, usize, usize)) -> Self {
        Self::new(nx, ny, nz)
    }
}

/// Read-only access to a 3D grid of vectors.
///
/// Implementations must return the same shape and contents for as long as the
/// volume is bound. `at` is only called with in-range indices.
pub trait GridVolume: Send + Sync {
    /// Grid dimensions.
    fn shape(&self) -> GridShape;

    /// Vector stored at cell `(i, j, k)`.
    fn at(&self, i: usize, j: usize, k: usize) -> Vec3;
}

/// Owned, densely stored vector grid.
///
/// Cells are laid out with `k` varying fastest, matching the usual
/// `[x][y][z][component]` layout of simulation output.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorGrid {
    shape: GridShape,
    cells: Vec<Vec3>,
}

impl VectorGrid {
    /// Wrap existing cell data. Fails if the shape is empty or the data length
    /// does not equal `nx * ny * nz`.
    pub fn new(shape: GridShape, cells: Vec<Vec3>) -> Result<Self, VolumeError> {
        check_shape(shape)?;
        if cells.len() != shape.cell_count() {
            return Err(VolumeError::LengthMismatch {
                expected: shape.cell_count(),
                actual: cells.len(),
            });
        }
        Ok(Self { shape, cells })
    }

    /// Build a grid from interleaved `x, y, z` components.
    pub fn from_components(shape: GridShape, components: &[f32]) -> Result<Self, VolumeError> {
        check_shape(shape)?;
        if components.len() != shape.cell_count() * 3 {
            return Err(VolumeError::LengthMismatch {
                expected: shape.cell_count() * 3,
                actual: components.len(),
            });
        }
        let triples: &[[f32; 3]] = bytemuck::cast_slice(components);
        let cells = triples.iter().map(|c| Vec3::from_array(*c)).collect();
        Ok(Self { shape, cells })
    }

    /// Build a grid by evaluating `f` at every cell.
    pub fn from_fn<F>(shape: GridShape, mut f: F) -> Result<Self, VolumeError>
    where
        F: FnMut(usize, usize, usize) -> Vec3,
    {
        check_shape(shape)?;
        let mut cells = Vec::with_capacity(shape.cell_count());
        for i in 0..shape.nx {
            for j in 0..shape.ny {
                for k in 0..shape.nz {
                    cells.push(f(i, j, k));
                }
            }
        }
        Ok(Self { shape, cells })
    }

    /// Grid filled with a single vector.
    pub fn uniform(shape: GridShape, value: Vec3) -> Result<Self, VolumeError> {
        check_shape(shape)?;
        Ok(Self {
            shape,
            cells: vec![value; shape.cell_count()],
        })
    }

    /// All cells in storage order.
    pub fn cells(&self) -> &[Vec3] {
        &self.cells
    }

    /// Mutable cell access, used while a grid is being assembled.
    pub fn get_mut(&mut self, i: usize, j: usize, k: usize) -> Option<&mut Vec3> {
        if i >= self.shape.nx || j >= self.shape.ny || k >= self.shape.nz {
            return None;
        }
        let index = self.index(i, j, k);
        self.cells.get_mut(index)
    }

    #[inline]
    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.shape.ny + j) * self.shape.nz + k
    }
}

impl GridVolume for VectorGrid {
    fn shape(&self) -> GridShape {
        self.shape
    }

    #[inline]
    fn at(&self, i: usize, j: usize, k: usize) -> Vec3 {
        self.cells[self.index(i, j, k)]
    }
}

fn check_shape(shape: GridShape) -> Result<(), VolumeError> {
    if shape.is_empty() {
        return Err(VolumeError::EmptyShape {
            nx: shape.nx,
            ny: shape.ny,
            nz: shape.nz,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_layout_k_fastest() {
        let shape = GridShape::new(2, 3, 4);
        let grid = VectorGrid::from_fn(shape, |i, j, k| {
            Vec3::new(i as f32, j as f32, k as f32)
        })
        .unwrap();

        assert_eq!(grid.cells().len(), 24);
        assert_eq!(grid.cells()[1], Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(grid.cells()[4], Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(grid.at(1, 2, 3), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = VectorGrid::new(GridShape::new(2, 2, 2), vec![Vec3::ZERO; 7]).unwrap_err();
        assert_eq!(err, VolumeError::LengthMismatch { expected: 8, actual: 7 });
    }

    #[test]
    fn test_empty_shape_rejected() {
        let err = VectorGrid::uniform(GridShape::new(3, 0, 1), Vec3::X).unwrap_err();
        assert!(matches!(err, VolumeError::EmptyShape { ny: 0, .. }));
    }

    #[test]
    fn test_from_components() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let grid = VectorGrid::from_components(GridShape::new(1, 1, 2), &data).unwrap();
        assert_eq!(grid.at(0, 0, 0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(grid.at(0, 0, 1), Vec3::new(4.0, 5.0, 6.0));

        let err = VectorGrid::from_components(GridShape::new(1, 1, 2), &data[..5]).unwrap_err();
        assert_eq!(err, VolumeError::LengthMismatch { expected: 6, actual: 5 });
    }

    #[test]
    fn test_get_mut_bounds() {
        let mut grid = VectorGrid::uniform(GridShape::new(2, 2, 2), Vec3::ZERO).unwrap();
        *grid.get_mut(1, 0, 1).unwrap() = Vec3::Z;
        assert_eq!(grid.at(1, 0, 1), Vec3::Z);
        assert!(grid.get_mut(2, 0, 0).is_none());
    }
}
