//! Dense N-dimensional grid with coordinate↔index conversion.
//!
//! [`Grid`] discretizes a box `[minimum, maximum)` at a fixed per-dimension
//! resolution into `ceil((max - min) / res)` cells per dimension, stored as
//! one flat row-major vector addressed through a precomputed stride vector.
//! The container is generic over the cell type and the dimension count, so
//! index arithmetic stays allocation-free (`[usize; M]` indices,
//! fixed-size `nalgebra` coordinate vectors).
//!
//! Coordinate binning uses the floor rule
//! `index[i] = floor((point[i] - minimum[i]) / resolution[i])`; the inverse
//! mapping returns cell centers `minimum[i] + (index[i] + 0.5) * resolution[i]`.
//! Both directions are exact inverses for every valid index.

use crate::error::DemError;
use nalgebra::SVector;

/// Continuous coordinate in grid space.
pub type Coordinate<const M: usize> = SVector<f64, M>;

/// Discrete multi-dimensional cell index.
pub type GridIndex<const M: usize> = [usize; M];

/// Dense N-dimensional grid of cells of type `C`.
#[derive(Clone, Debug)]
pub struct Grid<C, const M: usize> {
    minimum: Coordinate<M>,
    maximum: Coordinate<M>,
    resolution: Coordinate<M>,
    num_cells: GridIndex<M>,
    total_cells: usize,
    strides: GridIndex<M>,
    cells: Vec<C>,
}

impl<C: Default, const M: usize> Grid<C, M> {
    /// Constructs a grid over `[minimum, maximum)` at the given resolution.
    ///
    /// Allocates the full cell array eagerly (dense storage). Fails with
    /// [`DemError::InvalidBounds`] if any dimension has a non-positive
    /// resolution or `minimum[i] >= maximum[i]`; non-finite inputs are
    /// rejected by the same checks.
    pub fn new(
        minimum: Coordinate<M>,
        maximum: Coordinate<M>,
        resolution: Coordinate<M>,
    ) -> Result<Self, DemError> {
        let mut num_cells = [0usize; M];
        for dim in 0..M {
            if !(resolution[dim] > 0.0) || !(minimum[dim] < maximum[dim]) {
                return Err(DemError::InvalidBounds {
                    dim,
                    minimum: minimum[dim],
                    maximum: maximum[dim],
                    resolution: resolution[dim],
                });
            }
            num_cells[dim] = ((maximum[dim] - minimum[dim]) / resolution[dim]).ceil() as usize;
        }
        let total_cells = num_cells.iter().product();
        let mut strides = [1usize; M];
        for dim in 1..M {
            strides[dim] = strides[dim - 1] * num_cells[dim - 1];
        }
        let cells = (0..total_cells).map(|_| C::default()).collect();
        Ok(Self {
            minimum,
            maximum,
            resolution,
            num_cells,
            total_cells,
            strides,
            cells,
        })
    }

    /// Reinitializes every cell to its default state. Bounds, resolution and
    /// cell counts are unchanged.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = C::default();
        }
    }
}

impl<C, const M: usize> Grid<C, M> {
    /// Minimum corner of the grid extent.
    pub fn minimum(&self) -> &Coordinate<M> {
        &self.minimum
    }

    /// Maximum corner of the grid extent.
    pub fn maximum(&self) -> &Coordinate<M> {
        &self.maximum
    }

    /// Per-dimension cell edge length.
    pub fn resolution(&self) -> &Coordinate<M> {
        &self.resolution
    }

    /// Number of cells in each dimension.
    pub fn num_cells(&self) -> &GridIndex<M> {
        &self.num_cells
    }

    /// Total number of cells (product over dimensions).
    pub fn total_cells(&self) -> usize {
        self.total_cells
    }

    /// Flat row-major view of the cell storage.
    pub fn cells(&self) -> &[C] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [C] {
        &mut self.cells
    }

    /// True if every component of `point` falls inside the grid extent.
    pub fn is_in_range(&self, point: &Coordinate<M>) -> bool {
        (0..M).all(|dim| {
            let offset = ((point[dim] - self.minimum[dim]) / self.resolution[dim]).floor();
            offset >= 0.0 && offset < self.num_cells[dim] as f64
        })
    }

    /// True if every component of `index` is within the per-dimension count.
    pub fn is_valid_index(&self, index: &GridIndex<M>) -> bool {
        (0..M).all(|dim| index[dim] < self.num_cells[dim])
    }

    /// Index of the cell owning `point`, by the floor binning rule.
    pub fn index_of(&self, point: &Coordinate<M>) -> Result<GridIndex<M>, DemError> {
        let mut index = [0usize; M];
        for dim in 0..M {
            let offset = ((point[dim] - self.minimum[dim]) / self.resolution[dim]).floor();
            if !(offset >= 0.0) || offset >= self.num_cells[dim] as f64 {
                return Err(DemError::OutOfBoundCoordinate {
                    dim,
                    value: point[dim],
                });
            }
            index[dim] = offset as usize;
        }
        Ok(index)
    }

    /// Center coordinate of the cell at `index`.
    pub fn coordinate_of(&self, index: &GridIndex<M>) -> Result<Coordinate<M>, DemError> {
        self.check_index(index)?;
        let mut center = self.minimum;
        for dim in 0..M {
            center[dim] += (index[dim] as f64 + 0.5) * self.resolution[dim];
        }
        Ok(center)
    }

    /// Row-major linear index of `index`. Assumes a valid index; use
    /// [`Self::is_valid_index`] or the checked accessors otherwise.
    pub fn linear_index(&self, index: &GridIndex<M>) -> usize {
        let mut linear = 0;
        for dim in 0..M {
            linear += index[dim] * self.strides[dim];
        }
        linear
    }

    /// Inverse of [`Self::linear_index`].
    pub fn multi_index(&self, mut linear: usize) -> GridIndex<M> {
        let mut index = [0usize; M];
        for dim in (0..M).rev() {
            index[dim] = linear / self.strides[dim];
            linear %= self.strides[dim];
        }
        index
    }

    /// Cell at a multi-dimensional index.
    pub fn cell(&self, index: &GridIndex<M>) -> Result<&C, DemError> {
        self.check_index(index)?;
        Ok(&self.cells[self.linear_index(index)])
    }

    /// Mutable cell at a multi-dimensional index.
    pub fn cell_mut(&mut self, index: &GridIndex<M>) -> Result<&mut C, DemError> {
        self.check_index(index)?;
        let linear = self.linear_index(index);
        Ok(&mut self.cells[linear])
    }

    /// Cell owning `point`.
    pub fn cell_at(&self, point: &Coordinate<M>) -> Result<&C, DemError> {
        let index = self.index_of(point)?;
        Ok(&self.cells[self.linear_index(&index)])
    }

    /// Mutable cell owning `point`.
    pub fn cell_at_mut(&mut self, point: &Coordinate<M>) -> Result<&mut C, DemError> {
        let index = self.index_of(point)?;
        let linear = self.linear_index(&index);
        Ok(&mut self.cells[linear])
    }

    fn check_index(&self, index: &GridIndex<M>) -> Result<(), DemError> {
        for dim in 0..M {
            if index[dim] >= self.num_cells[dim] {
                return Err(DemError::OutOfBoundIndex {
                    dim,
                    index: index[dim],
                    limit: self.num_cells[dim],
                });
            }
        }
        Ok(())
    }
}
