//! DEM cells and the [`Dem`] alias for a height-estimating grid.

use crate::error::DemError;
use crate::estimator::{HeightEstimate, ImproperGaussian};
use crate::grid::{Coordinate, Grid};

/// A cell of a Digital Elevation Map: an improper-prior Gaussian estimator of
/// the height values observed in the cell's footprint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cell {
    height: ImproperGaussian,
}

impl Cell {
    /// Folds one height observation into the cell. Never fails.
    pub fn add_sample(&mut self, height: f64) {
        self.height.add_sample(height);
    }

    /// Number of samples the cell has received.
    pub fn sample_count(&self) -> usize {
        self.height.sample_count()
    }

    /// True once the cell has received at least one sample.
    pub fn is_occupied(&self) -> bool {
        self.height.sample_count() > 0
    }

    /// Posterior height mean, defined from the first sample on.
    pub fn mean(&self) -> Option<f64> {
        self.height.mean()
    }

    /// Posterior height variance, `None` below two samples.
    pub fn variance(&self) -> Option<f64> {
        self.height.variance()
    }

    /// Full posterior estimate; [`DemError::InsufficientSamples`] below two
    /// samples.
    pub fn estimate(&self) -> Result<HeightEstimate, DemError> {
        self.height.estimate()
    }

    pub(crate) fn from_parts(count: usize, sum: f64, sum_sq: f64) -> Self {
        Self {
            height: ImproperGaussian::from_parts(count, sum, sum_sq),
        }
    }

    pub(crate) fn parts(&self) -> (usize, f64, f64) {
        self.height.parts()
    }
}

/// Digital Elevation Map: a dense grid of height-estimating cells.
pub type Dem<const M: usize> = Grid<Cell, M>;

impl<const M: usize> Grid<Cell, M> {
    /// Routes a height sample to the cell owning `point`.
    pub fn add_sample(&mut self, point: &Coordinate<M>, height: f64) -> Result<(), DemError> {
        self.cell_at_mut(point)?.add_sample(height);
        Ok(())
    }

    /// Linear indices of cells that have received at least one sample,
    /// ascending.
    pub fn occupied_cells(&self) -> Vec<usize> {
        self.cells()
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_occupied())
            .map(|(linear, _)| linear)
            .collect()
    }
}
