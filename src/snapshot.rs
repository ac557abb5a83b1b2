//! Persisted grid representation and JSON file helpers.
//!
//! A [`GridSnapshot`] stores the grid geometry plus the per-cell sufficient
//! statistics (count, sum, sum of squares) in row-major linear order, which
//! is everything needed to reproduce identical `estimate()` results after a
//! round trip. Each persisted type owns its own serde derive; there is no
//! shared serialization base.

use crate::cell::{Cell, Dem};
use crate::error::DemError;
use crate::grid::Coordinate;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Sufficient statistics of one cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellStats {
    pub count: u64,
    pub sum: f64,
    pub sum_sq: f64,
}

/// Persisted form of a [`Dem`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub minimum: Vec<f64>,
    pub maximum: Vec<f64>,
    pub resolution: Vec<f64>,
    pub num_cells: Vec<usize>,
    /// Row-major linear order, one entry per grid cell.
    pub cells: Vec<CellStats>,
}

impl<const M: usize> Dem<M> {
    /// Captures geometry and per-cell statistics.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            minimum: self.minimum().iter().copied().collect(),
            maximum: self.maximum().iter().copied().collect(),
            resolution: self.resolution().iter().copied().collect(),
            num_cells: self.num_cells().to_vec(),
            cells: self
                .cells()
                .iter()
                .map(|cell| {
                    let (count, sum, sum_sq) = cell.parts();
                    CellStats {
                        count: count as u64,
                        sum,
                        sum_sq,
                    }
                })
                .collect(),
        }
    }

    /// Rebuilds a DEM from a snapshot.
    ///
    /// The snapshot's dimension count and cell array length must match the
    /// geometry; mismatches fail with [`DemError::InvalidArgument`] naming
    /// the offending field.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self, DemError> {
        if snapshot.minimum.len() != M
            || snapshot.maximum.len() != M
            || snapshot.resolution.len() != M
            || snapshot.num_cells.len() != M
        {
            return Err(DemError::InvalidArgument {
                name: "snapshot dimension count",
                value: snapshot.minimum.len() as f64,
            });
        }
        let minimum = Coordinate::<M>::from_iterator(snapshot.minimum.iter().copied());
        let maximum = Coordinate::<M>::from_iterator(snapshot.maximum.iter().copied());
        let resolution = Coordinate::<M>::from_iterator(snapshot.resolution.iter().copied());
        let mut dem = Self::new(minimum, maximum, resolution)?;
        if snapshot.num_cells[..] != dem.num_cells()[..] {
            return Err(DemError::InvalidArgument {
                name: "snapshot num_cells",
                value: snapshot.num_cells.iter().product::<usize>() as f64,
            });
        }
        if snapshot.cells.len() != dem.total_cells() {
            return Err(DemError::InvalidArgument {
                name: "snapshot cell count",
                value: snapshot.cells.len() as f64,
            });
        }
        for (cell, stats) in dem.cells_mut().iter_mut().zip(&snapshot.cells) {
            *cell = Cell::from_parts(stats.count as usize, stats.sum, stats.sum_sq);
        }
        Ok(dem)
    }
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

/// Read and deserialize a JSON file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse JSON {}: {e}", path.display()))
}

/// Write a snapshot to a JSON file.
pub fn write_snapshot_json(path: &Path, snapshot: &GridSnapshot) -> Result<(), String> {
    write_json_file(path, snapshot)
}

/// Read a snapshot from a JSON file.
pub fn read_snapshot_json(path: &Path) -> Result<GridSnapshot, String> {
    read_json_file(path)
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    fn sampled_dem() -> Dem<2> {
        let mut dem = Dem::<2>::new(
            Vector2::new(-1.0, -1.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(0.5, 0.5),
        )
        .expect("valid bounds");
        dem.add_sample(&Vector2::new(-0.75, -0.75), 1.0).expect("in range");
        dem.add_sample(&Vector2::new(-0.75, -0.75), 2.0).expect("in range");
        dem.add_sample(&Vector2::new(0.25, 0.25), -3.5).expect("in range");
        dem
    }

    #[test]
    fn round_trip_reproduces_every_estimate() {
        let dem = sampled_dem();
        let snapshot = dem.snapshot();
        let restored = Dem::<2>::from_snapshot(&snapshot).expect("consistent snapshot");

        assert_eq!(restored.num_cells(), dem.num_cells());
        assert_eq!(restored.total_cells(), dem.total_cells());
        for (a, b) in dem.cells().iter().zip(restored.cells()) {
            assert_eq!(a.estimate(), b.estimate());
            assert_eq!(a.sample_count(), b.sample_count());
        }
    }

    #[test]
    fn json_round_trip_preserves_the_snapshot() {
        let snapshot = sampled_dem().snapshot();
        let json = serde_json::to_string(&snapshot).expect("serializable");
        let back: GridSnapshot = serde_json::from_str(&json).expect("parsable");
        assert_eq!(back, snapshot);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let snapshot = sampled_dem().snapshot();
        let err = Dem::<3>::from_snapshot(&snapshot).expect_err("2-D snapshot, 3-D grid");
        assert!(matches!(
            err,
            DemError::InvalidArgument {
                name: "snapshot dimension count",
                ..
            }
        ));
    }

    #[test]
    fn truncated_cell_array_is_rejected() {
        let mut snapshot = sampled_dem().snapshot();
        snapshot.cells.pop();
        let err = Dem::<2>::from_snapshot(&snapshot).expect_err("cell array too short");
        assert!(matches!(
            err,
            DemError::InvalidArgument {
                name: "snapshot cell count",
                ..
            }
        ));
    }
}
