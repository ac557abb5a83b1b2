//! Runtime configuration for the demo binaries, JSON-deserialized.

use crate::error::DemError;
use crate::grid::Coordinate;
use crate::pipeline::SegmentationParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional output artifacts of a demo run.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// Destination for the JSON run report (components + counters).
    pub report_out: Option<PathBuf>,
    /// Destination for the grid snapshot JSON.
    pub snapshot_out: Option<PathBuf>,
}

/// Grid geometry plus segmentation parameters.
#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub minimum: Vec<f64>,
    pub maximum: Vec<f64>,
    pub resolution: Vec<f64>,
    #[serde(default)]
    pub segmentation: SegmentationParams,
    #[serde(default)]
    pub output: OutputConfig,
}

impl RuntimeConfig {
    /// Grid bounds as fixed-size coordinates, validating the dimension count.
    pub fn bounds<const M: usize>(
        &self,
    ) -> Result<(Coordinate<M>, Coordinate<M>, Coordinate<M>), DemError> {
        if self.minimum.len() != M || self.maximum.len() != M || self.resolution.len() != M {
            return Err(DemError::InvalidArgument {
                name: "config dimension count",
                value: self.minimum.len() as f64,
            });
        }
        Ok((
            Coordinate::<M>::from_iterator(self.minimum.iter().copied()),
            Coordinate::<M>::from_iterator(self.maximum.iter().copied()),
            Coordinate::<M>::from_iterator(self.resolution.iter().copied()),
        ))
    }
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: RuntimeConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
