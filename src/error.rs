use thiserror::Error;

/// Errors reported by the grid, estimation and segmentation core.
///
/// All conditions are detected synchronously at the point of violation and
/// returned to the immediate caller; nothing is retried or swallowed.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum DemError {
    /// Grid construction with inverted bounds or a non-positive resolution.
    #[error(
        "invalid bounds in dimension {dim}: minimum {minimum}, maximum {maximum}, \
         resolution {resolution}"
    )]
    InvalidBounds {
        dim: usize,
        minimum: f64,
        maximum: f64,
        resolution: f64,
    },

    /// A coordinate component falls outside the grid extent.
    #[error("coordinate component {value} in dimension {dim} is outside the grid extent")]
    OutOfBoundCoordinate { dim: usize, value: f64 },

    /// An index component falls outside the valid per-dimension range.
    #[error("index {index} in dimension {dim} is outside [0, {limit})")]
    OutOfBoundIndex {
        dim: usize,
        index: usize,
        limit: usize,
    },

    /// A statistical estimate was requested before enough samples exist.
    ///
    /// The variance of the height posterior is undefined below two samples;
    /// `count == 0` means the cell holds no data at all. Callers must branch
    /// on this instead of receiving a fabricated zero estimate.
    #[error("cell holds {count} sample(s), at least 2 are required for an estimate")]
    InsufficientSamples { count: usize },

    /// A tuning parameter is outside its admissible range.
    #[error("invalid argument: {name} = {value}")]
    InvalidArgument { name: &'static str, value: f64 },
}
