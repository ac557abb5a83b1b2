#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod cell;
pub mod diagnostics;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod segmenter;

// Lower-level building blocks, public for tools and advanced users.
pub mod config;
pub mod estimator;
pub mod graph;
pub mod snapshot;

// --- High-level re-exports -------------------------------------------------

// Main entry points: DEM container + batch pipeline.
pub use crate::cell::{Cell, Dem};
pub use crate::grid::{Coordinate, Grid, GridIndex};
pub use crate::pipeline::{DemPipeline, SegmentationOutcome, SegmentationParams};

// Segmentation results.
pub use crate::segmenter::{Component, ComponentId, Components, GraphSegmenter};

// Errors and estimates surface in most signatures.
pub use crate::error::DemError;
pub use crate::estimator::HeightEstimate;
pub use crate::graph::{DemGraph, DissimilarityMetric};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use dem_segmenter::prelude::*;
/// use nalgebra::Vector2;
///
/// # fn main() -> Result<(), DemError> {
/// let mut dem = Dem::<2>::new(
///     Vector2::new(0.0, 0.0),
///     Vector2::new(3.0, 3.0),
///     Vector2::new(1.0, 1.0),
/// )?;
/// dem.add_sample(&Vector2::new(0.5, 0.5), 1.0)?;
///
/// let pipeline = DemPipeline::new(SegmentationParams::default());
/// let outcome = pipeline.process(&dem)?;
/// println!(
///     "components={} latency_ms={:.3}",
///     outcome.components.len(),
///     outcome.report.latency_ms
/// );
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::cell::{Cell, Dem};
    pub use crate::error::DemError;
    pub use crate::graph::DissimilarityMetric;
    pub use crate::grid::{Coordinate, Grid, GridIndex};
    pub use crate::pipeline::{DemPipeline, SegmentationOutcome, SegmentationParams};
    pub use crate::segmenter::{ComponentId, Components};
}
