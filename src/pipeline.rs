//! Batch orchestration of the grid → graph → segmentation flow.
//!
//! The pipeline owns only parameters; every [`DemPipeline::process`] call
//! rebuilds the adjacency graph from the current grid statistics and re-runs
//! the segmenter from scratch. New samples or changed parameters simply mean
//! calling `process` again — nothing is incremental, matching the batch
//! contract of the segmenter. The caller is responsible for not mutating the
//! grid while a run is in flight; the core itself never locks.

use crate::cell::Dem;
use crate::diagnostics::SegmentationReport;
use crate::error::DemError;
use crate::graph::{DemGraph, DissimilarityMetric};
use crate::segmenter::{Components, GraphSegmenter, SegmenterParams};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Parameters of a full segmentation run.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SegmentationParams {
    /// Granularity: larger values bias toward fewer, larger components.
    /// Must be positive and finite.
    pub k: f64,
    /// Edge-weight dissimilarity between neighboring cell posteriors.
    #[serde(default)]
    pub metric: DissimilarityMetric,
    /// Minimum component size enforced by the forced-merge pass; `1`
    /// disables it.
    #[serde(default = "default_min_component_size")]
    pub min_component_size: usize,
}

fn default_min_component_size() -> usize {
    1
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            k: 100.0,
            metric: DissimilarityMetric::default(),
            min_component_size: 1,
        }
    }
}

/// Result of one pipeline run: the partition plus its run report.
#[derive(Clone, Debug)]
pub struct SegmentationOutcome {
    pub components: Components,
    pub report: SegmentationReport,
}

/// Reusable batch pipeline bound to a parameter set.
#[derive(Clone, Debug)]
pub struct DemPipeline {
    params: SegmentationParams,
}

impl DemPipeline {
    pub fn new(params: SegmentationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &SegmentationParams {
        &self.params
    }

    /// Replaces the parameter set; takes effect on the next `process` call.
    pub fn set_params(&mut self, params: SegmentationParams) {
        self.params = params;
    }

    /// Runs graph construction and segmentation over the current grid state.
    pub fn process<const M: usize>(&self, dem: &Dem<M>) -> Result<SegmentationOutcome, DemError> {
        let t0 = Instant::now();
        let graph = DemGraph::build(dem, self.params.metric);
        let graph_ms = t0.elapsed().as_secs_f64() * 1000.0;

        let occupied_cells = graph.node_count();
        let edges = graph.edge_count();

        let t1 = Instant::now();
        let segmenter = GraphSegmenter::new(graph).with_params(SegmenterParams {
            min_component_size: self.params.min_component_size,
        });
        let components = segmenter.segment(self.params.k)?;
        let segment_ms = t1.elapsed().as_secs_f64() * 1000.0;

        let report = SegmentationReport {
            k: self.params.k,
            occupied_cells,
            edges,
            components: components.len(),
            largest_component: components.largest(),
            graph_ms,
            segment_ms,
            latency_ms: t0.elapsed().as_secs_f64() * 1000.0,
        };
        Ok(SegmentationOutcome { components, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;

    #[test]
    fn process_reports_consistent_counts() {
        let mut dem = Dem::<2>::new(
            Vector2::new(0.0, 0.0),
            Vector2::new(2.0, 2.0),
            Vector2::new(1.0, 1.0),
        )
        .expect("valid bounds");
        dem.add_sample(&Vector2::new(0.5, 0.5), 1.0).expect("in range");
        dem.add_sample(&Vector2::new(1.5, 0.5), 1.0).expect("in range");

        let pipeline = DemPipeline::new(SegmentationParams {
            k: 1.0,
            ..Default::default()
        });
        let outcome = pipeline.process(&dem).expect("valid parameters");
        assert_eq!(outcome.report.occupied_cells, 2);
        assert_eq!(outcome.report.edges, 1);
        assert_eq!(outcome.report.components, 1);
        assert_eq!(outcome.report.largest_component, 2);
        assert_eq!(outcome.components.len(), 1);
    }

    #[test]
    fn invalid_k_propagates() {
        let dem = Dem::<2>::new(
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 1.0),
            Vector2::new(1.0, 1.0),
        )
        .expect("valid bounds");
        let pipeline = DemPipeline::new(SegmentationParams {
            k: -2.0,
            ..Default::default()
        });
        let err = pipeline.process(&dem).expect_err("k must be positive");
        assert_eq!(err, DemError::InvalidArgument { name: "k", value: -2.0 });
    }
}
