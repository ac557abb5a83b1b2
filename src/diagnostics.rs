//! Serializable reports describing one segmentation run.

use serde::Serialize;

/// Counters and timings for one grid→graph→segmentation run.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SegmentationReport {
    /// Granularity parameter the run used.
    pub k: f64,
    /// Nodes of the adjacency graph (cells with at least one sample).
    pub occupied_cells: usize,
    /// Face-adjacency edges between occupied cells.
    pub edges: usize,
    /// Components in the emitted partition.
    pub components: usize,
    /// Size of the largest component.
    pub largest_component: usize,
    /// Time spent building the adjacency graph.
    pub graph_ms: f64,
    /// Time spent sorting, merging and emitting components.
    pub segment_ms: f64,
    /// End-to-end wall time of the run.
    pub latency_ms: f64,
}
