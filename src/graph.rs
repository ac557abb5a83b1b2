//! Face-adjacency graph over the occupied cells of a DEM.
//!
//! Nodes are linear indices of cells with at least one sample. Edges connect
//! face neighbors (indices differing by one unit in exactly one dimension);
//! each unordered pair appears once because every cell only links to the
//! lexicographically greater `+1` neighbor per dimension. The graph is an
//! immutable snapshot of the grid statistics: new samples require a rebuild.
//!
//! Edge weights come from a [`DissimilarityMetric`] applied to the endpoint
//! posteriors. Occupied cells with a single sample participate with their
//! variance treated as 0.0; this fallback is fixed crate policy, cells with
//! zero samples never reach the metric because they are not graph nodes.

use crate::cell::Dem;
use log::debug;
use serde::{Deserialize, Serialize};

/// Guard against division by zero for variance-free cell pairs.
const VARIANCE_EPS: f64 = 1e-9;

/// Statistical dissimilarity between two cell posteriors.
///
/// Both variants are symmetric, non-negative and zero exactly when the two
/// posterior means coincide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DissimilarityMetric {
    /// `|mean_a - mean_b|`, in height units and directly comparable to the
    /// granularity parameter `k`.
    #[default]
    MeanAbs,
    /// `|mean_a - mean_b| / sqrt(var_a + var_b + eps)`, a variance-weighted
    /// distance that discounts height steps between noisy cells.
    Normalized,
}

impl DissimilarityMetric {
    fn weigh(self, mean_a: f64, var_a: f64, mean_b: f64, var_b: f64) -> f64 {
        match self {
            Self::MeanAbs => (mean_a - mean_b).abs(),
            Self::Normalized => (mean_a - mean_b).abs() / (var_a + var_b + VARIANCE_EPS).sqrt(),
        }
    }
}

/// Weighted edge between two occupied cells, `a < b` in linear-index order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemEdge {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

/// Immutable adjacency graph built from a DEM snapshot.
#[derive(Clone, Debug, Default)]
pub struct DemGraph {
    nodes: Vec<usize>,
    edges: Vec<DemEdge>,
}

impl DemGraph {
    /// Builds the graph in a single pass over the grid.
    pub fn build<const M: usize>(dem: &Dem<M>, metric: DissimilarityMetric) -> Self {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let cells = dem.cells();
        for (linear, cell) in cells.iter().enumerate() {
            if !cell.is_occupied() {
                continue;
            }
            nodes.push(linear);
            let index = dem.multi_index(linear);
            for dim in 0..M {
                if index[dim] + 1 >= dem.num_cells()[dim] {
                    continue;
                }
                let mut neighbor = index;
                neighbor[dim] += 1;
                let neighbor_linear = dem.linear_index(&neighbor);
                let neighbor_cell = &cells[neighbor_linear];
                if !neighbor_cell.is_occupied() {
                    continue;
                }
                if let (Some(mean_a), Some(mean_b)) = (cell.mean(), neighbor_cell.mean()) {
                    let weight = metric.weigh(
                        mean_a,
                        cell.variance().unwrap_or(0.0),
                        mean_b,
                        neighbor_cell.variance().unwrap_or(0.0),
                    );
                    edges.push(DemEdge {
                        a: linear,
                        b: neighbor_linear,
                        weight,
                    });
                }
            }
        }
        debug!(
            "built DEM graph: {} occupied cells, {} edges",
            nodes.len(),
            edges.len()
        );
        Self { nodes, edges }
    }

    /// Linear indices of the occupied cells, ascending.
    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Face-adjacency edges, one per unordered neighbor pair.
    pub fn edges(&self) -> &[DemEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
