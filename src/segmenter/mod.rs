//! Greedy graph-based segmentation of a DEM adjacency graph.
//!
//! The segmenter runs a Kruskal-style merge over the edges of a [`DemGraph`]:
//! edges are sorted by weight ascending (ties broken by endpoint order, so a
//! given graph always produces the same result) and two components `Cu`, `Cv`
//! joined by an edge of weight `w` are merged when
//!
//! ```text
//! w <= min(int(Cu) + k / |Cu|, int(Cv) + k / |Cv|)
//! ```
//!
//! where `int(C)` is the component's internal difference (the largest edge
//! weight used so far to merge its members) and `k` the granularity
//! parameter. The `k / |C|` term shrinks as components grow, so larger `k`
//! lets small components absorb dissimilar neighbors early and biases the
//! result toward fewer, larger segments.
//!
//! An optional second pass merges components below a minimum size into an
//! adjacent component regardless of the threshold, walking the same sorted
//! edge order to stay deterministic.
//!
//! Complexity: `O(E log E)` for the sort, near-`O(E)` amortized for the
//! union-find operations (path halving + union by size). Each `segment` call
//! recomputes from scratch; the algorithm is batch, not incremental.

mod components;
mod union_find;

pub use components::{Component, ComponentId, Components};
pub use union_find::UnionFind;

use crate::error::DemError;
use crate::graph::{DemEdge, DemGraph};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Tunable parameters besides the granularity `k`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SegmenterParams {
    /// Components smaller than this are force-merged into an adjacent
    /// component in a deterministic second pass. `1` disables the pass.
    pub min_component_size: usize,
}

impl Default for SegmenterParams {
    fn default() -> Self {
        Self {
            min_component_size: 1,
        }
    }
}

/// Segmenter bound to one immutable graph snapshot.
///
/// `segment` may be called repeatedly with different `k`; the same graph and
/// the same `k` always yield the same partition.
pub struct GraphSegmenter {
    graph: DemGraph,
    params: SegmenterParams,
    /// Dense slot per occupied node, keyed by linear cell index.
    slots: HashMap<usize, usize>,
}

impl GraphSegmenter {
    /// Binds the segmenter to a graph snapshot.
    pub fn new(graph: DemGraph) -> Self {
        let slots = graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(slot, &linear)| (linear, slot))
            .collect();
        Self {
            graph,
            params: SegmenterParams::default(),
            slots,
        }
    }

    pub fn with_params(mut self, params: SegmenterParams) -> Self {
        self.params = params;
        self
    }

    pub fn graph(&self) -> &DemGraph {
        &self.graph
    }

    /// Partitions the occupied cells with granularity `k`.
    ///
    /// Fails with [`DemError::InvalidArgument`] unless `k` is positive and
    /// finite.
    pub fn segment(&self, k: f64) -> Result<Components, DemError> {
        if !(k > 0.0) || !k.is_finite() {
            return Err(DemError::InvalidArgument { name: "k", value: k });
        }

        let node_count = self.graph.node_count();
        let mut forest = UnionFind::new(node_count);
        let mut internal = vec![0.0f64; node_count];

        let mut edges: Vec<DemEdge> = self.graph.edges().to_vec();
        edges.sort_by(|x, y| {
            x.weight
                .partial_cmp(&y.weight)
                .unwrap_or(Ordering::Equal)
                .then_with(|| (x.a, x.b).cmp(&(y.a, y.b)))
        });

        let mut merges = 0usize;
        for edge in &edges {
            let slot_a = self.slots[&edge.a];
            let slot_b = self.slots[&edge.b];
            let root_a = forest.find(slot_a);
            let root_b = forest.find(slot_b);
            if root_a == root_b {
                continue;
            }
            let threshold_a = internal[root_a] + k / forest.size_of(root_a) as f64;
            let threshold_b = internal[root_b] + k / forest.size_of(root_b) as f64;
            if edge.weight <= threshold_a.min(threshold_b) {
                let root = forest.union(root_a, root_b);
                // edges arrive in increasing weight order, so this edge
                // dominates both previous internal differences
                internal[root] = edge.weight;
                merges += 1;
            }
        }

        let mut forced_merges = 0usize;
        if self.params.min_component_size > 1 {
            let min_size = self.params.min_component_size;
            for edge in &edges {
                let root_a = forest.find(self.slots[&edge.a]);
                let root_b = forest.find(self.slots[&edge.b]);
                if root_a == root_b {
                    continue;
                }
                if forest.size_of(root_a) < min_size || forest.size_of(root_b) < min_size {
                    let merged = internal[root_a].max(internal[root_b]).max(edge.weight);
                    let root = forest.union(root_a, root_b);
                    internal[root] = merged;
                    forced_merges += 1;
                }
            }
        }

        debug!(
            "segmented {} nodes / {} edges with k={k}: {merges} merges, {forced_merges} forced",
            node_count,
            edges.len()
        );

        Ok(self.collect_components(&mut forest, &internal))
    }

    /// Emits components with deterministic dense ids: nodes are scanned by
    /// ascending linear index and each new root claims the next id.
    fn collect_components(&self, forest: &mut UnionFind, internal: &[f64]) -> Components {
        let mut id_of_root: HashMap<usize, ComponentId> = HashMap::new();
        let mut components: Vec<Component> = Vec::new();
        for (slot, &linear) in self.graph.nodes().iter().enumerate() {
            let root = forest.find(slot);
            let id = *id_of_root.entry(root).or_insert_with(|| {
                let id = ComponentId(components.len() as u32);
                components.push(Component {
                    id,
                    members: Vec::new(),
                    internal_difference: internal[root],
                });
                id
            });
            components[id.0 as usize].members.push(linear);
        }
        // nodes() is ascending, so member lists come out sorted
        Components::new(components)
    }
}

#[cfg(test)]
mod tests;
