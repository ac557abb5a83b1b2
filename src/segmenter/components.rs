//! Segmentation output: an exact partition of the occupied cells.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a terrain component within one segmentation result.
///
/// Ids are dense (`0..components.len()`) and assigned in order of first
/// appearance while scanning occupied cells by ascending linear index, so
/// identical inputs produce identical labelings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub u32);

/// One maximal set of occupied cells connected through merge decisions.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Component {
    pub id: ComponentId,
    /// Member cell linear indices, ascending.
    pub members: Vec<usize>,
    /// Largest edge weight used to merge any two members; 0 for singletons.
    pub internal_difference: f64,
}

impl Component {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Partition of the occupied cells of a DEM graph.
///
/// Every occupied cell belongs to exactly one component; the mapping is
/// rebuilt from scratch on every segmentation run.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Components {
    components: Vec<Component>,
    #[serde(skip)]
    labels: HashMap<usize, ComponentId>,
}

impl Components {
    pub(crate) fn new(components: Vec<Component>) -> Self {
        let mut labels = HashMap::new();
        for component in &components {
            for &member in &component.members {
                labels.insert(member, component.id);
            }
        }
        Self { components, labels }
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component owning the cell at `linear_index`, `None` for cells that
    /// were not occupied when the graph was built.
    pub fn component_of(&self, linear_index: usize) -> Option<ComponentId> {
        self.labels.get(&linear_index).copied()
    }

    /// Member cell linear indices of a component, ascending. Empty for an
    /// unknown id.
    pub fn members_of(&self, id: ComponentId) -> &[usize] {
        self.components
            .get(id.0 as usize)
            .map(|c| c.members.as_slice())
            .unwrap_or(&[])
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.0 as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Component> {
        self.components.iter()
    }

    /// Size of the largest component, 0 when empty.
    pub fn largest(&self) -> usize {
        self.components.iter().map(Component::size).max().unwrap_or(0)
    }
}
