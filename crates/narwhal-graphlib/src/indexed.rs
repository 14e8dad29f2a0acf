use crate::{Graph, VertexId};
use rustc_hash::FxHashMap;

/// Dense `0..n` view of a [`Graph`], for algorithms that work on slices.
///
/// Index `i` is the `i`-th smallest vertex id, so two graphs with the same vertex set always get
/// the same numbering.
#[derive(Debug, Clone)]
pub struct IndexedGraph {
    ids: Vec<VertexId>,
    index: FxHashMap<VertexId, usize>,
    /// Sorted neighbor indices per vertex.
    adjacency: Vec<Vec<usize>>,
    /// `(a, b)` with `a < b`, ascending.
    edges: Vec<(usize, usize)>,
}

impl IndexedGraph {
    pub fn from_graph(g: &Graph) -> Self {
        let ids: Vec<VertexId> = g.vertices().collect();
        let mut index: FxHashMap<VertexId, usize> = FxHashMap::default();
        index.reserve(ids.len());
        for (i, &id) in ids.iter().enumerate() {
            index.insert(id, i);
        }

        // Ids ascend, so mapping a sorted neighbor list keeps it sorted.
        let adjacency: Vec<Vec<usize>> = ids
            .iter()
            .map(|&id| g.neighbors(id).map(|n| index[&n]).collect())
            .collect();

        let mut edges: Vec<(usize, usize)> = Vec::with_capacity(g.edge_count());
        for (a, nbrs) in adjacency.iter().enumerate() {
            edges.extend(nbrs.iter().filter(|&&b| b > a).map(|&b| (a, b)));
        }

        Self {
            ids,
            index,
            adjacency,
            edges,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn id(&self, idx: usize) -> VertexId {
        self.ids[idx]
    }

    pub fn ids(&self) -> &[VertexId] {
        &self.ids
    }

    pub fn index_of(&self, id: VertexId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
