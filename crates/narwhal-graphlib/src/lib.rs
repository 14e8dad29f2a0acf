#![forbid(unsafe_code)]

//! Simple undirected graph container used by `narwhal`.
//!
//! Vertices are integer ids and only exist through the edges that reference them. Edges are
//! unordered pairs of distinct ids; inserting an edge twice (in either orientation) is a no-op
//! and self-loops are never stored.

pub mod alg;
pub mod error;
pub mod indexed;

pub use error::{Error, Result};
pub use indexed::IndexedGraph;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Bound;

pub type VertexId = i64;

/// An unordered vertex pair, stored with `u < v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub u: VertexId,
    pub v: VertexId,
}

impl Edge {
    /// Returns `None` for self-loops.
    pub fn new(a: VertexId, b: VertexId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { u: a, v: b }),
            std::cmp::Ordering::Greater => Some(Self { u: b, v: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn contains(&self, id: VertexId) -> bool {
        self.u == id || self.v == id
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.u, self.v)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: BTreeMap<VertexId, BTreeSet<VertexId>>,
    edge_count: usize,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (VertexId, VertexId)>,
    {
        let mut g = Self::new();
        g.extend(edges);
        g
    }

    /// Inserts `{u, v}` and both endpoints. Returns `false` when nothing was stored, either
    /// because the edge already exists or because `u == v`.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        let Some(edge) = Edge::new(u, v) else {
            return false;
        };
        if !self.adjacency.entry(edge.u).or_default().insert(edge.v) {
            return false;
        }
        self.adjacency.entry(edge.v).or_default().insert(edge.u);
        self.edge_count += 1;
        true
    }

    /// Adds a batch of edges coming from an untrusted source.
    ///
    /// Every item is checked before the graph is touched: if any item is an error, the graph
    /// is left exactly as it was and the first failing position is reported.
    pub fn try_extend<I, E>(&mut self, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = std::result::Result<(VertexId, VertexId), E>>,
        E: fmt::Display,
    {
        let mut staged: Vec<(VertexId, VertexId)> = Vec::new();
        for (index, item) in edges.into_iter().enumerate() {
            match item {
                Ok(pair) => staged.push(pair),
                Err(e) => {
                    return Err(Error::InvalidEdge {
                        index,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(staged
            .into_iter()
            .filter(|&(u, v)| self.add_edge(u, v))
            .count())
    }

    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.adjacency.get(&u).is_some_and(|n| n.contains(&v))
    }

    /// All vertices, ascending.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency.keys().copied()
    }

    /// All edges as `(min, max)` pairs, ascending.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().flat_map(|(&u, nbrs)| {
            nbrs.range((Bound::Excluded(u), Bound::Unbounded))
                .map(move |&v| Edge { u, v })
        })
    }

    /// Neighbors of `id`, ascending. Unknown ids have no neighbors.
    pub fn neighbors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.adjacency
            .get(&id)
            .into_iter()
            .flat_map(|n| n.iter().copied())
    }

    pub fn degree(&self, id: VertexId) -> usize {
        self.adjacency.get(&id).map_or(0, BTreeSet::len)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn indexed(&self) -> IndexedGraph {
        IndexedGraph::from_graph(self)
    }
}

impl Extend<(VertexId, VertexId)> for Graph {
    fn extend<T: IntoIterator<Item = (VertexId, VertexId)>>(&mut self, iter: T) {
        for (u, v) in iter {
            self.add_edge(u, v);
        }
    }
}

impl FromIterator<(VertexId, VertexId)> for Graph {
    fn from_iter<T: IntoIterator<Item = (VertexId, VertexId)>>(iter: T) -> Self {
        Self::from_edges(iter)
    }
}
