//! Traversal helpers over [`Graph`].

use crate::{Graph, VertexId};
use std::collections::{BTreeSet, VecDeque};

/// Connected components, each sorted ascending and ordered by their smallest vertex.
pub fn components(g: &Graph) -> Vec<Vec<VertexId>> {
    let mut seen: BTreeSet<VertexId> = BTreeSet::new();
    let mut out: Vec<Vec<VertexId>> = Vec::new();

    for start in g.vertices() {
        if !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<VertexId> = Vec::new();
        let mut q: VecDeque<VertexId> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            for n in g.neighbors(v) {
                if seen.insert(n) {
                    q.push_back(n);
                }
            }
        }
        comp.sort_unstable();
        out.push(comp);
    }

    out
}
