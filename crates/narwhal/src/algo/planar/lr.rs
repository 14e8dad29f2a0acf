//! Left-Right planarity test (Brandes' formulation of de Fraysseix-Rosenstiehl).
//!
//! Three DFS passes over the graph:
//!
//! 1. orientation: orient every edge away from the DFS root, compute lowpoints and the
//!    nesting depth used to order each adjacency list,
//! 2. testing: maintain a stack of conflict pairs and try to assign every back edge a side,
//! 3. embedding: resolve the relative sides and build the rotation system.
//!
//! Every pass keeps its own DFS stack, so path-like inputs do not grow the call stack.

use super::embedding::PlanarEmbedding;
use narwhal_graphlib::IndexedGraph;
use rustc_hash::{FxHashMap, FxHashSet};

type DirEdge = (usize, usize);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Interval {
    low: Option<DirEdge>,
    high: Option<DirEdge>,
}

impl Interval {
    fn new(low: DirEdge, high: DirEdge) -> Self {
        Self {
            low: Some(low),
            high: Some(high),
        }
    }

    fn is_empty(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// Whether this interval conflicts with edge `b`.
    fn conflicting(&self, b: DirEdge, lowpt: &FxHashMap<DirEdge, usize>) -> bool {
        match self.high {
            Some(high) if !self.is_empty() => lowpt[&high] > lowpt[&b],
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct ConflictPair {
    left: Interval,
    right: Interval,
}

impl ConflictPair {
    fn swap(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    fn lowest(&self, lowpt: &FxHashMap<DirEdge, usize>) -> Option<usize> {
        let left = self.left.low.map(|e| lowpt[&e]);
        let right = self.right.low.map(|e| lowpt[&e]);
        match (left, right) {
            (Some(l), Some(r)) => Some(l.min(r)),
            (l, r) => l.or(r),
        }
    }
}

/// Runs the test and, if the graph is planar, returns a rotation system for it.
pub(crate) fn planar_embedding(g: &IndexedGraph) -> Option<PlanarEmbedding> {
    let n = g.len();
    if n > 2 && g.edge_count() > 3 * n - 6 {
        return None;
    }
    LrPlanarity::new(g).run()
}

struct LrPlanarity<'a> {
    graph: &'a IndexedGraph,
    roots: Vec<usize>,
    height: Vec<Option<usize>>,
    lowpt: FxHashMap<DirEdge, usize>,
    lowpt2: FxHashMap<DirEdge, usize>,
    nesting_depth: FxHashMap<DirEdge, i64>,
    parent_edge: Vec<Option<DirEdge>>,

    oriented: FxHashSet<DirEdge>,
    // Oriented out-neighbors, in discovery order.
    out_adjs: Vec<Vec<usize>>,
    ordered_adjs: Vec<Vec<usize>>,

    reference: FxHashMap<DirEdge, DirEdge>,
    side: FxHashMap<DirEdge, i64>,

    stack: Vec<ConflictPair>,
    // Stack height when each edge started being processed.
    stack_bottom: FxHashMap<DirEdge, usize>,
    lowpt_edge: FxHashMap<DirEdge, DirEdge>,

    left_ref: Vec<Option<usize>>,
    right_ref: Vec<Option<usize>>,

    // Per-vertex adjacency position and the tree edges already descended into. Shared by
    // the three passes and reset before each one.
    cursor: Vec<usize>,
    skip_init: FxHashSet<DirEdge>,
}

impl<'a> LrPlanarity<'a> {
    fn new(graph: &'a IndexedGraph) -> Self {
        let n = graph.len();
        let m = graph.edge_count();
        Self {
            graph,
            roots: Vec::new(),
            height: vec![None; n],
            lowpt: FxHashMap::with_capacity_and_hasher(m, Default::default()),
            lowpt2: FxHashMap::with_capacity_and_hasher(m, Default::default()),
            nesting_depth: FxHashMap::with_capacity_and_hasher(m, Default::default()),
            parent_edge: vec![None; n],
            oriented: FxHashSet::with_capacity_and_hasher(m, Default::default()),
            out_adjs: vec![Vec::new(); n],
            ordered_adjs: vec![Vec::new(); n],
            reference: FxHashMap::default(),
            side: FxHashMap::default(),
            stack: Vec::new(),
            stack_bottom: FxHashMap::default(),
            lowpt_edge: FxHashMap::default(),
            left_ref: vec![None; n],
            right_ref: vec![None; n],
            cursor: vec![0; n],
            skip_init: FxHashSet::default(),
        }
    }

    fn run(mut self) -> Option<PlanarEmbedding> {
        let n = self.graph.len();

        for v in 0..n {
            if self.height[v].is_none() {
                self.height[v] = Some(0);
                self.roots.push(v);
                self.dfs_orientation(v);
            }
        }

        for v in 0..n {
            let mut adjs = self.out_adjs[v].clone();
            adjs.sort_by_key(|&w| self.nesting_depth[&(v, w)]);
            self.ordered_adjs[v] = adjs;
        }
        let roots = self.roots.clone();
        self.reset_cursors();
        for &root in &roots {
            if !self.dfs_testing(root) {
                return None;
            }
        }

        for v in 0..n {
            for i in 0..self.out_adjs[v].len() {
                let e = (v, self.out_adjs[v][i]);
                let signed = self.sign(e) * self.nesting_depth[&e];
                self.nesting_depth.insert(e, signed);
            }
        }

        let mut embedding = PlanarEmbedding::new(n);
        for v in 0..n {
            let mut adjs = self.out_adjs[v].clone();
            adjs.sort_by_key(|&w| self.nesting_depth[&(v, w)]);
            let mut previous: Option<usize> = None;
            for &w in &adjs {
                embedding.add_half_edge_cw(v, w, previous);
                previous = Some(w);
            }
            self.ordered_adjs[v] = adjs;
        }

        self.reset_cursors();
        for &root in &roots {
            self.dfs_embedding(root, &mut embedding);
        }
        Some(embedding)
    }

    fn reset_cursors(&mut self) {
        self.cursor.fill(0);
        self.skip_init.clear();
    }

    fn height_of(&self, v: usize) -> usize {
        self.height[v].unwrap_or(0)
    }

    fn set_reference(&mut self, key: Option<DirEdge>, value: Option<DirEdge>) {
        let Some(key) = key else {
            return;
        };
        match value {
            Some(value) => {
                self.reference.insert(key, value);
            }
            None => {
                self.reference.remove(&key);
            }
        }
    }

    fn side_of(&self, e: DirEdge) -> i64 {
        self.side.get(&e).copied().unwrap_or(1)
    }

    fn dfs_orientation(&mut self, root: usize) {
        let graph = self.graph;
        let mut dfs_stack = vec![root];

        while let Some(v) = dfs_stack.pop() {
            let e = self.parent_edge[v];
            let hv = self.height_of(v);
            let adjs = graph.neighbors(v);

            while self.cursor[v] < adjs.len() {
                let w = adjs[self.cursor[v]];
                let vw = (v, w);

                // A tree edge is revisited once its subtree is done; only the lowpoint
                // update below is left to do for it.
                if !self.skip_init.contains(&vw) {
                    if self.oriented.contains(&vw) || self.oriented.contains(&(w, v)) {
                        self.cursor[v] += 1;
                        continue;
                    }
                    self.oriented.insert(vw);
                    self.out_adjs[v].push(w);

                    self.lowpt.insert(vw, hv);
                    self.lowpt2.insert(vw, hv);
                    match self.height[w] {
                        None => {
                            self.parent_edge[w] = Some(vw);
                            self.height[w] = Some(hv + 1);
                            dfs_stack.push(v);
                            dfs_stack.push(w);
                            self.skip_init.insert(vw);
                            break;
                        }
                        Some(hw) => {
                            self.lowpt.insert(vw, hw);
                        }
                    }
                }

                let lp = self.lowpt[&vw];
                let lp2 = self.lowpt2[&vw];
                let mut depth = 2 * lp as i64;
                if lp2 < hv {
                    // chordal
                    depth += 1;
                }
                self.nesting_depth.insert(vw, depth);

                if let Some(e) = e {
                    let lpe = self.lowpt[&e];
                    let lp2e = self.lowpt2[&e];
                    if lp < lpe {
                        self.lowpt2.insert(e, lpe.min(lp2));
                        self.lowpt.insert(e, lp);
                    } else if lp > lpe {
                        self.lowpt2.insert(e, lp2e.min(lp));
                    } else {
                        self.lowpt2.insert(e, lp2e.min(lp2));
                    }
                }
                self.cursor[v] += 1;
            }
        }
    }

    fn dfs_testing(&mut self, root: usize) -> bool {
        let mut dfs_stack = vec![root];

        while let Some(v) = dfs_stack.pop() {
            let e = self.parent_edge[v];
            let hv = self.height_of(v);
            let mut descended = false;

            while self.cursor[v] < self.ordered_adjs[v].len() {
                let w = self.ordered_adjs[v][self.cursor[v]];
                let ei = (v, w);

                if !self.skip_init.contains(&ei) {
                    self.stack_bottom.insert(ei, self.stack.len());
                    if self.parent_edge[w] == Some(ei) {
                        dfs_stack.push(v);
                        dfs_stack.push(w);
                        self.skip_init.insert(ei);
                        descended = true;
                        break;
                    }
                    self.lowpt_edge.insert(ei, ei);
                    self.stack.push(ConflictPair {
                        left: Interval::default(),
                        right: Interval::new(ei, ei),
                    });
                }

                if let Some(e) = e {
                    if self.lowpt[&ei] < hv {
                        if self.cursor[v] == 0 {
                            if let Some(&low) = self.lowpt_edge.get(&ei) {
                                self.lowpt_edge.insert(e, low);
                            }
                        } else if !self.add_constraints(ei, e) {
                            return false;
                        }
                    }
                }
                self.cursor[v] += 1;
            }

            if !descended {
                if let Some(e) = e {
                    self.remove_back_edges(e);
                }
            }
        }
        true
    }

    fn add_constraints(&mut self, ei: DirEdge, e: DirEdge) -> bool {
        let mut p = ConflictPair::default();
        let bottom = self.stack_bottom.get(&ei).copied().unwrap_or(0);

        // Merge return edges of ei into P.right.
        while let Some(mut q) = self.stack.pop() {
            if !q.left.is_empty() {
                q.swap();
            }
            if !q.left.is_empty() {
                return false;
            }
            let q_low_lowpt = q.right.low.map(|low| self.lowpt[&low]);
            if q_low_lowpt.is_some_and(|lp| lp > self.lowpt[&e]) {
                if p.right.is_empty() {
                    p.right = q.right;
                } else {
                    self.set_reference(p.right.low, q.right.high);
                }
                p.right.low = q.right.low;
            } else {
                let aligned = self.lowpt_edge.get(&e).copied();
                self.set_reference(q.right.low, aligned);
            }
            if self.stack.len() <= bottom {
                break;
            }
        }

        // Merge conflicting return edges of earlier siblings into P.left.
        loop {
            let conflicting = match self.stack.last() {
                Some(top) => {
                    top.left.conflicting(ei, &self.lowpt) || top.right.conflicting(ei, &self.lowpt)
                }
                None => false,
            };
            if !conflicting {
                break;
            }
            let Some(mut q) = self.stack.pop() else {
                break;
            };
            if q.right.conflicting(ei, &self.lowpt) {
                q.swap();
            }
            if q.right.conflicting(ei, &self.lowpt) {
                return false;
            }
            self.set_reference(p.right.low, q.right.high);
            if q.right.low.is_some() {
                p.right.low = q.right.low;
            }

            if p.left.is_empty() {
                p.left = q.left;
            } else {
                self.set_reference(p.left.low, q.left.high);
            }
            p.left.low = q.left.low;
        }

        if !(p.left.is_empty() && p.right.is_empty()) {
            self.stack.push(p);
        }
        true
    }

    fn remove_back_edges(&mut self, e: DirEdge) {
        let u = e.0;
        let hu = self.height_of(u);

        // Drop entire conflict pairs whose lowest return point is u.
        while let Some(top) = self.stack.last() {
            if top.lowest(&self.lowpt) != Some(hu) {
                break;
            }
            if let Some(p) = self.stack.pop() {
                if let Some(low) = p.left.low {
                    self.side.insert(low, -1);
                }
            }
        }

        if let Some(mut p) = self.stack.pop() {
            // Trim the left interval.
            while let Some(high) = p.left.high {
                if high.1 != u {
                    break;
                }
                p.left.high = self.reference.get(&high).copied();
            }
            if p.left.high.is_none() {
                if let Some(low) = p.left.low {
                    self.set_reference(Some(low), p.right.low);
                    self.side.insert(low, -1);
                    p.left.low = None;
                }
            }

            // Trim the right interval.
            while let Some(high) = p.right.high {
                if high.1 != u {
                    break;
                }
                p.right.high = self.reference.get(&high).copied();
            }
            if p.right.high.is_none() {
                if let Some(low) = p.right.low {
                    self.set_reference(Some(low), p.left.low);
                    self.side.insert(low, -1);
                    p.right.low = None;
                }
            }
            self.stack.push(p);
        }

        // The side of e is the side of a highest return edge.
        if self.lowpt[&e] < hu {
            if let Some(top) = self.stack.last() {
                let hl = top.left.high;
                let hr = top.right.high;
                let highest = match (hl, hr) {
                    (Some(l), None) => Some(l),
                    (Some(l), Some(r)) if self.lowpt[&l] > self.lowpt[&r] => Some(l),
                    _ => hr,
                };
                self.set_reference(Some(e), highest);
            }
        }
    }

    /// Resolves the side of `e` relative to the side of its reference chain.
    fn sign(&mut self, e: DirEdge) -> i64 {
        let mut chain = vec![e];
        let mut current = e;
        while let Some(next) = self.reference.remove(&current) {
            chain.push(next);
            current = next;
        }
        // Resolve from the end of the chain back towards e.
        for pair in chain.windows(2).rev() {
            let resolved = self.side_of(pair[0]) * self.side_of(pair[1]);
            self.side.insert(pair[0], resolved);
        }
        self.side_of(e)
    }

    fn dfs_embedding(&mut self, root: usize, embedding: &mut PlanarEmbedding) {
        let mut dfs_stack = vec![root];

        while let Some(v) = dfs_stack.pop() {
            while self.cursor[v] < self.ordered_adjs[v].len() {
                let w = self.ordered_adjs[v][self.cursor[v]];
                self.cursor[v] += 1;
                let ei = (v, w);
                if self.parent_edge[w] == Some(ei) {
                    embedding.add_half_edge_first(w, v);
                    self.left_ref[v] = Some(w);
                    self.right_ref[v] = Some(w);
                    dfs_stack.push(v);
                    dfs_stack.push(w);
                    break;
                } else if self.side_of(ei) == 1 {
                    embedding.add_half_edge_cw(w, v, self.right_ref[w]);
                } else {
                    embedding.add_half_edge_ccw(w, v, self.left_ref[w]);
                    self.left_ref[w] = Some(v);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::planar_embedding;
    use narwhal_graphlib::Graph;

    fn complete(n: i64) -> Graph {
        let mut g = Graph::new();
        for a in 0..n {
            for b in (a + 1)..n {
                g.add_edge(a, b);
            }
        }
        g
    }

    fn euler_faces(g: &Graph) -> usize {
        let ig = g.indexed();
        let emb = planar_embedding(&ig).expect("planar");
        let mut seen = std::collections::BTreeSet::new();
        let mut faces = 0;
        for &(a, b) in ig.edges() {
            for (v, w) in [(a, b), (b, a)] {
                if seen.contains(&(v, w)) {
                    continue;
                }
                faces += 1;
                let mut cur = (v, w);
                while seen.insert(cur) {
                    cur = emb.next_face_half_edge(cur.0, cur.1);
                }
            }
        }
        faces
    }

    #[test]
    fn k4_is_planar_and_has_four_faces() {
        // V - E + F = 2
        assert_eq!(euler_faces(&complete(4)), 4);
    }

    #[test]
    fn cube_embedding_satisfies_euler() {
        let g = Graph::from_edges([
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ]);
        // 8 - 12 + F = 2
        assert_eq!(euler_faces(&g), 6);
    }

    #[test]
    fn deep_dfs_trees_stay_on_the_heap() {
        let n = 60_000;
        let path = Graph::from_edges((0..n - 1).map(|i| (i, i + 1)));
        assert_eq!(euler_faces(&path), 1);

        let mut cycle = path.clone();
        cycle.add_edge(n - 1, 0);
        assert_eq!(euler_faces(&cycle), 2);
    }

    #[test]
    fn k5_is_rejected_by_edge_count() {
        assert!(planar_embedding(&complete(5).indexed()).is_none());
    }

    #[test]
    fn k33_is_not_planar() {
        let mut g = Graph::new();
        for a in 0..3 {
            for b in 3..6 {
                g.add_edge(a, b);
            }
        }
        assert!(planar_embedding(&g.indexed()).is_none());
    }

    #[test]
    fn petersen_graph_is_not_planar() {
        let g = Graph::from_edges([
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 0),
            (0, 5),
            (1, 6),
            (2, 7),
            (3, 8),
            (4, 9),
            (5, 7),
            (7, 9),
            (9, 6),
            (6, 8),
            (8, 5),
        ]);
        assert!(planar_embedding(&g.indexed()).is_none());
    }
}
