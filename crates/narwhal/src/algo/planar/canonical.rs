//! Straight-line grid drawing of a planar embedding.
//!
//! The embedding is first made connected and 2-connected, every inner face is triangulated, a
//! canonical ordering is computed against the largest face, and the vertices are finally placed
//! with the de Fraysseix-Pach-Pollack shift method.

use super::embedding::PlanarEmbedding;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;

/// Grid coordinates for every vertex, indexed like the embedding.
///
/// `component_roots` holds one vertex per connected component. Returns `None` if the embedding
/// turns out not to admit a canonical ordering, which only happens for an inconsistent rotation
/// system.
pub(crate) fn grid_positions(
    mut embedding: PlanarEmbedding,
    component_roots: &[usize],
) -> Option<Vec<(i64, i64)>> {
    let n = embedding.len();
    if n < 4 {
        return Some(SMALL_GRAPH_POSITIONS[..n].to_vec());
    }

    let outer_face = triangulate(&mut embedding, component_roots);
    let ordering = canonical_ordering(&embedding, &outer_face)?;
    shift(&ordering, n)
}

const SMALL_GRAPH_POSITIONS: [(i64, i64); 3] = [(0, 0), (2, 0), (1, 1)];

/// Adds edges until the embedding is connected, every face is bounded by a simple cycle and all
/// faces except the largest are triangles. Returns the largest face.
fn triangulate(embedding: &mut PlanarEmbedding, component_roots: &[usize]) -> Vec<usize> {
    for pair in component_roots.windows(2) {
        embedding.connect_components(pair[0], pair[1]);
    }

    let mut faces: Vec<Vec<usize>> = Vec::new();
    let mut outer: Option<usize> = None;
    let mut visited: FxHashSet<(usize, usize)> = FxHashSet::default();
    for v in 0..embedding.len() {
        for w in embedding.neighbors_cw_order(v) {
            let Some(face) = make_biconnected(embedding, v, w, &mut visited) else {
                continue;
            };
            if outer.is_none_or(|i| face.len() > faces[i].len()) {
                outer = Some(faces.len());
            }
            faces.push(face);
        }
    }

    for (i, face) in faces.iter().enumerate() {
        if Some(i) != outer {
            triangulate_face(embedding, face[0], face[1]);
        }
    }

    outer.map(|i| faces.swap_remove(i)).unwrap_or_default()
}

/// Walks the face left of `(start, out)` and splits off every vertex seen twice on it.
///
/// Returns the face's vertices, or `None` if the face was already walked.
fn make_biconnected(
    embedding: &mut PlanarEmbedding,
    start: usize,
    out: usize,
    visited: &mut FxHashSet<(usize, usize)>,
) -> Option<Vec<usize>> {
    if !visited.insert((start, out)) {
        return None;
    }

    let mut face = vec![start];
    let mut on_face: FxHashSet<usize> = FxHashSet::default();
    on_face.insert(start);

    let (mut v1, mut v2) = (start, out);
    let (_, mut v3) = embedding.next_face_half_edge(v1, v2);
    while v2 != start || v3 != out {
        if on_face.contains(&v2) {
            embedding.add_half_edge_cw(v1, v3, Some(v2));
            embedding.add_half_edge_ccw(v3, v1, Some(v2));
            visited.insert((v2, v3));
            visited.insert((v3, v1));
            v2 = v1;
        } else {
            on_face.insert(v2);
            face.push(v2);
        }

        v1 = v2;
        (v2, v3) = embedding.next_face_half_edge(v2, v3);
        visited.insert((v1, v2));
    }
    Some(face)
}

/// Fans the face left of `(v1, v2)` into triangles.
fn triangulate_face(embedding: &mut PlanarEmbedding, mut v1: usize, mut v2: usize) {
    let (_, mut v3) = embedding.next_face_half_edge(v1, v2);
    let (_, mut v4) = embedding.next_face_half_edge(v2, v3);
    if v1 == v2 || v1 == v3 {
        return;
    }
    while v1 != v4 {
        if embedding.has_edge(v1, v3) {
            (v1, v2, v3) = (v2, v3, v4);
        } else {
            embedding.add_half_edge_cw(v1, v3, Some(v2));
            embedding.add_half_edge_ccw(v3, v1, Some(v2));
            (v2, v3) = (v3, v4);
        }
        (_, v4) = embedding.next_face_half_edge(v2, v3);
    }
}

/// One step of the canonical ordering: a vertex and the outer-face path it covers when inserted.
#[derive(Debug, Clone)]
struct Step {
    vertex: usize,
    contour: Vec<usize>,
}

/// Outer face bookkeeping while vertices are peeled off.
struct OuterFace {
    v1: usize,
    cw: Vec<Option<usize>>,
    ccw: Vec<Option<usize>>,
    removed: Vec<bool>,
}

impl OuterFace {
    fn new(face: &[usize], n: usize) -> Self {
        let (v1, v2) = (face[0], face[1]);
        let mut ccw = vec![None; n];
        let mut cw = vec![None; n];

        // Neither map links v1 and v2 to each other.
        let mut prev = v2;
        for &x in &face[2..] {
            ccw[prev] = Some(x);
            prev = x;
        }
        ccw[prev] = Some(v1);

        let mut prev = v1;
        for &x in face[1..].iter().rev() {
            cw[prev] = Some(x);
            prev = x;
        }

        Self {
            v1,
            cw,
            ccw,
            removed: vec![false; n],
        }
    }

    fn contains(&self, x: usize) -> bool {
        !self.removed[x] && (self.ccw[x].is_some() || x == self.v1)
    }

    fn adjacent(&self, x: usize, y: usize) -> bool {
        self.ccw[x] == Some(y) || self.cw[x] == Some(y)
    }

    fn is_chord(&self, x: usize, y: usize) -> bool {
        self.contains(y) && !self.adjacent(x, y)
    }

    fn link(&mut self, a: usize, b: usize) {
        self.cw[a] = Some(b);
        self.ccw[b] = Some(a);
    }
}

/// Canonical ordering of a triangulated embedding whose only non-triangular face is
/// `outer_face`.
///
/// Vertices are removed from the outer face one at a time, always choosing the smallest index
/// that has no chord, so the order only depends on the embedding.
fn canonical_ordering(embedding: &PlanarEmbedding, outer_face: &[usize]) -> Option<Vec<Step>> {
    let n = embedding.len();
    if outer_face.len() < 2 {
        return None;
    }
    let (v1, v2) = (outer_face[0], outer_face[1]);

    let mut outer = OuterFace::new(outer_face, n);
    let mut chords = vec![0_i64; n];
    let mut ready: BTreeSet<usize> = outer_face.iter().copied().collect();

    for &v in outer_face {
        for nbr in embedding.neighbors_cw_order(v) {
            if outer.is_chord(v, nbr) {
                chords[v] += 1;
                ready.remove(&v);
            }
        }
    }
    ready.remove(&v1);
    ready.remove(&v2);

    let mut ordering: Vec<Option<Step>> = vec![None; n];
    ordering[0] = Some(Step {
        vertex: v1,
        contour: Vec::new(),
    });
    ordering[1] = Some(Step {
        vertex: v2,
        contour: Vec::new(),
    });

    for k in (2..n).rev() {
        let v = ready.pop_first()?;
        outer.removed[v] = true;

        let mut wp = None;
        let mut wq = None;
        for nbr in embedding.neighbors_cw_order(v) {
            if outer.removed[nbr] || !outer.contains(nbr) {
                continue;
            }
            if nbr == v1 {
                wp = Some(v1);
            } else if nbr == v2 {
                wq = Some(v2);
            } else if outer.cw[nbr] == Some(v) {
                wp = Some(nbr);
            } else {
                wq = Some(nbr);
            }
            if wp.is_some() && wq.is_some() {
                break;
            }
        }
        let (wp, wq) = (wp?, wq?);

        let mut contour = vec![wp];
        let mut nbr = wp;
        while nbr != wq {
            if contour.len() > n {
                return None;
            }
            let next = embedding.ccw(v, nbr);
            contour.push(next);
            outer.link(nbr, next);
            nbr = next;
        }

        if contour.len() == 2 {
            for w in [wp, wq] {
                chords[w] -= 1;
                if chords[w] == 0 {
                    ready.insert(w);
                }
            }
        } else {
            let inner = &contour[1..contour.len() - 1];
            let fresh: FxHashSet<usize> = inner.iter().copied().collect();
            for &w in inner {
                ready.insert(w);
                for nbr in embedding.neighbors_cw_order(w) {
                    if !outer.is_chord(w, nbr) {
                        continue;
                    }
                    chords[w] += 1;
                    ready.remove(&w);
                    if !fresh.contains(&nbr) {
                        chords[nbr] += 1;
                        ready.remove(&nbr);
                    }
                }
            }
        }

        ordering[k] = Some(Step { vertex: v, contour });
    }

    ordering.into_iter().collect()
}

/// de Fraysseix-Pach-Pollack shift method.
///
/// Each vertex stores its x offset relative to its parent in a binary tree; the final pass
/// accumulates offsets from `v1` down.
fn shift(ordering: &[Step], n: usize) -> Option<Vec<(i64, i64)>> {
    let mut delta_x = vec![0_i64; n];
    let mut y = vec![0_i64; n];
    let mut left: Vec<Option<usize>> = vec![None; n];
    let mut right: Vec<Option<usize>> = vec![None; n];

    let (v1, v2, v3) = (
        ordering[0].vertex,
        ordering[1].vertex,
        ordering[2].vertex,
    );
    right[v1] = Some(v3);
    delta_x[v2] = 1;
    delta_x[v3] = 1;
    y[v3] = 1;
    right[v3] = Some(v2);

    for step in &ordering[3..] {
        let vk = step.vertex;
        let c = &step.contour;
        let &[wp, wp1, ..] = c.as_slice() else {
            return None;
        };
        let (wq, wq1) = (c[c.len() - 1], c[c.len() - 2]);
        let covers_many = c.len() > 2;

        // Stretch the gaps next to the new vertex.
        delta_x[wp1] += 1;
        delta_x[wq] += 1;

        let span: i64 = c[1..].iter().map(|&x| delta_x[x]).sum();
        delta_x[vk] = (-y[wp] + span + y[wq]).div_euclid(2);
        y[vk] = (y[wp] + span + y[wq]).div_euclid(2);
        delta_x[wq] = span - delta_x[vk];
        if covers_many {
            delta_x[wp1] -= delta_x[vk];
        }

        right[wp] = Some(vk);
        right[vk] = Some(wq);
        if covers_many {
            left[vk] = Some(wp1);
            right[wq1] = None;
        } else {
            left[vk] = None;
        }
    }

    let mut pos: Vec<Option<(i64, i64)>> = vec![None; n];
    pos[v1] = Some((0, y[v1]));
    let mut stack = vec![v1];
    while let Some(parent) = stack.pop() {
        let parent_x = pos[parent].map_or(0, |p| p.0);
        for child in [left[parent], right[parent]].into_iter().flatten() {
            pos[child] = Some((parent_x + delta_x[child], y[child]));
            stack.push(child);
        }
    }

    pos.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::grid_positions;
    use crate::algo::planar::lr::planar_embedding;
    use narwhal_graphlib::{Graph, alg};

    fn draw(g: &Graph) -> Vec<(i64, i64)> {
        let ig = g.indexed();
        let roots: Vec<usize> = alg::components(g)
            .iter()
            .filter_map(|c| ig.index_of(c[0]))
            .collect();
        let emb = planar_embedding(&ig).expect("planar");
        grid_positions(emb, &roots).expect("drawable")
    }

    #[test]
    fn four_cycle_places_every_vertex_once() {
        let pos = draw(&Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)]));
        assert_eq!(pos.len(), 4);
        let distinct: std::collections::BTreeSet<_> = pos.iter().collect();
        assert_eq!(distinct.len(), 4);
        assert_eq!(pos[0], (0, 0));
    }

    #[test]
    fn coordinates_are_on_the_grid_within_bounds() {
        // 3x3 grid graph: 9 vertices, FPP keeps x in [0, 2n - 4] and y in [0, n - 2].
        let mut g = Graph::new();
        for r in 0..3 {
            for c in 0..3 {
                let v = r * 3 + c;
                if c < 2 {
                    g.add_edge(v, v + 1);
                }
                if r < 2 {
                    g.add_edge(v, v + 3);
                }
            }
        }
        for (x, y) in draw(&g) {
            assert!((0..=14).contains(&x), "x={x}");
            assert!((0..=7).contains(&y), "y={y}");
        }
    }

    #[test]
    fn small_graphs_use_the_fixed_triangle() {
        assert_eq!(draw(&Graph::from_edges([(5, 9)])), vec![(0, 0), (2, 0)]);
        assert_eq!(
            draw(&Graph::from_edges([(1, 2), (2, 3)])),
            vec![(0, 0), (2, 0), (1, 1)]
        );
    }
}
