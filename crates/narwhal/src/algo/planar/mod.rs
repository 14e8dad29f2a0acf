//! Crossing-free straight-line layout for planar graphs.
//!
//! The Left-Right planarity test yields a rotation system, which is then drawn on an integer grid
//! with the shift method. Every step visits vertices by ascending id, so the same graph always
//! gets the same coordinates.

mod canonical;
mod embedding;
mod lr;

use crate::graph::{Graph, LayoutResult};
use nalgebra as na;
use narwhal_graphlib::alg;

/// The graph has no planar embedding (or one could not be drawn). Not an error: callers are
/// expected to fall back to another layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotPlanar;

pub fn is_planar(graph: &Graph) -> bool {
    lr::planar_embedding(&graph.indexed()).is_some()
}

/// Lays out `graph` on the plane without edge crossings.
///
/// Coordinates are raw grid values (non-negative integers stored as `f64`) and still need
/// normalizing.
pub fn layout(graph: &Graph) -> Result<LayoutResult, NotPlanar> {
    let ig = graph.indexed();
    let embedding = lr::planar_embedding(&ig).ok_or(NotPlanar)?;

    let roots: Vec<usize> = alg::components(graph)
        .iter()
        .filter_map(|c| c.first().and_then(|&v| ig.index_of(v)))
        .collect();
    let grid = canonical::grid_positions(embedding, &roots).ok_or(NotPlanar)?;

    Ok(LayoutResult::from_flat(grid.into_iter().enumerate().map(
        |(i, (x, y))| (ig.id(i), na::Point2::new(x as f64, y as f64)),
    )))
}

#[cfg(test)]
mod tests {
    use super::{NotPlanar, is_planar, layout};
    use crate::graph::{Dimension, Graph};

    #[test]
    fn empty_graph_is_planar_with_no_positions() {
        let r = layout(&Graph::new()).unwrap();
        assert!(r.is_empty());
        assert_eq!(r.dimension(), Dimension::Two);
    }

    #[test]
    fn single_edge_uses_fixed_points() {
        let r = layout(&Graph::from_edges([(10, -4)])).unwrap();
        assert_eq!(r.get(-4).unwrap().coords(), &[0.0, 0.0]);
        assert_eq!(r.get(10).unwrap().coords(), &[2.0, 0.0]);
    }

    #[test]
    fn k5_reports_not_planar() {
        let mut g = Graph::new();
        for a in 0..5 {
            for b in (a + 1)..5 {
                g.add_edge(a, b);
            }
        }
        assert!(!is_planar(&g));
        assert_eq!(layout(&g), Err(NotPlanar));
    }

    #[test]
    fn layout_is_repeatable() {
        let g = Graph::from_edges([(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2), (7, 8)]);
        assert_eq!(layout(&g), layout(&g));
    }
}
