#![forbid(unsafe_code)]

//! Headless vertex layout for undirected graphs.
//!
//! A request first tries a crossing-free planar drawing and falls back to a seeded
//! Fruchterman-Reingold simulation when the graph is not planar (or when the simulation is
//! asked for directly). Either way the coordinates are normalized into `[0.1, 0.9]` per axis.
//!
//! The library never installs a `tracing` subscriber; engine choices and timings are emitted at
//! `debug` and `trace` level for whoever is listening.

pub mod algo;
pub mod error;
pub mod graph;
pub mod normalize;

pub use algo::planar::NotPlanar;
pub use algo::spring::{DEFAULT_ITERATIONS, HIGH_FIDELITY_ITERATIONS, SpringOptions};
pub use algo::{Algorithm, LayoutOptions};
pub use error::{Error, Result};
pub use graph::{BoundingBox, Dimension, Edge, Graph, LayoutResult, Position, VertexId};
pub use normalize::{NormalizeOptions, OutputDimension, Scaling, normalize};

use std::time::Instant;

/// Which engine produced a [`Layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOutcome {
    Planar,
    Spring,
    /// Planar was requested but the graph is not planar.
    SpringFallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub result: LayoutResult,
    pub outcome: LayoutOutcome,
}

/// Headless layout entry point.
///
/// The result covers every vertex of `graph`, has `opts.dimension` axes and lies in
/// `[0.1, 0.9]`, except that a planar drawing requested in 3D gets a literal `z = 0.0`.
pub fn layout(graph: &Graph, opts: &LayoutOptions) -> Layout {
    tracing::debug!(
        algorithm = %opts.algorithm,
        dimension = %opts.dimension,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "layout requested"
    );

    let (raw, outcome) = match opts.algorithm {
        Algorithm::Spring => (run_spring(graph, opts), LayoutOutcome::Spring),
        Algorithm::Planar => {
            let start = Instant::now();
            let planar = algo::planar::layout(graph);
            tracing::trace!(elapsed = ?start.elapsed(), ok = planar.is_ok(), "planar layout");
            match planar {
                Ok(r) => (r, LayoutOutcome::Planar),
                Err(NotPlanar) => {
                    tracing::debug!(seed = opts.seed, "graph is not planar, using spring layout");
                    (run_spring(graph, opts), LayoutOutcome::SpringFallback)
                }
            }
        }
    };

    let start = Instant::now();
    let result = normalize(
        &raw,
        &NormalizeOptions {
            target: opts.dimension.into(),
            scaling: opts.scaling,
        },
    );
    tracing::trace!(elapsed = ?start.elapsed(), "normalize");

    Layout { result, outcome }
}

fn run_spring(graph: &Graph, opts: &LayoutOptions) -> LayoutResult {
    let start = Instant::now();
    let r = algo::spring::layout(graph, opts.dimension, &opts.spring_options());
    tracing::trace!(
        elapsed = ?start.elapsed(),
        iterations = opts.iterations,
        "spring layout"
    );
    r
}

/// Lays out the graph spanned by `edges`.
///
/// `algorithm` is matched by name (see [`Algorithm::from_name`]), `seed` only matters for the
/// spring layout and `dimensionality` must be 2 or 3. Self-loops and repeated edges are ignored.
pub fn compute_layout<I>(
    edges: I,
    algorithm: &str,
    seed: u64,
    dimensionality: u8,
) -> Result<LayoutResult>
where
    I: IntoIterator<Item = (VertexId, VertexId)>,
{
    let dimension = Dimension::try_from(dimensionality)?;
    let graph = Graph::from_edges(edges);
    let opts = LayoutOptions {
        algorithm: Algorithm::from_name(algorithm),
        seed,
        dimension,
        ..Default::default()
    };
    Ok(layout(&graph, &opts).result)
}

/// Like [`compute_layout`], for edges that may have failed to parse.
///
/// Nothing is laid out if any item is an error.
pub fn try_compute_layout<I, E>(
    edges: I,
    algorithm: &str,
    seed: u64,
    dimensionality: u8,
) -> Result<LayoutResult>
where
    I: IntoIterator<Item = std::result::Result<(VertexId, VertexId), E>>,
    E: std::fmt::Display,
{
    let dimension = Dimension::try_from(dimensionality)?;
    let mut graph = Graph::new();
    graph.try_extend(edges)?;
    let opts = LayoutOptions {
        algorithm: Algorithm::from_name(algorithm),
        seed,
        dimension,
        ..Default::default()
    };
    Ok(layout(&graph, &opts).result)
}

#[cfg(test)]
mod tests {
    use super::{Algorithm, LayoutOptions, LayoutOutcome, layout};
    use crate::graph::{Dimension, Graph};

    #[test]
    fn outcome_reports_the_engine_used() {
        let cycle = Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)]);
        let mut k5 = Graph::new();
        for a in 0..5 {
            for b in (a + 1)..5 {
                k5.add_edge(a, b);
            }
        }

        let planar = LayoutOptions::default();
        let spring = LayoutOptions {
            algorithm: Algorithm::Spring,
            ..Default::default()
        };

        assert_eq!(layout(&cycle, &planar).outcome, LayoutOutcome::Planar);
        assert_eq!(layout(&cycle, &spring).outcome, LayoutOutcome::Spring);
        assert_eq!(layout(&k5, &planar).outcome, LayoutOutcome::SpringFallback);
    }

    #[test]
    fn planar_layout_in_3d_is_promoted() {
        let g = Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)]);
        let opts = LayoutOptions {
            dimension: Dimension::Three,
            ..Default::default()
        };
        let out = layout(&g, &opts);
        assert_eq!(out.outcome, LayoutOutcome::Planar);
        assert_eq!(out.result.dimension(), Dimension::Three);
        for (_, p) in out.result.iter() {
            assert_eq!(p.z(), Some(0.0));
        }
    }
}
