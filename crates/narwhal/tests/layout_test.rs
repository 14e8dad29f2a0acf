use narwhal::{
    Algorithm, Dimension, Error, Graph, LayoutOptions, LayoutOutcome, LayoutResult,
    NormalizeOptions, Position, VertexId, compute_layout, layout, normalize, try_compute_layout,
};
use std::collections::BTreeSet;

fn complete(n: i64) -> Vec<(i64, i64)> {
    let mut edges = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            edges.push((a, b));
        }
    }
    edges
}

fn k33() -> Vec<(i64, i64)> {
    let mut edges = Vec::new();
    for a in 0..3 {
        for b in 3..6 {
            edges.push((a, b));
        }
    }
    edges
}

fn samples() -> Vec<Vec<(i64, i64)>> {
    vec![
        vec![(0, 1)],
        vec![(0, 1), (1, 2), (2, 3), (3, 0)],
        vec![(5, 9), (9, 5), (9, 9), (9, 12)],
        vec![(-3, 4), (4, 8), (8, -3), (20, 21)],
        complete(4),
        complete(5),
        complete(7),
        k33(),
    ]
}

fn vertex_set(edges: &[(i64, i64)]) -> BTreeSet<VertexId> {
    Graph::from_edges(edges.iter().copied()).vertices().collect()
}

fn assert_bits_eq(a: &LayoutResult, b: &LayoutResult) {
    assert_eq!(a.len(), b.len());
    for ((ia, pa), (ib, pb)) in a.iter().zip(b.iter()) {
        assert_eq!(ia, ib);
        let bits = |p: &Position| p.coords().iter().map(|c| c.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(pa), bits(pb), "vertex {ia}");
    }
}

#[test]
fn every_vertex_gets_exactly_one_position() {
    for edges in samples() {
        for algorithm in ["planar", "spring", "other"] {
            for dim in [2, 3] {
                let r = compute_layout(edges.iter().copied(), algorithm, 42, dim).unwrap();
                let keys: BTreeSet<VertexId> = r.vertices().collect();
                assert_eq!(keys, vertex_set(&edges), "{algorithm} {dim}D {edges:?}");
                assert_eq!(r.dimension().axes(), usize::from(dim));
                for (_, p) in r.iter() {
                    assert_eq!(p.coords().len(), usize::from(dim));
                }
            }
        }
    }
}

#[test]
fn coordinates_stay_in_the_unit_box() {
    for edges in samples() {
        let g = Graph::from_edges(edges.iter().copied());
        for algorithm in [Algorithm::Planar, Algorithm::Spring] {
            for dimension in [Dimension::Two, Dimension::Three] {
                let opts = LayoutOptions {
                    algorithm,
                    dimension,
                    ..Default::default()
                };
                let out = layout(&g, &opts);
                let promoted = out.outcome == LayoutOutcome::Planar && dimension == Dimension::Three;
                for (id, p) in out.result.iter() {
                    for (axis, &c) in p.coords().iter().enumerate() {
                        if promoted && axis == 2 {
                            assert_eq!(c, 0.0, "vertex {id}");
                        } else {
                            assert!((0.1..=0.9).contains(&c), "vertex {id} axis {axis}: {c}");
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn spring_is_bit_for_bit_reproducible() {
    let edges = complete(6);
    for dim in [2, 3] {
        let a = compute_layout(edges.iter().copied(), "spring", 42, dim).unwrap();
        let b = compute_layout(edges.iter().copied(), "spring", 42, dim).unwrap();
        assert_bits_eq(&a, &b);
    }
}

#[test]
fn non_planar_graphs_fall_back_to_the_spring_layout() {
    for edges in [complete(5), k33()] {
        for dim in [2, 3] {
            let planar = compute_layout(edges.iter().copied(), "planar", 42, dim).unwrap();
            let spring = compute_layout(edges.iter().copied(), "spring", 42, dim).unwrap();
            assert_bits_eq(&planar, &spring);
        }
    }
}

#[test]
fn fallback_uses_the_configured_seed() {
    let a = compute_layout(complete(5), "planar", 1, 2).unwrap();
    let b = compute_layout(complete(5), "planar", 2, 2).unwrap();
    assert_ne!(a, b);
}

#[test]
fn seed_is_ignored_when_the_planar_layout_succeeds() {
    let cycle = [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)];
    let a = compute_layout(cycle, "planar", 1, 2).unwrap();
    let b = compute_layout(cycle, "planar", 999, 2).unwrap();
    assert_eq!(a, b);
}

#[test]
fn unknown_algorithm_names_mean_planar() {
    let cycle = [(0, 1), (1, 2), (2, 3), (3, 0)];
    let planar = compute_layout(cycle, "planar", 42, 3).unwrap();
    for name in ["", "PLANAR", "circular"] {
        assert_eq!(compute_layout(cycle, name, 42, 3).unwrap(), planar);
    }
}

#[test]
fn empty_and_loop_only_inputs_give_empty_results() {
    let none: [(i64, i64); 0] = [];
    for algorithm in ["planar", "spring"] {
        for dim in [2, 3] {
            assert!(compute_layout(none, algorithm, 42, dim).unwrap().is_empty());
            assert!(compute_layout([(0, 0)], algorithm, 42, dim).unwrap().is_empty());
        }
    }
}

#[test]
fn single_edge_planar_layout_pins_the_flat_axis() {
    let r = compute_layout([(3, 8)], "planar", 42, 2).unwrap();
    assert_eq!(r.get(3), Some(&Position::flat(0.1, 0.5)));
    assert_eq!(r.get(8), Some(&Position::flat(0.9, 0.5)));

    let r = compute_layout([(3, 8)], "planar", 42, 3).unwrap();
    assert_eq!(r.get(3), Some(&Position::spatial(0.1, 0.5, 0.0)));
    assert_eq!(r.get(8), Some(&Position::spatial(0.9, 0.5, 0.0)));
}

#[test]
fn single_edge_spring_layout_spans_every_axis() {
    let r = compute_layout([(3, 8)], "spring", 42, 3).unwrap();
    for (_, p) in r.iter() {
        for &c in p.coords() {
            assert!(c == 0.1 || c == 0.9 || c == 0.5, "{c}");
        }
    }
}

#[test]
fn normalizing_twice_changes_nothing() {
    for edges in samples() {
        for (algorithm, dim) in [("planar", 2), ("spring", 2), ("spring", 3)] {
            let once = compute_layout(edges.iter().copied(), algorithm, 7, dim).unwrap();
            let twice = normalize(&once, &NormalizeOptions::default());
            for ((_, a), (_, b)) in once.iter().zip(twice.iter()) {
                for (x, y) in a.coords().iter().zip(b.coords()) {
                    assert!((x - y).abs() < 1e-12, "{x} vs {y}");
                }
            }
        }
    }
}

#[test]
fn invalid_dimensionality_is_rejected() {
    for dim in [0, 1, 4, 255] {
        let err = compute_layout([(0, 1)], "planar", 42, dim).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension(d) if d == dim));
    }
}

#[test]
fn malformed_edge_batches_are_rejected_whole() {
    let batch: Vec<Result<(i64, i64), &str>> = vec![Ok((0, 1)), Err("not an integer"), Ok((1, 2))];
    let err = try_compute_layout(batch, "planar", 42, 2).unwrap_err();
    match err {
        Error::Graph(narwhal_graphlib::Error::InvalidEdge { index, reason }) => {
            assert_eq!(index, 1);
            assert_eq!(reason, "not an integer");
        }
        other => panic!("unexpected error: {other}"),
    }

    let ok: Vec<Result<(i64, i64), &str>> = vec![Ok((0, 1)), Ok((1, 2))];
    let r = try_compute_layout(ok, "planar", 42, 2).unwrap();
    assert_eq!(r.vertices().collect::<Vec<_>>(), vec![0, 1, 2]);
}

#[test]
fn high_fidelity_budget_is_honored() {
    let g = Graph::from_edges(complete(5));
    let opts = LayoutOptions {
        algorithm: Algorithm::Spring,
        iterations: narwhal::HIGH_FIDELITY_ITERATIONS,
        ..Default::default()
    };
    let hi = layout(&g, &opts);
    let lo = layout(
        &g,
        &LayoutOptions {
            algorithm: Algorithm::Spring,
            ..Default::default()
        },
    );
    assert_eq!(hi.result.len(), 5);
    assert_ne!(hi.result, lo.result);
}
