//! Fruchterman-Reingold force-directed layout.
//!
//! Every pair of vertices repels with `k^2 / d` and every edge attracts with `d^2 / k`, where
//! `k = 1 / sqrt(n)`. A linearly cooling temperature caps how far a vertex may move per
//! iteration. All arithmetic runs in a fixed order, so a given graph and seed always produce the
//! same bits.

mod rng;

use crate::graph::{Dimension, Graph, LayoutResult};
use nalgebra as na;
use narwhal_graphlib::IndexedGraph;
use rng::XorShift64Star;

pub const DEFAULT_ITERATIONS: usize = 50;
pub const HIGH_FIDELITY_ITERATIONS: usize = 1000;

/// Lower bound for distances and displacement lengths.
const MIN_DISTANCE: f64 = 0.01;
const INITIAL_TEMPERATURE: f64 = 0.1;

#[derive(Debug, Clone)]
pub struct SpringOptions {
    pub random_seed: u64,
    pub iterations: usize,
    /// Stop early once the mean per-vertex displacement of an iteration drops below this value.
    /// `None` always runs all `iterations`.
    pub convergence_threshold: Option<f64>,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self {
            random_seed: 0,
            iterations: DEFAULT_ITERATIONS,
            convergence_threshold: None,
        }
    }
}

/// Lays out `graph` in `dimension` dimensions. Coordinates are raw and still need normalizing.
pub fn layout(graph: &Graph, dimension: Dimension, opts: &SpringOptions) -> LayoutResult {
    let ig = graph.indexed();
    match dimension {
        Dimension::Two => {
            let pos = simulate::<2>(&ig, opts);
            LayoutResult::from_flat(
                pos.into_iter()
                    .enumerate()
                    .map(|(i, p)| (ig.id(i), na::Point2::from(p))),
            )
        }
        Dimension::Three => {
            let pos = simulate::<3>(&ig, opts);
            LayoutResult::from_spatial(
                pos.into_iter()
                    .enumerate()
                    .map(|(i, p)| (ig.id(i), na::Point3::from(p))),
            )
        }
    }
}

fn simulate<const D: usize>(ig: &IndexedGraph, opts: &SpringOptions) -> Vec<na::SVector<f64, D>> {
    let n = ig.len();
    let mut rng = XorShift64Star::new(opts.random_seed);
    let mut pos: Vec<na::SVector<f64, D>> = (0..n)
        .map(|_| na::SVector::<f64, D>::from_fn(|_, _| rng.next_f64_unit()))
        .collect();
    if n < 2 {
        return pos;
    }

    let k = 1.0 / (n as f64).sqrt();
    let k2 = k * k;
    let mut t = INITIAL_TEMPERATURE;
    let dt = t / (opts.iterations as f64 + 1.0);
    let mut disp: Vec<na::SVector<f64, D>> = vec![na::SVector::zeros(); n];

    for iteration in 0..opts.iterations {
        disp.fill(na::SVector::zeros());

        for i in 0..n {
            for j in (i + 1)..n {
                let (dir, distance) = direction(&pos[i], &pos[j]);
                let f = dir * (k2 / distance);
                disp[i] += f;
                disp[j] -= f;
            }
        }

        for &(i, j) in ig.edges() {
            let (dir, distance) = direction(&pos[i], &pos[j]);
            let f = dir * (distance * distance / k);
            disp[i] -= f;
            disp[j] += f;
        }

        let mut total = 0.0;
        for (p, d) in pos.iter_mut().zip(&disp) {
            let raw = d.norm();
            let len = raw.max(MIN_DISTANCE);
            *p += d * (len.min(t) / len);
            total += raw;
        }
        t -= dt;

        if let Some(threshold) = opts.convergence_threshold {
            let mean = total / n as f64;
            if mean < threshold {
                tracing::trace!(iteration, mean, "spring layout converged");
                break;
            }
        }
    }

    pos
}

/// Unit vector from `b` towards `a` and their distance, clamped below at [`MIN_DISTANCE`].
///
/// Exactly coincident points are separated along the first axis so they still repel.
fn direction<const D: usize>(
    a: &na::SVector<f64, D>,
    b: &na::SVector<f64, D>,
) -> (na::SVector<f64, D>, f64) {
    let delta = a - b;
    let raw = delta.norm();
    if raw == 0.0 {
        let mut axis = na::SVector::<f64, D>::zeros();
        axis[0] = 1.0;
        return (axis, MIN_DISTANCE);
    }
    (delta / raw, raw.max(MIN_DISTANCE))
}
