//! Rescales raw layout coordinates into `[0.1, 0.9]`.

use crate::graph::{Dimension, LayoutResult, Position};
use std::collections::BTreeMap;

pub const LOWER: f64 = 0.1;
pub const UPPER: f64 = 0.9;
/// Value for every coordinate on an axis where all vertices agree.
pub const MIDPOINT: f64 = 0.5;
/// Third coordinate appended when a flat result is promoted to 3D. Emitted as is, not
/// normalized.
pub const PROMOTED_Z: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputDimension {
    /// Keep whatever the engine produced.
    #[default]
    Preserve,
    /// Drop the third axis of spatial results.
    Two,
    /// Append [`PROMOTED_Z`] to flat results.
    Three,
}

impl From<Dimension> for OutputDimension {
    fn from(d: Dimension) -> Self {
        match d {
            Dimension::Two => OutputDimension::Two,
            Dimension::Three => OutputDimension::Three,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scaling {
    /// Every axis independently fills `[0.1, 0.9]`.
    #[default]
    PerAxis,
    /// Every axis is divided by the largest range, keeping the aspect ratio. Only the widest
    /// axis reaches `0.9`.
    Uniform,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub target: OutputDimension,
    pub scaling: Scaling,
}

/// Maps `result` into the unit box and applies the requested output dimensionality.
///
/// An axis with zero range maps to [`MIDPOINT`]. An empty result stays empty.
pub fn normalize(result: &LayoutResult, opts: &NormalizeOptions) -> LayoutResult {
    let source = result.dimension();
    let (axes, output) = match (opts.target, source) {
        (OutputDimension::Preserve, d) => (d, d),
        (OutputDimension::Two, _) => (Dimension::Two, Dimension::Two),
        (OutputDimension::Three, d) => (d, Dimension::Three),
    };

    let Some(bbox) = result.bounding_box() else {
        return LayoutResult::empty(output);
    };

    let n_axes = axes.axes();
    let mut min = [0.0_f64; 3];
    let mut extent = [0.0_f64; 3];
    for axis in 0..n_axes {
        min[axis] = bbox.min.coords()[axis];
        extent[axis] = bbox.extent(axis);
    }
    let scale: [f64; 3] = match opts.scaling {
        Scaling::PerAxis => extent,
        Scaling::Uniform => {
            let widest = extent[..n_axes].iter().copied().fold(0.0, f64::max);
            [widest; 3]
        }
    };

    let mut positions: BTreeMap<_, Position> = BTreeMap::new();
    for (id, p) in result.iter() {
        let mut out = [PROMOTED_Z; 3];
        for axis in 0..n_axes {
            out[axis] = if extent[axis] > 0.0 {
                (p.coords()[axis] - min[axis]) / scale[axis] * (UPPER - LOWER) + LOWER
            } else {
                MIDPOINT
            };
        }
        positions.insert(id, Position::from_coords(output, &out));
    }

    LayoutResult::from_positions(output, positions)
}
