use crate::error::{Error, Result};
use nalgebra as na;
use std::collections::BTreeMap;
use std::fmt;

pub use narwhal_graphlib::{Edge, Graph, VertexId};

/// Number of coordinates per position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    #[default]
    Two,
    Three,
}

impl Dimension {
    pub fn axes(self) -> usize {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }
}

impl TryFrom<u8> for Dimension {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            2 => Ok(Dimension::Two),
            3 => Ok(Dimension::Three),
            other => Err(Error::InvalidDimension(other)),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.axes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    Flat(na::Point2<f64>),
    Spatial(na::Point3<f64>),
}

impl Position {
    pub fn flat(x: f64, y: f64) -> Self {
        Position::Flat(na::Point2::new(x, y))
    }

    pub fn spatial(x: f64, y: f64, z: f64) -> Self {
        Position::Spatial(na::Point3::new(x, y, z))
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Position::Flat(_) => Dimension::Two,
            Position::Spatial(_) => Dimension::Three,
        }
    }

    /// Coordinates in axis order.
    pub fn coords(&self) -> &[f64] {
        match self {
            Position::Flat(p) => p.coords.as_slice(),
            Position::Spatial(p) => p.coords.as_slice(),
        }
    }

    pub fn x(&self) -> f64 {
        self.coords()[0]
    }

    pub fn y(&self) -> f64 {
        self.coords()[1]
    }

    pub fn z(&self) -> Option<f64> {
        match self {
            Position::Flat(_) => None,
            Position::Spatial(p) => Some(p.z),
        }
    }

    /// Builds a position from the first `dimension.axes()` values of `coords`; missing values
    /// read as `0.0`.
    pub(crate) fn from_coords(dimension: Dimension, coords: &[f64]) -> Self {
        let at = |i: usize| coords.get(i).copied().unwrap_or(0.0);
        match dimension {
            Dimension::Two => Position::flat(at(0), at(1)),
            Dimension::Three => Position::spatial(at(0), at(1), at(2)),
        }
    }
}

/// Per-axis extent of a [`LayoutResult`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Position,
    pub max: Position,
}

impl BoundingBox {
    /// `max - min` along `axis`.
    pub fn extent(&self, axis: usize) -> f64 {
        self.max.coords()[axis] - self.min.coords()[axis]
    }
}

/// Vertex positions that all share one dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    dimension: Dimension,
    positions: BTreeMap<VertexId, Position>,
}

impl LayoutResult {
    pub fn empty(dimension: Dimension) -> Self {
        Self {
            dimension,
            positions: BTreeMap::new(),
        }
    }

    pub fn from_flat<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = (VertexId, na::Point2<f64>)>,
    {
        Self {
            dimension: Dimension::Two,
            positions: positions
                .into_iter()
                .map(|(id, p)| (id, Position::Flat(p)))
                .collect(),
        }
    }

    pub fn from_spatial<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = (VertexId, na::Point3<f64>)>,
    {
        Self {
            dimension: Dimension::Three,
            positions: positions
                .into_iter()
                .map(|(id, p)| (id, Position::Spatial(p)))
                .collect(),
        }
    }

    /// Caller guarantees every position has `dimension` axes.
    pub(crate) fn from_positions(
        dimension: Dimension,
        positions: BTreeMap<VertexId, Position>,
    ) -> Self {
        debug_assert!(positions.values().all(|p| p.dimension() == dimension));
        Self {
            dimension,
            positions,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn get(&self, id: VertexId) -> Option<&Position> {
        self.positions.get(&id)
    }

    /// Positions by ascending vertex id.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Position)> + '_ {
        self.positions.iter().map(|(&id, p)| (id, p))
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.positions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn into_positions(self) -> BTreeMap<VertexId, Position> {
        self.positions
    }

    /// Per-axis `(min, max)` over all positions, or `None` when there are none.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let axes = self.dimension.axes();
        let mut values = self.positions.values();
        let first = values.next()?;
        let mut min = [0.0_f64; 3];
        let mut max = [0.0_f64; 3];
        min[..axes].copy_from_slice(first.coords());
        max[..axes].copy_from_slice(first.coords());
        for p in values {
            for (axis, &c) in p.coords().iter().enumerate() {
                min[axis] = min[axis].min(c);
                max[axis] = max[axis].max(c);
            }
        }
        Some(BoundingBox {
            min: Position::from_coords(self.dimension, &min),
            max: Position::from_coords(self.dimension, &max),
        })
    }
}
