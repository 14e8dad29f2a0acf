pub mod planar;
pub mod spring;

use crate::graph::Dimension;
use crate::normalize::Scaling;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Crossing-free straight-line drawing, falling back to [`Algorithm::Spring`] for
    /// non-planar graphs.
    #[default]
    Planar,
    /// Fruchterman-Reingold force simulation.
    Spring,
}

impl Algorithm {
    /// `"spring"` selects the simulation; every other name, including the empty string, selects
    /// the planar layout.
    pub fn from_name(name: &str) -> Self {
        match name {
            "spring" => Algorithm::Spring,
            _ => Algorithm::Planar,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Planar => "planar",
            Algorithm::Spring => "spring",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub algorithm: Algorithm,
    /// Seed for the spring initial placement. Unused when the planar layout succeeds.
    pub seed: u64,
    pub dimension: Dimension,
    /// Spring iteration budget, see [`spring::DEFAULT_ITERATIONS`] and
    /// [`spring::HIGH_FIDELITY_ITERATIONS`].
    pub iterations: usize,
    pub scaling: Scaling,
    pub convergence_threshold: Option<f64>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Planar,
            seed: 42,
            dimension: Dimension::Two,
            iterations: spring::DEFAULT_ITERATIONS,
            scaling: Scaling::PerAxis,
            convergence_threshold: None,
        }
    }
}

impl LayoutOptions {
    pub fn spring_options(&self) -> spring::SpringOptions {
        spring::SpringOptions {
            random_seed: self.seed,
            iterations: self.iterations,
            convergence_threshold: self.convergence_threshold,
        }
    }
}
