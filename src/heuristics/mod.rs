//! Optimization strategies.
//!
//! Three interchangeable strategies share one constraint model: greedy
//! nearest-neighbor construction, 2-opt local search, and a genetic
//! metaheuristic.

pub mod genetic;
pub mod nearest_neighbor;
pub mod two_opt;

pub use genetic::{GaConfig, Genetic};
pub use nearest_neighbor::NearestNeighbor;
pub use two_opt::TwoOpt;

use crate::constraint::Endpoints;
use crate::matrix::TravelMatrices;

/// A tour-building strategy honoring the shared endpoint constraint model.
///
/// Implementations receive pre-validated input (square matrices, in-bounds
/// endpoint indices, no distinct-both-fixed round trip) and always produce
/// a permutation of the places, plus the trailing repeat of the first place
/// when the constraint closes the tour.
pub trait TourSearch {
    fn search(&self, matrices: &TravelMatrices, endpoints: &Endpoints) -> Vec<usize>;
    fn name(&self) -> &'static str;
}
