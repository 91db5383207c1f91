//! Route assembly: input validation, strategy dispatch, itinerary building.
//!
//! This is the crate's front door. It validates the matrices and the
//! endpoint constraint, short-circuits trivial inputs, runs exactly one
//! strategy, and turns the resulting tour into an [`Itinerary`].

use crate::constraint::Endpoints;
use crate::error::SolveError;
use crate::heuristics::{GaConfig, Genetic, NearestNeighbor, TourSearch, TwoOpt};
use crate::itinerary::{Itinerary, Waypoint};
use crate::matrix::TravelMatrices;
use log::info;
use std::str::FromStr;

/// The available optimization strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Greedy nearest-neighbor construction.
    NearestNeighbor,
    /// Nearest-neighbor construction refined by 2-opt local search.
    TwoOpt,
    /// Genetic metaheuristic.
    Genetic,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::NearestNeighbor, Strategy::TwoOpt, Strategy::Genetic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::NearestNeighbor => "nn",
            Strategy::TwoOpt => "2opt",
            Strategy::Genetic => "genetic",
        }
    }
}

impl FromStr for Strategy {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, SolveError> {
        match s.to_ascii_lowercase().as_str() {
            "nn" => Ok(Strategy::NearestNeighbor),
            "2opt" => Ok(Strategy::TwoOpt),
            "genetic" => Ok(Strategy::Genetic),
            other => Err(SolveError::UnknownStrategy(other.to_string())),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy tuning parameters.
#[derive(Debug, Clone)]
pub struct Tuning {
    /// Maximum 2-opt scan passes.
    pub max_passes: usize,
    /// Genetic strategy configuration.
    pub ga: GaConfig,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            max_passes: 50,
            ga: GaConfig::default(),
        }
    }
}

/// Compute an optimized itinerary over `places`.
///
/// `distances` and `durations` are the caller-supplied square travel
/// matrices, in whatever units the caller works in; the itinerary reports
/// whole units. Zero or one place yields a trivial itinerary without
/// invoking any strategy or validation.
pub fn optimize(
    places: &[Waypoint],
    distances: Vec<Vec<f64>>,
    durations: Vec<Vec<f64>>,
    endpoints: &Endpoints,
    strategy: Strategy,
    tuning: &Tuning,
) -> Result<Itinerary, SolveError> {
    if places.len() <= 1 {
        return Ok(Itinerary::trivial(places));
    }

    let matrices = TravelMatrices::new(distances, durations)?;
    if matrices.len() != places.len() {
        return Err(SolveError::PlaceCountMismatch {
            places: places.len(),
            dimension: matrices.len(),
        });
    }
    endpoints.validate(matrices.len())?;

    let order = match strategy {
        Strategy::NearestNeighbor => NearestNeighbor::new().search(&matrices, endpoints),
        Strategy::TwoOpt => TwoOpt::with_max_passes(tuning.max_passes).search(&matrices, endpoints),
        Strategy::Genetic => Genetic::with_config(tuning.ga.clone()).search(&matrices, endpoints),
    };

    info!(
        "{} visited {} stops at cost {:.1}",
        strategy,
        order.len(),
        matrices.path_cost(&order)
    );

    Ok(Itinerary::from_tour(order, places, &matrices))
}
