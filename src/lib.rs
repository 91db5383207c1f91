//! Route Solver Library
//!
//! Computes a near-optimal visiting order over a set of places given
//! precomputed pairwise distance and duration matrices.
//!
//! # Features
//!
//! - Greedy nearest-neighbor construction (deterministic)
//! - 2-opt local search refinement
//! - Genetic metaheuristic (seeded, reproducible)
//! - One shared constraint model: fixed start, fixed end, return to start
//! - Itinerary assembly with per-leg distances/durations and totals
//!
//! # Example
//!
//! ```
//! use route_solver::{optimize, Endpoints, Strategy, Tuning, Waypoint};
//!
//! let places = vec![
//!     Waypoint::new("Museum", 48.8606, 2.3376),
//!     Waypoint::new("Tower", 48.8584, 2.2945),
//!     Waypoint::new("Cathedral", 48.8530, 2.3499),
//! ];
//! let distances = vec![
//!     vec![0.0, 3200.0, 1100.0],
//!     vec![3200.0, 0.0, 4100.0],
//!     vec![1100.0, 4100.0, 0.0],
//! ];
//! let durations = vec![
//!     vec![0.0, 700.0, 250.0],
//!     vec![700.0, 0.0, 900.0],
//!     vec![250.0, 900.0, 0.0],
//! ];
//!
//! let itinerary = optimize(
//!     &places,
//!     distances,
//!     durations,
//!     &Endpoints::round_trip(),
//!     Strategy::TwoOpt,
//!     &Tuning::default(),
//! )
//! .unwrap();
//!
//! println!("total distance: {}", itinerary.total_distance);
//! ```

pub mod constraint;
pub mod error;
pub mod heuristics;
pub mod itinerary;
pub mod matrix;
pub mod planner;

pub use constraint::Endpoints;
pub use error::SolveError;
pub use itinerary::{Itinerary, RouteStep, Waypoint};
pub use matrix::TravelMatrices;
pub use planner::{optimize, Strategy, Tuning};
