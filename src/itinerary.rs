//! Itinerary representation: the ordered travel segments derived from a tour.
//!
//! An [`Itinerary`] is fully derived from a visiting order and the travel
//! matrices; it carries the reordered place payloads for rendering but the
//! optimization itself never looks inside them.

use crate::matrix::TravelMatrices;
use serde::{Deserialize, Serialize};

/// A place to visit. Opaque payload: the strategies only ever see its index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl Waypoint {
    pub fn new(name: &str, latitude: f64, longitude: f64) -> Self {
        Waypoint {
            name: name.to_string(),
            latitude,
            longitude,
            address: None,
        }
    }
}

/// One leg of the itinerary, from one place to the next in visiting order.
///
/// Distance and duration are rounded to whole units (whatever unit the
/// caller's matrices are in, typically meters and seconds).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteStep {
    pub from_index: usize,
    pub to_index: usize,
    pub from: Waypoint,
    pub to: Waypoint,
    pub distance: i64,
    pub duration: i64,
}

/// The optimized route: visiting order, reordered places, per-leg steps,
/// and aggregate totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    /// Visiting order as indices into the caller's place list.
    pub visiting_order: Vec<usize>,
    /// The places in visiting order.
    pub places: Vec<Waypoint>,
    pub steps: Vec<RouteStep>,
    /// Sum of the rounded step distances.
    pub total_distance: i64,
    /// Sum of the rounded step durations.
    pub total_duration: i64,
}

impl Itinerary {
    /// Itinerary for 0 or 1 places: no legs, zero totals.
    pub fn trivial(places: &[Waypoint]) -> Self {
        Itinerary {
            visiting_order: (0..places.len()).collect(),
            places: places.to_vec(),
            steps: Vec::new(),
            total_distance: 0,
            total_duration: 0,
        }
    }

    /// Build the segment breakdown for a tour.
    pub fn from_tour(order: Vec<usize>, places: &[Waypoint], matrices: &TravelMatrices) -> Self {
        let mut steps = Vec::with_capacity(order.len().saturating_sub(1));
        let mut total_distance = 0i64;
        let mut total_duration = 0i64;

        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let distance = matrices.distance(a, b).round() as i64;
            let duration = matrices.duration(a, b).round() as i64;
            steps.push(RouteStep {
                from_index: a,
                to_index: b,
                from: places[a].clone(),
                to: places[b].clone(),
                distance,
                duration,
            });
            total_distance += distance;
            total_duration += duration;
        }

        Itinerary {
            places: order.iter().map(|&i| places[i].clone()).collect(),
            visiting_order: order,
            steps,
            total_distance,
            total_duration,
        }
    }
}

impl std::fmt::Display for Itinerary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Itinerary ({} stops)", self.visiting_order.len())?;
        for step in &self.steps {
            writeln!(
                f,
                "  {} -> {}  ({} distance, {} duration)",
                step.from.name, step.to.name, step.distance, step.duration
            )?;
        }
        writeln!(f, "  Total distance: {}", self.total_distance)?;
        writeln!(f, "  Total duration: {}", self.total_duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waypoints(n: usize) -> Vec<Waypoint> {
        (0..n)
            .map(|i| Waypoint::new(&format!("P{}", i), i as f64, 0.0))
            .collect()
    }

    #[test]
    fn test_trivial_itinerary_has_zero_totals() {
        let itinerary = Itinerary::trivial(&waypoints(1));
        assert_eq!(itinerary.visiting_order, vec![0]);
        assert!(itinerary.steps.is_empty());
        assert_eq!(itinerary.total_distance, 0);
        assert_eq!(itinerary.total_duration, 0);

        let empty = Itinerary::trivial(&[]);
        assert!(empty.visiting_order.is_empty());
        assert!(empty.places.is_empty());
    }

    #[test]
    fn test_steps_are_rounded_and_totals_summed() {
        let distance = vec![
            vec![0.0, 10.4, 3.0],
            vec![10.4, 0.0, 5.6],
            vec![3.0, 5.6, 0.0],
        ];
        let duration = vec![
            vec![0.0, 2.5, 1.0],
            vec![2.5, 0.0, 3.4],
            vec![1.0, 3.4, 0.0],
        ];
        let matrices = TravelMatrices::new(distance, duration).unwrap();
        let places = waypoints(3);

        let itinerary = Itinerary::from_tour(vec![0, 1, 2], &places, &matrices);
        assert_eq!(itinerary.steps.len(), 2);
        assert_eq!(itinerary.steps[0].distance, 10);
        assert_eq!(itinerary.steps[1].distance, 6);
        assert_eq!(itinerary.total_distance, 16);
        // 2.5 rounds away from zero, 3.4 rounds down.
        assert_eq!(itinerary.steps[0].duration, 3);
        assert_eq!(itinerary.steps[1].duration, 3);
        assert_eq!(itinerary.total_duration, 6);
        assert_eq!(itinerary.places[1].name, "P1");
    }
}
