//! 2-opt local search over a constructed tour.
//!
//! First-improvement with restart: scan all candidate edge exchanges in a
//! fixed nested order, accept the first strict improvement, then restart
//! the scan. `max_passes` bounds the number of scans and is the only
//! termination guarantee. Deterministic: no randomness anywhere.

use crate::constraint::Endpoints;
use crate::heuristics::{NearestNeighbor, TourSearch};
use crate::matrix::TravelMatrices;

/// 2-opt refinement of a tour, respecting fixed endpoint positions.
#[derive(Debug, Clone, Copy)]
pub struct TwoOpt {
    /// Maximum number of full scans before giving up.
    pub max_passes: usize,
}

impl TwoOpt {
    pub fn new() -> Self {
        TwoOpt { max_passes: 50 }
    }

    pub fn with_max_passes(max_passes: usize) -> Self {
        TwoOpt { max_passes }
    }

    /// Improve `tour` by exchanging edges until no strict improvement is
    /// found in a complete scan, or `max_passes` scans have run.
    ///
    /// Position 0 is fixed when a start is set; the last position is fixed
    /// when an end is set and the tour does not return to its start. An
    /// exchange reversing `[i, k]` is rejected whenever a fixed position
    /// falls inside that range. Tours of length 3 or less have no valid
    /// interior exchange and are returned unchanged.
    pub fn refine(
        &self,
        tour: Vec<usize>,
        matrices: &TravelMatrices,
        endpoints: &Endpoints,
    ) -> Vec<usize> {
        let len = tour.len();
        if len <= 3 {
            return tour;
        }

        let mut fixed = Vec::with_capacity(2);
        if endpoints.start.is_some() {
            fixed.push(0);
        }
        if endpoints.end.is_some() && !endpoints.return_to_start {
            fixed.push(len - 1);
        }

        let mut best = tour;
        let mut best_cost = matrices.path_cost(&best);
        let mut improved = true;
        let mut passes = 0;

        while improved && passes < self.max_passes {
            improved = false;
            passes += 1;

            'scan: for i in 1..len - 2 {
                for k in i + 1..len - 1 {
                    if fixed.iter().any(|&pos| pos >= i && pos <= k) {
                        continue;
                    }

                    let mut candidate = best.clone();
                    candidate[i..=k].reverse();
                    let cost = matrices.path_cost(&candidate);

                    if cost < best_cost {
                        best = candidate;
                        best_cost = cost;
                        improved = true;
                        break 'scan;
                    }
                }
            }
        }

        log::debug!("2-opt finished after {} passes, cost {:.3}", passes, best_cost);
        best
    }
}

impl Default for TwoOpt {
    fn default() -> Self {
        Self::new()
    }
}

impl TourSearch for TwoOpt {
    /// Seed with a nearest-neighbor construction, then refine it.
    fn search(&self, matrices: &TravelMatrices, endpoints: &Endpoints) -> Vec<usize> {
        let seed = NearestNeighbor::new().construct(matrices, endpoints);
        self.refine(seed, matrices, endpoints)
    }

    fn name(&self) -> &'static str {
        "2-opt"
    }
}
