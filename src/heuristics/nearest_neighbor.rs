//! Greedy nearest-neighbor tour construction.
//!
//! Builds an initial feasible tour for any combination of fixed start, fixed
//! end, and return-to-start. When an endpoint is left free the constructor
//! tries every candidate and keeps the cheapest result, which makes the
//! free-endpoint variants O(n³) against O(n²) for the fixed-start ones.
//! Entirely deterministic: ties on travel cost go to the lowest place index.

use crate::constraint::Endpoints;
use crate::heuristics::TourSearch;
use crate::matrix::TravelMatrices;
use ordered_float::OrderedFloat;

/// Nearest-neighbor construction heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbor;

impl NearestNeighbor {
    pub fn new() -> Self {
        NearestNeighbor
    }

    /// Build a tour honoring `endpoints`.
    pub fn construct(&self, matrices: &TravelMatrices, endpoints: &Endpoints) -> Vec<usize> {
        let n = matrices.len();
        if n == 0 {
            return Vec::new();
        }

        match (endpoints.start, endpoints.end) {
            (Some(start), Some(end)) => self.fixed_both(matrices, start, end),
            (Some(start), None) => self.fixed_start(matrices, start, endpoints.return_to_start),
            (None, Some(end)) => self.fixed_end(matrices, end, endpoints.return_to_start),
            (None, None) => self.free(matrices, endpoints.return_to_start),
        }
    }

    /// Greedy extension from `start`: repeatedly visit the cheapest
    /// unvisited place. `exclude` is reserved for a fixed end appended by
    /// the caller afterwards.
    fn greedy_path(
        &self,
        matrices: &TravelMatrices,
        start: usize,
        exclude: Option<usize>,
    ) -> Vec<usize> {
        let n = matrices.len();
        let mut visited = vec![false; n];
        visited[start] = true;
        if let Some(excluded) = exclude {
            visited[excluded] = true;
        }

        let mut path = vec![start];
        let mut current = start;

        while let Some(next) = (0..n)
            .filter(|&j| !visited[j])
            .min_by_key(|&j| OrderedFloat(matrices.distance(current, j)))
        {
            visited[next] = true;
            path.push(next);
            current = next;
        }

        path
    }

    /// Both endpoints fixed: one greedy pass over the interior places.
    /// Equal endpoints produce the degenerate closed tour `[s, ..., s]`.
    fn fixed_both(&self, matrices: &TravelMatrices, start: usize, end: usize) -> Vec<usize> {
        if matrices.len() == 1 {
            return vec![start];
        }

        let mut path = self.greedy_path(matrices, start, Some(end).filter(|&e| e != start));
        path.push(end);
        path
    }

    /// Start fixed: one greedy pass, trailing repeat when returning.
    fn fixed_start(
        &self,
        matrices: &TravelMatrices,
        start: usize,
        return_to_start: bool,
    ) -> Vec<usize> {
        if matrices.len() == 1 {
            return vec![start];
        }

        let mut path = self.greedy_path(matrices, start, None);
        if return_to_start {
            path.push(start);
        }
        path
    }

    /// End fixed: try every candidate start, greedy over the rest, append
    /// the end (and the candidate start again when returning); cheapest
    /// candidate wins.
    fn fixed_end(&self, matrices: &TravelMatrices, end: usize, return_to_start: bool) -> Vec<usize> {
        let n = matrices.len();
        if n == 1 {
            return vec![end];
        }

        let mut best: Option<Vec<usize>> = None;
        let mut best_cost = f64::INFINITY;

        for start in (0..n).filter(|&s| s != end) {
            let mut path = self.greedy_path(matrices, start, Some(end));
            path.push(end);

            if return_to_start {
                path.push(start);
            }
            let cost = matrices.path_cost(&path);

            if cost < best_cost {
                best_cost = cost;
                best = Some(path);
            }
        }

        best.unwrap_or_else(|| vec![end])
    }

    /// Neither endpoint fixed: exhaustive start search, open or closed.
    fn free(&self, matrices: &TravelMatrices, return_to_start: bool) -> Vec<usize> {
        let n = matrices.len();
        if n == 1 {
            return vec![0];
        }

        let mut best: Option<Vec<usize>> = None;
        let mut best_cost = f64::INFINITY;

        for start in 0..n {
            let mut path = self.greedy_path(matrices, start, None);
            if return_to_start {
                path.push(start);
            }
            let cost = matrices.path_cost(&path);

            if cost < best_cost {
                best_cost = cost;
                best = Some(path);
            }
        }

        best.unwrap_or_else(|| (0..n).collect())
    }
}

impl TourSearch for NearestNeighbor {
    fn search(&self, matrices: &TravelMatrices, endpoints: &Endpoints) -> Vec<usize> {
        self.construct(matrices, endpoints)
    }

    fn name(&self) -> &'static str {
        "nearest-neighbor"
    }
}
