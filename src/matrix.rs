//! Travel matrices and path cost evaluation.
//!
//! Wraps the precomputed pairwise distance and duration matrices supplied by
//! the caller and provides the path-cost function every strategy uses as its
//! fitness. Matrices need not be symmetric.

use crate::error::SolveError;
use serde::{Deserialize, Serialize};

/// Validated distance/duration matrix pair.
///
/// `distance[i][j]` is the travel cost from place `i` to place `j`;
/// `duration[i][j]` is the parallel travel time. Both are square, equal
/// in shape, free of NaN, and non-negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelMatrices {
    distance: Vec<Vec<f64>>,
    duration: Vec<Vec<f64>>,
}

impl TravelMatrices {
    /// Validate and wrap a distance/duration matrix pair.
    pub fn new(distance: Vec<Vec<f64>>, duration: Vec<Vec<f64>>) -> Result<Self, SolveError> {
        if distance.len() != duration.len() {
            return Err(SolveError::MatrixShapeMismatch {
                distance_rows: distance.len(),
                duration_rows: duration.len(),
            });
        }

        Self::check_square(&distance)?;
        Self::check_square(&duration)?;
        Self::check_entries("distance", &distance)?;
        Self::check_entries("duration", &duration)?;

        Ok(TravelMatrices { distance, duration })
    }

    fn check_square(matrix: &[Vec<f64>]) -> Result<(), SolveError> {
        let n = matrix.len();
        for (row, entries) in matrix.iter().enumerate() {
            if entries.len() != n {
                return Err(SolveError::MatrixNotSquare {
                    row,
                    len: entries.len(),
                    expected: n,
                });
            }
        }
        Ok(())
    }

    fn check_entries(name: &'static str, matrix: &[Vec<f64>]) -> Result<(), SolveError> {
        for (row, entries) in matrix.iter().enumerate() {
            for (col, &value) in entries.iter().enumerate() {
                if value.is_nan() {
                    return Err(SolveError::MatrixNan {
                        matrix: name,
                        row,
                        col,
                    });
                }
                if value < 0.0 {
                    return Err(SolveError::MatrixNegative {
                        matrix: name,
                        row,
                        col,
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    /// Number of places covered by the matrices.
    #[inline]
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// Travel cost from place `i` to place `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distance[i][j]
    }

    /// Travel time from place `i` to place `j`.
    #[inline]
    pub fn duration(&self, i: usize, j: usize) -> f64 {
        self.duration[i][j]
    }

    /// Total travel cost of a path: the sum over consecutive pairs, in
    /// index order. Every strategy compares tours through this one
    /// function so their results stay numerically comparable.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.distance(w[0], w[1])).sum()
    }

    /// Total travel time of a path, parallel to [`path_cost`](Self::path_cost).
    pub fn path_duration(&self, path: &[usize]) -> f64 {
        path.windows(2).map(|w| self.duration(w[0], w[1])).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(values: &[&[f64]]) -> Vec<Vec<f64>> {
        values.iter().map(|row| row.to_vec()).collect()
    }

    #[test]
    fn test_path_cost_sums_consecutive_pairs() {
        let distance = square(&[&[0.0, 10.0, 15.0], &[10.0, 0.0, 35.0], &[15.0, 35.0, 0.0]]);
        let duration = square(&[&[0.0, 1.0, 2.0], &[1.0, 0.0, 3.0], &[2.0, 3.0, 0.0]]);
        let matrices = TravelMatrices::new(distance, duration).unwrap();

        assert_eq!(matrices.path_cost(&[0, 1, 2]), 45.0);
        assert_eq!(matrices.path_duration(&[0, 1, 2]), 4.0);
        assert_eq!(matrices.path_cost(&[0]), 0.0);
        assert_eq!(matrices.path_cost(&[]), 0.0);
    }

    #[test]
    fn test_rejects_non_square_matrix() {
        let distance = vec![vec![0.0, 1.0], vec![1.0]];
        let duration = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let err = TravelMatrices::new(distance, duration).unwrap_err();
        assert_eq!(
            err,
            SolveError::MatrixNotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn test_rejects_shape_mismatch() {
        let distance = vec![vec![0.0]];
        let duration = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let err = TravelMatrices::new(distance, duration).unwrap_err();
        assert!(matches!(err, SolveError::MatrixShapeMismatch { .. }));
    }

    #[test]
    fn test_rejects_nan_and_negative_entries() {
        let duration = vec![vec![0.0, 1.0], vec![1.0, 0.0]];

        let distance = vec![vec![0.0, f64::NAN], vec![1.0, 0.0]];
        let err = TravelMatrices::new(distance, duration.clone()).unwrap_err();
        assert_eq!(
            err,
            SolveError::MatrixNan {
                matrix: "distance",
                row: 0,
                col: 1
            }
        );

        let distance = vec![vec![0.0, 1.0], vec![-2.0, 0.0]];
        let err = TravelMatrices::new(distance, duration).unwrap_err();
        assert!(matches!(
            err,
            SolveError::MatrixNegative {
                matrix: "distance",
                row: 1,
                col: 0,
                ..
            }
        ));
    }
}
