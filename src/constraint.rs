//! Endpoint constraints and the fixed-position tour layout.
//!
//! Every strategy honors the same constraint model: an optional fixed start,
//! an optional fixed end, and a return-to-start flag. The [`TourLayout`]
//! resolves that constraint against a concrete problem size, recording which
//! positions of the tour are pinned and to which places. It is computed once
//! per optimization run and passed into every operator that must respect it.

use crate::error::SolveError;
use serde::{Deserialize, Serialize};

/// Endpoint constraints for a single optimization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Place that must be visited first.
    pub start: Option<usize>,
    /// Place that must be visited last (before any return leg).
    pub end: Option<usize>,
    /// Whether the tour closes back on its first place.
    pub return_to_start: bool,
}

impl Endpoints {
    /// No fixed endpoints, open tour.
    pub fn free() -> Self {
        Endpoints::default()
    }

    /// Closed tour with a free choice of start.
    pub fn round_trip() -> Self {
        Endpoints {
            return_to_start: true,
            ..Endpoints::default()
        }
    }

    /// Tour starting at `start`.
    pub fn from_start(start: usize) -> Self {
        Endpoints {
            start: Some(start),
            ..Endpoints::default()
        }
    }

    /// Check the constraint against a problem of `n` places.
    ///
    /// Rejects out-of-bounds indices, and rejects a distinct fixed start and
    /// end combined with `return_to_start`: the intended tour shape for that
    /// combination is undefined, so it is surfaced instead of guessed.
    pub fn validate(&self, n: usize) -> Result<(), SolveError> {
        if let Some(start) = self.start {
            if start >= n {
                return Err(SolveError::EndpointOutOfBounds {
                    which: "start",
                    index: start,
                    len: n,
                });
            }
        }
        if let Some(end) = self.end {
            if end >= n {
                return Err(SolveError::EndpointOutOfBounds {
                    which: "end",
                    index: end,
                    len: n,
                });
            }
        }
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if self.return_to_start && start != end {
                return Err(SolveError::UnsupportedConstraint);
            }
        }
        Ok(())
    }

    /// Whether the tour carries a trailing repeat of its first place.
    pub fn closes_tour(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start == end,
            _ => self.return_to_start,
        }
    }
}

/// Fixed-position mask for tours of one concrete problem.
///
/// Resolves an [`Endpoints`] constraint against `n` places: the expected tour
/// length, the pinned positions, and whether the trailing position mirrors
/// position 0 (the return-to-start placeholder used when no start is
/// pinned). Built once per run; the genetic operators only read it.
#[derive(Debug, Clone)]
pub struct TourLayout {
    n: usize,
    len: usize,
    pinned: Vec<Option<usize>>,
    mirror_last: bool,
}

impl TourLayout {
    /// Resolve `endpoints` against a problem of `n` places.
    ///
    /// Assumes the constraint has already passed [`Endpoints::validate`].
    pub fn new(n: usize, endpoints: &Endpoints) -> Self {
        let closes = endpoints.closes_tour();
        let len = if n == 0 { 0 } else { n + closes as usize };

        let mut pinned = vec![None; len];
        let mut mirror_last = false;

        if len > 0 {
            match (endpoints.start, endpoints.end) {
                (Some(start), Some(end)) => {
                    pinned[0] = Some(start);
                    pinned[len - 1] = Some(end);
                }
                (Some(start), None) => {
                    pinned[0] = Some(start);
                    if closes {
                        pinned[len - 1] = Some(start);
                    }
                }
                (None, Some(end)) => {
                    if closes {
                        // [free..., end, repeat-of-first]: the trailing slot
                        // tracks whatever place ends up first.
                        pinned[len - 2] = Some(end);
                        mirror_last = true;
                    } else {
                        pinned[len - 1] = Some(end);
                    }
                }
                (None, None) => {
                    mirror_last = closes;
                }
            }
        }

        TourLayout {
            n,
            len,
            pinned,
            mirror_last,
        }
    }

    /// Expected tour length, including any trailing repeat.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The place pinned at `pos`, if any.
    #[inline]
    pub fn pinned_at(&self, pos: usize) -> Option<usize> {
        self.pinned[pos]
    }

    /// Whether the trailing position repeats whatever place is first.
    #[inline]
    pub fn mirrors_last(&self) -> bool {
        self.mirror_last
    }

    /// Whether `place` occupies a pinned position.
    pub fn is_pinned_place(&self, place: usize) -> bool {
        self.pinned.iter().any(|&p| p == Some(place))
    }

    /// Positions the operators may rearrange: everything that is neither
    /// pinned nor the mirrored trailing slot. Always contiguous.
    pub fn free_positions(&self) -> Vec<usize> {
        (0..self.len)
            .filter(|&pos| self.pinned[pos].is_none())
            .filter(|&pos| !(self.mirror_last && pos == self.len - 1))
            .collect()
    }

    /// Places that may occupy free positions, ascending.
    pub fn free_places(&self) -> Vec<usize> {
        (0..self.n).filter(|&p| !self.is_pinned_place(p)).collect()
    }
}
