use std::fmt;

use crate::geom::QuadError;
use crate::solver::SolveError;

/// Errors surfaced by the fit entry points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitError {
    /// Flat input whose length is not `8 + 2N` with `N >= 1`.
    MalformedInput { len: usize },
    EmptyPolygon,
    NonFinite,
    DegenerateQuad,
    NonConvexQuad,
    Solve(SolveError),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::MalformedInput { len } => write!(
                f,
                "expected 8 quad coordinates plus an even, non-zero number of polygon coordinates, got {len} values"
            ),
            FitError::EmptyPolygon => write!(f, "polygon has no vertices"),
            FitError::NonFinite => write!(f, "input contains non-finite coordinates"),
            FitError::DegenerateQuad => write!(f, "quad has zero area"),
            FitError::NonConvexQuad => write!(f, "quad is not convex"),
            FitError::Solve(e) => write!(f, "constraint resolution failed: {e}"),
        }
    }
}

impl std::error::Error for FitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FitError::Solve(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SolveError> for FitError {
    fn from(e: SolveError) -> Self {
        FitError::Solve(e)
    }
}

impl From<QuadError> for FitError {
    fn from(e: QuadError) -> Self {
        match e {
            QuadError::NonFinite => FitError::NonFinite,
            QuadError::Degenerate => FitError::DegenerateQuad,
            QuadError::NonConvex => FitError::NonConvexQuad,
        }
    }
}
