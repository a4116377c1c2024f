//! Fit a polygon's bounding box into a convex quadrilateral.
//!
//! Given a convex quad (4 points) and a polygon (N >= 1 points), find the largest uniform
//! scale `a ∈ [0, 1]` and a translation `(x, y)` such that every polygon vertex, offset
//! from the polygon box's min corner, scaled by `a` and moved to `(x, y)`, lies inside
//! the quad. The answer is returned as the fitted axis-aligned box.
//!
//! Layout
//! - `geom`: points, boxes, validated quads, seeded samplers.
//! - `solver`: prioritized linear constraint session over `(x, y, a)`.
//! - `fit`: row construction, orchestration and the flat `8 + 2N` input layout.

pub mod api;
pub mod fit;
pub mod geom;
pub mod solver;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use fit::{fit_flat, fit_polygon_in_quad, FitCfg, FitError, FitResult, Fitter};
pub use geom::{Aabb2, Quad, Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::fit::{
        fit_flat, fit_in_quad, fit_polygon_in_quad, FitCfg, FitError, FitResult, FitVariables,
        Fitter,
    };
    pub use crate::geom::{Aabb2, Quad, QuadError, Vec2};
    pub use crate::solver::{Session, SolverCfg};
    pub use nalgebra::Vector2;
}
