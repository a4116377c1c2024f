//! Curated surface for callers that build their own pipelines.
//!
//! Prefer `crate::prelude` for plain fitting; this module also exposes the row
//! builders and the solver session so callers can add rows of their own.

// Geometry
pub use crate::geom::rand::{draw_polygon, draw_quad, draw_quad_points, PolygonCfg, QuadCfg};
pub use crate::geom::{cross, is_convex, signed_area2, Aabb2, Quad, QuadError, Vec2};
// Rows and orchestration
pub use crate::fit::{
    bound_constraints, containment_constraints, decode_flat, edge_row, encode_flat, fit_in_quad,
    FitProblem, FitVariables,
};
// Solver session
pub use crate::solver::{Constraint, Session, SolveError, SolverCfg, Strength, Var};
