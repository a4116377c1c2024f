//! Fit Engine: largest uniform scale and best translation of a polygon's bounding box
//! inside a convex quad.
//!
//! Pipeline
//! 1. Boxes: quad box bounds the translation; polygon box gives the offsets and size.
//! 2. Rows: 6 bounds plus 4 half-plane rows per polygon vertex (`constraints`).
//! 3. Resolution: `a` strong toward 1, `(x, y)` weak toward the polygon min corner,
//!    then read back `(x, y, a)` and build the fitted box (`engine`).
//!
//! Degenerate inputs
//! - Zero-size polygon boxes fit at `a = 1` (containment rows no longer involve `a`).
//! - Degenerate or non-convex quads are rejected before any row is built.

mod constraints;
mod engine;
mod error;
mod input;

pub use constraints::{bound_constraints, containment_constraints, edge_row, FitProblem};
pub use engine::{
    fit_flat, fit_in_quad, fit_polygon_in_quad, FitCfg, FitResult, FitVariables, Fitter,
};
pub use error::FitError;
pub use input::{decode_flat, encode_flat};
