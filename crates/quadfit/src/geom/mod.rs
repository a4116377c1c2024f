//! Plane geometry for the fit: points, boxes and validated convex quads.
//!
//! - `Vec2`, `Aabb2`: value types; `Aabb2::from_points` is the bounding-box reduction.
//! - `Quad`: convex quadrilateral with normalized winding and directed edges.
//! - `rand`: seeded samplers for fixtures.

mod quad;
pub mod rand;
mod types;

pub use quad::{cross, is_convex, signed_area2, Quad, QuadError, DEFAULT_EPS_AREA};
pub use types::{Aabb2, Vec2};
