//! Validated convex quadrilateral (`Quad`).
//!
//! Winding
//! - The half-plane test used by the fit is `cross(q_j - q_i, p - q_i) <= 0` for every
//!   directed edge `(q_i, q_j)`. That reads "inside" exactly when the shoelace area of the
//!   vertex sequence is negative (clockwise on screen, y down; counterclockwise with y up).
//! - `Quad::new` accepts either orientation and stores the vertices in that order,
//!   reversing the sequence (keeping the first vertex) when needed.
//!
//! Validation
//! - Finite coordinates, non-zero area and convexity (no reflex turn, no bowtie).
//!   Collinear consecutive edges are accepted as long as the area is non-zero.

use std::fmt;

use super::types::{Aabb2, Vec2};

/// Default relative area tolerance (`|area| <= eps * extent²` counts as degenerate).
pub const DEFAULT_EPS_AREA: f64 = 1e-12;

/// Reasons a vertex sequence is not a usable quadrilateral.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuadError {
    NonFinite,
    Degenerate,
    NonConvex,
}

impl fmt::Display for QuadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadError::NonFinite => write!(f, "quad has non-finite coordinates"),
            QuadError::Degenerate => write!(f, "quad has zero area"),
            QuadError::NonConvex => write!(f, "quad is not convex"),
        }
    }
}

impl std::error::Error for QuadError {}

/// 2D cross product `a × b`.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Twice the shoelace area of a closed vertex sequence (sign encodes winding).
pub fn signed_area2(points: &[Vec2]) -> f64 {
    let n = points.len();
    (0..n).map(|i| cross(points[i], points[(i + 1) % n])).sum()
}

/// True when every turn of the closed sequence has the sign of `orientation`
/// (or is collinear within `eps`).
pub fn is_convex(points: &[Vec2], orientation: f64, eps: f64) -> bool {
    let n = points.len();
    (0..n).all(|i| {
        let a = points[i];
        let b = points[(i + 1) % n];
        let c = points[(i + 2) % n];
        cross(b - a, c - b) * orientation.signum() >= -eps
    })
}

/// Convex quadrilateral stored in "inside is `<= 0`" winding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pts: [Vec2; 4],
}

impl Quad {
    /// Validate with the default area tolerance.
    pub fn new(points: [Vec2; 4]) -> Result<Self, QuadError> {
        Self::with_eps(points, DEFAULT_EPS_AREA)
    }

    /// Validate, rejecting `|area| <= eps_area * extent²` as degenerate.
    pub fn with_eps(points: [Vec2; 4], eps_area: f64) -> Result<Self, QuadError> {
        if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(QuadError::NonFinite);
        }
        let extent = Aabb2::from_points(&points)
            .map(|b| b.extent())
            .unwrap_or(0.0);
        let tol = eps_area * extent * extent;
        let area2 = signed_area2(&points);
        if extent <= 0.0 || area2.abs() <= tol {
            return Err(QuadError::Degenerate);
        }
        if !is_convex(&points, area2, tol) {
            return Err(QuadError::NonConvex);
        }
        let pts = if area2 > 0.0 {
            [points[0], points[3], points[2], points[1]]
        } else {
            points
        };
        Ok(Self { pts })
    }

    /// Vertices in stored (normalized) order.
    #[inline]
    pub fn points(&self) -> &[Vec2; 4] {
        &self.pts
    }

    /// Directed edges `(q_i, q_{i+1 mod 4})` in stored order.
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        (0..4).map(move |i| (self.pts[i], self.pts[(i + 1) % 4]))
    }

    /// Twice the signed area; always negative for a constructed `Quad`.
    #[inline]
    pub fn signed_area2(&self) -> f64 {
        signed_area2(&self.pts)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        0.5 * self.signed_area2().abs()
    }

    pub fn aabb(&self) -> Aabb2 {
        let [a, b, c, d] = self.pts;
        Aabb2::new(a.inf(&b).inf(&c).inf(&d), a.sup(&b).sup(&c).sup(&d))
    }

    /// Half-plane membership with absolute slack `eps` per edge (scaled by edge length).
    pub fn contains_eps(&self, p: Vec2, eps: f64) -> bool {
        self.edges()
            .all(|(qi, qj)| cross(qj - qi, p - qi) <= eps * (qj - qi).norm())
    }

    pub fn translated(&self, t: Vec2) -> Self {
        Self {
            pts: self.pts.map(|p| p + t),
        }
    }

    /// Uniform scale about the bounding-box center. `k > 0` keeps the winding.
    pub fn scaled_about_center(&self, k: f64) -> Self {
        let c = self.aabb().center();
        Self {
            pts: self.pts.map(|p| c + (p - c) * k),
        }
    }
}
