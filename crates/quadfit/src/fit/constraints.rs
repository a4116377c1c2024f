//! Constraint construction for the fit unknowns `(x, y, a)`.
//!
//! - Bounds: translation inside the quad's box, scale in `[0, 1]` (6 rows).
//! - Containment: for every polygon vertex `p` (offset `d = p - polygon_min`) and every
//!   directed quad edge `(q_i, q_j)`:
//!   `e.x (y + a d.y - q_i.y) - e.y (x + a d.x - q_i.x) <= 0` with `e = q_j - q_i`,
//!   i.e. `n · (x, y, a) <= c` with `n = (-e.y, e.x, e × d)` and `c = e × q_i` (4N rows).
//!
//! Rows of one edge share `n.x`, `n.y` and `c` bit for bit; the solver presolve relies on that.

use nalgebra::Vector3;

use crate::geom::{cross, Aabb2, Quad, Vec2};
use crate::solver::{Constraint, SolveError, Session, Strength, Var};

use super::error::FitError;

/// Box bounds on `x`, `y` and the unit interval for `a`.
pub fn bound_constraints(quad_box: &Aabb2) -> [Constraint; 6] {
    [
        Constraint::var_ge(Var::X, quad_box.min.x),
        Constraint::var_le(Var::X, quad_box.max.x),
        Constraint::var_ge(Var::Y, quad_box.min.y),
        Constraint::var_le(Var::Y, quad_box.max.y),
        Constraint::var_ge(Var::A, 0.0),
        Constraint::var_le(Var::A, 1.0),
    ]
}

/// Half-plane row keeping the transformed offset `d` on the inner side of edge `(qi, qj)`.
#[inline]
pub fn edge_row(qi: Vec2, qj: Vec2, d: Vec2) -> Constraint {
    let e = qj - qi;
    Constraint::le(Vector3::new(-e.y, e.x, cross(e, d)), cross(e, qi))
}

/// One row per (polygon vertex, quad edge), vertex-major.
pub fn containment_constraints(
    quad: &Quad,
    polygon: &[Vec2],
    polygon_box: &Aabb2,
) -> Vec<Constraint> {
    let mut rows = Vec::with_capacity(4 * polygon.len());
    for p in polygon {
        let d = p - polygon_box.min;
        rows.extend(quad.edges().map(|(qi, qj)| edge_row(qi, qj, d)));
    }
    rows
}

/// Everything derived from one `(quad, polygon)` pair before resolution.
#[derive(Clone, Debug)]
pub struct FitProblem {
    pub quad_box: Aabb2,
    pub polygon_box: Aabb2,
    pub rows: Vec<Constraint>,
}

impl FitProblem {
    pub fn new(quad: &Quad, polygon: &[Vec2]) -> Result<Self, FitError> {
        let polygon_box = Aabb2::from_points(polygon).ok_or(FitError::EmptyPolygon)?;
        let quad_box = quad.aabb();
        let mut rows = Vec::with_capacity(6 + 4 * polygon.len());
        rows.extend(bound_constraints(&quad_box));
        rows.extend(containment_constraints(quad, polygon, &polygon_box));
        Ok(Self {
            quad_box,
            polygon_box,
            rows,
        })
    }

    /// Polygon box size, the extent scaled by `a`.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.polygon_box.size()
    }

    /// Reset `session` and load rows plus edit variables:
    /// `x, y` weak toward the polygon's min corner, `a` strong toward 1.
    pub fn submit(&self, session: &mut Session) -> Result<(), SolveError> {
        session.reset();
        session.add_constraints(self.rows.iter().copied());
        session.add_edit_variable(Var::X, Strength::Weak)?;
        session.add_edit_variable(Var::Y, Strength::Weak)?;
        session.add_edit_variable(Var::A, Strength::Strong)?;
        session.suggest_value(Var::X, self.polygon_box.min.x)?;
        session.suggest_value(Var::Y, self.polygon_box.min.y)?;
        session.suggest_value(Var::A, 1.0)?;
        Ok(())
    }
}
