//! Fit orchestration: validate, build rows, resolve, read back.
//!
//! Result: with `(x, y, a)` resolved, the fitted box is
//! `[(x, y), (x + size.x · a, y + size.y · a)]` where `size` is the polygon box size.

use crate::geom::{Aabb2, Quad, Vec2, DEFAULT_EPS_AREA};
use crate::solver::{Session, SolverCfg, Var};

use super::constraints::FitProblem;
use super::error::FitError;
use super::input::decode_flat;

/// Fit configuration (tolerances).
#[derive(Clone, Copy, Debug)]
pub struct FitCfg {
    /// Relative area below which a quad counts as degenerate.
    pub eps_area: f64,
    pub solver: SolverCfg,
}

impl Default for FitCfg {
    fn default() -> Self {
        Self {
            eps_area: DEFAULT_EPS_AREA,
            solver: SolverCfg::default(),
        }
    }
}

/// Resolved unknowns: translation of the polygon box min corner and uniform scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitVariables {
    pub x: f64,
    pub y: f64,
    pub a: f64,
}

/// Fitted box plus the unknowns that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitResult {
    pub aabb: Aabb2,
    pub vars: FitVariables,
}

impl FitResult {
    #[inline]
    pub fn scale(&self) -> f64 {
        self.vars.a
    }

    #[inline]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.vars.x, self.vars.y)
    }

    /// Where polygon vertex `p` lands: `(x, y) + a · (p - polygon_min)`.
    #[inline]
    pub fn map_point(&self, p: Vec2, polygon_min: Vec2) -> Vec2 {
        self.translation() + (p - polygon_min) * self.vars.a
    }
}

/// Fit engine owning its solver session; reuse it for many fits on one thread.
#[derive(Clone, Debug, Default)]
pub struct Fitter {
    cfg: FitCfg,
    session: Session,
}

impl Fitter {
    pub fn new(cfg: FitCfg) -> Self {
        Self {
            cfg,
            session: Session::new(cfg.solver),
        }
    }

    pub fn fit(&mut self, quad: &[Vec2; 4], polygon: &[Vec2]) -> Result<FitResult, FitError> {
        let quad = Quad::with_eps(*quad, self.cfg.eps_area)?;
        fit_in_quad(&mut self.session, &quad, polygon)
    }

    pub fn fit_flat(&mut self, values: &[f64]) -> Result<FitResult, FitError> {
        let (quad, polygon) = decode_flat(values)?;
        self.fit(&quad, &polygon)
    }
}

/// Fit `polygon` into `quad` with default tolerances and a fresh session.
pub fn fit_polygon_in_quad(quad: &[Vec2; 4], polygon: &[Vec2]) -> Result<FitResult, FitError> {
    Fitter::default().fit(quad, polygon)
}

/// Same as `fit_polygon_in_quad` on the flat layout `8 + 2N`.
pub fn fit_flat(values: &[f64]) -> Result<FitResult, FitError> {
    Fitter::default().fit_flat(values)
}

/// Fit against an already validated quad, reusing `session` (reset on entry).
pub fn fit_in_quad(
    session: &mut Session,
    quad: &Quad,
    polygon: &[Vec2],
) -> Result<FitResult, FitError> {
    if polygon.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(FitError::NonFinite);
    }
    let problem = FitProblem::new(quad, polygon)?;
    problem.submit(session)?;
    session.update_variables()?;

    let vars = FitVariables {
        x: session.value(Var::X),
        y: session.value(Var::Y),
        a: session.value(Var::A).clamp(0.0, 1.0),
    };
    let min = Vec2::new(vars.x, vars.y);
    let aabb = Aabb2::new(min, min + problem.size() * vars.a);
    tracing::debug!(
        vertices = polygon.len(),
        x = vars.x,
        y = vars.y,
        a = vars.a,
        "fit resolved"
    );
    Ok(FitResult { aabb, vars })
}
