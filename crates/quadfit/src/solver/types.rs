//! Solver vocabulary: unknowns, strengths, linear rows, tolerances and errors.
//!
//! - `Var`: the three unknowns `x`, `y` (translation) and `a` (scale).
//! - `Constraint`: closed half-space `n · (x, y, a) <= c`.
//! - `Strength`: priority of an edit variable; `Required` acts as a hard equality.

use std::fmt;

use nalgebra::Vector3;

/// Unknown handled by a `Session`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Var {
    X,
    Y,
    A,
}

impl Var {
    pub const ALL: [Var; 3] = [Var::X, Var::Y, Var::A];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Var::X => 0,
            Var::Y => 1,
            Var::A => 2,
        }
    }

    /// Unit coefficient vector selecting this unknown.
    #[inline]
    pub fn unit(self) -> Vector3<f64> {
        let mut n = Vector3::zeros();
        n[self.index()] = 1.0;
        n
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::X => write!(f, "x"),
            Var::Y => write!(f, "y"),
            Var::A => write!(f, "a"),
        }
    }
}

/// Edit-variable priority, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
    Required,
}

/// Closed half-space `n · u <= c` over `u = (x, y, a)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraint {
    pub n: Vector3<f64>,
    pub c: f64,
}

impl Constraint {
    #[inline]
    pub fn le(n: Vector3<f64>, c: f64) -> Self {
        Self { n, c }
    }

    /// `n · u >= c`, stored as `-n · u <= -c`.
    #[inline]
    pub fn ge(n: Vector3<f64>, c: f64) -> Self {
        Self { n: -n, c: -c }
    }

    /// `n · u == c` as a pair of opposite rows.
    #[inline]
    pub fn eq_pair(n: Vector3<f64>, c: f64) -> [Self; 2] {
        [Self::le(n, c), Self::ge(n, c)]
    }

    #[inline]
    pub fn var_le(v: Var, c: f64) -> Self {
        Self::le(v.unit(), c)
    }

    #[inline]
    pub fn var_ge(v: Var, c: f64) -> Self {
        Self::ge(v.unit(), c)
    }

    #[inline]
    pub fn eval(&self, u: Vector3<f64>) -> f64 {
        self.n.dot(&u)
    }

    /// Membership with slack relative to the magnitudes involved.
    #[inline]
    pub fn satisfies_eps(&self, u: Vector3<f64>, eps: f64) -> bool {
        let scale = self.n.abs().dot(&u.abs()) + self.c.abs();
        self.eval(u) - self.c <= eps * scale.max(1.0)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.n.iter().all(|v| v.is_finite()) && self.c.is_finite()
    }

    /// If this row bounds a single unknown from below, return `(var, bound)`.
    pub fn lower_bound(&self) -> Option<(Var, f64)> {
        let mut hit = None;
        for v in Var::ALL {
            let k = self.n[v.index()];
            if k != 0.0 {
                if hit.is_some() {
                    return None;
                }
                hit = Some((v, k));
            }
        }
        match hit {
            Some((v, k)) if k < 0.0 => Some((v, self.c / k)),
            _ => None,
        }
    }
}

/// Solver tolerances.
#[derive(Clone, Copy, Debug)]
pub struct SolverCfg {
    /// Relative slack for row feasibility.
    pub eps_feas: f64,
    /// Relative determinant threshold for plane triples.
    pub eps_det: f64,
    /// Relative tie tolerance when filtering candidates by objective.
    pub eps_tie: f64,
}

impl Default for SolverCfg {
    fn default() -> Self {
        Self {
            eps_feas: 1e-9,
            eps_det: 1e-12,
            eps_tie: 1e-9,
        }
    }
}

/// Errors reported by a `Session`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveError {
    DuplicateEditVariable(Var),
    UnknownEditVariable(Var),
    NonFinite,
    /// The hard rows admit no bounded feasible vertex.
    Infeasible,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::DuplicateEditVariable(v) => {
                write!(f, "edit variable {v} registered twice")
            }
            SolveError::UnknownEditVariable(v) => write!(f, "{v} is not an edit variable"),
            SolveError::NonFinite => write!(f, "constraint or suggestion is not finite"),
            SolveError::Infeasible => write!(f, "constraint system has no bounded feasible point"),
        }
    }
}

impl std::error::Error for SolveError {}
