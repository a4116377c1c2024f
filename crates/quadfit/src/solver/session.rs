//! Constraint session: hard rows plus prioritized edit variables over `(x, y, a)`.
//!
//! Resolution
//! - Hard rows (plus `Required` edits as equalities) define a polytope `P`.
//! - Each non-required edit `v → s` contributes the deviation `|v - s|`; deviations are
//!   summed per strength and minimized lexicographically, strongest level first.
//! - Every level objective is piecewise linear with breakpoints on the planes `v = s`,
//!   so each lexicographic optimum is reached at a point where three planes out of
//!   {boundary planes of `P`} ∪ {suggestion planes} meet. We enumerate those points,
//!   keep the feasible ones and filter them level by level.
//!
//! Requirements
//! - `P` must be bounded in every unknown (otherwise there may be no vertex and
//!   `update_variables` reports `Infeasible`).

use nalgebra::Vector3;

use super::presolve::presolve;
use super::types::{Constraint, SolveError, SolverCfg, Strength, Var};
use super::util::{intersect3, triples};

#[derive(Clone, Copy, Debug)]
struct Edit {
    var: Var,
    strength: Strength,
    suggestion: f64,
}

/// Reusable solver state. Not shared: each caller owns (or locks) its session.
#[derive(Clone, Debug, Default)]
pub struct Session {
    cfg: SolverCfg,
    rows: Vec<Constraint>,
    edits: Vec<Edit>,
    values: Vector3<f64>,
}

impl Session {
    pub fn new(cfg: SolverCfg) -> Self {
        Self {
            cfg,
            ..Self::default()
        }
    }

    /// Drop all rows, edit variables and resolved values.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.edits.clear();
        self.values = Vector3::zeros();
    }

    /// Register a hard row. Feasibility is only checked by `update_variables`.
    pub fn add_constraint(&mut self, row: Constraint) {
        self.rows.push(row);
    }

    pub fn add_constraints<I: IntoIterator<Item = Constraint>>(&mut self, rows: I) {
        self.rows.extend(rows);
    }

    /// Declare `var` adjustable at `strength`; its suggestion starts at `0.0`.
    pub fn add_edit_variable(&mut self, var: Var, strength: Strength) -> Result<(), SolveError> {
        if self.has_edit_variable(var) {
            return Err(SolveError::DuplicateEditVariable(var));
        }
        self.edits.push(Edit {
            var,
            strength,
            suggestion: 0.0,
        });
        Ok(())
    }

    pub fn suggest_value(&mut self, var: Var, value: f64) -> Result<(), SolveError> {
        let edit = self
            .edits
            .iter_mut()
            .find(|e| e.var == var)
            .ok_or(SolveError::UnknownEditVariable(var))?;
        edit.suggestion = value;
        Ok(())
    }

    #[inline]
    pub fn has_edit_variable(&self, var: Var) -> bool {
        self.edits.iter().any(|e| e.var == var)
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Last resolved value of `var` (0.0 before the first resolution).
    #[inline]
    pub fn value(&self, var: Var) -> f64 {
        self.values[var.index()]
    }

    /// Resolve the current system and store the chosen point.
    pub fn update_variables(&mut self) -> Result<(), SolveError> {
        if !self.rows.iter().all(Constraint::is_finite)
            || !self.edits.iter().all(|e| e.suggestion.is_finite())
        {
            return Err(SolveError::NonFinite);
        }

        let mut hard = self.rows.clone();
        for e in self.edits.iter().filter(|e| e.strength == Strength::Required) {
            hard.extend(Constraint::eq_pair(e.var.unit(), e.suggestion));
        }
        let hard = presolve(&hard);

        let soft: Vec<Edit> = self
            .edits
            .iter()
            .copied()
            .filter(|e| e.strength != Strength::Required)
            .collect();
        let mut planes = hard.clone();
        planes.extend(soft.iter().map(|e| Constraint::var_le(e.var, e.suggestion)));

        let mut candidates: Vec<Vector3<f64>> = triples(planes.len())
            .filter_map(|[i, j, k]| {
                intersect3([&planes[i], &planes[j], &planes[k]], self.cfg.eps_det)
            })
            .filter(|u| hard.iter().all(|r| r.satisfies_eps(*u, self.cfg.eps_feas)))
            .collect();
        tracing::debug!(
            rows = self.rows.len(),
            reduced = hard.len(),
            planes = planes.len(),
            candidates = candidates.len(),
            "session enumerated vertices"
        );
        if candidates.is_empty() {
            return Err(SolveError::Infeasible);
        }

        let mut levels: Vec<Strength> = soft.iter().map(|e| e.strength).collect();
        levels.sort_unstable_by(|a, b| b.cmp(a));
        levels.dedup();
        for level in levels {
            let goals: Vec<&Edit> = soft.iter().filter(|e| e.strength == level).collect();
            let deviation = |u: &Vector3<f64>| -> f64 {
                goals
                    .iter()
                    .map(|e| (u[e.var.index()] - e.suggestion).abs())
                    .sum()
            };
            let best = candidates
                .iter()
                .map(&deviation)
                .fold(f64::INFINITY, f64::min);
            let magnitude: f64 = goals.iter().map(|e| e.suggestion.abs()).sum();
            let tol = self.cfg.eps_tie * (1.0 + best.abs() + magnitude);
            candidates.retain(|u| deviation(u) <= best + tol);
            tracing::trace!(?level, best, kept = candidates.len(), "level resolved");
        }

        self.values = candidates[0];
        Ok(())
    }
}
