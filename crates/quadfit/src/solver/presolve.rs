//! Row reduction before vertex enumeration.
//!
//! Two reductions, both exact:
//! - duplicate rows (bit-identical `n` and `c`) are dropped;
//! - if an unknown `v` is bounded below by `lb >= 0`, rows that agree everywhere except
//!   on the coefficient of `v` are dominated by the one with the largest coefficient
//!   (`k1 v <= k2 v` for `k1 <= k2`, `v >= 0`).
//!
//! The fit produces one containment row per (polygon vertex, quad edge); rows of the
//! same edge differ only in their `a` coefficient, so this leaves one row per edge.

use std::collections::{HashMap, HashSet};

use super::types::{Constraint, Var};

/// Tightest lower bound per unknown implied by single-variable rows.
pub(crate) fn lower_bounds(rows: &[Constraint]) -> [f64; 3] {
    let mut lb = [f64::NEG_INFINITY; 3];
    for (v, b) in rows.iter().filter_map(Constraint::lower_bound) {
        let slot = &mut lb[v.index()];
        if b > *slot {
            *slot = b;
        }
    }
    lb
}

/// Reduce `rows`, preserving first-seen order of the survivors.
pub(crate) fn presolve(rows: &[Constraint]) -> Vec<Constraint> {
    let lb = lower_bounds(rows);
    let mut out = dedup(rows);
    for v in Var::ALL {
        if lb[v.index()] >= 0.0 {
            out = drop_dominated(&out, v);
        }
    }
    out
}

fn dedup(rows: &[Constraint]) -> Vec<Constraint> {
    let mut seen = HashSet::with_capacity(rows.len());
    let mut out = Vec::with_capacity(rows.len());
    for r in rows {
        let key = (r.n.x.to_bits(), r.n.y.to_bits(), r.n.z.to_bits(), r.c.to_bits());
        if seen.insert(key) {
            out.push(*r);
        }
    }
    out
}

fn drop_dominated(rows: &[Constraint], v: Var) -> Vec<Constraint> {
    let i = v.index();
    let (o1, o2) = match v {
        Var::X => (1, 2),
        Var::Y => (0, 2),
        Var::A => (0, 1),
    };
    let mut best: HashMap<(u64, u64, u64), usize> = HashMap::with_capacity(rows.len());
    let mut keep: Vec<Constraint> = Vec::with_capacity(rows.len());
    for r in rows {
        // Rows constraining only `v` carry its bounds; never merge them.
        if r.n[o1] == 0.0 && r.n[o2] == 0.0 {
            keep.push(*r);
            continue;
        }
        let key = (r.n[o1].to_bits(), r.n[o2].to_bits(), r.c.to_bits());
        match best.get(&key) {
            Some(&slot) => {
                if r.n[i] > keep[slot].n[i] {
                    keep[slot] = *r;
                }
            }
            None => {
                best.insert(key, keep.len());
                keep.push(*r);
            }
        }
    }
    keep
}
