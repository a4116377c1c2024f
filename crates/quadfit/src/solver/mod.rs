//! Priority-weighted linear constraint resolution over the fit unknowns.
//!
//! Purpose
//! - Play the role of an incremental linear-arithmetic solver for the fit: hard rows,
//!   edit variables with strengths, suggestions, resolution and read-back.
//! - Resolution is exact for three unknowns: lexicographic goal programming by
//!   vertex enumeration after a cheap presolve.
//!
//! Code cross-refs: `Session`, `Constraint`, `Strength`, `Var`, `SolverCfg`

mod presolve;
mod session;
mod types;
mod util;

pub use session::Session;
pub use types::{Constraint, SolveError, SolverCfg, Strength, Var};
