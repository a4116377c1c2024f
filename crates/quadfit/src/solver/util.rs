//! Combinatorics and plane intersections.

use nalgebra::{Matrix3, Vector3};

use super::types::Constraint;

/// Index triples `i < j < k` over `0..n`, lexicographic.
pub(crate) fn triples(n: usize) -> impl Iterator<Item = [usize; 3]> {
    (0..n).flat_map(move |i| {
        (i + 1..n).flat_map(move |j| (j + 1..n).map(move |k| [i, j, k]))
    })
}

/// Point where the boundary planes `n · u = c` of three rows meet, if they are
/// independent (`|det| > eps_det * |n1||n2||n3|`).
pub(crate) fn intersect3(rows: [&Constraint; 3], eps_det: f64) -> Option<Vector3<f64>> {
    let m = Matrix3::from_rows(&[
        rows[0].n.transpose(),
        rows[1].n.transpose(),
        rows[2].n.transpose(),
    ]);
    let scale = rows[0].n.norm() * rows[1].n.norm() * rows[2].n.norm();
    if !scale.is_finite() || scale <= 0.0 || m.determinant().abs() <= eps_det * scale {
        return None;
    }
    let b = Vector3::new(rows[0].c, rows[1].c, rows[2].c);
    let u = m.lu().solve(&b)?;
    u.iter().all(|v| v.is_finite()).then_some(u)
}
