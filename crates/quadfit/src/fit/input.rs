//! Flat coordinate layout: 4 quad points (8 values) then N >= 1 polygon points.

use nalgebra::Vector2;

use crate::geom::Vec2;

use super::error::FitError;

/// Split `[qx0, qy0, …, qx3, qy3, px0, py0, …]` into quad and polygon points.
pub fn decode_flat(values: &[f64]) -> Result<([Vec2; 4], Vec<Vec2>), FitError> {
    let len = values.len();
    if len < 10 || len % 2 != 0 {
        return Err(FitError::MalformedInput { len });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite);
    }
    let mut pts = values.chunks_exact(2).map(|c| Vector2::new(c[0], c[1]));
    let mut quad = [Vec2::zeros(); 4];
    for (slot, p) in quad.iter_mut().zip(pts.by_ref()) {
        *slot = p;
    }
    Ok((quad, pts.collect()))
}

/// Inverse of `decode_flat`.
pub fn encode_flat(quad: &[Vec2; 4], polygon: &[Vec2]) -> Vec<f64> {
    quad.iter()
        .chain(polygon)
        .flat_map(|p| [p.x, p.y])
        .collect()
}
