//! Random convex quads and polygons (radial jitter + replay seeds).
//!
//! Purpose
//! - Reproducible fixtures for benches and property tests. A draw is fully determined
//!   by its `seed`, so a failing case can be replayed from the seed alone.
//!
//! Model
//! - Quads: four angles spaced by π/2 with bounded angular jitter, a random phase,
//!   common radius, then an anisotropic stretch and a translation. Angles stay strictly
//!   increasing so the result is convex.
//! - Polygons: `n` points scattered in a box (convexity not required by the fit).

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::quad::Quad;
use super::types::Vec2;

/// Quad sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct QuadCfg {
    /// Angular jitter as a fraction of π/2. Clamped to [0, 0.45].
    pub angle_jitter_frac: f64,
    /// Radius range before stretching.
    pub radius: (f64, f64),
    /// Per-axis stretch range (anisotropy).
    pub stretch: (f64, f64),
    /// Center coordinates are drawn uniformly from `[-center_span, center_span]²`.
    pub center_span: f64,
}

impl Default for QuadCfg {
    fn default() -> Self {
        Self {
            angle_jitter_frac: 0.3,
            radius: (1.0, 10.0),
            stretch: (0.5, 2.0),
            center_span: 100.0,
        }
    }
}

/// Polygon sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct PolygonCfg {
    pub vertices: (usize, usize),
    /// Points fall in `[0, extent.x] × [0, extent.y]` shifted by a random offset.
    pub extent: (f64, f64),
    pub offset_span: f64,
}

impl Default for PolygonCfg {
    fn default() -> Self {
        Self {
            vertices: (1, 12),
            extent: (0.0, 30.0),
            offset_span: 100.0,
        }
    }
}

/// Draw a convex quad (raw vertex array, random winding).
pub fn draw_quad_points(cfg: &QuadCfg, seed: u64) -> [Vec2; 4] {
    let mut rng = StdRng::seed_from_u64(seed);
    let jitter = cfg.angle_jitter_frac.clamp(0.0, 0.45);
    let step = std::f64::consts::FRAC_PI_2;
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;
    let radius = sample_range(&mut rng, cfg.radius);
    let sx = sample_range(&mut rng, cfg.stretch);
    let sy = sample_range(&mut rng, cfg.stretch);
    let center = Vector2::new(
        rng.gen_range(-cfg.center_span..=cfg.center_span),
        rng.gen_range(-cfg.center_span..=cfg.center_span),
    );
    let mut pts = [Vec2::zeros(); 4];
    for (k, p) in pts.iter_mut().enumerate() {
        let u: f64 = rng.gen_range(-jitter..=jitter);
        let theta = phase + step * (k as f64 + u);
        *p = center + Vector2::new(sx * radius * theta.cos(), sy * radius * theta.sin());
    }
    if rng.gen::<bool>() {
        pts.reverse();
    }
    pts
}

/// Draw a validated `Quad`.
pub fn draw_quad(cfg: &QuadCfg, seed: u64) -> Option<Quad> {
    Quad::new(draw_quad_points(cfg, seed)).ok()
}

/// Draw a polygon with at least one vertex.
pub fn draw_polygon(cfg: &PolygonCfg, seed: u64) -> Vec<Vec2> {
    let mut rng = StdRng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);
    let lo = cfg.vertices.0.max(1);
    let hi = cfg.vertices.1.max(lo);
    let n = rng.gen_range(lo..=hi);
    let w = sample_range(&mut rng, cfg.extent);
    let h = sample_range(&mut rng, cfg.extent);
    let offset = Vector2::new(
        rng.gen_range(-cfg.offset_span..=cfg.offset_span),
        rng.gen_range(-cfg.offset_span..=cfg.offset_span),
    );
    (0..n)
        .map(|_| offset + Vector2::new(rng.gen::<f64>() * w, rng.gen::<f64>() * h))
        .collect()
}

fn sample_range<R: Rng>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quads_are_valid_and_replayable() {
        let cfg = QuadCfg::default();
        for seed in 0..200 {
            let a = draw_quad_points(&cfg, seed);
            let b = draw_quad_points(&cfg, seed);
            assert_eq!(a, b);
            let quad = draw_quad(&cfg, seed);
            assert!(quad.is_some(), "seed {seed} produced invalid quad");
            assert!(quad.is_some_and(|q| q.signed_area2() < 0.0));
        }
    }

    #[test]
    fn polygons_respect_vertex_range() {
        let cfg = PolygonCfg {
            vertices: (3, 5),
            ..PolygonCfg::default()
        };
        for seed in 0..50 {
            let p = draw_polygon(&cfg, seed);
            assert!((3..=5).contains(&p.len()));
        }
    }
}
