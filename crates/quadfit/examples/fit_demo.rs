//! Fit a few random polygons into a skewed quad and print the fitted boxes.
//!
//! Usage:
//!   cargo run -p quadfit --example fit_demo -- [count]

use quadfit::api::{draw_polygon, PolygonCfg};
use quadfit::prelude::*;

fn main() {
    let count: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(5);
    let quad = [
        Vector2::new(10.0, 12.0),
        Vector2::new(310.0, 40.0),
        Vector2::new(290.0, 220.0),
        Vector2::new(25.0, 200.0),
    ];
    let mut fitter = Fitter::default();
    for seed in 0..count {
        let poly = draw_polygon(&PolygonCfg::default(), seed);
        match fitter.fit(&quad, &poly) {
            Ok(r) => println!(
                "sample {seed}: n={} a={:.4} min=({:.2}, {:.2}) max=({:.2}, {:.2})",
                poly.len(),
                r.scale(),
                r.aabb.min.x,
                r.aabb.min.y,
                r.aabb.max.x,
                r.aabb.max.y
            ),
            Err(e) => eprintln!("sample {seed}: {e}"),
        }
    }
}
