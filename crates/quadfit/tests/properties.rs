//! Property tests over random convex quads and polygons.

use proptest::prelude::*;
use quadfit::api::{cross, draw_polygon, draw_quad_points, PolygonCfg, QuadCfg};
use quadfit::prelude::*;

fn fixture(quad_seed: u64, poly_seed: u64) -> ([Vec2; 4], Vec<Vec2>) {
    (
        draw_quad_points(&QuadCfg::default(), quad_seed),
        draw_polygon(&PolygonCfg::default(), poly_seed),
    )
}

/// Whether some translation puts every vertex of `poly`, scaled by `a` about the
/// polygon's min corner, inside `quad`. Checked in the plane, one half-plane per edge.
fn fits_at_scale(quad: &Quad, poly: &[Vec2], a: f64) -> bool {
    let pmin = Aabb2::from_points(poly).unwrap().min;
    let lines: Vec<(Vec2, f64)> = quad
        .edges()
        .map(|(qi, qj)| {
            let e = qj - qi;
            let reach = poly
                .iter()
                .map(|p| cross(e, p - pmin))
                .fold(f64::NEG_INFINITY, f64::max);
            (Vector2::new(-e.y, e.x), cross(e, qi) - a * reach)
        })
        .collect();
    let span = quad.points().iter().map(|q| q.amax()).fold(1.0, f64::max);
    let tol = 1e-8 * (span + Aabb2::from_points(poly).unwrap().extent());
    let inside = |t: Vec2| lines.iter().all(|(n, c)| n.dot(&t) <= c + tol * n.norm());
    for i in 0..4 {
        for j in i + 1..4 {
            let (ni, ci) = lines[i];
            let (nj, cj) = lines[j];
            let det = ni.x * nj.y - ni.y * nj.x;
            if det.abs() <= 1e-12 * ni.norm() * nj.norm() {
                continue;
            }
            let t = Vector2::new((ci * nj.y - cj * ni.y) / det, (ni.x * cj - nj.x * ci) / det);
            if inside(t) {
                return true;
            }
        }
    }
    false
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn scale_in_unit_interval_and_box_ordered(qs in any::<u64>(), ps in any::<u64>()) {
        let (quad, poly) = fixture(qs, ps);
        let r = fit_polygon_in_quad(&quad, &poly).unwrap();
        prop_assert!((0.0..=1.0).contains(&r.scale()));
        prop_assert!(r.aabb.min.x <= r.aabb.max.x);
        prop_assert!(r.aabb.min.y <= r.aabb.max.y);
        let size = Aabb2::from_points(&poly).unwrap().size();
        if size.x > 1e-3 {
            let implied = (r.aabb.max.x - r.aabb.min.x) / size.x;
            prop_assert!((implied - r.scale()).abs() < 1e-9);
        }
    }

    #[test]
    fn mapped_vertices_inside_quad(qs in any::<u64>(), ps in any::<u64>()) {
        let (quad, poly) = fixture(qs, ps);
        let r = fit_polygon_in_quad(&quad, &poly).unwrap();
        let q = Quad::new(quad).unwrap();
        let pmin = Aabb2::from_points(&poly).unwrap().min;
        for p in &poly {
            let m = r.map_point(*p, pmin);
            prop_assert!(q.contains_eps(m, 1e-6), "vertex {:?} mapped to {:?}", p, m);
        }
    }

    #[test]
    fn joint_translation_moves_the_fit(
        qs in any::<u64>(),
        ps in any::<u64>(),
        tx in -50i32..50,
        ty in -50i32..50,
    ) {
        let (quad, poly) = fixture(qs, ps);
        let t = Vector2::new(tx as f64, ty as f64);
        let moved = *Quad::new(quad).unwrap().translated(t).points();
        let shifted_poly: Vec<Vec2> = poly.iter().map(|p| p + t).collect();
        let a = fit_polygon_in_quad(&quad, &poly).unwrap();
        let b = fit_polygon_in_quad(&moved, &shifted_poly).unwrap();
        let expected = a.aabb.translated(t);
        prop_assert!((a.scale() - b.scale()).abs() < 1e-6);
        prop_assert!((expected.min - b.aabb.min).norm() < 1e-5);
        prop_assert!((expected.max - b.aabb.max).norm() < 1e-5);

        // Moving only the quad keeps the scale; the position may settle elsewhere.
        let c = fit_polygon_in_quad(&moved, &poly).unwrap();
        prop_assert!((a.scale() - c.scale()).abs() < 1e-6);
    }

    #[test]
    fn shrinking_quad_never_increases_scale(
        qs in any::<u64>(),
        ps in any::<u64>(),
        k in 0.1f64..1.0,
    ) {
        let (quad, poly) = fixture(qs, ps);
        let q = Quad::new(quad).unwrap();
        let shrunk = q.scaled_about_center(k);
        let mut fitter = Fitter::default();
        let big = fitter.fit(q.points(), &poly).unwrap();
        let small = fitter.fit(shrunk.points(), &poly).unwrap();
        prop_assert!(small.scale() <= big.scale() + 1e-7);
    }

    #[test]
    fn scale_cannot_grow_any_further(qs in any::<u64>(), ps in any::<u64>()) {
        let (quad, poly) = fixture(qs, ps);
        let a = fit_polygon_in_quad(&quad, &poly).unwrap().scale();
        let q = Quad::new(quad).unwrap();
        prop_assert!(fits_at_scale(&q, &poly, a));
        let step = 1e-4;
        if a < 1.0 - step {
            prop_assert!(!fits_at_scale(&q, &poly, a + step), "scale {} is not maximal", a);
        }
    }

    #[test]
    fn repeated_fits_are_identical(qs in any::<u64>(), ps in any::<u64>()) {
        let (quad, poly) = fixture(qs, ps);
        let mut fitter = Fitter::default();
        let a = fitter.fit(&quad, &poly).unwrap();
        let b = fitter.fit(&quad, &poly).unwrap();
        prop_assert_eq!(a, b);
    }
}
