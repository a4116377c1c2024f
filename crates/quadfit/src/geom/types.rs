//! Basic 2D value types: points and axis-aligned boxes.
//!
//! - `Vec2`: a 2D coordinate (`nalgebra::Vector2<f64>`).
//! - `Aabb2`: axis-aligned bounding box `[min, max]`, built by componentwise reduction.
//!
//! Coordinates follow the usual 2D graphics convention (y grows downward), which only
//! matters for the winding vocabulary used by `Quad`.

use nalgebra::Vector2;

/// 2D point / vector.
pub type Vec2 = Vector2<f64>;

/// Axis-aligned bounding box.
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y` when built by `from_points`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb2 {
    #[inline]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Componentwise min/max over `points`; `None` if `points` is empty.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    /// `max - min`, componentwise.
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Largest side length (used as a length scale for tolerances).
    #[inline]
    pub fn extent(&self) -> f64 {
        let s = self.size();
        s.x.max(s.y)
    }

    /// Corners in the order min, (max.x, min.y), max, (min.x, max.y).
    pub fn corners(&self) -> [Vec2; 4] {
        [
            self.min,
            Vec2::new(self.max.x, self.min.y),
            self.max,
            Vec2::new(self.min.x, self.max.y),
        ]
    }

    #[inline]
    pub fn contains_eps(&self, p: Vec2, eps: f64) -> bool {
        p.x >= self.min.x - eps
            && p.x <= self.max.x + eps
            && p.y >= self.min.y - eps
            && p.y <= self.max.y + eps
    }

    /// Clamp `p` into the box.
    #[inline]
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }

    #[inline]
    pub fn translated(&self, t: Vec2) -> Self {
        Self {
            min: self.min + t,
            max: self.max + t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn from_points_reduces_componentwise() {
        let pts = [vector![1.0, 5.0], vector![-2.0, 3.0], vector![4.0, -1.0]];
        let b = Aabb2::from_points(&pts).unwrap();
        assert_eq!(b.min, vector![-2.0, -1.0]);
        assert_eq!(b.max, vector![4.0, 5.0]);
        assert_eq!(b.size(), vector![6.0, 6.0]);
    }

    #[test]
    fn from_points_empty_is_none() {
        assert!(Aabb2::from_points(&[]).is_none());
    }

    #[test]
    fn single_point_has_zero_size() {
        let b = Aabb2::from_points(&[vector![3.0, 7.0]]).unwrap();
        assert_eq!(b.size(), Vec2::zeros());
        assert_eq!(b.extent(), 0.0);
    }

    #[test]
    fn clamp_and_contains() {
        let b = Aabb2::new(vector![0.0, 0.0], vector![1.0, 2.0]);
        assert_eq!(b.clamp(vector![-1.0, 3.0]), vector![0.0, 2.0]);
        assert!(b.contains_eps(vector![1.0, 2.0], 0.0));
        assert!(!b.contains_eps(vector![1.1, 2.0], 1e-3));
    }
}
