use crate::error::{KdError, Result};
use crate::point::Point;

/// Axis-aligned rectangle in the plane.
///
/// All tests are inclusive: a point on an edge is contained, and rectangles
/// that only touch along an edge or at a corner intersect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: [f64; 2],
    max: [f64; 2],
}

/// The canonical domain of a tree, [0, 1] x [0, 1].
pub const UNIT_SQUARE: BoundingBox = BoundingBox {
    min: [0.0, 0.0],
    max: [1.0, 1.0],
};

impl BoundingBox {
    /// Creates a rectangle from its corners.
    ///
    /// Fails if any bound is non-finite or if a minimum exceeds its maximum.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        let finite = [min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite());
        if !finite || min_x > max_x || min_y > max_y {
            return Err(KdError::InvalidBounds { min_x, min_y, max_x, max_y });
        }
        Ok(Self {
            min: [min_x, min_y],
            max: [max_x, max_y],
        })
    }

    pub fn min_x(&self) -> f64 {
        self.min[0]
    }

    pub fn min_y(&self) -> f64 {
        self.min[1]
    }

    pub fn max_x(&self) -> f64 {
        self.max[0]
    }

    pub fn max_y(&self) -> f64 {
        self.max[1]
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// Inclusive point-in-rectangle test.
    pub fn contains(&self, p: &Point) -> bool {
        p.x() >= self.min[0] && p.x() <= self.max[0] && p.y() >= self.min[1] && p.y() <= self.max[1]
    }

    /// Inclusive overlap test; touching rectangles intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.max[0] >= other.min[0]
            && self.max[1] >= other.min[1]
            && other.max[0] >= self.min[0]
            && other.max[1] >= self.min[1]
    }

    /// Squared distance from `p` to the closest point of the rectangle.
    ///
    /// Zero when `p` is inside or on the boundary, so it never overestimates
    /// the distance to any point the rectangle contains.
    pub fn distance_sq(&self, p: &Point) -> f64 {
        let pos = p.to_array();
        let mut d2 = 0.0;
        for i in 0..2 {
            let v = pos[i];
            if v < self.min[i] {
                d2 += (self.min[i] - v).powi(2);
            } else if v > self.max[i] {
                d2 += (v - self.max[i]).powi(2);
            }
        }
        d2
    }

    /// The part of this rectangle on the low side of `value` along `axis`.
    /// A `value` outside the rectangle collapses the edge onto the nearer side.
    pub(crate) fn with_max(&self, axis: usize, value: f64) -> BoundingBox {
        let mut b = *self;
        b.max[axis] = value.clamp(self.min[axis], self.max[axis]);
        b
    }

    /// The part of this rectangle on the high side of `value` along `axis`.
    pub(crate) fn with_min(&self, axis: usize, value: f64) -> BoundingBox {
        let mut b = *self;
        b.min[axis] = value.clamp(self.min[axis], self.max[axis]);
        b
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        UNIT_SQUARE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y).unwrap()
    }

    #[test]
    fn test_rejects_inverted_and_non_finite() {
        assert!(BoundingBox::new(0.5, 0.0, 0.4, 1.0).is_err());
        assert!(BoundingBox::new(0.0, 0.6, 1.0, 0.5).is_err());
        assert!(BoundingBox::new(f64::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(BoundingBox::new(0.0, 0.0, f64::INFINITY, 1.0).is_err());
        // Degenerate rectangles are fine
        assert!(BoundingBox::new(0.5, 0.0, 0.5, 1.0).is_ok());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = BoundingBox::new(0.2, 0.2, 0.6, 0.8).unwrap();
        assert!(r.contains(&p(0.4, 0.5)));
        assert!(r.contains(&p(0.2, 0.2)));
        assert!(r.contains(&p(0.6, 0.5)));
        assert!(r.contains(&p(0.4, 0.8)));
        assert!(!r.contains(&p(0.61, 0.5)));
        assert!(!r.contains(&p(0.4, 0.1)));
    }

    #[test]
    fn test_intersects_touching() {
        let a = BoundingBox::new(0.0, 0.0, 0.5, 0.5).unwrap();
        let b = BoundingBox::new(0.5, 0.5, 1.0, 1.0).unwrap();
        let c = BoundingBox::new(0.6, 0.0, 1.0, 0.4).unwrap();
        let inner = BoundingBox::new(0.1, 0.1, 0.2, 0.2).unwrap();
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(a.intersects(&inner));
        assert!(inner.intersects(&a));
    }

    #[test]
    fn test_distance_sq() {
        let r = BoundingBox::new(0.2, 0.2, 0.6, 0.8).unwrap();
        assert_eq!(r.distance_sq(&p(0.4, 0.4)), 0.0);
        assert_eq!(r.distance_sq(&p(0.6, 0.8)), 0.0);
        assert!((r.distance_sq(&p(0.0, 0.5)) - 0.04).abs() < 1e-12);
        assert!((r.distance_sq(&p(0.9, 1.2)) - (0.09 + 0.16)).abs() < 1e-12);
    }

    #[test]
    fn test_carving() {
        let left = UNIT_SQUARE.with_max(0, 0.3);
        let right = UNIT_SQUARE.with_min(0, 0.3);
        assert_eq!(left, BoundingBox::new(0.0, 0.0, 0.3, 1.0).unwrap());
        assert_eq!(right, BoundingBox::new(0.3, 0.0, 1.0, 1.0).unwrap());
        let below = right.with_max(1, 0.7);
        assert_eq!(below, BoundingBox::new(0.3, 0.0, 1.0, 0.7).unwrap());
    }

    #[test]
    fn test_carving_outside_value_collapses_edge() {
        let r = BoundingBox::new(0.5, 0.0, 1.0, 1.0).unwrap();
        assert_eq!(r.with_min(0, 3.0), BoundingBox::new(1.0, 0.0, 1.0, 1.0).unwrap());
        assert_eq!(r.with_max(0, -2.0), BoundingBox::new(0.5, 0.0, 0.5, 1.0).unwrap());
        assert_eq!(r.with_max(1, 4.0), r);
    }
}
