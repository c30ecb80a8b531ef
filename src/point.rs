use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{KdError, Result};

/// An immutable point in the plane with finite coordinates.
///
/// Negative zero is stored as positive zero, so equality, hashing and the two
/// axis orders all agree on which points are the same.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a point, rejecting NaN and infinite coordinates.
    pub fn new(x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(KdError::NonFiniteCoordinate { x, y });
        }
        Ok(Self::from_finite(x, y))
    }

    /// For coordinates already known to be finite.
    pub(crate) fn from_finite(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite() && y.is_finite());
        Self { x: x + 0.0, y: y + 0.0 }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_sq(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Order by x only. Used at vertical splits.
    pub fn cmp_x(&self, other: &Point) -> Ordering {
        self.x.total_cmp(&other.x)
    }

    /// Order by y only. Used at horizontal splits.
    pub fn cmp_y(&self, other: &Point) -> Ordering {
        self.y.total_cmp(&other.y)
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

/// Natural order: by y, then by x.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_y(other).then_with(|| self.cmp_x(other))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl TryFrom<[f64; 2]> for Point {
    type Error = KdError;

    fn try_from(value: [f64; 2]) -> Result<Self> {
        Point::new(value[0], value[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rejects_non_finite() {
        assert!(Point::new(f64::NAN, 0.0).is_err());
        assert!(Point::new(0.0, f64::INFINITY).is_err());
        assert!(Point::new(f64::NEG_INFINITY, 1.0).is_err());
        assert!(Point::new(0.25, 0.75).is_ok());
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        let a = Point::new(-0.0, 0.5).unwrap();
        let b = Point::new(0.0, 0.5).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cmp_x(&b), Ordering::Equal);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_axis_orders_are_independent() {
        let a = Point::new(0.2, 0.9).unwrap();
        let b = Point::new(0.8, 0.1).unwrap();
        assert_eq!(a.cmp_x(&b), Ordering::Less);
        assert_eq!(a.cmp_y(&b), Ordering::Greater);
        // Natural order goes by y first
        assert!(b < a);
    }

    #[test]
    fn test_distance_sq() {
        let a = Point::new(0.0, 0.0).unwrap();
        let b = Point::new(3.0, 4.0).unwrap();
        assert_eq!(a.distance_sq(&b), 25.0);
        assert_eq!(b.distance_sq(&a), 25.0);
        assert_eq!(a.distance_sq(&a), 0.0);
    }
}
