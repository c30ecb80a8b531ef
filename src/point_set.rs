use std::collections::BTreeSet;

use crate::bounds::BoundingBox;
use crate::index::PointIndex;
use crate::point::Point;

/// Brute-force point index backed by an ordered set.
///
/// Range and nearest queries scan every point. It serves as ground truth for
/// testing and benchmarking [`KdTree`](crate::KdTree).
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    points: BTreeSet<Point>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn size(&self) -> usize {
        self.points.len()
    }

    pub fn insert(&mut self, point: Point) -> bool {
        self.points.insert(point)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.points.contains(&point)
    }

    /// Points inside `rect`, in natural order (y, then x).
    pub fn range(&self, rect: &BoundingBox) -> Vec<Point> {
        self.points.iter().filter(|p| rect.contains(p)).copied().collect()
    }

    /// Closest point to `query`; on ties the first in natural order.
    pub fn nearest(&self, query: Point) -> Option<Point> {
        let mut best = None;
        let mut min_dist = f64::INFINITY;
        for p in &self.points {
            let d = p.distance_sq(&query);
            if best.is_none() || d < min_dist {
                min_dist = d;
                best = Some(*p);
            }
        }
        best
    }

    /// All points in natural order.
    pub fn points(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }
}

impl Extend<Point> for PointSet {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        PointSet {
            points: iter.into_iter().collect(),
        }
    }
}

impl PointIndex for PointSet {
    fn is_empty(&self) -> bool {
        PointSet::is_empty(self)
    }

    fn size(&self) -> usize {
        PointSet::size(self)
    }

    fn insert(&mut self, point: Point) -> bool {
        PointSet::insert(self, point)
    }

    fn contains(&self, point: Point) -> bool {
        PointSet::contains(self, point)
    }

    fn range(&self, rect: &BoundingBox) -> Vec<Point> {
        PointSet::range(self, rect)
    }

    fn nearest(&self, point: Point) -> Option<Point> {
        PointSet::nearest(self, point)
    }
}
