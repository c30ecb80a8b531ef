use crate::bounds::BoundingBox;
use crate::point::Point;

/// Trait defining a dynamic 2D point index.
/// This allows swapping between the kd-tree and the brute-force `PointSet`.
pub trait PointIndex: Send + Sync {
    /// Returns `true` if no point is stored.
    fn is_empty(&self) -> bool;

    /// Number of distinct points stored.
    fn size(&self) -> usize;

    /// Adds `point` unless an equal point is already stored.
    /// Returns `true` if the point was added.
    fn insert(&mut self, point: Point) -> bool;

    /// Returns `true` if a point equal to `point` is stored.
    fn contains(&self, point: Point) -> bool;

    /// All stored points inside `rect`, boundary included.
    fn range(&self, rect: &BoundingBox) -> Vec<Point>;

    /// The stored point closest to `point`, or `None` if the index is empty.
    fn nearest(&self, point: Point) -> Option<Point>;
}
