use std::cmp::Ordering;
use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::bounds::{BoundingBox, UNIT_SQUARE};
use crate::error::Result;
use crate::index::PointIndex;
use crate::io::read_points;
use crate::point::Point;

/// Marks an absent child.
const NIL: u32 = u32::MAX;
/// The root is always the first node pushed.
const ROOT: u32 = 0;

/// Which coordinate a node splits its rectangle by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Splits by x; the split line is vertical.
    Vertical,
    /// Splits by y; the split line is horizontal.
    Horizontal,
}

impl Orientation {
    fn axis(self) -> usize {
        match self {
            Orientation::Vertical => 0,
            Orientation::Horizontal => 1,
        }
    }

    fn flip(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct KdNode {
    point: Point,
    // Region left over after all ancestor splits
    rect: BoundingBox,
    left: u32, // NIL if absent
    right: u32,
    size: u32,
    orientation: Orientation,
}

impl KdNode {
    /// Compares `p` against this node's point along the split axis.
    fn compare(&self, p: &Point) -> Ordering {
        match self.orientation {
            Orientation::Vertical => p.cmp_x(&self.point),
            Orientation::Horizontal => p.cmp_y(&self.point),
        }
    }

    /// Child that `p` belongs under. Ties on the split coordinate go right.
    fn child_for(&self, p: &Point) -> u32 {
        if self.compare(p) == Ordering::Less { self.left } else { self.right }
    }

    fn split_value(&self) -> f64 {
        self.point.to_array()[self.orientation.axis()]
    }
}

/// A line along which one node divides its rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Split {
    /// The point stored at the node.
    pub point: Point,
    pub orientation: Orientation,
    /// Start of the split segment, on the low edge of the node's rectangle.
    pub start: [f64; 2],
    /// End of the split segment, on the high edge of the node's rectangle.
    pub end: [f64; 2],
}

#[derive(Clone, Copy)]
enum Slot {
    Root,
    Left(u32),
    Right(u32),
}

/// A 2D tree: a binary space partition that splits the plane on alternating
/// axes, x at the root, y below it, and so on.
///
/// Every node owns the rectangle that remains after its ancestors' splits.
/// Range and nearest-neighbor queries skip whole subtrees whose rectangle
/// cannot contribute. The tree is never rebalanced, so insertion order decides
/// its shape: sorted input degenerates into a list with linear query cost.
///
/// Nodes are kept in an arena and addressed by `u32`, which caps a tree at
/// `u32::MAX - 1` points.
#[derive(Clone, Debug)]
pub struct KdTree {
    bounds: BoundingBox,
    nodes: Vec<KdNode>,
}

impl KdTree {
    /// Creates an empty tree over the unit square.
    pub fn new() -> Self {
        Self::with_bounds(UNIT_SQUARE)
    }

    /// Creates an empty tree whose root rectangle is `bounds`.
    ///
    /// Points outside `bounds` are accepted, but range and nearest queries
    /// are only guaranteed to find points inside it.
    pub fn with_bounds(bounds: BoundingBox) -> Self {
        KdTree {
            bounds,
            nodes: Vec::new(),
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of points stored.
    pub fn size(&self) -> usize {
        self.nodes.first().map_or(0, |root| root.size as usize)
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    /// Inserts `point` unless an equal point is already stored.
    ///
    /// Returns `true` if the point was added.
    ///
    /// # Panics
    ///
    /// Panics if the tree already holds `u32::MAX - 1` points.
    pub fn insert(&mut self, point: Point) -> bool {
        let Some(slot) = self.locate(&point) else {
            trace!(%point, "duplicate point ignored");
            return false;
        };

        assert!(self.nodes.len() < NIL as usize, "kd-tree arena is full");
        let idx = self.nodes.len() as u32;
        let (rect, orientation) = match slot {
            Slot::Root => (self.bounds, Orientation::Vertical),
            Slot::Left(parent) => {
                let p = &self.nodes[parent as usize];
                (p.rect.with_max(p.orientation.axis(), p.split_value()), p.orientation.flip())
            }
            Slot::Right(parent) => {
                let p = &self.nodes[parent as usize];
                (p.rect.with_min(p.orientation.axis(), p.split_value()), p.orientation.flip())
            }
        };

        self.nodes.push(KdNode {
            point,
            rect,
            left: NIL,
            right: NIL,
            size: 1,
            orientation,
        });

        match slot {
            Slot::Root => return true,
            Slot::Left(parent) => self.nodes[parent as usize].left = idx,
            Slot::Right(parent) => self.nodes[parent as usize].right = idx,
        }

        // Every ancestor gains one descendant
        let mut cur = ROOT;
        while cur != idx {
            let node = &mut self.nodes[cur as usize];
            node.size += 1;
            cur = node.child_for(&point);
        }
        true
    }

    /// Finds the empty slot `point` would be attached to, or `None` if an
    /// equal point is already stored.
    fn locate(&self, point: &Point) -> Option<Slot> {
        if self.nodes.is_empty() {
            return Some(Slot::Root);
        }
        let mut cur = ROOT;
        loop {
            let node = &self.nodes[cur as usize];
            if node.point == *point {
                return None;
            }
            let (next, slot) = if node.compare(point) == Ordering::Less {
                (node.left, Slot::Left(cur))
            } else {
                (node.right, Slot::Right(cur))
            };
            if next == NIL {
                return Some(slot);
            }
            cur = next;
        }
    }

    /// Returns `true` if a point equal to `point` is stored.
    pub fn contains(&self, point: Point) -> bool {
        let mut cur = if self.nodes.is_empty() { NIL } else { ROOT };
        while cur != NIL {
            let node = &self.nodes[cur as usize];
            cur = match node.compare(&point) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal if node.point == point => return true,
                Ordering::Equal => node.right,
            };
        }
        false
    }

    /// All stored points inside `rect`, boundary included.
    ///
    /// Points come out in pre-order: a node before its left subtree, the left
    /// subtree before the right one.
    pub fn range(&self, rect: &BoundingBox) -> Vec<Point> {
        let mut found = Vec::new();
        if self.nodes.is_empty() {
            return found;
        }

        let mut stack = vec![ROOT];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx as usize];
            if rect.contains(&node.point) {
                found.push(node.point);
            }
            // Right goes on the stack first so the left subtree is finished before it
            for child in [node.right, node.left] {
                if child != NIL && self.nodes[child as usize].rect.intersects(rect) {
                    stack.push(child);
                }
            }
        }
        found
    }

    /// The stored point closest to `query`, or `None` if the tree is empty.
    ///
    /// Of two children, the one whose rectangle is nearer to `query` is
    /// searched first, and a child is skipped once its rectangle is no nearer
    /// than the best point found so far. Among equally close points the one
    /// met first wins.
    pub fn nearest(&self, query: Point) -> Option<Point> {
        if self.nodes.is_empty() {
            return None;
        }

        let mut best = None;
        let mut min_dist = f64::INFINITY;
        let mut stack: Vec<(u32, f64)> = vec![(ROOT, 0.0)];

        while let Some((idx, rect_dist)) = stack.pop() {
            // min_dist may have shrunk since this child was pushed
            if rect_dist >= min_dist {
                continue;
            }

            let node = &self.nodes[idx as usize];
            let dist = node.point.distance_sq(&query);
            if dist == 0.0 {
                return Some(node.point);
            }
            // distance_sq can overflow to infinity on very wide domains
            if best.is_none() || dist < min_dist {
                min_dist = dist;
                best = Some(node.point);
            }

            let left = (node.left, self.rect_distance(node.left, &query));
            let right = (node.right, self.rect_distance(node.right, &query));
            let (near, far) = if left.1 < right.1 { (left, right) } else { (right, left) };

            // Nearer child on top
            if far.1 < min_dist {
                stack.push(far);
            }
            if near.1 < min_dist {
                stack.push(near);
            }
        }
        best
    }

    fn rect_distance(&self, idx: u32, query: &Point) -> f64 {
        if idx == NIL {
            f64::INFINITY
        } else {
            self.nodes[idx as usize].rect.distance_sq(query)
        }
    }

    /// Runs `nearest` for every query in parallel.
    pub fn nearest_batch(&self, queries: &[Point]) -> Vec<Option<Point>> {
        debug!(queries = queries.len(), points = self.size(), "nearest batch");
        queries.par_iter().map(|&q| self.nearest(q)).collect()
    }

    /// Runs `range` for every rectangle in parallel.
    pub fn range_batch(&self, rects: &[BoundingBox]) -> Vec<Vec<Point>> {
        debug!(queries = rects.len(), points = self.size(), "range batch");
        rects.par_iter().map(|r| self.range(r)).collect()
    }

    /// All stored points in pre-order.
    pub fn points(&self) -> Vec<Point> {
        self.preorder().map(|idx| self.nodes[idx as usize].point).collect()
    }

    /// Number of levels in the tree, 0 when empty.
    pub fn height(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        let mut height = 0;
        let mut stack = vec![(ROOT, 1usize)];
        while let Some((idx, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[idx as usize];
            for child in [node.right, node.left] {
                if child != NIL {
                    stack.push((child, depth + 1));
                }
            }
        }
        height
    }

    /// The split segment of every node, in pre-order.
    ///
    /// Each segment runs across the node's own rectangle: top to bottom for
    /// vertical splits, left to right for horizontal ones.
    pub fn splits(&self) -> Vec<Split> {
        self.preorder()
            .map(|idx| {
                let node = &self.nodes[idx as usize];
                let (x, y) = (node.point.x(), node.point.y());
                let r = &node.rect;
                let (start, end) = match node.orientation {
                    Orientation::Vertical => ([x, r.min_y()], [x, r.max_y()]),
                    Orientation::Horizontal => ([r.min_x(), y], [r.max_x(), y]),
                };
                Split {
                    point: node.point,
                    orientation: node.orientation,
                    start,
                    end,
                }
            })
            .collect()
    }

    fn preorder(&self) -> impl Iterator<Item = u32> + '_ {
        let mut stack = if self.nodes.is_empty() { Vec::new() } else { vec![ROOT] };
        std::iter::from_fn(move || {
            let idx = stack.pop()?;
            let node = &self.nodes[idx as usize];
            for child in [node.right, node.left] {
                if child != NIL {
                    stack.push(child);
                }
            }
            Some(idx)
        })
    }

    /// Reads whitespace-separated coordinate pairs from `path` and inserts
    /// them in file order.
    ///
    /// Returns the number of pairs read, duplicates included. Nothing is
    /// inserted if the file cannot be parsed.
    pub fn import_points<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let points = read_points(path.as_ref())?;
        let before = self.size();
        self.extend(points.iter().copied());
        debug!(
            path = %path.as_ref().display(),
            read = points.len(),
            added = self.size() - before,
            "imported points"
        );
        Ok(points.len())
    }
}

impl Default for KdTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Point> for KdTree {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}

impl FromIterator<Point> for KdTree {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        let mut tree = KdTree::new();
        tree.extend(iter);
        tree
    }
}

impl PointIndex for KdTree {
    fn is_empty(&self) -> bool {
        KdTree::is_empty(self)
    }

    fn size(&self) -> usize {
        KdTree::size(self)
    }

    fn insert(&mut self, point: Point) -> bool {
        KdTree::insert(self, point)
    }

    fn contains(&self, point: Point) -> bool {
        KdTree::contains(self, point)
    }

    fn range(&self, rect: &BoundingBox) -> Vec<Point> {
        KdTree::range(self, rect)
    }

    fn nearest(&self, point: Point) -> Option<Point> {
        KdTree::nearest(self, point)
    }
}
