use std::collections::HashSet;

use kdplane::io::random_points;
use kdplane::{BoundingBox, KdTree, Point, PointIndex, PointSet, UNIT_SQUARE};
use rand::prelude::*;
use rand::rngs::StdRng;

fn random_rect(rng: &mut StdRng) -> BoundingBox {
    let (a, b) = (rng.r#gen::<f64>(), rng.r#gen::<f64>());
    let (c, d) = (rng.r#gen::<f64>(), rng.r#gen::<f64>());
    BoundingBox::new(a.min(b), c.min(d), a.max(b), c.max(d)).unwrap()
}

fn build<I: PointIndex + Default>(points: &[Point]) -> I {
    let mut index = I::default();
    for &p in points {
        index.insert(p);
    }
    index
}

#[test]
fn test_random_points_match_oracle() {
    let mut rng = StdRng::seed_from_u64(2016);
    let points = random_points(2000, &UNIT_SQUARE, 11);

    let tree: KdTree = build(&points);
    let oracle: PointSet = build(&points);
    assert_eq!(tree.size(), oracle.size());

    for _ in 0..200 {
        let rect = random_rect(&mut rng);
        let got: HashSet<Point> = tree.range(&rect).into_iter().collect();
        let expected: HashSet<Point> = oracle.range(&rect).into_iter().collect();
        assert_eq!(got, expected, "Range mismatch for {:?}", rect);

        let q = Point::new(rng.r#gen(), rng.r#gen()).unwrap();
        let near = tree.nearest(q).expect("Tree is not empty");
        let best = oracle.nearest(q).expect("Oracle is not empty");
        assert_eq!(near.distance_sq(&q), best.distance_sq(&q), "Nearest mismatch for {}", q);
    }
}

#[test]
fn test_grid_points_with_ties() {
    // A lattice creates many equal split coordinates and equidistant neighbors
    let mut points = Vec::new();
    for i in 0..=10 {
        for j in 0..=10 {
            points.push(Point::new(i as f64 / 10.0, j as f64 / 10.0).unwrap());
        }
    }
    let mut rng = StdRng::seed_from_u64(7);
    points.shuffle(&mut rng);

    let tree: KdTree = build(&points);
    let oracle: PointSet = build(&points);
    assert_eq!(tree.size(), 121);

    for p in &points {
        assert!(tree.contains(*p));
        assert_eq!(tree.nearest(*p), Some(*p));
    }

    for _ in 0..200 {
        let q = Point::new(rng.r#gen(), rng.r#gen()).unwrap();
        let near = tree.nearest(q).unwrap();
        let best = oracle.nearest(q).unwrap();
        assert_eq!(near.distance_sq(&q), best.distance_sq(&q));

        let rect = random_rect(&mut rng);
        let mut got = tree.range(&rect);
        got.sort();
        assert_eq!(got, oracle.range(&rect));
    }
}

#[test]
fn test_membership_of_absent_points() {
    let points = random_points(500, &UNIT_SQUARE, 3);
    let tree: KdTree = points.iter().copied().collect();
    let stored: HashSet<Point> = points.iter().copied().collect();

    for q in random_points(500, &UNIT_SQUARE, 4) {
        assert_eq!(tree.contains(q), stored.contains(&q));
    }
    // Same x as a stored point, different y
    for p in points.iter().take(50) {
        let shifted = Point::new(p.x(), (p.y() + 0.5) % 1.0).unwrap();
        assert_eq!(tree.contains(shifted), stored.contains(&shifted));
    }
}

#[test]
fn test_idempotent_reinsert() {
    let points = random_points(300, &UNIT_SQUARE, 5);
    let mut tree: KdTree = points.iter().copied().collect();
    let before = tree.points();

    for &p in &points {
        assert!(!tree.insert(p));
    }
    assert_eq!(tree.size(), 300);
    assert_eq!(tree.points(), before);
}

#[test]
fn test_sorted_insertion_is_still_correct() {
    let points: Vec<Point> = (0..1000)
        .map(|i| Point::new(i as f64 / 1000.0, 1.0 - i as f64 / 1000.0).unwrap())
        .collect();
    let tree: KdTree = points.iter().copied().collect();
    let oracle: PointSet = points.iter().copied().collect();

    let q = Point::new(0.25, 0.25).unwrap();
    let near = tree.nearest(q).unwrap();
    assert_eq!(near.distance_sq(&q), oracle.nearest(q).unwrap().distance_sq(&q));

    let rect = BoundingBox::new(0.1, 0.1, 0.3, 0.95).unwrap();
    assert_eq!(tree.range(&rect).len(), oracle.range(&rect).len());
}
