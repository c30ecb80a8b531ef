use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kdplane::io::random_points;
use kdplane::{BoundingBox, KdTree, Point, UNIT_SQUARE};
use rand::prelude::*;
use rand::rngs::StdRng;

const NUM_POINTS: usize = 20_000;

fn uniform() -> Vec<Point> {
    random_points(NUM_POINTS, &UNIT_SQUARE, 1)
}

// Points gathered in a few tight clusters
fn clustered() -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(3);
    let centers = random_points(8, &UNIT_SQUARE, 4);
    (0..NUM_POINTS)
        .map(|i| {
            let c = centers[i % centers.len()];
            let x = (c.x() + (rng.r#gen::<f64>() - 0.5) * 0.02).clamp(0.0, 1.0);
            let y = (c.y() + (rng.r#gen::<f64>() - 0.5) * 0.02).clamp(0.0, 1.0);
            Point::new(x, y).unwrap()
        })
        .collect()
}

// Shuffled points along the diagonal
fn diagonal() -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(5);
    let mut points: Vec<Point> = (0..NUM_POINTS)
        .map(|i| {
            let v = i as f64 / NUM_POINTS as f64;
            Point::new(v, v).unwrap()
        })
        .collect();
    points.shuffle(&mut rng);
    points
}

fn benchmark_distributions(c: &mut Criterion) {
    let queries = random_points(1000, &UNIT_SQUARE, 2);
    let rect = BoundingBox::new(0.2, 0.2, 0.3, 0.3).unwrap();

    let mut group = c.benchmark_group("distributions");
    for (name, points) in [("uniform", uniform()), ("clustered", clustered()), ("diagonal", diagonal())] {
        let tree: KdTree = points.into_iter().collect();
        println!("{:9}: height {}", name, tree.height());

        group.bench_function(format!("{}_nearest", name), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(tree.nearest(*q));
                }
            })
        });

        group.bench_function(format!("{}_range", name), |b| {
            b.iter(|| black_box(tree.range(&rect)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_distributions);
criterion_main!(benches);
