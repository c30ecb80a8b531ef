use kdplane::io::random_points;
use kdplane::{BoundingBox, KdTree, UNIT_SQUARE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize Rayon explicitly so thread creation (clone3) happens
    // before the heavy work we want to profile.
    rayon::ThreadPoolBuilder::new().build_global()?;

    let points = random_points(1_000_000, &UNIT_SQUARE, 1);
    let queries = random_points(100_000, &UNIT_SQUARE, 2);

    // Insertion is the sequential hot path
    let tree: KdTree = points.into_iter().collect();

    let found = tree.nearest_batch(&queries);
    let rect = BoundingBox::new(0.25, 0.25, 0.35, 0.35)?;
    let in_rect = tree.range(&rect);

    println!(
        "{} points, height {}, {} nearest answers, {} in range",
        tree.size(),
        tree.height(),
        found.iter().flatten().count(),
        in_rect.len()
    );
    Ok(())
}
