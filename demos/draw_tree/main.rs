mod svg;

use std::path::PathBuf;

use clap::Parser;
use kdplane::io::random_points;
use kdplane::KdTree;
use tracing::info;
use tracing_subscriber::EnvFilter;

use svg::DrawStyle;

/// Insert points into a 2D tree and render the tree's splits as SVG.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File of whitespace-separated coordinate pairs. Random points are used when omitted.
    input: Option<PathBuf>,

    /// Number of random points to insert when no input file is given.
    #[arg(long, default_value_t = 200)]
    random: usize,

    /// Seed for the random points.
    #[arg(long, default_value_t = 2016)]
    seed: u64,

    /// Output SVG file.
    #[arg(short, long, default_value = "kdtree.svg")]
    output: PathBuf,

    /// Width and height of the image in pixels.
    #[arg(long, default_value_t = 1024)]
    size: u32,

    /// Radius of the drawn points in pixels.
    #[arg(long, default_value_t = 4)]
    point_radius: u32,

    /// Width of the split lines in pixels.
    #[arg(long, default_value_t = 1)]
    line_width: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut tree = KdTree::new();
    match &args.input {
        Some(path) => {
            let read = tree.import_points(path)?;
            info!(path = %path.display(), read, stored = tree.size(), "loaded points");
        }
        None => {
            let bounds = tree.bounds();
            tree.extend(random_points(args.random, &bounds, args.seed));
            info!(stored = tree.size(), seed = args.seed, "generated random points");
        }
    }
    info!(height = tree.height(), "tree built");

    let style = DrawStyle {
        point_radius: args.point_radius,
        line_width: args.line_width,
        ..DrawStyle::default()
    };
    svg::draw_tree(&tree, &args.output, args.size, &style)?;

    println!("Output saved to {}", args.output.display());
    Ok(())
}
