use std::fs;
use std::path::Path;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::bounds::BoundingBox;
use crate::error::{KdError, Result};
use crate::point::Point;

/// Parses whitespace-separated numbers into points, two values per point.
///
/// Line breaks carry no meaning, so `0.1 0.2\n0.3 0.4` and `0.1\n0.2 0.3\n0.4`
/// give the same two points.
pub fn parse_points(text: &str) -> Result<Vec<Point>> {
    let values = text
        .split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            token.parse::<f64>().map_err(|_| KdError::Parse {
                token: token.to_string(),
                position,
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    if values.len() % 2 != 0 {
        return Err(KdError::DanglingCoordinate { count: values.len() });
    }

    values.chunks(2).map(|c| Point::new(c[0], c[1])).collect()
}

/// Reads a point file, see [`parse_points`] for the format.
pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    let text = fs::read_to_string(path)?;
    parse_points(&text)
}

/// `count` points drawn uniformly from `bounds`.
pub fn random_points(count: usize, bounds: &BoundingBox, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let x = lerp(bounds.min_x(), bounds.max_x(), rng.r#gen());
            let y = lerp(bounds.min_y(), bounds.max_y(), rng.r#gen());
            Point::from_finite(x, y)
        })
        .collect()
}

/// Interpolates without forming `max - min`, which overflows for extents
/// wider than `f64::MAX`. The result stays finite and inside `[min, max]`.
fn lerp(min: f64, max: f64, t: f64) -> f64 {
    (min * (1.0 - t) + max * t).clamp(min, max)
}

pub fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}
