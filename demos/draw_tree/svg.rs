use std::path::Path;

use kdplane::{KdTree, Orientation};
use plotters::prelude::*;

/// Pen settings for drawing a tree.
#[derive(Clone, Debug)]
pub struct DrawStyle {
    pub point_radius: u32,
    pub line_width: u32,
    pub point_color: RGBColor,
    pub vertical_color: RGBColor,
    pub horizontal_color: RGBColor,
}

impl Default for DrawStyle {
    fn default() -> Self {
        DrawStyle {
            point_radius: 4,
            line_width: 1,
            point_color: BLACK,
            vertical_color: RED,
            horizontal_color: BLUE,
        }
    }
}

/// Draws the domain outline, every split segment and every point.
pub fn draw_tree(
    tree: &KdTree,
    filename: &Path,
    size: u32,
    style: &DrawStyle,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(filename, (size, size)).into_drawing_area();
    root.fill(&WHITE)?;

    let b = tree.bounds();
    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(b.min_x()..b.max_x(), b.min_y()..b.max_y())?;

    // Draw bounding box
    chart.draw_series(std::iter::once(PathElement::new(
        vec![
            (b.min_x(), b.min_y()),
            (b.max_x(), b.min_y()),
            (b.max_x(), b.max_y()),
            (b.min_x(), b.max_y()),
            (b.min_x(), b.min_y()),
        ],
        BLACK.stroke_width(2),
    )))?;

    // Splits first so the points are drawn on top
    chart.draw_series(tree.splits().into_iter().map(|s| {
        let color = match s.orientation {
            Orientation::Vertical => style.vertical_color,
            Orientation::Horizontal => style.horizontal_color,
        };
        PathElement::new(
            vec![(s.start[0], s.start[1]), (s.end[0], s.end[1])],
            color.stroke_width(style.line_width),
        )
    }))?;

    chart.draw_series(
        tree.points()
            .into_iter()
            .map(|p| Circle::new((p.x(), p.y()), style.point_radius, style.point_color.filled())),
    )?;

    root.present()?;
    Ok(())
}
