//! # kdplane
//!
//! `kdplane` is a Rust library for indexing points in the plane with a 2D tree,
//! designed to be used in Rust as well as compiled to WebAssembly (WASM). It answers
//! membership, rectangle range and nearest-neighbor queries over a growing point set.
//!
//! ## Features
//!
//! - **WASM-first**: Built with `wasm-bindgen` for seamless integration with JavaScript and TypeScript.
//! - **Pruned Queries**: Every node keeps the rectangle carved out by its ancestors, so range and
//!   nearest-neighbor searches skip subtrees that cannot contribute.
//! - **Parallel Batches**: Many read-only queries can be answered at once with `rayon`.
//! - **Reference Oracle**: A brute-force [`PointSet`] with the same interface for testing.
//!
//! ## Example
//!
//! ```
//! use kdplane::{BoundingBox, KdTree, Point};
//!
//! let mut tree = KdTree::new();
//! for (x, y) in [(0.5, 0.5), (0.2, 0.2), (0.6, 0.6)] {
//!     tree.insert(Point::new(x, y)?);
//! }
//!
//! let near = tree.nearest(Point::new(0.5, 0.6)?);
//! assert_eq!(near, Some(Point::new(0.5, 0.5)?));
//!
//! let inside = tree.range(&BoundingBox::new(0.0, 0.0, 0.4, 0.4)?);
//! assert_eq!(inside, vec![Point::new(0.2, 0.2)?]);
//! # Ok::<(), kdplane::KdError>(())
//! ```
//!
//! See the `demos/` directory for SVG rendering of a tree's splits.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`KdTree`] struct.

mod bounds;
mod error;
mod index;
pub mod io;
mod kdtree;
mod point;
mod point_set;
mod wasm;

pub use bounds::BoundingBox;
pub use bounds::UNIT_SQUARE;
pub use error::KdError;
pub use error::Result;
pub use index::PointIndex;
pub use kdtree::KdTree;
pub use kdtree::Orientation;
pub use kdtree::Split;
pub use point::Point;
pub use point_set::PointSet;
pub use wasm::KdTree2D;
pub use wasm::Rect2D;
