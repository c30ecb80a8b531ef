use crate::bounds::BoundingBox;
use crate::error::KdError;
use crate::io::{get_seed, parse_points, random_points};
use crate::kdtree::{KdTree, Orientation};
use crate::point::Point;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_ORIENTATION: &'static str = r#"
export const ORIENTATION_VERTICAL = 0;
export const ORIENTATION_HORIZONTAL = 1;
"#;

fn to_js(e: KdError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn flat(points: &[Point]) -> Vec<f64> {
    points.iter().flat_map(|p| p.to_array()).collect()
}

/// Reads a flat `[x0, y0, x1, y1, ...]` array back into points.
fn unflat(coords: &[f64]) -> Result<Vec<Point>, KdError> {
    if coords.len() % 2 != 0 {
        return Err(KdError::DanglingCoordinate { count: coords.len() });
    }
    coords.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect()
}

// --- Rectangle ---

/// Axis-aligned rectangle for range queries and tree domains.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct Rect2D {
    inner: BoundingBox,
}

#[wasm_bindgen]
impl Rect2D {
    #[wasm_bindgen(constructor)]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Rect2D, JsValue> {
        BoundingBox::new(min_x, min_y, max_x, max_y)
            .map(|inner| Rect2D { inner })
            .map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn min_x(&self) -> f64 { self.inner.min_x() }
    #[wasm_bindgen(getter)]
    pub fn min_y(&self) -> f64 { self.inner.min_y() }
    #[wasm_bindgen(getter)]
    pub fn max_x(&self) -> f64 { self.inner.max_x() }
    #[wasm_bindgen(getter)]
    pub fn max_y(&self) -> f64 { self.inner.max_y() }
}

impl From<Rect2D> for BoundingBox {
    fn from(r: Rect2D) -> Self {
        r.inner
    }
}

// --- Tree ---

/// WASM wrapper for [`KdTree`]. Points cross the boundary as `x, y` pairs or
/// flat `[x, y, x, y, ...]` arrays.
#[wasm_bindgen(js_name = KdTree2D)]
pub struct KdTree2D {
    inner: KdTree,
}

#[wasm_bindgen(js_class = KdTree2D)]
impl KdTree2D {
    /// Creates an empty tree over the unit square.
    #[wasm_bindgen(constructor)]
    pub fn new() -> KdTree2D {
        KdTree2D { inner: KdTree::new() }
    }

    #[wasm_bindgen(js_name = withBounds)]
    pub fn with_bounds(bounds: &Rect2D) -> KdTree2D {
        KdTree2D { inner: KdTree::with_bounds(bounds.inner) }
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize { self.inner.size() }

    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool { self.inner.is_empty() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize { self.inner.height() }

    pub fn insert(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        let p = Point::new(x, y).map_err(to_js)?;
        Ok(self.inner.insert(p))
    }

    pub fn contains(&self, x: f64, y: f64) -> Result<bool, JsValue> {
        let p = Point::new(x, y).map_err(to_js)?;
        Ok(self.inner.contains(p))
    }

    /// Points inside `rect` as a flat array.
    pub fn range(&self, rect: &Rect2D) -> Vec<f64> {
        flat(&self.inner.range(&rect.inner))
    }

    /// The closest point as `[x, y]`, or `undefined` on an empty tree.
    pub fn nearest(&self, x: f64, y: f64) -> Result<Option<Vec<f64>>, JsValue> {
        let p = Point::new(x, y).map_err(to_js)?;
        Ok(self.inner.nearest(p).map(|n| n.to_array().to_vec()))
    }

    /// Nearest point for each query in a flat array. An empty tree gives an
    /// empty result.
    pub fn nearest_batch(&self, queries: &[f64]) -> Result<Vec<f64>, JsValue> {
        let queries = unflat(queries).map_err(to_js)?;
        let found: Vec<Point> = self.inner.nearest_batch(&queries).into_iter().flatten().collect();
        Ok(flat(&found))
    }

    /// Parses whitespace-separated coordinate pairs and inserts them.
    /// Returns the number of pairs read.
    pub fn load_points(&mut self, text: &str) -> Result<usize, JsValue> {
        let points = parse_points(text).map_err(to_js)?;
        let count = points.len();
        self.inner.extend(points);
        Ok(count)
    }

    /// Inserts `count` random points drawn from the tree's domain.
    pub fn random_points(&mut self, count: usize) {
        let points = random_points(count, &self.inner.bounds(), get_seed());
        self.inner.extend(points);
    }

    /// Stored points in pre-order as a flat array.
    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> { flat(&self.inner.points()) }

    /// Split segments as `[x0, y0, x1, y1, ...]`, one quadruple per node.
    pub fn splits(&self) -> Vec<f64> {
        self.inner
            .splits()
            .iter()
            .flat_map(|s| [s.start[0], s.start[1], s.end[0], s.end[1]])
            .collect()
    }

    /// Orientation of each split: 0 for vertical, 1 for horizontal.
    pub fn split_orientations(&self) -> Vec<u8> {
        self.inner
            .splits()
            .iter()
            .map(|s| match s.orientation {
                Orientation::Vertical => 0,
                Orientation::Horizontal => 1,
            })
            .collect()
    }
}

impl Default for KdTree2D {
    fn default() -> Self {
        Self::new()
    }
}
