use thiserror::Error;

/// Errors reported by `kdplane`.
///
/// The tree operations themselves never fail. Errors only arise when building
/// the values passed to them, or when loading points from text.
#[derive(Error, Debug)]
pub enum KdError {
    /// A point coordinate was NaN or infinite.
    #[error("point ({x}, {y}) has a non-finite coordinate")]
    NonFiniteCoordinate { x: f64, y: f64 },

    /// Rectangle bounds were non-finite or inverted.
    #[error("invalid bounds: [{min_x}, {max_x}] x [{min_y}, {max_y}]")]
    InvalidBounds {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    /// A token in a point file is not a number.
    #[error("cannot parse '{token}' as a coordinate (value #{position})")]
    Parse { token: String, position: usize },

    /// A point file holds an odd number of values.
    #[error("point file holds {count} values, the last one has no partner")]
    DanglingCoordinate { count: usize },

    /// I/O error while reading a point file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for `kdplane` operations.
pub type Result<T> = std::result::Result<T, KdError>;
