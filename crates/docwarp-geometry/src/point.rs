use serde::{Deserialize, Serialize};

/// A point in the image plane.
///
/// Coordinates are real valued; they are truncated when used as pixel indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    /// horizontal coordinate (column).
    pub x: f64,
    /// vertical coordinate (row).
    pub y: f64,
}

impl Point2 {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point as homogeneous coordinates `[x, y, 1]`.
    pub fn to_homogeneous(&self) -> [f64; 3] {
        [self.x, self.y, 1.0]
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point2 {
    fn from(p: [f64; 2]) -> Self {
        Self { x: p[0], y: p[1] }
    }
}

impl std::fmt::Display for Point2 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
