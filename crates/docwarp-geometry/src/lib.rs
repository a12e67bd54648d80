#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the geometry module.
pub mod error;

/// Homography estimation and application.
pub mod homography;

/// Small fixed-size linear algebra utilities.
pub mod linalg;

/// 2d point type.
pub mod point;

pub use crate::error::GeometryError;
pub use crate::homography::{canonical_rectangle, homography_4pt2d, Homography};
pub use crate::point::Point2;
