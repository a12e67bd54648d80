//! Geometric image transformations using perspective warps.
//!
//! The warp iterates over the destination raster and maps every pixel back into
//! the source through the inverse homography, so the output has no holes.
//!
//! # Examples
//!
//! Rectifying a quadrilateral into a 320x480 page:
//!
//! ```no_run
//! use docwarp_geometry::{canonical_rectangle, homography_4pt2d, Point2};
//! use docwarp_image::{Image, ImageSize};
//! use docwarp_imgproc::{interpolation::InterpolationMode, warp::rectify};
//!
//! let src = Image::<u8, 1>::from_size_val(ImageSize { width: 640, height: 480 }, 0).unwrap();
//! let corners = [
//!     Point2::new(50.0, 50.0),
//!     Point2::new(270.0, 60.0),
//!     Point2::new(300.0, 430.0),
//!     Point2::new(40.0, 420.0),
//! ];
//! let h = homography_4pt2d(&corners, &canonical_rectangle(320.0, 480.0)).unwrap();
//! let page = rectify(&src, &h, [320, 480].into(), InterpolationMode::Nearest).unwrap();
//! assert_eq!(page.size().width, 320);
//! ```

mod perspective;

pub use perspective::{rectify, warp_perspective};

use docwarp_geometry::GeometryError;
use docwarp_image::ImageError;

/// An error type for the warp operations.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WarpError {
    /// The source or destination image has no pixels.
    #[error("Cannot warp an empty image")]
    EmptyImage,

    /// The homography is invalid, e.g. not invertible.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The destination image could not be created.
    #[error(transparent)]
    Image(#[from] ImageError),
}
