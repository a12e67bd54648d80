use serde::{Deserialize, Serialize};

use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use docwarp_image::Image;

/// Interpolation mode for the warp operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    #[default]
    Nearest,
    /// Bilinear interpolation
    Bilinear,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// The interpolated pixel, or `None` when the sample point falls outside the image.
pub fn interpolate_pixel<const C: usize>(
    image: &Image<u8, C>,
    u: f64,
    v: f64,
    interpolation: InterpolationMode,
) -> Option<[u8; C]> {
    match interpolation {
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v),
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v),
    }
}
