use crate::{
    interpolation::{interpolate_pixel, InterpolationMode},
    parallel,
};

use docwarp_geometry::{Homography, Point2};
use docwarp_image::{Image, ImageSize};

use super::WarpError;

/// Applies a perspective transformation to an image.
///
/// * `src` - The input image with shape (height, width, channels).
/// * `dst` - The output image with shape (new_height, new_width, channels).
/// * `m` - The 3x3 perspective transformation matrix src -> dst.
/// * `interpolation` - The interpolation mode to use.
///
/// Destination pixels whose preimage falls outside `src` keep their current value.
///
/// # Errors
///
/// Fails with [`WarpError::EmptyImage`] when either image has no pixels, and with
/// a [`docwarp_geometry::GeometryError::SingularHomography`] when `m` cannot be inverted.
///
/// # Example
///
/// ```
/// use docwarp_geometry::Homography;
/// use docwarp_image::{Image, ImageSize};
/// use docwarp_imgproc::interpolation::InterpolationMode;
/// use docwarp_imgproc::warp::warp_perspective;
///
/// let src = Image::<u8, 1>::new(
///   ImageSize {
///     width: 2,
///     height: 3,
///   },
///   vec![0, 1, 2, 3, 4, 5],
/// ).unwrap();
///
/// // horizontal flip
/// let m = Homography::from_matrix([[-1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
///
/// let mut dst = Image::<u8, 1>::from_size_val(src.size(), 0).unwrap();
///
/// warp_perspective(&src, &mut dst, &m, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(dst.as_slice(), &[1, 0, 3, 2, 5, 4]);
/// ```
pub fn warp_perspective<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    m: &Homography,
    interpolation: InterpolationMode,
) -> Result<(), WarpError> {
    if src.size().is_empty() || dst.size().is_empty() {
        return Err(WarpError::EmptyImage);
    }

    // inverse perspective matrix, dst -> src
    let inv_m = m.inverse()?;

    log::debug!(
        "warp {} -> {} with {:?}",
        src.size(),
        dst.size(),
        interpolation
    );

    parallel::par_iter_rows_indexed(dst, |x, y, dst_pixel| {
        let Some(p) = inv_m.transform_point(Point2::new(x as f64, y as f64)) else {
            return;
        };
        if let Some(pixel) = interpolate_pixel(src, p.x, p.y, interpolation) {
            dst_pixel.copy_from_slice(&pixel);
        }
    });

    Ok(())
}

/// Resample `src` into a newly allocated image of the given size.
///
/// The output is initialised with the background value `0`, so pixels mapping
/// outside the source stay black.
///
/// * `src` - The input image.
/// * `m` - The 3x3 perspective transformation matrix src -> dst.
/// * `size` - The size of the output image.
/// * `interpolation` - The interpolation mode to use.
pub fn rectify<const C: usize>(
    src: &Image<u8, C>,
    m: &Homography,
    size: ImageSize,
    interpolation: InterpolationMode,
) -> Result<Image<u8, C>, WarpError> {
    let mut dst = Image::from_size_val(size, 0u8)?;
    warp_perspective(src, &mut dst, m, interpolation)?;
    Ok(dst)
}
