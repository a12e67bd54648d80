use docwarp_image::Image;

/// Kernel for nearest neighbor interpolation
///
/// The sample point is truncated towards negative infinity, so it selects the
/// pixel whose area contains it.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The pixel values, or `None` when `(floor(u), floor(v))` is outside the image.
pub(crate) fn nearest_neighbor_interpolation<const C: usize>(
    image: &Image<u8, C>,
    u: f64,
    v: f64,
) -> Option<[u8; C]> {
    let (rows, cols) = (image.rows(), image.cols());

    let (iu, iv) = (u.floor(), v.floor());
    if !(iu >= 0.0 && iu < cols as f64 && iv >= 0.0 && iv < rows as f64) {
        return None;
    }

    let base = (iv as usize * cols + iu as usize) * C;

    let mut pixel = [0u8; C];
    pixel.copy_from_slice(&image.as_slice()[base..base + C]);

    Some(pixel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docwarp_image::{ImageError, ImageSize};

    #[test]
    fn test_nearest_floor() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 1, 2, 3],
        )?;
        assert_eq!(nearest_neighbor_interpolation(&image, 0.9, 0.9), Some([0]));
        assert_eq!(nearest_neighbor_interpolation(&image, 1.0, 0.2), Some([1]));
        assert_eq!(nearest_neighbor_interpolation(&image, 1.99, 1.99), Some([3]));
        assert_eq!(nearest_neighbor_interpolation(&image, -0.01, 0.0), None);
        Ok(())
    }
}
