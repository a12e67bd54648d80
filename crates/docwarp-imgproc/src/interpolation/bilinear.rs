use docwarp_image::Image;

/// Kernel for bilinear interpolation
///
/// Neighbours that fall outside the image contribute the background value `0`.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
///
/// # Returns
///
/// The interpolated pixel values, or `None` when `(floor(u), floor(v))` is outside the image.
pub(crate) fn bilinear_interpolation<const C: usize>(
    image: &Image<u8, C>,
    u: f64,
    v: f64,
) -> Option<[u8; C]> {
    let (rows, cols) = (image.rows(), image.cols());

    let (fu, fv) = (u.floor(), v.floor());
    if !(fu >= 0.0 && fu < cols as f64 && fv >= 0.0 && fv < rows as f64) {
        return None;
    }

    let (iu0, iv0) = (fu as usize, fv as usize);
    let frac_u = u - fu;
    let frac_v = v - fv;

    let w00 = (1.0 - frac_u) * (1.0 - frac_v);
    let w01 = frac_u * (1.0 - frac_v);
    let w10 = (1.0 - frac_u) * frac_v;
    let w11 = frac_u * frac_v;

    let data = image.as_slice();
    let sample = |iu: usize, iv: usize, k: usize| -> f64 {
        if iu < cols && iv < rows {
            data[(iv * cols + iu) * C + k] as f64
        } else {
            0.0
        }
    };

    let mut pixel = [0u8; C];
    for (k, out) in pixel.iter_mut().enumerate() {
        let val = sample(iu0, iv0, k) * w00
            + sample(iu0 + 1, iv0, k) * w01
            + sample(iu0, iv0 + 1, k) * w10
            + sample(iu0 + 1, iv0 + 1, k) * w11;
        *out = val.round().clamp(0.0, 255.0) as u8;
    }

    Some(pixel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docwarp_image::{ImageError, ImageSize};

    #[test]
    fn test_bilinear_midpoint() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 100, 100, 200],
        )?;
        assert_eq!(bilinear_interpolation(&image, 0.0, 0.0), Some([0]));
        assert_eq!(bilinear_interpolation(&image, 0.5, 0.5), Some([100]));
        assert_eq!(bilinear_interpolation(&image, 0.5, 0.0), Some([50]));
        // the right neighbour of the last column is background
        assert_eq!(bilinear_interpolation(&image, 1.5, 0.0), Some([50]));
        Ok(())
    }
}
