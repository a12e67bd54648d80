use crate::parallel;
use docwarp_image::{Image, ImageError};

/// Define the RGB weights for the grayscale conversion.
const RW: f64 = 0.299;
const GW: f64 = 0.587;
const BW: f64 = 0.114;

/// Convert an 8-bit RGB image to grayscale using the formula:
///
/// Y = 0.299 * R + 0.587 * G + 0.114 * B
///
/// The intensity is rounded to the nearest integer.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output grayscale image.
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use docwarp_image::{Image, ImageSize};
/// use docwarp_imgproc::color::gray_from_rgb_u8;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 1,
///         height: 1,
///     },
///     vec![255, 255, 255],
/// )
/// .unwrap();
///
/// let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// gray_from_rgb_u8(&image, &mut gray).unwrap();
/// assert_eq!(gray.as_slice(), &[255]);
/// ```
pub fn gray_from_rgb_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let r = src_pixel[0] as f64;
        let g = src_pixel[1] as f64;
        let b = src_pixel[2] as f64;
        dst_pixel[0] = (RW * r + GW * g + BW * b).round().clamp(0.0, 255.0) as u8;
    });

    Ok(())
}

/// Replicate a grayscale image into the three channels of an RGB image.
///
/// Precondition: the input and output images must have the same size.
pub fn rgb_from_gray_u8(src: &Image<u8, 1>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        dst_pixel.fill(src_pixel[0]);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docwarp_image::ImageSize;

    #[test]
    fn gray_from_rgb_weights() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 4,
                height: 1,
            },
            vec![
                255, 0, 0,
                0, 255, 0,
                0, 0, 255,
                10, 20, 30,
            ],
        )?;

        let mut gray = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        gray_from_rgb_u8(&image, &mut gray)?;

        // 76.245, 149.685, 29.07, 18.15
        assert_eq!(gray.as_slice(), &[76, 150, 29, 18]);

        Ok(())
    }

    #[test]
    fn gray_from_rgb_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val([2, 2].into(), 0)?;
        let mut gray = Image::<u8, 1>::from_size_val([3, 2].into(), 0)?;
        assert_eq!(
            gray_from_rgb_u8(&image, &mut gray),
            Err(ImageError::InvalidImageSize(2, 2, 3, 2))
        );
        Ok(())
    }

    #[test]
    fn rgb_from_gray() -> Result<(), ImageError> {
        let gray = Image::<u8, 1>::new([2, 1].into(), vec![7, 200])?;
        let mut rgb = Image::<u8, 3>::from_size_val(gray.size(), 0)?;
        rgb_from_gray_u8(&gray, &mut rgb)?;
        assert_eq!(rgb.as_slice(), &[7, 7, 7, 200, 200, 200]);
        Ok(())
    }
}
