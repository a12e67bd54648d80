use docwarp_image::Image;

/// Set a pixel's color, ignoring coordinates outside of the image.
#[inline]
fn set_pixel<const C: usize>(img: &mut Image<u8, C>, x: i64, y: i64, color: [u8; C]) {
    if x < 0 || y < 0 || x >= img.cols() as i64 || y >= img.rows() as i64 {
        return;
    }
    let start = (y as usize * img.cols() + x as usize) * C;
    img.as_slice_mut()[start..start + C].copy_from_slice(&color);
}

/// Draws a plus-shaped marker centered at `center`.
///
/// Both arms extend `arm` pixels on each side of the center. The center pixel
/// itself is left untouched so the pixel under the cursor stays visible.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `center` - The center of the marker as a tuple of (x, y).
/// * `arm` - The length of each arm in pixels.
/// * `color` - The color of the marker as an array of `C` elements.
pub fn draw_plus<const C: usize>(
    img: &mut Image<u8, C>,
    center: (i64, i64),
    arm: usize,
    color: [u8; C],
) {
    let (cx, cy) = center;
    for d in 1..=arm as i64 {
        set_pixel(img, cx - d, cy, color);
        set_pixel(img, cx + d, cy, color);
        set_pixel(img, cx, cy - d, color);
        set_pixel(img, cx, cy + d, color);
    }
}

/// Draws a diagonal cross (x-shaped) marker centered at `center`.
///
/// Unlike [`draw_plus`] the center pixel is painted as well.
pub fn draw_cross<const C: usize>(
    img: &mut Image<u8, C>,
    center: (i64, i64),
    arm: usize,
    color: [u8; C],
) {
    let (cx, cy) = center;
    set_pixel(img, cx, cy, color);
    for d in 1..=arm as i64 {
        set_pixel(img, cx - d, cy - d, color);
        set_pixel(img, cx + d, cy - d, color);
        set_pixel(img, cx - d, cy + d, color);
        set_pixel(img, cx + d, cy + d, color);
    }
}
