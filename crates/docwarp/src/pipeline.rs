use serde::{Deserialize, Serialize};

use docwarp_capture::{
    capture_correspondences, CaptureConfig, CaptureError, CornerCapture, Display, InputDevice,
};
use docwarp_geometry::{canonical_rectangle, homography_4pt2d, GeometryError, Homography, Point2};
use docwarp_image::{Image, ImageSize};
use docwarp_imgproc::{
    interpolation::InterpolationMode,
    warp::{rectify, WarpError},
};
use docwarp_io::IoError;

/// An error type for the rectification pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// The corners do not define a usable homography.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Resampling failed.
    #[error(transparent)]
    Warp(#[from] WarpError),

    /// The interactive capture failed.
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Reading or writing an image failed.
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Output geometry and sampling of the rectification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Width of the rectified page in pixels.
    pub output_width: usize,
    /// Height of the rectified page in pixels.
    pub output_height: usize,
    /// How source pixels are sampled.
    pub interpolation: InterpolationMode,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_width: 320,
            output_height: 480,
            interpolation: InterpolationMode::Nearest,
        }
    }
}

impl PipelineConfig {
    /// The size of the rectified page.
    pub fn output_size(&self) -> ImageSize {
        ImageSize {
            width: self.output_width,
            height: self.output_height,
        }
    }
}

/// Homography mapping `corners` of the source onto the output rectangle.
pub fn page_homography(
    corners: &[Point2; 4],
    config: &PipelineConfig,
) -> Result<Homography, PipelineError> {
    let size = config.output_size();
    let dst = canonical_rectangle(size.width as f64, size.height as f64);
    Ok(homography_4pt2d(corners, &dst)?)
}

/// Stretch the whole source onto the output rectangle.
///
/// This is the coarse first pass the operator picks the page corners on.
pub fn preview(
    source: &Image<u8, 1>,
    config: &PipelineConfig,
) -> Result<Image<u8, 1>, PipelineError> {
    if source.size().is_empty() {
        return Err(WarpError::EmptyImage.into());
    }
    let corners = canonical_rectangle(source.width() as f64, source.height() as f64);
    let h = page_homography(&corners, config)?;
    log::info!("preview {} -> {}", source.size(), config.output_size());
    Ok(rectify(source, &h, config.output_size(), config.interpolation)?)
}

/// Rectify `image` given its four page corners.
///
/// The corners are ordered top-left, top-right, bottom-right, bottom-left.
pub fn finalize(
    image: &Image<u8, 1>,
    corners: &[Point2; 4],
    config: &PipelineConfig,
) -> Result<Image<u8, 1>, PipelineError> {
    let (src, dst) = capture_correspondences(corners, config.output_size());
    let h = homography_4pt2d(&src, &dst)?;
    log::debug!("page homography {:?}", h.matrix());
    log::info!(
        "rectifying {} from corners {} {} {} {}",
        image.size(),
        corners[0],
        corners[1],
        corners[2],
        corners[3]
    );
    Ok(rectify(image, &h, config.output_size(), config.interpolation)?)
}

/// Build the preview, capture the corners on it and rectify the preview.
///
/// Returns the captured corners together with the rectified page.
pub fn rectify_interactive<D: InputDevice, S: Display>(
    source: &Image<u8, 1>,
    device: D,
    display: S,
    capture_config: CaptureConfig,
    config: &PipelineConfig,
) -> Result<([Point2; 4], Image<u8, 1>), PipelineError> {
    let preview = preview(source, config)?;
    let corners = CornerCapture::new(&preview, device, display, capture_config)?.run()?;
    let page = finalize(&preview, &corners, config)?;
    Ok((corners, page))
}
