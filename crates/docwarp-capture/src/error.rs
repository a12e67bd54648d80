/// An error type for the capture module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CaptureError {
    /// The preview to pick corners on has no pixels.
    #[error("Cannot capture corners on an empty preview")]
    EmptyPreview,

    /// The display sink failed to show a frame.
    #[error("Display failure: {0}")]
    Display(String),

    /// The input device failed to deliver a reading.
    #[error("Input device failure: {0}")]
    Device(String),

    /// The preview frame could not be created.
    #[error(transparent)]
    Image(#[from] docwarp_image::ImageError),
}
