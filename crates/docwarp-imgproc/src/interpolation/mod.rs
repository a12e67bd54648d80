//! Pixel interpolation methods for image warping.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: takes the pixel containing the sample point (floor), no interpolation
//! - **Bilinear**: linear interpolation between the four adjacent pixels

mod bilinear;
mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
