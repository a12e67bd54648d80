#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use docwarp_capture as capture;

#[doc(inline)]
pub use docwarp_geometry as geometry;

#[doc(inline)]
pub use docwarp_image as image;

#[doc(inline)]
pub use docwarp_imgproc as imgproc;

#[doc(inline)]
pub use docwarp_io as io;

/// Two-pass rectification: coarse preview, then the final page from captured corners.
pub mod pipeline;
