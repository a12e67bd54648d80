#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the io module.
pub mod error;

/// High-level read and write functions for images.
pub mod functional;

/// Listing and selecting images in a directory.
pub mod menu;

pub use crate::error::IoError;
