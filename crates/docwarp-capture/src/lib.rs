#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// The corner capture state machine.
pub mod capture;

/// Capture configuration.
pub mod config;

/// Input and display capabilities used by the capture loop.
pub mod device;

/// Error types for the capture module.
pub mod error;

pub use crate::capture::{capture_correspondences, CaptureSession, CaptureState, CornerCapture};
pub use crate::config::{AxisMapping, CaptureConfig};
pub use crate::device::{
    Display, InputDevice, Knob, KnobWord, ReplayDevice, ScriptStep, ScriptedDevice,
};
pub use crate::error::CaptureError;
