use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::device::Knob;

/// Which knob drives which cursor coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisMapping {
    /// Knob moving the cursor along the columns.
    pub x: Knob,
    /// Knob moving the cursor along the rows.
    pub y: Knob,
}

impl Default for AxisMapping {
    fn default() -> Self {
        Self {
            x: Knob::Red,
            y: Knob::Blue,
        }
    }
}

/// Configuration of the interactive corner capture.
///
/// Every field has a default, so a partial JSON object is accepted.
///
/// # Example
///
/// ```
/// use docwarp_capture::CaptureConfig;
///
/// let config = CaptureConfig::default();
/// assert_eq!(config.poll_interval_ms, 20);
/// assert_eq!(config.cursor_color, [127, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Pause between two iterations of the capture loop, in milliseconds.
    pub poll_interval_ms: u64,
    /// Pause between two reads of the confirm signal while waiting for its release.
    pub debounce_interval_ms: u64,
    /// Maximum number of confirm reads while waiting for a release.
    pub debounce_max_polls: usize,
    /// Knob to coordinate assignment.
    pub axes: AxisMapping,
    /// Knob whose press confirms the cursor position.
    pub confirm: Knob,
    /// RGB colour of the cursor.
    pub cursor_color: [u8; 3],
    /// Arm length of the cursor in pixels.
    pub cursor_arm: usize,
    /// RGB colour of the already confirmed corners.
    pub marker_color: [u8; 3],
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 20,
            debounce_interval_ms: 5,
            debounce_max_polls: 2000,
            axes: AxisMapping::default(),
            confirm: Knob::Green,
            cursor_color: [127, 0, 0],
            cursor_arm: 2,
            marker_color: [0, 127, 0],
        }
    }
}

impl CaptureConfig {
    /// The poll interval as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// The debounce interval as a [`Duration`].
    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_interval_ms)
    }
}
