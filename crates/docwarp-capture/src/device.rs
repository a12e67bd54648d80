use serde::{Deserialize, Serialize};

use docwarp_image::Image;

use crate::{config::AxisMapping, error::CaptureError};

/// One of the three rotary knobs of the input panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Knob {
    /// The blue knob.
    Blue,
    /// The green knob.
    Green,
    /// The red knob.
    Red,
}

impl Knob {
    fn counter_shift(self) -> u32 {
        match self {
            Knob::Blue => 0,
            Knob::Green => 8,
            Knob::Red => 16,
        }
    }

    fn pressed_bit(self) -> u32 {
        match self {
            Knob::Blue => 24,
            Knob::Green => 25,
            Knob::Red => 26,
        }
    }
}

/// The 32-bit knob register of the input panel.
///
/// Bits 0..8, 8..16 and 16..24 hold the 8-bit rotation counters of the blue,
/// green and red knobs. Bits 24, 25 and 26 are set while the knob is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KnobWord(u32);

impl KnobWord {
    /// Wrap a raw register value.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The rotation counter of `knob`.
    pub fn counter(self, knob: Knob) -> u8 {
        ((self.0 >> knob.counter_shift()) & 0xff) as u8
    }

    /// Whether `knob` is pressed.
    pub fn is_pressed(self, knob: Knob) -> bool {
        (self.0 >> knob.pressed_bit()) & 1 == 1
    }

    /// Same word with the counter of `knob` replaced.
    pub fn with_counter(self, knob: Knob, value: u8) -> Self {
        let shift = knob.counter_shift();
        Self((self.0 & !(0xff << shift)) | ((value as u32) << shift))
    }

    /// Same word with the pressed flag of `knob` set or cleared.
    pub fn with_pressed(self, knob: Knob, pressed: bool) -> Self {
        let bit = 1u32 << knob.pressed_bit();
        if pressed {
            Self(self.0 | bit)
        } else {
            Self(self.0 & !bit)
        }
    }
}

/// A two-axis input with a confirm button and an RGB indicator.
pub trait InputDevice {
    /// Read the 8-bit rotation counter of `knob`.
    fn read_axis(&mut self, knob: Knob) -> Result<u8, CaptureError>;

    /// Read whether the confirm `knob` is currently pressed.
    fn read_confirm(&mut self, knob: Knob) -> Result<bool, CaptureError>;

    /// Light the RGB indicator.
    fn set_indicator(&mut self, r: u8, g: u8, b: u8) -> Result<(), CaptureError>;
}

/// A sink for the frames rendered by the capture loop.
pub trait Display {
    /// Show one RGB frame.
    fn show(&mut self, frame: &Image<u8, 3>) -> Result<(), CaptureError>;
}

impl<T: Display + ?Sized> Display for Box<T> {
    fn show(&mut self, frame: &Image<u8, 3>) -> Result<(), CaptureError> {
        (**self).show(frame)
    }
}

/// An [`InputDevice`] replaying a recorded sequence of knob register words.
///
/// Axis reads sample the current word. Every confirm read samples the current
/// word and then moves to the next one, so one word covers one poll of the
/// capture loop or one debounce read. Reading past the end is a device error.
#[derive(Debug, Clone, Default)]
pub struct ReplayDevice {
    words: Vec<KnobWord>,
    position: usize,
    indicator: Option<[u8; 3]>,
}

impl ReplayDevice {
    /// Create a device replaying `words` in order.
    pub fn new(words: Vec<KnobWord>) -> Self {
        Self {
            words,
            position: 0,
            indicator: None,
        }
    }

    /// Parse a trace with one register value per line.
    ///
    /// Values are decimal or `0x` prefixed hexadecimal. Empty lines and lines
    /// starting with `#` are skipped.
    pub fn from_trace(trace: &str) -> Result<Self, CaptureError> {
        let mut words = Vec::new();
        for (lineno, line) in trace.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let parsed = match line.strip_prefix("0x").or_else(|| line.strip_prefix("0X")) {
                Some(hex) => u32::from_str_radix(hex, 16),
                None => line.parse::<u32>(),
            };
            let raw = parsed.map_err(|e| {
                CaptureError::Device(format!("invalid knob word on line {}: {e}", lineno + 1))
            })?;
            words.push(KnobWord::from_raw(raw));
        }
        Ok(Self::new(words))
    }

    /// The last colour written to the indicator.
    pub fn indicator(&self) -> Option<[u8; 3]> {
        self.indicator
    }

    /// Number of words not consumed yet.
    pub fn remaining(&self) -> usize {
        self.words.len().saturating_sub(self.position)
    }

    fn current(&self) -> Result<KnobWord, CaptureError> {
        self.words
            .get(self.position)
            .copied()
            .ok_or_else(|| CaptureError::Device("knob trace exhausted".to_string()))
    }
}

impl InputDevice for ReplayDevice {
    fn read_axis(&mut self, knob: Knob) -> Result<u8, CaptureError> {
        Ok(self.current()?.counter(knob))
    }

    fn read_confirm(&mut self, knob: Knob) -> Result<bool, CaptureError> {
        let pressed = self.current()?.is_pressed(knob);
        self.position += 1;
        Ok(pressed)
    }

    fn set_indicator(&mut self, r: u8, g: u8, b: u8) -> Result<(), CaptureError> {
        self.indicator = Some([r, g, b]);
        Ok(())
    }
}

/// One step of a [`ScriptedDevice`]: rotate both axes, optionally press confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    /// Rotation of the x knob in counter ticks.
    pub dx: i8,
    /// Rotation of the y knob in counter ticks.
    pub dy: i8,
    /// Whether confirm is pressed during this step.
    pub pressed: bool,
}

impl ScriptStep {
    /// Rotate the knobs without confirming.
    pub const fn moving(dx: i8, dy: i8) -> Self {
        Self {
            dx,
            dy,
            pressed: false,
        }
    }

    /// Rotate the knobs and confirm.
    pub const fn confirming(dx: i8, dy: i8) -> Self {
        Self {
            dx,
            dy,
            pressed: true,
        }
    }
}

/// An [`InputDevice`] driven by relative knob movements.
///
/// The steps are rendered into register words for the given knob assignment,
/// starting from zeroed counters, and replayed. Every press is followed by a
/// released word so that a single press yields a single corner.
#[derive(Debug, Clone)]
pub struct ScriptedDevice {
    inner: ReplayDevice,
}

impl ScriptedDevice {
    /// Render `steps` for the knobs named by `axes` and `confirm`.
    pub fn new(steps: &[ScriptStep], axes: AxisMapping, confirm: Knob) -> Self {
        let mut word = KnobWord::default();
        // the first word only sets the baselines
        let mut words = vec![word];
        for step in steps {
            let x = word.counter(axes.x).wrapping_add(step.dx as u8);
            word = word.with_counter(axes.x, x);
            let y = word.counter(axes.y).wrapping_add(step.dy as u8);
            word = word.with_counter(axes.y, y);
            words.push(word.with_pressed(confirm, step.pressed));
            if step.pressed {
                words.push(word.with_pressed(confirm, false));
            }
        }
        Self {
            inner: ReplayDevice::new(words),
        }
    }

    /// The last colour written to the indicator.
    pub fn indicator(&self) -> Option<[u8; 3]> {
        self.inner.indicator()
    }

    /// Number of register words not consumed yet.
    pub fn remaining(&self) -> usize {
        self.inner.remaining()
    }
}

impl InputDevice for ScriptedDevice {
    fn read_axis(&mut self, knob: Knob) -> Result<u8, CaptureError> {
        self.inner.read_axis(knob)
    }

    fn read_confirm(&mut self, knob: Knob) -> Result<bool, CaptureError> {
        self.inner.read_confirm(knob)
    }

    fn set_indicator(&mut self, r: u8, g: u8, b: u8) -> Result<(), CaptureError> {
        self.inner.set_indicator(r, g, b)
    }
}
