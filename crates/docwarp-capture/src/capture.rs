use docwarp_geometry::{canonical_rectangle, Point2};
use docwarp_image::{Image, ImageSize};
use docwarp_imgproc::{
    color::rgb_from_gray_u8,
    draw::{draw_cross, draw_plus},
};

use crate::{
    config::CaptureConfig,
    device::{Display, InputDevice},
    error::CaptureError,
};

/// Progress of a corner capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// `n` corners have been confirmed so far, `n < 4`.
    Collecting(usize),
    /// All four corners have been confirmed.
    Done,
}

/// The mutable state of one capture: confirmed corners, cursor and knob baselines.
#[derive(Debug, Clone)]
pub struct CaptureSession {
    points: [Point2; 4],
    count: usize,
    cursor: (usize, usize),
    baseline_x: u8,
    baseline_y: u8,
    awaiting_release: bool,
}

impl CaptureSession {
    fn new(baseline_x: u8, baseline_y: u8) -> Self {
        Self {
            points: [Point2::default(); 4],
            count: 0,
            cursor: (0, 0),
            baseline_x,
            baseline_y,
            awaiting_release: false,
        }
    }

    /// The current state of the capture.
    pub fn state(&self) -> CaptureState {
        if self.count >= 4 {
            CaptureState::Done
        } else {
            CaptureState::Collecting(self.count)
        }
    }

    /// The corners confirmed so far, in confirmation order.
    pub fn points(&self) -> &[Point2] {
        &self.points[..self.count]
    }

    /// The cursor position as `(x, y)`.
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    /// Whether a press outlived the debounce bound and a release has not been seen yet.
    pub fn is_awaiting_release(&self) -> bool {
        self.awaiting_release
    }

    /// The four corners once the capture is done.
    pub fn corners(&self) -> Option<[Point2; 4]> {
        (self.count == 4).then_some(self.points)
    }

    fn push(&mut self, p: Point2) {
        if self.count < 4 {
            self.points[self.count] = p;
            self.count += 1;
        }
    }
}

/// Wrap a cursor coordinate into `0..dim`.
///
/// Values below zero jump to the last index and values past the end jump to zero.
fn wrap_coordinate(value: i64, dim: usize) -> usize {
    if value < 0 {
        dim.saturating_sub(1)
    } else if value as u64 >= dim as u64 {
        0
    } else {
        value as usize
    }
}

fn move_coordinate(coord: usize, delta: i8, dim: usize) -> usize {
    wrap_coordinate(coord as i64 + delta as i64, dim)
}

/// Interactive selection of four corners on a preview image.
///
/// Every [`CornerCapture::poll`] renders the preview with the cursor, moves the
/// cursor by the knob rotation since the previous poll and records the cursor
/// when confirm is pressed.
pub struct CornerCapture<'a, D: InputDevice, S: Display> {
    preview: &'a Image<u8, 1>,
    device: D,
    display: S,
    config: CaptureConfig,
    session: CaptureSession,
    frame: Image<u8, 3>,
}

impl<'a, D: InputDevice, S: Display> CornerCapture<'a, D, S> {
    /// Start a capture on `preview`.
    ///
    /// The current knob counters are read once to set the baselines.
    ///
    /// # Errors
    ///
    /// Fails with [`CaptureError::EmptyPreview`] for a preview without pixels.
    pub fn new(
        preview: &'a Image<u8, 1>,
        mut device: D,
        display: S,
        config: CaptureConfig,
    ) -> Result<Self, CaptureError> {
        if preview.size().is_empty() {
            return Err(CaptureError::EmptyPreview);
        }

        let baseline_x = device.read_axis(config.axes.x)?;
        let baseline_y = device.read_axis(config.axes.y)?;
        let frame = Image::from_size_val(preview.size(), 0)?;

        Ok(Self {
            preview,
            device,
            display,
            config,
            session: CaptureSession::new(baseline_x, baseline_y),
            frame,
        })
    }

    /// The capture state so far.
    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    /// The input device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The display sink.
    pub fn display(&self) -> &S {
        &self.display
    }

    /// Run one iteration of the capture loop.
    ///
    /// Once done, further polls return [`CaptureState::Done`] without touching
    /// the device.
    pub fn poll(&mut self) -> Result<CaptureState, CaptureError> {
        if self.session.state() == CaptureState::Done {
            return Ok(CaptureState::Done);
        }

        self.render()?;

        let raw_x = self.device.read_axis(self.config.axes.x)?;
        let raw_y = self.device.read_axis(self.config.axes.y)?;
        let dx = raw_x.wrapping_sub(self.session.baseline_x) as i8;
        let dy = raw_y.wrapping_sub(self.session.baseline_y) as i8;
        self.session.baseline_x = raw_x;
        self.session.baseline_y = raw_y;

        let (x, y) = self.session.cursor;
        let size = self.preview.size();
        let cursor = (
            move_coordinate(x, dx, size.width),
            move_coordinate(y, dy, size.height),
        );
        if cursor != self.session.cursor {
            log::trace!("cursor moved to {:?}", cursor);
        }
        self.session.cursor = cursor;

        let intensity = self.preview.get_pixel(cursor.0, cursor.1, 0)?;
        self.device.set_indicator(intensity, intensity, intensity)?;

        let pressed = self.device.read_confirm(self.config.confirm)?;
        if self.session.awaiting_release {
            if !pressed {
                log::debug!("confirm released");
                self.session.awaiting_release = false;
            }
        } else if pressed {
            let p = Point2::new(cursor.0 as f64, cursor.1 as f64);
            self.session.push(p);
            log::info!("corner {} set at {}", self.session.count, p);
            self.wait_for_release()?;
        }

        Ok(self.session.state())
    }

    /// Poll until four corners are confirmed.
    ///
    /// Returns the corners in confirmation order.
    pub fn run(&mut self) -> Result<[Point2; 4], CaptureError> {
        let poll_interval = self.config.poll_interval();
        loop {
            if let Some(corners) = self.session.corners() {
                return Ok(corners);
            }
            if self.poll()? != CaptureState::Done {
                std::thread::sleep(poll_interval);
            }
        }
    }

    fn render(&mut self) -> Result<(), CaptureError> {
        rgb_from_gray_u8(self.preview, &mut self.frame)?;
        for p in self.session.points() {
            draw_cross(
                &mut self.frame,
                (p.x as i64, p.y as i64),
                self.config.cursor_arm,
                self.config.marker_color,
            );
        }
        let (x, y) = self.session.cursor;
        draw_plus(
            &mut self.frame,
            (x as i64, y as i64),
            self.config.cursor_arm,
            self.config.cursor_color,
        );
        self.display.show(&self.frame)
    }

    fn wait_for_release(&mut self) -> Result<(), CaptureError> {
        let interval = self.config.debounce_interval();
        for _ in 0..self.config.debounce_max_polls {
            std::thread::sleep(interval);
            if !self.device.read_confirm(self.config.confirm)? {
                return Ok(());
            }
        }
        log::warn!(
            "confirm still pressed after {} reads, ignoring it until released",
            self.config.debounce_max_polls
        );
        self.session.awaiting_release = true;
        Ok(())
    }
}

/// Pair the captured corners with the corners of a `size` rectangle.
///
/// The destination is `(0, 0), (W, 0), (W, H), (0, H)` so the corners are
/// expected in clockwise order starting at the top-left of the page.
pub fn capture_correspondences(
    points: &[Point2; 4],
    size: ImageSize,
) -> ([Point2; 4], [Point2; 4]) {
    (
        *points,
        canonical_rectangle(size.width as f64, size.height as f64),
    )
}
