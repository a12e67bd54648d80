use std::path::PathBuf;

use docwarp::{
    capture::{CaptureError, Display},
    image::Image,
    io::functional::write_image_bmp_rgb8,
};

/// Reports rendered frames to the log.
#[derive(Default)]
pub struct LogDisplay {
    frames: usize,
}

impl Display for LogDisplay {
    fn show(&mut self, frame: &Image<u8, 3>) -> Result<(), CaptureError> {
        self.frames += 1;
        log::trace!("frame {} {}", self.frames, frame.size());
        Ok(())
    }
}

/// Writes every rendered frame to the same BMP file.
pub struct DumpDisplay {
    path: PathBuf,
}

impl DumpDisplay {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Display for DumpDisplay {
    fn show(&mut self, frame: &Image<u8, 3>) -> Result<(), CaptureError> {
        write_image_bmp_rgb8(&self.path, frame).map_err(|e| CaptureError::Display(e.to_string()))
    }
}
