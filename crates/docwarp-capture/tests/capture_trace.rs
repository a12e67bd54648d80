use approx::assert_relative_eq;

use docwarp_capture::{
    capture_correspondences, CaptureConfig, CaptureError, CornerCapture, Display, ReplayDevice,
};
use docwarp_geometry::{homography_4pt2d, Point2};
use docwarp_image::Image;

struct NullDisplay;

impl Display for NullDisplay {
    fn show(&mut self, _frame: &Image<u8, 3>) -> Result<(), CaptureError> {
        Ok(())
    }
}

const TRACE: &str = "
# red counter drives x, blue counter drives y, bit 25 is the green press
0x00000000
0x000a0008
0x020a0008
0x000a0008
0x0032000a
0x0232000a
0x0032000a
0x00370028
0x02370028
0x00370028
0x0005002a
0x0205002a
0x0005002a
";

#[test]
fn replayed_trace_yields_corners() -> Result<(), Box<dyn std::error::Error>> {
    let preview = Image::<u8, 1>::from_size_val([64, 48].into(), 200)?;
    let device = ReplayDevice::from_trace(TRACE)?;
    let config = CaptureConfig {
        poll_interval_ms: 0,
        debounce_interval_ms: 0,
        ..Default::default()
    };

    let mut capture = CornerCapture::new(&preview, device, NullDisplay, config)?;
    let corners = capture.run()?;

    assert_eq!(
        corners,
        [
            Point2::new(10.0, 8.0),
            Point2::new(50.0, 10.0),
            Point2::new(55.0, 40.0),
            Point2::new(5.0, 42.0),
        ]
    );
    assert_eq!(capture.device().indicator(), Some([200, 200, 200]));

    let (src, dst) = capture_correspondences(&corners, [32, 24].into());
    let h = homography_4pt2d(&src, &dst)?;
    for (s, d) in src.iter().zip(dst.iter()) {
        let p = h.transform_point(*s).ok_or("point at infinity")?;
        assert_relative_eq!(p.x, d.x, epsilon = 1e-6);
        assert_relative_eq!(p.y, d.y, epsilon = 1e-6);
    }

    Ok(())
}

#[test]
fn short_trace_is_a_device_error() -> Result<(), Box<dyn std::error::Error>> {
    let preview = Image::<u8, 1>::from_size_val([64, 48].into(), 0)?;
    let device = ReplayDevice::from_trace("0\n0x02000000\n0\n")?;
    let config = CaptureConfig {
        poll_interval_ms: 0,
        debounce_interval_ms: 0,
        ..Default::default()
    };

    let mut capture = CornerCapture::new(&preview, device, NullDisplay, config)?;
    assert!(matches!(capture.run(), Err(CaptureError::Device(_))));
    assert_eq!(capture.session().points(), &[Point2::new(0.0, 0.0)]);

    Ok(())
}
