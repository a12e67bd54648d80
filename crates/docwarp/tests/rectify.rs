use docwarp::{
    capture::{CaptureConfig, CaptureError, Display, ScriptStep, ScriptedDevice},
    geometry::{canonical_rectangle, homography_4pt2d, Point2},
    image::{Image, ImageSize},
    imgproc::{interpolation::InterpolationMode, warp::rectify},
    io::functional::{read_image_gray8, write_image_gray8},
    pipeline::{finalize, preview, rectify_interactive, PipelineConfig},
};

const BACKGROUND: u8 = 30;
const BRIGHT: u8 = 255;

/// A flat page with a bright square covering columns 100..200 and rows 150..250.
fn page(size: ImageSize) -> Result<Image<u8, 1>, Box<dyn std::error::Error>> {
    let mut data = vec![BACKGROUND; size.area()];
    for y in 150..250 {
        for x in 100..200 {
            data[y * size.width + x] = BRIGHT;
        }
    }
    Ok(Image::new(size, data)?)
}

fn trapezoid() -> [Point2; 4] {
    [
        Point2::new(50.0, 50.0),
        Point2::new(270.0, 60.0),
        Point2::new(300.0, 430.0),
        Point2::new(40.0, 420.0),
    ]
}

/// Photograph the page so that its corners land on the trapezoid.
fn photograph(page: &Image<u8, 1>) -> Result<Image<u8, 1>, Box<dyn std::error::Error>> {
    let rect = canonical_rectangle(page.width() as f64, page.height() as f64);
    let h = homography_4pt2d(&rect, &trapezoid())?;
    Ok(rectify(
        page,
        &h,
        [340, 480].into(),
        InterpolationMode::Nearest,
    )?)
}

#[test]
fn trapezoid_square_is_axis_aligned() -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::default();
    let page = page(config.output_size())?;
    let photo = photograph(&page)?;

    let rectified = finalize(&photo, &trapezoid(), &config)?;
    assert_eq!(rectified.size(), config.output_size());

    // away from the square edges the layout is recovered
    const MARGIN: usize = 4;
    for y in 150 + MARGIN..250 - MARGIN {
        for x in 100 + MARGIN..200 - MARGIN {
            assert_eq!(rectified.get_pixel(x, y, 0)?, BRIGHT, "inside at ({x}, {y})");
        }
        for x in (MARGIN..100 - MARGIN).chain(200 + MARGIN..320 - MARGIN) {
            assert_eq!(rectified.get_pixel(x, y, 0)?, BACKGROUND, "outside at ({x}, {y})");
        }
    }
    for x in 100 + MARGIN..200 - MARGIN {
        for y in (MARGIN..150 - MARGIN).chain(250 + MARGIN..480 - MARGIN) {
            assert_eq!(rectified.get_pixel(x, y, 0)?, BACKGROUND, "outside at ({x}, {y})");
        }
    }

    Ok(())
}

#[test]
fn full_frame_corners_keep_the_layout() -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::default();
    let size = config.output_size();

    // 8x8 blocks with distinct values
    let data = (0..size.area())
        .map(|i| {
            let (x, y) = (i % size.width, i / size.width);
            ((x / 8 + 3 * (y / 8)) % 200 + 20) as u8
        })
        .collect();
    let source = Image::<u8, 1>::new(size, data)?;

    let corners = canonical_rectangle(size.width as f64, size.height as f64);
    let rectified = finalize(&source, &corners, &config)?;

    for y in (0..size.height).filter(|y| y % 8 != 0) {
        for x in (0..size.width).filter(|x| x % 8 != 0) {
            assert_eq!(rectified.get_pixel(x, y, 0)?, source.get_pixel(x, y, 0)?);
        }
    }

    Ok(())
}

#[test]
fn preview_downscales_whole_frame() -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::default();
    let source = page([640, 960].into())?;
    let preview = preview(&source, &config)?;

    assert_eq!(preview.size(), config.output_size());
    // the square at 100..200 x 150..250 lands at 50..100 x 75..125
    assert_eq!(preview.get_pixel(75, 100, 0)?, BRIGHT);
    assert_eq!(preview.get_pixel(20, 20, 0)?, BACKGROUND);
    assert_eq!(preview.get_pixel(300, 400, 0)?, BACKGROUND);

    Ok(())
}

struct NullDisplay;

impl Display for NullDisplay {
    fn show(&mut self, _frame: &Image<u8, 3>) -> Result<(), CaptureError> {
        Ok(())
    }
}

#[test]
fn interactive_rectification_writes_page() -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::default();
    let photo = photograph(&page(config.output_size())?)?;

    let capture_config = CaptureConfig {
        poll_interval_ms: 0,
        debounce_interval_ms: 0,
        ..Default::default()
    };
    let steps = [
        ScriptStep::confirming(40, 50),
        ScriptStep::confirming(110, 5),
        ScriptStep::moving(0, 0),
        ScriptStep::confirming(10, 105),
        ScriptStep::confirming(-127, -10),
    ];
    let device = ScriptedDevice::new(&steps, capture_config.axes, capture_config.confirm);

    let (corners, rectified) =
        rectify_interactive(&photo, device, NullDisplay, capture_config, &config)?;
    assert_eq!(
        corners,
        [
            Point2::new(40.0, 50.0),
            Point2::new(150.0, 55.0),
            Point2::new(160.0, 160.0),
            Point2::new(33.0, 150.0),
        ]
    );
    assert_eq!(rectified.size(), config.output_size());

    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("rectified.bmp");
    write_image_gray8(&file_path, &rectified)?;
    let read = read_image_gray8(&file_path)?;
    assert_eq!(read.as_slice(), rectified.as_slice());

    Ok(())
}
