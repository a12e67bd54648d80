use argh::FromArgs;
use std::{
    error::Error,
    io::Write,
    path::{Path, PathBuf},
};

use docwarp::{
    capture::{CornerCapture, Display, ReplayDevice},
    geometry::Point2,
    imgproc::interpolation::InterpolationMode,
    io::{functional as F, menu},
    pipeline,
};

mod config;
mod display;

use config::AppConfig;
use display::{DumpDisplay, LogDisplay};

#[derive(FromArgs)]
/// Rectify a photographed document page
struct Args {
    /// directory listed by the image menu
    #[argh(option, default = "PathBuf::from(\"/tmp/docwarp/\")")]
    dir: PathBuf,

    /// number of the image in the menu, starting at 1
    #[argh(option, short = 's')]
    select: Option<usize>,

    /// path to an input image, bypasses the menu
    #[argh(option, short = 'i')]
    image: Option<PathBuf>,

    /// path of the rectified page (.bmp, .jpg or .jpeg)
    #[argh(option, short = 'o', default = "PathBuf::from(\"rectified.bmp\")")]
    output: PathBuf,

    /// width of the rectified page
    #[argh(option)]
    width: Option<usize>,

    /// height of the rectified page
    #[argh(option)]
    height: Option<usize>,

    /// page corners on the preview, e.g. "50,50 270,60 300,430 40,420"
    #[argh(option)]
    corners: Option<String>,

    /// file with one knob register word per line, replayed through the capture loop
    #[argh(option)]
    knob_trace: Option<PathBuf>,

    /// path to a JSON configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// use bilinear instead of nearest neighbor sampling
    #[argh(switch)]
    bilinear: bool,

    /// JPEG quality of the output
    #[argh(option, default = "F::DEFAULT_JPEG_QUALITY")]
    quality: u8,

    /// write the preview (with the cursor, during a capture) to this path
    #[argh(option)]
    preview_dump: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(width) = args.width {
        config.pipeline.output_width = width;
    }
    if let Some(height) = args.height {
        config.pipeline.output_height = height;
    }
    if args.bilinear {
        config.pipeline.interpolation = InterpolationMode::Bilinear;
    }

    let image_path = resolve_input(&args)?;
    log::info!("reading {}", image_path.display());
    let source = F::read_image_gray8(&image_path)?;

    let preview = pipeline::preview(&source, &config.pipeline)?;

    let corners = match (&args.corners, &args.knob_trace) {
        (Some(text), _) => {
            if let Some(path) = &args.preview_dump {
                F::write_image_gray8(path, &preview)?;
            }
            parse_corners(text)?
        }
        (None, Some(trace)) => {
            let device = ReplayDevice::from_trace(&std::fs::read_to_string(trace)?)?;
            let display: Box<dyn Display> = match &args.preview_dump {
                Some(path) => Box::new(DumpDisplay::new(path.clone())),
                None => Box::new(LogDisplay::default()),
            };
            CornerCapture::new(&preview, device, display, config.capture.clone())?.run()?
        }
        (None, None) => return Err("no corner source, pass --corners or --knob-trace".into()),
    };

    let page = pipeline::finalize(&preview, &corners, &config.pipeline)?;
    F::write_image_gray8_with_quality(&args.output, &page, args.quality)?;
    log::info!("wrote {}", args.output.display());

    Ok(())
}

fn resolve_input(args: &Args) -> Result<PathBuf, Box<dyn Error>> {
    if let Some(path) = &args.image {
        return Ok(path.clone());
    }
    let number = match args.select {
        Some(number) => number,
        None => prompt_selection(&args.dir)?,
    };
    Ok(menu::select_image(&args.dir, number)?)
}

fn prompt_selection(dir: &Path) -> Result<usize, Box<dyn Error>> {
    let images = menu::list_images(dir)?;
    if images.is_empty() {
        return Err(format!("no images in {}", dir.display()).into());
    }

    println!("Choose file:");
    for (i, path) in images.iter().enumerate() {
        let name = path.file_name().unwrap_or(path.as_os_str());
        println!("{:>3}: {}", i + 1, name.to_string_lossy());
    }
    print!("> ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().parse()?)
}

/// Parse four `x,y` pairs separated by whitespace.
fn parse_corners(text: &str) -> Result<[Point2; 4], String> {
    let points = text
        .split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| format!("expected x,y but got {pair:?}"))?;
            let x = x.trim().parse::<f64>().map_err(|e| format!("{pair:?}: {e}"))?;
            let y = y.trim().parse::<f64>().map_err(|e| format!("{pair:?}: {e}"))?;
            Ok(Point2::from([x, y]))
        })
        .collect::<Result<Vec<_>, String>>()?;

    <[Point2; 4]>::try_from(points)
        .map_err(|points| format!("expected 4 corners but got {}", points.len()))
}
