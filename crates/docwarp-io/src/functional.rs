use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use docwarp_image::{Image, ImageSize};
use docwarp_imgproc::color::gray_from_rgb_u8;
use image::{
    codecs::{bmp::BmpEncoder, jpeg::JpegEncoder},
    ExtendedColorType,
};

use crate::error::IoError;

/// Default quality used when encoding JPEG images.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

fn decode(file_path: &Path) -> Result<image::DynamicImage, IoError> {
    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {} as {}x{} {:?}",
        file_path.display(),
        img.width(),
        img.height(),
        img.color()
    );

    Ok(img)
}

fn extension_lowercase(file_path: &Path) -> Option<String> {
    file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Reads an RGB image from the given file path.
///
/// The method reads from any image format supported by the image crate, converting
/// grayscale or alpha images to 8-bit RGB.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image containing the image data.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let img = decode(file_path.as_ref())?.into_rgb8();

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_raw())?)
}

/// Reads an image and converts it to an 8-bit intensity raster.
///
/// The intensity is computed as `Y = 0.299 R + 0.587 G + 0.114 B`.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_gray8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let rgb = read_image_any_rgb8(file_path)?;
    let mut gray = Image::<u8, 1>::from_size_val(rgb.size(), 0)?;
    gray_from_rgb_u8(&rgb, &mut gray)?;
    Ok(gray)
}

fn dimensions<const C: usize>(image: &Image<u8, C>) -> Result<(u32, u32), IoError> {
    let width = u32::try_from(image.width()).map_err(|_| IoError::UnsupportedImageFormat)?;
    let height = u32::try_from(image.height()).map_err(|_| IoError::UnsupportedImageFormat)?;
    Ok((width, height))
}

/// Writes an 8-bit grayscale image as a paletted BMP file.
///
/// # Arguments
///
/// * `file_path` - The path to the BMP image.
/// * `image` - The grayscale image to write.
pub fn write_image_bmp_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    let (width, height) = dimensions(image)?;
    let mut writer = BufWriter::new(File::create(file_path.as_ref())?);
    BmpEncoder::new(&mut writer).encode(image.as_slice(), width, height, ExtendedColorType::L8)?;
    writer.flush()?;
    Ok(())
}

/// Writes an 8-bit RGB image as a BMP file.
pub fn write_image_bmp_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    let (width, height) = dimensions(image)?;
    let mut writer = BufWriter::new(File::create(file_path.as_ref())?);
    BmpEncoder::new(&mut writer).encode(
        image.as_slice(),
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;
    writer.flush()?;
    Ok(())
}

/// Writes an 8-bit grayscale image as a JPEG file.
///
/// # Arguments
///
/// * `file_path` - The path to the JPEG image.
/// * `image` - The grayscale image to write.
/// * `quality` - The encoding quality, between 1 and 100.
pub fn write_image_jpeg_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
    quality: u8,
) -> Result<(), IoError> {
    let (width, height) = dimensions(image)?;
    let mut writer = BufWriter::new(File::create(file_path.as_ref())?);
    JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100)).encode(
        image.as_slice(),
        width,
        height,
        ExtendedColorType::L8,
    )?;
    writer.flush()?;
    Ok(())
}

/// Writes an 8-bit grayscale image, choosing the encoder from the file extension.
///
/// `.bmp` files are written with [`write_image_bmp_gray8`], `.jpg` and `.jpeg` files
/// with [`write_image_jpeg_gray8`] at [`DEFAULT_JPEG_QUALITY`].
pub fn write_image_gray8(file_path: impl AsRef<Path>, image: &Image<u8, 1>) -> Result<(), IoError> {
    write_image_gray8_with_quality(file_path, image, DEFAULT_JPEG_QUALITY)
}

/// Same as [`write_image_gray8`] with an explicit JPEG quality.
pub fn write_image_gray8_with_quality(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
    quality: u8,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    match extension_lowercase(file_path).as_deref() {
        Some("bmp") => write_image_bmp_gray8(file_path, image),
        Some("jpg") | Some("jpeg") => write_image_jpeg_gray8(file_path, image, quality),
        _ => Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }
}

pub(crate) fn is_supported_extension(file_path: &Path) -> bool {
    matches!(
        extension_lowercase(file_path).as_deref(),
        Some("bmp") | Some("jpg") | Some("jpeg")
    )
}
