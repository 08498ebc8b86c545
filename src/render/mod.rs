//! Applying expanded frames to actual image files.
//!
//! This is the pixel side of croppan: open the source image, crop it to the
//! frame's box, optionally resize it to a fixed output size, and save it
//! under a generated name.

mod naming;

pub use naming::{OutputNaming, DEFAULT_PREFIX, DEFAULT_TEMPLATE};

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageDecoder, ImageEncoder, ImageError, ImageReader};
use tracing::debug;

use crate::crop::CropBox;
use crate::error::CroppanError;
use crate::pan::Frame;

/// JPEG quality used for output frames.
const JPEG_QUALITY: u8 = 100;

/// Encoding of output frames.
///
/// This mirrors the CLI's output type but is decoupled from clap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

/// Options for rendering frames.
#[derive(Clone, Debug, Default)]
pub struct RenderOptions {
    /// Resize every cropped frame to this `(width, height)`.
    pub size: Option<(u32, u32)>,
    pub naming: OutputNaming,
    pub format: OutputFormat,
}

/// Crops, resizes and saves one frame. Returns the written path.
pub fn render_frame(
    frame: &Frame<'_>,
    seq: usize,
    opts: &RenderOptions,
) -> Result<PathBuf, CroppanError> {
    let src = Path::new(frame.image);
    let (img, icc_profile) = open_image(src)?;

    let mut cropped = crop_image(&img, frame.crop).ok_or_else(|| CroppanError::InvalidCropBox {
        image: frame.image.to_string(),
        crop: frame.crop,
    })?;

    if let Some((width, height)) = opts.size {
        if (cropped.width(), cropped.height()) != (width, height) {
            debug!(
                from_width = cropped.width(),
                from_height = cropped.height(),
                width,
                height,
                "resizing cropped frame"
            );
            cropped = cropped.resize_exact(width, height, FilterType::CatmullRom);
        }
    }

    let out = opts.naming.output_path(src, seq);
    save_image(&cropped, icc_profile, &out, opts.format)?;
    Ok(out)
}

/// Decodes the image at `path` along with its embedded ICC profile.
///
/// The format is sniffed from the file contents, so frames written by an
/// earlier run under their source extension still open.
fn open_image(path: &Path) -> Result<(DynamicImage, Option<Vec<u8>>), CroppanError> {
    let open_error = |source| CroppanError::ImageOpen {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| open_error(ImageError::IoError(e)))?;
    let mut decoder = reader.into_decoder().map_err(open_error)?;
    let icc_profile = decoder.icc_profile().map_err(open_error)?;
    let img = DynamicImage::from_decoder(decoder).map_err(open_error)?;
    Ok((img, icc_profile))
}

/// Crops `img` to `crop`.
///
/// The result always has the size of the box. Parts of the box outside the
/// image are filled with black (transparent for formats with alpha).
/// Returns `None` only for inverted boxes.
pub fn crop_image(img: &DynamicImage, crop: CropBox) -> Option<DynamicImage> {
    if !crop.is_ordered() {
        return None;
    }
    let width = u32::try_from(crop.width()).ok()?;
    let height = u32::try_from(crop.height()).ok()?;

    let mut canvas = DynamicImage::new(width, height, img.color());
    imageops::replace(&mut canvas, img, -crop.x1, -crop.y1);
    Some(canvas)
}

/// Encodes `img` in memory and writes it out in one go, so a failed encode
/// leaves no partial file behind.
fn save_image(
    img: &DynamicImage,
    icc_profile: Option<Vec<u8>>,
    path: &Path,
    format: OutputFormat,
) -> Result<(), CroppanError> {
    let save_error = |source| CroppanError::ImageSave {
        path: path.to_path_buf(),
        source,
    };

    let mut buf = Vec::new();
    match format {
        OutputFormat::Jpeg => {
            let mut encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
            attach_icc_profile(&mut encoder, icc_profile);
            // JPEG has no alpha channel
            DynamicImage::ImageRgb8(img.to_rgb8())
                .write_with_encoder(encoder)
                .map_err(save_error)?;
        }
        OutputFormat::Png => {
            let mut encoder = PngEncoder::new(Cursor::new(&mut buf));
            attach_icc_profile(&mut encoder, icc_profile);
            img.write_with_encoder(encoder).map_err(save_error)?;
        }
    }

    fs::write(path, buf)?;
    Ok(())
}

fn attach_icc_profile(encoder: &mut impl ImageEncoder, icc_profile: Option<Vec<u8>>) {
    if let Some(profile) = icc_profile {
        if let Err(e) = encoder.set_icc_profile(profile) {
            debug!(error = %e, "output encoder cannot embed the ICC profile, dropping it");
        }
    }
}
