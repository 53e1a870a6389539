//
// image.rs
// dcm2jpeg
//
// Converts one DICOM file into a JPEG: decode, window to 8 bits, expand to RGB and encode.
//

use anyhow::{bail, Context, Result};
use dicom::object::open_file;
use dicom_pixeldata::PixelDecoder;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GrayImage, RgbImage};
use ndarray::{ArrayD, Axis, Ix4};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::{dicom_access, pixels, window};

/// Quality used for every JPEG written by the converter.
pub const JPEG_QUALITY: u8 = 95;

/// Convert the DICOM file at `input` into a JPEG written to `output`.
///
/// Nothing is left at `output` when any step fails.
pub fn convert(input: &Path, output: &Path) -> Result<()> {
    let obj = open_file(input)
        .with_context(|| format!("Failed to open DICOM file {}", input.display()))?;
    let window_level = dicom_access::read_window(&obj).context("Invalid window attributes")?;

    let decoded = obj
        .decode_pixel_data()
        .context("Failed to decode pixel data")?;
    let pixels = pixels::stored_values(&decoded)?;
    debug!(
        path = %input.display(),
        shape = ?pixels.shape(),
        window = ?window_level.as_ref().map(|w| (w.center, w.width)),
        "decoded pixel data"
    );

    let normalized = window::apply_windowing(pixels, window_level.as_ref())?;
    let rgb = render_rgb(normalized)?;
    let bytes = encode_jpeg(&rgb, JPEG_QUALITY)?;

    write_output(output, &bytes)?;
    debug!(path = %output.display(), bytes = bytes.len(), "wrote jpeg");
    Ok(())
}

/// Turns a normalized `[frames, rows, columns, samples]` buffer into an RGB
/// image of its first frame. Grayscale is replicated across the channels.
pub fn render_rgb(normalized: ArrayD<u8>) -> Result<RgbImage> {
    let frames = normalized
        .into_dimensionality::<Ix4>()
        .context("Unexpected pixel array shape")?;
    let (num_frames, rows, columns, samples) = frames.dim();
    if num_frames == 0 {
        bail!("Pixel data has no frames");
    }

    let width = u32::try_from(columns).context("Image too wide")?;
    let height = u32::try_from(rows).context("Image too tall")?;
    let data: Vec<u8> = frames.index_axis(Axis(0), 0).iter().copied().collect();

    match samples {
        1 => {
            let gray = GrayImage::from_raw(width, height, data)
                .context("Pixel buffer does not match image dimensions")?;
            Ok(DynamicImage::ImageLuma8(gray).to_rgb8())
        }
        3 => RgbImage::from_raw(width, height, data)
            .context("Pixel buffer does not match image dimensions"),
        n => bail!("Unsupported samples per pixel: {}", n),
    }
}

pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        encoder
            .encode_image(image)
            .context("Failed to encode JPEG")?;
    }
    Ok(buffer)
}

fn write_output(output: &Path, bytes: &[u8]) -> Result<()> {
    if let Err(e) = fs::write(output, bytes) {
        // A failed write can leave a truncated file behind.
        let _ = fs::remove_file(output);
        return Err(e).with_context(|| format!("Failed to write {}", output.display()));
    }
    Ok(())
}
