//
// pixels.rs
// dcm2jpeg
//
// Reads decoded pixel data into a floating-point ndarray of stored values, whatever the source bit depth.
//

use anyhow::{bail, Context, Result};
use dicom_pixeldata::{DecodedPixelData, PixelRepresentation, PlanarConfiguration};
use ndarray::{ArrayD, Ix4, IxDyn};

/// Stored sample values as `f64`, shaped `[frames, rows, columns, samples]`.
///
/// No modality or VOI LUT is applied: windowing operates on the values as
/// they are stored in the file, limited to Bits Stored and sign-extended
/// when the pixel representation is signed.
pub fn stored_values(decoded: &DecodedPixelData<'_>) -> Result<ArrayD<f64>> {
    let frames = decoded.number_of_frames() as usize;
    let rows = decoded.rows() as usize;
    let columns = decoded.columns() as usize;
    let samples_per_pixel = decoded.samples_per_pixel() as usize;
    let signed = decoded.pixel_representation() == PixelRepresentation::Signed;

    let mut values = decode_samples(
        decoded.data(),
        decoded.bits_allocated(),
        decoded.bits_stored(),
        signed,
    )?;

    let expected = frames * rows * columns * samples_per_pixel;
    if values.len() < expected {
        bail!(
            "Pixel data holds {} samples, expected {} ({} frame(s) of {}x{}x{})",
            values.len(),
            expected,
            frames,
            rows,
            columns,
            samples_per_pixel
        );
    }
    // Odd-length pixel data is padded to an even byte count.
    values.truncate(expected);

    let color_by_plane = samples_per_pixel > 1
        && matches!(
            decoded.planar_configuration(),
            PlanarConfiguration::PixelFirst
        );

    if color_by_plane {
        let planes = ArrayD::from_shape_vec(
            IxDyn(&[frames, samples_per_pixel, rows, columns]),
            values,
        )
        .context("Pixel data does not match image dimensions")?
        .into_dimensionality::<Ix4>()
        .context("Unexpected pixel array shape")?;
        let interleaved = planes.permuted_axes([0, 2, 3, 1]);
        Ok(interleaved.as_standard_layout().into_owned().into_dyn())
    } else {
        ArrayD::from_shape_vec(IxDyn(&[frames, rows, columns, samples_per_pixel]), values)
            .context("Pixel data does not match image dimensions")
    }
}

/// Splits little-endian pixel bytes into samples of `bits_allocated` bits,
/// keeping the low `bits_stored` bits of each.
pub fn decode_samples(
    data: &[u8],
    bits_allocated: u16,
    bits_stored: u16,
    signed: bool,
) -> Result<Vec<f64>> {
    let stored = if bits_stored == 0 || bits_stored > bits_allocated {
        bits_allocated
    } else {
        bits_stored
    };
    let sample = |raw: u32| stored_sample(raw, u32::from(stored), signed);

    match bits_allocated {
        8 => Ok(data.iter().map(|&b| sample(u32::from(b))).collect()),
        16 => Ok(data
            .chunks_exact(2)
            .map(|chunk| sample(u32::from(u16::from_le_bytes([chunk[0], chunk[1]]))))
            .collect()),
        32 => Ok(data
            .chunks_exact(4)
            .map(|chunk| sample(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
            .collect()),
        n => bail!("Unsupported bits allocated: {}", n),
    }
}

/// Value of the low `bits_stored` bits of `raw`, sign-extended when `signed`.
fn stored_sample(raw: u32, bits_stored: u32, signed: bool) -> f64 {
    let shift = 32 - bits_stored;
    if signed {
        f64::from(((raw << shift) as i32) >> shift)
    } else {
        f64::from((raw << shift) >> shift)
    }
}
