//
// window.rs
// dcm2jpeg
//
// Windowing normalization: clips stored values to an optional center/width window and rescales them to 0-255.
//

use dicom_pixeldata::WindowLevel;
use ndarray::{Array, Dimension};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum WindowingError {
    #[error("pixel buffer is empty")]
    EmptyBuffer,
}

/// Minimum and maximum sample of a non-empty buffer.
pub fn pixel_range<D: Dimension>(pixels: &Array<f64, D>) -> Option<(f64, f64)> {
    if pixels.is_empty() {
        return None;
    }
    Some(pixels.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(min, max), &v| (min.min(v), max.max(v)),
    ))
}

/// Maps `pixels` into `0..=255`.
///
/// With a window, samples are first clipped to
/// `[center - width / 2, center + width / 2]`. The observed minimum then maps
/// to 0 and the observed maximum to 255; intermediate values are truncated
/// toward zero. A constant buffer maps to all zeros.
pub fn apply_windowing<D: Dimension>(
    mut pixels: Array<f64, D>,
    window: Option<&WindowLevel>,
) -> Result<Array<u8, D>, WindowingError> {
    if let Some(window) = window {
        let lower = window.center - window.width / 2.0;
        let upper = window.center + window.width / 2.0;
        // max then min rather than clamp: a negative width must not panic.
        pixels.mapv_inplace(|v| v.max(lower).min(upper));
    }

    let (pmin, pmax) = pixel_range(&pixels).ok_or(WindowingError::EmptyBuffer)?;
    let range = pmax - pmin;
    if range == 0.0 {
        return Ok(Array::zeros(pixels.raw_dim()));
    }

    Ok(pixels.mapv(|v| ((v - pmin) / range * 255.0) as u8))
}
