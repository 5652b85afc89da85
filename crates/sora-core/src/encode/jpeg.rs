//! JPEG encoding.
//!
//! JPEG is the lossy codec the target-size search actually steers: its output
//! size grows with the quality setting, which is what the bisection relies on.

use super::types::{validate_buffer, EncodeError};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

/// Map a normalized quality in `[0, 1]` onto the encoder's 1-100 scale.
///
/// Out-of-range and NaN inputs clamp to the nearest valid setting.
pub fn quality_to_percent(quality: f64) -> u8 {
    if quality.is_nan() {
        return 1;
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100); values outside the range are clamped
///
/// # Errors
///
/// Returns an error if the dimensions are zero, the buffer length does not
/// match `width * height * 3`, or the encoder fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_buffer(pixels, width, height, 3)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the percent mapping always lands in the encoder's range.
        #[test]
        fn prop_quality_percent_in_range(quality in -2.0f64..3.0) {
            let percent = quality_to_percent(quality);
            prop_assert!((1..=100).contains(&percent));
        }

        /// Property: the percent mapping never decreases as quality rises.
        #[test]
        fn prop_quality_percent_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(quality_to_percent(lo) <= quality_to_percent(hi));
        }

        /// Property: identical input encodes to identical bytes.
        #[test]
        fn prop_encode_is_deterministic(
            (width, height) in (1u32..=16, 1u32..=16),
            quality in 1u8..=100,
        ) {
            let pixels = vec![100u8; (width * height * 3) as usize];
            let a = encode_jpeg(&pixels, width, height, quality).unwrap();
            let b = encode_jpeg(&pixels, width, height, quality).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
