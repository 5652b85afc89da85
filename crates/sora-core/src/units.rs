//! Size and dimension helpers shared by the conversion flows.

/// Bytes in one megabyte as used for target sizes.
pub const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;
/// Print resolution assumed when none is given.
pub const DEFAULT_DPI: u32 = 300;
/// Lowest print resolution accepted.
pub const MIN_DPI: u32 = 72;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Convert a budget in megabytes to whole bytes, rounding down.
///
/// Negative and NaN inputs give 0.
pub fn megabytes_to_bytes(megabytes: f64) -> u64 {
    (megabytes * BYTES_PER_MEGABYTE).floor().max(0.0) as u64
}

/// Format a byte count for display, e.g. `"1.5 KB"`.
///
/// Uses 1024-based units with at most two decimals and no trailing zeros.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && exponent < SIZE_UNITS.len() - 1 {
        scaled /= 1024;
        exponent += 1;
    }
    let value = bytes as f64 / 1024f64.powi(exponent as i32);

    let mut text = format!("{value:.2}");
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }

    format!("{text} {}", SIZE_UNITS[exponent])
}

/// Clamp a requested print resolution, defaulting when absent or zero.
pub fn effective_dpi(dpi: Option<u32>) -> u32 {
    match dpi {
        None | Some(0) => DEFAULT_DPI,
        Some(dpi) => dpi.max(MIN_DPI),
    }
}

/// Physical length in centimeters of `pixels` printed at `dpi`.
pub fn pixels_to_cm(pixels: u32, dpi: u32) -> f64 {
    f64::from(pixels) / f64::from(dpi) * 2.54
}

/// Pixel count covering `cm` centimeters at `dpi`, rounded to nearest.
pub fn cm_to_pixels(cm: f64, dpi: u32) -> u32 {
    (cm * f64::from(dpi) / 2.54).round().max(0.0) as u32
}

/// Width-to-height ratio plus its reduced `"w:h"` form.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectRatio {
    pub ratio: f64,
    pub simplified: String,
}

/// Compute the aspect ratio of a `width` x `height` image.
///
/// Returns `None` when either side is zero.
pub fn aspect_ratio(width: u32, height: u32) -> Option<AspectRatio> {
    if width == 0 || height == 0 {
        return None;
    }

    let divisor = gcd(width, height);
    Some(AspectRatio {
        ratio: f64::from(width) / f64::from(height),
        simplified: format!("{}:{}", width / divisor, height / divisor),
    })
}

/// Height matching `width` under a locked aspect ratio.
pub fn locked_height(width: u32, ratio: f64) -> u32 {
    if ratio <= 0.0 || !ratio.is_finite() {
        return 0;
    }
    (f64::from(width) / ratio).round() as u32
}

/// Width matching `height` under a locked aspect ratio.
pub fn locked_width(height: u32, ratio: f64) -> u32 {
    if ratio <= 0.0 || !ratio.is_finite() {
        return 0;
    }
    (f64::from(height) * ratio).round() as u32
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
