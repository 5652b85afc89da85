//! Export dispatch for single-file and batch conversion.
//!
//! A conversion is described by [`CompressionSettings`]: write lossless PNG,
//! encode at a fixed quality, or search for the best quality under a target
//! size. [`export`] turns the settings into encoder calls and maps an
//! unreachable target onto [`ExportError::TargetUnreachable`], the one
//! outcome callers have to present to the user.

use crate::codec::Codec;
use crate::search::{search, search_async, SearchError, SearchParams};
use crate::surface::{AsyncEncodeSurface, EncodeSurface};
use crate::units::megabytes_to_bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Quality used when the requested fixed quality is missing or zero.
pub const DEFAULT_EXPORT_QUALITY: u8 = 90;
/// Smallest target size accepted, in megabytes.
pub const MIN_TARGET_MEGABYTES: f64 = 0.1;

/// Errors that can occur while exporting an image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// Target-size search parameters were rejected
    #[error("Invalid search parameters: {0}")]
    InvalidParams(#[from] SearchError),

    /// No probed quality produced output within the budget
    #[error("Could not compress to target size ({target_bytes} bytes) after {attempts} attempts")]
    TargetUnreachable { target_bytes: u64, attempts: u32 },

    /// The surface failed to encode at a fixed quality
    #[error("Conversion failed: {0}")]
    EncodeFailed(String),
}

/// How an image should be compressed on export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CompressionSettings {
    /// Lossless PNG regardless of the selected format
    Lossless,
    /// Fixed encoder quality
    Quality {
        format: Codec,
        /// Quality percentage (1-100); 0 means "use the default"
        #[serde(default)]
        quality: u8,
    },
    /// Highest quality that fits in a size budget
    #[serde(alias = "size")]
    TargetSize {
        format: Codec,
        /// Budget in megabytes (1 MB = 1024 * 1024 bytes)
        target_megabytes: f64,
        #[serde(default)]
        params: SearchParams,
    },
}

impl Default for CompressionSettings {
    fn default() -> Self {
        CompressionSettings::Quality {
            format: Codec::Jpeg,
            quality: DEFAULT_EXPORT_QUALITY,
        }
    }
}

impl CompressionSettings {
    /// Codec the export will produce.
    pub fn codec(&self) -> Codec {
        match self {
            CompressionSettings::Lossless => Codec::Png,
            CompressionSettings::Quality { format, .. }
            | CompressionSettings::TargetSize { format, .. } => *format,
        }
    }

    fn plan(&self) -> Plan<'_> {
        match self {
            CompressionSettings::Lossless => Plan::Fixed {
                codec: Codec::Png,
                quality: 1.0,
            },
            CompressionSettings::Quality { format, quality } => {
                let percent = match *quality {
                    0 => DEFAULT_EXPORT_QUALITY,
                    q => q.min(100),
                };
                Plan::Fixed {
                    codec: *format,
                    quality: f64::from(percent) / 100.0,
                }
            }
            CompressionSettings::TargetSize {
                format,
                target_megabytes,
                params,
            } => {
                // NaN also lands on the minimum
                let megabytes = if *target_megabytes >= MIN_TARGET_MEGABYTES {
                    *target_megabytes
                } else {
                    MIN_TARGET_MEGABYTES
                };
                Plan::Search {
                    codec: *format,
                    target_bytes: megabytes_to_bytes(megabytes),
                    params,
                }
            }
        }
    }
}

enum Plan<'a> {
    Fixed {
        codec: Codec,
        quality: f64,
    },
    Search {
        codec: Codec,
        target_bytes: u64,
        params: &'a SearchParams,
    },
}

/// An encoded export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedImage<B> {
    /// Encoded output
    pub blob: B,
    /// Codec the blob is encoded with
    pub codec: Codec,
    /// Quality the blob was encoded at
    pub quality: f64,
    /// Encoder invocations spent producing it
    pub attempts: u32,
}

/// Encode `surface` according to `settings`.
pub fn export<S: EncodeSurface>(
    surface: &S,
    settings: &CompressionSettings,
) -> Result<ExportedImage<S::Blob>, ExportError> {
    match settings.plan() {
        Plan::Fixed { codec, quality } => {
            let blob = surface
                .encode(codec, quality)
                .map_err(|e| ExportError::EncodeFailed(e.to_string()))?;
            Ok(ExportedImage {
                blob,
                codec,
                quality,
                attempts: 1,
            })
        }
        Plan::Search {
            codec,
            target_bytes,
            params,
        } => {
            let result = search(surface, target_bytes, codec, params)?;
            let attempts = result.attempts_used;
            let best = result.best.ok_or(ExportError::TargetUnreachable {
                target_bytes,
                attempts,
            })?;
            Ok(ExportedImage {
                blob: best.blob,
                codec,
                quality: best.quality,
                attempts,
            })
        }
    }
}

/// Async counterpart of [`export`].
pub async fn export_async<S: AsyncEncodeSurface>(
    surface: &S,
    settings: &CompressionSettings,
) -> Result<ExportedImage<S::Blob>, ExportError> {
    match settings.plan() {
        Plan::Fixed { codec, quality } => {
            let blob = surface
                .encode(codec, quality)
                .await
                .map_err(|e| ExportError::EncodeFailed(e.to_string()))?;
            Ok(ExportedImage {
                blob,
                codec,
                quality,
                attempts: 1,
            })
        }
        Plan::Search {
            codec,
            target_bytes,
            params,
        } => {
            let result = search_async(surface, target_bytes, codec, params).await?;
            let attempts = result.attempts_used;
            let best = result.best.ok_or(ExportError::TargetUnreachable {
                target_bytes,
                attempts,
            })?;
            Ok(ExportedImage {
                blob: best.blob,
                codec,
                quality: best.quality,
                attempts,
            })
        }
    }
}

/// Build the download name for a converted file.
///
/// The last extension of `original` is replaced by `_{suffix}.{ext}`. Names
/// without an extension, or whose only dot is the leading one, are kept whole.
pub fn output_file_name(original: &str, codec: Codec, suffix: &str) -> String {
    let stem = match original.rfind('.') {
        Some(idx) if idx > 0 => &original[..idx],
        _ => original,
    };
    format!("{stem}_{suffix}.{}", codec.extension())
}

/// Outcome of one file in a batch.
#[derive(Debug)]
pub struct BatchEntry<B> {
    /// Name of the source file
    pub source_name: String,
    /// Name the converted file should be saved under
    pub output_name: String,
    /// Converted image, or why it failed
    pub outcome: Result<ExportedImage<B>, ExportError>,
}

/// Results of converting several surfaces with the same settings.
#[derive(Debug)]
pub struct BatchReport<B> {
    pub entries: Vec<BatchEntry<B>>,
}

impl<B> BatchReport<B> {
    /// Number of files converted successfully.
    pub fn successful(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_ok()).count()
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.entries.len() - self.successful()
    }
}

/// Convert every `(name, surface)` pair with the same settings.
///
/// A failure is recorded on its entry and the batch carries on.
pub fn export_batch<'a, S, I>(items: I, settings: &CompressionSettings) -> BatchReport<S::Blob>
where
    S: EncodeSurface + 'a,
    I: IntoIterator<Item = (&'a str, &'a S)>,
{
    let codec = settings.codec();
    let entries: Vec<_> = items
        .into_iter()
        .map(|(name, surface)| {
            let outcome = export(surface, settings);
            if let Err(e) = &outcome {
                log::warn!("batch entry {name} failed: {e}");
            }
            BatchEntry {
                source_name: name.to_string(),
                output_name: output_file_name(name, codec, "batch"),
                outcome,
            }
        })
        .collect();

    let report = BatchReport { entries };
    log::info!(
        "batch processed {} of {} files",
        report.successful(),
        report.entries.len()
    );
    report
}
