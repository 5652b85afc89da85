//! Output codec identifiers.
//!
//! A [`Codec`] names the encoding a surface is asked to produce. Hosts pass
//! codecs around as short format strings (`"jpeg"`, `"png"`, `"webp"`) or as
//! MIME types (`"image/jpeg"`), so parsing accepts both forms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while parsing a codec identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The identifier does not name a supported output format
    #[error("Unsupported output format: {0}")]
    Unsupported(String),
}

/// Output encoding accepted by an encode surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Codec {
    /// Lossy JPEG; the only codec whose size responds to quality.
    #[default]
    #[serde(alias = "jpg")]
    Jpeg,
    /// Lossless PNG.
    Png,
    /// WebP.
    WebP,
}

impl Codec {
    /// All supported codecs, in display order.
    pub const ALL: [Codec; 3] = [Codec::Jpeg, Codec::Png, Codec::WebP];

    /// MIME type used when handing the codec to a browser encoder.
    pub fn mime(self) -> &'static str {
        match self {
            Codec::Jpeg => "image/jpeg",
            Codec::Png => "image/png",
            Codec::WebP => "image/webp",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Codec::Jpeg => "jpeg",
            Codec::Png => "png",
            Codec::WebP => "webp",
        }
    }

    /// Whether the quality parameter affects output size for this codec.
    ///
    /// Browsers encode WebP lossily, but the raster encoder in
    /// [`crate::encode`] only writes lossless WebP, so it reports `false`.
    pub fn is_lossy(self) -> bool {
        matches!(self, Codec::Jpeg)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Codec {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let format = normalized.strip_prefix("image/").unwrap_or(&normalized);

        match format {
            "jpeg" | "jpg" => Ok(Codec::Jpeg),
            "png" => Ok(Codec::Png),
            "webp" => Ok(Codec::WebP),
            _ => Err(CodecError::Unsupported(s.to_string())),
        }
    }
}
