//! In-memory RGB surface backed by the raster encoders.

use super::jpeg::{encode_jpeg, quality_to_percent};
use super::lossless::{encode_png, encode_webp};
use super::types::{validate_buffer, EncodeError};
use crate::codec::Codec;
use crate::surface::EncodeSurface;

/// An RGB8 pixel buffer that can be encoded to any supported codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterSurface {
    /// Wrap RGB pixel data (3 bytes per pixel, row-major order).
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EncodeError> {
        validate_buffer(&pixels, width, height, 3)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a surface from RGBA data, such as canvas `ImageData`.
    ///
    /// Alpha is discarded; every codec here writes opaque RGB.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, EncodeError> {
        validate_buffer(rgba, width, height, 4)?;

        let pixels = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGB pixel data
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the surface and return its pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Encode with `codec`; `quality` is ignored by the lossless codecs.
    pub fn encode_with(&self, codec: Codec, quality: f64) -> Result<Vec<u8>, EncodeError> {
        match codec {
            Codec::Jpeg => encode_jpeg(
                &self.pixels,
                self.width,
                self.height,
                quality_to_percent(quality),
            ),
            Codec::Png => encode_png(&self.pixels, self.width, self.height),
            Codec::WebP => encode_webp(&self.pixels, self.width, self.height),
        }
    }
}

impl EncodeSurface for RasterSurface {
    type Blob = Vec<u8>;
    type Error = EncodeError;

    fn encode(&self, codec: Codec, quality: f64) -> Result<Vec<u8>, EncodeError> {
        self.encode_with(codec, quality)
    }
}
