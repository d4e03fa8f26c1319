//! The three batch transforms.
//!
//! These functions combine calculations, pixel-mode normalization, and
//! codec execution. They take a decoded raster, compute what to encode,
//! and call the codec; output paths are decided by the caller
//! (see [`naming`](crate::naming)).

use super::calculations::{encoder_quality, resize_dimensions};
use super::codec::{CodecError, ImageCodec};
use super::params::{EncodeOptions, Quality};
use crate::types::{OperationSpec, ResizeAxis, TargetFormat};
use color_quant::NeuQuant;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Colors kept when palette-reducing PNG sources before compression.
pub const PALETTE_COLORS: usize = 256;

/// NeuQuant sampling factor (1 = slowest/best, 30 = fastest).
const QUANT_SAMPLE_FACTOR: i32 = 10;

/// Decode `source`, run `operation` over the raster, encode to `output`.
///
/// One call per batch item. Every error path is a [`CodecError`] that the
/// batch runner records as that item's failure.
pub fn apply(
    codec: &dyn ImageCodec,
    operation: &OperationSpec,
    source: &Path,
    output: &Path,
) -> Result<(), CodecError> {
    let image = codec.decode(source)?;
    match *operation {
        OperationSpec::Compress { quality_level } => {
            compress(codec, image, source, output, quality_level)
        }
        OperationSpec::Reformat { target } => reformat(codec, image, output, target),
        OperationSpec::Resize { axis, value } => resize(codec, image, source, output, axis, value),
    }
}

/// Encode-side format for the operations that preserve the source format.
fn source_format(source: &Path) -> Result<TargetFormat, CodecError> {
    source
        .extension()
        .and_then(|e| e.to_str())
        .and_then(TargetFormat::from_extension)
        .ok_or_else(|| CodecError::decode(source, "unrecognized image extension"))
}

/// Lossy re-encode in the source format at the mapped quality.
///
/// PNG sources are palette-reduced to [`PALETTE_COLORS`] first; PNG's
/// encoder has no quality dial, so the size win comes from the reduction.
fn compress(
    codec: &dyn ImageCodec,
    image: DynamicImage,
    source: &Path,
    output: &Path,
    quality_level: u8,
) -> Result<(), CodecError> {
    let format = source_format(source)?;
    let options = EncodeOptions::with_quality(Quality::new(encoder_quality(quality_level)));
    let image = if format == TargetFormat::Png {
        DynamicImage::ImageRgba8(quantize_palette(&image, PALETTE_COLORS))
    } else {
        image
    };
    codec.encode(&image, output, format, &options)
}

/// Convert to `target`, normalizing the pixel mode for its alpha support.
///
/// Alpha-capable targets get a (fully opaque) alpha channel added to
/// opaque sources. JPEG cannot carry alpha, so alpha-bearing sources are
/// composited over opaque white and flattened to RGB before encoding —
/// otherwise the encoder rejects the raster.
fn reformat(
    codec: &dyn ImageCodec,
    image: DynamicImage,
    output: &Path,
    target: TargetFormat,
) -> Result<(), CodecError> {
    let has_alpha = image.color().has_alpha();
    let image = if target.supports_alpha() && !has_alpha {
        DynamicImage::ImageRgba8(image.to_rgba8())
    } else if target == TargetFormat::Jpeg && has_alpha {
        DynamicImage::ImageRgb8(flatten_onto_white(&image))
    } else {
        image
    };
    codec.encode(&image, output, target, &EncodeOptions::default())
}

/// Proportional scale driven by one axis, Lanczos3 resampling.
fn resize(
    codec: &dyn ImageCodec,
    image: DynamicImage,
    source: &Path,
    output: &Path,
    axis: ResizeAxis,
    value: u32,
) -> Result<(), CodecError> {
    let format = source_format(source)?;
    let (width, height) = resize_dimensions((image.width(), image.height()), axis, value);
    let resized = image.resize_exact(width, height, FilterType::Lanczos3);
    codec.encode(&resized, output, format, &EncodeOptions::default())
}

/// Composite onto an opaque white background and drop the alpha channel.
pub(crate) fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let mut canvas = RgbaImage::from_pixel(image.width(), image.height(), Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &image.to_rgba8(), 0, 0);
    DynamicImage::ImageRgba8(canvas).to_rgb8()
}

/// Reduce to a `max_colors` palette (NeuQuant) with Floyd–Steinberg
/// dithering, the pixel-level counterpart of an indexed-color save.
pub(crate) fn quantize_palette(image: &DynamicImage, max_colors: usize) -> RgbaImage {
    let mut rgba = image.to_rgba8();
    let palette = NeuQuant::new(QUANT_SAMPLE_FACTOR, max_colors, rgba.as_raw());
    imageops::dither(&mut rgba, &palette);
    rgba
}
