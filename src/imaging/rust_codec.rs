//! Pure Rust image codec — zero external dependencies.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (all supported formats) | `image` crate, container sniffing via `with_guessed_format` |
//! | Encode → JPEG | `JpegEncoder` (`new_with_quality` when a quality is supplied) |
//! | Encode → PNG | `PngEncoder` (Best compression, adaptive filtering) |
//! | Encode → WebP | `WebPEncoder::new_lossless` (the crate's webp encoder is lossless-only; a supplied quality is tolerated and ignored) |
//! | Encode → TIFF / BMP / GIF | stock encoders |
//!
//! Encodes are atomic: pixels are written to a hidden `.tmp` sibling and
//! renamed over the destination on success. A failed encode removes the
//! temp file and leaves nothing at the destination.

use super::codec::{CodecError, ImageCodec};
use super::params::EncodeOptions;
use crate::types::TargetFormat;
use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{self, PngEncoder};
use image::codecs::tiff::TiffEncoder;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageReader};
use std::borrow::Cow;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Pure Rust codec using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Hidden temp sibling used for the write-then-rename publish.
fn temp_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    dest.with_file_name(format!(".{name}.tmp"))
}

/// Convert to Rgb8/Rgba8 for encoders that accept nothing else
/// (webp, bmp, gif). Keeps the common cases borrow-only.
fn rgb_or_rgba(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => Cow::Borrowed(image),
        _ if image.color().has_alpha() => {
            Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
    }
}

/// Write `image` to `tmp`. Errors are reported against `dest`, the path
/// the caller actually asked for.
fn write_image(
    image: &DynamicImage,
    tmp: &Path,
    dest: &Path,
    format: TargetFormat,
    options: &EncodeOptions,
) -> Result<(), CodecError> {
    let file = fs::File::create(tmp).map_err(|e| CodecError::encode(dest, e))?;
    let mut writer = BufWriter::new(file);

    match format {
        TargetFormat::Jpeg => {
            let result = match options.quality {
                Some(q) => image.write_with_encoder(JpegEncoder::new_with_quality(
                    &mut writer,
                    q.value() as u8,
                )),
                None => image.write_with_encoder(JpegEncoder::new(&mut writer)),
            };
            result.map_err(|e| CodecError::encode(dest, e))?;
        }
        TargetFormat::Png => {
            // PNG has no lossy quality dial; a supplied quality is ignored.
            image
                .write_with_encoder(PngEncoder::new_with_quality(
                    &mut writer,
                    png::CompressionType::Best,
                    png::FilterType::Adaptive,
                ))
                .map_err(|e| CodecError::encode(dest, e))?;
        }
        TargetFormat::WebP => {
            rgb_or_rgba(image)
                .write_with_encoder(WebPEncoder::new_lossless(&mut writer))
                .map_err(|e| CodecError::encode(dest, e))?;
        }
        TargetFormat::Tiff => {
            image
                .write_with_encoder(TiffEncoder::new(&mut writer))
                .map_err(|e| CodecError::encode(dest, e))?;
        }
        TargetFormat::Bmp => {
            rgb_or_rgba(image)
                .write_with_encoder(BmpEncoder::new(&mut writer))
                .map_err(|e| CodecError::encode(dest, e))?;
        }
        TargetFormat::Gif => match rgb_or_rgba(image).as_ref() {
            DynamicImage::ImageRgba8(buf) => GifEncoder::new(&mut writer)
                .encode(buf.as_raw(), buf.width(), buf.height(), ExtendedColorType::Rgba8)
                .map_err(|e| CodecError::encode(dest, e))?,
            other => {
                let rgb = other.to_rgb8();
                GifEncoder::new(&mut writer)
                    .encode(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
                    .map_err(|e| CodecError::encode(dest, e))?
            }
        },
    }

    writer.flush().map_err(|e| CodecError::encode(dest, e))
}

impl ImageCodec for RustCodec {
    fn decode(&self, path: &Path) -> Result<DynamicImage, CodecError> {
        ImageReader::open(path)
            .map_err(|e| CodecError::decode(path, e))?
            // Sniff the container rather than trusting the extension, so a
            // misnamed file still decodes.
            .with_guessed_format()
            .map_err(|e| CodecError::decode(path, e))?
            .decode()
            .map_err(|e| CodecError::decode(path, e))
    }

    fn encode(
        &self,
        image: &DynamicImage,
        dest: &Path,
        format: TargetFormat,
        options: &EncodeOptions,
    ) -> Result<(), CodecError> {
        let tmp = temp_path(dest);
        match write_image(image, &tmp, dest, format, options) {
            Ok(()) => fs::rename(&tmp, dest).map_err(|e| {
                let _ = fs::remove_file(&tmp);
                CodecError::encode(dest, e)
            }),
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                Err(e)
            }
        }
    }
}
