//! Shared test utilities for the pixbatch test suite.
//!
//! Synthetic image files for filesystem tests. Each helper writes through
//! an explicit encoder rather than extension-based saving, so tests can
//! deliberately put one container under another extension.

use image::{ImageEncoder, RgbImage, RgbaImage};
use std::fs;
use std::io::BufWriter;
use std::path::Path;

/// Write a JPEG with a simple gradient at the given dimensions. The
/// encoder is chosen explicitly, so the path's extension may lie.
pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = fs::File::create(path).unwrap();
    let writer = BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a PNG with a left-to-right alpha ramp (transparent to opaque).
pub fn write_png_rgba(path: &Path, width: u32, height: u32) {
    let img = RgbaImage::from_fn(width, height, |x, _| {
        let alpha = ((x * 255) / width.max(1)) as u8;
        image::Rgba([200, 60, 30, alpha])
    });
    let file = fs::File::create(path).unwrap();
    let writer = BufWriter::new(file);
    image::codecs::png::PngEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
        .unwrap();
}

/// Write bytes that no image decoder will accept.
pub fn write_garbage(path: &Path) {
    fs::write(path, b"this is not an image container").unwrap();
}
