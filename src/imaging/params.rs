//! Parameter types for image encoding.
//!
//! These structs describe *what* to encode with, not *how* each encoder
//! consumes it. They are the interface between the high-level
//! [`operations`](super::operations) module (which decides what to write)
//! and the [`codec`](super::codec) (which does the actual pixel work).
//! This separation allows swapping codecs (e.g. for testing with a mock)
//! without changing operation logic.

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// Options for a single encode.
///
/// `quality` is only set by the compression operation; `None` lets each
/// encoder use its native default. Formats without a lossy quality dial
/// (png, webp-lossless, tiff, bmp, gif) tolerate and ignore a supplied
/// quality rather than erroring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub quality: Option<Quality>,
}

impl EncodeOptions {
    pub fn with_quality(quality: Quality) -> Self {
        Self {
            quality: Some(quality),
        }
    }
}
