//! Image codec trait and error type.
//!
//! The [`ImageCodec`] trait is the seam between the batch pipeline and the
//! pixel work: decode a source file into an in-memory raster, encode a
//! raster to a destination file in a given format.
//!
//! The production implementation is
//! [`RustCodec`](super::rust_codec::RustCodec) — pure Rust via the `image`
//! crate, statically linked into the binary.

use super::params::EncodeOptions;
use crate::types::TargetFormat;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Per-item codec failures. Either kind becomes that item's `Failure`
/// record; neither ever aborts the batch.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The source file is missing, unreadable, or not a recognized image
    /// container.
    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    /// The destination is not writable or the encoder rejected the
    /// raster/format combination.
    #[error("failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },
}

impl CodecError {
    pub fn decode(path: &Path, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn encode(path: &Path, reason: impl ToString) -> Self {
        Self::Encode {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Trait for image codecs.
///
/// `Send + Sync` because a single codec instance is shared by every worker
/// in the batch pool. Implementations must write exactly one file at
/// `dest` on a successful encode and nothing on a failed one.
pub trait ImageCodec: Send + Sync {
    /// Decode an image file into an owned raster.
    fn decode(&self, path: &Path) -> Result<DynamicImage, CodecError>;

    /// Encode a raster to `dest` in `format`.
    fn encode(
        &self,
        image: &DynamicImage,
        dest: &Path,
        format: TargetFormat,
        options: &EncodeOptions,
    ) -> Result<(), CodecError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use image::RgbImage;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    /// One recorded encode call, with enough of the raster's shape captured
    /// to assert on transform results without touching the filesystem.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedEncode {
        pub dest: PathBuf,
        pub format: TargetFormat,
        pub quality: Option<u32>,
        pub width: u32,
        pub height: u32,
        pub has_alpha: bool,
    }

    /// Mock codec that records operations without touching the filesystem.
    /// Uses Mutex (not RefCell) so it is Sync and works across the batch
    /// worker pool.
    #[derive(Default)]
    pub struct RecordingCodec {
        images: HashMap<PathBuf, DynamicImage>,
        fail_decode: HashSet<PathBuf>,
        decoded: Mutex<Vec<PathBuf>>,
        encoded: Mutex<Vec<RecordedEncode>>,
        decode_hook: Option<Box<dyn Fn(usize) + Send + Sync>>,
    }

    impl RecordingCodec {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve a specific raster for the given source path.
        pub fn with_image(mut self, path: impl Into<PathBuf>, image: DynamicImage) -> Self {
            self.images.insert(path.into(), image);
            self
        }

        /// Make decode fail for the given source paths.
        pub fn with_failures(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
            self.fail_decode.extend(paths);
            self
        }

        /// Invoke `hook` with the 1-based decode sequence number on every
        /// decode, before the result is produced. Used to trigger
        /// deterministic cancellation mid-batch.
        pub fn with_decode_hook(mut self, hook: impl Fn(usize) + Send + Sync + 'static) -> Self {
            self.decode_hook = Some(Box::new(hook));
            self
        }

        pub fn decoded_paths(&self) -> Vec<PathBuf> {
            self.decoded.lock().unwrap().clone()
        }

        pub fn decode_calls(&self) -> usize {
            self.decoded.lock().unwrap().len()
        }

        pub fn encodes(&self) -> Vec<RecordedEncode> {
            self.encoded.lock().unwrap().clone()
        }
    }

    impl ImageCodec for RecordingCodec {
        fn decode(&self, path: &Path) -> Result<DynamicImage, CodecError> {
            let count = {
                let mut decoded = self.decoded.lock().unwrap();
                decoded.push(path.to_path_buf());
                decoded.len()
            };
            if let Some(hook) = &self.decode_hook {
                hook(count);
            }
            if self.fail_decode.contains(path) {
                return Err(CodecError::decode(path, "mock decode failure"));
            }
            Ok(self
                .images
                .get(path)
                .cloned()
                .unwrap_or_else(|| DynamicImage::ImageRgb8(RgbImage::new(8, 8))))
        }

        fn encode(
            &self,
            image: &DynamicImage,
            dest: &Path,
            format: TargetFormat,
            options: &EncodeOptions,
        ) -> Result<(), CodecError> {
            self.encoded.lock().unwrap().push(RecordedEncode {
                dest: dest.to_path_buf(),
                format,
                quality: options.quality.map(|q| q.value()),
                width: image.width(),
                height: image.height(),
                has_alpha: image.color().has_alpha(),
            });
            Ok(())
        }
    }

    #[test]
    fn recording_codec_records_decode_and_encode() {
        let codec = RecordingCodec::new();
        let image = codec.decode(Path::new("/in/a.jpg")).unwrap();
        codec
            .encode(
                &image,
                Path::new("/out/a_edited.jpg"),
                TargetFormat::Jpeg,
                &EncodeOptions::default(),
            )
            .unwrap();

        assert_eq!(codec.decoded_paths(), vec![PathBuf::from("/in/a.jpg")]);
        let encodes = codec.encodes();
        assert_eq!(encodes.len(), 1);
        assert_eq!(encodes[0].format, TargetFormat::Jpeg);
        assert_eq!(encodes[0].quality, None);
        assert!(!encodes[0].has_alpha);
    }

    #[test]
    fn recording_codec_fails_configured_paths() {
        let codec = RecordingCodec::new().with_failures([PathBuf::from("/in/bad.png")]);
        let err = codec.decode(Path::new("/in/bad.png")).unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
        assert!(codec.decode(Path::new("/in/good.png")).is_ok());
    }

    #[test]
    fn codec_error_messages_name_the_file() {
        let err = CodecError::decode(Path::new("/in/broken.gif"), "bad header");
        assert_eq!(
            err.to_string(),
            "failed to decode /in/broken.gif: bad header"
        );
        let err = CodecError::encode(Path::new("/out/x.png"), "permission denied");
        assert_eq!(
            err.to_string(),
            "failed to encode /out/x.png: permission denied"
        );
    }
}
