//! Shared types for the batch pipeline.
//!
//! These types cross the boundary between the batch runner, the imaging
//! layer, and the CLI: the operation chosen for a run, per-item outcomes,
//! progress updates, and the final summary.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for the conversion operation, and the encode-side format
/// for every other operation (derived from the source extension).
///
/// Matches the supported input set: every format pixbatch can read, it can
/// also write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    Jpeg,
    Png,
    WebP,
    Tiff,
    Bmp,
    Gif,
}

impl TargetFormat {
    /// Map a file extension (without dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::WebP),
            "tif" | "tiff" => Some(Self::Tiff),
            "bmp" => Some(Self::Bmp),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// Canonical extension used for converted output files.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Tiff => "tiff",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
        }
    }

    /// Whether encoded output can carry an alpha channel.
    ///
    /// Drives the pixel-mode normalization in the conversion operation:
    /// alpha-capable targets get an alpha channel added, JPEG gets
    /// alpha-bearing sources flattened onto white first.
    pub fn supports_alpha(self) -> bool {
        matches!(self, Self::Png | Self::WebP)
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TargetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s).ok_or_else(|| {
            format!("unknown format '{s}' (expected jpeg, png, webp, tiff, bmp, or gif)")
        })
    }
}

/// Which axis drives a proportional resize; the other axis follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAxis {
    Width,
    Height,
}

/// The transform applied uniformly to every item of a batch run.
///
/// Constructed once at batch start from whatever surface collected the
/// parameters (CLI flags here); immutable for the duration of the run.
/// Parameter ranges are validated by [`start_batch`](crate::batch::start_batch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationSpec {
    /// Lossy re-encode in the source format. `quality_level` is the
    /// user-facing 1–10 dial, mapped to the encoder's 1–100 scale by
    /// [`encoder_quality`](crate::imaging::calculations::encoder_quality).
    Compress { quality_level: u8 },
    /// Convert to `target`, normalizing the pixel mode for the target's
    /// alpha support.
    Reformat { target: TargetFormat },
    /// Proportional scale driven by one axis; `value` is the new size of
    /// that axis in pixels.
    Resize { axis: ResizeAxis, value: u32 },
}

/// Result of processing one source image. Produced exactly once per
/// attempted item; items skipped by cancellation produce no outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Success { source: PathBuf, output: PathBuf },
    Failure { source: PathBuf, message: String },
}

impl ItemOutcome {
    pub fn source(&self) -> &PathBuf {
        match self {
            Self::Success { source, .. } | Self::Failure { source, .. } => source,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// One failed item, preserved in the final summary so no diagnostic is
/// dropped on the way to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub path: PathBuf,
    pub message: String,
}

/// Terminal result of a batch run. Covers only items actually attempted:
/// after a cancellation, never-started items appear in neither count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub success_count: usize,
    pub error_count: usize,
    pub failures: Vec<FailureRecord>,
}

/// Streamed after each item finishes. `completed` is monotonically
/// increasing; the stream is finite and ends at or before `total`.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    pub completed: usize,
    pub total: usize,
    /// Outcome of the item that just finished, for per-item display.
    pub outcome: ItemOutcome,
}
