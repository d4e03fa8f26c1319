//! # pixbatch
//!
//! Batch image transformer: apply one operation — lossy compression,
//! format conversion, or proportional resizing — to a list of image files,
//! writing `<basename>_edited` outputs into a directory while streaming
//! per-item progress and tolerating per-item failures.
//!
//! # Architecture: One Batch, Three Transforms
//!
//! ```text
//! paths + operation + output dir
//!        │
//!        ▼
//! Batch Runner ──► worker pool ──► decode ─► transform ─► encode
//!        │                                │
//!        │  ProgressUpdate per item       │  ItemOutcome per item
//!        ▼                                ▼
//! progress channel              Result Aggregator ──► BatchSummary
//! ```
//!
//! The caller (the CLI here, or any embedding application) resolves the
//! input list, picks the operation once, and starts the batch; everything
//! after that is hands-off until the summary arrives.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`batch`] | Batch runner — validation, worker pool, progress stream, cooperative cancellation |
//! | [`imaging`] | Pure-Rust image work: codec seam, quality/dimension math, the three transforms |
//! | [`naming`] | Supported-extension set and `<basename>_edited` output naming with collision suffixes |
//! | [`summary`] | Result aggregation into the final success/error summary |
//! | [`output`] | CLI output formatting — progress lines and the end-of-run summary |
//! | [`types`] | Shared types: `OperationSpec`, `ItemOutcome`, `BatchSummary`, `ProgressUpdate` |
//!
//! # Design Decisions
//!
//! ## Partial-Failure Tolerance
//!
//! One unreadable or corrupt file never aborts the rest of the batch: its
//! failure is recorded with the decoder's reason and processing continues.
//! The final [`BatchSummary`](types::BatchSummary) carries the full
//! failure list, so nothing is lost to a scrolled-away log line.
//!
//! ## Worker Pool + Single Consumer
//!
//! Items are independent, so they run across a rayon pool sized to the
//! machine. All outcomes funnel through one mpsc consumer that owns the
//! aggregator and emits progress — no shared mutable state between
//! workers, and `completed` counts are monotonic by construction.
//!
//! ## Pixel-Mode Normalization
//!
//! Format conversion adjusts the pixel mode to the target before encoding:
//! alpha-capable targets (png, webp) get an alpha channel added, and JPEG —
//! which cannot carry alpha — gets alpha-bearing sources composited over
//! opaque white. Without this, the encoder either rejects the raster or
//! silently produces black backgrounds.
//!
//! ## Pure-Rust Imaging
//!
//! All decoding and encoding goes through the `image` crate, statically
//! linked. No ImageMagick, no system libraries: the binary is fully
//! self-contained and behaves identically on every machine.

pub mod batch;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod summary;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
