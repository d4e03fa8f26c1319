//! Batch runner: validation, worker pool, progress stream, cancellation.
//!
//! A run moves through `Idle → Running → Completed/Cancelled`. Starting a
//! batch validates the request (non-empty input list, parameter ranges,
//! creatable output directory), plans every output path up front, and
//! returns a [`BatchHandle`] immediately; the items are processed on a
//! dedicated rayon worker pool while the caller observes progress over an
//! mpsc channel.
//!
//! ## Concurrency model
//!
//! Items are independent, so they fan out across the pool. Workers send
//! each [`ItemOutcome`] to a single consumer thread that owns the
//! [`ResultAggregator`] and emits [`ProgressUpdate`]s — the only shared
//! mutable state is the channel, so `completed` is monotonic by
//! construction and no outcome is lost or double-counted.
//!
//! ## Cancellation
//!
//! Cooperative: [`BatchHandle::cancel`] flips an atomic flag that each
//! worker checks immediately before dispatching an item. An item already
//! mid-transform always runs to completion; items never started produce no
//! outcome and are excluded from both counts. [`BatchHandle::wait`]
//! delivers the final [`BatchSummary`] exactly once, strictly after the
//! last progress event.
//!
//! ## Error policy
//!
//! Per-item codec failures become `Failure` outcomes and never abort the
//! run; only batch-level precondition violations ([`BatchError`]) fail the
//! start call, before any work begins.

use crate::imaging::{ImageCodec, operations};
use crate::naming;
use crate::summary::ResultAggregator;
use crate::types::{BatchSummary, ItemOutcome, OperationSpec, ProgressUpdate};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use thiserror::Error;

/// Batch-level precondition failures. All of these are reported before any
/// item is attempted; nothing is written when start fails.
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("no input images to process")]
    EmptyBatch,
    #[error("quality level {0} is out of range (expected 1-10)")]
    QualityOutOfRange(u8),
    #[error("resize value must be a positive number of pixels")]
    ZeroResizeValue,
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Everything a run needs, fixed for its whole duration.
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub paths: Vec<PathBuf>,
    pub operation: OperationSpec,
    pub output_dir: PathBuf,
}

/// Runner tuning. `threads: None` sizes the pool to available cores —
/// callers can constrain down, not up.
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    pub threads: Option<usize>,
}

/// Handle to a running batch. Dropping it does not cancel the run.
pub struct BatchHandle {
    cancel: Arc<AtomicBool>,
    coordinator: thread::JoinHandle<BatchSummary>,
}

impl BatchHandle {
    /// Request cooperative cancellation. Best-effort: items already
    /// dispatched finish, items not yet started are never attempted.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Block until the run finishes and return its summary.
    pub fn wait(self) -> BatchSummary {
        self.coordinator
            .join()
            .expect("batch coordinator thread panicked")
    }
}

/// Validate and launch a batch run.
///
/// Returns as soon as the worker pool is spun up. Progress, if a sender is
/// supplied, arrives as one [`ProgressUpdate`] per finished item; the
/// sender is dropped when the run ends, closing the stream before
/// [`BatchHandle::wait`] returns.
pub fn start_batch(
    request: BatchRequest,
    config: &BatchConfig,
    codec: Arc<dyn ImageCodec>,
    progress: Option<mpsc::Sender<ProgressUpdate>>,
) -> Result<BatchHandle, BatchError> {
    validate(&request)?;

    fs::create_dir_all(&request.output_dir).map_err(|e| BatchError::OutputDir {
        path: request.output_dir.clone(),
        source: e,
    })?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.unwrap_or(0))
        .build()?;

    let outputs = naming::plan_outputs(&request.paths, &request.operation, &request.output_dir);
    let items: Vec<(PathBuf, PathBuf)> = request.paths.into_iter().zip(outputs).collect();
    let total = items.len();
    let operation = request.operation;

    let cancel = Arc::new(AtomicBool::new(false));
    let worker_cancel = Arc::clone(&cancel);

    let coordinator = thread::spawn(move || {
        let (outcome_tx, outcome_rx) = mpsc::channel();

        let producer = thread::spawn(move || {
            use rayon::prelude::*;
            pool.install(|| {
                items
                    .par_iter()
                    .for_each_with(outcome_tx, |tx, (source, output)| {
                        if worker_cancel.load(Ordering::Relaxed) {
                            // Not attempted: no outcome, excluded from counts.
                            return;
                        }
                        let _ = tx.send(process_item(codec.as_ref(), &operation, source, output));
                    });
            });
        });

        let mut aggregator = ResultAggregator::new();
        let mut completed = 0;
        for outcome in outcome_rx {
            completed += 1;
            aggregator.record(&outcome);
            if let Some(progress) = &progress {
                let _ = progress.send(ProgressUpdate {
                    completed,
                    total,
                    outcome,
                });
            }
        }
        producer.join().expect("worker pool thread panicked");
        aggregator.finalize()
    });

    Ok(BatchHandle {
        cancel,
        coordinator,
    })
}

fn validate(request: &BatchRequest) -> Result<(), BatchError> {
    if request.paths.is_empty() {
        return Err(BatchError::EmptyBatch);
    }
    match request.operation {
        OperationSpec::Compress { quality_level } if !(1..=10).contains(&quality_level) => {
            Err(BatchError::QualityOutOfRange(quality_level))
        }
        OperationSpec::Resize { value: 0, .. } => Err(BatchError::ZeroResizeValue),
        _ => Ok(()),
    }
}

fn process_item(
    codec: &dyn ImageCodec,
    operation: &OperationSpec,
    source: &Path,
    output: &Path,
) -> ItemOutcome {
    match operations::apply(codec, operation, source, output) {
        Ok(()) => ItemOutcome::Success {
            source: source.to_path_buf(),
            output: output.to_path_buf(),
        },
        Err(err) => ItemOutcome::Failure {
            source: source.to_path_buf(),
            message: err.to_string(),
        },
    }
}
