//! Result aggregation for a batch run.
//!
//! The aggregator is a pure accumulator owned by the single consumer
//! thread in the batch runner, so outcome recording never races across
//! workers. For N attempted items, `success_count + error_count == N`
//! exactly: every outcome is recorded once, none is double-counted.

use crate::types::{BatchSummary, FailureRecord, ItemOutcome};

/// Accumulates per-item outcomes into the final [`BatchSummary`].
#[derive(Debug, Default)]
pub struct ResultAggregator {
    success_count: usize,
    failures: Vec<FailureRecord>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one item's outcome. Failures keep their diagnostic message,
    /// in completion order.
    pub fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Success { .. } => self.success_count += 1,
            ItemOutcome::Failure { source, message } => self.failures.push(FailureRecord {
                path: source.clone(),
                message: message.clone(),
            }),
        }
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn error_count(&self) -> usize {
        self.failures.len()
    }

    /// Consume the aggregator into the terminal summary.
    pub fn finalize(self) -> BatchSummary {
        BatchSummary {
            success_count: self.success_count,
            error_count: self.failures.len(),
            failures: self.failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn success(name: &str) -> ItemOutcome {
        ItemOutcome::Success {
            source: PathBuf::from(name),
            output: PathBuf::from(format!("out/{name}")),
        }
    }

    fn failure(name: &str, message: &str) -> ItemOutcome {
        ItemOutcome::Failure {
            source: PathBuf::from(name),
            message: message.to_string(),
        }
    }

    #[test]
    fn empty_aggregator_finalizes_to_zero_summary() {
        let summary = ResultAggregator::new().finalize();
        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.error_count, 0);
        assert!(summary.failures.is_empty());
    }

    #[test]
    fn counts_add_up_to_attempted_items() {
        let mut agg = ResultAggregator::new();
        let outcomes = [
            success("a.jpg"),
            failure("b.jpg", "unreadable"),
            success("c.jpg"),
            failure("d.jpg", "corrupt"),
            success("e.jpg"),
        ];
        for outcome in &outcomes {
            agg.record(outcome);
        }

        assert_eq!(agg.success_count() + agg.error_count(), outcomes.len());
        let summary = agg.finalize();
        assert_eq!(summary.success_count, 3);
        assert_eq!(summary.error_count, 2);
    }

    #[test]
    fn failures_keep_order_and_messages() {
        let mut agg = ResultAggregator::new();
        agg.record(&failure("first.png", "bad header"));
        agg.record(&success("ok.png"));
        agg.record(&failure("second.png", "truncated"));

        let summary = agg.finalize();
        assert_eq!(summary.failures.len(), 2);
        assert_eq!(summary.failures[0].path, PathBuf::from("first.png"));
        assert_eq!(summary.failures[0].message, "bad header");
        assert_eq!(summary.failures[1].path, PathBuf::from("second.png"));
    }

    #[test]
    fn error_count_always_matches_failure_list() {
        let mut agg = ResultAggregator::new();
        for i in 0..4 {
            agg.record(&failure(&format!("{i}.gif"), "nope"));
        }
        let summary = agg.finalize();
        assert_eq!(summary.error_count, summary.failures.len());
    }

    #[test]
    fn summary_serializes_for_machine_consumers() {
        let mut agg = ResultAggregator::new();
        agg.record(&success("a.jpg"));
        agg.record(&failure("b.jpg", "unreadable"));
        let json = serde_json::to_value(agg.finalize()).unwrap();

        assert_eq!(json["success_count"], 1);
        assert_eq!(json["error_count"], 1);
        assert_eq!(json["failures"][0]["path"], "b.jpg");
        assert_eq!(json["failures"][0]["message"], "unreadable");
    }
}
