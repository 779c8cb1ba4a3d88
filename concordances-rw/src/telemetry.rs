//! Prometheus metrics for the read/write pipeline.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

pub const REQUESTS_TOTAL: &str = "concordances_requests_total";
pub const DEPENDENCY_FAILURES_TOTAL: &str = "concordances_dependency_failures_total";
pub const OPERATION_DURATION_SECONDS: &str = "concordances_operation_duration_seconds";

pub struct Telemetry;

impl Telemetry {
    pub fn record_request(operation: &'static str, outcome: &'static str) {
        counter!(REQUESTS_TOTAL, "operation" => operation, "outcome" => outcome).increment(1);
    }

    pub fn record_dependency_failure(subsystem: &'static str, operation: &'static str) {
        counter!(
            DEPENDENCY_FAILURES_TOTAL,
            "subsystem" => subsystem,
            "operation" => operation
        )
        .increment(1);
    }

    pub fn record_latency(operation: &'static str, duration_secs: f64) {
        histogram!(OPERATION_DURATION_SECONDS, "operation" => operation).record(duration_secs);
    }
}

pub struct OperationTimer {
    start: Instant,
    operation: &'static str,
}

impl OperationTimer {
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    pub fn finish(self, outcome: &'static str) {
        Telemetry::record_latency(self.operation, self.start.elapsed().as_secs_f64());
        Telemetry::record_request(self.operation, outcome);
    }
}

/// Installs the process-wide Prometheus recorder. Call once, from the server
/// entry point only.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    fn counter_value(
        snapshot: &[(
            metrics_util::CompositeKey,
            Option<metrics::Unit>,
            Option<metrics::SharedString>,
            DebugValue,
        )],
        name: &str,
        label: (&str, &str),
    ) -> Option<u64> {
        snapshot.iter().find_map(|(key, _, _, value)| {
            let matches_label = key
                .key()
                .labels()
                .any(|l| l.key() == label.0 && l.value() == label.1);
            match value {
                DebugValue::Counter(v) if key.key().name() == name && matches_label => Some(*v),
                _ => None,
            }
        })
    }

    #[test]
    fn test_operation_timer_records_request_and_latency() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            OperationTimer::start("write").finish("created");
            OperationTimer::start("write").finish("created");
        });

        let snapshot = snapshotter.snapshot().into_vec();
        assert_eq!(
            counter_value(&snapshot, REQUESTS_TOTAL, ("outcome", "created")),
            Some(2)
        );
        assert!(
            snapshot
                .iter()
                .any(|(key, _, _, _)| key.key().name() == OPERATION_DURATION_SECONDS)
        );
    }

    #[test]
    fn test_dependency_failure_is_labelled_by_subsystem() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            Telemetry::record_dependency_failure("sns", "write");
        });

        let snapshot = snapshotter.snapshot().into_vec();
        assert_eq!(
            counter_value(&snapshot, DEPENDENCY_FAILURES_TOTAL, ("subsystem", "sns")),
            Some(1)
        );
    }
}
