// src/health/reporter.rs
use super::error::ProbeFailure;
use std::error::Error;
use tracing::error;

/// Side-channel notified whenever a probe fails.
///
/// The probe result is fixed before `report` is called. A panicking
/// reporter is contained by the probe and cannot change the result.
pub trait FailureReporter: Send + Sync {
    fn report(&self, operation: &str, failure: &ProbeFailure);
}

/// Reports failures through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, operation: &str, failure: &ProbeFailure) {
        let mut chain = failure.to_string();
        let mut source = failure.source();
        while let Some(cause) = source {
            chain.push_str(": ");
            chain.push_str(&cause.to_string());
            source = cause.source();
        }

        error!(
            operation,
            kind = failure.kind(),
            "{} failed: {}",
            operation,
            chain
        );
    }
}
