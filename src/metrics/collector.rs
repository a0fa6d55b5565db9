// src/metrics/collector.rs
use crate::health::{HealthStatus, ProbeFailure};
use anyhow::Result;
use chrono::{DateTime, Utc};
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<ProbeMetrics>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(ProbeMetrics::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<ProbeMetrics> {
        self.collector.clone()
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn gather(&self) -> Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}

pub struct ProbeMetrics {
    pub checks_total: IntCounterVec,
    pub failures_total: IntCounterVec,
    pub check_duration_seconds: Histogram,
    pub last_check_timestamp_seconds: IntGauge,
}

impl ProbeMetrics {
    pub fn new(registry: &Registry) -> Result<Self> {
        let checks_total = IntCounterVec::new(
            Opts::new("status_checks_total", "Total status checks by outcome"),
            &["status"],
        )?;
        registry.register(Box::new(checks_total.clone()))?;

        let failures_total = IntCounterVec::new(
            Opts::new(
                "status_check_failures_total",
                "Failed status checks by failure kind",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(failures_total.clone()))?;

        let check_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "status_check_duration_seconds",
            "Status check duration in seconds",
        ))?;
        registry.register(Box::new(check_duration_seconds.clone()))?;

        let last_check_timestamp_seconds = IntGauge::new(
            "status_check_last_timestamp_seconds",
            "Unix time the most recent check started",
        )?;
        registry.register(Box::new(last_check_timestamp_seconds.clone()))?;

        Ok(Self {
            checks_total,
            failures_total,
            check_duration_seconds,
            last_check_timestamp_seconds,
        })
    }

    pub fn record_check(&self, status: HealthStatus, checked_at: DateTime<Utc>, duration: Duration) {
        self.checks_total
            .with_label_values(&[status.as_str()])
            .inc();
        self.check_duration_seconds.observe(duration.as_secs_f64());
        self.last_check_timestamp_seconds.set(checked_at.timestamp());
    }

    pub fn record_failure(&self, failure: &ProbeFailure) {
        self.failures_total
            .with_label_values(&[failure.kind()])
            .inc();
    }
}

// Helper for timing operations
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
