// src/health/checker.rs
use super::error::ProbeFailure;
use super::reporter::{FailureReporter, TracingReporter};
use super::status::{HealthStatus, ProviderResponse, StatusResult};
use crate::config::ProbeConfig;
use crate::metrics::{ProbeMetrics, Timer};
use chrono::Utc;
use reqwest::header::ACCEPT;
use reqwest::Client;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Operation name handed to the failure reporter.
pub const CHECK_OPERATION: &str = "status_check";

/// Queries a status page endpoint and classifies the answer.
///
/// A probe holds no state between calls. `check` can be called repeatedly
/// and from several tasks at once.
pub struct StatusProbe {
    config: ProbeConfig,
    client: Client,
    reporter: Arc<dyn FailureReporter>,
    metrics: Option<Arc<ProbeMetrics>>,
}

impl StatusProbe {
    pub fn new(config: ProbeConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            config,
            client,
            reporter: Arc::new(TracingReporter),
            metrics: None,
        })
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn FailureReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ProbeMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run one check. Never fails: every problem becomes an `unknown` result.
    pub async fn check(&self) -> StatusResult {
        let checked_at = Utc::now();
        let timer = Timer::new();
        let span = info_span!(
            "status_check",
            check_id = %Uuid::new_v4(),
            endpoint = %self.config.endpoint
        );

        async move {
            let result = match self.fetch().await {
                Ok(payload) => {
                    let indicator = payload.status.indicator.clone();
                    let result = payload.classify(checked_at);
                    if result.status() == HealthStatus::Unknown {
                        match indicator {
                            Some(indicator) => warn!("Unrecognised status indicator '{}'", indicator),
                            None => warn!("Status payload carries no indicator"),
                        }
                    }
                    result
                }
                Err(failure) => {
                    if let Some(metrics) = &self.metrics {
                        metrics.record_failure(&failure);
                    }
                    self.report(&failure);
                    StatusResult::new(HealthStatus::Unknown, failure.message(), checked_at)
                }
            };

            let elapsed = timer.elapsed();
            if let Some(metrics) = &self.metrics {
                metrics.record_check(result.status(), checked_at, elapsed);
            }

            info!(
                status = %result.status(),
                elapsed_ms = elapsed.as_millis() as u64,
                "Status check complete: {}",
                result.message()
            );

            result
        }
        .instrument(span)
        .await
    }

    fn report(&self, failure: &ProbeFailure) {
        let reported = catch_unwind(AssertUnwindSafe(|| {
            self.reporter.report(CHECK_OPERATION, failure)
        }));
        if reported.is_err() {
            error!(kind = failure.kind(), "Failure reporter panicked; result unaffected");
        }
    }

    async fn fetch(&self) -> Result<ProviderResponse, ProbeFailure> {
        let deadline = self.config.timeout();

        // Dropping the request future on expiry aborts it; a late body is never read.
        match timeout(deadline, self.request()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeFailure::Timeout { after: deadline }),
        }
    }

    async fn request(&self) -> Result<ProviderResponse, ProbeFailure> {
        let deadline = self.config.timeout();

        debug!("Requesting {}", self.config.endpoint);
        let response = self
            .client
            .get(self.config.endpoint.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ProbeFailure::from_reqwest(e, deadline))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeFailure::Http(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProbeFailure::from_reqwest(e, deadline))?;
        debug!("Received {} byte status payload", body.len());

        serde_json::from_slice(&body).map_err(ProbeFailure::Malformed)
    }
}
