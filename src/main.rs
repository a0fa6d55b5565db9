// src/main.rs
use anyhow::{Context, Result};
use status_probe::{
    config,
    health::{HealthStatus, StatusProbe},
    metrics::MetricsRegistry,
};
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for the JSON result
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("status_probe=info")),
        )
        .init();

    let outcome = run().await;
    if let Err(e) = &outcome {
        error!("{:#}", e);
    }
    outcome_code(&outcome)
}

async fn run() -> Result<HealthStatus> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.yaml".to_string());

    info!("Loading configuration from: {}", config_path);
    let config = config::load_config(&config_path).await?;

    let mut probe = StatusProbe::new(config.probe.clone()).context("Failed to create HTTP client")?;
    info!(
        "Checking {} (timeout {:?})",
        probe.config().endpoint,
        probe.config().timeout()
    );

    // Initialize metrics
    let metrics_registry = if config.metrics.enabled {
        let registry = MetricsRegistry::new()?;
        probe = probe.with_metrics(registry.collector());
        Some(registry)
    } else {
        None
    };

    let result = probe.check().await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    // Metrics write failures keep the check's exit code
    if let Some(registry) = metrics_registry {
        let path = &config.metrics.path;
        match registry.gather() {
            Ok(text) => match tokio::fs::write(path, text).await {
                Ok(()) => info!("Metrics written to {}", path.display()),
                Err(e) => warn!("Failed to write metrics to {}: {}", path.display(), e),
            },
            Err(e) => warn!("Failed to encode metrics: {}", e),
        }
    }

    Ok(result.status())
}

/// Setup errors report UNKNOWN, never a service state.
fn outcome_code(outcome: &Result<HealthStatus>) -> ExitCode {
    match outcome {
        Ok(status) => exit_code(*status),
        Err(_) => exit_code(HealthStatus::Unknown),
    }
}

/// Monitoring-plugin exit codes: OK, WARNING, CRITICAL, UNKNOWN.
fn exit_code(status: HealthStatus) -> ExitCode {
    match status {
        HealthStatus::Operational => ExitCode::from(0),
        HealthStatus::Degraded => ExitCode::from(1),
        HealthStatus::Down => ExitCode::from(2),
        HealthStatus::Unknown => ExitCode::from(3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(HealthStatus::Operational), ExitCode::from(0));
        assert_eq!(exit_code(HealthStatus::Degraded), ExitCode::from(1));
        assert_eq!(exit_code(HealthStatus::Down), ExitCode::from(2));
        assert_eq!(exit_code(HealthStatus::Unknown), ExitCode::from(3));
    }

    #[tokio::test]
    async fn test_setup_error_exits_unknown() {
        let outcome = config::load_config("/nonexistent/status-probe.yaml")
            .await
            .map(|_| HealthStatus::Operational);

        assert!(outcome.is_err());
        assert_eq!(outcome_code(&outcome), ExitCode::from(3));
        assert_eq!(outcome_code(&Ok(HealthStatus::Degraded)), ExitCode::from(1));
    }
}
