// src/health/status.rs
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Message used when the provider sends no usable description.
pub const FALLBACK_MESSAGE: &str = "status unknown";

/// Normalized health of the upstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Operational,
    Degraded,
    Down,
    Unknown,
}

impl HealthStatus {
    /// Map a status page indicator onto the normalized vocabulary.
    /// Comparison is case-insensitive; anything unrecognised is `Unknown`.
    pub fn from_indicator(indicator: &str) -> Self {
        match indicator.to_ascii_lowercase().as_str() {
            "none" => HealthStatus::Operational,
            "minor" => HealthStatus::Degraded,
            "major" | "critical" => HealthStatus::Down,
            _ => HealthStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Operational => "operational",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Down => "down",
            HealthStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResult {
    status: HealthStatus,
    message: String,
    #[serde(serialize_with = "serialize_iso8601")]
    checked_at: DateTime<Utc>,
}

impl StatusResult {
    pub fn new(status: HealthStatus, message: impl Into<String>, checked_at: DateTime<Utc>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message
        };

        Self {
            status,
            message,
            checked_at,
        }
    }

    pub fn status(&self) -> HealthStatus {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }
}

fn serialize_iso8601<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Status page payload. Only the fields we read are modelled.
#[derive(Debug, Deserialize)]
pub struct ProviderResponse {
    pub status: ProviderStatus,
}

#[derive(Debug, Deserialize)]
pub struct ProviderStatus {
    #[serde(default)]
    pub indicator: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProviderResponse {
    pub fn classify(self, checked_at: DateTime<Utc>) -> StatusResult {
        let status = self
            .status
            .indicator
            .as_deref()
            .map(HealthStatus::from_indicator)
            .unwrap_or(HealthStatus::Unknown);

        StatusResult::new(status, self.status.description.unwrap_or_default(), checked_at)
    }
}
