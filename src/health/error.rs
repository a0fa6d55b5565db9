// src/health/error.rs
use reqwest::StatusCode;
use std::time::Duration;

/// Why a probe could not produce a classification.
#[derive(Debug, thiserror::Error)]
pub enum ProbeFailure {
    #[error("no response within {after:?}")]
    Timeout { after: Duration },

    #[error("transport error")]
    Transport(#[source] reqwest::Error),

    #[error("endpoint returned {0}")]
    Http(StatusCode),

    #[error("malformed status payload")]
    Malformed(#[source] serde_json::Error),
}

impl ProbeFailure {
    /// Text surfaced to the caller in `StatusResult::message`.
    /// Transport and payload errors are intentionally indistinguishable here.
    pub fn message(&self) -> String {
        match self {
            ProbeFailure::Timeout { .. } => "check timed out".to_string(),
            ProbeFailure::Http(code) => format!("HTTP {}", code.as_u16()),
            ProbeFailure::Transport(_) | ProbeFailure::Malformed(_) => "check failed".to_string(),
        }
    }

    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeFailure::Timeout { .. } => "timeout",
            ProbeFailure::Transport(_) => "transport",
            ProbeFailure::Http(_) => "http",
            ProbeFailure::Malformed(_) => "malformed",
        }
    }

    /// Classify a client error. `after` is the deadline in force for the request.
    pub fn from_reqwest(err: reqwest::Error, after: Duration) -> Self {
        if err.is_timeout() {
            ProbeFailure::Timeout { after }
        } else {
            ProbeFailure::Transport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let timeout = ProbeFailure::Timeout {
            after: Duration::from_millis(50),
        };
        assert_eq!(timeout.message(), "check timed out");
        assert_eq!(timeout.kind(), "timeout");

        let http = ProbeFailure::Http(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(http.message(), "HTTP 503");
        assert_eq!(http.kind(), "http");

        let malformed = ProbeFailure::Malformed(serde_json::from_str::<u8>("{").unwrap_err());
        assert_eq!(malformed.message(), "check failed");
        assert_eq!(malformed.kind(), "malformed");
        assert_eq!(malformed.to_string(), "malformed status payload");
        assert!(std::error::Error::source(&malformed).is_some());
    }
}
