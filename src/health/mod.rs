// src/health/mod.rs
mod checker;
mod error;
mod reporter;
mod status;

pub use checker::{StatusProbe, CHECK_OPERATION};
pub use error::ProbeFailure;
pub use reporter::{FailureReporter, TracingReporter};
pub use status::{HealthStatus, ProviderResponse, ProviderStatus, StatusResult, FALLBACK_MESSAGE};
