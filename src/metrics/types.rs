use std::time::Duration;

use chrono::{DateTime, Local};

const MILLIS_PER_SECOND: f64 = 1000.0;

/// Outcome of one HTTP attempt. Built once by an executor, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestResult {
    endpoint: String,
    status_code: u16,
    latency: Duration,
    response_bytes: u64,
    success: bool,
    error: Option<String>,
    timestamp: DateTime<Local>,
}

impl RequestResult {
    /// A request that received an HTTP response and read its whole body.
    #[must_use]
    pub fn from_response(
        endpoint: &str,
        status_code: u16,
        latency: Duration,
        response_bytes: u64,
    ) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            status_code,
            latency,
            response_bytes,
            success: (200..300).contains(&status_code),
            error: None,
            timestamp: Local::now(),
        }
    }

    /// A request that failed below HTTP (refused, reset, timeout, DNS).
    #[must_use]
    pub fn transport_failure(endpoint: &str, latency: Duration, message: String) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            status_code: 0,
            latency,
            response_bytes: 0,
            success: false,
            error: Some(message),
            timestamp: Local::now(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 0 when no HTTP response was received.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    #[must_use]
    pub fn latency_ms(&self) -> f64 {
        self.latency.as_secs_f64() * MILLIS_PER_SECOND
    }

    #[must_use]
    pub const fn response_bytes(&self) -> u64 {
        self.response_bytes
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }

    /// Present only for transport failures.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }
}

/// Latency distribution over successful requests, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencyStats {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub stdev_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Aggregate statistics for one target under one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSummary {
    pub total_requests: u64,
    pub successful: u64,
    pub failed: u64,
    pub success_rate_pct: f64,
    /// `None` when no request succeeded.
    pub latency: Option<LatencyStats>,
    pub total_response_bytes: u64,
}

impl TargetSummary {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_requests: 0,
            successful: 0,
            failed: 0,
            success_rate_pct: 0.0,
            latency: None,
            total_response_bytes: 0,
        }
    }
}
