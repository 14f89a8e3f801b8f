//! Basic metrics instrumentation for the sync bridge.
//!
//! Counters for HTTP traffic to both platforms and for sync outcomes.
//! A single `Metrics` is shared (cheap clones) by the clients and the
//! sync tools.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Total number of HTTP requests made
    http_requests_total: Arc<AtomicU64>,

    /// Total number of HTTP errors
    http_errors_total: Arc<AtomicU64>,

    /// Total duration of all HTTP requests in milliseconds
    http_duration_total_ms: Arc<AtomicU64>,

    /// Apollo records created by syncs
    records_created_total: Arc<AtomicU64>,

    /// Apollo records updated by syncs
    records_updated_total: Arc<AtomicU64>,

    /// Stage names that matched nothing and were passed through
    stage_passthroughs_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            http_requests_total: Arc::new(AtomicU64::new(0)),
            http_errors_total: Arc::new(AtomicU64::new(0)),
            http_duration_total_ms: Arc::new(AtomicU64::new(0)),
            records_created_total: Arc::new(AtomicU64::new(0)),
            records_updated_total: Arc::new(AtomicU64::new(0)),
            stage_passthroughs_total: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Record an HTTP request with duration.
    pub fn record_http_request(&self, duration: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_http_error(&self) {
        self.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_created(&self) {
        self.records_created_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_updated(&self) {
        self.records_updated_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_stage_passthrough(&self) {
        self.stage_passthroughs_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    pub fn http_errors_total(&self) -> u64 {
        self.http_errors_total.load(Ordering::Relaxed)
    }

    pub fn http_duration_total_ms(&self) -> u64 {
        self.http_duration_total_ms.load(Ordering::Relaxed)
    }

    /// Average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    pub fn records_created_total(&self) -> u64 {
        self.records_created_total.load(Ordering::Relaxed)
    }

    pub fn records_updated_total(&self) -> u64 {
        self.records_updated_total.load(Ordering::Relaxed)
    }

    pub fn stage_passthroughs_total(&self) -> u64 {
        self.stage_passthroughs_total.load(Ordering::Relaxed)
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            http_requests_total: self.http_requests_total(),
            http_errors_total: self.http_errors_total(),
            http_duration_total_ms: self.http_duration_total_ms(),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            records_created_total: self.records_created_total(),
            records_updated_total: self.records_updated_total(),
            stage_passthroughs_total: self.stage_passthroughs_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub records_created_total: u64,
    pub records_updated_total: u64,
    pub stage_passthroughs_total: u64,
}
