//! Counters for calls to the email provider.
//!
//! Every call ends in exactly one of three ways: the email was sent, the
//! provider rejected it with a status code, or the request never got an
//! answer. The counters are shared through `Arc` so the `/health` endpoint
//! can read what the client records.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Provider call metrics.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    provider_calls_total: Arc<AtomicU64>,
    provider_latency_total_ms: Arc<AtomicU64>,
    emails_sent_total: Arc<AtomicU64>,
    transport_failures_total: Arc<AtomicU64>,

    /// Rejections keyed by the status the provider answered with
    rejections_by_status: Arc<Mutex<BTreeMap<u16, u64>>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_call(&self, latency: Duration) {
        self.provider_calls_total.fetch_add(1, Ordering::Relaxed);
        self.provider_latency_total_ms
            .fetch_add(latency.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_email_sent(&self, latency: Duration) {
        self.record_call(latency);
        self.emails_sent_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a non-2xx answer from the provider.
    pub fn record_provider_rejection(&self, status: u16, latency: Duration) {
        self.record_call(latency);
        let mut rejections = self
            .rejections_by_status
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *rejections.entry(status).or_insert(0) += 1;
    }

    pub fn record_transport_failure(&self, latency: Duration) {
        self.record_call(latency);
        self.transport_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn provider_calls_total(&self) -> u64 {
        self.provider_calls_total.load(Ordering::Relaxed)
    }

    pub fn emails_sent_total(&self) -> u64 {
        self.emails_sent_total.load(Ordering::Relaxed)
    }

    pub fn transport_failures_total(&self) -> u64 {
        self.transport_failures_total.load(Ordering::Relaxed)
    }

    pub fn rejections_by_status(&self) -> BTreeMap<u16, u64> {
        self.rejections_by_status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rejections recorded for one provider status.
    pub fn rejections_for(&self, status: u16) -> u64 {
        self.rejections_by_status()
            .get(&status)
            .copied()
            .unwrap_or(0)
    }

    pub fn emails_rejected_total(&self) -> u64 {
        self.rejections_by_status().values().sum()
    }

    /// Mean provider latency in milliseconds, 0 before the first call.
    pub fn provider_latency_avg_ms(&self) -> f64 {
        let calls = self.provider_calls_total();
        if calls == 0 {
            return 0.0;
        }
        self.provider_latency_total_ms.load(Ordering::Relaxed) as f64 / calls as f64
    }

    pub fn summary(&self) -> MetricsSummary {
        let rejections_by_status = self.rejections_by_status();
        MetricsSummary {
            provider_calls_total: self.provider_calls_total(),
            provider_latency_avg_ms: self.provider_latency_avg_ms(),
            emails_sent_total: self.emails_sent_total(),
            emails_rejected_total: rejections_by_status.values().sum(),
            transport_failures_total: self.transport_failures_total(),
            rejections_by_status,
        }
    }
}

/// Snapshot served on `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub provider_calls_total: u64,
    pub provider_latency_avg_ms: f64,
    pub emails_sent_total: u64,
    pub emails_rejected_total: u64,
    pub transport_failures_total: u64,
    pub rejections_by_status: BTreeMap<u16, u64>,
}

/// Times one provider call and records how it ended.
pub struct CallTimer {
    start: Instant,
    metrics: Metrics,
}

impl CallTimer {
    pub fn start(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn sent(self) {
        self.metrics.record_email_sent(self.start.elapsed());
    }

    pub fn rejected(self, status: u16) {
        self.metrics
            .record_provider_rejection(status, self.start.elapsed());
    }

    pub fn failed(self) {
        self.metrics.record_transport_failure(self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.provider_calls_total(), 0);
        assert_eq!(metrics.emails_rejected_total(), 0);
        assert_eq!(metrics.provider_latency_avg_ms(), 0.0);
    }

    #[test]
    fn test_rejections_keyed_by_status() {
        let metrics = Metrics::new();
        metrics.record_provider_rejection(401, Duration::from_millis(10));
        metrics.record_provider_rejection(401, Duration::from_millis(10));
        metrics.record_provider_rejection(304, Duration::from_millis(10));

        assert_eq!(metrics.rejections_for(401), 2);
        assert_eq!(metrics.rejections_for(304), 1);
        assert_eq!(metrics.rejections_for(500), 0);
        assert_eq!(metrics.emails_rejected_total(), 3);
        assert_eq!(metrics.emails_sent_total(), 0);
        assert_eq!(metrics.provider_calls_total(), 3);
    }

    #[test]
    fn test_summary() {
        let metrics = Metrics::new();
        metrics.record_email_sent(Duration::from_millis(100));
        metrics.record_provider_rejection(429, Duration::from_millis(200));
        metrics.record_transport_failure(Duration::from_millis(300));

        let summary = metrics.summary();
        assert_eq!(summary.provider_calls_total, 3);
        assert_eq!(summary.provider_latency_avg_ms, 200.0);
        assert_eq!(summary.emails_sent_total, 1);
        assert_eq!(summary.emails_rejected_total, 1);
        assert_eq!(summary.transport_failures_total, 1);
        assert_eq!(summary.rejections_by_status.get(&429), Some(&1));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["rejections_by_status"]["429"], 1);
    }

    #[test]
    fn test_call_timer() {
        let metrics = Metrics::new();
        CallTimer::start(metrics.clone()).sent();
        CallTimer::start(metrics.clone()).rejected(400);
        CallTimer::start(metrics.clone()).failed();

        assert_eq!(metrics.provider_calls_total(), 3);
        assert_eq!(metrics.emails_sent_total(), 1);
        assert_eq!(metrics.rejections_for(400), 1);
        assert_eq!(metrics.transport_failures_total(), 1);
    }

    #[test]
    fn test_concurrent_access() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let metrics = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.record_provider_rejection(503, Duration::ZERO);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.rejections_for(503), 200);
    }
}
