//! Prometheus metrics (lock-free atomics, zero allocation on hot path).

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub static METRICS: Metrics = Metrics::new();

pub struct Metrics {
    // --- Traffic ---
    pub casts_total: AtomicU64,
    pub casts_success: AtomicU64,
    pub casts_error: AtomicU64,

    // --- Failures by kind ---
    pub construction_errors: AtomicU64,
    pub hub_errors: AtomicU64,
    pub chain_errors: AtomicU64,

    // --- Signers ---
    pub signers_provisioned: AtomicU64,

    // --- Latency (μs, updated via CAS) ---
    pub publish_duration_us_sum: AtomicU64,
    pub publish_duration_us_max: AtomicU64,
}

impl Metrics {
    const fn new() -> Self {
        Self {
            casts_total: AtomicU64::new(0),
            casts_success: AtomicU64::new(0),
            casts_error: AtomicU64::new(0),
            construction_errors: AtomicU64::new(0),
            hub_errors: AtomicU64::new(0),
            chain_errors: AtomicU64::new(0),
            signers_provisioned: AtomicU64::new(0),
            publish_duration_us_sum: AtomicU64::new(0),
            publish_duration_us_max: AtomicU64::new(0),
        }
    }

    pub fn record_publish_duration(&self, start: Instant) {
        let us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.publish_duration_us_sum.fetch_add(us, Ordering::Relaxed);
        // CAS loop for max tracking
        let mut cur = self.publish_duration_us_max.load(Ordering::Relaxed);
        while us > cur {
            match self.publish_duration_us_max.compare_exchange_weak(
                cur,
                us,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }

    /// Count a failed publish under its error kind.
    pub fn record_error(&self, error: &crate::Error) {
        self.casts_error.fetch_add(1, Ordering::Relaxed);
        let counter = match error {
            crate::Error::MessageConstruction(_) => &self.construction_errors,
            crate::Error::Submission(_) => &self.hub_errors,
            crate::Error::Chain(_) => &self.chain_errors,
            _ => return,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Render in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let casts_total = self.casts_total.load(Ordering::Relaxed);
        let casts_success = self.casts_success.load(Ordering::Relaxed);
        let casts_error = self.casts_error.load(Ordering::Relaxed);
        let construction_errors = self.construction_errors.load(Ordering::Relaxed);
        let hub_errors = self.hub_errors.load(Ordering::Relaxed);
        let chain_errors = self.chain_errors.load(Ordering::Relaxed);
        let signers_provisioned = self.signers_provisioned.load(Ordering::Relaxed);
        let dur_sum = self.publish_duration_us_sum.load(Ordering::Relaxed);
        let dur_max = self.publish_duration_us_max.swap(0, Ordering::Relaxed);

        // Convert μs to seconds for Prometheus conventions
        let dur_sum_s = dur_sum as f64 / 1_000_000.0;
        let dur_max_s = dur_max as f64 / 1_000_000.0;

        format!(
            "\
# HELP relayer_casts_total Publish requests received.\n\
# TYPE relayer_casts_total counter\n\
relayer_casts_total {casts_total}\n\
# HELP relayer_casts_success_total Casts accepted by the hub.\n\
# TYPE relayer_casts_success_total counter\n\
relayer_casts_success_total {casts_success}\n\
# HELP relayer_casts_error_total Failed publish requests.\n\
# TYPE relayer_casts_error_total counter\n\
relayer_casts_error_total {casts_error}\n\
# HELP relayer_construction_errors_total Casts rejected during message construction.\n\
# TYPE relayer_construction_errors_total counter\n\
relayer_construction_errors_total {construction_errors}\n\
# HELP relayer_hub_errors_total Hub submission failures.\n\
# TYPE relayer_hub_errors_total counter\n\
relayer_hub_errors_total {hub_errors}\n\
# HELP relayer_chain_errors_total Key registry failures.\n\
# TYPE relayer_chain_errors_total counter\n\
relayer_chain_errors_total {chain_errors}\n\
# HELP relayer_signers_provisioned_total Signer keys registered on-chain.\n\
# TYPE relayer_signers_provisioned_total counter\n\
relayer_signers_provisioned_total {signers_provisioned}\n\
# HELP relayer_publish_duration_seconds_sum Total publish time (seconds).\n\
# TYPE relayer_publish_duration_seconds_sum counter\n\
relayer_publish_duration_seconds_sum {dur_sum_s:.6}\n\
# HELP relayer_publish_duration_seconds_max Max publish time since last scrape (seconds).\n\
# TYPE relayer_publish_duration_seconds_max gauge\n\
relayer_publish_duration_seconds_max {dur_max_s:.6}\n"
        )
    }
}
