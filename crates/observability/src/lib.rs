use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct SkillMetrics {
    requests_total: AtomicU64,
    handler_errors_total: AtomicU64,
    sessions_ended_total: AtomicU64,
    total_latency_micros: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub handler_errors_total: u64,
    pub sessions_ended_total: u64,
    pub avg_latency_micros: f64,
}

impl SkillMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_handler_error(&self) {
        self.handler_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_session_ended(&self) {
        self.sessions_ended_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_micros.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: requests,
            handler_errors_total: self.handler_errors_total.load(Ordering::Relaxed),
            sessions_ended_total: self.sessions_ended_total.load(Ordering::Relaxed),
            avg_latency_micros: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

/// Installs the JSON subscriber once per process, writing to stdout.
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing(service_name: &str) {
    install(service_name, false);
}

/// Same as [`init_tracing`] but logs to stderr, keeping stdout free for
/// command output.
pub fn init_cli_tracing(service_name: &str) {
    install(service_name, true);
}

fn install(service_name: &str, to_stderr: bool) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,plantfacts_skill=info,plantfacts_api=info",
                service_name
            ))
        });

        let builder = tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true);

        if to_stderr {
            builder.with_writer(std::io::stderr).init();
        } else {
            builder.init();
        }
    });
}
