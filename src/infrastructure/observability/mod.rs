//! Observability infrastructure - Prometheus metrics

mod config;
mod prometheus;

pub use config::MetricsConfig;
pub use prometheus::{
    create_metrics_router, init_metrics, record_assignment, record_http_request,
    record_registration, record_team_created, PrometheusMetrics, RegistrationOutcome,
};
