//! HTTP middleware.

pub mod metrics;

pub use metrics::track_metrics;
