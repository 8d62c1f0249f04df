//! Metrics collection abstraction for the offset engine.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are injected into [`crate::OffsetEngine`].
mod backend;
pub use backend::{MetricsBackend, MetricsHandle, ReloadOutcome};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
