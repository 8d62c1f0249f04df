//! Prometheus metrics backend for the rqo offset engine.
//!
//! Provides [`PrometheusMetrics`], an implementation of [`rqo_core::MetricsBackend`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use rqo_core::{OffsetEngine, system_clock};
//! use rqo_model::{OffsetConfig, TaskPollState};
//! use rqo_prometheus::{Encoder, PrometheusMetrics, TextEncoder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let engine = OffsetEngine::new(OffsetConfig::default(), system_clock(), Arc::new(metrics.clone()))?;
//! engine.evaluate("HTTP", &TaskPollState::new(3, 0), 10)?;
//!
//! let mut buffer = Vec::new();
//! TextEncoder::new().encode(&metrics.gather(), &mut buffer)?;
//! assert!(String::from_utf8(buffer)?.contains("rqo_offsets_computed_total"));
//! # Ok(())
//! # }
//! ```
//!
//! This crate does NOT serve `/metrics`; expose [`PrometheusMetrics::gather`] through the host's HTTP stack.

mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
