use std::sync::Arc;

use prometheus::{CounterVec, HistogramOpts, HistogramVec, Opts, Registry, proto::MetricFamily};

use rqo_core::{MetricsBackend, ReloadOutcome};
use rqo_model::OffsetStrategy;

const NAMESPACE: &str = "rqo";

/// Prometheus metrics backend for the offset engine.
///
/// ## Metrics
/// - `rqo_offsets_computed_total{strategy}` - Counter of computed offsets
/// - `rqo_offset_seconds{strategy}` - Histogram of computed offsets
/// - `rqo_resolve_errors_total{strategy}` - Counter of strategies without an evaluation
/// - `rqo_config_reloads_total{outcome}` - Counter of reload attempts
///
/// ## Label cardinality
/// - `strategy`: one value per [`OffsetStrategy`]
/// - `outcome`: "applied", "rejected"
#[derive(Clone)]
pub struct PrometheusMetrics {
    offsets_computed: CounterVec,
    offset_seconds: HistogramVec,
    resolve_errors: CounterVec,
    config_reloads: CounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Create a backend registering its collectors into `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let offsets_computed = CounterVec::new(
            Opts::new("offsets_computed_total", "Total number of computed postpone offsets")
                .namespace(NAMESPACE),
            &["strategy"],
        )?;
        registry.register(Box::new(offsets_computed.clone()))?;

        let offset_seconds = HistogramVec::new(
            HistogramOpts::new("offset_seconds", "Computed postpone offset in seconds")
                .namespace(NAMESPACE)
                .buckets(vec![
                    0.0, 1.0, 2.0, 4.0, 8.0, 16.0, 30.0, 60.0, 120.0, 300.0, 600.0, 1800.0, 3600.0,
                ]),
            &["strategy"],
        )?;
        registry.register(Box::new(offset_seconds.clone()))?;

        let resolve_errors = CounterVec::new(
            Opts::new("resolve_errors_total", "Strategies requested without a registered evaluation")
                .namespace(NAMESPACE),
            &["strategy"],
        )?;
        registry.register(Box::new(resolve_errors.clone()))?;

        let config_reloads = CounterVec::new(
            Opts::new("config_reloads_total", "Offset configuration reload attempts")
                .namespace(NAMESPACE),
            &["outcome"],
        )?;
        registry.register(Box::new(config_reloads.clone()))?;

        Ok(Self {
            offsets_computed,
            offset_seconds,
            resolve_errors,
            config_reloads,
            registry,
        })
    }

    /// Create a backend with its own registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Gather all metrics for exposition.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Underlying registry, for registering custom collectors alongside.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_offset(&self, strategy: OffsetStrategy, offset_secs: u64) {
        let label = [strategy.as_label()];
        self.offsets_computed.with_label_values(&label).inc();
        self.offset_seconds
            .with_label_values(&label)
            .observe(offset_secs as f64);
    }

    fn record_resolve_error(&self, strategy: OffsetStrategy) {
        self.resolve_errors
            .with_label_values(&[strategy.as_label()])
            .inc();
    }

    fn record_reload(&self, outcome: ReloadOutcome) {
        self.config_reloads
            .with_label_values(&[outcome.as_label()])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use prometheus::Encoder;

    use super::*;

    fn family<'a>(families: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
        families
            .iter()
            .find(|f| f.name() == name)
            .unwrap_or_else(|| panic!("metric {name} not found"))
    }

    #[test]
    fn can_create_prometheus_metrics() {
        let _metrics = PrometheusMetrics::new().expect("failed to create metrics");
    }

    #[test]
    fn record_offset_increments_counter_and_histogram() {
        let metrics = PrometheusMetrics::new().unwrap();

        metrics.record_offset(OffsetStrategy::BackoffToDefault, 2);
        metrics.record_offset(OffsetStrategy::BackoffToDefault, 4);
        metrics.record_offset(OffsetStrategy::ScaledByTaskDuration, 120);

        let families = metrics.gather();
        let computed = family(&families, "rqo_offsets_computed_total");
        assert_eq!(computed.get_metric().len(), 2);

        let histogram = family(&families, "rqo_offset_seconds");
        assert_eq!(histogram.get_metric().len(), 2);
    }

    #[test]
    fn record_resolve_error_uses_strategy_label() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_resolve_error(OffsetStrategy::ScaledByQueueSize);

        let mut buffer = Vec::new();
        prometheus::TextEncoder::new()
            .encode(&metrics.gather(), &mut buffer)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(
            text.contains(r#"rqo_resolve_errors_total{strategy="scaled_by_queue_size"} 1"#),
            "unexpected exposition:\n{text}"
        );
    }

    #[test]
    fn record_reload_counts_outcomes() {
        let metrics = PrometheusMetrics::new().unwrap();
        metrics.record_reload(ReloadOutcome::Applied);
        metrics.record_reload(ReloadOutcome::Rejected);
        metrics.record_reload(ReloadOutcome::Applied);

        let families = metrics.gather();
        let reloads = family(&families, "rqo_config_reloads_total");
        assert_eq!(reloads.get_metric().len(), 2);
    }

    #[test]
    fn can_use_custom_registry() {
        let registry = Arc::new(Registry::new());
        let metrics = PrometheusMetrics::new_with_registry(registry.clone()).unwrap();

        metrics.record_offset(OffsetStrategy::Constant, 30);
        assert!(!registry.gather().is_empty());
    }

    #[test]
    fn double_registration_fails() {
        let registry = Arc::new(Registry::new());
        let _first = PrometheusMetrics::new_with_registry(registry.clone()).unwrap();
        assert!(PrometheusMetrics::new_with_registry(registry).is_err());
    }
}
