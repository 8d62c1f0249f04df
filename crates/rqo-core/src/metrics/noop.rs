use rqo_model::OffsetStrategy;

use crate::metrics::backend::{MetricsBackend, ReloadOutcome};

/// No-op metrics backend that compiles to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_offset(&self, _: OffsetStrategy, _: u64) {}

    #[inline(always)]
    fn record_resolve_error(&self, _: OffsetStrategy) {}

    #[inline(always)]
    fn record_reload(&self, _: ReloadOutcome) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_metrics_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
    }

    #[test]
    fn noop_can_be_called_repeatedly() {
        let metrics = NoOpMetrics;
        for i in 0..1000 {
            metrics.record_offset(OffsetStrategy::BackoffToDefault, i);
            metrics.record_resolve_error(OffsetStrategy::Constant);
            metrics.record_reload(ReloadOutcome::Applied);
        }
    }
}
