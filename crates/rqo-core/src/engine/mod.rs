//! Dispatcher-facing offset engine.
//! - Owns one frozen [`OffsetRegistry`] built from an [`OffsetConfig`] snapshot.
//! - Maps a queue or task type to its configured [`OffsetStrategy`].
//! - Computes the offset, logs it and records it through the metrics backend.
mod handle;
pub use handle::EngineHandle;

use std::{fmt, time::Duration};

use rqo_model::{OffsetConfig, OffsetSecs, OffsetStrategy, QueueSize, TaskPollState};
use tracing::{debug, info, instrument};

use crate::{
    clock::ClockHandle,
    error::CoreResult,
    metrics::MetricsHandle,
    registry::OffsetRegistry,
};

/// Immutable offset engine for one configuration snapshot.
///
/// This type is responsible for:
/// - validating the snapshot and failing fast on strategies without an evaluation;
/// - selecting a strategy for each queue or task type;
/// - evaluating the visibility offset of postponed tasks.
///
/// Cheap to share behind an `Arc`; hot reload swaps whole engines via [`crate::EngineHandle`].
pub struct OffsetEngine {
    config: OffsetConfig,
    registry: OffsetRegistry,
    clock: ClockHandle,
    metrics: MetricsHandle,
}

impl OffsetEngine {
    /// Build an engine with every built-in strategy registered.
    pub fn new(config: OffsetConfig, clock: ClockHandle, metrics: MetricsHandle) -> CoreResult<Self> {
        let registry = OffsetRegistry::from_config(&config, clock.clone());
        Self::with_registry(config, registry, clock, metrics)
    }

    /// Build an engine around a custom registry.
    ///
    /// Fails if the configuration references a strategy the registry cannot resolve.
    pub fn with_registry(
        config: OffsetConfig,
        registry: OffsetRegistry,
        clock: ClockHandle,
        metrics: MetricsHandle,
    ) -> CoreResult<Self> {
        config.validate()?;
        registry.ensure_registered(config.referenced_strategies())?;

        info!(
            queues = config.strategies.len(),
            default_strategy = %config.default_strategy,
            default_offset_secs = config.default_offset_secs,
            "offset engine ready"
        );
        Ok(Self {
            config,
            registry,
            clock,
            metrics,
        })
    }

    /// Configuration snapshot this engine was built from.
    pub fn config(&self) -> &OffsetConfig {
        &self.config
    }

    /// Registry of evaluations.
    pub fn registry(&self) -> &OffsetRegistry {
        &self.registry
    }

    /// Clock shared with duration-based evaluations.
    pub fn clock(&self) -> &ClockHandle {
        &self.clock
    }

    /// Metrics backend.
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    /// Strategy configured for the queue or task type.
    #[inline]
    pub fn strategy_for(&self, queue_type: &str) -> OffsetStrategy {
        self.config.strategy_for(queue_type)
    }

    /// Compute the visibility offset (seconds) for a postponed task of `queue_type`.
    #[instrument(level = "trace", skip(self, task), fields(poll_count = task.poll_count))]
    pub fn evaluate(
        &self,
        queue_type: &str,
        task: &TaskPollState,
        queue_size: QueueSize,
    ) -> CoreResult<OffsetSecs> {
        let strategy = self.strategy_for(queue_type);
        self.evaluate_with(strategy, task, queue_size)
            .inspect(|offset_secs| {
                debug!(
                    queue = queue_type,
                    %strategy,
                    poll_count = task.poll_count,
                    queue_size,
                    offset_secs,
                    "postpone offset computed"
                );
            })
    }

    /// Compute the offset with an explicitly chosen strategy.
    pub fn evaluate_with(
        &self,
        strategy: OffsetStrategy,
        task: &TaskPollState,
        queue_size: QueueSize,
    ) -> CoreResult<OffsetSecs> {
        let evaluation = self.registry.resolve(strategy).inspect_err(|_| {
            self.metrics.record_resolve_error(strategy);
        })?;

        let offset = evaluation.compute_offset(task, queue_size);
        self.metrics.record_offset(strategy, offset);
        Ok(offset)
    }

    /// Same as [`OffsetEngine::evaluate`], as a [`Duration`].
    pub fn evaluate_duration(
        &self,
        queue_type: &str,
        task: &TaskPollState,
        queue_size: QueueSize,
    ) -> CoreResult<Duration> {
        self.evaluate(queue_type, task, queue_size)
            .map(Duration::from_secs)
    }
}

impl fmt::Debug for OffsetEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OffsetEngine")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("clock", &"<handle>")
            .field("metrics", &"<handle>")
            .finish()
    }
}
