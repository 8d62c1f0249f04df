//! Registry that resolves an [`OffsetStrategy`] to its [`OffsetEvaluation`].
//!
//! The registry is built once per configuration snapshot and is read-only afterwards.
//! Resolving a strategy without a registered evaluation is a build defect: it fails
//! with [`CoreError::NoEvaluation`] and never substitutes another strategy.
use std::collections::BTreeMap;

use rqo_model::{OffsetConfig, OffsetStrategy};
use tracing::{debug, trace, warn};

use crate::{
    clock::ClockHandle,
    error::{CoreError, CoreResult},
    evaluation::OffsetEvaluation,
};

/// Strategy-keyed set of offset evaluations.
#[derive(Clone, Debug, Default)]
pub struct OffsetRegistry {
    evaluations: BTreeMap<OffsetStrategy, OffsetEvaluation>,
}

impl OffsetRegistry {
    /// Create an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            evaluations: BTreeMap::new(),
        }
    }

    /// Registry with every built-in strategy, derived from one configuration snapshot.
    pub fn from_config(cfg: &OffsetConfig, clock: ClockHandle) -> Self {
        let registry: Self = OffsetStrategy::ALL
            .into_iter()
            .map(|s| OffsetEvaluation::from_config(s, cfg, clock.clone()))
            .collect();
        debug!(
            default_offset_secs = cfg.default_offset_secs,
            duration_steps = cfg.task_duration_to_offset_steps.len(),
            "offset registry built"
        );
        registry
    }

    /// Register an evaluation under its own strategy.
    ///
    /// A second evaluation for the same strategy replaces the first one.
    pub fn register(&mut self, evaluation: OffsetEvaluation) {
        let strategy = evaluation.strategy();
        if self.evaluations.insert(strategy, evaluation).is_some() {
            warn!(%strategy, "offset evaluation registered twice; keeping the latest");
        }
    }

    /// Get the evaluation registered for `strategy`.
    pub fn resolve(&self, strategy: OffsetStrategy) -> CoreResult<&OffsetEvaluation> {
        trace!(%strategy, "resolving offset evaluation");
        self.evaluations
            .get(&strategy)
            .ok_or(CoreError::NoEvaluation(strategy))
    }

    /// Fail on the first strategy that has no registered evaluation.
    pub fn ensure_registered<I>(&self, strategies: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = OffsetStrategy>,
    {
        strategies
            .into_iter()
            .try_for_each(|s| self.resolve(s).map(|_| ()))
    }

    /// Returns `true` if an evaluation is registered for `strategy`.
    #[inline]
    pub fn contains(&self, strategy: OffsetStrategy) -> bool {
        self.evaluations.contains_key(&strategy)
    }

    /// Registered strategies in declaration order.
    pub fn strategies(&self) -> impl Iterator<Item = OffsetStrategy> + '_ {
        self.evaluations.keys().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }
}

impl FromIterator<OffsetEvaluation> for OffsetRegistry {
    fn from_iter<I: IntoIterator<Item = OffsetEvaluation>>(iter: I) -> Self {
        let mut registry = Self::new();
        for evaluation in iter {
            registry.register(evaluation);
        }
        registry
    }
}
