//! Offset evaluations, one per [`OffsetStrategy`].
//!
//! [`OffsetEvaluation`] is a closed set: every variant is a frozen value built from an
//! [`OffsetConfig`] snapshot and computes the visibility offset of a postponed task
//! without blocking or touching shared state.
//!
//! Exponential strategies use `index = max(pollCount - 1, 0)` and return `0` when
//! `index == 0`, so the first poll never incurs a delay.
mod backoff;
mod constant;
mod queue_size;
mod task_duration;

pub use backoff::BackoffToDefault;
pub use constant::ConstantOffset;
pub use queue_size::ScaledByQueueSize;
pub use task_duration::ScaledByTaskDuration;

use rqo_model::{OffsetConfig, OffsetSecs, OffsetStrategy, QueueSize, TaskPollState};

use crate::{clock::ClockHandle, steps::DurationSteps};

/// Exponents at or above this value saturate `2^index` to `u64::MAX`.
///
/// Every smaller exponent is exact: `2^63` is the largest power of two in `u64`.
pub const MAX_BACKOFF_EXPONENT: u32 = u64::BITS;

/// `0` for `index == 0`, otherwise `min(2^index, cap)`.
#[inline]
pub(crate) fn exponential_offset(index: u32, cap: OffsetSecs) -> OffsetSecs {
    if index == 0 {
        return 0;
    }
    1u64.checked_shl(index).unwrap_or(u64::MAX).min(cap)
}

/// A concrete offset computation bound to its frozen configuration.
#[derive(Clone, Debug)]
pub enum OffsetEvaluation {
    Constant(ConstantOffset),
    BackoffToDefault(BackoffToDefault),
    ScaledByQueueSize(ScaledByQueueSize),
    ScaledByTaskDuration(ScaledByTaskDuration),
}

impl OffsetEvaluation {
    /// Build the evaluation for `strategy` from a configuration snapshot.
    pub fn from_config(strategy: OffsetStrategy, cfg: &OffsetConfig, clock: ClockHandle) -> Self {
        match strategy {
            OffsetStrategy::Constant => ConstantOffset::new(cfg.default_offset_secs).into(),
            OffsetStrategy::BackoffToDefault => {
                BackoffToDefault::new(cfg.default_offset_secs).into()
            }
            OffsetStrategy::ScaledByQueueSize => {
                ScaledByQueueSize::new(cfg.default_offset_secs).into()
            }
            OffsetStrategy::ScaledByTaskDuration => ScaledByTaskDuration::new(
                DurationSteps::new(&cfg.task_duration_to_offset_steps),
                clock,
            )
            .into(),
        }
    }

    /// Strategy this evaluation implements; used as the registry key.
    #[inline]
    pub fn strategy(&self) -> OffsetStrategy {
        match self {
            OffsetEvaluation::Constant(_) => OffsetStrategy::Constant,
            OffsetEvaluation::BackoffToDefault(_) => OffsetStrategy::BackoffToDefault,
            OffsetEvaluation::ScaledByQueueSize(_) => OffsetStrategy::ScaledByQueueSize,
            OffsetEvaluation::ScaledByTaskDuration(_) => OffsetStrategy::ScaledByTaskDuration,
        }
    }

    /// Compute the visibility offset (seconds) for a postponed task.
    ///
    /// `queue_size` is the depth of the queue right before the task is postponed.
    #[inline]
    pub fn compute_offset(&self, task: &TaskPollState, queue_size: QueueSize) -> OffsetSecs {
        match self {
            OffsetEvaluation::Constant(e) => e.compute_offset(task, queue_size),
            OffsetEvaluation::BackoffToDefault(e) => e.compute_offset(task, queue_size),
            OffsetEvaluation::ScaledByQueueSize(e) => e.compute_offset(task, queue_size),
            OffsetEvaluation::ScaledByTaskDuration(e) => e.compute_offset(task, queue_size),
        }
    }
}

impl From<ConstantOffset> for OffsetEvaluation {
    fn from(e: ConstantOffset) -> Self {
        OffsetEvaluation::Constant(e)
    }
}

impl From<BackoffToDefault> for OffsetEvaluation {
    fn from(e: BackoffToDefault) -> Self {
        OffsetEvaluation::BackoffToDefault(e)
    }
}

impl From<ScaledByQueueSize> for OffsetEvaluation {
    fn from(e: ScaledByQueueSize) -> Self {
        OffsetEvaluation::ScaledByQueueSize(e)
    }
}

impl From<ScaledByTaskDuration> for OffsetEvaluation {
    fn from(e: ScaledByTaskDuration) -> Self {
        OffsetEvaluation::ScaledByTaskDuration(e)
    }
}
