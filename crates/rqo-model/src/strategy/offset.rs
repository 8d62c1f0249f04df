use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// Defines how the visibility offset of a postponed task is computed.
///
/// The offset is the delay (in seconds) before a task that was returned to its queue becomes eligible for another poll.
/// One strategy is selected per queue or task type; the engine resolves it to a concrete evaluation at dispatch time.
///
/// Strategies:
/// - `Constant`: Always the configured default offset.
/// - `BackoffToDefault`: Grows as `2^(pollCount - 1)` until it reaches the default offset.
/// - `ScaledByQueueSize`: Same growth, capped at `queueSize * defaultOffset`.
/// - `ScaledByTaskDuration`: Stepped by how long the task has been scheduled, ignoring the poll count.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OffsetStrategy {
    /// Always use the default offset.
    #[default]
    #[serde(alias = "CONSTANT_DEFAULT_OFFSET")]
    Constant,
    /// Exponential growth with the poll count, capped at the default offset.
    ///
    /// Suited for queues that require low latency of all tasks.
    #[serde(alias = "BACKOFF_TO_DEFAULT_OFFSET")]
    BackoffToDefault,
    /// Exponential growth with the poll count, capped at `queueSize * defaultOffset`.
    ///
    /// Suited for large queues holding long-running tasks with high poll counts.
    ScaledByQueueSize,
    /// Offset picked from the duration step table by the task's elapsed time.
    ///
    /// Suited for task types whose durations span seconds to days.
    ScaledByTaskDuration,
}

impl OffsetStrategy {
    /// Every known strategy, in declaration order.
    pub const ALL: [OffsetStrategy; 4] = [
        OffsetStrategy::Constant,
        OffsetStrategy::BackoffToDefault,
        OffsetStrategy::ScaledByQueueSize,
        OffsetStrategy::ScaledByTaskDuration,
    ];

    /// Canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            OffsetStrategy::Constant => "CONSTANT",
            OffsetStrategy::BackoffToDefault => "BACKOFF_TO_DEFAULT",
            OffsetStrategy::ScaledByQueueSize => "SCALED_BY_QUEUE_SIZE",
            OffsetStrategy::ScaledByTaskDuration => "SCALED_BY_TASK_DURATION",
        }
    }

    /// Short lowercase name used for metric labels.
    pub fn as_label(&self) -> &'static str {
        match self {
            OffsetStrategy::Constant => "constant",
            OffsetStrategy::BackoffToDefault => "backoff_to_default",
            OffsetStrategy::ScaledByQueueSize => "scaled_by_queue_size",
            OffsetStrategy::ScaledByTaskDuration => "scaled_by_task_duration",
        }
    }
}

impl fmt::Display for OffsetStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OffsetStrategy {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "constant" | "constant_default_offset" => Ok(OffsetStrategy::Constant),
            "backoff_to_default" | "backoff_to_default_offset" | "backoff" => {
                Ok(OffsetStrategy::BackoffToDefault)
            }
            "scaled_by_queue_size" | "queue_size" => Ok(OffsetStrategy::ScaledByQueueSize),
            "scaled_by_task_duration" | "task_duration" => {
                Ok(OffsetStrategy::ScaledByTaskDuration)
            }
            _ => Err(ModelError::UnknownStrategy(s.to_string())),
        }
    }
}
