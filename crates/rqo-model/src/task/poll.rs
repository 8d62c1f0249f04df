use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::domain::MILLIS_PER_SEC;

/// Poll history of a postponed task, as seen by the dispatcher.
///
/// Owned by the execution engine; offset evaluation only reads it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaskPollState {
    /// Number of times the task has been evaluated without completing.
    ///
    /// Non-positive values are tolerated and treated like the first poll.
    pub poll_count: i32,
    /// When the task was queued, in milliseconds since the Unix epoch.
    pub scheduled_time_ms: i64,
}

impl TaskPollState {
    /// Convenience constructor.
    pub const fn new(poll_count: i32, scheduled_time_ms: i64) -> Self {
        Self {
            poll_count,
            scheduled_time_ms,
        }
    }

    /// Zero-based backoff exponent: `poll_count - 1`, clamped at zero.
    ///
    /// Poll counts `0` and `1` both map to `0`.
    #[inline]
    pub const fn poll_index(&self) -> u32 {
        if self.poll_count > 0 {
            (self.poll_count - 1) as u32
        } else {
            0
        }
    }

    /// Whole seconds elapsed between the scheduled time and `now_ms`.
    ///
    /// Truncates toward zero; negative when the task is scheduled in the future.
    #[inline]
    pub const fn elapsed_secs(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.scheduled_time_ms) / MILLIS_PER_SEC
    }
}
