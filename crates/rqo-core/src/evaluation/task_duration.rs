use std::fmt;

use rqo_model::{OffsetSecs, QueueSize, TaskPollState};

use crate::{clock::ClockHandle, steps::DurationSteps};

/// Offset stepped by how long the task has been scheduled.
///
/// Elapsed duration is `(now - scheduledTime) / 1000` seconds; the offset is the
/// step table entry with the greatest threshold not above it.
/// Poll count and queue size are ignored.
#[derive(Clone)]
pub struct ScaledByTaskDuration {
    steps: DurationSteps,
    clock: ClockHandle,
}

impl ScaledByTaskDuration {
    pub fn new(steps: DurationSteps, clock: ClockHandle) -> Self {
        Self { steps, clock }
    }

    /// Frozen step table.
    pub fn steps(&self) -> &DurationSteps {
        &self.steps
    }

    #[inline]
    pub fn compute_offset(&self, task: &TaskPollState, _queue_size: QueueSize) -> OffsetSecs {
        if self.steps.is_empty() {
            return 0;
        }
        self.steps
            .lookup(task.elapsed_secs(self.clock.now_ms()))
    }
}

impl fmt::Debug for ScaledByTaskDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaledByTaskDuration")
            .field("steps", &self.steps)
            .field("clock", &"<handle>")
            .finish()
    }
}
