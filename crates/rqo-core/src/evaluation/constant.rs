use rqo_model::{OffsetSecs, QueueSize, TaskPollState};

/// Always returns the configured default offset, ignoring task and queue state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstantOffset {
    default_offset: OffsetSecs,
}

impl ConstantOffset {
    pub const fn new(default_offset: OffsetSecs) -> Self {
        Self { default_offset }
    }

    #[inline]
    pub fn compute_offset(&self, _task: &TaskPollState, _queue_size: QueueSize) -> OffsetSecs {
        self.default_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_every_input() {
        let eval = ConstantOffset::new(30);
        for poll_count in [-1, 0, 1, 2, 100] {
            for queue_size in [-5, 0, 1, 1_000] {
                let task = TaskPollState::new(poll_count, 0);
                assert_eq!(eval.compute_offset(&task, queue_size), 30);
            }
        }
    }

    #[test]
    fn zero_default_is_allowed() {
        let eval = ConstantOffset::new(0);
        assert_eq!(eval.compute_offset(&TaskPollState::new(7, 0), 3), 0);
    }
}
