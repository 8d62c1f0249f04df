use rqo_model::{OffsetSecs, QueueSize, TaskPollState};

use super::exponential_offset;

/// Exponential backoff with the poll count, saturating at the default offset.
///
/// Sample offsets (queue size is ignored):
///
/// | pollCount | defaultOffset | offset |
/// |-----------|---------------|--------|
/// | 0         | 5             | 0      |
/// | 1         | 5             | 0      |
/// | 2         | 5             | 2      |
/// | 3         | 5             | 4      |
/// | 4         | 5             | 5      |
/// | 4         | 10            | 8      |
/// | 5         | 10            | 10     |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackoffToDefault {
    default_offset: OffsetSecs,
}

impl BackoffToDefault {
    pub const fn new(default_offset: OffsetSecs) -> Self {
        Self { default_offset }
    }

    #[inline]
    pub fn compute_offset(&self, task: &TaskPollState, _queue_size: QueueSize) -> OffsetSecs {
        exponential_offset(task.poll_index(), self.default_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_reference_table() {
        let cases = [
            (0, 5, 0),
            (1, 5, 0),
            (2, 5, 2),
            (3, 5, 4),
            (4, 5, 5),
            (4, 10, 8),
            (5, 10, 10),
        ];
        for (poll_count, default_offset, expected) in cases {
            let eval = BackoffToDefault::new(default_offset);
            let task = TaskPollState::new(poll_count, 0);
            assert_eq!(
                eval.compute_offset(&task, 10),
                expected,
                "pollCount={poll_count} defaultOffset={default_offset}"
            );
        }
    }

    #[test]
    fn negative_poll_count_is_first_poll() {
        let eval = BackoffToDefault::new(5);
        assert_eq!(eval.compute_offset(&TaskPollState::new(-10, 0), 1), 0);
    }

    #[test]
    fn huge_poll_count_saturates_at_default() {
        let eval = BackoffToDefault::new(u64::MAX);
        assert_eq!(
            eval.compute_offset(&TaskPollState::new(i32::MAX, 0), 1),
            u64::MAX
        );

        let eval = BackoffToDefault::new(600);
        assert_eq!(eval.compute_offset(&TaskPollState::new(64, 0), 1), 600);
        assert_eq!(eval.compute_offset(&TaskPollState::new(65, 0), 1), 600);
    }

    proptest! {
        #[test]
        fn never_exceeds_default(poll_count in any::<i32>(), default_offset in any::<u64>()) {
            let eval = BackoffToDefault::new(default_offset);
            prop_assert!(eval.compute_offset(&TaskPollState::new(poll_count, 0), 1) <= default_offset);
        }

        #[test]
        fn non_decreasing_in_poll_count(poll_count in -5i32..200, default_offset in 0u64..100_000) {
            let eval = BackoffToDefault::new(default_offset);
            let a = eval.compute_offset(&TaskPollState::new(poll_count, 0), 1);
            let b = eval.compute_offset(&TaskPollState::new(poll_count + 1, 0), 1);
            prop_assert!(a <= b, "pollCount {} -> {}, {} -> {}", poll_count, a, poll_count + 1, b);
        }

        #[test]
        fn ignores_queue_size(poll_count in any::<i32>(), q1 in any::<i32>(), q2 in any::<i32>()) {
            let eval = BackoffToDefault::new(5);
            let task = TaskPollState::new(poll_count, 0);
            prop_assert_eq!(eval.compute_offset(&task, q1), eval.compute_offset(&task, q2));
        }
    }
}
