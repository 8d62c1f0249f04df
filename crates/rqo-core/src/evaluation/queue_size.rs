use rqo_model::{OffsetSecs, QueueSize, TaskPollState};

use super::exponential_offset;

/// Exponential backoff with the poll count, saturating at `queueSize * defaultOffset`.
///
/// A non-positive queue size falls back to `defaultOffset` as the cap.
///
/// | pollCount | defaultOffset | queueSize | offset |
/// |-----------|---------------|-----------|--------|
/// | 0         | -             | -         | 0      |
/// | 1         | -             | -         | 0      |
/// | 2         | 5             | 1         | 2      |
/// | 3         | 5             | 1         | 4      |
/// | 4         | 5             | 1         | 5      |
/// | 4         | 5             | 0         | 5      |
/// | 4         | 5             | 2         | 8      |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScaledByQueueSize {
    default_offset: OffsetSecs,
}

impl ScaledByQueueSize {
    pub const fn new(default_offset: OffsetSecs) -> Self {
        Self { default_offset }
    }

    /// Upper bound of the offset for the given queue depth.
    #[inline]
    pub fn cap(&self, queue_size: QueueSize) -> OffsetSecs {
        if queue_size > 0 {
            (queue_size as u64).saturating_mul(self.default_offset)
        } else {
            self.default_offset
        }
    }

    #[inline]
    pub fn compute_offset(&self, task: &TaskPollState, queue_size: QueueSize) -> OffsetSecs {
        exponential_offset(task.poll_index(), self.cap(queue_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_reference_table() {
        let eval = ScaledByQueueSize::new(5);
        let cases = [
            (0, 1, 0),
            (1, 1, 0),
            (2, 1, 2),
            (3, 1, 4),
            (4, 1, 5),
            (4, 0, 5),
            (4, 2, 8),
        ];
        for (poll_count, queue_size, expected) in cases {
            let task = TaskPollState::new(poll_count, 0);
            assert_eq!(
                eval.compute_offset(&task, queue_size),
                expected,
                "pollCount={poll_count} queueSize={queue_size}"
            );
        }
    }

    #[test]
    fn negative_queue_size_uses_default_cap() {
        let eval = ScaledByQueueSize::new(5);
        assert_eq!(eval.cap(-3), 5);
        assert_eq!(eval.compute_offset(&TaskPollState::new(10, 0), -3), 5);
    }

    #[test]
    fn large_caps_keep_exact_growth() {
        // cap = 2^33 * 2^30 = 2^63
        let eval = ScaledByQueueSize::new(1 << 33);
        assert_eq!(eval.compute_offset(&TaskPollState::new(63, 0), 1 << 30), 1u64 << 62);
        assert_eq!(eval.compute_offset(&TaskPollState::new(64, 0), 1 << 30), 1u64 << 63);
        assert_eq!(eval.compute_offset(&TaskPollState::new(65, 0), 1 << 30), 1u64 << 63);
    }

    #[test]
    fn cap_saturates_instead_of_overflowing() {
        let eval = ScaledByQueueSize::new(u64::MAX / 2);
        assert_eq!(eval.cap(i32::MAX), u64::MAX);
        assert_eq!(
            eval.compute_offset(&TaskPollState::new(i32::MAX, 0), i32::MAX),
            u64::MAX
        );
    }

    proptest! {
        #[test]
        fn never_exceeds_cap(
            poll_count in any::<i32>(),
            default_offset in 0u64..1_000_000,
            queue_size in any::<i32>(),
        ) {
            let eval = ScaledByQueueSize::new(default_offset);
            let cap = if queue_size > 0 { queue_size as u64 * default_offset } else { default_offset };
            prop_assert!(eval.compute_offset(&TaskPollState::new(poll_count, 0), queue_size) <= cap);
        }

        #[test]
        fn non_decreasing_in_poll_count(
            poll_count in -5i32..200,
            default_offset in 0u64..100_000,
            queue_size in -10i32..10_000,
        ) {
            let eval = ScaledByQueueSize::new(default_offset);
            let a = eval.compute_offset(&TaskPollState::new(poll_count, 0), queue_size);
            let b = eval.compute_offset(&TaskPollState::new(poll_count + 1, 0), queue_size);
            prop_assert!(a <= b);
        }
    }
}
