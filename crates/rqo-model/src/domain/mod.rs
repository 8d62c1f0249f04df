mod constants;
pub use constants::{DEFAULT_OFFSET_SECS, MILLIS_PER_SEC};

/// Instantaneous queue depth sampled by the dispatcher right before a task is postponed.
///
/// Zero or negative samples are accepted and treated as "no depth information".
pub type QueueSize = i32;

/// Visibility offset in whole seconds.
pub type OffsetSecs = u64;
