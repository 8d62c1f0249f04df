//! Common model-level constants.

/// Default visibility offset when the configuration does not set one.
///
/// Matches the callback interval system tasks are re-evaluated with.
pub const DEFAULT_OFFSET_SECS: u64 = 30;

/// Milliseconds per second, used to turn scheduled timestamps into elapsed seconds.
pub const MILLIS_PER_SEC: i64 = 1_000;
