//! Requeue-offset policy engine.
//!
//! Computes the visibility offset a dispatcher applies when it returns a postponed task to its queue.
pub mod clock;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod metrics;
pub mod registry;
pub mod steps;

pub use clock::{Clock, ClockHandle, ManualClock, SystemClock, system_clock};
pub use engine::{EngineHandle, OffsetEngine};
pub use error::{CoreError, CoreResult};
pub use evaluation::{MAX_BACKOFF_EXPONENT, OffsetEvaluation};
pub use metrics::{MetricsBackend, MetricsHandle, NoOpMetrics, ReloadOutcome, noop_metrics};
pub use registry::OffsetRegistry;
pub use steps::DurationSteps;

pub mod prelude {
    pub use crate::clock::{ClockHandle, system_clock};
    pub use crate::engine::{EngineHandle, OffsetEngine};
    pub use crate::error::CoreError;
    pub use crate::registry::OffsetRegistry;
    pub use rqo_model::{OffsetConfig, OffsetStrategy, TaskPollState};
}
