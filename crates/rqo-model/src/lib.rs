mod domain;
pub use domain::{DEFAULT_OFFSET_SECS, MILLIS_PER_SEC};
pub use domain::{OffsetSecs, QueueSize};

mod error;
pub use error::{ModelError, ModelResult};

mod config;
pub use config::OffsetConfig;

mod task;
pub use task::TaskPollState;

mod strategy;
pub use strategy::OffsetStrategy;
