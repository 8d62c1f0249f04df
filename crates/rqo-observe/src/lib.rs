//! Logging setup for rqo binaries.
mod config;
mod error;
mod format;
mod init;
mod level;
mod timer;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use format::LoggerFormat;
pub use level::LoggerLevel;
pub use timer::{LoggerTimeZone, Rfc3339Timer, init_local_offset};

/// Install the global tracing subscriber described by `cfg`.
///
/// Fails with [`LoggerError::AlreadyInitialized`] when called twice in one process.
/// Call [`init_local_offset`] first when using [`LoggerTimeZone::Local`].
///
/// ```no_run
/// use rqo_observe::{LoggerConfig, init_logger};
///
/// init_logger(&LoggerConfig::default()).expect("logger");
/// tracing::info!("ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    match cfg.format {
        LoggerFormat::Text => init::init_text(cfg),
        LoggerFormat::Json => init::init_json(cfg),
        LoggerFormat::Journald => init::init_journald(cfg),
    }
}
