use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rqo_observe::{LoggerFormat, LoggerLevel};

/// rqo - requeue offset policy tool
#[derive(Parser, Debug)]
#[command(name = "rqo", version, about = "Inspect and evaluate postpone-offset policies")]
pub struct Cli {
    /// Log filter directives (e.g. `info`, `rqo_core=debug`)
    #[arg(long, global = true, env = "RQO_LOG", default_value = "warn")]
    pub log_level: LoggerLevel,

    /// Log output format: text, json or journald
    #[arg(long, global = true, env = "RQO_LOG_FORMAT", default_value = "text")]
    pub log_format: LoggerFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a config file and print the strategy of every queue type
    Check {
        #[command(flatten)]
        config: ConfigArg,
    },

    /// Compute the offset for one postponed task
    Offset {
        #[command(flatten)]
        config: ConfigArg,

        /// Queue or task type
        #[arg(long, short = 'q')]
        queue: String,

        /// Times the task was polled without completing
        #[arg(long, short = 'p', allow_negative_numbers = true)]
        poll_count: i32,

        /// Scheduled time in milliseconds since the Unix epoch
        #[arg(long, conflicts_with = "elapsed_secs")]
        scheduled_ms: Option<i64>,

        /// Seconds since the task was scheduled (alternative to --scheduled-ms)
        #[arg(long, allow_negative_numbers = true)]
        elapsed_secs: Option<i64>,

        /// Current queue depth
        #[arg(long, short = 's', default_value_t = 0, allow_negative_numbers = true)]
        queue_size: i32,

        /// Print Prometheus metrics after the result
        #[arg(long)]
        metrics: bool,
    },

    /// Print the offset for poll counts 0..=N
    Schedule {
        #[command(flatten)]
        config: ConfigArg,

        /// Queue or task type
        #[arg(long, short = 'q')]
        queue: String,

        /// Highest poll count to print
        #[arg(long, default_value_t = 10)]
        polls: i32,

        /// Seconds since the task was scheduled; drives the duration strategy
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        elapsed_secs: i64,

        /// Current queue depth
        #[arg(long, short = 's', default_value_t = 0, allow_negative_numbers = true)]
        queue_size: i32,

        /// Print Prometheus metrics after the table
        #[arg(long)]
        metrics: bool,
    },
}

#[derive(Args, Debug)]
pub struct ConfigArg {
    /// Path to the JSON offset config; defaults apply when omitted
    #[arg(long, short = 'c', env = "RQO_CONFIG")]
    pub config: Option<PathBuf>,
}
