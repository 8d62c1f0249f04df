//! rqo - inspect and evaluate requeue offset policies.
mod cli;
mod commands;

use std::io;

use anyhow::Result;
use clap::Parser;
use rqo_core::Clock;
use rqo_model::TaskPollState;
use rqo_observe::{LoggerConfig, init_logger};

use crate::{
    cli::{Cli, Commands},
    commands::Session,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(&LoggerConfig {
        format: cli.log_format,
        level: cli.log_level.clone(),
        ..Default::default()
    })?;

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Check { config } => {
            let cfg = commands::load_config(config.config.as_deref())?;
            commands::check(cfg, &mut out)
        }
        Commands::Offset {
            config,
            queue,
            poll_count,
            scheduled_ms,
            elapsed_secs,
            queue_size,
            metrics,
        } => {
            let cfg = commands::load_config(config.config.as_deref())?;
            let session = Session::new(cfg, metrics)?;
            let now_ms = session.engine.clock().now_ms();
            let task = TaskPollState::new(
                poll_count,
                commands::scheduled_time_ms(now_ms, scheduled_ms, elapsed_secs),
            );
            commands::offset(&session, &queue, &task, queue_size, &mut out)?;
            session.dump_metrics(&mut out)
        }
        Commands::Schedule {
            config,
            queue,
            polls,
            elapsed_secs,
            queue_size,
            metrics,
        } => {
            let cfg = commands::load_config(config.config.as_deref())?;
            let session = Session::new(cfg, metrics)?;
            commands::schedule(&session, &queue, polls, queue_size, elapsed_secs, &mut out)?;
            session.dump_metrics(&mut out)
        }
    }
}
