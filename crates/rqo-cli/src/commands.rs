use std::{fs, io::Write, path::Path, sync::Arc};

use anyhow::{Context, Result};
use rqo_core::{Clock, DurationSteps, MetricsHandle, OffsetEngine, noop_metrics, system_clock};
use rqo_model::{MILLIS_PER_SEC, OffsetConfig, QueueSize, TaskPollState};
use rqo_prometheus::{Encoder, PrometheusMetrics, TextEncoder};
use tracing::{debug, info};

/// Load the offset config from `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<OffsetConfig> {
    let Some(path) = path else {
        debug!("no config file given; using defaults");
        return Ok(OffsetConfig::default());
    };
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let cfg = OffsetConfig::from_json_slice(&raw)
        .with_context(|| format!("invalid offset config in {}", path.display()))?;
    info!(path = %path.display(), queues = cfg.strategies.len(), "offset config loaded");
    Ok(cfg)
}

/// Engine plus the optional Prometheus backend it reports to.
pub struct Session {
    pub engine: OffsetEngine,
    prometheus: Option<PrometheusMetrics>,
}

impl Session {
    pub fn new(cfg: OffsetConfig, with_metrics: bool) -> Result<Self> {
        let prometheus = with_metrics
            .then(PrometheusMetrics::new)
            .transpose()
            .context("failed to register prometheus collectors")?;
        let metrics: MetricsHandle = match &prometheus {
            Some(p) => Arc::new(p.clone()),
            None => noop_metrics(),
        };
        let engine = OffsetEngine::new(cfg, system_clock(), metrics)?;
        Ok(Self { engine, prometheus })
    }

    /// Write the Prometheus text exposition, if metrics are enabled.
    pub fn dump_metrics(&self, out: &mut impl Write) -> Result<()> {
        if let Some(p) = &self.prometheus {
            let mut buffer = Vec::new();
            TextEncoder::new().encode(&p.gather(), &mut buffer)?;
            writeln!(out)?;
            out.write_all(&buffer)?;
        }
        Ok(())
    }
}

pub fn check(cfg: OffsetConfig, out: &mut impl Write) -> Result<()> {
    let session = Session::new(cfg, false)?;
    let cfg = session.engine.config();

    writeln!(out, "default offset:   {}s", cfg.default_offset_secs)?;
    writeln!(out, "default strategy: {}", cfg.default_strategy)?;

    let steps = DurationSteps::new(&cfg.task_duration_to_offset_steps);
    if steps.is_empty() {
        writeln!(out, "duration steps:   (none)")?;
    } else {
        writeln!(out, "duration steps:")?;
        for (threshold, offset) in steps.iter() {
            writeln!(out, "  >= {threshold}s -> {offset}s")?;
        }
    }

    if cfg.strategies.is_empty() {
        writeln!(out, "queues:           (none)")?;
    } else {
        writeln!(out, "queues:")?;
        for (queue, strategy) in &cfg.strategies {
            writeln!(out, "  {queue}: {strategy}")?;
        }
    }
    Ok(())
}

/// Scheduled time from either an absolute timestamp or seconds ago; defaults to now.
pub fn scheduled_time_ms(now_ms: i64, scheduled_ms: Option<i64>, elapsed_secs: Option<i64>) -> i64 {
    match (scheduled_ms, elapsed_secs) {
        (Some(ms), _) => ms,
        (None, Some(secs)) => now_ms.saturating_sub(secs.saturating_mul(MILLIS_PER_SEC)),
        (None, None) => now_ms,
    }
}

pub fn offset(
    session: &Session,
    queue: &str,
    task: &TaskPollState,
    queue_size: QueueSize,
    out: &mut impl Write,
) -> Result<()> {
    let strategy = session.engine.strategy_for(queue);
    let offset = session.engine.evaluate(queue, task, queue_size)?;
    writeln!(out, "{queue} [{strategy}] offset={offset}s")?;
    Ok(())
}

pub fn schedule(
    session: &Session,
    queue: &str,
    polls: i32,
    queue_size: QueueSize,
    elapsed_secs: i64,
    out: &mut impl Write,
) -> Result<()> {
    let now_ms = session.engine.clock().now_ms();
    let scheduled_ms = scheduled_time_ms(now_ms, None, Some(elapsed_secs));
    writeln!(
        out,
        "{queue} [{}] elapsed={elapsed_secs}s",
        session.engine.strategy_for(queue)
    )?;
    writeln!(out, "{:>10} {:>12}", "pollCount", "offset(s)")?;
    for poll_count in 0..=polls.max(0) {
        let task = TaskPollState::new(poll_count, scheduled_ms);
        let offset = session.engine.evaluate(queue, &task, queue_size)?;
        writeln!(out, "{poll_count:>10} {offset:>12}")?;
    }
    Ok(())
}
