use std::sync::{Arc, RwLock};

use rqo_model::OffsetConfig;
use tracing::{info, warn};

use crate::{
    engine::OffsetEngine,
    error::CoreResult,
    metrics::ReloadOutcome,
};

/// Swappable pointer to the current [`OffsetEngine`].
///
/// Readers take a snapshot with [`EngineHandle::load`] and evaluate against it without holding any lock.
/// A reload builds a complete new engine first and only then swaps the pointer, so in-flight
/// evaluations finish on the snapshot they started with.
#[derive(Debug)]
pub struct EngineHandle {
    current: RwLock<Arc<OffsetEngine>>,
}

impl EngineHandle {
    pub fn new(engine: OffsetEngine) -> Self {
        Self {
            current: RwLock::new(Arc::new(engine)),
        }
    }

    /// Current engine snapshot.
    pub fn load(&self) -> Arc<OffsetEngine> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Build an engine from `config` and swap it in.
    ///
    /// Clock and metrics are carried over from the current engine.
    /// On failure the current engine stays in place and the error is returned.
    pub fn reload(&self, config: OffsetConfig) -> CoreResult<()> {
        let current = self.load();
        let metrics = Arc::clone(current.metrics());

        match OffsetEngine::new(config, Arc::clone(current.clock()), Arc::clone(&metrics)) {
            Ok(engine) => {
                self.replace(engine);
                metrics.record_reload(ReloadOutcome::Applied);
                info!("offset config reloaded");
                Ok(())
            }
            Err(e) => {
                metrics.record_reload(ReloadOutcome::Rejected);
                warn!(error = %e, "offset config rejected; keeping previous snapshot");
                Err(e)
            }
        }
    }

    /// Swap in a pre-built engine, returning the previous one.
    pub fn replace(&self, engine: OffsetEngine) -> Arc<OffsetEngine> {
        let next = Arc::new(engine);
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        std::mem::replace(&mut *guard, next)
    }
}
