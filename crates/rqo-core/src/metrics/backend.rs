use std::sync::Arc;

use rqo_model::OffsetStrategy;

/// Outcome of a configuration reload, for metrics classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// New snapshot swapped in.
    Applied,
    /// New snapshot rejected; previous one kept.
    Rejected,
}

impl ReloadOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            ReloadOutcome::Applied => "applied",
            ReloadOutcome::Rejected => "rejected",
        }
    }
}

/// Backend metrics collection interface.
///
/// Implementations are handed to [`crate::OffsetEngine`] and called on the dispatch path,
/// so they must not block.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record a computed offset.
    ///
    /// # Arguments
    /// - `strategy`: Strategy that produced the offset
    /// - `offset_secs`: Computed visibility offset
    fn record_offset(&self, strategy: OffsetStrategy, offset_secs: u64);
    /// Record a strategy that could not be resolved.
    fn record_resolve_error(&self, strategy: OffsetStrategy);
    /// Record a configuration reload attempt.
    fn record_reload(&self, outcome: ReloadOutcome);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
