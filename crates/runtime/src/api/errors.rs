//! Error types surfaced to runtime consumers.

use wyrm_core::AbilityKey;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Failures crossing the handle/worker boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// The worker task is gone; the runtime has shut down.
    #[error("runtime worker is no longer running")]
    WorkerGone,

    /// No catalog entry exists for the requested ability key.
    #[error("unknown ability {0}")]
    UnknownAbility(AbilityKey),
}
