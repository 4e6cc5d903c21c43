//! Types downstream clients interact with.
mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;

use serde::{Deserialize, Serialize};

use wyrm_core::EntityId;

/// Reply to an invocation request: the gate's decision, minus the live
/// run state (which stays inside the worker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationOutcome {
    Accepted {
        target: EntityId,
        cooldown_secs: u32,
    },
    RejectedOnCooldown {
        remaining: u32,
    },
    RejectedPrecondition,
    RejectedNoTarget,
}
