//! Typed events published on the bus.

use serde::{Deserialize, Serialize};

use wyrm_core::{AbilityKey, AbortReason, EntityId};

/// Stable rejection reason codes, mirrored from the invocation gate so
/// presentation never re-derives the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    OnCooldown { remaining: u32 },
    Precondition,
    NoTarget,
}

/// Ability lifecycle events: invocations and strike-run progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AbilityEvent {
    Invoked {
        actor: EntityId,
        key: AbilityKey,
        target: EntityId,
    },
    InvocationRejected {
        actor: EntityId,
        key: AbilityKey,
        reason: RejectReason,
    },
    Struck {
        actor: EntityId,
        key: AbilityKey,
        target: EntityId,
        strike: u8,
        total: u8,
    },
    Retargeted {
        actor: EntityId,
        key: AbilityKey,
        from: EntityId,
        to: EntityId,
    },
    Completed {
        actor: EntityId,
        key: AbilityKey,
    },
    Aborted {
        actor: EntityId,
        key: AbilityKey,
        reason: AbortReason,
    },
}

/// Progress and unlock events consumed by presentation collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ProgressEvent {
    PageUnlocked {
        actor: EntityId,
        ordinal: u8,
        title: String,
    },
    AchievementUnlocked {
        actor: EntityId,
        ordinal: u8,
        name: String,
    },
    ProgressReset {
        actor: EntityId,
    },
}
