//! Deterministic gameplay decision logic shared across embeddings.
//!
//! `wyrm-core` defines the canonical rules for timed ability use: who may
//! invoke, which nearby entity gets targeted, how a multi-strike action
//! unfolds, and which chronicle pages and achievements cumulative behavior
//! unlocks. Everything here is pure and synchronous — the world is
//! consumed through the oracle traits in [`env`], time is passed in by the
//! caller, and side effects are returned as data for the runtime to carry
//! out.
pub mod ability;
pub mod achievement;
pub mod chronicle;
pub mod config;
pub mod cooldown;
pub mod env;
pub mod ledger;
pub mod state;
pub mod targeting;

pub use ability::{
    AbilityDefinition, AbilityKey, AbilitySlot, AbortReason, Element, Invocation, InvocationGate,
    ParseAbilityKeyError, RunPhase, StrikeRun, StrikeTick,
};
pub use achievement::{
    AchievementCategory, AchievementCriteria, AchievementEngine, AchievementSpec,
    AchievementUnlocked,
};
pub use chronicle::{PageProgress, PageSpec, Unlocked, UnlockEngine, UnlockTrigger};
pub use config::GameConfig;
pub use cooldown::{CooldownDisplay, CooldownStore};
pub use env::{Env, LoadoutOracle, OracleError, SpatialError, SpatialOracle};
pub use ledger::ProgressLedger;
pub use state::{EntityId, Millis};
