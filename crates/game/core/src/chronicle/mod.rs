//! Chronicle lore-page catalog and unlock engine.
//!
//! Pages unlock from cumulative behavior recorded in the
//! [`ProgressLedger`](crate::ledger::ProgressLedger): every ledger
//! mutation is followed by a re-evaluation pass that unlocks any page
//! whose trigger is now satisfied, exactly once per actor.
mod engine;
mod page;

pub use engine::{PageProgress, Unlocked, UnlockEngine};
pub use page::{PageSpec, UnlockTrigger};
