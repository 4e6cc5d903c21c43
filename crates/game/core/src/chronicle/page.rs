//! Chronicle page catalog types.
//!
//! A page is an immutable catalog entry with a declarative unlock trigger.
//! The catalog itself lives in the content crate and is fixed at process
//! start; the engine never mutates it.

use crate::ability::Element;

/// Declarative condition under which a page unlocks.
///
/// One variant per trigger kind, each carrying only the data it needs —
/// deliberately a sum type rather than a hierarchy of condition objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnlockTrigger {
    /// Unlocked unconditionally (the introduction page).
    Always,

    /// Total uses across every slot of the element reach the page's
    /// required count.
    UsageThreshold(Element),

    /// Every fragment element has been attuned at least once.
    AllElementsAttuned,

    /// Every fragment ability has been used at least the mastery-threshold
    /// number of times.
    AllAbilitiesMastered,
}

/// One immutable chronicle page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSpec {
    /// Stable ordinal, 1-based; the identity persisted in unlock state.
    pub ordinal: u8,
    pub title: &'static str,
    pub body: &'static str,
    pub trigger: UnlockTrigger,
    /// Threshold for [`UnlockTrigger::UsageThreshold`]; carried but unused
    /// by the other trigger kinds.
    pub required_count: u32,
}

impl PageSpec {
    pub const fn new(
        ordinal: u8,
        title: &'static str,
        body: &'static str,
        trigger: UnlockTrigger,
        required_count: u32,
    ) -> Self {
        Self {
            ordinal,
            title,
            body,
            trigger,
            required_count,
        }
    }
}
