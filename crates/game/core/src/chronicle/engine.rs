//! Exactly-once page unlocking over the progress ledger.

use std::collections::{BTreeSet, HashMap};

use crate::ability::Element;
use crate::ledger::ProgressLedger;
use crate::state::EntityId;

use super::page::{PageSpec, UnlockTrigger};

/// Notification payload for a freshly unlocked page. The engine returns
/// these; publishing them (chat, sound, event bus) is the embedding's job.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unlocked {
    pub actor: EntityId,
    pub ordinal: u8,
    pub title: String,
}

/// Unlock progress toward one page, for display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageProgress {
    pub current: u32,
    pub required: u32,
}

/// Per-actor page unlock state over a fixed catalog.
///
/// Each (page, actor) pair is a two-state machine, `Locked -> Unlocked`,
/// transitioning exactly once on re-evaluation and reversible only through
/// [`reset`](Self::reset). Re-evaluating an unlocked page is a no-op, so
/// the engine is safe to re-run after every ledger mutation.
#[derive(Clone, Debug)]
pub struct UnlockEngine {
    catalog: Vec<PageSpec>,
    mastery_threshold: u32,
    unlocked: HashMap<EntityId, BTreeSet<u8>>,
}

impl UnlockEngine {
    /// Builds an engine over a fixed catalog. Called once at startup; the
    /// catalog is never mutated afterwards.
    pub fn new(catalog: &[PageSpec], mastery_threshold: u32) -> Self {
        Self {
            catalog: catalog.to_vec(),
            mastery_threshold,
            unlocked: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &[PageSpec] {
        &self.catalog
    }

    pub fn page(&self, ordinal: u8) -> Option<&PageSpec> {
        self.catalog.iter().find(|page| page.ordinal == ordinal)
    }

    pub fn total_pages(&self) -> usize {
        self.catalog.len()
    }

    /// Re-evaluates every still-locked page for the actor against the
    /// ledger and unlocks those whose trigger is now satisfied.
    ///
    /// Returns one notice per fresh unlock. `Always` pages are seeded
    /// silently on the first evaluation — they were never meaningfully
    /// locked, so they produce no notice.
    pub fn on_ledger_changed(&mut self, actor: EntityId, ledger: &ProgressLedger) -> Vec<Unlocked> {
        let threshold = self.mastery_threshold;
        let unlocked = self.unlocked.entry(actor).or_default();

        let mut notices = Vec::new();
        for page in &self.catalog {
            if unlocked.contains(&page.ordinal) {
                continue;
            }
            if matches!(page.trigger, UnlockTrigger::Always) {
                unlocked.insert(page.ordinal);
                continue;
            }
            if trigger_satisfied(page, actor, ledger, threshold) {
                unlocked.insert(page.ordinal);
                notices.push(Unlocked {
                    actor,
                    ordinal: page.ordinal,
                    title: page.title.to_string(),
                });
            }
        }
        notices
    }

    /// Whether the actor has unlocked a page. `Always` pages read as
    /// unlocked even before the first evaluation.
    pub fn is_unlocked(&self, actor: EntityId, ordinal: u8) -> bool {
        if self
            .unlocked
            .get(&actor)
            .is_some_and(|set| set.contains(&ordinal))
        {
            return true;
        }
        self.page(ordinal)
            .is_some_and(|page| matches!(page.trigger, UnlockTrigger::Always))
    }

    /// Ordinals of every page the actor can read, in catalog order.
    pub fn unlocked(&self, actor: EntityId) -> Vec<u8> {
        self.catalog
            .iter()
            .filter(|page| self.is_unlocked(actor, page.ordinal))
            .map(|page| page.ordinal)
            .collect()
    }

    pub fn unlocked_count(&self, actor: EntityId) -> usize {
        self.unlocked(actor).len()
    }

    /// Progress toward a page's trigger, for display. `None` for unknown
    /// ordinals.
    pub fn progress(
        &self,
        actor: EntityId,
        ordinal: u8,
        ledger: &ProgressLedger,
    ) -> Option<PageProgress> {
        let page = self.page(ordinal)?;
        let progress = match page.trigger {
            UnlockTrigger::Always => PageProgress {
                current: 1,
                required: 1,
            },
            UnlockTrigger::UsageThreshold(element) => PageProgress {
                current: ledger.element_total(actor, element),
                required: page.required_count,
            },
            UnlockTrigger::AllElementsAttuned => PageProgress {
                current: ledger.attuned_count(actor) as u32,
                required: Element::FRAGMENT_COUNT as u32,
            },
            UnlockTrigger::AllAbilitiesMastered => PageProgress {
                current: ledger.mastered_count(actor, self.mastery_threshold) as u32,
                required: (Element::FRAGMENT_COUNT * 2) as u32,
            },
        };
        Some(progress)
    }

    /// Drops every unlock the actor holds. Combined with a ledger reset
    /// this re-locks all previously unlocked pages.
    pub fn reset(&mut self, actor: EntityId) {
        self.unlocked.remove(&actor);
    }

    // ========================================================================
    // Snapshot support
    // ========================================================================

    /// Exports unlock state as `(actor, ordinal)` pairs, sorted.
    pub fn export(&self) -> Vec<(EntityId, u8)> {
        let mut out = Vec::new();
        for (&actor, ordinals) in &self.unlocked {
            for &ordinal in ordinals {
                out.push((actor, ordinal));
            }
        }
        out.sort();
        out
    }

    /// Rebuilds unlock state from exported pairs.
    pub fn restore(&mut self, unlocked: &[(EntityId, u8)]) {
        self.unlocked.clear();
        for &(actor, ordinal) in unlocked {
            self.unlocked.entry(actor).or_default().insert(ordinal);
        }
    }
}

fn trigger_satisfied(
    page: &PageSpec,
    actor: EntityId,
    ledger: &ProgressLedger,
    mastery_threshold: u32,
) -> bool {
    match page.trigger {
        UnlockTrigger::Always => true,
        UnlockTrigger::UsageThreshold(element) => {
            ledger.element_total(actor, element) >= page.required_count
        }
        UnlockTrigger::AllElementsAttuned => {
            ledger.attuned_count(actor) >= Element::FRAGMENT_COUNT
        }
        UnlockTrigger::AllAbilitiesMastered => {
            ledger.mastered_count(actor, mastery_threshold) >= Element::FRAGMENT_COUNT * 2
        }
    }
}
