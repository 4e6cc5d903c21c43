//! Per-actor progress accumulation.
//!
//! A pure store: usage counters keyed by ability key, plus the set of
//! elements each actor has attuned (equipped) at least once. No derived
//! state is cached — aggregates (element totals, mastery counts) are
//! computed on demand so the unlock engine always evaluates against raw
//! counters.

use std::collections::{HashMap, HashSet};

use crate::ability::{AbilityKey, Element};
use crate::state::EntityId;

/// Accumulating counters and one-shot events for every actor.
#[derive(Clone, Debug, Default)]
pub struct ProgressLedger {
    /// `actor -> (key -> use count)`. Monotonic except for explicit reset.
    usage: HashMap<EntityId, HashMap<AbilityKey, u32>>,

    /// `actor -> elements attuned at least once`.
    attuned: HashMap<EntityId, HashSet<Element>>,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one use of an ability.
    pub fn increment(&mut self, actor: EntityId, key: AbilityKey) {
        *self
            .usage
            .entry(actor)
            .or_default()
            .entry(key)
            .or_insert(0) += 1;
    }

    /// Use count for one ability; 0 when never used.
    pub fn count(&self, actor: EntityId, key: AbilityKey) -> u32 {
        self.usage
            .get(&actor)
            .and_then(|counters| counters.get(&key))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of use counts across every slot of an element.
    pub fn element_total(&self, actor: EntityId, element: Element) -> u32 {
        self.usage
            .get(&actor)
            .map(|counters| {
                counters
                    .iter()
                    .filter(|(key, _)| key.element == element)
                    .map(|(_, &count)| count)
                    .sum()
            })
            .unwrap_or(0)
    }

    /// Sum of use counts across every ability the actor has used.
    pub fn total_uses(&self, actor: EntityId) -> u32 {
        self.usage
            .get(&actor)
            .map(|counters| counters.values().sum())
            .unwrap_or(0)
    }

    /// Number of fragment abilities whose counter has reached `threshold`.
    ///
    /// Lightning is deliberately excluded: mastery is a fragment concept
    /// and the all-mastered total is fragment elements × two slots.
    pub fn mastered_count(&self, actor: EntityId, threshold: u32) -> usize {
        self.usage
            .get(&actor)
            .map(|counters| {
                counters
                    .iter()
                    .filter(|(key, count)| key.element.is_fragment() && **count >= threshold)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Records that the actor has attuned an element at least once.
    /// Idempotent; returns true only on the first record.
    pub fn record_attuned(&mut self, actor: EntityId, element: Element) -> bool {
        self.attuned.entry(actor).or_default().insert(element)
    }

    pub fn is_attuned(&self, actor: EntityId, element: Element) -> bool {
        self.attuned
            .get(&actor)
            .is_some_and(|set| set.contains(&element))
    }

    /// How many distinct elements the actor has attuned.
    pub fn attuned_count(&self, actor: EntityId) -> usize {
        self.attuned.get(&actor).map(HashSet::len).unwrap_or(0)
    }

    /// Clears all counters and events for the actor.
    pub fn reset(&mut self, actor: EntityId) {
        self.usage.remove(&actor);
        self.attuned.remove(&actor);
    }

    // ========================================================================
    // Snapshot support
    // ========================================================================

    /// Exports all counters and attunement events, sorted for stable output.
    pub fn export(&self) -> (Vec<(EntityId, AbilityKey, u32)>, Vec<(EntityId, Element)>) {
        let mut usage = Vec::new();
        for (&actor, counters) in &self.usage {
            for (&key, &count) in counters {
                usage.push((actor, key, count));
            }
        }
        usage.sort();

        let mut attuned = Vec::new();
        for (&actor, elements) in &self.attuned {
            for &element in elements {
                attuned.push((actor, element));
            }
        }
        attuned.sort();

        (usage, attuned)
    }

    /// Rebuilds the ledger from exported data.
    pub fn restore(&mut self, usage: &[(EntityId, AbilityKey, u32)], attuned: &[(EntityId, Element)]) {
        self.usage.clear();
        self.attuned.clear();
        for &(actor, key, count) in usage {
            if count > 0 {
                self.usage.entry(actor).or_default().insert(key, count);
            }
        }
        for &(actor, element) in attuned {
            self.attuned.entry(actor).or_default().insert(element);
        }
    }
}
