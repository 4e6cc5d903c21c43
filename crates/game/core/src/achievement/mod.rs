//! Achievement catalog and evaluation.
//!
//! Achievements ride the same progress data as chronicle pages: a fixed
//! catalog of declarative criteria evaluated after every ledger mutation,
//! unlocking exactly once per actor. Criteria may additionally look at the
//! chronicle unlock state (lore-hunter achievements), so evaluation takes
//! both stores.

use std::collections::{BTreeSet, HashMap};

use crate::ability::{AbilityKey, AbilitySlot, Element};
use crate::chronicle::UnlockEngine;
use crate::ledger::ProgressLedger;
use crate::state::EntityId;

/// Broad grouping used by list displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AchievementCategory {
    Discovery,
    Mastery,
    LoreHunter,
    Storm,
}

/// Declarative unlock criterion for one achievement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AchievementCriteria {
    /// Attune any single fragment element.
    AttuneAny,

    /// Attune every fragment element at least once.
    AttuneAll,

    /// Use both slots of one element `required` times each.
    ElementMastery(Element),

    /// Master every fragment ability.
    MasterAll,

    /// Unlock `required` chronicle pages.
    PagesUnlocked,

    /// Use the lightning ability `required` times.
    LightningUses,
}

/// One immutable achievement definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AchievementSpec {
    /// Stable ordinal, 1-based; the identity persisted in unlock state.
    pub ordinal: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub category: AchievementCategory,
    pub criteria: AchievementCriteria,
    pub required: u32,
}

impl AchievementSpec {
    pub const fn new(
        ordinal: u8,
        name: &'static str,
        description: &'static str,
        category: AchievementCategory,
        criteria: AchievementCriteria,
        required: u32,
    ) -> Self {
        Self {
            ordinal,
            name,
            description,
            category,
            criteria,
            required,
        }
    }
}

/// Notification payload for a freshly earned achievement.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AchievementUnlocked {
    pub actor: EntityId,
    pub ordinal: u8,
    pub name: String,
}

/// Per-actor achievement unlock state over a fixed catalog. Same
/// exactly-once semantics as the chronicle engine.
#[derive(Clone, Debug)]
pub struct AchievementEngine {
    catalog: Vec<AchievementSpec>,
    mastery_threshold: u32,
    unlocked: HashMap<EntityId, BTreeSet<u8>>,
}

impl AchievementEngine {
    pub fn new(catalog: &[AchievementSpec], mastery_threshold: u32) -> Self {
        Self {
            catalog: catalog.to_vec(),
            mastery_threshold,
            unlocked: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &[AchievementSpec] {
        &self.catalog
    }

    /// Re-evaluates every still-locked achievement for the actor.
    pub fn evaluate(
        &mut self,
        actor: EntityId,
        ledger: &ProgressLedger,
        chronicle: &UnlockEngine,
    ) -> Vec<AchievementUnlocked> {
        let threshold = self.mastery_threshold;
        let unlocked = self.unlocked.entry(actor).or_default();

        let mut notices = Vec::new();
        for spec in &self.catalog {
            if unlocked.contains(&spec.ordinal) {
                continue;
            }
            if criteria_satisfied(spec, actor, ledger, chronicle, threshold) {
                unlocked.insert(spec.ordinal);
                notices.push(AchievementUnlocked {
                    actor,
                    ordinal: spec.ordinal,
                    name: spec.name.to_string(),
                });
            }
        }
        notices
    }

    pub fn is_unlocked(&self, actor: EntityId, ordinal: u8) -> bool {
        self.unlocked
            .get(&actor)
            .is_some_and(|set| set.contains(&ordinal))
    }

    pub fn unlocked(&self, actor: EntityId) -> Vec<u8> {
        self.unlocked
            .get(&actor)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn reset(&mut self, actor: EntityId) {
        self.unlocked.remove(&actor);
    }

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

    pub fn restore(&mut self, unlocked: &[(EntityId, u8)]) {
        self.unlocked.clear();
        for &(actor, ordinal) in unlocked {
            self.unlocked.entry(actor).or_default().insert(ordinal);
        }
    }
}

fn criteria_satisfied(
    spec: &AchievementSpec,
    actor: EntityId,
    ledger: &ProgressLedger,
    chronicle: &UnlockEngine,
    mastery_threshold: u32,
) -> bool {
    match spec.criteria {
        AchievementCriteria::AttuneAny => ledger.attuned_count(actor) >= 1,
        AchievementCriteria::AttuneAll => ledger.attuned_count(actor) >= Element::FRAGMENT_COUNT,
        AchievementCriteria::ElementMastery(element) => {
            [AbilitySlot::Primary, AbilitySlot::Secondary]
                .iter()
                .all(|&slot| ledger.count(actor, AbilityKey::new(element, slot)) >= spec.required)
        }
        AchievementCriteria::MasterAll => {
            ledger.mastered_count(actor, mastery_threshold) >= Element::FRAGMENT_COUNT * 2
        }
        AchievementCriteria::PagesUnlocked => {
            chronicle.unlocked_count(actor) >= spec.required as usize
        }
        AchievementCriteria::LightningUses => {
            ledger.element_total(actor, Element::Lightning) >= spec.required
        }
    }
}
