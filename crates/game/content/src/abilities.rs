//! The fixed ability catalog.
//!
//! One definition per (element, slot): display name, command aliases, and
//! the built-in cooldown the gate falls back to when no global default is
//! configured. Built-in durations are the tuned values the abilities
//! shipped with; admins override them per key at runtime.

use wyrm_core::{AbilityDefinition, AbilityKey, AbilitySlot, Element};

const fn key(element: Element, slot: AbilitySlot) -> AbilityKey {
    AbilityKey::new(element, slot)
}

/// Every ability in the game, in catalog order.
pub const ABILITIES: &[AbilityDefinition] = &[
    AbilityDefinition::new(
        key(Element::Lightning, AbilitySlot::Primary),
        "Lightning Strike",
        "Calls down cascading lightning on the nearest foe in the caster's sights.",
        &["lightning", "strike"],
        60,
    ),
    AbilityDefinition::new(
        key(Element::Fire, AbilitySlot::Primary),
        "Dragon's Wrath",
        "Hurls a searing bolt that consumes whatever it touches.",
        &["wrath", "fireball"],
        40,
    ),
    AbilityDefinition::new(
        key(Element::Fire, AbilitySlot::Secondary),
        "Infernal Dominion",
        "Raises a ring of flame no enemy can cross.",
        &["dominion", "ring"],
        60,
    ),
    AbilityDefinition::new(
        key(Element::Wind, AbilitySlot::Primary),
        "Draconic Surge",
        "Channels the wind's swiftness into a burst of speed.",
        &["surge", "dash"],
        30,
    ),
    AbilityDefinition::new(
        key(Element::Wind, AbilitySlot::Secondary),
        "Wing Burst",
        "Launches the caster skyward on a hammer of air.",
        &["wingburst", "leap"],
        45,
    ),
    AbilityDefinition::new(
        key(Element::Earth, AbilitySlot::Primary),
        "Draconic Reflex",
        "Hardens flesh to stone, absorbing the next blows.",
        &["reflex", "harden"],
        90,
    ),
    AbilityDefinition::new(
        key(Element::Earth, AbilitySlot::Secondary),
        "Essence Rebirth",
        "Restores the fallen caster through the earth's own vitality.",
        &["rebirth", "essence"],
        300,
    ),
    AbilityDefinition::new(
        key(Element::Void, AbilitySlot::Primary),
        "Dread Gaze",
        "Strikes primal fear into every foe that meets the caster's eyes.",
        &["gaze", "dread"],
        60,
    ),
    AbilityDefinition::new(
        key(Element::Void, AbilitySlot::Secondary),
        "Life Devourer",
        "Drains the vitality of nearby enemies into the caster.",
        &["devour", "drain"],
        90,
    ),
];

/// Looks up a definition by key.
pub fn definition(key: AbilityKey) -> Option<&'static AbilityDefinition> {
    ABILITIES.iter().find(|def| def.key == key)
}

/// Resolves a command alias within one element (case-insensitive).
pub fn by_alias(element: Element, alias: &str) -> Option<&'static AbilityDefinition> {
    ABILITIES
        .iter()
        .find(|def| def.key.element == element && def.matches_alias(alias))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_element_slot_pair_has_exactly_one_definition() {
        for element in [
            Element::Lightning,
            Element::Fire,
            Element::Wind,
            Element::Earth,
            Element::Void,
        ] {
            for &slot in element.slots() {
                let key = AbilityKey::new(element, slot);
                let matches = ABILITIES.iter().filter(|def| def.key == key).count();
                assert_eq!(matches, 1, "catalog broken for {key}");
            }
        }
        assert_eq!(ABILITIES.len(), 9);
    }

    #[test]
    fn aliases_resolve_within_their_element() {
        let def = by_alias(Element::Fire, "WRATH").expect("alias should resolve");
        assert_eq!(def.name, "Dragon's Wrath");
        assert!(by_alias(Element::Wind, "wrath").is_none());
    }

    #[test]
    fn builtin_cooldowns_match_the_shipped_tuning() {
        let earth2 = definition(AbilityKey::new(Element::Earth, AbilitySlot::Secondary)).unwrap();
        assert_eq!(earth2.cooldown_secs, 300);
        let lightning = definition(AbilityKey::primary(Element::Lightning)).unwrap();
        assert_eq!(lightning.cooldown_secs, 60);
    }
}
