//! Ability identity and invocation machinery.
//!
//! This module defines the composite ability key used across every store,
//! the immutable per-ability definition metadata, the invocation gate, and
//! the multi-strike controller.
//!
//! # Design
//!
//! - **AbilityKey**: `(element, slot)` composite, case-normalized by
//!   construction and used as the map key for cooldowns and usage counters
//! - **AbilityDefinition**: static catalog entry owned by the content crate
//! - **InvocationGate**: eligibility check + cooldown commit
//! - **StrikeRun**: the periodic multi-strike state machine

mod gate;
mod strike;

pub use gate::{Invocation, InvocationGate};
pub use strike::{AbortReason, RunPhase, StrikeRun, StrikeTick};

use std::fmt;
use std::str::FromStr;

// ============================================================================
// Elements
// ============================================================================

/// Ability domain. Lightning is the egg-borne ability; the other four are
/// fragment elements.
///
/// Parsing is case-insensitive and accepts the legacy aliases still used
/// by admin tooling (`agile`, `immortal`, `corrupt`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Lightning,
    Fire,
    #[strum(serialize = "wind", serialize = "agile")]
    Wind,
    #[strum(serialize = "earth", serialize = "immortal")]
    Earth,
    #[strum(serialize = "void", serialize = "corrupt")]
    Void,
}

impl Element {
    /// The four fragment elements, in catalog order.
    pub const FRAGMENTS: [Element; 4] = [
        Element::Fire,
        Element::Wind,
        Element::Earth,
        Element::Void,
    ];

    /// Number of fragment elements (lightning excluded).
    pub const FRAGMENT_COUNT: usize = Self::FRAGMENTS.len();

    pub const fn as_str(self) -> &'static str {
        match self {
            Element::Lightning => "lightning",
            Element::Fire => "fire",
            Element::Wind => "wind",
            Element::Earth => "earth",
            Element::Void => "void",
        }
    }

    /// True for the four fragment elements; false for lightning.
    pub const fn is_fragment(self) -> bool {
        !matches!(self, Element::Lightning)
    }

    /// Slots this element carries: lightning has only the primary slot,
    /// fragment elements have both.
    pub const fn slots(self) -> &'static [AbilitySlot] {
        match self {
            Element::Lightning => &[AbilitySlot::Primary],
            _ => &[AbilitySlot::Primary, AbilitySlot::Secondary],
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Slots
// ============================================================================

/// Slot number within an element. Multi-slot elements carry exactly two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilitySlot {
    Primary,
    Secondary,
}

impl AbilitySlot {
    pub const fn number(self) -> u8 {
        match self {
            AbilitySlot::Primary => 1,
            AbilitySlot::Secondary => 2,
        }
    }

    /// Parses a slot number; anything outside {1, 2} is rejected.
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(AbilitySlot::Primary),
            2 => Some(AbilitySlot::Secondary),
            _ => None,
        }
    }
}

impl fmt::Display for AbilitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// ============================================================================
// Keys
// ============================================================================

/// Composite identifier for one timed ability: `(element, slot)`.
///
/// Displayed and parsed as `"element:slot"` (e.g. `"fire:1"`), the form
/// admin commands and config files use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityKey {
    pub element: Element,
    pub slot: AbilitySlot,
}

impl AbilityKey {
    pub const fn new(element: Element, slot: AbilitySlot) -> Self {
        Self { element, slot }
    }

    /// Primary-slot key for an element.
    pub const fn primary(element: Element) -> Self {
        Self::new(element, AbilitySlot::Primary)
    }
}

impl fmt::Display for AbilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.element, self.slot)
    }
}

/// Errors from parsing an `"element:slot"` key string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseAbilityKeyError {
    #[error("expected \"element:slot\", got {0:?}")]
    MissingSlot(String),

    #[error("unknown element {0:?}")]
    UnknownElement(String),

    #[error("invalid slot {0:?} (must be 1 or 2)")]
    InvalidSlot(String),

    #[error("element {element} has no slot {slot}")]
    SlotNotCarried { element: Element, slot: AbilitySlot },
}

impl FromStr for AbilityKey {
    type Err = ParseAbilityKeyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (element_part, slot_part) = input
            .split_once(':')
            .ok_or_else(|| ParseAbilityKeyError::MissingSlot(input.to_string()))?;

        let element = Element::from_str(element_part.trim())
            .map_err(|_| ParseAbilityKeyError::UnknownElement(element_part.to_string()))?;

        let slot = slot_part
            .trim()
            .parse::<u8>()
            .ok()
            .and_then(AbilitySlot::from_number)
            .ok_or_else(|| ParseAbilityKeyError::InvalidSlot(slot_part.to_string()))?;

        if !element.slots().contains(&slot) {
            return Err(ParseAbilityKeyError::SlotNotCarried { element, slot });
        }

        Ok(AbilityKey::new(element, slot))
    }
}

// ============================================================================
// Definitions
// ============================================================================

/// Immutable metadata for one ability: display name, command aliases, and
/// the built-in cooldown used when no global default overrides it.
///
/// The content crate owns the actual catalog; this type only makes it
/// expressible as `const` data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityDefinition {
    pub key: AbilityKey,
    pub name: &'static str,
    pub description: &'static str,
    pub aliases: &'static [&'static str],
    pub cooldown_secs: u32,
}

impl AbilityDefinition {
    pub const fn new(
        key: AbilityKey,
        name: &'static str,
        description: &'static str,
        aliases: &'static [&'static str],
        cooldown_secs: u32,
    ) -> Self {
        Self {
            key,
            name,
            description,
            aliases,
            cooldown_secs,
        }
    }

    /// Checks whether the given command alias selects this ability
    /// (case-insensitive).
    pub fn matches_alias(&self, alias: &str) -> bool {
        self.aliases
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(alias))
    }
}
