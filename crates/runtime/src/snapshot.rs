//! Serializable snapshots of the core stores.
//!
//! Persistence mechanics (where and when to write) belong to an external
//! collaborator; the runtime only produces and consumes these plain-data
//! snapshots. Cooldowns are captured as remaining seconds rather than
//! absolute expiries so a restore is independent of process epoch.

use serde::{Deserialize, Serialize};

use wyrm_core::{AbilityKey, Element, EntityId};

/// Complete persistable state of the gameplay core.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreSnapshot {
    pub cooldowns: Vec<(EntityId, AbilityKey, u32)>,
    pub global_defaults: Vec<(AbilityKey, u32)>,
    pub usage: Vec<(EntityId, AbilityKey, u32)>,
    pub attuned: Vec<(EntityId, Element)>,
    pub unlocked_pages: Vec<(EntityId, u8)>,
    pub unlocked_achievements: Vec<(EntityId, u8)>,
}

impl CoreSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
