//! Carried-item / actor-state precondition capability.

use crate::ability::AbilityKey;
use crate::state::EntityId;

/// Answers "does this actor currently satisfy the ability's carry
/// precondition" (e.g. the focus item held in the off-hand).
///
/// Checked at invocation and re-checked on every strike tick, because the
/// actor can drop or swap the item mid-action.
pub trait LoadoutOracle {
    fn has_required_item(&self, actor: EntityId, key: AbilityKey) -> bool;
}
