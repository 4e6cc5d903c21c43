//! Centralized cooldown tracking for all timed abilities.
//!
//! Single source of truth for per-actor, per-ability cooldowns and for the
//! process-wide global default table. Expired entries are purged lazily on
//! read; there is no background sweep. All operations are total over
//! absent actors and keys — reads degrade to zero/false, writes to no-ops.
//!
//! Time never comes from a clock here: every operation that needs "now"
//! takes it as a parameter, sampled once per command by the caller.

use std::collections::HashMap;

use crate::ability::AbilityKey;
use crate::state::{EntityId, Millis, millis_to_seconds_ceil, seconds_to_millis};

/// Effective cooldown duration of an ability, for status display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CooldownDisplay {
    /// Zero-duration: the ability recharges instantly.
    Instant,
    Seconds(u32),
}

/// Per-actor cooldown expiries plus the global default-duration table.
#[derive(Clone, Debug, Default)]
pub struct CooldownStore {
    /// `actor -> (key -> expiry)`. Entries past expiry are garbage; they
    /// are removed the next time the slot is read.
    cooldowns: HashMap<EntityId, HashMap<AbilityKey, Millis>>,

    /// `key -> default duration in seconds`. Absence means "use the
    /// ability's built-in default".
    global_defaults: HashMap<AbilityKey, u32>,
}

impl CooldownStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Per-actor timers
    // ========================================================================

    /// Puts `actor` on cooldown for `key` until `now + seconds`.
    ///
    /// `seconds == 0` records nothing; a caller that wants the timer gone
    /// must call [`clear`](Self::clear) — zero duration is not a clear.
    pub fn set(&mut self, actor: EntityId, key: AbilityKey, seconds: u32, now: Millis) {
        if seconds == 0 {
            return;
        }
        let expiry = now + seconds_to_millis(seconds);
        self.cooldowns.entry(actor).or_default().insert(key, expiry);
    }

    /// Remaining cooldown in whole seconds, rounded up; 0 if absent or
    /// expired. Expired entries are purged as a side effect.
    pub fn remaining(&mut self, actor: EntityId, key: AbilityKey, now: Millis) -> u32 {
        let Some(timers) = self.cooldowns.get_mut(&actor) else {
            return 0;
        };
        let Some(&expiry) = timers.get(&key) else {
            return 0;
        };

        let left = expiry.saturating_since(now);
        if left == 0 {
            timers.remove(&key);
            if timers.is_empty() {
                self.cooldowns.remove(&actor);
            }
            return 0;
        }

        millis_to_seconds_ceil(left)
    }

    pub fn is_on_cooldown(&mut self, actor: EntityId, key: AbilityKey, now: Millis) -> bool {
        self.remaining(actor, key, now) > 0
    }

    /// Removes one timer. No-op when absent.
    pub fn clear(&mut self, actor: EntityId, key: AbilityKey) {
        if let Some(timers) = self.cooldowns.get_mut(&actor) {
            timers.remove(&key);
            if timers.is_empty() {
                self.cooldowns.remove(&actor);
            }
        }
    }

    /// Removes every timer the actor holds. Called when an actor leaves
    /// the world (death, disconnect-with-reset policy).
    pub fn clear_all(&mut self, actor: EntityId) {
        self.cooldowns.remove(&actor);
    }

    /// Drops the actor's expired entries without touching live timers.
    /// Called when an actor returns to the world, so maps do not grow
    /// unboundedly from actors who left mid-cooldown.
    pub fn purge_expired(&mut self, actor: EntityId, now: Millis) {
        if let Some(timers) = self.cooldowns.get_mut(&actor) {
            timers.retain(|_, expiry| expiry.saturating_since(now) > 0);
            if timers.is_empty() {
                self.cooldowns.remove(&actor);
            }
        }
    }

    /// All live cooldowns for an actor as `(key, remaining seconds)`,
    /// sorted by key for stable display. Expired entries are skipped but
    /// left for lazy purge.
    pub fn all_remaining(&self, actor: EntityId, now: Millis) -> Vec<(AbilityKey, u32)> {
        let Some(timers) = self.cooldowns.get(&actor) else {
            return Vec::new();
        };

        let mut out: Vec<_> = timers
            .iter()
            .filter_map(|(&key, &expiry)| {
                let left = expiry.saturating_since(now);
                (left > 0).then(|| (key, millis_to_seconds_ceil(left)))
            })
            .collect();
        out.sort_by_key(|&(key, _)| key);
        out
    }

    // ========================================================================
    // Global defaults
    // ========================================================================

    /// Sets the administrative default duration for `key`. Zero is a valid
    /// value and means "no cooldown", distinct from removing the entry.
    pub fn set_global_default(&mut self, key: AbilityKey, seconds: u32) {
        self.global_defaults.insert(key, seconds);
    }

    /// Removes the administrative default; the ability falls back to its
    /// built-in duration afterwards.
    pub fn remove_global_default(&mut self, key: AbilityKey) {
        self.global_defaults.remove(&key);
    }

    pub fn global_default(&self, key: AbilityKey) -> Option<u32> {
        self.global_defaults.get(&key).copied()
    }

    /// All configured defaults, sorted by key.
    pub fn global_defaults(&self) -> Vec<(AbilityKey, u32)> {
        let mut out: Vec<_> = self
            .global_defaults
            .iter()
            .map(|(&key, &seconds)| (key, seconds))
            .collect();
        out.sort_by_key(|&(key, _)| key);
        out
    }

    /// Duration the invocation gate will commit for `key`: the global
    /// default when configured (including zero), else `builtin`.
    pub fn effective_duration(&self, key: AbilityKey, builtin: u32) -> u32 {
        self.global_default(key).unwrap_or(builtin)
    }

    /// Display form of the effective duration.
    pub fn display_duration(&self, key: AbilityKey, builtin: u32) -> CooldownDisplay {
        match self.effective_duration(key, builtin) {
            0 => CooldownDisplay::Instant,
            seconds => CooldownDisplay::Seconds(seconds),
        }
    }

    /// Caps every live timer for `key` when the administrative default is
    /// lowered, so the change takes effect for in-progress cooldowns.
    ///
    /// `new_max == 0` means the cooldown was disabled: all live timers for
    /// the key are cleared outright rather than capped to zero-remaining.
    /// Returns how many actors were adjusted.
    pub fn adjust_active(&mut self, key: AbilityKey, new_max: u32, now: Millis) -> usize {
        let mut adjusted = 0;

        if new_max == 0 {
            for timers in self.cooldowns.values_mut() {
                if timers.remove(&key).is_some() {
                    adjusted += 1;
                }
            }
            self.cooldowns.retain(|_, timers| !timers.is_empty());
            return adjusted;
        }

        let cap = seconds_to_millis(new_max);
        for timers in self.cooldowns.values_mut() {
            if let Some(expiry) = timers.get_mut(&key) {
                let left = expiry.saturating_since(now);
                if left > cap {
                    *expiry = now + cap;
                    adjusted += 1;
                }
            }
        }
        adjusted
    }

    // ========================================================================
    // Snapshot support
    // ========================================================================

    /// Exports live timers as `(actor, key, remaining seconds)` plus the
    /// global default table. Remaining time (not absolute expiry) is
    /// exported so a restore is independent of the epoch the snapshot was
    /// taken under.
    pub fn export(&self, now: Millis) -> (Vec<(EntityId, AbilityKey, u32)>, Vec<(AbilityKey, u32)>) {
        let mut timers = Vec::new();
        for (&actor, slots) in &self.cooldowns {
            for (&key, &expiry) in slots {
                let left = expiry.saturating_since(now);
                if left > 0 {
                    timers.push((actor, key, millis_to_seconds_ceil(left)));
                }
            }
        }
        timers.sort();
        (timers, self.global_defaults())
    }

    /// Rebuilds the store from exported data, anchored at `now`.
    pub fn restore(
        &mut self,
        timers: &[(EntityId, AbilityKey, u32)],
        defaults: &[(AbilityKey, u32)],
        now: Millis,
    ) {
        self.cooldowns.clear();
        self.global_defaults.clear();
        for &(actor, key, seconds) in timers {
            self.set(actor, key, seconds, now);
        }
        for &(key, seconds) in defaults {
            self.set_global_default(key, seconds);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::{AbilitySlot, Element};

    const ACTOR: EntityId = EntityId(7);
    const OTHER: EntityId = EntityId(8);

    fn fire1() -> AbilityKey {
        AbilityKey::primary(Element::Fire)
    }

    #[test]
    fn remaining_is_non_increasing_and_reaches_zero() {
        let mut store = CooldownStore::new();
        store.set(ACTOR, fire1(), 10, Millis(0));

        let mut previous = u32::MAX;
        for t in [0u64, 1_500, 4_000, 9_999, 10_000, 12_000] {
            let remaining = store.remaining(ACTOR, fire1(), Millis(t));
            assert!(remaining <= previous, "remaining grew at t={t}");
            previous = remaining;
        }
        assert_eq!(store.remaining(ACTOR, fire1(), Millis(10_000)), 0);
    }

    #[test]
    fn partial_seconds_round_up() {
        let mut store = CooldownStore::new();
        store.set(ACTOR, fire1(), 10, Millis(0));
        assert_eq!(store.remaining(ACTOR, fire1(), Millis(9_001)), 1);
        assert_eq!(store.remaining(ACTOR, fire1(), Millis(8_999)), 2);
    }

    #[test]
    fn zero_duration_records_nothing_and_leaves_existing_timer_alone() {
        let mut store = CooldownStore::new();
        store.set(ACTOR, fire1(), 0, Millis(0));
        assert!(!store.is_on_cooldown(ACTOR, fire1(), Millis(0)));

        store.set(ACTOR, fire1(), 30, Millis(0));
        store.set(ACTOR, fire1(), 0, Millis(1_000));
        assert_eq!(store.remaining(ACTOR, fire1(), Millis(1_000)), 29);
    }

    #[test]
    fn expired_entries_are_purged_on_read() {
        let mut store = CooldownStore::new();
        store.set(ACTOR, fire1(), 5, Millis(0));
        assert_eq!(store.remaining(ACTOR, fire1(), Millis(6_000)), 0);
        // Map slot is gone entirely, not merely reading zero.
        assert!(store.all_remaining(ACTOR, Millis(0)).is_empty());
    }

    #[test]
    fn reads_on_absent_actors_degrade_to_defaults() {
        let mut store = CooldownStore::new();
        assert_eq!(store.remaining(EntityId(999), fire1(), Millis(0)), 0);
        assert!(!store.is_on_cooldown(EntityId(999), fire1(), Millis(0)));
        store.clear(EntityId(999), fire1());
        store.clear_all(EntityId(999));
    }

    #[test]
    fn adjust_active_caps_to_new_maximum() {
        let mut store = CooldownStore::new();
        store.set(ACTOR, fire1(), 60, Millis(0));
        store.set(OTHER, fire1(), 10, Millis(0));

        let adjusted = store.adjust_active(fire1(), 20, Millis(0));
        assert_eq!(adjusted, 1);
        assert_eq!(store.remaining(ACTOR, fire1(), Millis(0)), 20);
        // Already below the cap: untouched.
        assert_eq!(store.remaining(OTHER, fire1(), Millis(0)), 10);
    }

    #[test]
    fn adjust_active_is_idempotent() {
        let mut store = CooldownStore::new();
        store.set(ACTOR, fire1(), 60, Millis(0));

        store.adjust_active(fire1(), 20, Millis(0));
        let first = store.remaining(ACTOR, fire1(), Millis(0));
        store.adjust_active(fire1(), 20, Millis(0));
        let second = store.remaining(ACTOR, fire1(), Millis(0));
        assert_eq!(first, second);
    }

    #[test]
    fn adjust_active_zero_clears_instead_of_capping() {
        let mut store = CooldownStore::new();
        store.set(ACTOR, fire1(), 60, Millis(0));
        store.set(OTHER, fire1(), 60, Millis(0));

        let adjusted = store.adjust_active(fire1(), 0, Millis(0));
        assert_eq!(adjusted, 2);
        assert!(!store.is_on_cooldown(ACTOR, fire1(), Millis(0)));
        assert!(!store.is_on_cooldown(OTHER, fire1(), Millis(0)));
    }

    #[test]
    fn global_default_wins_over_builtin_including_zero() {
        let mut store = CooldownStore::new();
        assert_eq!(store.effective_duration(fire1(), 40), 40);

        store.set_global_default(fire1(), 15);
        assert_eq!(store.effective_duration(fire1(), 40), 15);

        store.set_global_default(fire1(), 0);
        assert_eq!(store.effective_duration(fire1(), 40), 0);
        assert_eq!(store.display_duration(fire1(), 40), CooldownDisplay::Instant);

        store.remove_global_default(fire1());
        assert_eq!(store.effective_duration(fire1(), 40), 40);
    }

    #[test]
    fn purge_expired_touches_only_dead_entries() {
        let mut store = CooldownStore::new();
        let wind2 = AbilityKey::new(Element::Wind, AbilitySlot::Secondary);
        store.set(ACTOR, fire1(), 5, Millis(0));
        store.set(ACTOR, wind2, 60, Millis(0));

        store.purge_expired(ACTOR, Millis(10_000));
        assert_eq!(store.all_remaining(ACTOR, Millis(10_000)), vec![(wind2, 50)]);
    }

    #[test]
    fn export_restore_round_trips_remaining_time() {
        let mut store = CooldownStore::new();
        store.set(ACTOR, fire1(), 60, Millis(0));
        store.set_global_default(fire1(), 30);

        let (timers, defaults) = store.export(Millis(10_000));

        let mut restored = CooldownStore::new();
        restored.restore(&timers, &defaults, Millis(500_000));
        assert_eq!(restored.remaining(ACTOR, fire1(), Millis(500_000)), 50);
        assert_eq!(restored.global_default(fire1()), Some(30));
    }
}
