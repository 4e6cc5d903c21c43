//! Ability invocation gate: eligibility checks and cooldown commit.

use glam::Vec3;

use crate::config::GameConfig;
use crate::cooldown::CooldownStore;
use crate::env::Env;
use crate::state::{EntityId, Millis};
use crate::targeting;

use super::{AbilityDefinition, StrikeRun};

/// Result of an invocation attempt. Every rejection is a distinct, stable
/// reason code so the presentation layer never has to re-derive the cause.
#[derive(Debug)]
pub enum Invocation {
    /// The invocation was accepted and a strike run created. The cooldown
    /// has already been committed (`cooldown_secs` 0 means the resolved
    /// duration was zero and nothing was recorded).
    Accepted {
        run: StrikeRun,
        target: EntityId,
        cooldown_secs: u32,
    },

    RejectedOnCooldown { remaining: u32 },
    RejectedPrecondition,
    RejectedNoTarget,
}

/// Entry point for timed ability use.
///
/// Checks, in order: cooldown, carry precondition, initial target
/// acquisition (line-of-sight validated). On acceptance the cooldown is
/// committed immediately — at invocation, not at run completion — which
/// is also what structurally guarantees at most one live run per
/// (actor, ability) pair.
#[derive(Clone, Debug)]
pub struct InvocationGate {
    config: GameConfig,
}

impl InvocationGate {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Attempts to invoke `definition` for `actor`.
    ///
    /// The committed duration resolves as: global default when configured
    /// (a configured zero means "no cooldown" and skips the commit
    /// entirely), otherwise the ability's built-in default.
    pub fn try_invoke(
        &self,
        actor: EntityId,
        definition: &AbilityDefinition,
        cooldowns: &mut CooldownStore,
        env: &Env<'_>,
        now: Millis,
    ) -> Invocation {
        let key = definition.key;

        let remaining = cooldowns.remaining(actor, key, now);
        if remaining > 0 {
            return Invocation::RejectedOnCooldown { remaining };
        }

        let carrying = env
            .loadout()
            .map(|loadout| loadout.has_required_item(actor, key))
            .unwrap_or(false);
        if !carrying {
            return Invocation::RejectedPrecondition;
        }

        let Ok(world) = env.spatial() else {
            return Invocation::RejectedNoTarget;
        };
        let Some(origin) = world.eye_position(actor) else {
            return Invocation::RejectedNoTarget;
        };
        let facing = world.facing(actor).unwrap_or(Vec3::X);

        let Some(target) = targeting::find_nearest_in_cone_with_line_of_sight(
            world,
            actor,
            origin,
            facing,
            self.config.max_range,
            self.config.acquisition_cone_radians,
            |_| true,
            None,
        ) else {
            return Invocation::RejectedNoTarget;
        };

        let cooldown_secs = cooldowns.effective_duration(key, definition.cooldown_secs);
        if cooldown_secs > 0 {
            cooldowns.set(actor, key, cooldown_secs, now);
        }

        Invocation::Accepted {
            run: StrikeRun::new(actor, key, target, &self.config),
            target,
            cooldown_secs,
        }
    }
}
