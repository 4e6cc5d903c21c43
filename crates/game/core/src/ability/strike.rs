//! Multi-strike action state machine.
//!
//! One [`StrikeRun`] exists per in-flight invocation. The run owns no
//! world state: its target is a weak id re-validated on every tick, and
//! the strike effect itself (damage, visuals, audio) is applied by the
//! embedding — the run only sequences strikes and decides when to stop.
//!
//! The periodic cadence lives outside: the scheduler calls [`StrikeRun::tick`]
//! at a fixed interval and drops the run once it reports a terminal
//! outcome. Ticking a terminal run is a safe no-op, which makes external
//! cancellation idempotent.

use glam::Vec3;

use crate::config::GameConfig;
use crate::env::Env;
use crate::state::EntityId;
use crate::targeting::{self, NO_CONE_RESTRICTION};

use super::AbilityKey;

/// Why a run stopped before delivering every strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbortReason {
    /// The caster no longer satisfies the carry precondition.
    PreconditionLost,

    /// The current target became invalid and no replacement qualifies.
    NoTargetsRemaining,
}

/// Lifecycle phase of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunPhase {
    Running,
    Completed,
    Aborted(AbortReason),
}

/// Outcome of one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrikeTick {
    /// A strike was delivered. `retargeted_from` is set when this tick had
    /// to re-acquire because the previous target became invalid.
    Struck {
        target: EntityId,
        retargeted_from: Option<EntityId>,
        strikes_delivered: u8,
        total_strikes: u8,
        completed: bool,
    },

    /// The run terminated without striking this tick.
    Aborted(AbortReason),

    /// The run was already terminal; nothing happened.
    AlreadyTerminal,
}

/// Live state of one multi-strike action.
#[derive(Clone, Debug)]
pub struct StrikeRun {
    caster: EntityId,
    key: AbilityKey,
    current_target: EntityId,
    strikes_delivered: u8,
    strikes_on_current: u8,
    total_strikes: u8,
    max_range: f32,
    phase: RunPhase,
}

impl StrikeRun {
    /// Creates a run for an accepted invocation. `initial_target` has
    /// already passed the gate's line-of-sight acquisition.
    pub fn new(
        caster: EntityId,
        key: AbilityKey,
        initial_target: EntityId,
        config: &GameConfig,
    ) -> Self {
        Self {
            caster,
            key,
            current_target: initial_target,
            strikes_delivered: 0,
            strikes_on_current: 0,
            total_strikes: config.strike_count,
            max_range: config.max_range,
            phase: RunPhase::Running,
        }
    }

    pub fn caster(&self) -> EntityId {
        self.caster
    }

    pub fn key(&self) -> AbilityKey {
        self.key
    }

    pub fn current_target(&self) -> EntityId {
        self.current_target
    }

    pub fn strikes_delivered(&self) -> u8 {
        self.strikes_delivered
    }

    pub fn strikes_on_current(&self) -> u8 {
        self.strikes_on_current
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.phase, RunPhase::Running)
    }

    /// Advances the run by one tick, in strict order: precondition
    /// re-check, target validation / reacquisition, strike delivery,
    /// completion check.
    ///
    /// Reacquisition resets the per-target counter but never the overall
    /// one — a run delivers exactly `total_strikes` strikes regardless of
    /// how many distinct targets they land on. A caster that is no longer
    /// placed in the world reads as a lost precondition.
    pub fn tick(&mut self, env: &Env<'_>) -> StrikeTick {
        if self.is_terminal() {
            return StrikeTick::AlreadyTerminal;
        }

        let carrying = env
            .loadout()
            .map(|loadout| loadout.has_required_item(self.caster, self.key))
            .unwrap_or(false);
        if !carrying {
            return self.abort(AbortReason::PreconditionLost);
        }

        let Ok(world) = env.spatial() else {
            return self.abort(AbortReason::PreconditionLost);
        };
        let Some(origin) = world.eye_position(self.caster) else {
            return self.abort(AbortReason::PreconditionLost);
        };
        let facing = world.facing(self.caster).unwrap_or(Vec3::X);

        let mut retargeted_from = None;
        if !world.is_alive(self.current_target) {
            let replacement = targeting::find_nearest_in_cone(
                world,
                self.caster,
                origin,
                facing,
                self.max_range,
                NO_CONE_RESTRICTION,
                |_| true,
                Some(self.current_target),
            );
            match replacement {
                Some(next) => {
                    retargeted_from = Some(self.current_target);
                    self.current_target = next;
                    self.strikes_on_current = 0;
                }
                None => return self.abort(AbortReason::NoTargetsRemaining),
            }
        }

        self.strikes_delivered += 1;
        self.strikes_on_current += 1;

        let completed = self.strikes_delivered >= self.total_strikes;
        if completed {
            self.phase = RunPhase::Completed;
        }

        StrikeTick::Struck {
            target: self.current_target,
            retargeted_from,
            strikes_delivered: self.strikes_delivered,
            total_strikes: self.total_strikes,
            completed,
        }
    }

    fn abort(&mut self, reason: AbortReason) -> StrikeTick {
        self.phase = RunPhase::Aborted(reason);
        StrikeTick::Aborted(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::Element;
    use crate::env::{LoadoutOracle, SpatialError, SpatialOracle};
    use std::collections::HashMap;

    const CASTER: EntityId = EntityId(0);

    struct TestWorld {
        entities: HashMap<EntityId, Vec3>,
        dead: Vec<EntityId>,
    }

    impl TestWorld {
        fn new(entities: &[(u64, Vec3)]) -> Self {
            Self {
                entities: entities
                    .iter()
                    .map(|&(id, pos)| (EntityId(id), pos))
                    .collect(),
                dead: Vec::new(),
            }
        }

        fn kill(&mut self, id: u64) {
            self.dead.push(EntityId(id));
        }
    }

    impl SpatialOracle for TestWorld {
        fn entities_near(
            &self,
            _origin: Vec3,
            _half_extent: f32,
        ) -> Result<Vec<EntityId>, SpatialError> {
            let mut ids: Vec<_> = self.entities.keys().copied().collect();
            ids.sort();
            Ok(ids)
        }

        fn position(&self, entity: EntityId) -> Option<Vec3> {
            self.entities.get(&entity).copied()
        }

        fn eye_position(&self, entity: EntityId) -> Option<Vec3> {
            self.position(entity)
        }

        fn facing(&self, _entity: EntityId) -> Option<Vec3> {
            Some(Vec3::X)
        }

        fn is_alive(&self, entity: EntityId) -> bool {
            self.entities.contains_key(&entity) && !self.dead.contains(&entity)
        }

        fn raycast_first_hit(
            &self,
            _from: Vec3,
            _direction: Vec3,
            _max_distance: f32,
            target: EntityId,
        ) -> Result<Option<EntityId>, SpatialError> {
            Ok(Some(target))
        }
    }

    struct Carrying(bool);

    impl LoadoutOracle for Carrying {
        fn has_required_item(&self, _actor: EntityId, _key: AbilityKey) -> bool {
            self.0
        }
    }

    fn lightning_run(world_target: u64) -> StrikeRun {
        StrikeRun::new(
            CASTER,
            AbilityKey::primary(Element::Lightning),
            EntityId(world_target),
            &GameConfig::default(),
        )
    }

    #[test]
    fn delivers_exactly_total_strikes_on_a_stable_target() {
        let world = TestWorld::new(&[(0, Vec3::ZERO), (1, Vec3::new(5.0, 0.0, 0.0))]);
        let carrying = Carrying(true);
        let mut run = lightning_run(1);

        for expected in 1..=3u8 {
            let env = Env::with_all(&world, &carrying);
            match run.tick(&env) {
                StrikeTick::Struck {
                    target,
                    strikes_delivered,
                    completed,
                    ..
                } => {
                    assert_eq!(target, EntityId(1));
                    assert_eq!(strikes_delivered, expected);
                    assert_eq!(completed, expected == 3);
                }
                other => panic!("unexpected outcome: {other:?}"),
            }
        }
        assert_eq!(run.phase(), RunPhase::Completed);
    }

    #[test]
    fn total_strike_count_is_invariant_across_retargets() {
        let mut world = TestWorld::new(&[
            (0, Vec3::ZERO),
            (1, Vec3::new(5.0, 0.0, 0.0)),
            (2, Vec3::new(-8.0, 0.0, 0.0)),
        ]);
        let carrying = Carrying(true);
        let mut run = lightning_run(1);

        let env = Env::with_all(&world, &carrying);
        assert!(matches!(run.tick(&env), StrikeTick::Struck { .. }));

        world.kill(1);

        let env = Env::with_all(&world, &carrying);
        match run.tick(&env) {
            StrikeTick::Struck {
                target,
                retargeted_from,
                strikes_delivered,
                ..
            } => {
                // Replacement sits behind the caster; the reacquisition
                // sentinel must still find it.
                assert_eq!(target, EntityId(2));
                assert_eq!(retargeted_from, Some(EntityId(1)));
                assert_eq!(strikes_delivered, 2);
                assert_eq!(run.strikes_on_current(), 1);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        let env = Env::with_all(&world, &carrying);
        match run.tick(&env) {
            StrikeTick::Struck {
                strikes_delivered,
                completed,
                ..
            } => {
                assert_eq!(strikes_delivered, 3);
                assert!(completed);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn aborts_when_no_replacement_target_exists() {
        let mut world = TestWorld::new(&[(0, Vec3::ZERO), (1, Vec3::new(5.0, 0.0, 0.0))]);
        let carrying = Carrying(true);
        let mut run = lightning_run(1);

        let env = Env::with_all(&world, &carrying);
        run.tick(&env);

        world.kill(1);
        let env = Env::with_all(&world, &carrying);
        assert_eq!(
            run.tick(&env),
            StrikeTick::Aborted(AbortReason::NoTargetsRemaining)
        );
        assert_eq!(
            run.phase(),
            RunPhase::Aborted(AbortReason::NoTargetsRemaining)
        );
        assert_eq!(run.strikes_delivered(), 1);
    }

    #[test]
    fn aborts_when_the_precondition_is_lost_mid_run() {
        let world = TestWorld::new(&[(0, Vec3::ZERO), (1, Vec3::new(5.0, 0.0, 0.0))]);
        let mut run = lightning_run(1);

        let carrying = Carrying(true);
        let env = Env::with_all(&world, &carrying);
        run.tick(&env);

        let dropped = Carrying(false);
        let env = Env::with_all(&world, &dropped);
        assert_eq!(
            run.tick(&env),
            StrikeTick::Aborted(AbortReason::PreconditionLost)
        );
        // No strike was delivered on the aborting tick.
        assert_eq!(run.strikes_delivered(), 1);
    }

    #[test]
    fn terminal_runs_refuse_further_ticks() {
        let world = TestWorld::new(&[(0, Vec3::ZERO), (1, Vec3::new(5.0, 0.0, 0.0))]);
        let carrying = Carrying(false);
        let mut run = lightning_run(1);

        let env = Env::with_all(&world, &carrying);
        assert!(matches!(run.tick(&env), StrikeTick::Aborted(_)));
        assert_eq!(run.tick(&env), StrikeTick::AlreadyTerminal);
        assert_eq!(run.tick(&env), StrikeTick::AlreadyTerminal);
    }
}
