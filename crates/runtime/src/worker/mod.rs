//! Worker task that owns the authoritative gameplay stores.
//!
//! Receives commands from [`RuntimeHandle`](crate::api::RuntimeHandle),
//! drives in-flight strike runs on a fixed-period tick, and publishes
//! events on the bus. All mutation happens here, on one task — commands
//! from other contexts are serialized by the channel, so the stores never
//! need locks of their own.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use wyrm_core::{
    AbilityDefinition, AbilityKey, AchievementEngine, CooldownStore, Element, EntityId, Env,
    Invocation, InvocationGate, LoadoutOracle, PageProgress, ProgressLedger, SpatialOracle,
    StrikeRun, StrikeTick, UnlockEngine,
};

use crate::api::{InvocationOutcome, Result, RuntimeError};
use crate::clock::Clock;
use crate::events::{AbilityEvent, Event, EventBus, ProgressEvent, RejectReason};
use crate::snapshot::CoreSnapshot;
use crate::world::WorldAdapter;

/// Commands the handle marshals onto the worker task.
pub(crate) enum Command {
    Invoke {
        actor: EntityId,
        key: AbilityKey,
        reply: oneshot::Sender<Result<InvocationOutcome>>,
    },
    RecordAttunement {
        actor: EntityId,
        element: Element,
        reply: oneshot::Sender<bool>,
    },
    RemainingCooldown {
        actor: EntityId,
        key: AbilityKey,
        reply: oneshot::Sender<u32>,
    },
    CooldownsFor {
        actor: EntityId,
        reply: oneshot::Sender<Vec<(AbilityKey, u32)>>,
    },
    SetGlobalDefault {
        key: AbilityKey,
        seconds: u32,
        reply: oneshot::Sender<()>,
    },
    RemoveGlobalDefault {
        key: AbilityKey,
        reply: oneshot::Sender<()>,
    },
    GlobalDefaults {
        reply: oneshot::Sender<Vec<(AbilityKey, u32)>>,
    },
    AdjustActive {
        key: AbilityKey,
        new_max: u32,
        reply: oneshot::Sender<usize>,
    },
    UnlockedPages {
        actor: EntityId,
        reply: oneshot::Sender<Vec<u8>>,
    },
    PageProgress {
        actor: EntityId,
        ordinal: u8,
        reply: oneshot::Sender<Option<PageProgress>>,
    },
    UnlockedAchievements {
        actor: EntityId,
        reply: oneshot::Sender<Vec<u8>>,
    },
    ResetProgress {
        actor: EntityId,
        reply: oneshot::Sender<()>,
    },
    ActorDeparted {
        actor: EntityId,
        reply: oneshot::Sender<()>,
    },
    ActorReturned {
        actor: EntityId,
        reply: oneshot::Sender<()>,
    },
    CancelRun {
        actor: EntityId,
        key: AbilityKey,
        reply: oneshot::Sender<bool>,
    },
    Snapshot {
        reply: oneshot::Sender<CoreSnapshot>,
    },
    Restore {
        snapshot: CoreSnapshot,
        reply: oneshot::Sender<()>,
    },
}

/// Background task processing gameplay commands and strike ticks.
pub(crate) struct GameWorker {
    pub(crate) gate: InvocationGate,
    pub(crate) abilities: Vec<AbilityDefinition>,
    pub(crate) cooldowns: CooldownStore,
    pub(crate) ledger: ProgressLedger,
    pub(crate) chronicle: UnlockEngine,
    pub(crate) achievements: AchievementEngine,
    pub(crate) runs: HashMap<(EntityId, AbilityKey), StrikeRun>,
    pub(crate) world: Arc<dyn WorldAdapter>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) command_rx: mpsc::Receiver<Command>,
    pub(crate) bus: EventBus,
}

impl GameWorker {
    /// Main worker loop: commands and the strike ticker, interleaved on
    /// one task. Exits when every handle is dropped.
    pub(crate) async fn run(mut self) {
        let period = Duration::from_millis(self.gate.config().strike_interval_ms);
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                maybe_cmd = self.command_rx.recv() => {
                    match maybe_cmd {
                        Some(cmd) => self.handle_command(cmd),
                        None => break,
                    }
                }
                _ = ticker.tick() => self.drive_runs(),
            }
        }
        debug!(target: "runtime::worker", "worker shutting down");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Invoke { actor, key, reply } => {
                let _ = reply.send(self.invoke(actor, key));
            }
            Command::RecordAttunement { actor, element, reply } => {
                let newly = self.ledger.record_attuned(actor, element);
                if newly {
                    debug!(target: "runtime::worker", %actor, %element, "attunement recorded");
                    self.run_unlock_checks(actor);
                }
                let _ = reply.send(newly);
            }
            Command::RemainingCooldown { actor, key, reply } => {
                let now = self.clock.now();
                let _ = reply.send(self.cooldowns.remaining(actor, key, now));
            }
            Command::CooldownsFor { actor, reply } => {
                let now = self.clock.now();
                let _ = reply.send(self.cooldowns.all_remaining(actor, now));
            }
            Command::SetGlobalDefault { key, seconds, reply } => {
                self.cooldowns.set_global_default(key, seconds);
                info!(target: "runtime::worker", %key, seconds, "global cooldown default set");
                let _ = reply.send(());
            }
            Command::RemoveGlobalDefault { key, reply } => {
                self.cooldowns.remove_global_default(key);
                info!(target: "runtime::worker", %key, "global cooldown default removed");
                let _ = reply.send(());
            }
            Command::GlobalDefaults { reply } => {
                let _ = reply.send(self.cooldowns.global_defaults());
            }
            Command::AdjustActive { key, new_max, reply } => {
                let now = self.clock.now();
                let adjusted = self.cooldowns.adjust_active(key, new_max, now);
                if adjusted > 0 {
                    info!(
                        target: "runtime::worker",
                        %key,
                        new_max,
                        adjusted,
                        "active cooldowns adjusted"
                    );
                }
                let _ = reply.send(adjusted);
            }
            Command::UnlockedPages { actor, reply } => {
                let _ = reply.send(self.chronicle.unlocked(actor));
            }
            Command::PageProgress { actor, ordinal, reply } => {
                let _ = reply.send(self.chronicle.progress(actor, ordinal, &self.ledger));
            }
            Command::UnlockedAchievements { actor, reply } => {
                let _ = reply.send(self.achievements.unlocked(actor));
            }
            Command::ResetProgress { actor, reply } => {
                self.ledger.reset(actor);
                self.chronicle.reset(actor);
                self.achievements.reset(actor);
                info!(target: "runtime::worker", %actor, "progress reset");
                self.bus
                    .publish(Event::Progress(ProgressEvent::ProgressReset { actor }));
                let _ = reply.send(());
            }
            Command::ActorDeparted { actor, reply } => {
                self.cooldowns.clear_all(actor);
                let cancelled = self.cancel_runs_for(actor);
                debug!(target: "runtime::worker", %actor, cancelled, "actor departed");
                let _ = reply.send(());
            }
            Command::ActorReturned { actor, reply } => {
                let now = self.clock.now();
                self.cooldowns.purge_expired(actor, now);
                let _ = reply.send(());
            }
            Command::CancelRun { actor, key, reply } => {
                let existed = self.runs.remove(&(actor, key)).is_some();
                if existed {
                    debug!(target: "runtime::worker", %actor, %key, "strike run cancelled");
                }
                let _ = reply.send(existed);
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            Command::Restore { snapshot, reply } => {
                self.restore(&snapshot);
                let _ = reply.send(());
            }
        }
    }

    fn invoke(&mut self, actor: EntityId, key: AbilityKey) -> Result<InvocationOutcome> {
        let Some(definition) = self.abilities.iter().find(|def| def.key == key).copied() else {
            return Err(RuntimeError::UnknownAbility(key));
        };

        let now = self.clock.now();
        let world = self.world.as_ref();
        let spatial: &dyn SpatialOracle = world;
        let loadout: &dyn LoadoutOracle = world;
        let env = Env::with_all(spatial, loadout);

        let outcome = match self
            .gate
            .try_invoke(actor, &definition, &mut self.cooldowns, &env, now)
        {
            Invocation::Accepted {
                run,
                target,
                cooldown_secs,
            } => {
                // The cooldown committed by the gate is what guarantees a
                // single live run per (actor, key).
                self.runs.insert((actor, key), run);
                self.ledger.increment(actor, key);
                self.run_unlock_checks(actor);
                info!(target: "runtime::worker", %actor, %key, to = %target, cooldown_secs, "invocation accepted");
                self.bus
                    .publish(Event::Ability(AbilityEvent::Invoked { actor, key, target }));
                InvocationOutcome::Accepted {
                    target,
                    cooldown_secs,
                }
            }
            Invocation::RejectedOnCooldown { remaining } => {
                self.reject(actor, key, RejectReason::OnCooldown { remaining });
                InvocationOutcome::RejectedOnCooldown { remaining }
            }
            Invocation::RejectedPrecondition => {
                self.reject(actor, key, RejectReason::Precondition);
                InvocationOutcome::RejectedPrecondition
            }
            Invocation::RejectedNoTarget => {
                self.reject(actor, key, RejectReason::NoTarget);
                InvocationOutcome::RejectedNoTarget
            }
        };

        Ok(outcome)
    }

    fn reject(&self, actor: EntityId, key: AbilityKey, reason: RejectReason) {
        debug!(target: "runtime::worker", %actor, %key, ?reason, "invocation rejected");
        self.bus
            .publish(Event::Ability(AbilityEvent::InvocationRejected {
                actor,
                key,
                reason,
            }));
    }

    /// Advances every in-flight run by one tick and drops terminal ones.
    fn drive_runs(&mut self) {
        if self.runs.is_empty() {
            return;
        }

        let world = self.world.as_ref();
        let spatial: &dyn SpatialOracle = world;
        let loadout: &dyn LoadoutOracle = world;
        let damage = self.gate.config().strike_damage;

        let mut finished = Vec::new();
        for (&(actor, key), run) in self.runs.iter_mut() {
            let env = Env::with_all(spatial, loadout);
            match run.tick(&env) {
                StrikeTick::Struck {
                    target,
                    retargeted_from,
                    strikes_delivered,
                    total_strikes,
                    completed,
                } => {
                    if let Some(from) = retargeted_from {
                        debug!(target: "runtime::worker", %actor, %key, %from, to = %target, "retargeted");
                        self.bus.publish(Event::Ability(AbilityEvent::Retargeted {
                            actor,
                            key,
                            from,
                            to: target,
                        }));
                    }

                    world.apply_strike(actor, target, damage);
                    self.bus.publish(Event::Ability(AbilityEvent::Struck {
                        actor,
                        key,
                        target,
                        strike: strikes_delivered,
                        total: total_strikes,
                    }));

                    if completed {
                        debug!(target: "runtime::worker", %actor, %key, "strike run completed");
                        self.bus
                            .publish(Event::Ability(AbilityEvent::Completed { actor, key }));
                        finished.push((actor, key));
                    }
                }
                StrikeTick::Aborted(reason) => {
                    warn!(target: "runtime::worker", %actor, %key, ?reason, "strike run aborted");
                    self.bus.publish(Event::Ability(AbilityEvent::Aborted {
                        actor,
                        key,
                        reason,
                    }));
                    finished.push((actor, key));
                }
                StrikeTick::AlreadyTerminal => finished.push((actor, key)),
            }
        }

        for slot in finished {
            self.runs.remove(&slot);
        }
    }

    /// Re-evaluates chronicle pages and achievements after a ledger
    /// mutation, publishing one notice per fresh unlock.
    fn run_unlock_checks(&mut self, actor: EntityId) {
        for unlocked in self.chronicle.on_ledger_changed(actor, &self.ledger) {
            info!(
                target: "runtime::worker",
                %actor,
                ordinal = unlocked.ordinal,
                title = %unlocked.title,
                "chronicle page unlocked"
            );
            self.bus
                .publish(Event::Progress(ProgressEvent::PageUnlocked {
                    actor,
                    ordinal: unlocked.ordinal,
                    title: unlocked.title,
                }));
        }

        for earned in self.achievements.evaluate(actor, &self.ledger, &self.chronicle) {
            info!(
                target: "runtime::worker",
                %actor,
                ordinal = earned.ordinal,
                name = %earned.name,
                "achievement unlocked"
            );
            self.bus
                .publish(Event::Progress(ProgressEvent::AchievementUnlocked {
                    actor,
                    ordinal: earned.ordinal,
                    name: earned.name,
                }));
        }
    }

    fn cancel_runs_for(&mut self, actor: EntityId) -> usize {
        let before = self.runs.len();
        self.runs.retain(|&(owner, _), _| owner != actor);
        before - self.runs.len()
    }

    fn snapshot(&self) -> CoreSnapshot {
        let now = self.clock.now();
        let (cooldowns, global_defaults) = self.cooldowns.export(now);
        let (usage, attuned) = self.ledger.export();
        CoreSnapshot {
            cooldowns,
            global_defaults,
            usage,
            attuned,
            unlocked_pages: self.chronicle.export(),
            unlocked_achievements: self.achievements.export(),
        }
    }

    fn restore(&mut self, snapshot: &CoreSnapshot) {
        let now = self.clock.now();
        self.cooldowns
            .restore(&snapshot.cooldowns, &snapshot.global_defaults, now);
        self.ledger.restore(&snapshot.usage, &snapshot.attuned);
        self.chronicle.restore(&snapshot.unlocked_pages);
        self.achievements.restore(&snapshot.unlocked_achievements);
        info!(target: "runtime::worker", "core state restored from snapshot");
    }
}
