//! Runtime orchestrator and builder.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use wyrm_core::{
    AbilityDefinition, AbilityKey, AchievementEngine, AchievementSpec, CooldownStore, GameConfig,
    InvocationGate, PageSpec, ProgressLedger, UnlockEngine,
};

use crate::api::RuntimeHandle;
use crate::clock::{Clock, SystemClock};
use crate::events::{Event, EventBus, Topic};
use crate::worker::GameWorker;
use crate::world::WorldAdapter;

/// Builder for [`Runtime`]. Catalogs default to the shipped content; tests
/// and tools can substitute their own.
pub struct RuntimeBuilder {
    world: Arc<dyn WorldAdapter>,
    clock: Arc<dyn Clock>,
    config: GameConfig,
    abilities: Vec<AbilityDefinition>,
    pages: Vec<PageSpec>,
    achievements: Vec<AchievementSpec>,
    cooldown_defaults: Vec<(AbilityKey, u32)>,
    command_capacity: usize,
    bus_capacity: usize,
}

impl RuntimeBuilder {
    fn new(world: Arc<dyn WorldAdapter>) -> Self {
        Self {
            world,
            clock: Arc::new(SystemClock::new()),
            config: GameConfig::default(),
            abilities: wyrm_content::ABILITIES.to_vec(),
            pages: wyrm_content::CHRONICLE.to_vec(),
            achievements: wyrm_content::ACHIEVEMENTS.to_vec(),
            cooldown_defaults: Vec::new(),
            command_capacity: 64,
            bus_capacity: 100,
        }
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seeds the global cooldown-default table (e.g. from the content
    /// crate's config loader).
    pub fn cooldown_defaults(mut self, defaults: Vec<(AbilityKey, u32)>) -> Self {
        self.cooldown_defaults = defaults;
        self
    }

    pub fn abilities(mut self, abilities: Vec<AbilityDefinition>) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn pages(mut self, pages: Vec<PageSpec>) -> Self {
        self.pages = pages;
        self
    }

    pub fn achievements(mut self, achievements: Vec<AchievementSpec>) -> Self {
        self.achievements = achievements;
        self
    }

    /// Spawns the worker task and returns the running runtime.
    pub fn start(self) -> Runtime {
        let (command_tx, command_rx) = mpsc::channel(self.command_capacity);
        let bus = EventBus::with_capacity(self.bus_capacity);

        let mut cooldowns = CooldownStore::new();
        for (key, seconds) in &self.cooldown_defaults {
            cooldowns.set_global_default(*key, *seconds);
        }

        let worker = GameWorker {
            gate: InvocationGate::new(self.config.clone()),
            abilities: self.abilities,
            cooldowns,
            ledger: ProgressLedger::new(),
            chronicle: UnlockEngine::new(&self.pages, self.config.mastery_threshold),
            achievements: AchievementEngine::new(&self.achievements, self.config.mastery_threshold),
            runs: Default::default(),
            world: self.world,
            clock: self.clock,
            command_rx,
            bus: bus.clone(),
        };
        let task = tokio::spawn(worker.run());

        Runtime {
            handle: RuntimeHandle::new(command_tx, bus.clone()),
            bus,
            task,
        }
    }
}

/// A running gameplay core: one worker task plus the handles into it.
pub struct Runtime {
    handle: RuntimeHandle,
    bus: EventBus,
    task: JoinHandle<()>,
}

impl Runtime {
    pub fn builder(world: Arc<dyn WorldAdapter>) -> RuntimeBuilder {
        RuntimeBuilder::new(world)
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }

    /// Stops the worker and waits for it to wind down. Outstanding handle
    /// clones become inert ([`RuntimeError::WorkerGone`](crate::RuntimeError)).
    pub async fn shutdown(self) {
        drop(self.handle);
        self.task.abort();
        let _ = self.task.await;
    }
}
