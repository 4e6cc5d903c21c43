//! Client-facing handle to interact with the runtime.
//!
//! Every operation — gameplay and administrative alike — is marshaled
//! onto the single worker task through the command channel, which is what
//! gives the stores their single-writer discipline. The handle is cheap
//! to clone and safe to use from any task.

use tokio::sync::{broadcast, mpsc, oneshot};

use wyrm_core::{AbilityKey, Element, EntityId, PageProgress};

use crate::events::{Event, EventBus, Topic};
use crate::snapshot::CoreSnapshot;
use crate::worker::Command;

use super::{InvocationOutcome, Result, RuntimeError};

/// Clonable front door to the worker task.
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, bus: EventBus) -> Self {
        Self { command_tx, bus }
    }

    async fn request<T>(&self, command: Command, reply_rx: oneshot::Receiver<T>) -> Result<T> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::WorkerGone)?;
        reply_rx.await.map_err(|_| RuntimeError::WorkerGone)
    }

    // ========================================================================
    // Gameplay
    // ========================================================================

    /// Attempts to invoke an ability for an actor.
    pub async fn invoke(&self, actor: EntityId, key: AbilityKey) -> Result<InvocationOutcome> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::Invoke { actor, key, reply }, reply_rx)
            .await?
    }

    /// Records that an actor attuned (equipped) a fragment element.
    /// Returns true on the first attunement of that element.
    pub async fn record_attunement(&self, actor: EntityId, element: Element) -> Result<bool> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::RecordAttunement { actor, element, reply }, reply_rx)
            .await
    }

    /// Cancels an in-flight strike run, if one exists. Idempotent.
    pub async fn cancel_run(&self, actor: EntityId, key: AbilityKey) -> Result<bool> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::CancelRun { actor, key, reply }, reply_rx)
            .await
    }

    // ========================================================================
    // Status display
    // ========================================================================

    pub async fn remaining_cooldown(&self, actor: EntityId, key: AbilityKey) -> Result<u32> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::RemainingCooldown { actor, key, reply }, reply_rx)
            .await
    }

    pub async fn cooldowns_for(&self, actor: EntityId) -> Result<Vec<(AbilityKey, u32)>> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::CooldownsFor { actor, reply }, reply_rx)
            .await
    }

    pub async fn unlocked_pages(&self, actor: EntityId) -> Result<Vec<u8>> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::UnlockedPages { actor, reply }, reply_rx)
            .await
    }

    pub async fn page_progress(
        &self,
        actor: EntityId,
        ordinal: u8,
    ) -> Result<Option<PageProgress>> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::PageProgress { actor, ordinal, reply }, reply_rx)
            .await
    }

    pub async fn unlocked_achievements(&self, actor: EntityId) -> Result<Vec<u8>> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::UnlockedAchievements { actor, reply }, reply_rx)
            .await
    }

    // ========================================================================
    // Administration
    // ========================================================================

    /// Sets the global default duration for a key. Safe at arbitrary
    /// times; affects future commits only (pair with
    /// [`adjust_active`](Self::adjust_active) to touch live timers).
    pub async fn set_global_default(&self, key: AbilityKey, seconds: u32) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::SetGlobalDefault { key, seconds, reply }, reply_rx)
            .await
    }

    pub async fn remove_global_default(&self, key: AbilityKey) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::RemoveGlobalDefault { key, reply }, reply_rx)
            .await
    }

    pub async fn global_defaults(&self) -> Result<Vec<(AbilityKey, u32)>> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::GlobalDefaults { reply }, reply_rx)
            .await
    }

    /// Caps live timers for a key to a new maximum (0 clears them).
    /// Returns how many actors were adjusted.
    pub async fn adjust_active(&self, key: AbilityKey, new_max: u32) -> Result<usize> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::AdjustActive { key, new_max, reply }, reply_rx)
            .await
    }

    /// Clears all progress and unlocks for an actor.
    pub async fn reset_progress(&self, actor: EntityId) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::ResetProgress { actor, reply }, reply_rx)
            .await
    }

    // ========================================================================
    // Lifecycle hooks
    // ========================================================================

    /// Actor left the world (death/disconnect): clears cooldowns and
    /// cancels any in-flight run.
    pub async fn actor_departed(&self, actor: EntityId) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::ActorDeparted { actor, reply }, reply_rx)
            .await
    }

    /// Actor returned to the world: purges their expired cooldowns.
    pub async fn actor_returned(&self, actor: EntityId) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::ActorReturned { actor, reply }, reply_rx)
            .await
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    pub async fn snapshot(&self) -> Result<CoreSnapshot> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::Snapshot { reply }, reply_rx).await
    }

    pub async fn restore(&self, snapshot: CoreSnapshot) -> Result<()> {
        let (reply, reply_rx) = oneshot::channel();
        self.request(Command::Restore { snapshot, reply }, reply_rx)
            .await
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Subscribes to one event topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.bus.subscribe(topic)
    }
}
