//! Topic-based event bus.
//!
//! Consumers subscribe per topic so a HUD that only renders unlock toasts
//! never wakes up for strike ticks. Publishing is best-effort: with no
//! subscribers (or a contended lock) the event is simply dropped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use super::types::{AbilityEvent, ProgressEvent};

/// Topics for event routing.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Ability invocations and strike-run lifecycle
    Ability,
    /// Chronicle/achievement unlocks and resets
    Progress,
}

/// Event wrapper that carries the topic and typed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Ability(AbilityEvent),
    Progress(ProgressEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Ability(_) => Topic::Ability,
            Event::Progress(_) => Topic::Progress,
        }
    }
}

/// Per-topic broadcast channels behind one shared handle.
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<Event>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a bus with the given per-topic channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut channels = HashMap::new();
        channels.insert(Topic::Ability, broadcast::channel(capacity).0);
        channels.insert(Topic::Progress, broadcast::channel(capacity).0);

        Self {
            channels: Arc::new(RwLock::new(channels)),
        }
    }

    /// Publishes an event to its topic.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        // try_read keeps publish non-blocking from async context; events
        // are best-effort so a contended lock just drops the event.
        match self.channels.try_read() {
            Ok(channels) => {
                if let Some(tx) = channels.get(&topic)
                    && tx.send(event).is_err()
                {
                    // No subscribers on this topic right now.
                    tracing::trace!(target: "runtime::bus", "no subscribers for topic {topic:?}");
                }
            }
            Err(_) => {
                tracing::debug!(target: "runtime::bus", "bus lock contended, dropping event for {topic:?}");
            }
        }
    }

    /// Subscribes to a single topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        let channels = self
            .channels
            .try_read()
            .expect("event bus channels poisoned");
        channels
            .get(&topic)
            .expect("topic channel not initialized")
            .subscribe()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
