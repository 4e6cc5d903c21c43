//! Runtime orchestration for the gameplay core.
//!
//! This crate wires the pure engines from `wyrm-core` into a running
//! service: a single worker task owns every mutable store, a clonable
//! [`RuntimeHandle`] marshals gameplay and administrative commands onto
//! that task, a fixed-period ticker drives in-flight strike runs, and a
//! topic-based [`EventBus`] carries notifications to presentation
//! collaborators.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`world`] defines the host-world adapter plus an in-memory sim world
//! - [`clock`] supplies time (system or manual)
//! - [`snapshot`] holds the serializable persistence types
//! - `worker` keeps the background task internal to the crate
pub mod api;
pub mod clock;
pub mod events;
pub mod runtime;
pub mod snapshot;
pub mod world;

mod worker;

pub use api::{InvocationOutcome, Result, RuntimeError, RuntimeHandle};
pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{AbilityEvent, Event, EventBus, ProgressEvent, RejectReason, Topic};
pub use runtime::{Runtime, RuntimeBuilder};
pub use snapshot::CoreSnapshot;
pub use world::{SimWorld, WorldAdapter};
