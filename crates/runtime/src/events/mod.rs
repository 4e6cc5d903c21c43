//! Topic-based event routing for downstream consumers.
mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{AbilityEvent, ProgressEvent, RejectReason};
