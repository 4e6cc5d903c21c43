//! Core identity and time primitives shared by every store.
mod common;

pub use common::{EntityId, Millis, millis_to_seconds_ceil, seconds_to_millis};
