//! Static game content and data-driven configuration loading.
//!
//! This crate houses the fixed catalogs consumed by the runtime at
//! startup:
//! - Ability definitions (names, aliases, built-in cooldowns)
//! - Chronicle page catalog (unlock triggers and page text)
//! - Achievement catalog
//! - Gameplay tuning / cooldown-default overrides (data-driven via TOML)
//!
//! Content never appears in mutable game state; engines copy what they
//! need at construction.

pub mod abilities;
pub mod achievements;
pub mod pages;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use abilities::{ABILITIES, by_alias, definition};
pub use achievements::ACHIEVEMENTS;
pub use pages::{CHRONICLE, page};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadedConfig, TuningSpec};
