//! Data-driven configuration loading.
//!
//! A single TOML file overrides gameplay tuning and seeds the global
//! cooldown-default table. Everything is optional; an empty file yields
//! the shipped defaults. Cooldown keys use the same `"element:slot"` form
//! the admin commands use.
//!
//! ```toml
//! [tuning]
//! strike_count = 5
//! max_range = 40.0
//!
//! [cooldowns]
//! "fire:1" = 25
//! "lightning:1" = 0
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use wyrm_core::{AbilityKey, GameConfig};

/// Optional tuning overrides; absent fields keep their shipped defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuningSpec {
    pub strike_count: Option<u8>,
    pub strike_interval_ms: Option<u64>,
    pub max_range: Option<f32>,
    pub cone_dot_threshold: Option<f32>,
    pub acquisition_cone_radians: Option<f32>,
    pub strike_damage: Option<f32>,
    pub mastery_threshold: Option<u32>,
}

impl TuningSpec {
    fn apply(&self, config: &mut GameConfig) {
        if let Some(value) = self.strike_count {
            config.strike_count = value;
        }
        if let Some(value) = self.strike_interval_ms {
            config.strike_interval_ms = value;
        }
        if let Some(value) = self.max_range {
            config.max_range = value;
        }
        if let Some(value) = self.cone_dot_threshold {
            config.cone_dot_threshold = value;
        }
        if let Some(value) = self.acquisition_cone_radians {
            config.acquisition_cone_radians = value;
        }
        if let Some(value) = self.strike_damage {
            config.strike_damage = value;
        }
        if let Some(value) = self.mastery_threshold {
            config.mastery_threshold = value;
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    tuning: TuningSpec,
    cooldowns: BTreeMap<String, u32>,
}

/// Result of loading a config file.
#[derive(Clone, Debug)]
pub struct LoadedConfig {
    pub config: GameConfig,
    /// Seed values for the cooldown store's global default table.
    pub cooldown_defaults: Vec<(AbilityKey, u32)>,
}

/// Loads gameplay configuration from TOML.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<LoadedConfig> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Parses config from a TOML string.
    pub fn from_toml(raw: &str) -> Result<LoadedConfig> {
        let file: ConfigFile = toml::from_str(raw).context("failed to parse TOML")?;

        let mut config = GameConfig::default();
        file.tuning.apply(&mut config);

        let mut cooldown_defaults = Vec::new();
        for (raw_key, seconds) in &file.cooldowns {
            let key: AbilityKey = raw_key
                .parse()
                .with_context(|| format!("bad cooldown key {raw_key:?}"))?;
            cooldown_defaults.push((key, *seconds));
        }

        Ok(LoadedConfig {
            config,
            cooldown_defaults,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wyrm_core::{AbilitySlot, Element};

    #[test]
    fn empty_input_yields_shipped_defaults() {
        let loaded = ConfigLoader::from_toml("").unwrap();
        assert_eq!(loaded.config, GameConfig::default());
        assert!(loaded.cooldown_defaults.is_empty());
    }

    #[test]
    fn tuning_and_cooldown_overrides_are_applied() {
        let loaded = ConfigLoader::from_toml(
            r#"
            [tuning]
            strike_count = 5
            max_range = 40.0

            [cooldowns]
            "fire:2" = 25
            "lightning:1" = 0
            "#,
        )
        .unwrap();

        assert_eq!(loaded.config.strike_count, 5);
        assert_eq!(loaded.config.max_range, 40.0);
        assert_eq!(loaded.config.mastery_threshold, 10);
        assert_eq!(
            loaded.cooldown_defaults,
            vec![
                (AbilityKey::new(Element::Fire, AbilitySlot::Secondary), 25),
                (AbilityKey::primary(Element::Lightning), 0),
            ]
        );
    }

    #[test]
    fn bad_cooldown_keys_are_rejected() {
        assert!(ConfigLoader::from_toml("[cooldowns]\n\"plasma:1\" = 10").is_err());
        assert!(ConfigLoader::from_toml("[cooldowns]\n\"fire:9\" = 10").is_err());
    }

    #[test]
    fn unknown_tuning_fields_are_rejected() {
        assert!(ConfigLoader::from_toml("[tuning]\nstrike_legs = 4").is_err());
    }
}
