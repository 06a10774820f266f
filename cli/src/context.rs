use chrono::TimeDelta;
use hitsplat_core::fight::{Fight, SegmentConfig};
use hitsplat_core::game_data::WeaponCatalog;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Bundled fallback catalog, used until the user points at their own.
const DEFAULT_WEAPONS_JSON: &str = include_str!("../data/weapons.json");

/// Persisted CLI settings, stored via confy in the platform config dir.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Weapon catalog JSON. None means the bundled catalog.
    pub weapons_path: Option<PathBuf>,
    /// Names treated as bosses on top of the built-in list.
    pub extra_boss_names: Vec<String>,
    pub inactivity_timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            weapons_path: None,
            extra_boss_names: Vec::new(),
            inactivity_timeout_secs: 60,
        }
    }
}

impl CliConfig {
    pub fn load() -> Self {
        match confy::load("hitsplat", "config") {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn store(&self) -> Result<(), confy::ConfyError> {
        confy::store("hitsplat", "config", self)
    }

    pub fn segment_config(&self) -> SegmentConfig {
        let mut config = SegmentConfig {
            inactivity_timeout: TimeDelta::seconds(self.inactivity_timeout_secs as i64),
            ..SegmentConfig::default()
        };
        for name in &self.extra_boss_names {
            config.boss_names.insert(name.clone());
        }
        config
    }
}

/// Holds all shared state for the CLI session.
pub struct CliContext {
    pub config: CliConfig,
    pub catalog: WeaponCatalog,
    /// Fights from the most recent parse-file.
    pub fights: Vec<Fight>,
}

impl CliContext {
    pub fn new() -> Self {
        let config = CliConfig::load();
        let catalog = match &config.weapons_path {
            Some(path) => WeaponCatalog::from_path(path).unwrap_or_else(|err| {
                tracing::warn!(%err, "failed to load weapon catalog, using bundled data");
                bundled_catalog()
            }),
            None => bundled_catalog(),
        };
        Self {
            config,
            catalog,
            fights: Vec::new(),
        }
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}

fn bundled_catalog() -> WeaponCatalog {
    WeaponCatalog::from_json_str(DEFAULT_WEAPONS_JSON).unwrap_or_else(|err| {
        tracing::error!(%err, "bundled weapon catalog is invalid");
        WeaponCatalog::default()
    })
}
