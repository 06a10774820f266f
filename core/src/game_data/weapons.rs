//! Weapon reference data
//!
//! The catalog maps equipment item ids to attack speed and combat
//! class. It is injected, read-only data loaded from JSON so the table
//! can be updated without a code change.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Combat style a weapon trains; selects which boosted stats matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatClass {
    Melee,
    Ranged,
    Magic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    #[serde(default)]
    pub name: String,
    /// Ticks between successive swings.
    pub speed: i32,
    pub combat_class: CombatClass,
}

#[derive(Debug, Error)]
pub enum WeaponCatalogError {
    #[error("failed to read weapon catalog {path}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid weapon catalog JSON")]
    Parse(#[from] serde_json::Error),
}

/// Read-only item id -> weapon lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeaponCatalog {
    weapons: HashMap<i32, Weapon>,
}

impl WeaponCatalog {
    pub fn from_json_str(json: &str) -> Result<Self, WeaponCatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WeaponCatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WeaponCatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn from_entries<I: IntoIterator<Item = (i32, Weapon)>>(entries: I) -> Self {
        Self {
            weapons: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, item_id: i32) -> Option<&Weapon> {
        self.weapons.get(&item_id)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}
