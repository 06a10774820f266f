pub mod bosses;
pub mod hitsplats;
mod weapons;

pub use bosses::{default_boss_names, default_cox_monsters, default_toa_monsters};
pub use weapons::{CombatClass, Weapon, WeaponCatalog, WeaponCatalogError};

/// One game tick in real seconds.
pub const TICK_SECONDS: f64 = 0.6;

/// One game tick in milliseconds.
pub const TICK_MS: i64 = 600;
