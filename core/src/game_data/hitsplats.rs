//! Hitsplat name classification
//!
//! The plugin logs every hitsplat by its client enum name. Only the
//! `*_ME` family describes damage attempted by the logged-in player;
//! those are the segmentation triggers.

use phf::{Set, phf_set};

/// Regular damage dealt by the logged-in player, one per splat colour.
pub static DAMAGE_ME_HITSPLATS: Set<&'static str> = phf_set! {
    "DAMAGE_ME",
    "DAMAGE_ME_CYAN",
    "DAMAGE_ME_ORANGE",
    "DAMAGE_ME_WHITE",
    "DAMAGE_ME_YELLOW",
};

/// Max-hit variants of the player-dealt splats.
pub static DAMAGE_MAX_ME_HITSPLATS: Set<&'static str> = phf_set! {
    "DAMAGE_MAX_ME",
    "DAMAGE_MAX_ME_CYAN",
    "DAMAGE_MAX_ME_ORANGE",
    "DAMAGE_MAX_ME_WHITE",
    "DAMAGE_MAX_ME_YELLOW",
};

/// A zero splat from the player's own missed swing.
pub const BLOCK_ME: &str = "BLOCK_ME";

/// True for hitsplats that represent the logged-in player attempting
/// damage, whether it landed or not.
pub fn is_damage_capable(hitsplat: &str) -> bool {
    hitsplat == BLOCK_ME
        || DAMAGE_ME_HITSPLATS.contains(hitsplat)
        || DAMAGE_MAX_ME_HITSPLATS.contains(hitsplat)
}

/// True for the max-hit variants only.
pub fn is_max_hit(hitsplat: &str) -> bool {
    DAMAGE_MAX_ME_HITSPLATS.contains(hitsplat)
}
