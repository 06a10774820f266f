//! Per-player performance replay.
//!
//! Replays a single fight's events against an injected weapon catalog
//! and reports, per player, how many swings landed versus how many the
//! equipped weapons' attack speeds allowed, how boosted each swing was,
//! and how much of the fight the player spent actively attacking.


use hashbrown::{HashMap, HashSet};
use serde::Serialize;

use crate::combat_log::{LogEvent, SkillLevels};
use crate::fight::Fight;
use crate::game_data::{CombatClass, TICK_MS, TICK_SECONDS, WeaponCatalog, bosses};

const BASE_LEVEL: i32 = 99;

/// Boost spans and raid rosters. The spans are the maximum boost above
/// 99 the strongest available potion gives in that context.
#[derive(Debug, Clone)]
pub struct EvaluatorConfig {
    pub cox_monsters: HashSet<String>,
    pub toa_monsters: HashSet<String>,
    pub melee_boost_span: i32,
    pub ranged_boost_span: i32,
    pub magic_boost_span: i32,
    /// Overload span inside Chambers of Xeric, all styles.
    pub cox_boost_span: i32,
    /// Smelling-salt span inside Tombs of Amascut, all styles.
    pub toa_boost_span: i32,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            cox_monsters: bosses::default_cox_monsters(),
            toa_monsters: bosses::default_toa_monsters(),
            melee_boost_span: 19,
            ranged_boost_span: 13,
            magic_boost_span: 13,
            cox_boost_span: 21,
            toa_boost_span: 26,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RaidContext {
    Open,
    ChambersOfXeric,
    TombsOfAmascut,
}

/// One player's result row for one fight. Derived on demand, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FightPerformance {
    pub active_time_secs: f64,
    pub actual_weapon_hits: u32,
    /// Sum of per-swing boost weights; divide by `actual_weapon_hits`
    /// for a percentage.
    pub boosted_hits: f64,
    pub expected_weapon_hits: u32,
    pub has_boosted_levels: bool,
}

/// Running replay state for one player.
#[derive(Debug)]
struct PlayerReplay {
    actual_weapon_hits: u32,
    boosted_hits: f64,
    /// Starts at one; the model grants an immediate first swing
    /// regardless of weapon speed.
    expected_weapon_hits: u32,
    expected_last_ms: i64,
    previous_weapon_speed: i32,
    current_weapon_speed: i32,
    current_class: Option<CombatClass>,
    last_boost: Option<SkillLevels>,
    active_time_secs: f64,
    has_boosted_levels: bool,
}

impl Default for PlayerReplay {
    fn default() -> Self {
        Self {
            actual_weapon_hits: 0,
            boosted_hits: 0.0,
            expected_weapon_hits: 1,
            expected_last_ms: 0,
            previous_weapon_speed: 0,
            current_weapon_speed: 0,
            current_class: None,
            last_boost: None,
            active_time_secs: 0.0,
            has_boosted_levels: false,
        }
    }
}

pub struct PerformanceEvaluator<'a> {
    catalog: &'a WeaponCatalog,
    config: EvaluatorConfig,
}

impl<'a> PerformanceEvaluator<'a> {
    pub fn new(catalog: &'a WeaponCatalog, config: EvaluatorConfig) -> Self {
        Self { catalog, config }
    }

    /// Single pass over the fight's events. Players that never equip a
    /// weapon or drink a boost produce no row.
    pub fn evaluate(&self, fight: &Fight) -> HashMap<String, FightPerformance> {
        let Some(end_ms) = fight.last_line().map(|l| l.epoch_ms()) else {
            return HashMap::new();
        };
        let context = self.raid_context(fight);
        let mut players: HashMap<String, PlayerReplay> = HashMap::new();

        for line in &fight.data {
            match &line.event {
                LogEvent::PlayerEquipment { slots } => {
                    let Some(weapon) = slots.iter().find_map(|id| self.catalog.get(*id)) else {
                        continue;
                    };
                    let state = players
                        .entry(fight.logged_in_player.clone())
                        .or_default();
                    let now_ms = line.epoch_ms();
                    if state.current_weapon_speed > 0 {
                        let (hits, consumed_ms) = expected_hits_for_duration(
                            now_ms - state.expected_last_ms,
                            state.current_weapon_speed,
                            state.previous_weapon_speed,
                        );
                        state.expected_weapon_hits += hits;
                        state.expected_last_ms += consumed_ms;
                    } else {
                        state.expected_last_ms = now_ms;
                    }
                    state.previous_weapon_speed = state.current_weapon_speed;
                    state.current_weapon_speed = weapon.speed;
                    state.current_class = Some(weapon.combat_class);
                }
                LogEvent::BoostedLevels(levels) => {
                    let state = players
                        .entry(fight.logged_in_player.clone())
                        .or_default();
                    state.last_boost = Some(*levels);
                    state.has_boosted_levels = true;
                }
                LogEvent::AttackAnimation { .. } => {
                    // A swing only counts for players already seen
                    // equipping or boosting; everyone else is a
                    // non-participant.
                    let Some(state) = players.get_mut(&fight.logged_in_player) else {
                        continue;
                    };
                    state.actual_weapon_hits += 1;
                    state.boosted_hits += self.boost_weight(context, state);
                    if state.current_weapon_speed > 0 {
                        let swing_secs = state.current_weapon_speed as f64 * TICK_SECONDS;
                        let until_end_secs = (end_ms - line.epoch_ms()) as f64 / 1000.0;
                        state.active_time_secs += swing_secs.min(until_end_secs).max(0.0);
                    }
                }
                _ => {}
            }
        }

        players
            .into_iter()
            .map(|(name, mut state)| {
                // Tail after the last weapon swap, up to the fight's
                // final event.
                if state.current_weapon_speed > 0 {
                    let (hits, _) = expected_hits_for_duration(
                        end_ms - state.expected_last_ms,
                        state.current_weapon_speed,
                        state.previous_weapon_speed,
                    );
                    state.expected_weapon_hits += hits;
                }
                (
                    name,
                    FightPerformance {
                        active_time_secs: state.active_time_secs,
                        actual_weapon_hits: state.actual_weapon_hits,
                        boosted_hits: state.boosted_hits,
                        expected_weapon_hits: state.expected_weapon_hits,
                        has_boosted_levels: state.has_boosted_levels,
                    },
                )
            })
            .collect()
    }

    fn raid_context(&self, fight: &Fight) -> RaidContext {
        if fight
            .enemies
            .iter()
            .any(|e| self.config.cox_monsters.contains(e))
        {
            RaidContext::ChambersOfXeric
        } else if fight
            .enemies
            .iter()
            .any(|e| self.config.toa_monsters.contains(e))
        {
            RaidContext::TombsOfAmascut
        } else {
            RaidContext::Open
        }
    }

    /// How boosted the swing's relevant stat was, as a fraction of the
    /// context's maximum span. Melee averages attack and strength.
    /// Unclamped, so corrupted data can exceed one.
    fn boost_weight(&self, context: RaidContext, state: &PlayerReplay) -> f64 {
        let (Some(class), Some(boost)) = (state.current_class, state.last_boost) else {
            return 0.0;
        };
        let span = match context {
            RaidContext::ChambersOfXeric => self.config.cox_boost_span,
            RaidContext::TombsOfAmascut => self.config.toa_boost_span,
            RaidContext::Open => match class {
                CombatClass::Melee => self.config.melee_boost_span,
                CombatClass::Ranged => self.config.ranged_boost_span,
                CombatClass::Magic => self.config.magic_boost_span,
            },
        } as f64;
        let fraction = |level: i32| (level - BASE_LEVEL) as f64 / span;
        match class {
            CombatClass::Melee => (fraction(boost.attack) + fraction(boost.strength)) / 2.0,
            CombatClass::Ranged => fraction(boost.ranged),
            CombatClass::Magic => fraction(boost.magic),
        }
    }
}

/// Swings that fit into `duration_ms`. The first swing after a weapon
/// swap still runs on the old weapon's cooldown, so when
/// `previous_speed` is set that swing is consumed at the old speed
/// before the rest run at `current_speed`. Fractional leftovers are
/// dropped.
fn expected_hits_for_duration(
    duration_ms: i64,
    current_speed: i32,
    previous_speed: i32,
) -> (u32, i64) {
    if duration_ms <= 0 {
        return (0, 0);
    }
    let mut hits = 0u32;
    let mut consumed_ms = 0i64;
    let mut remaining_ms = duration_ms;

    if previous_speed > 0 {
        let handoff_ms = previous_speed as i64 * TICK_MS;
        if handoff_ms > remaining_ms {
            return (0, 0);
        }
        hits += 1;
        consumed_ms += handoff_ms;
        remaining_ms -= handoff_ms;
    }

    if current_speed > 0 {
        let swing_ms = current_speed as i64 * TICK_MS;
        let count = remaining_ms / swing_ms;
        hits += count as u32;
        consumed_ms += count * swing_ms;
    }

    (hits, consumed_ms)
}
