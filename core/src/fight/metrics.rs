//! Simple reducers over a single fight's events.

use serde::Serialize;

use super::Fight;
use crate::combat_log::LogEvent;
use crate::game_data::hitsplats;

/// Damage dealt over the fight's wall-clock span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageTotals {
    pub total_damage: i64,
    pub max_hits: u32,
    pub duration_secs: f64,
    pub dps: f64,
}

pub fn damage_totals(fight: &Fight) -> DamageTotals {
    let mut total_damage = 0i64;
    let mut max_hits = 0u32;
    for line in &fight.data {
        if let LogEvent::Damage { hitsplat, amount, .. } = &line.event {
            total_damage += *amount as i64;
            if hitsplats::is_max_hit(hitsplat) {
                max_hits += 1;
            }
        }
    }

    let duration_secs = fight.duration_secs();
    let dps = if duration_secs > 0.0 {
        total_damage as f64 / duration_secs
    } else {
        0.0
    };

    DamageTotals {
        total_damage,
        max_hits,
        duration_secs,
        dps,
    }
}

/// Time-weighted average of boosted levels across a fight, in the
/// plugin's skill order. Each snapshot is held until the next one, the
/// last until the fight's final event. None when the fight contains no
/// snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageBoost {
    pub attack: f64,
    pub strength: f64,
    pub defence: f64,
    pub ranged: f64,
    pub magic: f64,
    pub hitpoints: f64,
    pub prayer: f64,
}

pub fn boost_time_average(fight: &Fight) -> Option<AverageBoost> {
    let end = fight.last_line()?.timestamp;

    let mut weighted = [0f64; 7];
    let mut total_ms = 0i64;
    let mut previous: Option<(crate::combat_log::SkillLevels, chrono::NaiveDateTime)> = None;

    let mut accumulate = |levels: crate::combat_log::SkillLevels, held_ms: i64| {
        if held_ms <= 0 {
            return;
        }
        for (slot, value) in weighted.iter_mut().zip(levels.as_array()) {
            *slot += value as f64 * held_ms as f64;
        }
        total_ms += held_ms;
    };

    for line in &fight.data {
        if let LogEvent::BoostedLevels(levels) = &line.event {
            if let Some((prev, since)) = previous {
                accumulate(prev, (line.timestamp - since).num_milliseconds());
            }
            previous = Some((*levels, line.timestamp));
        }
    }

    let (last, since) = previous?;
    accumulate(last, (end - since).num_milliseconds());

    // A lone snapshot at the fight's end has zero span; report it as-is.
    let averages = if total_ms > 0 {
        weighted.map(|w| w / total_ms as f64)
    } else {
        last.as_array().map(|v| v as f64)
    };

    Some(AverageBoost {
        attack: averages[0],
        strength: averages[1],
        defence: averages[2],
        ranged: averages[3],
        magic: averages[4],
        hitpoints: averages[5],
        prayer: averages[6],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::{LogLine, SkillLevels};
    use chrono::NaiveDateTime;

    fn line(secs: f64, event: LogEvent) -> LogLine {
        let base = NaiveDateTime::parse_from_str("02-04-2024 01:19:00.000", "%d-%m-%Y %H:%M:%S%.3f")
            .unwrap();
        LogLine {
            line_number: 1,
            timestamp: base + chrono::TimeDelta::milliseconds((secs * 1000.0) as i64),
            timezone: "CST".to_string(),
            tick: None,
            fight_time_ms: None,
            event,
        }
    }

    fn damage(secs: f64, amount: i32) -> LogLine {
        line(
            secs,
            LogEvent::Damage {
                target: "Scurrius".to_string(),
                hitsplat: "DAMAGE_ME".to_string(),
                amount,
            },
        )
    }

    fn fight(data: Vec<LogLine>) -> Fight {
        Fight {
            name: "Scurrius".to_string(),
            enemies: vec!["Scurrius".to_string()],
            logged_in_player: "Ada".to_string(),
            data,
        }
    }

    #[test]
    fn dps_is_total_damage_over_wall_clock_span() {
        let f = fight(vec![
            damage(0.0, 10),
            line(
                10.0,
                LogEvent::Damage {
                    target: "Scurrius".to_string(),
                    hitsplat: "DAMAGE_MAX_ME".to_string(),
                    amount: 5,
                },
            ),
            line(20.0, LogEvent::Death { target: "Scurrius".to_string() }),
        ]);

        let totals = damage_totals(&f);
        assert_eq!(totals.total_damage, 15);
        assert_eq!(totals.max_hits, 1);
        assert!((totals.duration_secs - 20.0).abs() < 1e-9);
        assert!((totals.dps - 0.75).abs() < 1e-9);
    }

    #[test]
    fn zero_duration_fight_has_zero_dps() {
        let f = fight(vec![damage(0.0, 10)]);
        let totals = damage_totals(&f);
        assert_eq!(totals.total_damage, 10);
        assert_eq!(totals.dps, 0.0);
    }

    #[test]
    fn boost_average_weights_snapshots_by_held_time() {
        let boosted = |attack| {
            LogEvent::BoostedLevels(SkillLevels {
                attack,
                ..Default::default()
            })
        };
        // 19 held for 10s, 9 held for 30s -> (190 + 270) / 40
        let f = fight(vec![
            line(0.0, boosted(19)),
            damage(5.0, 10),
            line(10.0, boosted(9)),
            damage(40.0, 10),
        ]);

        let avg = boost_time_average(&f).unwrap();
        assert!((avg.attack - 11.5).abs() < 1e-9);
        assert_eq!(avg.strength, 0.0);
    }

    #[test]
    fn no_snapshot_yields_none() {
        let f = fight(vec![damage(0.0, 10), damage(5.0, 10)]);
        assert!(boost_time_average(&f).is_none());
    }

    #[test]
    fn lone_snapshot_at_fight_end_is_reported_verbatim() {
        let f = fight(vec![
            damage(0.0, 10),
            line(
                5.0,
                LogEvent::BoostedLevels(SkillLevels {
                    ranged: 13,
                    ..Default::default()
                }),
            ),
        ]);
        let avg = boost_time_average(&f).unwrap();
        assert!((avg.ranged - 13.0).abs() < 1e-9);
    }
}
