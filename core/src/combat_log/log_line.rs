use chrono::NaiveDateTime;
use serde::Serialize;

use crate::game_data::hitsplats;

/// Skill levels in the plugin's export order. Boosted snapshots carry
/// the absolute boosted level, not the delta above base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SkillLevels {
    pub attack: i32,
    pub strength: i32,
    pub defence: i32,
    pub ranged: i32,
    pub magic: i32,
    pub hitpoints: i32,
    pub prayer: i32,
}

impl SkillLevels {
    pub fn as_array(&self) -> [i32; 7] {
        [
            self.attack,
            self.strength,
            self.defence,
            self.ranged,
            self.magic,
            self.hitpoints,
            self.prayer,
        ]
    }

    pub fn from_array(values: [i32; 7]) -> Self {
        Self {
            attack: values[0],
            strength: values[1],
            defence: values[2],
            ranged: values[3],
            magic: values[4],
            hitpoints: values[5],
            prayer: values[6],
        }
    }
}

/// One action payload, discriminated by form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LogEvent {
    LogVersion { version: String },
    LoggedInPlayer { name: String },
    BoostedLevels(SkillLevels),
    BaseLevels(SkillLevels),
    /// Slot ids in fixed slot order; -1 = empty, -2 = unknown/hidden.
    PlayerEquipment { slots: Vec<i32> },
    AttackAnimation { animation_id: i32 },
    PlayerPosition { x: i32, y: i32, plane: i32 },
    ActivePrayers { prayers: Vec<String> },
    Death { target: String },
    ChangeTarget { source: String, target: String },
    Damage { target: String, hitsplat: String, amount: i32 },
}

/// One parsed log line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogLine {
    pub line_number: u64,
    pub timestamp: NaiveDateTime,
    pub timezone: String,
    /// Game tick counter, present in newer exports.
    pub tick: Option<i64>,
    /// Milliseconds since fight start. Assigned by the segmenter, never the parser.
    pub fight_time_ms: Option<i64>,
    pub event: LogEvent,
}

impl LogLine {
    /// The entity this event is aimed at, for event kinds that carry one.
    pub fn target(&self) -> Option<&str> {
        match &self.event {
            LogEvent::Death { target }
            | LogEvent::ChangeTarget { target, .. }
            | LogEvent::Damage { target, .. } => Some(target),
            _ => None,
        }
    }

    /// True when the event represents the logged-in player attempting
    /// damage (hit, max hit, or blocked swing).
    pub fn is_damage_capable(&self) -> bool {
        matches!(
            &self.event,
            LogEvent::Damage { hitsplat, .. } if hitsplats::is_damage_capable(hitsplat)
        )
    }

    pub fn epoch_ms(&self) -> i64 {
        self.timestamp.and_utc().timestamp_millis()
    }
}
