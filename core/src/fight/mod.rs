pub mod metrics;
mod segmenter;

pub use segmenter::{FightSegmenter, SegmentConfig};

use chrono::TimeDelta;
use serde::Serialize;

use crate::combat_log::LogLine;

/// One continuous combat encounter against a (possibly renamed)
/// primary enemy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fight {
    /// Display label. A boss hit mid-fight overwrites it; a timeout
    /// close appends " - Incomplete".
    pub name: String,
    /// Every non-player entity the player attempted damage against,
    /// first-seen order, deduplicated.
    pub enemies: Vec<String>,
    pub logged_in_player: String,
    /// Member events, including the synthetic boosted-levels snapshot
    /// prepended at creation when one was known.
    pub data: Vec<LogLine>,
}

impl Fight {
    pub fn first_line(&self) -> Option<&LogLine> {
        self.data.first()
    }

    pub fn last_line(&self) -> Option<&LogLine> {
        self.data.last()
    }

    pub fn duration(&self) -> TimeDelta {
        match (self.first_line(), self.last_line()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => TimeDelta::zero(),
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration().num_milliseconds() as f64 / 1000.0
    }

    pub fn has_damage_capable(&self) -> bool {
        self.data.iter().any(LogLine::is_damage_capable)
    }

    pub(crate) fn push_enemy(&mut self, enemy: &str) {
        if !self.enemies.iter().any(|e| e == enemy) {
            self.enemies.push(enemy.to_string());
        }
    }

    /// Stamp every member event with milliseconds since the fight's
    /// first line. Run once when the fight is closed.
    pub(crate) fn assign_fight_times(&mut self) {
        let Some(first) = self.data.first().map(|l| l.timestamp) else {
            return;
        };
        for line in &mut self.data {
            line.fight_time_ms = Some((line.timestamp - first).num_milliseconds());
        }
    }
}
