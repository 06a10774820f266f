use chrono::{NaiveDateTime, TimeDelta};
use hashbrown::HashSet;

use super::Fight;
use crate::combat_log::{LogEvent, LogLine, SkillLevels};
use crate::game_data::bosses;


const INCOMPLETE_SUFFIX: &str = " - Incomplete";
const PROGRESS_EVENT_INTERVAL: usize = 200;

/// Segmentation tuning. The defaults match the plugin's exports; both
/// knobs are injectable for alternate content sets.
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Names that take over a fight's label when targeted mid-fight.
    pub boss_names: HashSet<String>,
    /// Gap after the last damage-capable event that force-closes a
    /// fight as incomplete.
    pub inactivity_timeout: TimeDelta,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            boss_names: bosses::default_boss_names(),
            inactivity_timeout: TimeDelta::milliseconds(60_000),
        }
    }
}

/// Marks the most recent damage-capable event inside the open fight.
#[derive(Debug, Clone, Copy)]
struct DamageMarker {
    time: NaiveDateTime,
    /// Index into the open fight's `data`.
    index: usize,
}

/// State carried across the single scan.
#[derive(Debug, Default)]
struct ScanState {
    current: Option<Fight>,
    player: String,
    marker: Option<DamageMarker>,
    /// Most recent boost snapshot, carried across fight boundaries so
    /// a new fight can open with a known snapshot.
    last_boosted: Option<SkillLevels>,
}

/// Partitions an ordered event stream into fights. Single pass, O(n),
/// no state survives a call.
#[derive(Debug, Default)]
pub struct FightSegmenter {
    config: SegmentConfig,
}

impl FightSegmenter {
    pub fn new(config: SegmentConfig) -> Self {
        Self { config }
    }

    pub fn segment(&self, events: &[LogLine]) -> Vec<Fight> {
        self.segment_with_progress(events, None)
    }

    /// Segment with coarse progress reporting mapped into 50-100%,
    /// matching the parse half of the pipeline.
    pub fn segment_with_progress(
        &self,
        events: &[LogLine],
        mut on_progress: Option<&mut dyn FnMut(f64)>,
    ) -> Vec<Fight> {
        let mut fights = Vec::new();
        let mut scan = ScanState::default();

        for (idx, event) in events.iter().enumerate() {
            self.process_event(event, &mut scan, &mut fights);

            if let Some(progress) = on_progress.as_deref_mut()
                && (idx + 1) % PROGRESS_EVENT_INTERVAL == 0
            {
                progress(50.0 + 50.0 * (idx + 1) as f64 / events.len() as f64);
            }
        }

        // Natural end of log closes the open fight without a suffix.
        if let Some(fight) = scan.current.take() {
            fights.push(fight);
        }

        // Fights with no damage-capable event are non-combat noise.
        fights.retain(Fight::has_damage_capable);

        for fight in &mut fights {
            fight.assign_fight_times();
        }

        if let Some(progress) = on_progress {
            progress(100.0);
        }
        fights
    }

    fn process_event(&self, event: &LogLine, scan: &mut ScanState, fights: &mut Vec<Fight>) {
        // 1. Track the logged-in player.
        if let LogEvent::LoggedInPlayer { name } = &event.event {
            scan.player = name.clone();
        }

        // 2. Inactivity timeout, checked before this event joins any
        //    fight. The truncated fight keeps nothing past the marker.
        if let (Some(fight), Some(marker)) = (&mut scan.current, &scan.marker)
            && event.timestamp - marker.time > self.config.inactivity_timeout
        {
            fight.data.truncate(marker.index + 1);
            fight.name.push_str(INCOMPLETE_SUFFIX);
            tracing::debug!(fight = %fight.name, "closing fight on inactivity timeout");
            fights.extend(scan.current.take());
            scan.marker = None;
        }

        let damage_capable = event.is_damage_capable();

        match &mut scan.current {
            // 3. Open: first player-attempted damage against a
            //    non-player entity starts a fight.
            None => {
                if damage_capable
                    && let Some(target) = event.target()
                    && target != scan.player
                {
                    let mut fight = Fight {
                        name: target.to_string(),
                        enemies: vec![target.to_string()],
                        logged_in_player: scan.player.clone(),
                        data: Vec::new(),
                    };
                    if let Some(levels) = scan.last_boosted {
                        fight.data.push(synthetic_snapshot(event, levels));
                    }
                    fight.data.push(event.clone());
                    tracing::debug!(fight = %fight.name, "opening fight");
                    scan.current = Some(fight);
                }
            }
            // 4. Extend: bosses steal the label, new enemies are
            //    recorded, every event type joins the data.
            Some(fight) => {
                if let Some(target) = event.target() {
                    if self.config.boss_names.contains(target) && fight.name != target {
                        tracing::debug!(from = %fight.name, to = %target, "boss rename");
                        fight.name = target.to_string();
                    }
                    if damage_capable && target != scan.player {
                        fight.push_enemy(target);
                    }
                }
                fight.data.push(event.clone());
            }
        }

        // 5. Damage marker points at the event just appended.
        if damage_capable && let Some(fight) = &scan.current {
            scan.marker = Some(DamageMarker {
                time: event.timestamp,
                index: fight.data.len() - 1,
            });
        }

        // 6. A death of the fight's primary enemy or of the player
        //    closes the fight.
        if let LogEvent::Death { target } = &event.event
            && let Some(fight) = &scan.current
            && (*target == fight.name || *target == fight.logged_in_player)
        {
            tracing::debug!(fight = %fight.name, died = %target, "closing fight on death");
            fights.extend(scan.current.take());
            scan.marker = None;
        }

        // 7. Boost snapshots carry across fight boundaries.
        if let LogEvent::BoostedLevels(levels) = &event.event {
            scan.last_boosted = Some(*levels);
        }
    }
}

/// Snapshot of the last known boost state, stamped with the opening
/// event's header fields.
fn synthetic_snapshot(opening: &LogLine, levels: SkillLevels) -> LogLine {
    LogLine {
        line_number: opening.line_number,
        timestamp: opening.timestamp,
        timezone: opening.timezone.clone(),
        tick: opening.tick,
        fight_time_ms: None,
        event: LogEvent::BoostedLevels(levels),
    }
}
