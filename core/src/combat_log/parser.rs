use super::*;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use memchr::memchr;

#[cfg(test)]
mod tests;

/// Parses one exported combat-log line into a [`LogLine`].
///
/// Header grammar: `DD-MM-YYYY HH:MM:SS.mmm TZ[ TICK]\t<action>`. The
/// action payload is matched against an ordered list of forms; first
/// match wins, the three-field fallback is a damage line.
#[derive(Debug, Default)]
pub struct LogParser;

impl LogParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_line(&self, line_number: u64, line: &str) -> Result<LogLine, ParseError> {
        let bytes = line.as_bytes();
        let tab = memchr(b'\t', bytes).ok_or(ParseError::InvalidHeader { line_number })?;
        let header = &line[..tab];
        let action = &line[tab + 1..];

        let mut tokens = header.split(' ');
        let (Some(date), Some(time), Some(timezone)) =
            (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(ParseError::InvalidHeader { line_number });
        };

        if timezone.is_empty()
            || !timezone
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ParseError::InvalidHeader { line_number });
        }

        // Newer plugin versions append the game tick as a fourth token.
        let tick = match tokens.next() {
            Some(t) if ascii_digits(t.as_bytes()) => t.parse::<i64>().ok(),
            Some(_) => return Err(ParseError::InvalidHeader { line_number }),
            None => None,
        };
        if tokens.next().is_some() {
            return Err(ParseError::InvalidHeader { line_number });
        }

        let timestamp = Self::parse_timestamp(line_number, date, time)?;
        let event = Self::parse_action(line_number, action)?;

        Ok(LogLine {
            line_number,
            timestamp,
            timezone: timezone.to_string(),
            tick,
            fight_time_ms: None,
            event,
        })
    }

    // parse DD-MM-YYYY + HH:MM:SS.mmm
    fn parse_timestamp(
        line_number: u64,
        date: &str,
        time: &str,
    ) -> Result<NaiveDateTime, ParseError> {
        let invalid = || ParseError::InvalidTimestamp {
            line_number,
            segment: format!("{date} {time}"),
        };

        let d = date.as_bytes();
        let t = time.as_bytes();
        if d.len() != 10 || d[2] != b'-' || d[5] != b'-' {
            return Err(invalid());
        }
        if t.len() != 12 || t[2] != b':' || t[5] != b':' || t[8] != b'.' {
            return Err(invalid());
        }
        if !(ascii_digits(&d[0..2]) && ascii_digits(&d[3..5]) && ascii_digits(&d[6..10])) {
            return Err(invalid());
        }
        if !(ascii_digits(&t[0..2])
            && ascii_digits(&t[3..5])
            && ascii_digits(&t[6..8])
            && ascii_digits(&t[9..12]))
        {
            return Err(invalid());
        }

        let day = ((d[0] - b'0') * 10 + (d[1] - b'0')) as u32;
        let month = ((d[3] - b'0') * 10 + (d[4] - b'0')) as u32;
        let year = (d[6] - b'0') as i32 * 1000
            + (d[7] - b'0') as i32 * 100
            + (d[8] - b'0') as i32 * 10
            + (d[9] - b'0') as i32;

        let hour = ((t[0] - b'0') * 10 + (t[1] - b'0')) as u32;
        let minute = ((t[3] - b'0') * 10 + (t[4] - b'0')) as u32;
        let second = ((t[6] - b'0') * 10 + (t[7] - b'0')) as u32;
        let millis =
            (t[9] - b'0') as u32 * 100 + (t[10] - b'0') as u32 * 10 + (t[11] - b'0') as u32;

        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, millis).ok_or_else(invalid)?;
        Ok(NaiveDateTime::new(date, time))
    }

    // Ordered action matching. The forms are not structurally exclusive,
    // so the order here is load-bearing.
    fn parse_action(line_number: u64, action: &str) -> Result<LogEvent, ParseError> {
        if let Some(rest) = action.strip_prefix("Log Version ") {
            return Ok(LogEvent::LogVersion {
                version: rest.trim().to_string(),
            });
        }
        if let Some(rest) = action.strip_prefix("Logged in player is ") {
            return Ok(LogEvent::LoggedInPlayer {
                name: rest.trim().to_string(),
            });
        }
        if let Some(rest) = action.strip_prefix("Boosted levels are ") {
            return Ok(LogEvent::BoostedLevels(Self::parse_levels(
                line_number,
                rest,
            )?));
        }
        if let Some(rest) = action.strip_prefix("Base levels are ") {
            return Ok(LogEvent::BaseLevels(Self::parse_levels(line_number, rest)?));
        }
        if let Some(rest) = action.strip_prefix("Player equipment is ") {
            return Ok(LogEvent::PlayerEquipment {
                slots: Self::parse_equipment(line_number, rest)?,
            });
        }
        if let Some(rest) = action.strip_prefix("Player attack animation ") {
            return Ok(LogEvent::AttackAnimation {
                animation_id: parse_int(line_number, "animation id", rest)?,
            });
        }
        if let Some(rest) = action.strip_prefix("Player position is ") {
            return Self::parse_position(line_number, rest);
        }
        if let Some(rest) = action.strip_prefix("Active prayers are ") {
            return Self::parse_prayers(line_number, rest);
        }
        if let Some(target) = action.strip_suffix(" dies") {
            return Ok(LogEvent::Death {
                target: target.to_string(),
            });
        }
        if let Some(pos) = action.find(" changes target to ") {
            return Ok(LogEvent::ChangeTarget {
                source: action[..pos].to_string(),
                target: action[pos + " changes target to ".len()..].to_string(),
            });
        }

        // Fallback: `target\thitsplat\tamount` damage line.
        let fields: Vec<&str> = action.split('\t').collect();
        if let [target, hitsplat, amount] = fields[..] {
            return Ok(LogEvent::Damage {
                target: target.to_string(),
                hitsplat: hitsplat.to_string(),
                amount: parse_int(line_number, "damage amount", amount)?,
            });
        }

        Err(ParseError::UnknownAction {
            line_number,
            action: action.to_string(),
        })
    }

    // parse `[a, s, d, r, m, h, p]` - exactly seven integers
    fn parse_levels(line_number: u64, rest: &str) -> Result<SkillLevels, ParseError> {
        let invalid = || ParseError::InvalidValue {
            line_number,
            field: "levels",
            value: rest.to_string(),
        };
        let inner = rest
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(invalid)?;

        let mut values = [0i32; 7];
        let mut parts = inner.split(',');
        for slot in values.iter_mut() {
            let part = parts.next().ok_or_else(invalid)?;
            *slot = parse_int(line_number, "level", part)?;
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(SkillLevels::from_array(values))
    }

    // parse comma-separated slot ids
    fn parse_equipment(line_number: u64, rest: &str) -> Result<Vec<i32>, ParseError> {
        rest.trim()
            .trim_start_matches('[')
            .trim_end_matches(']')
            .split(',')
            .map(|part| parse_int(line_number, "slot id", part))
            .collect()
    }

    // parse `(x, y, plane)`
    fn parse_position(line_number: u64, rest: &str) -> Result<LogEvent, ParseError> {
        let invalid = || ParseError::InvalidValue {
            line_number,
            field: "position",
            value: rest.to_string(),
        };
        let inner = rest
            .trim()
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let mut parts = inner.split(',');
        let (Some(x), Some(y), Some(plane), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        Ok(LogEvent::PlayerPosition {
            x: parse_int(line_number, "position", x)?,
            y: parse_int(line_number, "position", y)?,
            plane: parse_int(line_number, "position", plane)?,
        })
    }

    // parse `[Prayer One, Prayer Two]`, possibly empty
    fn parse_prayers(line_number: u64, rest: &str) -> Result<LogEvent, ParseError> {
        let inner = rest
            .trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| ParseError::InvalidValue {
                line_number,
                field: "prayers",
                value: rest.to_string(),
            })?;
        let prayers = inner
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        Ok(LogEvent::ActivePrayers { prayers })
    }
}

fn ascii_digits(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit)
}

fn parse_int(line_number: u64, field: &'static str, value: &str) -> Result<i32, ParseError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| ParseError::InvalidValue {
            line_number,
            field,
            value: value.trim().to_string(),
        })
}
