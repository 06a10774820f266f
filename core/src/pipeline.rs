//! Top-level parse entry point.
//!
//! Turns a whole log file's text into fights in two halves: line
//! parsing maps to 0-50 % of the progress range, segmentation to
//! 50-100 %. Per-line failures never abort the batch; they are
//! collected as diagnostics and logged.

use serde::Serialize;

use crate::combat_log::{LogParser, ParseError};
use crate::fight::{Fight, FightSegmenter, SegmentConfig};

const PROGRESS_LINE_INTERVAL: usize = 200;

/// A line the parser rejected, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedLine {
    pub line_number: u64,
    pub error: ParseError,
}

/// Result of one full parse+segment run.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ParseOutcome {
    pub fights: Vec<Fight>,
    pub skipped: Vec<SkippedLine>,
}

/// Parses raw log text and segments it into fights, with default
/// segmentation settings.
pub fn parse_file_content(
    text: &str,
    on_progress: Option<&mut dyn FnMut(f64)>,
) -> ParseOutcome {
    parse_file_content_with(text, SegmentConfig::default(), on_progress)
}

pub fn parse_file_content_with(
    text: &str,
    config: SegmentConfig,
    mut on_progress: Option<&mut dyn FnMut(f64)>,
) -> ParseOutcome {
    let parser = LogParser::new();
    let line_count = text.lines().count();
    let mut events = Vec::with_capacity(line_count);
    let mut skipped = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_number = idx as u64 + 1;
        let raw = raw.trim_end_matches('\r');
        if raw.is_empty() {
            continue;
        }
        match parser.parse_line(line_number, raw) {
            Ok(line) => events.push(line),
            Err(error) => {
                tracing::warn!(line = error.line_number(), %error, "skipping malformed line");
                skipped.push(SkippedLine {
                    line_number: error.line_number(),
                    error,
                });
            }
        }

        if let Some(progress) = on_progress.as_deref_mut()
            && line_number as usize % PROGRESS_LINE_INTERVAL == 0
        {
            progress(50.0 * line_number as f64 / line_count as f64);
        }
    }

    let fights = FightSegmenter::new(config).segment_with_progress(&events, on_progress);
    ParseOutcome { fights, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> String {
        let mut text = String::new();
        text.push_str("02-04-2024 01:18:59.000 CST\tLogged in player is Ada\n");
        text.push_str("02-04-2024 01:19:00.000 CST\tGiant rat\tDAMAGE_ME\t5\n");
        text.push_str("02-04-2024 01:19:01.200 CST\tScurrius\tDAMAGE_ME\t12\n");
        text.push_str("02-04-2024 01:19:02.400 CST\tScurrius dies\n");
        text
    }

    #[test]
    fn parses_and_segments_a_small_log() {
        let outcome = parse_file_content(&sample_log(), None);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.fights.len(), 1);
        assert_eq!(outcome.fights[0].name, "Scurrius");
        assert_eq!(outcome.fights[0].enemies, vec!["Giant rat", "Scurrius"]);
    }

    #[test]
    fn malformed_lines_are_skipped_with_diagnostics() {
        let mut text = sample_log();
        text.insert_str(0, "not a log line\n");

        let outcome = parse_file_content(&text, None);
        assert_eq!(outcome.fights.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.skipped[0].line_number, 1);
        assert!(matches!(
            outcome.skipped[0].error,
            ParseError::InvalidHeader { line_number: 1 }
        ));
    }

    #[test]
    fn blank_lines_are_neither_events_nor_diagnostics() {
        let mut text = sample_log();
        text.push('\n');
        let outcome = parse_file_content(&text, None);
        assert!(outcome.skipped.is_empty());
        assert_eq!(outcome.fights.len(), 1);
    }

    #[test]
    fn empty_input_yields_an_empty_outcome() {
        let outcome = parse_file_content("", None);
        assert!(outcome.fights.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn progress_covers_both_halves_and_finishes_at_one_hundred() {
        let mut text = String::from("02-04-2024 01:18:59.000 CST\tLogged in player is Ada\n");
        for i in 0..600 {
            let secs = i % 60;
            let millis = (i * 7) % 1000;
            text.push_str(&format!(
                "02-04-2024 01:19:{secs:02}.{millis:03} CST\tScurrius\tDAMAGE_ME\t1\n"
            ));
        }

        let mut seen = Vec::new();
        let mut callback = |p: f64| seen.push(p);
        let outcome = parse_file_content(&text, Some(&mut callback));

        assert_eq!(outcome.fights.len(), 1);
        assert!(seen.iter().any(|p| *p <= 50.0));
        assert!(seen.iter().any(|p| *p > 50.0));
        assert!(seen.iter().all(|p| (0.0..=100.0).contains(p)));
        assert_eq!(*seen.last().unwrap(), 100.0);
    }

    #[test]
    fn runs_are_independent() {
        let text = sample_log();
        let first = parse_file_content(&text, None);
        let second = parse_file_content(&text, None);
        assert_eq!(first, second);
    }
}
