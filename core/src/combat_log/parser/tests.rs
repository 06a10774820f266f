use super::*;

fn parse(line: &str) -> Result<LogLine, ParseError> {
    LogParser::new().parse_line(7, line)
}

fn event(line: &str) -> LogEvent {
    parse(line).unwrap().event
}

#[test]
fn header_fields_are_extracted() {
    let line = parse("02-04-2024 01:19:01.807 CST\tScurrius dies").unwrap();
    assert_eq!(line.line_number, 7);
    assert_eq!(line.timezone, "CST");
    assert_eq!(line.tick, None);
    assert_eq!(line.fight_time_ms, None);
    assert_eq!(
        line.timestamp.format("%d-%m-%Y %H:%M:%S%.3f").to_string(),
        "02-04-2024 01:19:01.807"
    );
    assert_eq!(line.event, LogEvent::Death { target: "Scurrius".to_string() });
}

#[test]
fn optional_tick_token_is_parsed() {
    let line = parse("02-04-2024 01:19:01.807 CST 123456\tScurrius dies").unwrap();
    assert_eq!(line.tick, Some(123456));
}

#[test]
fn non_numeric_fourth_token_is_rejected() {
    assert!(matches!(
        parse("02-04-2024 01:19:01.807 CST extra\tScurrius dies"),
        Err(ParseError::InvalidHeader { line_number: 7 })
    ));
}

#[test]
fn missing_tab_is_an_invalid_header() {
    assert!(matches!(
        parse("02-04-2024 01:19:01.807 CST Scurrius dies"),
        Err(ParseError::InvalidHeader { .. })
    ));
}

#[test]
fn malformed_timestamp_is_rejected() {
    assert!(matches!(
        parse("02-04-24 01:19:01.807 CST\tScurrius dies"),
        Err(ParseError::InvalidTimestamp { .. })
    ));
    assert!(matches!(
        parse("02-13-2024 01:19:01.807 CST\tScurrius dies"),
        Err(ParseError::InvalidTimestamp { .. })
    ));
    assert!(matches!(
        parse("02-04-2024 01:19:01 CST\tScurrius dies"),
        Err(ParseError::InvalidTimestamp { .. })
    ));
}

#[test]
fn log_version() {
    assert_eq!(
        event("02-04-2024 01:19:01.807 CST\tLog Version 1.2.1"),
        LogEvent::LogVersion { version: "1.2.1".to_string() }
    );
}

#[test]
fn logged_in_player() {
    assert_eq!(
        event("02-04-2024 01:19:01.807 CST\tLogged in player is Ada"),
        LogEvent::LoggedInPlayer { name: "Ada".to_string() }
    );
}

#[test]
fn boosted_and_base_levels() {
    let boosted = event("02-04-2024 01:19:01.807 CST\tBoosted levels are [118, 118, 120, 112, 103, 121, 70]");
    assert_eq!(
        boosted,
        LogEvent::BoostedLevels(SkillLevels {
            attack: 118,
            strength: 118,
            defence: 120,
            ranged: 112,
            magic: 103,
            hitpoints: 121,
            prayer: 70,
        })
    );

    let base = event("02-04-2024 01:19:01.807 CST\tBase levels are [99, 99, 99, 99, 99, 99, 77]");
    assert!(matches!(base, LogEvent::BaseLevels(levels) if levels.prayer == 77));
}

#[test]
fn levels_must_have_exactly_seven_entries() {
    assert!(matches!(
        parse("02-04-2024 01:19:01.807 CST\tBoosted levels are [99, 99, 99]"),
        Err(ParseError::InvalidValue { field: "levels", .. })
    ));
    assert!(matches!(
        parse("02-04-2024 01:19:01.807 CST\tBoosted levels are [1, 2, 3, 4, 5, 6, 7, 8]"),
        Err(ParseError::InvalidValue { field: "levels", .. })
    ));
}

#[test]
fn player_equipment() {
    assert_eq!(
        event("02-04-2024 01:19:01.807 CST\tPlayer equipment is [26382, 21295, 4151, -1, 26384]"),
        LogEvent::PlayerEquipment { slots: vec![26382, 21295, 4151, -1, 26384] }
    );
}

#[test]
fn attack_animation() {
    assert_eq!(
        event("02-04-2024 01:19:01.807 CST\tPlayer attack animation 390"),
        LogEvent::AttackAnimation { animation_id: 390 }
    );
}

#[test]
fn player_position() {
    assert_eq!(
        event("02-04-2024 01:19:01.807 CST\tPlayer position is (3292, 5088, 0)"),
        LogEvent::PlayerPosition { x: 3292, y: 5088, plane: 0 }
    );
}

#[test]
fn active_prayers() {
    assert_eq!(
        event("02-04-2024 01:19:01.807 CST\tActive prayers are [Piety, Protect from Melee]"),
        LogEvent::ActivePrayers {
            prayers: vec!["Piety".to_string(), "Protect from Melee".to_string()]
        }
    );
    assert_eq!(
        event("02-04-2024 01:19:01.807 CST\tActive prayers are []"),
        LogEvent::ActivePrayers { prayers: vec![] }
    );
}

#[test]
fn change_target() {
    assert_eq!(
        event("02-04-2024 01:19:01.807 CST\tScurrius changes target to Ada"),
        LogEvent::ChangeTarget {
            source: "Scurrius".to_string(),
            target: "Ada".to_string(),
        }
    );
}

#[test]
fn damage_line() {
    assert_eq!(
        event("02-04-2024 01:19:01.807 CST\tScurrius\tDAMAGE_ME\t23"),
        LogEvent::Damage {
            target: "Scurrius".to_string(),
            hitsplat: "DAMAGE_ME".to_string(),
            amount: 23,
        }
    );
}

#[test]
fn non_numeric_damage_amount_is_rejected() {
    assert!(matches!(
        parse("02-04-2024 01:19:01.807 CST\tScurrius\tDAMAGE_ME\tNaN"),
        Err(ParseError::InvalidValue { field: "damage amount", .. })
    ));
}

#[test]
fn unknown_action_is_rejected_with_the_payload() {
    let err = parse("02-04-2024 01:19:01.807 CST\tSomething unrecognised").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnknownAction { line_number: 7, ref action } if action == "Something unrecognised"
    ));
}

#[test]
fn enemy_names_containing_dies_are_still_deaths() {
    assert_eq!(
        event("02-04-2024 01:19:01.807 CST\tGiant rat dies"),
        LogEvent::Death { target: "Giant rat".to_string() }
    );
}
