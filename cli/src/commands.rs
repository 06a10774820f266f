use hitsplat_core::combat_log::Reader;
use hitsplat_core::fight::{Fight, FightSegmenter, metrics};
use hitsplat_core::game_data::WeaponCatalog;
use hitsplat_core::performance::{EvaluatorConfig, PerformanceEvaluator};
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use crate::CliContext;

pub fn parse_file(path: &str, ctx: &mut CliContext) {
    let started = Instant::now();
    let (events, errors) = match Reader::from(PathBuf::from(path)).read_log_file() {
        Ok(result) => result,
        Err(err) => {
            println!("{err}");
            return;
        }
    };

    let segmenter = FightSegmenter::new(ctx.config.segment_config());
    ctx.fights = segmenter.segment(&events);

    println!(
        "parsed {} events ({} lines skipped) into {} fights in {}ms",
        events.len(),
        errors.len(),
        ctx.fights.len(),
        started.elapsed().as_millis()
    );
}

pub fn list_fights(ctx: &CliContext) {
    if ctx.fights.is_empty() {
        println!("No fights loaded; run parse-file first");
        return;
    }

    println!("{:<4} {:<44} {:>10} {:>8}", "#", "Fight", "Duration", "Events");
    println!("{}", "-".repeat(68));
    for (index, fight) in ctx.fights.iter().enumerate() {
        println!(
            "{:<4} {:<44} {:>9.1}s {:>8}",
            index,
            fight.name,
            fight.duration_secs(),
            fight.data.len()
        );
    }
    println!("\nTotal: {} fights", ctx.fights.len());
}

pub fn show_performance(ctx: &CliContext, index: usize) {
    let Some(fight) = fight_at(ctx, index) else {
        return;
    };

    let evaluator = PerformanceEvaluator::new(&ctx.catalog, EvaluatorConfig::default());
    let performances = evaluator.evaluate(fight);
    if performances.is_empty() {
        println!("No participant data in fight {index}");
        return;
    }

    let duration = fight.duration_secs();
    println!(
        "{:<20} {:>6} {:>9} {:>8} {:>8}",
        "Player", "Hits", "Expected", "Boosted", "Active"
    );
    println!("{}", "-".repeat(56));
    for (player, perf) in &performances {
        let boosted_pct = if perf.actual_weapon_hits > 0 {
            100.0 * perf.boosted_hits / perf.actual_weapon_hits as f64
        } else {
            0.0
        };
        let active_pct = if duration > 0.0 {
            100.0 * perf.active_time_secs / duration
        } else {
            0.0
        };
        println!(
            "{:<20} {:>6} {:>9} {:>7.1}% {:>7.1}%",
            player, perf.actual_weapon_hits, perf.expected_weapon_hits, boosted_pct, active_pct
        );
    }
}

pub fn show_dps(ctx: &CliContext, index: usize) {
    let Some(fight) = fight_at(ctx, index) else {
        return;
    };

    let totals = metrics::damage_totals(fight);
    println!("{} ({}) vs {:?}", fight.name, fight.logged_in_player, fight.enemies);
    println!(
        "damage {} ({} max hits) over {:.1}s = {:.2} dps",
        totals.total_damage, totals.max_hits, totals.duration_secs, totals.dps
    );
    if let Some(boost) = metrics::boost_time_average(fight) {
        println!(
            "avg boosted levels: atk {:.1} str {:.1} rng {:.1} mag {:.1}",
            boost.attack, boost.strength, boost.ranged, boost.magic
        );
    }
}

pub fn set_weapons(path: &str, ctx: &mut CliContext) {
    match WeaponCatalog::from_path(path) {
        Ok(catalog) => {
            println!("loaded {} weapons from {path}", catalog.len());
            ctx.catalog = catalog;
            ctx.config.weapons_path = Some(PathBuf::from(path));
            if let Err(err) = ctx.config.store() {
                println!("failed to persist config: {err}");
            }
        }
        Err(err) => println!("{err}"),
    }
}

pub fn show_config(ctx: &CliContext) {
    let weapons = match &ctx.config.weapons_path {
        Some(path) => path.display().to_string(),
        None => "(bundled)".to_string(),
    };
    println!("weapons catalog:    {weapons} ({} entries)", ctx.catalog.len());
    println!("inactivity timeout: {}s", ctx.config.inactivity_timeout_secs);
    println!("extra boss names:   {:?}", ctx.config.extra_boss_names);
}

pub fn exit() {
    if write!(std::io::stdout(), "quitting...").is_ok() {
        let _ = std::io::stdout().flush();
    }
}

fn fight_at(ctx: &CliContext, index: usize) -> Option<&Fight> {
    let fight = ctx.fights.get(index);
    if fight.is_none() {
        println!(
            "No fight at index {index}; {} fights loaded",
            ctx.fights.len()
        );
    }
    fight
}
