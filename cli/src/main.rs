use clap::{Parser, Subcommand};
use hitsplat_cli::CliContext;
use hitsplat_cli::commands;
use hitsplat_cli::readline;
use std::io::Write;

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx) {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "combat log analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a combat log export and segment it into fights
    ParseFile {
        #[arg(short, long)]
        path: String,
    },
    /// List the fights from the last parse
    Fights,
    /// Per-player performance for one fight
    Performance {
        #[arg(short, long)]
        index: usize,
    },
    /// Damage totals and boost averages for one fight
    Dps {
        #[arg(short, long)]
        index: usize,
    },
    /// Load a weapon catalog JSON and persist its path
    SetWeapons {
        #[arg(short, long)]
        path: String,
    },
    Config,
    Exit,
}

fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "hitsplat".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::ParseFile { path }) => commands::parse_file(path, ctx),
        Some(Commands::Fights) => commands::list_fights(ctx),
        Some(Commands::Performance { index }) => commands::show_performance(ctx, *index),
        Some(Commands::Dps { index }) => commands::show_dps(ctx, *index),
        Some(Commands::SetWeapons { path }) => commands::set_weapons(path, ctx),
        Some(Commands::Config) => commands::show_config(ctx),
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
