use std::io::{BufRead, Write};

use anyhow::Context;
use clap::Parser;
use pathgame_core::{EventOutcome, GameConfig, MarkOutcome, Session};

mod command;
mod render;

use command::{Command, HELP, parse_command};

#[derive(Parser, Debug)]
#[command(version, about = "Beat the shortest path between S and E", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid rows
    #[arg(long, default_value_t = 20)]
    rows: u8,

    /// Grid columns
    #[arg(long, default_value_t = 20)]
    cols: u8,

    /// Fewest 2x2 obstacle blocks per round
    #[arg(long, default_value_t = 5)]
    min_obstacles: u16,

    /// Most 2x2 obstacle blocks per round
    #[arg(long, default_value_t = 15)]
    max_obstacles: u16,

    /// Let obstacles cut the start off from the end
    #[arg(long)]
    allow_blocked: bool,
}

/// The forced seed, or a fresh one from the thread RNG.
fn resolve_seed(forced: Option<u64>) -> u64 {
    forced.unwrap_or_else(rand::random)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = resolve_seed(args.seed);
    log::debug!("seed: {}", seed);

    let config = GameConfig::new(
        (args.rows, args.cols),
        (args.min_obstacles, args.max_obstacles),
    )
    .with_keep_route_open(!args.allow_blocked);
    if config.size != (args.rows, args.cols)
        || config.obstacles != (args.min_obstacles, args.max_obstacles)
    {
        log::warn!("Configuration adjusted to {:?}", config);
    }

    let mut session = Session::new(config, seed).context("could not set up the first round")?;
    let stdin = std::io::stdin();
    let mut out = std::io::stdout().lock();

    writeln!(out, "{}\n\n{HELP}\n", render::render(&session.snapshot()))?;

    for line in stdin.lock().lines() {
        let line = line.context("could not read input")?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Show => writeln!(out, "{}", render::render(&session.snapshot()))?,
            Command::Json => {
                serde_json::to_writer_pretty(&mut out, &session.snapshot())?;
                writeln!(out)?;
            }
            Command::Event(event) => match session.handle(event) {
                Ok(EventOutcome::Mark(MarkOutcome::NoChange)) => {
                    writeln!(out, "Nothing to change there")?;
                }
                Ok(EventOutcome::Mark(_)) | Ok(EventOutcome::Reset) => {
                    writeln!(out, "{}", render::render(&session.snapshot()))?;
                }
                Ok(EventOutcome::Evaluated(result)) => {
                    writeln!(out, "{}", render::render(&session.snapshot()))?;
                    writeln!(out, "\n{}", render::verdict(&result))?;
                }
                Err(err) => writeln!(out, "{err}")?,
            },
        }
    }

    Ok(())
}
