#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Monster Steps levels headlessly.

mod config;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use monster_steps_core::PlayerExclusion;
use monster_steps_system_levels::catalog;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::RunConfig, session::Session};

/// Step-driven monster spawning on a square grid.
#[derive(Parser, Debug)]
#[command(name = "monster-steps", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a level for a number of steps and print a summary
    Run(RunArgs),
    /// List every level of the campaign
    Levels,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// TOML file providing defaults for the other flags
    #[arg(long)]
    config: Option<PathBuf>,

    /// Level to play
    #[arg(short, long)]
    level: Option<u32>,

    /// Number of steps to simulate
    #[arg(long)]
    steps: Option<u64>,

    /// Seed of the random source
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cells around the player that placements must avoid
    #[arg(long, value_enum)]
    player_exclusion: Option<ExclusionArg>,

    /// Random draws a placement may take before scanning the grid
    #[arg(long)]
    max_attempts: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ExclusionArg {
    /// Avoid the player's whole row and column
    RowAndColumn,
    /// Avoid only the player's own cell
    Cell,
}

impl From<ExclusionArg> for PlayerExclusion {
    fn from(arg: ExclusionArg) -> Self {
        match arg {
            ExclusionArg::RowAndColumn => PlayerExclusion::RowAndColumn,
            ExclusionArg::Cell => PlayerExclusion::Cell,
        }
    }
}

impl RunArgs {
    fn resolve(&self) -> Result<RunConfig> {
        let mut run = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(level) = self.level {
            run.level = level;
        }
        if let Some(steps) = self.steps {
            run.steps = steps;
        }
        if let Some(seed) = self.seed {
            run.seed = seed;
        }
        if let Some(exclusion) = self.player_exclusion {
            run.player_exclusion = exclusion.into();
        }
        if self.max_attempts.is_some() {
            run.max_attempts = self.max_attempts;
        }

        run.validate()?;
        Ok(run)
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Entry point for the Monster Steps command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let run = args.resolve()?;
            let session = Session::start(&run)?;
            println!("{}\n", session.intro());
            let summary = session.run(run.steps)?;
            println!("{summary}");
        }
        Commands::Levels => {
            for number in catalog::level_numbers() {
                if let Some(title) = catalog::title(number) {
                    println!("{number:>2}  {title}");
                }
            }
        }
    }

    Ok(())
}
