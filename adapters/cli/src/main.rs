#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a single Chase match.

mod settings;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use chase_rendering::{RenderingBackend, Scene, TextBackend};
use chase_system_bootstrap::{Session, TickOutcome};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs a pursuit match between an evading agent and a chasing enemy.
#[derive(Debug, Parser)]
#[command(name = "chase", version, about)]
struct Args {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for map generation and every decision; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Overrides the configured step limit.
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,
    /// Draws the board after every tick.
    #[arg(long)]
    render: bool,
    /// Hides cells the enemy has not revealed when drawing.
    #[arg(long)]
    fog: bool,
}

/// Entry point for the Chase command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = settings::load(args.config.as_deref())?;
    if let Some(max_steps) = args.max_steps {
        config.max_steps = max_steps;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, "starting match");
    let mut session = Session::new(&config, seed).context("failed to set up match")?;

    let score = if args.render {
        let stdout = io::stdout();
        let mut backend = TextBackend::new(stdout.lock()).with_fog(args.fog);
        play_rendered(&mut session, &mut backend)?
    } else {
        let mut events = Vec::new();
        session.run(&mut events)
    };

    println!("Agent Score: {score}");
    Ok(())
}

fn play_rendered<B>(session: &mut Session, backend: &mut B) -> Result<u32>
where
    B: RenderingBackend,
{
    let mut events = Vec::new();
    backend.present(&Scene::capture(session.world(), session.enemy_path()))?;
    loop {
        events.clear();
        let outcome = session.tick(&mut events);
        backend.present(&Scene::capture(session.world(), session.enemy_path()))?;
        if let TickOutcome::Finished { score } = outcome {
            return Ok(score);
        }
    }
}
