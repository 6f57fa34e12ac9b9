#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a headless Kitchen Rush session.

mod script;

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use kitchen_core::{Event, Intent};
use kitchen_engine::{Kitchen, KitchenConfig};
use tracing::{debug, info};

use crate::script::Step;

/// Headless Kitchen Rush runner.
#[derive(Debug, Parser)]
#[command(name = "kitchen-rush", version, about = "Runs a headless Kitchen Rush session")]
struct Cli {
    /// TOML file overriding the session configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Simulated milliseconds per frame.
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
    /// Intent script to replay before the kitchen idles until closing time.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Overrides the configured order seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Increases logging verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Entry point for the Kitchen Rush command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    ensure!(cli.frame_ms > 0, "--frame-ms must be at least 1");

    let mut config = match &cli.config {
        Some(path) => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("failed to read config at {}", path.display()))?;
            KitchenConfig::from_toml_str(&contents)
                .with_context(|| format!("failed to load config from {}", path.display()))?
        }
        None => KitchenConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }

    let steps = match &cli.script {
        Some(path) => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("failed to read script at {}", path.display()))?;
            script::parse(&source)
                .with_context(|| format!("failed to parse script {}", path.display()))?
        }
        None => Vec::new(),
    };

    let mut kitchen = Kitchen::new(&config).context("invalid kitchen configuration")?;
    println!("{}", kitchen.welcome_banner());

    let frame = Duration::from_millis(cli.frame_ms);
    let mut delivered = 0;
    for step in steps {
        delivered += run_step(&mut kitchen, step, frame);
    }
    while kitchen.outcome().is_none() {
        delivered += report(kitchen.advance(frame));
    }

    let score = kitchen.outcome().map_or(0, |outcome| outcome.score);
    println!("Kitchen closed: {delivered} orders delivered, score {score}");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .init();
    debug!(verbose, "logging initialised");
}

fn run_step(kitchen: &mut Kitchen, step: Step, frame: Duration) -> usize {
    match step {
        Step::Move {
            direction,
            duration,
        } => {
            let mut delivered = 0;
            let mut elapsed = Duration::ZERO;
            while elapsed < duration && kitchen.outcome().is_none() {
                let _ = kitchen.handle_intent(Intent::Move(direction));
                delivered += report(kitchen.advance(frame));
                elapsed += frame;
            }
            delivered
        }
        Step::Wait(duration) => {
            let mut delivered = 0;
            let mut elapsed = Duration::ZERO;
            while elapsed < duration && kitchen.outcome().is_none() {
                delivered += report(kitchen.advance(frame));
                elapsed += frame;
            }
            delivered
        }
        Step::Interact => report(kitchen.handle_intent(Intent::Interact)),
        Step::Cut => report(kitchen.handle_intent(Intent::Cut)),
    }
}

/// Logs notable events and returns how many orders they completed.
fn report(events: &[Event]) -> usize {
    let mut delivered = 0;
    for event in events {
        match event {
            Event::OrderIssued {
                recipe, lifetime, ..
            } => info!(?recipe, ?lifetime, "new order"),
            Event::OrderCompleted { order, tip, .. } => {
                delivered += 1;
                info!(order = order.get(), tip, "order delivered");
            }
            Event::OrderExpired { order } => info!(order = order.get(), "order expired"),
            Event::InteractionRejected { reason } => debug!(?reason, "interaction rejected"),
            Event::SessionEnded { score } => info!(score, "session ended"),
            _ => {}
        }
    }
    delivered
}
