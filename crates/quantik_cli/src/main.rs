//! Quantik - terminal launcher
//!
//! Play against the search AI, watch it play itself, or inspect saved
//! positions.

#![warn(missing_docs)]

mod cli;
mod orchestrator;
mod players;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use orchestrator::Orchestrator;
use players::{AiPlayer, Contestant, HumanPlayer};
use quantik::{Ai, AiConfig, Game, GameSnapshot, QuantikConfig};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Play {
            load,
            save,
            human_second,
            seed,
        } => run_play(&config, load, save, human_second, seed),
        Command::Selfplay { seed, save } => run_selfplay(&config, seed, save),
        Command::Suggest { snapshot, seed } => run_suggest(&config, &snapshot, seed),
        Command::Show { snapshot } => run_show(&snapshot),
    }
}

/// Reads the configuration file, or falls back to defaults.
fn load_config(path: Option<&Path>) -> Result<QuantikConfig> {
    match path {
        Some(path) => Ok(QuantikConfig::from_file(path)?),
        None => Ok(QuantikConfig::default()),
    }
}

/// Applies a command-line seed over the configured one.
fn ai_config(config: &QuantikConfig, seed: Option<u64>) -> AiConfig {
    match seed {
        Some(seed) => config.ai().clone().with_seed(seed),
        None => config.ai().clone(),
    }
}

/// A fresh game with the configured colors, or a saved one.
fn starting_game(config: &QuantikConfig, load: Option<&Path>) -> Result<Game> {
    match load {
        Some(path) => GameSnapshot::load(path)
            .with_context(|| format!("Failed to load snapshot {}", path.display())),
        None => Ok(Game::with_colors(
            config.players().first_color().clone(),
            config.players().second_color().clone(),
        )),
    }
}

/// Human against the AI on stdin/stdout.
#[instrument(skip(config))]
fn run_play(
    config: &QuantikConfig,
    load: Option<PathBuf>,
    save: Option<PathBuf>,
    human_second: bool,
    seed: Option<u64>,
) -> Result<()> {
    let game = starting_game(config, load.as_deref())?;
    let human: Box<dyn Contestant> = Box::new(HumanPlayer::new(
        "You",
        std::io::stdin().lock(),
        std::io::stdout(),
    ));
    let ai: Box<dyn Contestant> = Box::new(AiPlayer::new(
        "Computer",
        Ai::from_config(ai_config(config, seed)),
    ));
    let (first, second) = if human_second { (ai, human) } else { (human, ai) };

    let mut orchestrator = Orchestrator::new(game, first, second, std::io::stdout());
    if let Some(path) = save {
        orchestrator = orchestrator.save_to(path);
    }
    let result = orchestrator.run()?;
    info!(?result, "Game finished");
    Ok(())
}

/// AI against AI.
#[instrument(skip(config))]
fn run_selfplay(config: &QuantikConfig, seed: Option<u64>, save: Option<PathBuf>) -> Result<()> {
    let first_config = ai_config(config, seed);
    let second_config = match first_config.seed() {
        Some(seed) => first_config.clone().with_seed(seed.wrapping_add(1)),
        None => first_config.clone(),
    };
    let game = starting_game(config, None)?;
    let first = Box::new(AiPlayer::new("AI 1", Ai::from_config(first_config)));
    let second = Box::new(AiPlayer::new("AI 2", Ai::from_config(second_config)));

    let mut orchestrator = Orchestrator::new(game, first, second, std::io::stdout());
    if let Some(path) = save {
        orchestrator = orchestrator.save_to(path);
    }
    let result = orchestrator.run()?;
    info!(?result, "Self-play finished");
    Ok(())
}

/// Prints the score buckets and the chosen move for a saved position.
#[instrument(skip(config))]
fn run_suggest(config: &QuantikConfig, snapshot: &Path, seed: Option<u64>) -> Result<()> {
    let game = starting_game(config, Some(snapshot))?;
    let mut ai = Ai::from_config(ai_config(config, seed));

    println!("{}\n", game);
    for (score, shapes) in ai.calculate_move_scores(&game).iter() {
        for (shape, cells) in shapes {
            let cells: Vec<String> = cells.iter().map(ToString::to_string).collect();
            println!("{:>4}  {:<8} {}", score, shape.to_string(), cells.join(" "));
        }
    }

    let (shape, cell) = ai.calculate_best_move(&game)?;
    println!(
        "\nSuggested: {} plays {} at {}",
        game.active_player().name(),
        shape,
        cell
    );
    Ok(())
}

/// Prints a saved position.
fn run_show(snapshot: &Path) -> Result<()> {
    let game = GameSnapshot::load(snapshot)
        .with_context(|| format!("Failed to load snapshot {}", snapshot.display()))?;
    println!("{}", game);
    Ok(())
}
