//! Command-line interface for the quantik launcher.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Quantik - play the 4×4 shape placement game against a search AI
#[derive(Parser, Debug)]
#[command(name = "quantik")]
#[command(about = "Play Quantik in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play against the AI on stdin/stdout
    Play {
        /// Resume from a saved snapshot
        #[arg(long)]
        load: Option<PathBuf>,

        /// Write a snapshot after every move
        #[arg(long)]
        save: Option<PathBuf>,

        /// Take the second seat instead of the first
        #[arg(long)]
        human_second: bool,

        /// Seed for the AI's tie-breaking
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Let the AI play both sides
    Selfplay {
        /// Seed for the first AI; the second uses the next value
        #[arg(long)]
        seed: Option<u64>,

        /// Write a snapshot after every move
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Print the AI's move for a saved position
    Suggest {
        /// Snapshot to analyse
        #[arg(long)]
        snapshot: PathBuf,

        /// Seed for the AI's tie-breaking
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a saved position
    Show {
        /// Snapshot to print
        #[arg(long)]
        snapshot: PathBuf,
    },
}
