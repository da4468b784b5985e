//! Game orchestration between contestants.

use crate::players::Contestant;
use anyhow::{Context, Result};
use quantik::{Game, GameSnapshot, PlacementOutcome, PlayerId};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, instrument};

/// How a game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    /// A contestant completed a group.
    Won {
        /// Winning seat.
        player: PlayerId,
        /// Contestant name.
        name: String,
    },
    /// The player on turn has no pieces left.
    Stalemate,
    /// The player on turn holds pieces but none fits anywhere.
    LockedOut(PlayerId),
}

/// Runs a game between two contestants, printing the board as it goes.
pub struct Orchestrator<W> {
    game: Game,
    first: Box<dyn Contestant>,
    second: Box<dyn Contestant>,
    output: W,
    save_path: Option<PathBuf>,
}

impl<W: Write> Orchestrator<W> {
    /// Creates an orchestrator for a game in any state.
    pub fn new(
        game: Game,
        first: Box<dyn Contestant>,
        second: Box<dyn Contestant>,
        output: W,
    ) -> Self {
        Self {
            game,
            first,
            second,
            output,
            save_path: None,
        }
    }

    /// Saves a snapshot to `path` after every move.
    pub fn save_to(mut self, path: PathBuf) -> Self {
        self.save_path = Some(path);
        self
    }

    /// The game as it stands.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs the game loop until nobody can move.
    #[instrument(skip_all)]
    pub fn run(&mut self) -> Result<GameResult> {
        info!("Starting game orchestration");
        writeln!(self.output, "{}\n", self.game)?;

        loop {
            if self.game.is_over() {
                let result = self.result();
                info!(?result, "Game over");
                self.announce(&result)?;
                return Ok(result);
            }

            let seat = self.game.active_player_id();
            let contestant = match seat {
                PlayerId::One => &mut self.first,
                PlayerId::Two => &mut self.second,
            };
            let name = contestant.name().to_string();

            debug!(player = %name, "Waiting for move");
            let (shape, cell) = contestant.choose_move(&self.game)?;
            let outcome = self
                .game
                .place(shape, cell)
                .with_context(|| format!("{} chose an illegal move", name))?;

            writeln!(self.output, "{} plays {} at {}", name, shape, cell)?;
            if let PlacementOutcome::Won(winner) = outcome {
                debug!(kind = %winner.line.kind, "Winning placement");
            }
            writeln!(self.output, "{}\n", self.game)?;

            if let Some(path) = &self.save_path {
                GameSnapshot::save(&self.game, path)
                    .with_context(|| format!("Failed to save {}", path.display()))?;
            }
        }
    }

    fn contestant_name(&self, seat: PlayerId) -> &str {
        match seat {
            PlayerId::One => self.first.name(),
            PlayerId::Two => self.second.name(),
        }
    }

    fn result(&self) -> GameResult {
        match self.game.winner() {
            Some(winner) => GameResult::Won {
                player: winner.player,
                name: self.contestant_name(winner.player).to_string(),
            },
            None if self.game.in_stale_mate() => GameResult::Stalemate,
            None => GameResult::LockedOut(self.game.active_player_id()),
        }
    }

    fn announce(&mut self, result: &GameResult) -> Result<()> {
        match result {
            GameResult::Won { name, .. } => writeln!(self.output, "{} wins!", name)?,
            GameResult::Stalemate => writeln!(self.output, "Stalemate.")?,
            GameResult::LockedOut(seat) => {
                let name = self.contestant_name(*seat).to_string();
                writeln!(self.output, "{} has no legal placement.", name)?
            }
        }
        Ok(())
    }
}
