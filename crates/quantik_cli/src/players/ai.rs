//! Search-backed contestant.

use super::Contestant;
use anyhow::Result;
use quantik::{Ai, Coordinate, Game, PieceShape};
use tracing::debug;

/// Contestant driven by the minimax search.
pub struct AiPlayer {
    name: String,
    ai: Ai,
}

impl AiPlayer {
    /// Creates an AI contestant.
    pub fn new(name: impl Into<String>, ai: Ai) -> Self {
        Self {
            name: name.into(),
            ai,
        }
    }
}

impl Contestant for AiPlayer {
    fn choose_move(&mut self, game: &Game) -> Result<(PieceShape, Coordinate)> {
        debug!(ai = %self.name, "AI making move");
        let (shape, coordinate) = self.ai.calculate_best_move(game)?;
        debug!(ai = %self.name, %shape, %coordinate, "AI chose move");
        Ok((shape, coordinate))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
