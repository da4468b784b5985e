//! Contestant trait and implementations.

mod ai;
mod human;

pub use ai::AiPlayer;
pub use human::HumanPlayer;

use anyhow::Result;
use quantik::{Coordinate, Game, PieceShape};

/// Anything that can take a turn.
pub trait Contestant {
    /// Chooses a move for the player on turn.
    ///
    /// The orchestrator applies the move; a refused move is an error.
    fn choose_move(&mut self, game: &Game) -> Result<(PieceShape, Coordinate)>;

    /// Returns the contestant's display name.
    fn name(&self) -> &str;
}
