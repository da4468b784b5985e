//! Winner invariant: a recorded winning group really holds four shapes.

use super::Invariant;
use crate::game::Game;
use crate::types::PieceShape;

/// Invariant: if a winner is recorded, its four cells hold four distinct
/// shapes.
pub struct WinnerLineInvariant;

impl Invariant<Game> for WinnerLineInvariant {
    fn holds(game: &Game) -> bool {
        match game.winner() {
            Some(winner) => {
                game.board().shapes_in(&winner.coordinates()).len() == PieceShape::ALL.len()
            }
            None => true,
        }
    }

    fn description() -> &'static str {
        "A recorded winning group holds all four shapes"
    }
}
