//! Single occupancy invariant: no two pieces share a cell.

use super::Invariant;
use crate::game::Game;

/// Invariant: at most one piece, across both players, per cell.
pub struct SingleOccupancyInvariant;

impl Invariant<Game> for SingleOccupancyInvariant {
    fn holds(game: &Game) -> bool {
        let mut seen = [false; crate::coordinate::CELL_COUNT];
        for player in game.players() {
            for piece in player.used_pieces() {
                let Some(cell) = piece.position() else {
                    continue;
                };
                if std::mem::replace(&mut seen[cell.index()], true) {
                    return false;
                }
            }
        }
        true
    }

    fn description() -> &'static str {
        "At most one piece occupies each cell"
    }
}
