//! Board consistency invariant: the occupancy board mirrors the inventories.

use super::Invariant;
use crate::board::Square;
use crate::game::Game;

/// Invariant: every placed piece appears on the board at its position, and
/// the board holds nothing else.
pub struct BoardMatchesInventoryInvariant;

impl Invariant<Game> for BoardMatchesInventoryInvariant {
    fn holds(game: &Game) -> bool {
        let mut placed = 0;
        for player in game.players() {
            for piece in player.used_pieces() {
                let Some(cell) = piece.position() else {
                    continue;
                };
                let expected = Square::Occupied {
                    shape: piece.shape(),
                    owner: piece.owner(),
                };
                if game.board().get(cell) != expected {
                    return false;
                }
                placed += 1;
            }
        }
        game.board().occupied_count() == placed
    }

    fn description() -> &'static str {
        "Board squares match the players' placed pieces"
    }
}
