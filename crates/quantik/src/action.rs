//! First-class placement actions and the reasons a placement is refused.

use crate::coordinate::Coordinate;
use crate::types::{PieceShape, PlayerId};
use serde::{Deserialize, Serialize};

/// A placement: a player putting one of their pieces on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// The player placing the piece.
    pub player: PlayerId,
    /// Shape of the piece being placed.
    pub shape: PieceShape,
    /// Target cell.
    pub coordinate: Coordinate,
}

impl Placement {
    /// Creates a new placement.
    pub fn new(player: PlayerId, shape: PieceShape, coordinate: Coordinate) -> Self {
        Self {
            player,
            shape,
            coordinate,
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} places {} at {}",
            self.player, self.shape, self.coordinate
        )
    }
}

/// Why a placement was refused. The game is never modified when one of
/// these is returned, except for [`IllegalMove::InvariantViolation`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// The game already has a winner.
    #[display("Game is already over")]
    GameOver,

    /// The piece belongs to the player who is not on turn.
    #[display("It is not {}'s turn", _0)]
    NotYourTurn(PlayerId),

    /// The piece is already on the board.
    #[display("{} has already been placed", _0)]
    PieceAlreadyPlaced(PieceShape),

    /// The target cell holds a piece.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Coordinate),

    /// The same shape already sits in the cell's row, column, or quadrant.
    #[display("{} is excluded at {}", shape, coordinate)]
    ShapeExcluded {
        /// Shape that was refused.
        shape: PieceShape,
        /// Cell it was refused on.
        coordinate: Coordinate,
    },

    /// A postcondition failed after the placement was applied.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for IllegalMove {}
