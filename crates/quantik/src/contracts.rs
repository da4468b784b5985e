//! Contract-based validation for placements.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::{IllegalMove, Placement};
use crate::game::Game;
use crate::invariants::{InvariantSet, QuantikInvariants};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), IllegalMove>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), IllegalMove>;
}

// ─────────────────────────────────────────────────────────────
//  Placement Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: nobody has won yet.
pub struct GameNotOver;

impl GameNotOver {
    /// Fails once a winner is recorded.
    pub fn check(_placement: &Placement, game: &Game) -> Result<(), IllegalMove> {
        match game.winner() {
            Some(_) => Err(IllegalMove::GameOver),
            None => Ok(()),
        }
    }
}

/// Precondition: the placing player is on turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails when the piece's owner is not the active player.
    pub fn check(placement: &Placement, game: &Game) -> Result<(), IllegalMove> {
        if placement.player != game.active_player_id() {
            Err(IllegalMove::NotYourTurn(placement.player))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails when any piece sits on the target cell.
    pub fn check(placement: &Placement, game: &Game) -> Result<(), IllegalMove> {
        if game.board().is_empty(placement.coordinate) {
            Ok(())
        } else {
            Err(IllegalMove::CellOccupied(placement.coordinate))
        }
    }
}

/// Precondition: the piece is still in the player's inventory.
pub struct PieceInInventory;

impl PieceInInventory {
    /// Fails when the piece has already been placed.
    pub fn check(placement: &Placement, game: &Game) -> Result<(), IllegalMove> {
        let piece = game.player(placement.player).piece(placement.shape);
        if piece.is_available() {
            Ok(())
        } else {
            Err(IllegalMove::PieceAlreadyPlaced(placement.shape))
        }
    }
}

/// Precondition: no peer of the target cell holds the same shape.
pub struct ShapeAllowed;

impl ShapeAllowed {
    /// Fails when the shape is in the cell's exclusion set.
    pub fn check(placement: &Placement, game: &Game) -> Result<(), IllegalMove> {
        let excluded = game.exclusion_set(placement.coordinate);
        if excluded.contains(placement.shape) {
            Err(IllegalMove::ShapeExcluded {
                shape: placement.shape,
                coordinate: placement.coordinate,
            })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition: all placement checks in order.
pub struct LegalPlacement;

impl LegalPlacement {
    /// Validates all preconditions for a placement.
    pub fn check(placement: &Placement, game: &Game) -> Result<(), IllegalMove> {
        GameNotOver::check(placement, game)?;
        PlayersTurn::check(placement, game)?;
        CellIsEmpty::check(placement, game)?;
        PieceInInventory::check(placement, game)?;
        ShapeAllowed::check(placement, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Placement Postconditions
// ─────────────────────────────────────────────────────────────

/// Postcondition: exactly one cell went from empty to occupied and no
/// other cell changed.
pub struct MonotonicPlacement;

impl MonotonicPlacement {
    /// Compares the boards before and after a placement.
    #[instrument(level = "trace", skip_all)]
    pub fn holds(before: &Game, after: &Game) -> bool {
        let mut changed = 0;
        for (old, new) in before
            .board()
            .squares()
            .iter()
            .zip(after.board().squares().iter())
        {
            if old != new {
                if *old != crate::board::Square::Empty {
                    warn!(?old, ?new, "Occupied square overwritten");
                    return false;
                }
                changed += 1;
            }
        }
        changed == 1
    }
}

/// Contract for placement actions.
///
/// Preconditions:
/// - Game not over
/// - Player on turn
/// - Cell empty
/// - Piece in inventory
/// - Shape not excluded
///
/// Postconditions:
/// - Exactly one new piece on the board
/// - Game invariants hold
pub struct PlacementContract;

impl Contract<Game, Placement> for PlacementContract {
    fn pre(game: &Game, action: &Placement) -> Result<(), IllegalMove> {
        LegalPlacement::check(action, game)
    }

    fn post(before: &Game, after: &Game) -> Result<(), IllegalMove> {
        if !MonotonicPlacement::holds(before, after) {
            return Err(IllegalMove::InvariantViolation(
                "Postcondition failed: placement did not add exactly one piece".to_string(),
            ));
        }
        QuantikInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            IllegalMove::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
