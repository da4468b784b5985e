//! Properties every reachable [`Game`](crate::Game) satisfies.
//!
//! Each invariant is a zero-sized type so a group of them can be named as a
//! tuple and checked in one call after every placement.

/// A property of `S` that placements must preserve.
pub trait Invariant<S> {
    /// Whether the property holds.
    fn holds(state: &S) -> bool;

    /// One-line statement of the property, used in violation reports.
    fn description() -> &'static str;
}

/// An invariant that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Statement of the broken property.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps a property statement.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariants checked together, reporting every one that fails.
pub trait InvariantSet<S> {
    /// Checks each member in order.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A, B, C> InvariantSet<S> for (A, B, C)
where
    A: Invariant<S>,
    B: Invariant<S>,
    C: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let members: [(fn(&S) -> bool, &'static str); 3] = [
            (A::holds, A::description()),
            (B::holds, B::description()),
            (C::holds, C::description()),
        ];
        let violations: Vec<_> = members
            .into_iter()
            .filter(|(holds, _)| !holds(state))
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod board_matches_inventory;
pub mod single_occupancy;
pub mod winner_line;

pub use board_matches_inventory::BoardMatchesInventoryInvariant;
pub use single_occupancy::SingleOccupancyInvariant;
pub use winner_line::WinnerLineInvariant;

/// All Quantik invariants as a composable set.
pub type QuantikInvariants = (
    SingleOccupancyInvariant,
    BoardMatchesInventoryInvariant,
    WinnerLineInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use crate::coordinate::Coordinate;
    use crate::game::Game;
    use crate::types::{PieceShape, PlayerId};

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        let game = Game::new();
        assert!(QuantikInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut game = Game::new();
        for (shape, column, row) in [
            (PieceShape::Cylinder, 0, 0),
            (PieceShape::Triangle, 3, 3),
            (PieceShape::Plus, 2, 1),
        ] {
            let cell = Coordinate::new(column, row).expect("on board");
            game.place(shape, cell).expect("legal");
        }
        assert!(QuantikInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut game = Game::new();
        let cell = Coordinate::new(1, 1).expect("on board");
        game.place(PieceShape::Plus, cell).expect("legal");

        // Corrupt the board
        game.board.set(
            cell,
            Square::Occupied {
                shape: PieceShape::Square,
                owner: PlayerId::Two,
            },
        );

        let violations = QuantikInvariants::check_all(&game).expect_err("corrupted");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            BoardMatchesInventoryInvariant::description()
        );
    }
}
