//! Lockout detection.

use super::exclusion::allowed_shapes;
use crate::board::Board;
use crate::types::ShapeSet;

/// A player is stalemated when nobody has won and their inventory is empty.
///
/// Pieces are never returned to inventory, so this can hold while empty
/// cells remain.
pub fn is_stalemate(has_winner: bool, available: ShapeSet) -> bool {
    !has_winner && available.is_empty()
}

/// Whether any of the `available` shapes fits on any empty cell.
pub fn has_legal_placement(board: &Board, available: ShapeSet) -> bool {
    board.empty_cells().any(|cell| {
        allowed_shapes(board, available, cell).is_some_and(|shapes| !shapes.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use crate::coordinate::Coordinate;
    use crate::types::{PieceShape, PlayerId};

    #[test]
    fn test_empty_inventory_is_stalemate() {
        assert!(is_stalemate(false, ShapeSet::EMPTY));
        assert!(!is_stalemate(true, ShapeSet::EMPTY));
        assert!(!is_stalemate(false, ShapeSet::FULL));
    }

    #[test]
    fn test_blocked_shape_has_no_placement() {
        // A cylinder in each quadrant blocks every other cell, since each
        // cell shares a quadrant with one of them.
        let mut board = Board::new();
        for (column, row) in [(0, 0), (2, 1), (1, 2), (3, 3)] {
            board.set(
                Coordinate::new(column, row).expect("on board"),
                Square::Occupied {
                    shape: PieceShape::Cylinder,
                    owner: PlayerId::One,
                },
            );
        }
        let only_cylinder = ShapeSet::EMPTY.with(PieceShape::Cylinder);
        assert!(!has_legal_placement(&board, only_cylinder));
        let only_plus = ShapeSet::EMPTY.with(PieceShape::Plus);
        assert!(has_legal_placement(&board, only_plus));
        assert!(!has_legal_placement(&board, ShapeSet::EMPTY));
    }
}
