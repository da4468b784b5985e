//! Shape exclusion: a shape may not repeat within a row, column, or quadrant.

use crate::board::Board;
use crate::coordinate::{Coordinate, interesting_positions_for};
use crate::types::ShapeSet;

/// Shapes already present among the cell's row, column, and quadrant peers.
///
/// Ownership plays no part: an opponent's cylinder blocks your cylinder just
/// as your own would.
pub fn exclusion_set(board: &Board, coordinate: Coordinate) -> ShapeSet {
    board.shapes_in(interesting_positions_for(coordinate).all())
}

/// The shapes from `available` that may be placed on the cell.
///
/// Returns `None` when the cell is occupied.
pub fn allowed_shapes(
    board: &Board,
    available: ShapeSet,
    coordinate: Coordinate,
) -> Option<ShapeSet> {
    if !board.is_empty(coordinate) {
        return None;
    }
    Some(available.difference(exclusion_set(board, coordinate)))
}
