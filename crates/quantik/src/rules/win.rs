//! Win detection: four distinct shapes in one row, column, or quadrant.

use crate::board::Board;
use crate::coordinate::{Coordinate, GroupKind, Quadrant, interesting_positions_for};
use crate::types::PieceShape;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A completed group: its kind and its four cells.
///
/// For a line found by [`winning_line`] the cells are the three peers
/// followed by the cell that completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    /// Row, column, or quadrant.
    pub kind: GroupKind,
    /// The four cells.
    pub cells: [Coordinate; 4],
}

/// Checks whether placing `shape` on `coordinate` completes a group.
///
/// The board is not modified: the hypothetical piece is added to each
/// group's shape set instead of to the board. Groups are tried in the order
/// row, column, quadrant and the first complete one is returned.
pub fn winning_line(
    board: &Board,
    shape: PieceShape,
    coordinate: Coordinate,
) -> Option<WinningLine> {
    let peers = interesting_positions_for(coordinate);
    for (kind, group) in peers.groups() {
        if board.shapes_in(group).with(shape).len() == PieceShape::ALL.len() {
            let [a, b, c] = *group;
            return Some(WinningLine {
                kind,
                cells: [a, b, c, coordinate],
            });
        }
    }
    None
}

/// Scans every row, column, and quadrant for one that already holds all
/// four shapes.
pub fn completed_line(board: &Board) -> Option<WinningLine> {
    let rows = (0..4u8).map(|row| {
        (
            GroupKind::Row,
            [0, 1, 2, 3].map(|column| Coordinate::ALL[usize::from(row) * 4 + column]),
        )
    });
    let columns = (0..4usize).map(|column| {
        (
            GroupKind::Column,
            [0, 1, 2, 3].map(|row| Coordinate::ALL[row * 4 + column]),
        )
    });
    let quadrants = Quadrant::iter().map(|q| (GroupKind::Quadrant, q.cells()));
    let full = PieceShape::ALL.len();

    rows.chain(columns)
        .chain(quadrants)
        .find(|(_, cells)| board.shapes_in(cells).len() == full)
        .map(|(kind, cells)| WinningLine { kind, cells })
}
