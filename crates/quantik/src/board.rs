//! Occupancy index for the 4×4 board.

use crate::coordinate::{BOARD_SIZE, CELL_COUNT, Coordinate};
use crate::types::{PieceShape, PlayerId, ShapeSet};
use serde::{Deserialize, Serialize};

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// No piece.
    #[default]
    Empty,
    /// A piece of `shape` owned by `owner`.
    Occupied {
        /// Shape of the piece.
        shape: PieceShape,
        /// Owner of the piece.
        owner: PlayerId,
    },
}

impl Square {
    /// Shape on the square, if any.
    pub fn shape(self) -> Option<PieceShape> {
        match self {
            Square::Empty => None,
            Square::Occupied { shape, .. } => Some(shape),
        }
    }
}

/// Which piece sits on each cell.
///
/// Derived from the players' inventories and kept in step with them by the
/// game; it only exists so lookups do not scan both inventories.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// The square at a coordinate.
    pub fn get(&self, coordinate: Coordinate) -> Square {
        self.squares[coordinate.index()]
    }

    pub(crate) fn set(&mut self, coordinate: Coordinate, square: Square) {
        self.squares[coordinate.index()] = square;
    }

    /// Whether the cell holds no piece.
    pub fn is_empty(&self, coordinate: Coordinate) -> bool {
        self.get(coordinate) == Square::Empty
    }

    /// All squares in row-major order.
    pub fn squares(&self) -> &[Square; CELL_COUNT] {
        &self.squares
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Cells without a piece, in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        Coordinate::ALL
            .into_iter()
            .filter(|coordinate| self.is_empty(*coordinate))
    }

    /// Distinct shapes occupying the given cells.
    pub fn shapes_in<'a>(&self, cells: impl IntoIterator<Item = &'a Coordinate>) -> ShapeSet {
        cells
            .into_iter()
            .filter_map(|cell| self.get(*cell).shape())
            .collect()
    }

    /// Formats the board as text: upper case for player 1, lower case for
    /// player 2, `.` for empty cells. Row 0 is printed first.
    pub fn display(&self) -> String {
        let mut result = String::from("  0 1 2 3\n");
        for row in 0..BOARD_SIZE {
            result.push_str(&row.to_string());
            for column in 0..BOARD_SIZE {
                let index = usize::from(row) * usize::from(BOARD_SIZE) + usize::from(column);
                let symbol = match self.squares[index] {
                    Square::Empty => '.',
                    Square::Occupied {
                        shape,
                        owner: PlayerId::One,
                    } => shape.symbol(),
                    Square::Occupied {
                        shape,
                        owner: PlayerId::Two,
                    } => shape.symbol().to_ascii_lowercase(),
                };
                result.push(' ');
                result.push(symbol);
            }
            if row + 1 < BOARD_SIZE {
                result.push('\n');
            }
        }
        result
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}
