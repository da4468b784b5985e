//! Board coordinates and the fixed peer-group geometry of the 4×4 grid.
//!
//! Everything here is a pure function of the coordinate. Legality exclusion
//! and win detection both read their cells from [`PeerGroups`], so the two
//! rules can never disagree about which cells belong together.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 4;

/// Number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// A cell on the board, addressed by column and row, both in `0..4`.
///
/// Serialized as `[column, row]`; out-of-range pairs fail to deserialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[i64; 2]", into = "[u8; 2]")]
pub struct Coordinate {
    row: u8,
    column: u8,
}

/// Error building a coordinate from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CoordinateError {
    /// Column or row outside `0..4`.
    #[display("Coordinate ({}, {}) is outside the 4x4 board", column, row)]
    OutOfRange {
        /// Requested column.
        column: i64,
        /// Requested row.
        row: i64,
    },
    /// Text that is not of the form `column,row`.
    #[display("Cannot parse {:?} as column,row", _0)]
    Unparsable(#[error(not(source))] String),
}

impl Coordinate {
    /// Every cell in row-major order.
    pub const ALL: [Coordinate; CELL_COUNT] = {
        let mut cells = [Coordinate { row: 0, column: 0 }; CELL_COUNT];
        let mut index = 0;
        while index < CELL_COUNT {
            cells[index] = Coordinate {
                row: (index / BOARD_SIZE as usize) as u8,
                column: (index % BOARD_SIZE as usize) as u8,
            };
            index += 1;
        }
        cells
    };

    /// Creates a coordinate, rejecting values outside the board.
    pub fn new(column: u8, row: u8) -> Result<Self, CoordinateError> {
        Self::from_signed(i64::from(column), i64::from(row))
    }

    /// Creates a coordinate from untrusted signed values.
    pub fn from_signed(column: i64, row: i64) -> Result<Self, CoordinateError> {
        let size = i64::from(BOARD_SIZE);
        if !(0..size).contains(&column) || !(0..size).contains(&row) {
            return Err(CoordinateError::OutOfRange { column, row });
        }
        Ok(Self {
            row: row as u8,
            column: column as u8,
        })
    }

    /// Looks up the coordinate with the given row-major index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Column, `0..4`.
    pub fn column(self) -> u8 {
        self.column
    }

    /// Row, `0..4`.
    pub fn row(self) -> u8 {
        self.row
    }

    /// Row-major index, `0..16`.
    pub fn index(self) -> usize {
        usize::from(self.row) * usize::from(BOARD_SIZE) + usize::from(self.column)
    }

    /// The quadrant containing this cell.
    pub fn quadrant(self) -> Quadrant {
        match (self.column < 2, self.row < 2) {
            (true, true) => Quadrant::TopLeft,
            (true, false) => Quadrant::BottomLeft,
            (false, true) => Quadrant::TopRight,
            (false, false) => Quadrant::BottomRight,
        }
    }
}

impl TryFrom<[i64; 2]> for Coordinate {
    type Error = CoordinateError;

    fn try_from([column, row]: [i64; 2]) -> Result<Self, Self::Error> {
        Self::from_signed(column, row)
    }
}

impl From<Coordinate> for [u8; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.column, coordinate.row]
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    /// Parses `"column,row"`, with optional parentheses and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let mut parts = trimmed.split(',').map(|p| p.trim().parse::<i64>());
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(column)), Some(Ok(row)), None) => Self::from_signed(column, row),
            _ => Err(CoordinateError::Unparsable(s.to_string())),
        }
    }
}

/// One of the four fixed 2×2 blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
pub enum Quadrant {
    /// Columns 0-1, rows 0-1.
    TopLeft,
    /// Columns 0-1, rows 2-3.
    BottomLeft,
    /// Columns 2-3, rows 0-1.
    TopRight,
    /// Columns 2-3, rows 2-3.
    BottomRight,
}

impl Quadrant {
    /// The four cells of this quadrant in row-major order.
    pub fn cells(self) -> [Coordinate; 4] {
        let (column, row) = match self {
            Quadrant::TopLeft => (0, 0),
            Quadrant::BottomLeft => (0, 2),
            Quadrant::TopRight => (2, 0),
            Quadrant::BottomRight => (2, 2),
        };
        [(0, 0), (1, 0), (0, 1), (1, 1)].map(|(right, down)| Coordinate {
            row: row + down,
            column: column + right,
        })
    }
}

/// Which kind of cell group a peer set or winning line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GroupKind {
    /// Same row.
    Row,
    /// Same column.
    Column,
    /// Same 2×2 quadrant.
    Quadrant,
}

/// The cells that share a row, column, or quadrant with a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PeerGroups {
    /// The other three cells in the row.
    row: [Coordinate; 3],
    /// The other three cells in the column.
    column: [Coordinate; 3],
    /// The other three cells in the quadrant.
    quadrant: [Coordinate; 3],
    /// Union of the three groups without duplicates.
    all: Vec<Coordinate>,
}

impl PeerGroups {
    /// Groups in win-check order: row, column, quadrant.
    pub fn groups(&self) -> [(GroupKind, &[Coordinate; 3]); 3] {
        [
            (GroupKind::Row, &self.row),
            (GroupKind::Column, &self.column),
            (GroupKind::Quadrant, &self.quadrant),
        ]
    }
}

/// Computes the peer groups of a coordinate.
#[instrument(level = "trace")]
pub fn interesting_positions_for(coordinate: Coordinate) -> PeerGroups {
    let row = peers(
        (0..BOARD_SIZE).map(|column| Coordinate {
            row: coordinate.row,
            column,
        }),
        coordinate,
    );
    let column = peers(
        (0..BOARD_SIZE).map(|row| Coordinate {
            row,
            column: coordinate.column,
        }),
        coordinate,
    );
    let quadrant = peers(coordinate.quadrant().cells().into_iter(), coordinate);

    let mut all = Vec::with_capacity(9);
    for cell in row.iter().chain(column.iter()).chain(quadrant.iter()) {
        if !all.contains(cell) {
            all.push(*cell);
        }
    }

    PeerGroups {
        row,
        column,
        quadrant,
        all,
    }
}

fn peers(cells: impl Iterator<Item = Coordinate>, exclude: Coordinate) -> [Coordinate; 3] {
    let mut out = [exclude; 3];
    for (slot, cell) in out.iter_mut().zip(cells.filter(|cell| *cell != exclude)) {
        *slot = cell;
    }
    out
}
