//! Core domain types: shapes, pieces, and players.

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// The four piece shapes. Each player owns exactly one of each.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[strum(ascii_case_insensitive)]
pub enum PieceShape {
    /// Round piece.
    Cylinder,
    /// Pointed piece. Older saves spell it "Triange".
    #[strum(to_string = "Triangle", serialize = "Triange")]
    Triangle,
    /// Cross-shaped piece.
    Plus,
    /// Cube-shaped piece.
    Square,
}

impl PieceShape {
    /// All shapes in canonical order.
    pub const ALL: [PieceShape; 4] = [
        PieceShape::Cylinder,
        PieceShape::Triangle,
        PieceShape::Plus,
        PieceShape::Square,
    ];

    /// Position of the shape in [`PieceShape::ALL`].
    pub fn index(self) -> usize {
        match self {
            PieceShape::Cylinder => 0,
            PieceShape::Triangle => 1,
            PieceShape::Plus => 2,
            PieceShape::Square => 3,
        }
    }

    /// Single-letter board symbol (upper case).
    pub fn symbol(self) -> char {
        match self {
            PieceShape::Cylinder => 'C',
            PieceShape::Triangle => 'T',
            PieceShape::Plus => 'P',
            PieceShape::Square => 'S',
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

/// A set of shapes packed into a bit mask.
///
/// Used for exclusion sets and win checks, which run for every node of the
/// search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ShapeSet(u8);

impl ShapeSet {
    /// The empty set.
    pub const EMPTY: ShapeSet = ShapeSet(0);

    /// Every shape.
    pub const FULL: ShapeSet = ShapeSet(0b1111);

    /// Adds a shape.
    pub fn insert(&mut self, shape: PieceShape) {
        self.0 |= shape.bit();
    }

    /// Returns a copy with the shape added.
    pub fn with(mut self, shape: PieceShape) -> Self {
        self.insert(shape);
        self
    }

    /// Whether the shape is in the set.
    pub fn contains(self, shape: PieceShape) -> bool {
        self.0 & shape.bit() != 0
    }

    /// Number of distinct shapes.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set holds no shape.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Shapes in `self` that are not in `other`.
    pub fn difference(self, other: ShapeSet) -> Self {
        Self(self.0 & !other.0)
    }

    /// Iterates the shapes in canonical order.
    pub fn iter(self) -> impl Iterator<Item = PieceShape> {
        PieceShape::iter().filter(move |s| self.contains(*s))
    }
}

impl FromIterator<PieceShape> for ShapeSet {
    fn from_iter<I: IntoIterator<Item = PieceShape>>(iter: I) -> Self {
        let mut set = ShapeSet::EMPTY;
        for shape in iter {
            set.insert(shape);
        }
        set
    }
}

/// Seat at the table. Player one always moves first in a fresh game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum PlayerId {
    /// First seat.
    #[strum(to_string = "player 1")]
    One,
    /// Second seat.
    #[strum(to_string = "player 2")]
    Two,
}

impl PlayerId {
    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// One player's token of a given shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    shape: PieceShape,
    owner: PlayerId,
    position: Option<Coordinate>,
}

impl Piece {
    /// Creates an unplaced piece.
    pub fn new(shape: PieceShape, owner: PlayerId) -> Self {
        Self {
            shape,
            owner,
            position: None,
        }
    }

    /// The piece's shape.
    pub fn shape(&self) -> PieceShape {
        self.shape
    }

    /// The seat that owns the piece.
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Where the piece sits, or `None` while it is in inventory.
    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    /// Whether the piece is still in inventory.
    pub fn is_available(&self) -> bool {
        self.position.is_none()
    }

    /// Binds the piece to a cell.
    pub(crate) fn place(&mut self, coordinate: Coordinate) {
        self.position = Some(coordinate);
    }
}

/// A player: a display color plus one piece of each shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    color: String,
    pieces: [Piece; 4],
}

impl Player {
    /// Creates a player with all four pieces in inventory.
    pub fn new(id: PlayerId, color: impl Into<String>) -> Self {
        Self {
            id,
            color: color.into(),
            pieces: PieceShape::ALL.map(|shape| Piece::new(shape, id)),
        }
    }

    /// The player's seat.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// The display color, e.g. `"white"`.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// The color with its first letter capitalized, e.g. `"White"`.
    pub fn name(&self) -> String {
        let mut chars = self.color.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// All four pieces in canonical shape order.
    pub fn pieces(&self) -> &[Piece; 4] {
        &self.pieces
    }

    /// The piece of the given shape.
    pub fn piece(&self, shape: PieceShape) -> &Piece {
        &self.pieces[shape.index()]
    }

    pub(crate) fn piece_mut(&mut self, shape: PieceShape) -> &mut Piece {
        &mut self.pieces[shape.index()]
    }

    /// Pieces still in inventory.
    pub fn available_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(|piece| piece.is_available())
    }

    /// Pieces already on the board.
    pub fn used_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(|piece| !piece.is_available())
    }

    /// Shapes still in inventory.
    pub fn available_shapes(&self) -> ShapeSet {
        self.available_pieces().map(Piece::shape).collect()
    }
}
