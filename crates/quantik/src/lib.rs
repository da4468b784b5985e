//! Quantik - rules engine and move search
//!
//! Quantik is played on a 4×4 board split into four 2×2 quadrants. Each
//! player owns one Cylinder, Triangle, Plus and Square. A piece may not be
//! placed where the same shape already sits in its row, column, or quadrant,
//! and whoever completes a group holding all four shapes wins.
//!
//! # Architecture
//!
//! - **Rules**: pure legality and win checks over the occupancy [`Board`]
//! - **Game**: canonical state, guarded by placement contracts and invariants
//! - **AI**: minimax scoring on cloned state and seeded move selection
//! - **Snapshot**: JSON persistence of a position
//!
//! # Example
//!
//! ```
//! use quantik::{Ai, Coordinate, Game, PieceShape};
//!
//! let mut game = Game::new();
//! game.place(PieceShape::Plus, Coordinate::new(1, 1)?)?;
//!
//! let mut ai = Ai::with_seed(7);
//! let (shape, cell) = ai.calculate_best_move(&game)?;
//! game.place(shape, cell)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod ai;
mod board;
mod config;
mod contracts;
mod coordinate;
mod game;
mod snapshot;
mod types;

pub mod invariants;
pub mod rules;

// Crate-level exports
pub use action::{IllegalMove, Placement};
pub use ai::{Ai, MoveScores, SearchError, enumerate_legal_moves, score_move};
pub use board::{Board, Square};
pub use config::{AiConfig, ConfigError, DEFAULT_HORIZON, PlayersConfig, QuantikConfig, ScoringMode};
pub use contracts::{
    CellIsEmpty, Contract, GameNotOver, LegalPlacement, MonotonicPlacement, PieceInInventory,
    PlacementContract, PlayersTurn, ShapeAllowed,
};
pub use coordinate::{
    BOARD_SIZE, CELL_COUNT, Coordinate, CoordinateError, GroupKind, PeerGroups, Quadrant,
    interesting_positions_for,
};
pub use game::{
    AllowedPieces, DEFAULT_FIRST_COLOR, DEFAULT_SECOND_COLOR, Game, PlacementOutcome, Winner,
};
pub use invariants::{Invariant, InvariantSet, InvariantViolation, QuantikInvariants};
pub use rules::WinningLine;
pub use snapshot::{GameSnapshot, PlayerSnapshot, SnapshotError};
pub use types::{Piece, PieceShape, Player, PlayerId, ShapeSet};
