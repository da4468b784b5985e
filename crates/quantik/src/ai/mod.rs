//! Move search.
//!
//! The search clones the game for every hypothetical placement, scores the
//! outcome by minimax to a shallow horizon, and buckets the root moves by
//! score. [`Ai`] picks among the best bucket with a seedable random source.

mod engine;
mod scores;
mod search;

pub use engine::Ai;
pub use scores::MoveScores;
pub use search::{enumerate_legal_moves, score_move};

/// Why the search could not produce a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// The player on turn has nothing to place, or the game is over.
    #[display("No legal moves available")]
    NoLegalMoves,
}

impl std::error::Error for SearchError {}
