//! Score buckets for the root moves.

use crate::coordinate::Coordinate;
use crate::types::PieceShape;
use std::collections::BTreeMap;

/// Root moves grouped by score, then by shape.
///
/// Iteration runs from the highest score down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveScores {
    buckets: BTreeMap<i32, BTreeMap<PieceShape, Vec<Coordinate>>>,
}

impl MoveScores {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scored move.
    pub fn insert(&mut self, score: i32, shape: PieceShape, coordinate: Coordinate) {
        self.buckets
            .entry(score)
            .or_default()
            .entry(shape)
            .or_default()
            .push(coordinate);
    }

    /// Buckets from the highest score down.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &BTreeMap<PieceShape, Vec<Coordinate>>)> {
        self.buckets
            .iter()
            .rev()
            .map(|(score, shapes)| (*score, shapes))
    }

    /// The highest-scoring bucket.
    pub fn best_bucket(&self) -> Option<(i32, &BTreeMap<PieceShape, Vec<Coordinate>>)> {
        self.iter().next()
    }

    /// The highest score.
    pub fn best_score(&self) -> Option<i32> {
        self.buckets.keys().next_back().copied()
    }

    /// The score recorded for a move.
    pub fn score_of(&self, shape: PieceShape, coordinate: Coordinate) -> Option<i32> {
        self.iter().find_map(|(score, shapes)| {
            shapes
                .get(&shape)
                .filter(|cells| cells.contains(&coordinate))
                .map(|_| score)
        })
    }

    /// Number of scored moves.
    pub fn len(&self) -> usize {
        self.buckets
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Whether no move was scored.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(column: u8, row: u8) -> Coordinate {
        Coordinate::new(column, row).expect("on board")
    }

    #[test]
    fn test_iterates_highest_first() {
        let mut scores = MoveScores::new();
        scores.insert(-1, PieceShape::Plus, at(0, 0));
        scores.insert(1, PieceShape::Square, at(3, 0));
        scores.insert(-2, PieceShape::Plus, at(1, 1));
        scores.insert(-1, PieceShape::Cylinder, at(2, 2));

        let order: Vec<i32> = scores.iter().map(|(score, _)| score).collect();
        assert_eq!(order, vec![1, -1, -2]);
        assert_eq!(scores.best_score(), Some(1));
        assert_eq!(scores.len(), 4);
        assert_eq!(scores.score_of(PieceShape::Cylinder, at(2, 2)), Some(-1));
        assert_eq!(scores.score_of(PieceShape::Cylinder, at(0, 0)), None);
    }

    #[test]
    fn test_empty_table() {
        let scores = MoveScores::new();
        assert!(scores.is_empty());
        assert!(scores.best_bucket().is_none());
        assert_eq!(scores.best_score(), None);
    }
}
