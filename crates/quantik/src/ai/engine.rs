//! Move selection over scored root moves.

use super::SearchError;
use super::scores::MoveScores;
use super::search::Search;
use crate::config::{AiConfig, ScoringMode};
use crate::coordinate::Coordinate;
use crate::game::Game;
use crate::types::PieceShape;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument, warn};

/// Score for an immediate win in [`ScoringMode::Immediate`].
const IMMEDIATE_WIN: i32 = 100;

/// Score for any other move in [`ScoringMode::Immediate`].
const IMMEDIATE_OTHER: i32 = 50;

/// Computer player.
///
/// Owns its random source, so the same seed and the same position always
/// produce the same move.
#[derive(Debug, Clone)]
pub struct Ai {
    config: AiConfig,
    rng: StdRng,
}

impl Ai {
    /// Creates an AI with default settings, seeded from the OS.
    pub fn new() -> Self {
        Self::from_config(AiConfig::default())
    }

    /// Creates an AI from configuration. An unset seed means OS entropy.
    #[instrument(skip_all, fields(horizon = config.horizon(), scoring = %config.scoring()))]
    pub fn from_config(config: AiConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => StdRng::seed_from_u64(*seed),
            None => StdRng::from_os_rng(),
        };
        debug!(seed = ?config.seed(), "AI created");
        Self { config, rng }
    }

    /// Creates an AI with default settings and a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_config(AiConfig::default().with_seed(seed))
    }

    /// The search settings.
    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Scores every legal move of the player on turn.
    #[instrument(skip_all, fields(player = %game.active_player_id()))]
    pub fn calculate_move_scores(&self, game: &Game) -> MoveScores {
        let mut scores = MoveScores::new();
        let root = game.active_player_id();
        let mut nodes = 0;

        for (piece, coordinate) in game.legal_moves() {
            let score = match self.config.scoring() {
                ScoringMode::Immediate => {
                    if game.is_winning_move(piece.shape(), coordinate) {
                        IMMEDIATE_WIN
                    } else {
                        IMMEDIATE_OTHER
                    }
                }
                ScoringMode::Lookahead => {
                    let mut search =
                        Search::new(root, *self.config.horizon(), *self.config.node_budget());
                    let scored = search.score(game, &piece, coordinate, 0, true);
                    nodes += search.nodes();
                    match scored {
                        Ok(score) => score,
                        Err(error) => {
                            // Only reachable if legal_moves and the rules disagree.
                            warn!(%error, "Skipping unplayable candidate");
                            continue;
                        }
                    }
                }
            };
            scores.insert(score, piece.shape(), coordinate);
        }

        debug!(
            moves = scores.len(),
            best = ?scores.best_score(),
            nodes,
            "Moves scored"
        );
        scores
    }

    /// Picks a move from the best-scoring bucket.
    ///
    /// Shapes the opponent still holds are preferred when enabled, then a
    /// shape and a cell are drawn uniformly.
    #[instrument(skip_all, fields(player = %game.active_player_id()))]
    pub fn calculate_best_move(
        &mut self,
        game: &Game,
    ) -> Result<(PieceShape, Coordinate), SearchError> {
        let scores = self.calculate_move_scores(game);
        let (best, shapes) = scores.best_bucket().ok_or(SearchError::NoLegalMoves)?;

        let mut candidates: Vec<PieceShape> = shapes.keys().copied().collect();
        if *self.config.prefer_contested_shapes() {
            let contested = game.inactive_player().available_shapes();
            let preferred: Vec<PieceShape> = candidates
                .iter()
                .copied()
                .filter(|shape| contested.contains(*shape))
                .collect();
            if !preferred.is_empty() {
                candidates = preferred;
            }
        }

        let shape = *candidates
            .choose(&mut self.rng)
            .ok_or(SearchError::NoLegalMoves)?;
        let coordinate = *shapes
            .get(&shape)
            .and_then(|cells| cells.choose(&mut self.rng))
            .ok_or(SearchError::NoLegalMoves)?;

        debug!(score = best, %shape, %coordinate, "Move chosen");
        Ok((shape, coordinate))
    }
}

impl Default for Ai {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlayerId;

    fn at(column: u8, row: u8) -> Coordinate {
        Coordinate::new(column, row).expect("on board")
    }

    fn winning_position() -> Game {
        let mut game = Game::new();
        for (shape, column, row) in [
            (PieceShape::Cylinder, 0, 0),
            (PieceShape::Triangle, 1, 0),
            (PieceShape::Plus, 3, 3),
            (PieceShape::Plus, 2, 0),
        ] {
            game.place(shape, at(column, row)).expect("legal");
        }
        game
    }

    #[test]
    fn test_takes_immediate_win() {
        let game = winning_position();
        let mut ai = Ai::with_seed(3);
        assert_eq!(
            ai.calculate_best_move(&game),
            Ok((PieceShape::Square, at(3, 0)))
        );
    }

    #[test]
    fn test_immediate_mode_buckets() {
        let game = winning_position();
        let ai = Ai::from_config(
            AiConfig::default()
                .with_seed(1)
                .with_scoring(ScoringMode::Immediate),
        );
        let scores = ai.calculate_move_scores(&game);
        let (best, shapes) = scores.best_bucket().expect("moves");
        assert_eq!(best, IMMEDIATE_WIN);
        assert_eq!(shapes[&PieceShape::Square], vec![at(3, 0)]);
        assert_eq!(scores.iter().count(), 2);
        assert_eq!(scores.len(), game.legal_moves().len());
    }

    #[test]
    fn test_no_legal_moves_after_win() {
        let mut game = winning_position();
        game.place(PieceShape::Square, at(3, 0)).expect("legal");
        assert_eq!(game.winner().map(|w| w.player), Some(PlayerId::One));

        let mut ai = Ai::with_seed(0);
        assert!(ai.calculate_move_scores(&game).is_empty());
        assert_eq!(
            ai.calculate_best_move(&game),
            Err(SearchError::NoLegalMoves)
        );
    }

    #[test]
    fn test_prefers_contested_shapes() {
        // Player 2 has spent its Plus; every move scores the same.
        let mut game = Game::new();
        game.place(PieceShape::Cylinder, at(0, 0)).expect("legal");
        game.place(PieceShape::Plus, at(3, 3)).expect("legal");

        let ai_config = AiConfig::default().with_scoring(ScoringMode::Immediate);
        for seed in 0..16 {
            let mut ai = Ai::from_config(ai_config.clone().with_seed(seed));
            let (shape, _) = ai.calculate_best_move(&game).expect("moves");
            assert_ne!(shape, PieceShape::Plus);
        }
    }
}
