//! Minimax scoring of a single candidate placement.

use crate::action::IllegalMove;
use crate::config::DEFAULT_HORIZON;
use crate::coordinate::Coordinate;
use crate::game::{Game, PlacementOutcome};
use crate::types::{Piece, PlayerId};
use tracing::trace;

/// Score for completing a group as the root player.
pub(crate) const WIN: i32 = 1;

/// Score for a position with no completed group at the horizon.
pub(crate) const NEUTRAL: i32 = 0;

/// Every legal (piece, cell) pair for the player on turn.
///
/// Cells in row-major order, shapes in canonical order within a cell.
pub fn enumerate_legal_moves(game: &Game) -> Vec<(Piece, Coordinate)> {
    game.legal_moves()
}

/// Scores placing `piece` on `coordinate` at the given depth.
///
/// `maximizing` is true when the piece belongs to the player the search is
/// run for. Uses the default horizon with no node budget. The game is not
/// modified.
pub fn score_move(
    game: &Game,
    piece: &Piece,
    coordinate: Coordinate,
    depth: u32,
    maximizing: bool,
) -> Result<i32, IllegalMove> {
    let root = if maximizing {
        piece.owner()
    } else {
        piece.owner().opponent()
    };
    Search::new(root, DEFAULT_HORIZON, None).score(game, piece, coordinate, depth, maximizing)
}

/// One scoring pass, rooted at a single player.
#[derive(Debug)]
pub(crate) struct Search {
    root: PlayerId,
    horizon: u32,
    node_budget: Option<u64>,
    nodes: u64,
}

impl Search {
    pub(crate) fn new(root: PlayerId, horizon: u32, node_budget: Option<u64>) -> Self {
        Self {
            root,
            horizon,
            node_budget,
            nodes: 0,
        }
    }

    /// Positions scored so far.
    pub(crate) fn nodes(&self) -> u64 {
        self.nodes
    }

    fn budget_exhausted(&self) -> bool {
        self.node_budget.is_some_and(|budget| self.nodes >= budget)
    }

    /// Applies the placement to a clone and scores the result.
    ///
    /// An immediate win is worth [`WIN`] to the root player and `-WIN` to
    /// its opponent. Otherwise the replies are scored one ply deeper, the
    /// root's opponent taking the minimum and the root the maximum. The
    /// horizon, an exhausted budget, or a side with no reply score
    /// [`NEUTRAL`]. Every score is reduced by its depth.
    pub(crate) fn score(
        &mut self,
        game: &Game,
        piece: &Piece,
        coordinate: Coordinate,
        depth: u32,
        maximizing: bool,
    ) -> Result<i32, IllegalMove> {
        self.nodes += 1;

        let mut next = game.clone();
        let mover = piece.owner();
        let raw = match next.try_set_position(piece, coordinate)? {
            PlacementOutcome::Won(_) if mover == self.root => WIN,
            PlacementOutcome::Won(_) => -WIN,
            PlacementOutcome::Continues => {
                if depth + 1 >= self.horizon || self.budget_exhausted() {
                    NEUTRAL
                } else {
                    self.best_reply(&next, depth + 1, !maximizing)?
                }
            }
        };

        let score = raw - depth as i32;
        trace!(%mover, shape = %piece.shape(), %coordinate, depth, score, "Scored");
        Ok(score)
    }

    fn best_reply(
        &mut self,
        game: &Game,
        depth: u32,
        maximizing: bool,
    ) -> Result<i32, IllegalMove> {
        let replies = game.legal_moves();
        let minimize = game.active_player_id() != self.root;

        let mut best: Option<i32> = None;
        for (piece, coordinate) in &replies {
            let score = self.score(game, piece, *coordinate, depth, maximizing)?;
            best = Some(match best {
                Some(current) if minimize => current.min(score),
                Some(current) => current.max(score),
                None => score,
            });
        }
        Ok(best.unwrap_or(NEUTRAL))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceShape;

    fn at(column: u8, row: u8) -> Coordinate {
        Coordinate::new(column, row).expect("on board")
    }

    fn play(game: &mut Game, moves: &[(PieceShape, u8, u8)]) {
        for (shape, column, row) in moves {
            game.place(*shape, at(*column, *row)).expect("legal");
        }
    }

    #[test]
    fn test_enumerate_matches_empty_board() {
        let moves = enumerate_legal_moves(&Game::new());
        assert_eq!(moves.len(), 64);
        assert_eq!(moves[0].1, at(0, 0));
        assert_eq!(moves[0].0.shape(), PieceShape::Cylinder);
        assert_eq!(moves[4].1, at(1, 0));
    }

    #[test]
    fn test_immediate_win_scores_one() {
        let mut game = Game::new();
        play(
            &mut game,
            &[
                (PieceShape::Cylinder, 0, 0),
                (PieceShape::Triangle, 1, 0),
                (PieceShape::Plus, 3, 3),
                (PieceShape::Plus, 2, 0),
            ],
        );
        let piece = *game.active_player().piece(PieceShape::Square);
        assert_eq!(score_move(&game, &piece, at(3, 0), 0, true), Ok(1));
    }

    #[test]
    fn test_move_allowing_opponent_win_scores_minus_two() {
        let mut game = Game::new();
        play(
            &mut game,
            &[(PieceShape::Cylinder, 0, 0), (PieceShape::Triangle, 1, 0)],
        );
        let plus = *game.active_player().piece(PieceShape::Plus);

        // Leaves (3, 0) open for the opponent's Square.
        assert_eq!(score_move(&game, &plus, at(2, 0), 0, true), Ok(-2));
        // Completes nothing and opens nothing.
        assert_eq!(score_move(&game, &plus, at(3, 3), 0, true), Ok(-1));
    }

    #[test]
    fn test_scoring_leaves_game_untouched() {
        let game = Game::new();
        let before = game.clone();
        let piece = *game.active_player().piece(PieceShape::Cylinder);
        score_move(&game, &piece, at(1, 1), 0, true).expect("legal");
        assert_eq!(game, before);
    }

    #[test]
    fn test_illegal_candidate_is_reported() {
        let game = Game::new();
        let piece = *game.player(PlayerId::Two).piece(PieceShape::Cylinder);
        assert_eq!(
            score_move(&game, &piece, at(1, 1), 0, true),
            Err(IllegalMove::NotYourTurn(PlayerId::Two))
        );
    }

    #[test]
    fn test_node_budget_cuts_the_search() {
        let mut game = Game::new();
        play(
            &mut game,
            &[(PieceShape::Cylinder, 0, 0), (PieceShape::Triangle, 1, 0)],
        );
        let plus = *game.active_player().piece(PieceShape::Plus);

        let mut unbounded = Search::new(PlayerId::One, 2, None);
        assert_eq!(unbounded.score(&game, &plus, at(2, 0), 0, true), Ok(-2));
        assert!(unbounded.nodes() > 1);

        // A budget of one stops after the root placement.
        let mut bounded = Search::new(PlayerId::One, 2, Some(1));
        assert_eq!(bounded.score(&game, &plus, at(2, 0), 0, true), Ok(0));
        assert_eq!(bounded.nodes(), 1);
    }

    #[test]
    fn test_horizon_one_scores_only_immediate_outcomes() {
        let mut game = Game::new();
        play(
            &mut game,
            &[(PieceShape::Cylinder, 0, 0), (PieceShape::Triangle, 1, 0)],
        );
        let plus = *game.active_player().piece(PieceShape::Plus);
        let mut search = Search::new(PlayerId::One, 1, None);
        assert_eq!(search.score(&game, &plus, at(2, 0), 0, true), Ok(0));
    }
}
