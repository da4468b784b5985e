//! JSON snapshots of a game in progress.
//!
//! ```json
//! {
//!   "player1": {"color": "white", "pieces": {"Cylinder": [0, 0], "Plus": null}},
//!   "player2": {"color": "black", "pieces": {}},
//!   "active_player": "black"
//! }
//! ```
//!
//! Shape names are case-insensitive and a missing shape means the piece is
//! still in inventory. Loading rebinds pieces without replaying the moves,
//! so only structural problems are rejected.

use crate::coordinate::{Coordinate, CoordinateError};
use crate::game::{Game, Winner};
use crate::rules;
use crate::types::{PieceShape, Player, PlayerId, ShapeSet};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Why a snapshot could not be read or turned into a game.
#[derive(Debug, Display, Error, From)]
pub enum SnapshotError {
    /// The file could not be read or written.
    #[display("Snapshot I/O failed: {}", _0)]
    Io(std::io::Error),

    /// The text is not a snapshot document.
    #[display("Snapshot is not valid JSON: {}", _0)]
    Json(serde_json::Error),

    /// A piece key names no shape.
    #[display("Unknown piece shape {:?}", _0)]
    #[from(skip)]
    UnknownShape(#[error(not(source))] String),

    /// Two piece keys name the same shape.
    #[display("Shape {:?} is listed more than once", _0)]
    #[from(skip)]
    DuplicateShape(#[error(not(source))] String),

    /// A piece position lies outside the board.
    #[display("Invalid piece position: {}", _0)]
    Coordinate(CoordinateError),

    /// Two pieces claim the same cell.
    #[display("Two pieces occupy {}", _0)]
    #[from(skip)]
    Overlap(#[error(not(source))] Coordinate),

    /// `active_player` matches neither player's color.
    #[display("Active player {:?} matches no player", _0)]
    #[from(skip)]
    UnknownActivePlayer(#[error(not(source))] String),

    /// Both players share the active color.
    #[display("Active player {:?} matches both players", _0)]
    #[from(skip)]
    AmbiguousActivePlayer(#[error(not(source))] String),
}

/// One player's color and piece positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Display color, also used to name the active player.
    pub color: String,
    /// Shape name to `[column, row]`, or `null` while in inventory.
    #[serde(default)]
    pub pieces: BTreeMap<String, Option<[i64; 2]>>,
}

impl PlayerSnapshot {
    fn from_player(player: &Player) -> Self {
        let pieces = player
            .pieces()
            .iter()
            .map(|piece| {
                let position = piece
                    .position()
                    .map(|cell| [i64::from(cell.column()), i64::from(cell.row())]);
                (piece.shape().to_string(), position)
            })
            .collect();
        Self {
            color: player.color().to_string(),
            pieces,
        }
    }

    fn into_player(self, id: PlayerId) -> Result<Player, SnapshotError> {
        let mut player = Player::new(id, self.color);
        let mut seen = ShapeSet::EMPTY;
        for (name, position) in self.pieces {
            let shape: PieceShape = name
                .parse()
                .map_err(|_| SnapshotError::UnknownShape(name.clone()))?;
            if seen.contains(shape) {
                return Err(SnapshotError::DuplicateShape(name));
            }
            seen.insert(shape);
            if let Some([column, row]) = position {
                let cell = Coordinate::from_signed(column, row)?;
                player.piece_mut(shape).place(cell);
            }
        }
        Ok(player)
    }
}

/// Serializable state of a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// First seat.
    pub player1: PlayerSnapshot,
    /// Second seat.
    pub player2: PlayerSnapshot,
    /// Color of the player on turn.
    pub active_player: String,
}

impl GameSnapshot {
    /// Captures the current state of a game.
    pub fn from_game(game: &Game) -> Self {
        Self {
            player1: PlayerSnapshot::from_player(game.player(PlayerId::One)),
            player2: PlayerSnapshot::from_player(game.player(PlayerId::Two)),
            active_player: game.active_player().color().to_string(),
        }
    }

    /// Rebuilds the game.
    ///
    /// A group already completed on the board is credited to the player
    /// not on turn, who made the last placement.
    #[instrument(skip_all, fields(active = %self.active_player))]
    pub fn into_game(self) -> Result<Game, SnapshotError> {
        let matches_first = self.player1.color == self.active_player;
        let matches_second = self.player2.color == self.active_player;
        let active = match (matches_first, matches_second) {
            (true, false) => PlayerId::One,
            (false, true) => PlayerId::Two,
            (true, true) => return Err(SnapshotError::AmbiguousActivePlayer(self.active_player)),
            (false, false) => return Err(SnapshotError::UnknownActivePlayer(self.active_player)),
        };

        let player1 = self.player1.into_player(PlayerId::One)?;
        let player2 = self.player2.into_player(PlayerId::Two)?;
        let mut game =
            Game::from_parts(player1, player2, active, None).map_err(SnapshotError::Overlap)?;

        if let Some(line) = rules::completed_line(game.board()) {
            let player = active.opponent();
            warn!(%player, kind = %line.kind, "Snapshot holds a completed group");
            game.winner = Some(Winner { player, line });
        }
        Ok(game)
    }

    /// Renders the snapshot as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot from JSON.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Writes the game to a JSON file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(game: &Game, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let json = Self::from_game(game).to_json()?;
        std::fs::write(path.as_ref(), json)?;
        info!("Snapshot saved");
        Ok(())
    }

    /// Reads a game from a JSON file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Game, SnapshotError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let game = Self::from_json(&text)?.into_game()?;
        info!(active = %game.active_player_id(), "Snapshot loaded");
        Ok(game)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(column: u8, row: u8) -> Coordinate {
        Coordinate::new(column, row).expect("on board")
    }

    #[test]
    fn test_fresh_game_lists_every_shape_unplaced() {
        let snapshot = GameSnapshot::from_game(&Game::new());
        assert_eq!(snapshot.active_player, "white");
        assert_eq!(snapshot.player1.pieces.len(), 4);
        assert!(snapshot.player1.pieces.values().all(Option::is_none));
        assert_eq!(snapshot.player2.color, "black");
    }

    #[test]
    fn test_missing_shapes_and_alias() {
        let json = r#"{
            "player1": {"color": "white", "pieces": {"triange": [1, 2]}},
            "player2": {"color": "black"},
            "active_player": "black"
        }"#;
        let game = GameSnapshot::from_json(json)
            .and_then(GameSnapshot::into_game)
            .expect("valid");
        let (piece, player) = game.piece_at(at(1, 2)).expect("occupied");
        assert_eq!(piece.shape(), PieceShape::Triangle);
        assert_eq!(player.id(), PlayerId::One);
        assert_eq!(game.active_player_id(), PlayerId::Two);
        assert_eq!(game.player(PlayerId::Two).available_pieces().count(), 4);
    }

    #[test]
    fn test_rejects_unknown_shape() {
        let json = r#"{
            "player1": {"color": "white", "pieces": {"Sphere": null}},
            "player2": {"color": "black", "pieces": {}},
            "active_player": "white"
        }"#;
        let error = GameSnapshot::from_json(json)
            .and_then(GameSnapshot::into_game)
            .expect_err("unknown shape");
        assert!(matches!(error, SnapshotError::UnknownShape(name) if name == "Sphere"));
    }

    #[test]
    fn test_rejects_shape_listed_twice() {
        let json = r#"{
            "player1": {"color": "white", "pieces": {"Triangle": [0, 0], "Triange": [3, 3]}},
            "player2": {"color": "black", "pieces": {}},
            "active_player": "black"
        }"#;
        let error = GameSnapshot::from_json(json)
            .and_then(GameSnapshot::into_game)
            .expect_err("duplicate shape");
        assert!(matches!(error, SnapshotError::DuplicateShape(name) if name == "Triangle"));

        let json = r#"{
            "player1": {"color": "white", "pieces": {}},
            "player2": {"color": "black", "pieces": {"Plus": null, "plus": [1, 1]}},
            "active_player": "white"
        }"#;
        assert!(matches!(
            GameSnapshot::from_json(json).and_then(GameSnapshot::into_game),
            Err(SnapshotError::DuplicateShape(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_position() {
        let json = r#"{
            "player1": {"color": "white", "pieces": {"Plus": [4, 0]}},
            "player2": {"color": "black", "pieces": {}},
            "active_player": "white"
        }"#;
        let error = GameSnapshot::from_json(json)
            .and_then(GameSnapshot::into_game)
            .expect_err("off board");
        assert!(matches!(
            error,
            SnapshotError::Coordinate(CoordinateError::OutOfRange { column: 4, row: 0 })
        ));
    }

    #[test]
    fn test_rejects_overlap_and_bad_active_player() {
        let overlap = r#"{
            "player1": {"color": "white", "pieces": {"Plus": [1, 1]}},
            "player2": {"color": "black", "pieces": {"Square": [1, 1]}},
            "active_player": "white"
        }"#;
        let error = GameSnapshot::from_json(overlap)
            .and_then(GameSnapshot::into_game)
            .expect_err("overlap");
        assert!(matches!(error, SnapshotError::Overlap(cell) if cell == at(1, 1)));

        let unknown = r#"{
            "player1": {"color": "white"},
            "player2": {"color": "black"},
            "active_player": "green"
        }"#;
        assert!(matches!(
            GameSnapshot::from_json(unknown).and_then(GameSnapshot::into_game),
            Err(SnapshotError::UnknownActivePlayer(_))
        ));

        let ambiguous = r#"{
            "player1": {"color": "red"},
            "player2": {"color": "red"},
            "active_player": "red"
        }"#;
        assert!(matches!(
            GameSnapshot::from_json(ambiguous).and_then(GameSnapshot::into_game),
            Err(SnapshotError::AmbiguousActivePlayer(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            GameSnapshot::from_json("{\"player1\": "),
            Err(SnapshotError::Json(_))
        ));
    }

    #[test]
    fn test_completed_group_sets_winner() {
        let json = r#"{
            "player1": {"color": "white", "pieces": {"Cylinder": [0, 0], "Plus": [2, 0]}},
            "player2": {"color": "black", "pieces": {"Triangle": [1, 0], "Square": [3, 0]}},
            "active_player": "white"
        }"#;
        let game = GameSnapshot::from_json(json)
            .and_then(GameSnapshot::into_game)
            .expect("valid");
        let winner = game.winner().expect("row 0 is complete");
        assert_eq!(winner.player, PlayerId::Two);
        assert!(game.legal_moves().is_empty());
    }
}
