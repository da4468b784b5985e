//! The Quantik rule engine.
//!
//! [`Game`] owns the canonical state: both players' inventories, the
//! occupancy board derived from them, whose turn it is, and the winner once
//! there is one. All state is plain values, so `clone()` yields a fully
//! independent copy, which is what the search relies on.

use crate::action::{IllegalMove, Placement};
use crate::board::{Board, Square};
use crate::contracts::{Contract, PlacementContract};
use crate::coordinate::{Coordinate, PeerGroups, interesting_positions_for};
use crate::rules::{self, WinningLine};
use crate::types::{Piece, PieceShape, Player, PlayerId, ShapeSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};

/// Color given to player 1 when none is configured.
pub const DEFAULT_FIRST_COLOR: &str = "white";

/// Color given to player 2 when none is configured.
pub const DEFAULT_SECOND_COLOR: &str = "black";

/// Each player's pieces that may go on a cell.
pub type AllowedPieces = BTreeMap<PlayerId, Vec<Piece>>;

/// The player who completed a group, and the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    /// Winning seat.
    pub player: PlayerId,
    /// The completed row, column, or quadrant.
    pub line: WinningLine,
}

impl Winner {
    /// The four cells of the winning group.
    pub fn coordinates(&self) -> [Coordinate; 4] {
        self.line.cells
    }
}

/// Result of an accepted placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    /// No group was completed.
    Continues,
    /// The placement completed a group and ended the game.
    Won(Winner),
}

/// Quantik game state and rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub(crate) player1: Player,
    pub(crate) player2: Player,
    pub(crate) active: PlayerId,
    pub(crate) winner: Option<Winner>,
    pub(crate) board: Board,
}

impl Game {
    /// Creates a fresh game with the default colors. Player 1 moves first.
    #[instrument(level = "debug")]
    pub fn new() -> Self {
        Self::with_colors(DEFAULT_FIRST_COLOR, DEFAULT_SECOND_COLOR)
    }

    /// Creates a fresh game with the given player colors.
    pub fn with_colors(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            player1: Player::new(PlayerId::One, first),
            player2: Player::new(PlayerId::Two, second),
            active: PlayerId::One,
            winner: None,
            board: Board::new(),
        }
    }

    /// Assembles a game from players whose pieces are already positioned.
    ///
    /// Historical legality is not checked. Fails with the first cell that
    /// two pieces claim.
    pub(crate) fn from_parts(
        player1: Player,
        player2: Player,
        active: PlayerId,
        winner: Option<Winner>,
    ) -> Result<Self, Coordinate> {
        let mut board = Board::new();
        for player in [&player1, &player2] {
            for piece in player.used_pieces() {
                let Some(cell) = piece.position() else {
                    continue;
                };
                if !board.is_empty(cell) {
                    return Err(cell);
                }
                board.set(
                    cell,
                    Square::Occupied {
                        shape: piece.shape(),
                        owner: piece.owner(),
                    },
                );
            }
        }
        Ok(Self {
            player1,
            player2,
            active,
            winner,
            board,
        })
    }

    // ─────────────────────────────────────────────────────────────
    //  Read-only queries
    // ─────────────────────────────────────────────────────────────

    /// Both players, player 1 first.
    pub fn players(&self) -> [&Player; 2] {
        [&self.player1, &self.player2]
    }

    /// The player in the given seat.
    pub fn player(&self, id: PlayerId) -> &Player {
        match id {
            PlayerId::One => &self.player1,
            PlayerId::Two => &self.player2,
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        match id {
            PlayerId::One => &mut self.player1,
            PlayerId::Two => &mut self.player2,
        }
    }

    /// The player on turn.
    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    /// Seat of the player on turn.
    pub fn active_player_id(&self) -> PlayerId {
        self.active
    }

    /// The player not on turn.
    pub fn inactive_player(&self) -> &Player {
        self.player(self.active.opponent())
    }

    /// The winner, once a group has been completed.
    pub fn winner(&self) -> Option<&Winner> {
        self.winner.as_ref()
    }

    /// The occupancy board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The piece on a cell and the player who owns it.
    pub fn piece_at(&self, coordinate: Coordinate) -> Option<(&Piece, &Player)> {
        match self.board.get(coordinate) {
            Square::Empty => None,
            Square::Occupied { shape, owner } => {
                let player = self.player(owner);
                Some((player.piece(shape), player))
            }
        }
    }

    /// Row, column, and quadrant peers of a cell.
    pub fn interesting_positions_for(&self, coordinate: Coordinate) -> PeerGroups {
        interesting_positions_for(coordinate)
    }

    /// Shapes that may not be placed on a cell because a peer already holds
    /// them.
    pub fn exclusion_set(&self, coordinate: Coordinate) -> ShapeSet {
        rules::exclusion_set(&self.board, coordinate)
    }

    /// Each player's unplaced pieces that may legally go on the cell.
    ///
    /// Returns `None` if the cell is occupied.
    pub fn allowed_pieces_at(&self, coordinate: Coordinate) -> Option<AllowedPieces> {
        if !self.board.is_empty(coordinate) {
            return None;
        }
        let excluded = self.exclusion_set(coordinate);
        Some(
            self.players()
                .into_iter()
                .map(|player| {
                    let pieces = player
                        .available_pieces()
                        .filter(|piece| !excluded.contains(piece.shape()))
                        .copied()
                        .collect();
                    (player.id(), pieces)
                })
                .collect(),
        )
    }

    /// Shapes the given player may place on the cell, or `None` if it is
    /// occupied.
    pub fn allowed_shapes_at(&self, coordinate: Coordinate, player: PlayerId) -> Option<ShapeSet> {
        let available = self.player(player).available_shapes();
        rules::allowed_shapes(&self.board, available, coordinate)
    }

    /// The group that placing `shape` on the cell would complete, if any.
    ///
    /// Hypothetical: the game is not modified.
    pub fn winning_line_for(
        &self,
        shape: PieceShape,
        coordinate: Coordinate,
    ) -> Option<WinningLine> {
        rules::winning_line(&self.board, shape, coordinate)
    }

    /// Whether placing `shape` on the cell would complete a group.
    pub fn is_winning_move(&self, shape: PieceShape, coordinate: Coordinate) -> bool {
        self.winning_line_for(shape, coordinate).is_some()
    }

    /// No winner, and the player on turn has placed all four pieces.
    pub fn in_stale_mate(&self) -> bool {
        let available = self.active_player().available_shapes();
        rules::is_stalemate(self.winner.is_some(), available)
    }

    /// Every legal (piece, cell) pair for the player on turn, cells in
    /// row-major order and shapes in canonical order within a cell.
    pub fn legal_moves(&self) -> Vec<(Piece, Coordinate)> {
        if self.winner.is_some() {
            return Vec::new();
        }
        let player = self.active_player();
        let available = player.available_shapes();
        self.board
            .empty_cells()
            .flat_map(move |cell| {
                rules::allowed_shapes(&self.board, available, cell)
                    .unwrap_or_default()
                    .iter()
                    .map(move |shape| (*player.piece(shape), cell))
            })
            .collect()
    }

    /// Whether the player on turn can place anything at all.
    pub fn has_legal_move(&self) -> bool {
        self.winner.is_none()
            && rules::has_legal_placement(&self.board, self.active_player().available_shapes())
    }

    /// Won, stalemated, or locked out of every empty cell.
    pub fn is_over(&self) -> bool {
        !self.has_legal_move()
    }

    // ─────────────────────────────────────────────────────────────
    //  Mutation
    // ─────────────────────────────────────────────────────────────

    /// Places the active player's piece of `shape` on the cell.
    pub fn place(
        &mut self,
        shape: PieceShape,
        coordinate: Coordinate,
    ) -> Result<PlacementOutcome, IllegalMove> {
        self.play(Placement::new(self.active, shape, coordinate))
    }

    /// Places `piece` on the cell.
    ///
    /// The piece must belong to the player on turn.
    pub fn try_set_position(
        &mut self,
        piece: &Piece,
        coordinate: Coordinate,
    ) -> Result<PlacementOutcome, IllegalMove> {
        self.play(Placement::new(piece.owner(), piece.shape(), coordinate))
    }

    /// Places `piece` on the cell, returning whether the placement was
    /// accepted. A refused placement leaves the game untouched.
    pub fn set_position(&mut self, piece: &Piece, coordinate: Coordinate) -> bool {
        self.try_set_position(piece, coordinate).is_ok()
    }

    /// Applies a placement after checking its preconditions.
    ///
    /// On success the piece is bound to the cell, the winner is recorded if
    /// a group was completed, and the turn passes to the other player.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always
    /// - Postconditions checked in debug builds only
    #[instrument(level = "debug", skip_all, fields(placement = %placement))]
    pub fn play(&mut self, placement: Placement) -> Result<PlacementOutcome, IllegalMove> {
        if let Err(error) = PlacementContract::pre(self, &placement) {
            warn!(%error, "Placement rejected");
            return Err(error);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let Placement {
            player,
            shape,
            coordinate,
        } = placement;

        // Computed before the piece lands, on the same peer groups.
        let line = rules::winning_line(&self.board, shape, coordinate);

        self.player_mut(player).piece_mut(shape).place(coordinate);
        self.board
            .set(coordinate, Square::Occupied { shape, owner: player });

        let outcome = match line {
            Some(line) => {
                let winner = Winner { player, line };
                self.winner = Some(winner);
                info!(%player, kind = %line.kind, "Group completed");
                PlacementOutcome::Won(winner)
            }
            None => PlacementOutcome::Continues,
        };

        self.toggle_active_player();

        #[cfg(debug_assertions)]
        PlacementContract::post(&before, self)?;

        debug!(next = %self.active, "Placement applied");
        Ok(outcome)
    }

    /// Passes the turn to the other player. No checks.
    pub fn toggle_active_player(&mut self) {
        self.active = self.active.opponent();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.board)?;
        for player in self.players() {
            let inventory: String = player
                .available_pieces()
                .map(|piece| match player.id() {
                    PlayerId::One => piece.shape().symbol(),
                    PlayerId::Two => piece.shape().symbol().to_ascii_lowercase(),
                })
                .collect();
            writeln!(f, "{} ({}): [{}]", player.name(), player.id(), inventory)?;
        }
        match &self.winner {
            Some(winner) => {
                let cells: Vec<String> =
                    winner.coordinates().iter().map(|c| c.to_string()).collect();
                write!(
                    f,
                    "{} wins with {} {}",
                    self.player(winner.player).name(),
                    winner.line.kind,
                    cells.join(" ")
                )
            }
            None if self.in_stale_mate() => write!(f, "Stalemate"),
            None => write!(f, "{} to move", self.active_player().name()),
        }
    }
}
