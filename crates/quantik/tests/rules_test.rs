//! Tests for placement legality, win detection, and turn order.

use quantik::{
    Coordinate, Game, GroupKind, IllegalMove, PieceShape, PlacementOutcome, PlayerId,
    interesting_positions_for,
};

fn at(column: u8, row: u8) -> Coordinate {
    Coordinate::new(column, row).expect("on board")
}

fn sorted(mut cells: Vec<Coordinate>) -> Vec<Coordinate> {
    cells.sort();
    cells
}

#[test]
fn test_peer_groups_one_cell_per_quadrant() {
    let groups = interesting_positions_for(at(0, 3));
    assert_eq!(groups.row(), &[at(1, 3), at(2, 3), at(3, 3)]);
    assert_eq!(groups.column(), &[at(0, 0), at(0, 1), at(0, 2)]);
    assert_eq!(groups.quadrant(), &[at(0, 2), at(1, 2), at(1, 3)]);
    assert_eq!(
        sorted(groups.all().clone()),
        sorted(vec![
            at(1, 3),
            at(2, 3),
            at(3, 3),
            at(0, 0),
            at(0, 1),
            at(0, 2),
            at(1, 2),
        ])
    );

    let groups = interesting_positions_for(at(3, 1));
    assert_eq!(groups.row(), &[at(0, 1), at(1, 1), at(2, 1)]);
    assert_eq!(groups.column(), &[at(3, 0), at(3, 2), at(3, 3)]);
    assert_eq!(groups.quadrant(), &[at(2, 0), at(3, 0), at(2, 1)]);
    assert_eq!(groups.all().len(), 7);

    let groups = interesting_positions_for(at(2, 2));
    assert_eq!(groups.quadrant(), &[at(3, 2), at(2, 3), at(3, 3)]);
    assert_eq!(groups.all().len(), 7);
}

#[test]
fn test_repeated_shape_rejected_in_every_group() {
    let mut game = Game::new();
    game.place(PieceShape::Plus, at(1, 1)).expect("legal");

    for cell in [at(3, 1), at(1, 3), at(0, 0)] {
        assert_eq!(
            game.place(PieceShape::Plus, cell),
            Err(IllegalMove::ShapeExcluded {
                shape: PieceShape::Plus,
                coordinate: cell,
            }),
            "Plus must be excluded at {}",
            cell
        );
    }

    let allowed = game.allowed_pieces_at(at(0, 0)).expect("empty");
    assert!(
        allowed[&PlayerId::Two]
            .iter()
            .all(|piece| piece.shape() != PieceShape::Plus)
    );

    // Outside every peer group of (1, 1).
    assert_eq!(
        game.place(PieceShape::Plus, at(3, 3)),
        Ok(PlacementOutcome::Continues)
    );
}

#[test]
fn test_row_win_sets_winner_and_ends_game() {
    let mut game = Game::new();
    game.place(PieceShape::Cylinder, at(0, 0)).expect("legal");
    game.place(PieceShape::Triangle, at(1, 0)).expect("legal");
    game.place(PieceShape::Plus, at(2, 0)).expect("legal");

    let outcome = game.place(PieceShape::Square, at(3, 0)).expect("legal");
    let PlacementOutcome::Won(winner) = outcome else {
        panic!("Row 0 should be complete");
    };
    assert_eq!(winner.player, PlayerId::Two);
    assert_eq!(winner.line.kind, GroupKind::Row);
    let row_zero = [at(0, 0), at(1, 0), at(2, 0), at(3, 0)];
    assert_eq!(winner.coordinates(), row_zero);
    assert_eq!(game.winner(), Some(&winner));

    // The winning placement passes the turn like any other.
    assert_eq!(game.active_player_id(), PlayerId::One);
    assert_eq!(
        game.place(PieceShape::Square, at(0, 3)),
        Err(IllegalMove::GameOver)
    );
    assert!(game.legal_moves().is_empty());
    assert!(game.is_over());
    assert!(!game.in_stale_mate());
}

#[test]
fn test_quadrant_win() {
    let mut game = Game::new();
    game.place(PieceShape::Cylinder, at(2, 2)).expect("legal");
    game.place(PieceShape::Triangle, at(3, 3)).expect("legal");
    game.place(PieceShape::Plus, at(3, 2)).expect("legal");

    let line = game
        .winning_line_for(PieceShape::Square, at(2, 3))
        .expect("quadrant completes");
    assert_eq!(line.kind, GroupKind::Quadrant);
    assert_eq!(line.cells, [at(2, 2), at(3, 2), at(3, 3), at(2, 3)]);
}

#[test]
fn test_turn_toggles_on_accept_only() {
    let mut game = Game::new();
    assert_eq!(game.active_player_id(), PlayerId::One);

    game.place(PieceShape::Cylinder, at(0, 0)).expect("legal");
    assert_eq!(game.active_player_id(), PlayerId::Two);

    let before = game.clone();
    assert_eq!(
        game.place(PieceShape::Triangle, at(0, 0)),
        Err(IllegalMove::CellOccupied(at(0, 0)))
    );
    assert_eq!(game, before);

    let mine = *game.player(PlayerId::One).piece(PieceShape::Plus);
    assert!(!game.set_position(&mine, at(2, 2)));
    assert_eq!(game, before);

    let theirs = *game.player(PlayerId::Two).piece(PieceShape::Plus);
    assert!(game.set_position(&theirs, at(2, 2)));
    assert_eq!(game.active_player_id(), PlayerId::One);

    game.toggle_active_player();
    assert_eq!(game.active_player_id(), PlayerId::Two);
}

#[test]
fn test_stalemate_after_all_pieces_placed() {
    let mut game = Game::new();
    for (shape, column, row) in [
        (PieceShape::Cylinder, 0, 0),
        (PieceShape::Cylinder, 2, 1),
        (PieceShape::Triangle, 1, 0),
        (PieceShape::Triangle, 3, 2),
        (PieceShape::Plus, 0, 2),
        (PieceShape::Plus, 3, 0),
        (PieceShape::Square, 1, 3),
        (PieceShape::Square, 2, 2),
    ] {
        assert_eq!(
            game.place(shape, at(column, row)),
            Ok(PlacementOutcome::Continues)
        );
    }

    assert_eq!(game.active_player_id(), PlayerId::One);
    assert!(game.winner().is_none());
    assert!(game.in_stale_mate());
    assert!(game.is_over());
    assert!(game.to_string().ends_with("Stalemate"));
}
