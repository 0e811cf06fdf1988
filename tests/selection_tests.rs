mod common;

use common::{adjacent, movement_state, pos};
use morris_client::{
    ClickOutcome, GameState, Player, PositionSet, Rejection, SelectionController, SelectionState,
    DISPLAY_SIZE,
};
use proptest::prelude::*;

fn placement_state() -> GameState {
    GameState {
        game_active: true,
        ..GameState::default()
    }
}

fn white_to_move() -> GameState {
    movement_state(&[(0, 0), (1, 2), (2, 1)], &[(0, 2), (1, 0), (2, 2)], Player::White)
}

#[test]
fn test_placement_click_on_empty_point() {
    let mut ctl = SelectionController::new();
    let outcome = ctl.click(&placement_state(), 2, 2);
    assert_eq!(outcome, ClickOutcome::Place(pos(1, 1)));
    assert_eq!(ctl.state(), SelectionState::Idle);
}

#[test]
fn test_placement_click_on_connector_is_ignored() {
    let mut ctl = SelectionController::new();
    assert_eq!(ctl.click(&placement_state(), 0, 1), ClickOutcome::Ignored);
    assert_eq!(ctl.click(&placement_state(), 3, 3), ClickOutcome::Ignored);
}

#[test]
fn test_placement_click_on_occupied_point() {
    let mut game = placement_state();
    game.board = game.board.with(pos(0, 0), Player::Black.into());
    let mut ctl = SelectionController::new();
    assert_eq!(
        ctl.click(&game, 0, 0),
        ClickOutcome::Rejected(Rejection::PositionOccupied)
    );
}

#[test]
fn test_movement_select_then_move() {
    let game = white_to_move();
    let mut ctl = SelectionController::new();

    assert_eq!(ctl.click(&game, 0, 0), ClickOutcome::Select(pos(0, 0)));
    assert_eq!(ctl.state().source(), Some(pos(0, 0)));
    assert_eq!(ctl.state().destinations(), PositionSet::new());

    ctl.set_destinations(&game, pos(0, 0), adjacent(pos(0, 0)));
    // (1, 0) holds a black piece, so only (0, 1) and (1, 1) remain.
    let expected: PositionSet = [pos(0, 1), pos(1, 1)].into_iter().collect();
    assert_eq!(ctl.state().destinations(), expected);

    assert_eq!(
        ctl.click(&game, 0, 2),
        ClickOutcome::Move {
            from: pos(0, 0),
            to: pos(0, 1)
        }
    );
    ctl.finish_move();
    assert_eq!(ctl.state(), SelectionState::Idle);
}

#[test]
fn test_movement_idle_click_needs_own_piece() {
    let game = white_to_move();
    let mut ctl = SelectionController::new();
    // Opponent piece, empty point and connector are all refused.
    for (row, col) in [(0, 4), (2, 2), (1, 1)] {
        assert_eq!(
            ctl.click(&game, row, col),
            ClickOutcome::Rejected(Rejection::SelectOwnPiece)
        );
        assert_eq!(ctl.state(), SelectionState::Idle);
    }
}

#[test]
fn test_invalid_destination_keeps_selection() {
    let game = white_to_move();
    let mut ctl = SelectionController::new();
    ctl.click(&game, 0, 0);
    ctl.set_destinations(&game, pos(0, 0), adjacent(pos(0, 0)));
    let before = ctl.state();

    assert_eq!(
        ctl.click(&game, 4, 4),
        ClickOutcome::Rejected(Rejection::InvalidDestination)
    );
    assert_eq!(ctl.state(), before);
}

#[test]
fn test_destinations_for_other_source_are_ignored() {
    let game = white_to_move();
    let mut ctl = SelectionController::new();
    ctl.click(&game, 0, 0);
    ctl.set_destinations(&game, pos(1, 2), adjacent(pos(1, 2)));
    assert_eq!(ctl.state().destinations(), PositionSet::new());
}

#[test]
fn test_sync_phase_drops_selection() {
    let mut game = white_to_move();
    let mut ctl = SelectionController::new();
    ctl.click(&game, 0, 0);

    ctl.sync_phase(&game);
    assert_eq!(ctl.state().source(), Some(pos(0, 0)));

    game.game_active = false;
    ctl.sync_phase(&game);
    assert_eq!(ctl.state(), SelectionState::Idle);
}

#[test]
fn test_rejection_messages() {
    assert_eq!(Rejection::PositionOccupied.to_string(), "Position occupied");
    assert_eq!(
        Rejection::InvalidDestination.to_string(),
        "Invalid destination. Must be adjacent and empty."
    );
    assert_eq!(Rejection::NothingToUndo.to_string(), "No moves to undo");
}

proptest! {
    #[test]
    fn placement_never_targets_connectors(row in 0..DISPLAY_SIZE, col in 0..DISPLAY_SIZE) {
        let mut ctl = SelectionController::new();
        let outcome = ctl.click(&placement_state(), row, col);
        if morris_client::is_connector(row, col) {
            prop_assert_eq!(outcome, ClickOutcome::Ignored);
        } else {
            prop_assert!(matches!(outcome, ClickOutcome::Place(_)));
        }
    }

    #[test]
    fn destinations_are_always_empty(x in 0usize..3, y in 0usize..3) {
        let game = white_to_move();
        let source = pos(x, y);
        let mut ctl = SelectionController::new();
        let (row, col) = morris_client::logical_to_display(source);
        if let ClickOutcome::Select(_) = ctl.click(&game, row, col) {
            ctl.set_destinations(&game, source, adjacent(source));
            for dest in ctl.state().destinations().iter() {
                prop_assert!(game.board.get(dest).is_empty());
            }
        } else {
            prop_assert!(!game.is_own_piece(source));
        }
    }
}
