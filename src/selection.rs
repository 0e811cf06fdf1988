//! Two-step selection protocol turning board clicks into intents.
//!
//! During placement a click on an empty point is a complete request. During
//! movement the first click picks one of the mover's pieces and the second
//! click picks one of its empty neighbours. All checks run against the typed
//! [`GameState`]; nothing is read back from the rendered board.

use core::fmt;

use crate::board::GameState;
use crate::coords::{display_to_logical, Position};
use crate::positions::PositionSet;

/// Current step of the movement protocol.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Idle,
    SourceSelected {
        source: Position,
        destinations: PositionSet,
    },
}

impl SelectionState {
    pub fn source(&self) -> Option<Position> {
        match self {
            SelectionState::Idle => None,
            SelectionState::SourceSelected { source, .. } => Some(*source),
        }
    }

    /// Destinations of the selected piece; empty while idle.
    pub fn destinations(&self) -> PositionSet {
        match self {
            SelectionState::Idle => PositionSet::new(),
            SelectionState::SourceSelected { destinations, .. } => *destinations,
        }
    }
}

/// Why a click did not produce a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    PositionOccupied,
    SelectOwnPiece,
    InvalidDestination,
    InvalidPlacement,
    InvalidMove,
    AiInvalidPlacement,
    AiInvalidMove,
    NothingToUndo,
    NoMoveFound,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::PositionOccupied => "Position occupied",
            Rejection::SelectOwnPiece => "Please select your own piece to move",
            Rejection::InvalidDestination => "Invalid destination. Must be adjacent and empty.",
            Rejection::InvalidPlacement => "Invalid placement. Position may be occupied.",
            Rejection::InvalidMove => "Invalid move. Check piece ownership and adjacency.",
            Rejection::AiInvalidPlacement => "AI made invalid placement",
            Rejection::AiInvalidMove => "AI made invalid move",
            Rejection::NothingToUndo => "No moves to undo",
            Rejection::NoMoveFound => "AI could not find a valid move",
        };
        f.write_str(msg)
    }
}

/// What a click asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Connector cell during placement: nothing happens.
    Ignored,
    Place(Position),
    /// A source was selected; its neighbours must be looked up next.
    Select(Position),
    Move { from: Position, to: Position },
    Rejected(Rejection),
}

#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Interpret a click on display cell `(row, col)` against `game`.
    pub fn click(&mut self, game: &GameState, row: usize, col: usize) -> ClickOutcome {
        let pos = display_to_logical(row, col);
        if game.is_placement_phase {
            self.state = SelectionState::Idle;
            return match pos {
                None => ClickOutcome::Ignored,
                Some(p) if game.board.get(p).is_empty() => ClickOutcome::Place(p),
                Some(_) => ClickOutcome::Rejected(Rejection::PositionOccupied),
            };
        }

        match self.state {
            SelectionState::Idle => match pos {
                Some(p) if game.is_own_piece(p) => {
                    self.state = SelectionState::SourceSelected {
                        source: p,
                        destinations: PositionSet::new(),
                    };
                    ClickOutcome::Select(p)
                }
                _ => ClickOutcome::Rejected(Rejection::SelectOwnPiece),
            },
            SelectionState::SourceSelected {
                source,
                destinations,
            } => match pos {
                Some(p) if destinations.contains(p) => ClickOutcome::Move { from: source, to: p },
                // Selection is kept so the player can retry a destination.
                _ => ClickOutcome::Rejected(Rejection::InvalidDestination),
            },
        }
    }

    /// Record the engine's neighbours of `source`, keeping only points that
    /// are empty in `game`. Ignored if `source` is no longer selected.
    pub fn set_destinations<I>(&mut self, game: &GameState, source: Position, adjacent: I)
    where
        I: IntoIterator<Item = Position>,
    {
        if let SelectionState::SourceSelected {
            source: selected,
            destinations,
        } = &mut self.state
        {
            if *selected != source {
                return;
            }
            *destinations = adjacent
                .into_iter()
                .filter(|p| game.board.get(*p).is_empty())
                .collect();
        }
    }

    /// A move request resolved, successfully or not.
    pub fn finish_move(&mut self) {
        self.state = SelectionState::Idle;
    }

    pub fn reset(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// Drop any selection that no longer makes sense for `game`.
    pub fn sync_phase(&mut self, game: &GameState) {
        if game.is_placement_phase || !game.game_active {
            self.state = SelectionState::Idle;
        }
    }
}
