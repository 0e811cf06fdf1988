//! Derives the renderable board from the game state and the selection.
//!
//! [`present`] is a pure projection: it owns nothing, caches nothing, and
//! returns the same model for the same inputs. Rendering layers consume the
//! model; nothing reads it back to decide what is legal.

use core::fmt;

use crate::board::{Cell, GameState, Player};
use crate::config::{DISPLAY_SIZE, PIECES_PER_PLAYER};
use crate::coords::{connector_glyph, display_to_logical, Position};
use crate::selection::SelectionState;

/// Extra highlight of a board point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Plain,
    /// A click here would start a request.
    Selectable,
    /// The piece picked as the move source.
    Selected,
    /// An empty neighbour the selected piece may move to.
    Destination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCell {
    Point {
        position: Position,
        cell: Cell,
        marker: Marker,
    },
    Connector {
        glyph: char,
    },
}

/// Scalars shown next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub current_player: &'static str,
    pub white_pieces: u8,
    pub black_pieces: u8,
    pub phase: &'static str,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Current Player: {} | White: {}/{}  Black: {}/{} | {}",
            self.current_player,
            self.white_pieces,
            PIECES_PER_PLAYER,
            self.black_pieces,
            PIECES_PER_PLAYER,
            self.phase
        )
    }
}

/// Which game controls are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub new_game: bool,
    pub undo: bool,
    pub restart: bool,
    pub ai_move: bool,
    pub depth_input: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayModel {
    pub cells: [[DisplayCell; DISPLAY_SIZE]; DISPLAY_SIZE],
    pub status: StatusLine,
    pub controls: Controls,
    pub winner: Option<Player>,
}

/// Project `game` and `selection` into a display model.
pub fn present(game: &GameState, selection: &SelectionState) -> DisplayModel {
    let cells = core::array::from_fn(|row| {
        core::array::from_fn(|col| match display_to_logical(row, col) {
            Some(position) => DisplayCell::Point {
                position,
                cell: game.board.get(position),
                marker: marker_for(game, selection, position),
            },
            None => DisplayCell::Connector {
                glyph: connector_glyph(row, col).unwrap_or(' '),
            },
        })
    });

    DisplayModel {
        cells,
        status: StatusLine {
            current_player: game.current_player.name(),
            white_pieces: game.white_count,
            black_pieces: game.black_count,
            phase: if game.is_placement_phase {
                "Placement Phase"
            } else {
                "Movement Phase"
            },
        },
        controls: Controls {
            new_game: !game.game_active,
            undo: game.game_active,
            restart: game.game_active,
            ai_move: game.game_active,
            depth_input: game.game_active,
        },
        winner: game.winner,
    }
}

fn marker_for(game: &GameState, selection: &SelectionState, pos: Position) -> Marker {
    if !game.game_active {
        return Marker::Plain;
    }
    if game.is_placement_phase {
        return if game.board.get(pos).is_empty() {
            Marker::Selectable
        } else {
            Marker::Plain
        };
    }
    match selection {
        SelectionState::SourceSelected { source, .. } if *source == pos => Marker::Selected,
        SelectionState::SourceSelected { destinations, .. } if destinations.contains(pos) => {
            Marker::Destination
        }
        SelectionState::SourceSelected { .. } => Marker::Plain,
        SelectionState::Idle if game.is_own_piece(pos) => Marker::Selectable,
        SelectionState::Idle => Marker::Plain,
    }
}

impl fmt::Display for DisplayModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..DISPLAY_SIZE {
            write!(f, " {} ", col)?;
        }
        writeln!(f)?;
        for (row, cells) in self.cells.iter().enumerate() {
            write!(f, "{:2} ", row)?;
            for cell in cells {
                match cell {
                    DisplayCell::Point { cell, marker, .. } => {
                        let ch = match cell {
                            Cell::Empty => '*',
                            Cell::White => 'W',
                            Cell::Black => 'B',
                        };
                        match marker {
                            Marker::Selected => write!(f, "[{}]", ch)?,
                            Marker::Destination => write!(f, " + ")?,
                            Marker::Plain | Marker::Selectable => write!(f, " {} ", ch)?,
                        }
                    }
                    DisplayCell::Connector { glyph: '─' } => write!(f, "───")?,
                    DisplayCell::Connector { glyph } => write!(f, " {} ", glyph)?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "{}", self.status)
    }
}
