#![cfg(feature = "std")]
//! JSON bodies exchanged with the engine and their conversion into the
//! typed board model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{BoardSnapshot, Cell, GameState, Player};
use crate::config::BOARD_SIZE;
use crate::coords::Position;

/// Errors raised while turning an engine response into typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Board did not have 3 rows of 3 cells.
    BoardShape,
    UnknownCell(String),
    UnknownPlayer(String),
    /// Coordinate pair outside the board.
    BadPosition(i64, i64),
    /// Move arrays must have 2 (placement) or 4 (movement) entries.
    BadMoveLength(usize),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::BoardShape => write!(f, "board is not {0}x{0}", BOARD_SIZE),
            ProtocolError::UnknownCell(c) => write!(f, "unknown cell code {:?}", c),
            ProtocolError::UnknownPlayer(p) => write!(f, "unknown player code {:?}", p),
            ProtocolError::BadPosition(x, y) => write!(f, "position ({}, {}) is off the board", x, y),
            ProtocolError::BadMoveLength(n) => write!(f, "move has {} coordinates, expected 2 or 4", n),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// Acknowledgement carried by `start`, `place`, `move` and `undo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRequest {
    pub x: usize,
    pub y: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub x: usize,
    pub y: usize,
    pub nx: usize,
    pub ny: usize,
}

/// Full snapshot returned by `/get_board_state`. The board is indexed
/// `board[y][x]`; cells are `"W"`, `"B"` or `"*"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStateResponse {
    pub board: Vec<Vec<String>>,
    pub current_player: String,
    pub white_count: u8,
    pub black_count: u8,
    pub is_placement_phase: bool,
    #[serde(default)]
    pub winner: Option<String>,
    pub game_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerMoveResponse {
    #[serde(rename = "move", default)]
    pub mv: Option<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentResponse {
    #[serde(default)]
    pub adjacent: Vec<Vec<i64>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidMovesResponse {
    #[serde(default)]
    pub moves: Vec<Vec<i64>>,
}

/// A move suggested by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMove {
    Place(Position),
    Move { from: Position, to: Position },
}

impl EngineMove {
    /// Parse the engine's flat `[x, y]` / `[x, y, nx, ny]` encoding.
    pub fn from_coords(coords: &[i64]) -> Result<Self, ProtocolError> {
        match coords {
            [x, y] => Ok(EngineMove::Place(position(*x, *y)?)),
            [x, y, nx, ny] => Ok(EngineMove::Move {
                from: position(*x, *y)?,
                to: position(*nx, *ny)?,
            }),
            other => Err(ProtocolError::BadMoveLength(other.len())),
        }
    }
}

impl fmt::Display for EngineMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineMove::Place(p) => write!(f, "place at {}", p),
            EngineMove::Move { from, to } => write!(f, "move {} -> {}", from, to),
        }
    }
}

/// Convert a wire coordinate pair into a [`Position`].
pub fn position(x: i64, y: i64) -> Result<Position, ProtocolError> {
    let bad = || ProtocolError::BadPosition(x, y);
    let ux = usize::try_from(x).map_err(|_| bad())?;
    let uy = usize::try_from(y).map_err(|_| bad())?;
    Position::new(ux, uy).map_err(|_| bad())
}

/// Convert a list of `[x, y]` pairs.
pub fn positions(pairs: &[Vec<i64>]) -> Result<Vec<Position>, ProtocolError> {
    pairs
        .iter()
        .map(|pair| match pair.as_slice() {
            [x, y] => position(*x, *y),
            other => Err(ProtocolError::BadMoveLength(other.len())),
        })
        .collect()
}

pub fn parse_player(code: &str) -> Result<Player, ProtocolError> {
    match code {
        "W" => Ok(Player::White),
        "B" => Ok(Player::Black),
        other => Err(ProtocolError::UnknownPlayer(other.to_string())),
    }
}

pub fn parse_cell(code: &str) -> Result<Cell, ProtocolError> {
    match code {
        "*" => Ok(Cell::Empty),
        "W" => Ok(Cell::White),
        "B" => Ok(Cell::Black),
        other => Err(ProtocolError::UnknownCell(other.to_string())),
    }
}

impl TryFrom<&BoardStateResponse> for BoardSnapshot {
    type Error = ProtocolError;

    fn try_from(resp: &BoardStateResponse) -> Result<Self, Self::Error> {
        if resp.board.len() != BOARD_SIZE || resp.board.iter().any(|row| row.len() != BOARD_SIZE) {
            return Err(ProtocolError::BoardShape);
        }
        let mut board = BoardSnapshot::empty();
        for (y, row) in resp.board.iter().enumerate() {
            for (x, code) in row.iter().enumerate() {
                let pos = Position::new(x, y).map_err(|_| ProtocolError::BoardShape)?;
                board = board.with(pos, parse_cell(code)?);
            }
        }
        Ok(board)
    }
}

impl TryFrom<BoardStateResponse> for GameState {
    type Error = ProtocolError;

    fn try_from(resp: BoardStateResponse) -> Result<Self, Self::Error> {
        let board = BoardSnapshot::try_from(&resp)?;
        let winner = match resp.winner.as_deref() {
            None | Some("") => None,
            Some(code) => Some(parse_player(code)?),
        };
        Ok(GameState {
            board,
            current_player: parse_player(&resp.current_player)?,
            white_count: resp.white_count,
            black_count: resp.black_count,
            is_placement_phase: resp.is_placement_phase,
            winner,
            game_active: resp.game_active,
        })
    }
}

impl From<&GameState> for BoardStateResponse {
    fn from(state: &GameState) -> Self {
        let code = |cell: Cell| match cell {
            Cell::Empty => "*".to_string(),
            Cell::White => "W".to_string(),
            Cell::Black => "B".to_string(),
        };
        let board = (0..BOARD_SIZE)
            .map(|y| {
                (0..BOARD_SIZE)
                    .filter_map(|x| Position::new(x, y).ok())
                    .map(|pos| code(state.board.get(pos)))
                    .collect()
            })
            .collect();
        BoardStateResponse {
            board,
            current_player: state.current_player.symbol().to_string(),
            white_count: state.white_count,
            black_count: state.black_count,
            is_placement_phase: state.is_placement_phase,
            winner: state.winner.map(|p| p.symbol().to_string()),
            game_active: state.game_active,
        }
    }
}
