//! Typed view of the authoritative game state reported by the engine.

use core::fmt;

use crate::config::BOARD_SIZE;
use crate::coords::Position;

/// The two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// Human readable name, as shown in the status line.
    pub fn name(self) -> &'static str {
        match self {
            Player::White => "White",
            Player::Black => "Black",
        }
    }

    /// Single letter used on the board art.
    pub fn symbol(self) -> char {
        match self {
            Player::White => 'W',
            Player::Black => 'B',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Occupancy of one board point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    White,
    Black,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Owner of the piece on this cell, if any.
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::White => Some(Player::White),
            Cell::Black => Some(Player::Black),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::White => Cell::White,
            Player::Black => Cell::Black,
        }
    }
}

/// Occupancy of all nine points. Always fully populated; never edited once
/// received, a new snapshot replaces it instead.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    cells: [Cell; BOARD_SIZE * BOARD_SIZE],
}

impl BoardSnapshot {
    /// Board with every point empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Copy of this board with `pos` set to `cell`.
    pub fn with(mut self, pos: Position, cell: Cell) -> Self {
        self.cells[pos.index()] = cell;
        self
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }
}

impl fmt::Debug for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BoardSnapshot:")?;
        for x in 0..BOARD_SIZE {
            for y in 0..BOARD_SIZE {
                let ch = match self.cells[x * BOARD_SIZE + y] {
                    Cell::Empty => '*',
                    Cell::White => 'W',
                    Cell::Black => 'B',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Authoritative state as last fetched from the engine.
///
/// Replaced wholesale on every fetch. The session keeps
/// `winner.is_some() => !game_active` true after each replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub board: BoardSnapshot,
    pub current_player: Player,
    pub white_count: u8,
    pub black_count: u8,
    pub is_placement_phase: bool,
    pub winner: Option<Player>,
    pub game_active: bool,
}

impl GameState {
    /// `true` if `pos` holds a piece of the player to move.
    pub fn is_own_piece(&self, pos: Position) -> bool {
        self.board.get(pos).owner() == Some(self.current_player)
    }
}

impl Default for GameState {
    /// State before any session has been started.
    fn default() -> Self {
        Self {
            board: BoardSnapshot::empty(),
            current_player: Player::White,
            white_count: 0,
            black_count: 0,
            is_placement_phase: true,
            winner: None,
            game_active: false,
        }
    }
}
