//! Mapping between the 5×5 display grid and the 3×3 logical board.
//!
//! Display cells at even row and even column indices are board points; the
//! remaining 16 cells only draw the connecting lines. A point at display
//! `(row, col)` is the logical position `(row / 2, col / 2)`.

use core::fmt;

use crate::config::{BOARD_ART, BOARD_SIZE, DISPLAY_SIZE};

/// Errors returned when building a [`Position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordError {
    /// Coordinate outside `0..BOARD_SIZE`.
    OutOfBounds { x: usize, y: usize },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::OutOfBounds { x, y } => {
                write!(f, "position ({}, {}) is outside the 3x3 board", x, y)
            }
        }
    }
}

/// One of the nine board intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Build a position, rejecting anything off the board.
    pub fn new(x: usize, y: usize) -> Result<Self, CoordError> {
        if x >= BOARD_SIZE || y >= BOARD_SIZE {
            return Err(CoordError::OutOfBounds { x, y });
        }
        Ok(Self {
            x: x as u8,
            y: y as u8,
        })
    }

    pub fn x(self) -> usize {
        self.x as usize
    }

    pub fn y(self) -> usize {
        self.y as usize
    }

    /// Row-major index in `0..9`.
    pub fn index(self) -> usize {
        self.x() * BOARD_SIZE + self.y()
    }

    /// Inverse of [`Position::index`].
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::new(idx / BOARD_SIZE, idx % BOARD_SIZE).ok()
    }

    /// All nine positions in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE * BOARD_SIZE).filter_map(Position::from_index)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Logical position shown at display cell `(row, col)`, or `None` for
/// connector cells and anything outside the grid.
pub fn display_to_logical(row: usize, col: usize) -> Option<Position> {
    if row >= DISPLAY_SIZE || col >= DISPLAY_SIZE || row % 2 != 0 || col % 2 != 0 {
        return None;
    }
    Position::new(row / 2, col / 2).ok()
}

/// Display cell that shows `pos`.
pub fn logical_to_display(pos: Position) -> (usize, usize) {
    (pos.x() * 2, pos.y() * 2)
}

/// `true` for the 16 ornament cells of the display grid.
pub fn is_connector(row: usize, col: usize) -> bool {
    row < DISPLAY_SIZE && col < DISPLAY_SIZE && display_to_logical(row, col).is_none()
}

/// Line glyph drawn at a connector cell.
pub fn connector_glyph(row: usize, col: usize) -> Option<char> {
    if !is_connector(row, col) {
        return None;
    }
    BOARD_ART[row].chars().nth(col)
}
