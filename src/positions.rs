//! A set of board positions packed into the low nine bits of a `u16`.
//!
//! `no_std` friendly and allocation free, so selection state can be copied
//! around and compared cheaply.

use core::fmt;

use crate::config::BOARD_SIZE;
use crate::coords::Position;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PositionSet {
    bits: u16,
}

impl PositionSet {
    /// Empty set.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn insert(&mut self, pos: Position) {
        self.bits |= 1 << pos.index();
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.bits & (1 << pos.index()) != 0
    }

    /// Positions in row-major order.
    pub fn iter(&self) -> Iter {
        Iter {
            bits: self.bits,
            idx: 0,
        }
    }
}

impl FromIterator<Position> for PositionSet {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = Self::new();
        for pos in iter {
            set.insert(pos);
        }
        set
    }
}

/// Iterator over the members of a [`PositionSet`].
#[derive(Clone, Copy)]
pub struct Iter {
    bits: u16,
    idx: usize,
}

impl Iterator for Iter {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        while self.idx < BOARD_SIZE * BOARD_SIZE {
            let idx = self.idx;
            self.idx += 1;
            if (self.bits >> idx) & 1 != 0 {
                return Position::from_index(idx);
            }
        }
        None
    }
}

impl fmt::Debug for PositionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
