//! Board positions on the 40-tile ring.

use serde::{Deserialize, Serialize};

use crate::core::GameError;

/// Number of tiles on the board.
pub const BOARD_SIZE: u8 = 40;

/// A position on the board ring, always in `0..BOARD_SIZE`.
///
/// Position 0 is Start. Moving past position 39 wraps back to 0.
///
/// Deserialization goes through [`Position::try_new`], so out-of-range
/// values from a host are rejected rather than wrapped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Position(u8);

impl Position {
    /// The Start tile.
    pub const START: Position = Position(0);

    /// Create a position, wrapping values outside the ring.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % BOARD_SIZE)
    }

    /// Create a position, or `None` if `index` is off the board.
    #[must_use]
    pub const fn try_new(index: u8) -> Option<Self> {
        if index < BOARD_SIZE {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Get the raw index (0-39).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Advance by `pips` tiles.
    ///
    /// Returns the destination and whether the move crossed (or landed on)
    /// Start, i.e. `self + pips >= BOARD_SIZE`.
    #[must_use]
    pub const fn advance(self, pips: u8) -> (Position, bool) {
        let raw = self.0 as u16 + pips as u16;
        let passed_start = raw >= BOARD_SIZE as u16;
        (Position((raw % BOARD_SIZE as u16) as u8), passed_start)
    }
}

impl TryFrom<u8> for Position {
    type Error = GameError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Position::try_new(index).ok_or(GameError::InvalidPosition(index))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
