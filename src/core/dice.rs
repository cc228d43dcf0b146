//! A roll of two six-sided dice.

use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Result of rolling two dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
}

impl DiceRoll {
    /// Build a roll from explicit die values.
    ///
    /// Used to replay scripted scenarios. Each die must be in `1..=6`.
    pub fn explicit(die1: u8, die2: u8) -> Result<Self, GameError> {
        if !(1..=6).contains(&die1) || !(1..=6).contains(&die2) {
            return Err(GameError::InvalidDice { die1, die2 });
        }
        Ok(Self { die1, die2 })
    }

    /// Total pips.
    #[must_use]
    pub const fn sum(self) -> u8 {
        self.die1 + self.die2
    }

    /// Both dice show the same face.
    #[must_use]
    pub const fn is_doubles(self) -> bool {
        self.die1 == self.die2
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}={}", self.die1, self.die2, self.sum())
    }
}
