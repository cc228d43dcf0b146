//! Error types.
//!
//! Every error is recoverable: the rejected operation leaves the game state
//! untouched. Errors fall into two families:
//!
//! - **Caller misuse**: an operation that is not valid in the current phase
//!   (deciding a purchase when none is pending, rolling during a
//!   liquidation) or malformed input such as explicit dice out of range.
//! - **Rule violations**: a legal request the rules refuse (not enough money,
//!   an incomplete color group, too little mortgage value offered).
//!
//! Use [`GameError::is_misuse`] to tell them apart.

use thiserror::Error;

use super::action::ActionKind;
use super::state::PhaseKind;
use crate::board::Position;

/// Why a tile cannot be improved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum IneligibleReason {
    #[error("tile cannot carry houses")]
    NotBuildable,
    #[error("tile is not owned by the player")]
    NotOwned,
    #[error("player does not own the whole color group")]
    IncompleteGroup,
    #[error("tile already has a hotel")]
    HotelBuilt,
    #[error("house limit exceeded")]
    HouseLimit,
    #[error("a hotel needs a full set of houses")]
    HousesIncomplete,
}

/// Errors returned by game operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("player count {0} is outside the supported range")]
    InvalidPlayerCount(usize),

    #[error("two players cannot share the name {0:?}")]
    DuplicatePlayerName(String),

    #[error("{action:?} is not allowed while {phase:?}")]
    IllegalActionForState { action: ActionKind, phase: PhaseKind },

    #[error("position {0} is off the board")]
    InvalidPosition(u8),

    #[error("dice values {die1} and {die2} must both be between 1 and 6")]
    InvalidDice { die1: u8, die2: u8 },

    #[error("insufficient funds: {needed} needed, {available} available")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("mortgage value {offered} does not cover the {due} due")]
    InsufficientLiquidation { offered: i64, due: i64 },

    #[error("cannot improve {position}: {reason}")]
    ImprovementIneligible { position: Position, reason: IneligibleReason },

    #[error("{position} is not owned by the debtor")]
    NotOwned { position: Position },
}

impl GameError {
    /// Whether this error is a caller mistake rather than a rule violation.
    #[must_use]
    pub fn is_misuse(&self) -> bool {
        matches!(
            self,
            GameError::IllegalActionForState { .. }
                | GameError::InvalidDice { .. }
                | GameError::InvalidPosition(_)
        )
    }
}
