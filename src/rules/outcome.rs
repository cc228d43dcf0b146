//! What an action did.
//!
//! Every successful action returns a [`TurnOutcome`] describing the dice,
//! movement, money and ownership changes, and what the engine is waiting for
//! next. Hosts render it; tests assert on it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Position;
use crate::core::{Creditor, DiceRoll, PlayerId};

/// Why money moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoneyReason {
    /// Passed Start.
    PassedStart,
    /// Landed exactly on Start.
    LandedOnStart,
    /// Bought a tile.
    Purchase,
    /// Paid or received rent.
    Rent,
    /// Paid tax.
    Tax,
    /// Collected the free-parking pool.
    FreeParking,
    /// Mortgage proceeds from liquidation.
    Mortgage,
    /// Bought houses or hotels.
    Improvement,
}

/// A balance change for one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyDelta {
    pub player: PlayerId,
    /// Signed amount: negative when the player paid.
    pub amount: i64,
    pub reason: MoneyReason,
}

/// A tile changing hands. `None` is the bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipChange {
    pub position: Position,
    pub from: Option<PlayerId>,
    pub to: Option<PlayerId>,
}

/// Improvement level of a tile after a build.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImprovementChange {
    pub position: Position,
    pub houses: u8,
    pub hotel: bool,
}

/// Token movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub from: Position,
    pub to: Position,
    pub passed_start: bool,
}

/// Jail transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JailEvent {
    /// Sent to jail (Go to Jail tile or too many doubles).
    Jailed,
    /// Served a turn without rolling doubles; still jailed.
    Served { turns_left: u8 },
    /// Released, by doubles or by serving the full sentence.
    Released,
}

/// A decision the engine is waiting for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingDecision {
    /// Accept or decline buying the tile.
    Purchase { position: Position, price: i64 },
    /// Pick tiles to mortgage, worth at least `amount_due`.
    Liquidation {
        position: Position,
        amount_due: i64,
        creditor: Creditor,
        candidates: Vec<Position>,
    },
}

/// Everything an action changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Who acted.
    pub player: PlayerId,
    /// Dice rolled, for roll actions.
    pub dice: Option<DiceRoll>,
    /// Token movement, if any.
    pub movement: Option<Movement>,
    /// Balance changes, in the order they happened.
    pub money: SmallVec<[MoneyDelta; 4]>,
    /// Tiles that changed hands.
    pub ownership: SmallVec<[OwnershipChange; 2]>,
    /// Improvements built.
    pub improvements: SmallVec<[ImprovementChange; 2]>,
    /// Jail transition, if any.
    pub jail: Option<JailEvent>,
    /// Landed on an unowned tile that the player cannot afford.
    pub unaffordable: Option<Position>,
    /// Decision the engine now waits for.
    pub pending: Option<PendingDecision>,
    /// Player eliminated by bankruptcy.
    pub eliminated: Option<PlayerId>,
    /// The same player rolls again.
    pub extra_roll: bool,
    /// The turn passed to another player.
    pub turn_complete: bool,
    /// Whose turn it is now, if the game continues.
    pub next_player: Option<PlayerId>,
    /// The winner, if the game ended.
    pub winner: Option<PlayerId>,
}

impl TurnOutcome {
    /// Create an empty outcome for `player`.
    #[must_use]
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            dice: None,
            movement: None,
            money: SmallVec::new(),
            ownership: SmallVec::new(),
            improvements: SmallVec::new(),
            jail: None,
            unaffordable: None,
            pending: None,
            eliminated: None,
            extra_roll: false,
            turn_complete: false,
            next_player: None,
            winner: None,
        }
    }

    /// Record a balance change.
    pub fn money(&mut self, player: PlayerId, amount: i64, reason: MoneyReason) {
        self.money.push(MoneyDelta {
            player,
            amount,
            reason,
        });
    }

    /// Record a change of ownership.
    pub fn transfer(&mut self, position: Position, from: Option<PlayerId>, to: Option<PlayerId>) {
        self.ownership.push(OwnershipChange { position, from, to });
    }

    /// Net balance change for a player across this outcome.
    #[must_use]
    pub fn net_change(&self, player: PlayerId) -> i64 {
        self.money
            .iter()
            .filter(|d| d.player == player)
            .map(|d| d.amount)
            .sum()
    }

    /// Whether the engine waits for a purchase decision.
    #[must_use]
    pub fn purchase_pending(&self) -> bool {
        matches!(self.pending, Some(PendingDecision::Purchase { .. }))
    }

    /// Whether the engine waits for a liquidation decision.
    #[must_use]
    pub fn liquidation_pending(&self) -> bool {
        matches!(self.pending, Some(PendingDecision::Liquidation { .. }))
    }

    /// Whether the game ended with this action.
    #[must_use]
    pub fn game_over(&self) -> bool {
        self.winner.is_some()
    }
}
