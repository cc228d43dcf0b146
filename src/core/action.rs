//! Player actions and the action history.
//!
//! Every request the host can make of the engine is an [`Action`]. Applying
//! an action through [`RulesEngine::apply_action`](crate::rules::RulesEngine)
//! either changes the state and appends an [`ActionRecord`] to the history,
//! or fails with a [`GameError`](crate::core::GameError) and changes nothing.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::board::Position;

/// A complete game action.
///
/// ```
/// use rust_monopoly::core::{Action, ActionKind};
///
/// let roll = Action::roll();
/// assert_eq!(roll.kind(), ActionKind::Roll);
///
/// let scripted = Action::roll_with(3, 4);
/// assert_eq!(scripted, Action::Roll { dice: Some((3, 4)) });
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Roll the dice, optionally with explicit values.
    Roll { dice: Option<(u8, u8)> },
    /// Accept or decline the pending purchase offer.
    DecidePurchase { accept: bool },
    /// Mortgage these tiles to cover the pending debt.
    DecideLiquidation { positions: SmallVec<[Position; 4]> },
    /// Add houses: (tile, number of houses to add).
    BuildHouses { builds: SmallVec<[(Position, u8); 4]> },
    /// Convert four houses into a hotel on each tile.
    BuildHotels { positions: SmallVec<[Position; 4]> },
}

impl Action {
    /// Roll random dice.
    #[must_use]
    pub fn roll() -> Self {
        Action::Roll { dice: None }
    }

    /// Roll with explicit dice values.
    #[must_use]
    pub fn roll_with(die1: u8, die2: u8) -> Self {
        Action::Roll {
            dice: Some((die1, die2)),
        }
    }

    /// Answer a purchase offer.
    #[must_use]
    pub fn decide_purchase(accept: bool) -> Self {
        Action::DecidePurchase { accept }
    }

    /// Mortgage the given tiles.
    #[must_use]
    pub fn liquidate(positions: &[Position]) -> Self {
        Action::DecideLiquidation {
            positions: SmallVec::from_slice(positions),
        }
    }

    /// Build houses.
    #[must_use]
    pub fn build_houses(builds: &[(Position, u8)]) -> Self {
        Action::BuildHouses {
            builds: SmallVec::from_slice(builds),
        }
    }

    /// Build hotels.
    #[must_use]
    pub fn build_hotels(positions: &[Position]) -> Self {
        Action::BuildHotels {
            positions: SmallVec::from_slice(positions),
        }
    }

    /// The kind of this action, without its arguments.
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Roll { .. } => ActionKind::Roll,
            Action::DecidePurchase { .. } => ActionKind::DecidePurchase,
            Action::DecideLiquidation { .. } => ActionKind::DecideLiquidation,
            Action::BuildHouses { .. } => ActionKind::BuildHouses,
            Action::BuildHotels { .. } => ActionKind::BuildHotels,
        }
    }
}

/// Action type without arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Roll,
    DecidePurchase,
    DecideLiquidation,
    BuildHouses,
    BuildHotels,
}

/// A recorded action with metadata for history tracking.
///
/// Used for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kinds() {
        assert_eq!(Action::roll().kind(), ActionKind::Roll);
        assert_eq!(Action::decide_purchase(true).kind(), ActionKind::DecidePurchase);
        assert_eq!(Action::liquidate(&[Position::new(1)]).kind(), ActionKind::DecideLiquidation);
        assert_eq!(Action::build_houses(&[(Position::new(1), 2)]).kind(), ActionKind::BuildHouses);
        assert_eq!(Action::build_hotels(&[Position::new(39)]).kind(), ActionKind::BuildHotels);
    }

    #[test]
    fn test_action_equality() {
        let a1 = Action::liquidate(&[Position::new(1), Position::new(3)]);
        let a2 = Action::liquidate(&[Position::new(1), Position::new(3)]);
        let a3 = Action::liquidate(&[Position::new(1)]);

        assert_eq!(a1, a2);
        assert_ne!(a1, a3);
    }

    #[test]
    fn test_action_record() {
        let action = Action::roll_with(2, 2);
        let record = ActionRecord::new(PlayerId::new(0), action.clone(), 3, 5);

        assert_eq!(record.player, PlayerId::new(0));
        assert_eq!(record.action, action);
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 5);
    }

    #[test]
    fn test_action_record_serialization() {
        let action = Action::build_houses(&[(Position::new(37), 2), (Position::new(39), 1)]);
        let record = ActionRecord::new(PlayerId::new(1), action, 2, 3);

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ActionRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_off_board_position_rejected_on_deserialize() {
        let ok: Action = serde_json::from_str(r#"{"DecideLiquidation":{"positions":[1,39]}}"#).unwrap();
        assert_eq!(ok, Action::liquidate(&[Position::new(1), Position::new(39)]));

        let bad = serde_json::from_str::<Action>(r#"{"DecideLiquidation":{"positions":[41]}}"#);
        assert!(bad.is_err());
    }
}
