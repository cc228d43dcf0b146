//! Rules engine trait.
//!
//! The rules implement this trait to define:
//! - Which actions are legal in the current phase
//! - How actions modify state
//! - When the game is over

use serde::{Deserialize, Serialize};

use super::outcome::TurnOutcome;
use crate::core::{Action, ActionKind, GameConfig, GameError, GameState, PlayerId};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Last player standing.
    pub winner: PlayerId,
    /// Turn on which the game ended.
    pub turns: u32,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: empty once the game is over
/// - `apply_action`: deterministic given the state's RNG; on error the state
///   is unchanged
/// - `is_terminal`: `None` while the game continues
pub trait RulesEngine {
    /// Get the game configuration.
    fn config(&self) -> &GameConfig;

    /// Action kinds the current player may take.
    fn legal_actions(&self, state: &GameState) -> Vec<ActionKind>;

    /// Apply an action for the current player.
    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<TurnOutcome, GameError>;

    /// Check if the game is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Whether `action` is legal right now.
    fn is_legal(&self, state: &GameState, action: &Action) -> bool {
        self.legal_actions(state).contains(&action.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult {
            winner: PlayerId::new(1),
            turns: 40,
        };
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));
    }
}
