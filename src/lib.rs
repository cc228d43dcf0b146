//! # rust-monopoly
//!
//! A deterministic, turn-based Monopoly engine for the standard London board.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven**: The engine never blocks or prompts. It reports what it
//!    waits for (`TurnPhase`) and the host submits actions.
//!
//! 2. **N-Player**: 1-6 players, no two-player assumptions anywhere.
//!
//! 3. **Reproducible**: All dice come from a seeded ChaCha8 RNG, so a seed and
//!    an action list replay a whole game.
//!
//! ## Architecture
//!
//! - **Rules vs. State**: `MonopolyGame` holds the board and configuration and
//!   never changes; `GameState` holds everything that does and is passed
//!   explicitly to each operation.
//!
//! - **Persistent Data Structures**: possessions and history use `im-rs`, so
//!   cloning a state for what-if analysis is cheap.
//!
//! - **Outcomes, not callbacks**: every successful action returns a
//!   `TurnOutcome`; failed actions return a `GameError` and leave the state
//!   untouched.
//!
//! ## Modules
//!
//! - `core`: Players, dice, RNG, state, actions, configuration, errors
//! - `board`: Positions, tiles and the board map
//! - `ledger`: Tile ownership and improvements
//! - `rules`: RulesEngine trait and turn outcomes
//! - `games`: The Monopoly rules
//!
//! ## Example
//!
//! ```
//! use rust_monopoly::games::monopoly::{MonopolyBuilder, TurnOrder};
//! use rust_monopoly::{Position, RulesEngine, TurnPhase};
//!
//! let (game, mut state) = MonopolyBuilder::new()
//!     .turn_order(TurnOrder::AsGiven)
//!     .build(&["Ada", "Bob"], 42)
//!     .unwrap();
//!
//! // 1 + 2 lands on Whitechapel Road.
//! let outcome = game.roll_and_advance(&mut state, Some((1, 2))).unwrap();
//! assert!(outcome.purchase_pending());
//!
//! game.decide_purchase(&mut state, true).unwrap();
//! let ada = state.player_named("Ada").unwrap();
//! assert_eq!(state.balance(ada), 1420);
//! assert_eq!(state.ledger().owner(Position::new(3)), Some(ada));
//! assert!(matches!(state.phase(), TurnPhase::AwaitingRoll { .. }));
//! assert!(game.is_terminal(&state).is_none());
//! ```

pub mod core;
pub mod board;
pub mod ledger;
pub mod rules;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, PlayerAccount,
    GameRng, DiceRoll, GameConfig,
    Action, ActionKind, ActionRecord,
    Creditor, GameState, PhaseKind, TurnPhase, TurnState,
    GameError, IneligibleReason,
};

pub use crate::board::{BoardMap, ColorGroup, Deed, Position, Tile, TileKind, BOARD_SIZE};

pub use crate::ledger::{LedgerEntry, OwnershipLedger};

pub use crate::rules::{
    RulesEngine, GameResult,
    TurnOutcome, PendingDecision, MoneyDelta, MoneyReason,
    Movement, OwnershipChange, ImprovementChange, JailEvent,
};

pub use crate::games::monopoly::{start_game, MonopolyBuilder, MonopolyGame, TurnOrder};
