//! Core engine types: players, dice, state, actions, configuration, errors.
//!
//! This module holds the building blocks the rules operate on. Nothing here
//! decides what a tile does; that lives in `games::monopoly`.

pub mod player;
pub mod rng;
pub mod dice;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{PlayerAccount, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use dice::DiceRoll;
pub use config::GameConfig;
pub use action::{Action, ActionKind, ActionRecord};
pub use state::{Creditor, GameState, PhaseKind, TurnPhase, TurnState};
pub use error::{GameError, IneligibleReason};
