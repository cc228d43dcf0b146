//! Monopoly on the standard London board.
//!
//! A turn-based engine for 1-6 players:
//! - Roll, move around the 40-tile ring, collect 200 for passing Start
//! - Buy unowned tiles, pay rent on owned ones, pay tax into Free Parking
//! - Three doubles in a row or the Go to Jail tile sends a player to jail
//! - Build houses and hotels on complete color groups
//! - Debts beyond cash are covered by mortgaging tiles, or end the game for
//!   the debtor; the last player standing wins
//!
//! The host drives the game: it asks for the phase, submits actions and
//! renders each [`TurnOutcome`](crate::rules::TurnOutcome).

mod bankruptcy;
mod game;
mod improvements;
mod turn;

pub use game::{start_game, MonopolyBuilder, MonopolyGame, TurnOrder};
