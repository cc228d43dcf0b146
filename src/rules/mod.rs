//! Rules engine trait and action outcomes.
//!
//! The rules implement `RulesEngine` to define:
//! - Legal actions for each phase
//! - How actions modify state
//! - Win conditions
//!
//! Hosts drive a game through this trait and render the returned
//! `TurnOutcome`s.

pub mod engine;
pub mod outcome;

pub use engine::{GameResult, RulesEngine};
pub use outcome::{
    ImprovementChange, JailEvent, MoneyDelta, MoneyReason, Movement, OwnershipChange,
    PendingDecision, TurnOutcome,
};
