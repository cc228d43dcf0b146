//! Tile ownership ledger.
//!
//! Tracks the mutable side of every ownable tile (owner, houses, hotel),
//! keeping the board itself immutable.

pub mod ownership;

pub use ownership::{LedgerEntry, OwnershipLedger};
