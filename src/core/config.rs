//! Game configuration.
//!
//! House rules that are numbers rather than behavior live here: starting
//! cash, jail length, how many doubles send a player to jail, and the rent
//! multipliers for improvements. The defaults are the standard rules.

use serde::{Deserialize, Serialize};

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cash each player starts with.
    pub starting_balance: i64,

    /// Turns a player spends in jail when sent there.
    pub jail_turns: u8,

    /// Consecutive doubles that send the roller to jail.
    pub doubles_to_jail: u8,

    /// Maximum houses on one tile before a hotel.
    pub max_houses: u8,

    /// Rent multiplier for 1, 2, 3 and 4 houses, applied to base rent.
    pub house_multipliers: [i64; 4],

    /// Rent multiplier for a hotel, applied to base rent.
    pub hotel_multiplier: i64,

    /// Fewest players a game accepts.
    pub min_players: usize,

    /// Most players a game accepts.
    pub max_players: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1500,
            jail_turns: 3,
            doubles_to_jail: 3,
            max_houses: 4,
            house_multipliers: [5, 15, 45, 80],
            hotel_multiplier: 125,
            min_players: 1,
            max_players: 6,
        }
    }
}

impl GameConfig {
    /// Set the starting balance.
    #[must_use]
    pub fn with_starting_balance(mut self, balance: i64) -> Self {
        self.starting_balance = balance;
        self
    }

    /// Set the jail length.
    #[must_use]
    pub fn with_jail_turns(mut self, turns: u8) -> Self {
        self.jail_turns = turns;
        self
    }

    /// Set how many consecutive doubles send a player to jail.
    #[must_use]
    pub fn with_doubles_to_jail(mut self, doubles: u8) -> Self {
        self.doubles_to_jail = doubles;
        self
    }

    /// Whether `count` players may play.
    #[must_use]
    pub fn accepts_player_count(&self, count: usize) -> bool {
        (self.min_players..=self.max_players).contains(&count)
    }

    /// Rent multiplier for `houses` houses (1 for none).
    #[must_use]
    pub fn house_multiplier(&self, houses: u8) -> i64 {
        match houses {
            0 => 1,
            n => self.house_multipliers[usize::from(n.min(4)) - 1],
        }
    }
}
