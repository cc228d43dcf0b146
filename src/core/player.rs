//! Player identification and accounts.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Ids are dense and follow join order, so the
//! first name passed to the builder is `PlayerId(0)` whatever the dice-off
//! decides about turn order.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.
//!
//! ## PlayerAccount
//!
//! Mutable per-player data: balance, position, possessions, jail counter.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::board::Position;

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_monopoly::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use rust_monopoly::core::{PlayerId, PlayerMap};
///
/// let mut cash: PlayerMap<i64> = PlayerMap::new(3, |_| 1500);
/// cash[PlayerId::new(1)] -= 60;
/// assert_eq!(cash[PlayerId::new(1)], 1440);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8).map(|i| factory(PlayerId(i))).collect();

        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over all values.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A player's mutable account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAccount {
    /// Identity.
    pub id: PlayerId,
    /// Unique display name.
    pub name: String,
    /// Cash. Only negative transiently, never between operations.
    pub balance: i64,
    /// Token location.
    pub position: Position,
    /// Owned tiles, ordered by position.
    pub possessions: OrdSet<Position>,
    /// Jail turns left: 0 when free.
    pub jail_turns: u8,
    /// False once eliminated; the token is off the board.
    pub in_game: bool,
}

impl PlayerAccount {
    /// Create an account on the Start tile.
    pub fn new(id: PlayerId, name: impl Into<String>, balance: i64) -> Self {
        Self {
            id,
            name: name.into(),
            balance,
            position: Position::START,
            possessions: OrdSet::new(),
            jail_turns: 0,
            in_game: true,
        }
    }

    /// Whether the player is serving jail time.
    #[must_use]
    pub fn in_jail(&self) -> bool {
        self.jail_turns > 0
    }

    /// Whether the player owns the tile at `position`.
    #[must_use]
    pub fn owns(&self, position: Position) -> bool {
        self.possessions.contains(&position)
    }

    /// Add money, returning the new balance.
    pub fn receive(&mut self, amount: i64) -> i64 {
        self.balance += amount;
        self.balance
    }

    /// Remove money, returning the new balance.
    pub fn pay(&mut self, amount: i64) -> i64 {
        self.balance -= amount;
        self.balance
    }
}
