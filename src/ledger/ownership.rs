//! Tile ownership ledger.
//!
//! The `OwnershipLedger` records, for every ownable tile, who owns it and
//! which improvements stand on it. Non-ownable tiles have no entry.
//!
//! ## Invariants
//!
//! - A hotel implies `houses == 0`.
//! - Only Property tiles carry houses or a hotel.
//! - An unowned tile carries no improvements.

use serde::{Deserialize, Serialize};

use crate::board::{BoardMap, ColorGroup, Position};
use crate::core::PlayerId;

/// Ownership and improvement state of one ownable tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Current owner, `None` while the bank holds the tile.
    pub owner: Option<PlayerId>,
    /// Houses built (0-4). Always 0 when `hotel` is set.
    pub houses: u8,
    /// Whether a hotel stands on the tile.
    pub hotel: bool,
}

impl LedgerEntry {
    /// Whether any improvement stands on the tile.
    #[must_use]
    pub fn is_improved(&self) -> bool {
        self.hotel || self.houses > 0
    }
}

/// Ownership records for every ownable tile, indexed by position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipLedger {
    entries: Vec<Option<LedgerEntry>>,
}

impl OwnershipLedger {
    /// Create an empty ledger with an unowned entry for each ownable tile.
    #[must_use]
    pub fn new(board: &BoardMap) -> Self {
        let entries = board
            .tiles()
            .map(|tile| tile.is_ownable().then(LedgerEntry::default))
            .collect();
        Self { entries }
    }

    /// Get the entry for a tile, `None` if the tile is not ownable.
    #[must_use]
    pub fn entry(&self, position: Position) -> Option<&LedgerEntry> {
        self.entries.get(position.index()).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, position: Position) -> Option<&mut LedgerEntry> {
        self.entries.get_mut(position.index()).and_then(Option::as_mut)
    }

    /// Owner of a tile.
    #[must_use]
    pub fn owner(&self, position: Position) -> Option<PlayerId> {
        self.entry(position).and_then(|e| e.owner)
    }

    /// Whether `player` owns the tile.
    #[must_use]
    pub fn is_owned_by(&self, position: Position, player: PlayerId) -> bool {
        self.owner(position) == Some(player)
    }

    /// Houses on a tile.
    #[must_use]
    pub fn houses(&self, position: Position) -> u8 {
        self.entry(position).map_or(0, |e| e.houses)
    }

    /// Whether a hotel stands on a tile.
    #[must_use]
    pub fn has_hotel(&self, position: Position) -> bool {
        self.entry(position).is_some_and(|e| e.hotel)
    }

    /// Record `player` as the owner of a tile.
    ///
    /// Returns the previous owner. Improvements are cleared.
    pub fn assign(&mut self, position: Position, player: PlayerId) -> Option<PlayerId> {
        let entry = self.entry_mut(position)?;
        let previous = entry.owner;
        *entry = LedgerEntry {
            owner: Some(player),
            ..LedgerEntry::default()
        };
        previous
    }

    /// Return a tile to the bank: no owner, no improvements.
    ///
    /// Returns the previous owner.
    pub fn release(&mut self, position: Position) -> Option<PlayerId> {
        let entry = self.entry_mut(position)?;
        let previous = entry.owner;
        *entry = LedgerEntry::default();
        previous
    }

    /// Add houses to a tile. The caller checks eligibility and limits.
    pub fn add_houses(&mut self, position: Position, count: u8) {
        if let Some(entry) = self.entry_mut(position) {
            entry.houses += count;
        }
    }

    /// Replace the houses on a tile with a hotel.
    pub fn build_hotel(&mut self, position: Position) {
        if let Some(entry) = self.entry_mut(position) {
            entry.houses = 0;
            entry.hotel = true;
        }
    }

    /// Whether `player` owns every tile of a color group.
    #[must_use]
    pub fn owns_group(&self, board: &BoardMap, group: ColorGroup, player: PlayerId) -> bool {
        let members = board.group_members(group);
        !members.is_empty() && members.iter().all(|&pos| self.is_owned_by(pos, player))
    }

    /// Number of tiles in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().count()
    }

    /// Whether the ledger tracks no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over (position, entry) for every ownable tile.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &LedgerEntry)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (Position::new(i as u8), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger() -> (BoardMap, OwnershipLedger) {
        let board = BoardMap::standard();
        let ledger = OwnershipLedger::new(&board);
        (board, ledger)
    }

    #[test]
    fn test_new_ledger_is_unowned() {
        let (_, ledger) = ledger();
        assert_eq!(ledger.len(), 28);
        assert!(ledger.iter().all(|(_, e)| e.owner.is_none() && !e.is_improved()));
    }

    #[test]
    fn test_non_ownable_tiles_have_no_entry() {
        let (_, ledger) = ledger();
        assert!(ledger.entry(Position::new(0)).is_none());
        assert!(ledger.entry(Position::new(4)).is_none());
        assert!(ledger.entry(Position::new(7)).is_none());
        assert!(ledger.entry(Position::new(1)).is_some());
    }

    #[test]
    fn test_assign_and_release() {
        let (_, mut ledger) = ledger();
        let p0 = PlayerId::new(0);
        let pos = Position::new(1);

        assert_eq!(ledger.assign(pos, p0), None);
        assert_eq!(ledger.owner(pos), Some(p0));
        assert!(ledger.is_owned_by(pos, p0));

        ledger.add_houses(pos, 2);
        assert_eq!(ledger.houses(pos), 2);

        assert_eq!(ledger.release(pos), Some(p0));
        assert_eq!(ledger.owner(pos), None);
        assert_eq!(ledger.houses(pos), 0);
    }

    #[test]
    fn test_assign_non_ownable_is_ignored() {
        let (_, mut ledger) = ledger();
        assert_eq!(ledger.assign(Position::new(0), PlayerId::new(0)), None);
        assert_eq!(ledger.owner(Position::new(0)), None);
    }

    #[test]
    fn test_hotel_clears_houses() {
        let (_, mut ledger) = ledger();
        let pos = Position::new(39);
        ledger.assign(pos, PlayerId::new(1));
        ledger.add_houses(pos, 4);
        ledger.build_hotel(pos);

        let entry = ledger.entry(pos).unwrap();
        assert!(entry.hotel);
        assert_eq!(entry.houses, 0);
        assert!(ledger.has_hotel(pos));
    }

    #[test]
    fn test_group_ownership() {
        let (board, mut ledger) = ledger();
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        ledger.assign(Position::new(37), p0);
        assert!(!ledger.owns_group(&board, ColorGroup::DarkBlue, p0));

        ledger.assign(Position::new(39), p0);
        ledger.assign(Position::new(5), p1);

        assert!(ledger.owns_group(&board, ColorGroup::DarkBlue, p0));
        assert!(!ledger.owns_group(&board, ColorGroup::DarkBlue, p1));
        assert!(ledger.is_owned_by(Position::new(5), p1));
    }
}
