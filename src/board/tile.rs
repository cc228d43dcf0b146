//! Tile definitions: kinds, title deeds, and color groups.
//!
//! Tiles are immutable once the board is built. Everything that changes
//! during play (owner, houses, hotel) lives in the
//! [`OwnershipLedger`](crate::ledger::OwnershipLedger).

use serde::{Deserialize, Serialize};

use super::position::Position;

/// Color group of an ownable tile.
///
/// Stations and utilities form their own groups but can never be improved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColorGroup {
    Brown,
    LightBlue,
    Pink,
    Orange,
    Red,
    Yellow,
    Green,
    DarkBlue,
    Station,
    Utility,
}

impl ColorGroup {
    /// Every group, in board order.
    pub const ALL: [ColorGroup; 10] = [
        ColorGroup::Brown,
        ColorGroup::LightBlue,
        ColorGroup::Pink,
        ColorGroup::Orange,
        ColorGroup::Red,
        ColorGroup::Yellow,
        ColorGroup::Green,
        ColorGroup::DarkBlue,
        ColorGroup::Station,
        ColorGroup::Utility,
    ];

    /// Price of a single house (and of a hotel) in this group.
    ///
    /// `None` for groups that cannot be improved.
    #[must_use]
    pub const fn house_price(self) -> Option<i64> {
        match self {
            ColorGroup::Brown | ColorGroup::LightBlue => Some(50),
            ColorGroup::Pink | ColorGroup::Orange => Some(100),
            ColorGroup::Red | ColorGroup::Yellow => Some(150),
            ColorGroup::Green | ColorGroup::DarkBlue => Some(200),
            ColorGroup::Station | ColorGroup::Utility => None,
        }
    }

    /// Whether houses and hotels can be built in this group.
    #[must_use]
    pub const fn is_buildable(self) -> bool {
        self.house_price().is_some()
    }
}

/// Title deed of an ownable tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deed {
    /// Purchase price.
    pub price: i64,
    /// Rent without improvements.
    pub rent: i64,
    /// Color group.
    pub group: ColorGroup,
}

impl Deed {
    /// Create a new deed.
    #[must_use]
    pub const fn new(price: i64, rent: i64, group: ColorGroup) -> Self {
        Self { price, rent, group }
    }

    /// Liquidation value: half the purchase price.
    #[must_use]
    pub const fn mortgage_value(&self) -> i64 {
        self.price / 2
    }
}

/// What a tile does when a player lands on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Street in a color group; can carry houses or a hotel.
    Property(Deed),
    /// Railway station; flat rent.
    Station(Deed),
    /// Utility company; flat rent.
    Utility(Deed),
    /// Flat tax paid into the free-parking pool.
    Tax { amount: i64 },
    /// Start tile. `bonus` is paid when passing, twice that when landing.
    Start { bonus: i64 },
    /// Jail (also "just visiting").
    VisitJail,
    /// Pays out the free-parking pool.
    FreeParking,
    /// Sends the player to jail.
    GoToJail,
    /// Card tile, no effect.
    Chance,
    /// Card tile, no effect.
    CommunityChest,
}

/// A single board tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Location on the ring.
    pub position: Position,
    /// Display name.
    pub name: String,
    /// Landing behavior.
    pub kind: TileKind,
}

impl Tile {
    /// Create a new tile.
    pub fn new(position: Position, name: impl Into<String>, kind: TileKind) -> Self {
        Self {
            position,
            name: name.into(),
            kind,
        }
    }

    /// The title deed, if this tile can be bought.
    #[must_use]
    pub fn deed(&self) -> Option<&Deed> {
        match &self.kind {
            TileKind::Property(deed) | TileKind::Station(deed) | TileKind::Utility(deed) => Some(deed),
            _ => None,
        }
    }

    /// Whether this tile can be owned.
    #[must_use]
    pub fn is_ownable(&self) -> bool {
        self.deed().is_some()
    }

    /// Whether this tile is a street that can carry houses.
    #[must_use]
    pub fn is_property(&self) -> bool {
        matches!(self.kind, TileKind::Property(_))
    }

    /// Color group of an ownable tile.
    #[must_use]
    pub fn group(&self) -> Option<ColorGroup> {
        self.deed().map(|d| d.group)
    }
}
