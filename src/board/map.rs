//! The fixed 40-tile board.
//!
//! ## Layout
//!
//! Tiles are stored in an arena indexed by [`Position`], so a tile is
//! referenced everywhere else by its position alone. Name lookup and color
//! group membership are precomputed at construction.
//!
//! ```
//! use rust_monopoly::board::{BoardMap, Position, TileKind};
//!
//! let board = BoardMap::standard();
//! assert_eq!(board.tile_at(Position::new(0)).name, "Start");
//!
//! let (dest, passed_start) = board.resolve_move(Position::new(39), 4);
//! assert_eq!(dest, Position::new(3));
//! assert!(passed_start);
//! ```

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::position::{Position, BOARD_SIZE};
use super::tile::{ColorGroup, Deed, Tile, TileKind};

/// Bonus paid for passing Start on the standard board.
const START_BONUS: i64 = 200;

const START_NAME: &str = "Start";
const JAIL_NAME: &str = "Visit Jail";

/// Static registry of every tile on the board.
#[derive(Clone, Debug, Serialize)]
pub struct BoardMap {
    tiles: Vec<Tile>,
    #[serde(skip)]
    by_name: FxHashMap<String, Position>,
    #[serde(skip)]
    groups: FxHashMap<ColorGroup, Vec<Position>>,
}

impl BoardMap {
    /// Build the standard London board.
    #[must_use]
    pub fn standard() -> Self {
        use ColorGroup::*;

        let street = |price, rent, group| TileKind::Property(Deed::new(price, rent, group));
        let station = || TileKind::Station(Deed::new(200, 25, Station));
        let utility = || TileKind::Utility(Deed::new(150, 1, Utility));

        let layout: [(&str, TileKind); BOARD_SIZE as usize] = [
            (START_NAME, TileKind::Start { bonus: START_BONUS }),
            ("Old Kent Road", street(60, 2, Brown)),
            ("Community Chest", TileKind::CommunityChest),
            ("Whitechapel Road", street(80, 4, Brown)),
            ("Income Tax", TileKind::Tax { amount: 200 }),
            ("King's Cross Station", station()),
            ("The Angel Islington", street(100, 6, LightBlue)),
            ("Chance", TileKind::Chance),
            ("Euston Road", street(100, 6, LightBlue)),
            ("Pentonville Road", street(120, 8, LightBlue)),
            (JAIL_NAME, TileKind::VisitJail),
            ("Pall Mall", street(140, 10, Pink)),
            ("Electric Company", utility()),
            ("Whitehall", street(140, 10, Pink)),
            ("Northumberland Avenue", street(160, 12, Pink)),
            ("Marylebone Station", station()),
            ("Bow Street", street(180, 14, Orange)),
            ("Community Chest", TileKind::CommunityChest),
            ("Marlborough Street", street(180, 14, Orange)),
            ("Vine Street", street(200, 16, Orange)),
            ("Free Parking", TileKind::FreeParking),
            ("Strand", street(220, 18, Red)),
            ("Chance", TileKind::Chance),
            ("Fleet Street", street(220, 18, Red)),
            ("Trafalgar Square", street(240, 20, Red)),
            ("Fenchurch Street Station", station()),
            ("Leicester Square", street(260, 22, Yellow)),
            ("Coventry Street", street(260, 22, Yellow)),
            ("Water Works", utility()),
            ("Piccadilly", street(280, 24, Yellow)),
            ("Go to Jail", TileKind::GoToJail),
            ("Regent Street", street(300, 26, Green)),
            ("Oxford Street", street(300, 26, Green)),
            ("Community Chest", TileKind::CommunityChest),
            ("Bond Street", street(320, 28, Green)),
            ("Liverpool Street Station", station()),
            ("Chance", TileKind::Chance),
            ("Park Lane", street(350, 35, DarkBlue)),
            ("Super Tax", TileKind::Tax { amount: 100 }),
            ("Mayfair", street(400, 50, DarkBlue)),
        ];

        let tiles = layout
            .into_iter()
            .enumerate()
            .map(|(i, (name, kind))| Tile::new(Position::new(i as u8), name, kind))
            .collect();

        Self::from_tiles(tiles)
    }

    fn from_tiles(tiles: Vec<Tile>) -> Self {
        let mut by_name = FxHashMap::default();
        let mut groups: FxHashMap<ColorGroup, Vec<Position>> = FxHashMap::default();

        for tile in &tiles {
            // First tile wins for repeated names (Chance, Community Chest)
            by_name.entry(tile.name.clone()).or_insert(tile.position);

            if let Some(group) = tile.group() {
                groups.entry(group).or_default().push(tile.position);
            }
        }

        Self {
            tiles,
            by_name,
            groups,
        }
    }

    /// Get the tile at a position.
    #[must_use]
    pub fn tile_at(&self, position: Position) -> &Tile {
        &self.tiles[position.index()]
    }

    /// Look up a tile by name.
    ///
    /// Names shared by several tiles resolve to the first one on the board.
    #[must_use]
    pub fn tile_named(&self, name: &str) -> Option<&Tile> {
        self.by_name.get(name).map(|&pos| self.tile_at(pos))
    }

    /// Title deed at a position, if the tile is ownable.
    #[must_use]
    pub fn deed_at(&self, position: Position) -> Option<&Deed> {
        self.tile_at(position).deed()
    }

    /// Resolve a move of `pips` tiles from `current`.
    ///
    /// Returns the destination and whether Start was passed or landed on.
    #[must_use]
    pub fn resolve_move(&self, current: Position, pips: u8) -> (Position, bool) {
        current.advance(pips)
    }

    /// Positions of every tile in a color group, in board order.
    #[must_use]
    pub fn group_members(&self, group: ColorGroup) -> &[Position] {
        self.groups.get(&group).map_or(&[], Vec::as_slice)
    }

    /// Number of tiles in a color group.
    #[must_use]
    pub fn group_size(&self, group: ColorGroup) -> usize {
        self.group_members(group).len()
    }

    /// Bonus for passing Start, read from the tile named "Start".
    #[must_use]
    pub fn start_bonus(&self) -> i64 {
        match self.tile_named(START_NAME).map(|tile| &tile.kind) {
            Some(&TileKind::Start { bonus }) => bonus,
            _ => 0,
        }
    }

    /// Position of the tile named "Visit Jail", where Go to Jail sends
    /// players.
    #[must_use]
    pub fn jail_position(&self) -> Position {
        self.tile_named(JAIL_NAME)
            .map_or(Position::START, |tile| tile.position)
    }

    /// Iterate over all tiles in board order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Iterate over all ownable tiles.
    pub fn ownable_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| t.is_ownable())
    }
}

impl Default for BoardMap {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_has_forty_tiles() {
        let board = BoardMap::standard();
        assert_eq!(board.tiles().count(), 40);

        for (i, tile) in board.tiles().enumerate() {
            assert_eq!(tile.position.index(), i);
        }
    }

    #[test]
    fn test_corners() {
        let board = BoardMap::standard();
        assert_eq!(board.tile_at(Position::new(0)).kind, TileKind::Start { bonus: 200 });
        assert_eq!(board.tile_at(Position::new(10)).kind, TileKind::VisitJail);
        assert_eq!(board.tile_at(Position::new(20)).kind, TileKind::FreeParking);
        assert_eq!(board.tile_at(Position::new(30)).kind, TileKind::GoToJail);

        assert_eq!(board.jail_position(), Position::new(10));
        assert_eq!(board.start_bonus(), 200);
    }

    #[test]
    fn test_start_and_jail_follow_tile_names() {
        let mut tiles: Vec<Tile> = BoardMap::standard().tiles().cloned().collect();
        tiles[0].kind = TileKind::Start { bonus: 150 };
        tiles[10].name = "Old Jail".to_string();
        tiles[11].name = JAIL_NAME.to_string();

        let board = BoardMap::from_tiles(tiles);
        assert_eq!(board.start_bonus(), 150);
        assert_eq!(board.jail_position(), Position::new(11));
    }

    #[test]
    fn test_tile_named() {
        let board = BoardMap::standard();

        let mayfair = board.tile_named("Mayfair").unwrap();
        assert_eq!(mayfair.position, Position::new(39));
        assert_eq!(mayfair.deed().unwrap().price, 400);

        let jail = board.tile_named("Visit Jail").unwrap();
        assert_eq!(jail.position, board.jail_position());

        // Repeated names resolve to the first occurrence
        assert_eq!(board.tile_named("Chance").unwrap().position, Position::new(7));
        assert_eq!(board.tile_named("Community Chest").unwrap().position, Position::new(2));

        assert!(board.tile_named("Boardwalk").is_none());
    }

    #[test]
    fn test_taxes() {
        let board = BoardMap::standard();
        assert_eq!(board.tile_at(Position::new(4)).kind, TileKind::Tax { amount: 200 });
        assert_eq!(board.tile_at(Position::new(38)).kind, TileKind::Tax { amount: 100 });
    }

    #[test]
    fn test_group_sizes() {
        let board = BoardMap::standard();
        assert_eq!(board.group_size(ColorGroup::Brown), 2);
        assert_eq!(board.group_size(ColorGroup::LightBlue), 3);
        assert_eq!(board.group_size(ColorGroup::Pink), 3);
        assert_eq!(board.group_size(ColorGroup::Orange), 3);
        assert_eq!(board.group_size(ColorGroup::Red), 3);
        assert_eq!(board.group_size(ColorGroup::Yellow), 3);
        assert_eq!(board.group_size(ColorGroup::Green), 3);
        assert_eq!(board.group_size(ColorGroup::DarkBlue), 2);
        assert_eq!(board.group_size(ColorGroup::Station), 4);
        assert_eq!(board.group_size(ColorGroup::Utility), 2);

        let total: usize = ColorGroup::ALL.iter().map(|&g| board.group_size(g)).sum();
        assert_eq!(total, board.ownable_tiles().count());
        assert_eq!(total, 28);
    }

    #[test]
    fn test_group_members_in_board_order() {
        let board = BoardMap::standard();
        assert_eq!(
            board.group_members(ColorGroup::DarkBlue),
            &[Position::new(37), Position::new(39)]
        );
        assert_eq!(
            board.group_members(ColorGroup::Station),
            &[Position::new(5), Position::new(15), Position::new(25), Position::new(35)]
        );
    }

    #[test]
    fn test_unique_ownable_names() {
        let board = BoardMap::standard();
        let mut names: Vec<_> = board.ownable_tiles().map(|t| t.name.as_str()).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_resolve_move() {
        let board = BoardMap::standard();
        assert_eq!(board.resolve_move(Position::new(0), 7), (Position::new(7), false));
        assert_eq!(board.resolve_move(Position::new(35), 5), (Position::START, true));
        assert_eq!(board.resolve_move(Position::new(39), 4), (Position::new(3), true));
    }
}
