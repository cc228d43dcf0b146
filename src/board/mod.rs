//! Board map: positions, tiles, and the fixed 40-tile layout.
//!
//! The board is static after construction. Mutable tile state (owner,
//! houses, hotel) is tracked separately by the ownership ledger so the
//! board can be shared freely.

pub mod position;
pub mod tile;
pub mod map;

pub use position::{Position, BOARD_SIZE};
pub use tile::{ColorGroup, Deed, Tile, TileKind};
pub use map::BoardMap;
