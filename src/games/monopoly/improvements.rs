//! Houses and hotels.
//!
//! A player may improve a street only while it is their turn to roll and
//! only once they own its whole color group. Up to four houses go on a
//! street; four houses can then be traded for a hotel at the price of one
//! more house. Every build request is all or nothing.

use std::collections::BTreeMap;

use tracing::info;

use super::game::MonopolyGame;
use crate::board::{Position, TileKind};
use crate::core::{ActionKind, GameError, GameState, IneligibleReason, PlayerId, TurnPhase};
use crate::rules::{ImprovementChange, MoneyReason, TurnOutcome};

fn ineligible(position: Position, reason: IneligibleReason) -> GameError {
    GameError::ImprovementIneligible { position, reason }
}

impl MonopolyGame {
    /// Streets where `player` could add at least one house right now.
    #[must_use]
    pub fn house_candidates(&self, state: &GameState, player: PlayerId) -> Vec<Position> {
        state
            .possessions(player)
            .filter(|&pos| self.house_price(state, player, pos).is_ok())
            .filter(|&pos| {
                !state.ledger.has_hotel(pos) && state.ledger.houses(pos) < self.config.max_houses
            })
            .collect()
    }

    /// Streets where `player` could build a hotel right now.
    #[must_use]
    pub fn hotel_candidates(&self, state: &GameState, player: PlayerId) -> Vec<Position> {
        state
            .possessions(player)
            .filter(|&pos| self.house_price(state, player, pos).is_ok())
            .filter(|&pos| {
                !state.ledger.has_hotel(pos) && state.ledger.houses(pos) == self.config.max_houses
            })
            .collect()
    }

    /// House price for a street `player` may improve.
    fn house_price(&self, state: &GameState, player: PlayerId, position: Position) -> Result<i64, GameError> {
        let TileKind::Property(deed) = self.board.tile_at(position).kind else {
            return Err(ineligible(position, IneligibleReason::NotBuildable));
        };
        let Some(price) = deed.group.house_price() else {
            return Err(ineligible(position, IneligibleReason::NotBuildable));
        };
        if !state.ledger.is_owned_by(position, player) {
            return Err(ineligible(position, IneligibleReason::NotOwned));
        }
        if !state.ledger.owns_group(&self.board, deed.group, player) {
            return Err(ineligible(position, IneligibleReason::IncompleteGroup));
        }
        Ok(price)
    }

    pub(super) fn add_houses(&self, state: &mut GameState, builds: &[(Position, u8)]) -> Result<TurnOutcome, GameError> {
        let player = self.expect_phase(state, ActionKind::BuildHouses, |p| {
            matches!(p, TurnPhase::AwaitingRoll { .. })
        })?;

        let mut totals: BTreeMap<Position, u32> = BTreeMap::new();
        for &(position, count) in builds {
            *totals.entry(position).or_default() += u32::from(count);
        }
        totals.retain(|_, count| *count > 0);

        let mut cost = 0;
        for (&position, &count) in &totals {
            let price = self.house_price(state, player, position)?;
            if state.ledger.has_hotel(position) {
                return Err(ineligible(position, IneligibleReason::HotelBuilt));
            }
            if u32::from(state.ledger.houses(position)) + count > u32::from(self.config.max_houses) {
                return Err(ineligible(position, IneligibleReason::HouseLimit));
            }
            cost += price * i64::from(count);
        }

        let available = state.players[player].balance;
        if cost > available {
            return Err(GameError::InsufficientFunds {
                needed: cost,
                available,
            });
        }

        let mut outcome = TurnOutcome::new(player);
        for (position, count) in totals {
            // Bounded by max_houses above.
            let count = count as u8;
            state.ledger.add_houses(position, count);
            outcome.improvements.push(ImprovementChange {
                position,
                houses: state.ledger.houses(position),
                hotel: false,
            });
        }
        if cost > 0 {
            state.players[player].pay(cost);
            outcome.money(player, -cost, MoneyReason::Improvement);
            info!(player = %state.players[player].name, cost, tiles = outcome.improvements.len(), "built houses");
        }
        Ok(outcome)
    }

    pub(super) fn add_hotels(&self, state: &mut GameState, positions: &[Position]) -> Result<TurnOutcome, GameError> {
        let player = self.expect_phase(state, ActionKind::BuildHotels, |p| {
            matches!(p, TurnPhase::AwaitingRoll { .. })
        })?;

        let mut selected = positions.to_vec();
        selected.sort_unstable();
        selected.dedup();

        let mut cost = 0;
        for &position in &selected {
            let price = self.house_price(state, player, position)?;
            if state.ledger.has_hotel(position) {
                return Err(ineligible(position, IneligibleReason::HotelBuilt));
            }
            if state.ledger.houses(position) != self.config.max_houses {
                return Err(ineligible(position, IneligibleReason::HousesIncomplete));
            }
            cost += price;
        }

        let available = state.players[player].balance;
        if cost > available {
            return Err(GameError::InsufficientFunds {
                needed: cost,
                available,
            });
        }

        let mut outcome = TurnOutcome::new(player);
        for position in selected {
            state.ledger.build_hotel(position);
            outcome.improvements.push(ImprovementChange {
                position,
                houses: 0,
                hotel: true,
            });
        }
        if cost > 0 {
            state.players[player].pay(cost);
            outcome.money(player, -cost, MoneyReason::Improvement);
            info!(player = %state.players[player].name, cost, tiles = outcome.improvements.len(), "built hotels");
        }
        Ok(outcome)
    }
}
