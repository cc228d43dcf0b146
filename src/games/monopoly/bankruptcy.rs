//! Debts a player cannot pay from cash.
//!
//! A debt larger than the debtor's balance is either covered by mortgaging
//! owned tiles (the player picks which) or, when even mortgaging everything
//! would not raise enough, ends the player's game.
//!
//! Mortgaging returns a tile to the bank for half its price; there is no
//! buying back.

use tracing::info;

use super::game::MonopolyGame;
use crate::board::{Deed, Position};
use crate::core::{ActionKind, Creditor, GameError, GameState, PlayerId, TurnPhase};
use crate::rules::{MoneyReason, PendingDecision, TurnOutcome};

impl MonopolyGame {
    /// Total mortgage value of everything `player` owns.
    #[must_use]
    pub fn liquidation_value(&self, state: &GameState, player: PlayerId) -> i64 {
        state
            .possessions(player)
            .filter_map(|pos| self.board.deed_at(pos))
            .map(Deed::mortgage_value)
            .sum()
    }

    /// Whether mortgaging could raise `amount_due`.
    #[must_use]
    pub fn can_cover_debt(&self, state: &GameState, player: PlayerId, amount_due: i64) -> bool {
        self.liquidation_value(state, player) >= amount_due
    }

    /// Charge `amount` to `debtor`: straight from cash when possible,
    /// otherwise through liquidation or elimination.
    pub(super) fn collect_debt(
        &self,
        state: &mut GameState,
        debtor: PlayerId,
        position: Position,
        amount: i64,
        creditor: Creditor,
        outcome: &mut TurnOutcome,
    ) {
        if state.players[debtor].balance >= amount {
            self.settle_debt(state, debtor, amount, creditor, true, outcome);
        } else if self.can_cover_debt(state, debtor, amount) {
            state.turn.phase = TurnPhase::AwaitingLiquidationDecision {
                player: debtor,
                position,
                amount_due: amount,
                creditor,
            };
            outcome.pending = Some(PendingDecision::Liquidation {
                position,
                amount_due: amount,
                creditor,
                candidates: state.possessions(debtor).collect(),
            });
            info!(
                player = %state.players[debtor].name,
                amount,
                balance = state.players[debtor].balance,
                "must liquidate"
            );
        } else {
            self.eliminate(state, debtor, outcome);
        }
    }

    /// Move `amount` from the debtor to the creditor.
    ///
    /// Tax paid from cash feeds the free-parking pool; tax paid out of
    /// mortgage proceeds goes to the bank.
    fn settle_debt(
        &self,
        state: &mut GameState,
        debtor: PlayerId,
        amount: i64,
        creditor: Creditor,
        into_pool: bool,
        outcome: &mut TurnOutcome,
    ) {
        state.players[debtor].pay(amount);
        match creditor {
            Creditor::Owner(owner) => {
                state.players[owner].receive(amount);
                outcome.money(debtor, -amount, MoneyReason::Rent);
                outcome.money(owner, amount, MoneyReason::Rent);
            }
            Creditor::Tax => {
                if into_pool {
                    state.free_parking += amount;
                }
                outcome.money(debtor, -amount, MoneyReason::Tax);
            }
        }
    }

    /// Mortgage the chosen tiles and pay the pending debt.
    pub(super) fn liquidate(&self, state: &mut GameState, positions: &[Position]) -> Result<TurnOutcome, GameError> {
        let TurnPhase::AwaitingLiquidationDecision {
            player,
            amount_due,
            creditor,
            ..
        } = state.turn.phase
        else {
            return Err(GameError::IllegalActionForState {
                action: ActionKind::DecideLiquidation,
                phase: state.turn.phase.kind(),
            });
        };

        let mut selected = positions.to_vec();
        selected.sort_unstable();
        selected.dedup();

        if let Some(&position) = selected.iter().find(|&&pos| !state.ledger.is_owned_by(pos, player)) {
            return Err(GameError::NotOwned { position });
        }

        let offered: i64 = selected
            .iter()
            .filter_map(|&pos| self.board.deed_at(pos))
            .map(Deed::mortgage_value)
            .sum();
        if offered < amount_due {
            return Err(GameError::InsufficientLiquidation {
                offered,
                due: amount_due,
            });
        }

        let mut outcome = TurnOutcome::new(player);
        for position in selected {
            let value = self.board.deed_at(position).map_or(0, Deed::mortgage_value);
            state.revoke_tile(position);
            state.players[player].receive(value);
            outcome.money(player, value, MoneyReason::Mortgage);
            outcome.transfer(position, Some(player), None);
        }
        info!(player = %state.players[player].name, offered, amount_due, "liquidated");

        self.settle_debt(state, player, amount_due, creditor, false, &mut outcome);
        state.turn.phase = TurnPhase::AwaitingRoll { player };
        self.finish_resolution(state, &mut outcome);
        Ok(outcome)
    }

    /// Remove a bankrupt player from the game.
    ///
    /// Their tiles return to the bank and the next player in the rotation
    /// takes the turn. With one player left the game is over.
    pub(super) fn eliminate(&self, state: &mut GameState, player: PlayerId, outcome: &mut TurnOutcome) {
        let owned: Vec<Position> = state.possessions(player).collect();
        for position in owned {
            state.revoke_tile(position);
            outcome.transfer(position, Some(player), None);
        }

        let account = &mut state.players[player];
        account.in_game = false;
        account.jail_turns = 0;
        info!(player = %account.name, balance = account.balance, "eliminated");

        state.turn.remove(player);
        outcome.eliminated = Some(player);

        if let &[winner] = state.turn.active.as_slice() {
            state.turn.phase = TurnPhase::GameOver { winner };
            outcome.winner = Some(winner);
            info!(winner = %state.players[winner].name, turns = state.turn.turn_number, "game over");
        } else {
            let next = state.turn.hand_over();
            state.turn.phase = TurnPhase::AwaitingRoll { player: next };
            outcome.turn_complete = true;
            outcome.next_player = Some(next);
        }
    }
}
