//! The roll, move and landing half of the turn state machine.
//!
//! ## Turn flow
//!
//! 1. `AwaitingRoll`: roll (or take an explicit roll).
//! 2. A jailed player only serves time: doubles release, anything else
//!    shortens the sentence. The turn then passes.
//! 3. Otherwise doubles grow the streak; the third in a row is jail.
//! 4. Move, collect the Start bonus, resolve the landing tile.
//! 5. Nothing pending: doubles roll again, anything else passes the turn.

use tracing::{debug, info};

use super::game::MonopolyGame;
use crate::board::{Deed, Position, TileKind};
use crate::core::{ActionKind, Creditor, DiceRoll, GameError, GameState, PlayerId, TurnPhase};
use crate::rules::{JailEvent, MoneyReason, Movement, PendingDecision, TurnOutcome};

impl MonopolyGame {
    pub(super) fn roll(&self, state: &mut GameState, dice: Option<(u8, u8)>) -> Result<TurnOutcome, GameError> {
        let player = self.expect_phase(state, ActionKind::Roll, |p| {
            matches!(p, TurnPhase::AwaitingRoll { .. })
        })?;
        let roll = match dice {
            Some((die1, die2)) => DiceRoll::explicit(die1, die2)?,
            None => state.rng.roll_dice(),
        };

        let mut outcome = TurnOutcome::new(player);
        outcome.dice = Some(roll);
        debug!(player = %state.players[player].name, %roll, "rolled");

        if state.players[player].in_jail() {
            self.serve_jail_turn(state, player, roll, &mut outcome);
            self.complete_turn(state, &mut outcome);
            return Ok(outcome);
        }

        if roll.is_doubles() {
            state.turn.doubles_streak += 1;
            if state.turn.doubles_streak >= self.config.doubles_to_jail {
                info!(player = %state.players[player].name, streak = state.turn.doubles_streak, "too many doubles");
                self.send_to_jail(state, player, &mut outcome);
                self.complete_turn(state, &mut outcome);
                return Ok(outcome);
            }
        }
        state.turn.rolled_doubles = roll.is_doubles();

        let from = state.players[player].position;
        let (to, passed_start) = self.board.resolve_move(from, roll.sum());
        state.players[player].position = to;
        outcome.movement = Some(Movement {
            from,
            to,
            passed_start,
        });

        let destination = &self.board.tile_at(to).kind;
        let bonus_withheld = matches!(destination, TileKind::Start { .. } | TileKind::GoToJail);
        if passed_start && !bonus_withheld {
            let bonus = self.board.start_bonus();
            state.players[player].receive(bonus);
            outcome.money(player, bonus, MoneyReason::PassedStart);
        }

        self.land(state, player, to, &mut outcome);
        self.finish_resolution(state, &mut outcome);
        Ok(outcome)
    }

    pub(super) fn purchase(&self, state: &mut GameState, accept: bool) -> Result<TurnOutcome, GameError> {
        let TurnPhase::Resolving { player, position } = state.turn.phase else {
            return Err(GameError::IllegalActionForState {
                action: ActionKind::DecidePurchase,
                phase: state.turn.phase.kind(),
            });
        };

        let mut outcome = TurnOutcome::new(player);
        if accept {
            let price = self.board.deed_at(position).map_or(0, |deed| deed.price);
            let available = state.players[player].balance;
            if available < price {
                return Err(GameError::InsufficientFunds {
                    needed: price,
                    available,
                });
            }

            state.players[player].pay(price);
            state.grant_tile(position, player);
            outcome.money(player, -price, MoneyReason::Purchase);
            outcome.transfer(position, None, Some(player));
            info!(
                player = %state.players[player].name,
                tile = %self.board.tile_at(position).name,
                price,
                "bought"
            );
        }

        state.turn.phase = TurnPhase::AwaitingRoll { player };
        self.finish_resolution(state, &mut outcome);
        Ok(outcome)
    }

    fn serve_jail_turn(&self, state: &mut GameState, player: PlayerId, roll: DiceRoll, outcome: &mut TurnOutcome) {
        let account = &mut state.players[player];
        if roll.is_doubles() {
            account.jail_turns = 0;
        } else {
            account.jail_turns -= 1;
        }

        outcome.jail = Some(if account.jail_turns == 0 {
            JailEvent::Released
        } else {
            JailEvent::Served {
                turns_left: account.jail_turns,
            }
        });
        debug!(player = %account.name, turns_left = account.jail_turns, "jail turn");
    }

    /// Apply the effect of the tile the player landed on.
    fn land(&self, state: &mut GameState, player: PlayerId, position: Position, outcome: &mut TurnOutcome) {
        match self.board.tile_at(position).kind {
            TileKind::Property(deed) | TileKind::Station(deed) | TileKind::Utility(deed) => {
                self.land_on_deed(state, player, position, deed, outcome);
            }
            TileKind::Tax { amount } => {
                self.collect_debt(state, player, position, amount, Creditor::Tax, outcome);
            }
            TileKind::Start { bonus } => {
                let amount = bonus * 2;
                state.players[player].receive(amount);
                outcome.money(player, amount, MoneyReason::LandedOnStart);
            }
            TileKind::GoToJail => self.send_to_jail(state, player, outcome),
            TileKind::FreeParking => {
                let pool = std::mem::take(&mut state.free_parking);
                if pool > 0 {
                    state.players[player].receive(pool);
                    outcome.money(player, pool, MoneyReason::FreeParking);
                }
            }
            TileKind::VisitJail | TileKind::Chance | TileKind::CommunityChest => {}
        }
    }

    fn land_on_deed(
        &self,
        state: &mut GameState,
        player: PlayerId,
        position: Position,
        deed: Deed,
        outcome: &mut TurnOutcome,
    ) {
        match state.ledger.owner(position) {
            None if state.players[player].balance < deed.price => {
                outcome.unaffordable = Some(position);
            }
            None => {
                state.turn.phase = TurnPhase::Resolving { player, position };
                outcome.pending = Some(PendingDecision::Purchase {
                    position,
                    price: deed.price,
                });
            }
            Some(owner) if owner == player => {}
            Some(owner) => {
                let rent = self.rent_at(state, position).unwrap_or(deed.rent);
                self.collect_debt(state, player, position, rent, Creditor::Owner(owner), outcome);
            }
        }
    }

    pub(super) fn send_to_jail(&self, state: &mut GameState, player: PlayerId, outcome: &mut TurnOutcome) {
        let account = &mut state.players[player];
        account.position = self.board.jail_position();
        account.jail_turns = self.config.jail_turns;
        state.turn.rolled_doubles = false;
        outcome.jail = Some(JailEvent::Jailed);
        info!(player = %account.name, "sent to jail");
    }

    /// Decide what follows a fully resolved roll.
    ///
    /// Does nothing while a decision is pending or once the turn has already
    /// moved on (elimination).
    pub(super) fn finish_resolution(&self, state: &mut GameState, outcome: &mut TurnOutcome) {
        if outcome.eliminated.is_some() {
            return;
        }
        let TurnPhase::AwaitingRoll { player } = state.turn.phase else {
            return;
        };

        if state.turn.rolled_doubles && !state.players[player].in_jail() {
            state.turn.rolled_doubles = false;
            outcome.extra_roll = true;
            outcome.next_player = Some(player);
        } else {
            self.complete_turn(state, outcome);
        }
    }

    /// Pass the turn to the next player in the rotation.
    pub(super) fn complete_turn(&self, state: &mut GameState, outcome: &mut TurnOutcome) {
        let next = state.turn.advance();
        state.turn.phase = TurnPhase::AwaitingRoll { player: next };
        outcome.turn_complete = true;
        outcome.next_player = Some(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PhaseKind;
    use crate::games::monopoly::{MonopolyBuilder, TurnOrder};

    fn game() -> (MonopolyGame, GameState) {
        MonopolyBuilder::new()
            .turn_order(TurnOrder::AsGiven)
            .build(&["Ada", "Bob"], 42)
            .unwrap()
    }

    const ADA: PlayerId = PlayerId(0);
    const BOB: PlayerId = PlayerId(1);

    #[test]
    fn test_affordable_tile_offers_purchase() {
        let (game, mut state) = game();
        let outcome = game.roll_and_advance(&mut state, Some((1, 2))).unwrap();

        assert_eq!(
            outcome.pending,
            Some(PendingDecision::Purchase {
                position: Position::new(3),
                price: 80
            })
        );
        assert!(!outcome.turn_complete);
        assert_eq!(state.phase(), TurnPhase::Resolving { player: ADA, position: Position::new(3) });
    }

    #[test]
    fn test_unaffordable_tile_is_noted() {
        let (game, mut state) = game();
        state.players[ADA].balance = 50;

        let outcome = game.roll_and_advance(&mut state, Some((1, 2))).unwrap();
        assert_eq!(outcome.unaffordable, Some(Position::new(3)));
        assert!(outcome.pending.is_none());
        assert!(outcome.turn_complete);
        assert_eq!(state.current_player(), Some(BOB));
    }

    #[test]
    fn test_decline_purchase_leaves_tile_unowned() {
        let (game, mut state) = game();
        game.roll_and_advance(&mut state, Some((1, 2))).unwrap();
        let outcome = game.decide_purchase(&mut state, false).unwrap();

        assert!(outcome.money.is_empty());
        assert_eq!(state.ledger.owner(Position::new(3)), None);
        assert_eq!(state.balance(ADA), 1500);
        assert_eq!(outcome.next_player, Some(BOB));
    }

    #[test]
    fn test_purchase_with_insufficient_funds_changes_nothing() {
        let (game, mut state) = game();
        game.roll_and_advance(&mut state, Some((1, 2))).unwrap();
        state.players[ADA].balance = 10;

        let err = game.decide_purchase(&mut state, true).unwrap_err();
        assert_eq!(err, GameError::InsufficientFunds { needed: 80, available: 10 });
        assert_eq!(state.phase().kind(), PhaseKind::Resolving);
        assert_eq!(state.ledger.owner(Position::new(3)), None);
    }

    #[test]
    fn test_doubles_after_purchase_rolls_again() {
        let (game, mut state) = game();
        // 3+3 lands on The Angel Islington.
        let outcome = game.roll_and_advance(&mut state, Some((3, 3))).unwrap();
        assert!(outcome.purchase_pending());

        let outcome = game.decide_purchase(&mut state, true).unwrap();
        assert!(outcome.extra_roll);
        assert!(!outcome.turn_complete);
        assert_eq!(state.phase(), TurnPhase::AwaitingRoll { player: ADA });
        assert_eq!(state.turn.doubles_streak, 1);
    }

    #[test]
    fn test_jail_served_without_doubles() {
        let (game, mut state) = game();
        state.players[ADA].jail_turns = 3;
        state.players[ADA].position = Position::new(10);

        let outcome = game.roll_and_advance(&mut state, Some((1, 2))).unwrap();
        assert_eq!(outcome.jail, Some(JailEvent::Served { turns_left: 2 }));
        assert!(outcome.movement.is_none());
        assert_eq!(state.players[ADA].position, Position::new(10));
        assert_eq!(state.current_player(), Some(BOB));
    }

    #[test]
    fn test_last_jail_turn_releases() {
        let (game, mut state) = game();
        state.players[ADA].jail_turns = 1;

        let outcome = game.roll_and_advance(&mut state, Some((5, 6))).unwrap();
        assert_eq!(outcome.jail, Some(JailEvent::Released));
        assert!(!state.players[ADA].in_jail());
        assert!(outcome.turn_complete);
    }

    #[test]
    fn test_free_parking_pays_out_pool() {
        let (game, mut state) = game();
        state.free_parking = 300;
        state.players[ADA].position = Position::new(16);

        let outcome = game.roll_and_advance(&mut state, Some((1, 3))).unwrap();
        assert_eq!(outcome.net_change(ADA), 300);
        assert_eq!(state.balance(ADA), 1800);
        assert_eq!(state.free_parking(), 0);
    }

    #[test]
    fn test_landing_on_start_pays_double_bonus() {
        let (game, mut state) = game();
        state.players[ADA].position = Position::new(34);

        let outcome = game.roll_and_advance(&mut state, Some((2, 4))).unwrap();
        assert_eq!(outcome.movement.map(|m| m.to), Some(Position::new(0)));
        assert!(outcome.movement.is_some_and(|m| m.passed_start));
        assert_eq!(outcome.net_change(ADA), 400);
        assert_eq!(state.balance(ADA), 1900);
    }
}
