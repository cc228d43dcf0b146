//! Game state.
//!
//! ## TurnPhase
//!
//! Where the turn state machine is waiting:
//! - `AwaitingRoll`: the current player must roll
//! - `Resolving`: a purchase offer is pending
//! - `AwaitingLiquidationDecision`: a debt must be covered by mortgaging
//! - `GameOver`: terminal
//!
//! ## GameState
//!
//! Everything that changes during a game:
//! - Player accounts
//! - Ownership ledger
//! - Turn rotation, doubles streak, current phase
//! - Free-parking pool
//! - RNG and action history

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::player::{PlayerAccount, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{BoardMap, Position};
use crate::ledger::OwnershipLedger;

/// Who receives a debt payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Creditor {
    /// Rent owed to the tile's owner.
    Owner(PlayerId),
    /// Tax owed to the bank.
    Tax,
}

/// Where the turn state machine is waiting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The player must roll the dice.
    AwaitingRoll { player: PlayerId },

    /// The player landed on an unowned tile they can afford.
    Resolving { player: PlayerId, position: Position },

    /// The player owes more than their balance and can mortgage enough
    /// tiles to pay.
    AwaitingLiquidationDecision {
        player: PlayerId,
        position: Position,
        amount_due: i64,
        creditor: Creditor,
    },

    /// One player remains.
    GameOver { winner: PlayerId },
}

impl TurnPhase {
    /// The phase without its data.
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            TurnPhase::AwaitingRoll { .. } => PhaseKind::AwaitingRoll,
            TurnPhase::Resolving { .. } => PhaseKind::Resolving,
            TurnPhase::AwaitingLiquidationDecision { .. } => PhaseKind::AwaitingLiquidationDecision,
            TurnPhase::GameOver { .. } => PhaseKind::GameOver,
        }
    }

    /// The player the phase is waiting on (the winner once the game is over).
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match *self {
            TurnPhase::AwaitingRoll { player }
            | TurnPhase::Resolving { player, .. }
            | TurnPhase::AwaitingLiquidationDecision { player, .. } => player,
            TurnPhase::GameOver { winner } => winner,
        }
    }
}

/// Phase type without data, used in errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    AwaitingRoll,
    Resolving,
    AwaitingLiquidationDecision,
    GameOver,
}

/// Turn rotation and per-turn bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Players still in the game, in turn order.
    pub active: Vec<PlayerId>,
    /// Slot in `active` of the player whose turn it is.
    pub current: usize,
    /// Consecutive doubles rolled by the current player this turn.
    pub doubles_streak: u8,
    /// Whether the roll being resolved was doubles.
    pub rolled_doubles: bool,
    /// Where the state machine is waiting.
    pub phase: TurnPhase,
    /// Turn counter (starts at 1, +1 whenever the turn passes).
    pub turn_number: u32,
    /// Action sequence within the turn.
    pub action_sequence: u32,
}

impl TurnState {
    /// Start a rotation with the first player in `active` to roll.
    #[must_use]
    pub fn new(active: Vec<PlayerId>) -> Self {
        assert!(!active.is_empty(), "Must have at least 1 player");

        let first = active[0];
        let phase = if active.len() == 1 {
            TurnPhase::GameOver { winner: first }
        } else {
            TurnPhase::AwaitingRoll { player: first }
        };

        Self {
            active,
            current: 0,
            doubles_streak: 0,
            rolled_doubles: false,
            phase,
            turn_number: 1,
            action_sequence: 0,
        }
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.active[self.current % self.active.len()]
    }

    /// Pass the turn to the next player in the rotation.
    ///
    /// Returns the new current player.
    pub fn advance(&mut self) -> PlayerId {
        self.current = (self.current + 1) % self.active.len();
        self.hand_over()
    }

    /// Start a fresh turn for whoever holds the current slot.
    ///
    /// Used directly after a removal, where the slot already points at the
    /// next player.
    pub fn hand_over(&mut self) -> PlayerId {
        self.doubles_streak = 0;
        self.rolled_doubles = false;
        self.turn_number += 1;
        self.action_sequence = 0;
        self.current_player()
    }

    /// Remove a player from the rotation.
    ///
    /// If the removed player held the turn, the slot now belongs to the
    /// next player in order, so nobody is skipped or repeated.
    pub fn remove(&mut self, player: PlayerId) {
        let Some(slot) = self.active.iter().position(|&p| p == player) else {
            return;
        };

        self.active.remove(slot);
        if self.active.is_empty() {
            self.current = 0;
            return;
        }

        if slot < self.current {
            self.current -= 1;
        }
        self.current %= self.active.len();
    }
}

/// Full game state.
///
/// Cloning is cheap enough for what-if analysis: possessions and history are
/// persistent `im` structures.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Player accounts, indexed by `PlayerId`.
    pub players: PlayerMap<PlayerAccount>,

    /// Tile ownership and improvements.
    pub ledger: OwnershipLedger,

    /// Rotation and phase.
    pub turn: TurnState,

    /// Taxes collected, paid out on Free Parking.
    pub free_parking: i64,

    /// Dice-off sums in join order, empty if the order was given.
    pub dice_off: Vec<(PlayerId, u8)>,

    /// Deterministic dice.
    pub rng: GameRng,

    /// Every successful action, in order.
    pub history: Vector<ActionRecord>,
}

impl GameState {
    /// Create a new game state.
    ///
    /// `names` must be non-empty; `order` is the turn rotation.
    #[must_use]
    pub fn new(
        board: &BoardMap,
        names: &[String],
        starting_balance: i64,
        order: Vec<PlayerId>,
        rng: GameRng,
    ) -> Self {
        let players = PlayerMap::new(names.len(), |id| {
            PlayerAccount::new(id, names[id.index()].clone(), starting_balance)
        });

        Self {
            players,
            ledger: OwnershipLedger::new(board),
            turn: TurnState::new(order),
            free_parking: 0,
            dice_off: Vec::new(),
            rng,
            history: Vector::new(),
        }
    }

    /// Get player count (including eliminated players).
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.turn.phase
    }

    /// The player whose turn it is, `None` once the game is over.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        match self.turn.phase {
            TurnPhase::GameOver { .. } => None,
            phase => Some(phase.player()),
        }
    }

    /// The winner, once the game is over.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.turn.phase {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    /// Players still in the game, in turn order.
    #[must_use]
    pub fn active_players(&self) -> &[PlayerId] {
        &self.turn.active
    }

    /// Look up a player by name.
    #[must_use]
    pub fn player_named(&self, name: &str) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, account)| account.name == name)
            .map(|(id, _)| id)
    }

    /// A player's balance.
    #[must_use]
    pub fn balance(&self, player: PlayerId) -> i64 {
        self.players[player].balance
    }

    /// A player's owned tiles, in board order.
    pub fn possessions(&self, player: PlayerId) -> impl Iterator<Item = Position> + '_ {
        self.players[player].possessions.iter().copied()
    }

    /// Tile ownership and improvements.
    #[must_use]
    pub fn ledger(&self) -> &OwnershipLedger {
        &self.ledger
    }

    /// Money waiting on Free Parking.
    #[must_use]
    pub fn free_parking(&self) -> i64 {
        self.free_parking
    }

    /// Total money held by players still in the game plus the pool.
    #[must_use]
    pub fn money_in_play(&self) -> i64 {
        self.players
            .values()
            .filter(|a| a.in_game)
            .map(|a| a.balance)
            .sum::<i64>()
            + self.free_parking
    }

    // === Mutation helpers shared by the rules ===

    /// Give a tile to a player in both the ledger and their account.
    pub fn grant_tile(&mut self, position: Position, player: PlayerId) {
        if let Some(previous) = self.ledger.assign(position, player) {
            self.players[previous].possessions.remove(&position);
        }
        self.players[player].possessions.insert(position);
    }

    /// Return a tile to the bank in both the ledger and its owner's account.
    pub fn revoke_tile(&mut self, position: Position) -> Option<PlayerId> {
        let previous = self.ledger.release(position)?;
        self.players[previous].possessions.remove(&position);
        Some(previous)
    }

    /// Record an action in history.
    pub fn record_action(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn state(count: usize) -> GameState {
        let board = BoardMap::standard();
        let all = ["Ada", "Bob", "Cy", "Dee", "Eve", "Fay"];
        GameState::new(
            &board,
            &names(&all[..count]),
            1500,
            PlayerId::all(count).collect(),
            GameRng::new(42),
        )
    }

    #[test]
    fn test_game_state_new() {
        let state = state(3);

        assert_eq!(state.player_count(), 3);
        assert_eq!(state.current_player(), Some(PlayerId::new(0)));
        assert_eq!(state.balance(PlayerId::new(2)), 1500);
        assert_eq!(state.free_parking(), 0);
        assert_eq!(state.turn.turn_number, 1);
        assert_eq!(state.phase().kind(), PhaseKind::AwaitingRoll);
        assert_eq!(state.player_named("Cy"), Some(PlayerId::new(2)));
        assert_eq!(state.player_named("Zed"), None);
    }

    #[test]
    fn test_single_player_is_over() {
        let state = state(1);
        assert_eq!(state.winner(), Some(PlayerId::new(0)));
        assert_eq!(state.current_player(), None);
    }

    #[test]
    fn test_turn_advance_wraps() {
        let mut turn = TurnState::new(PlayerId::all(3).collect());
        turn.doubles_streak = 2;

        assert_eq!(turn.advance(), PlayerId::new(1));
        assert_eq!(turn.doubles_streak, 0);
        assert_eq!(turn.advance(), PlayerId::new(2));
        assert_eq!(turn.advance(), PlayerId::new(0));
        assert_eq!(turn.turn_number, 4);
    }

    #[test]
    fn test_remove_current_player_keeps_slot() {
        let mut turn = TurnState::new(PlayerId::all(4).collect());
        turn.advance();
        assert_eq!(turn.current_player(), PlayerId::new(1));

        turn.remove(PlayerId::new(1));
        assert_eq!(turn.current_player(), PlayerId::new(2));
        assert_eq!(turn.active.len(), 3);
    }

    #[test]
    fn test_remove_last_slot_wraps() {
        let mut turn = TurnState::new(PlayerId::all(3).collect());
        turn.advance();
        turn.advance();
        assert_eq!(turn.current_player(), PlayerId::new(2));

        turn.remove(PlayerId::new(2));
        assert_eq!(turn.current_player(), PlayerId::new(0));
    }

    #[test]
    fn test_remove_earlier_player_keeps_current() {
        let mut turn = TurnState::new(PlayerId::all(4).collect());
        turn.advance();
        turn.advance();
        assert_eq!(turn.current_player(), PlayerId::new(2));

        turn.remove(PlayerId::new(0));
        assert_eq!(turn.current_player(), PlayerId::new(2));
        assert_eq!(turn.advance(), PlayerId::new(3));
        assert_eq!(turn.advance(), PlayerId::new(1));
    }

    #[test]
    fn test_grant_and_revoke_tile() {
        let mut state = state(2);
        let pos = Position::new(1);

        state.grant_tile(pos, PlayerId::new(0));
        assert_eq!(state.ledger.owner(pos), Some(PlayerId::new(0)));
        assert!(state.players[PlayerId::new(0)].owns(pos));

        state.grant_tile(pos, PlayerId::new(1));
        assert!(!state.players[PlayerId::new(0)].owns(pos));
        assert!(state.players[PlayerId::new(1)].owns(pos));

        assert_eq!(state.revoke_tile(pos), Some(PlayerId::new(1)));
        assert!(state.possessions(PlayerId::new(1)).next().is_none());
        assert_eq!(state.revoke_tile(pos), None);
    }

    #[test]
    fn test_money_in_play() {
        let mut state = state(2);
        state.free_parking = 100;
        assert_eq!(state.money_in_play(), 3100);

        state.players[PlayerId::new(1)].in_game = false;
        assert_eq!(state.money_in_play(), 1600);
    }

    #[test]
    fn test_record_action() {
        let mut state = state(2);
        let p0 = PlayerId::new(0);
        state.record_action(ActionRecord::new(p0, crate::core::Action::roll(), 1, 0));
        state.record_action(ActionRecord::new(p0, crate::core::Action::decide_purchase(true), 1, 1));

        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[1].sequence, 1);
        assert_eq!(state.history[1].turn, 1);
    }

    #[test]
    fn test_hand_over_resets_streak() {
        let mut turn = TurnState::new(PlayerId::all(3).collect());
        turn.doubles_streak = 2;
        turn.rolled_doubles = true;
        turn.remove(PlayerId::new(0));

        assert_eq!(turn.hand_over(), PlayerId::new(1));
        assert_eq!(turn.doubles_streak, 0);
        assert!(!turn.rolled_doubles);
        assert_eq!(turn.turn_number, 2);
    }
}
