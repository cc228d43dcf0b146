//! Game setup and the `RulesEngine` implementation.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::board::{BoardMap, Position, TileKind};
use crate::core::{
    Action, ActionKind, ActionRecord, GameConfig, GameError, GameRng, GameState, PlayerId, TurnPhase,
};
use crate::rules::{GameResult, RulesEngine, TurnOutcome};

/// How the turn rotation is chosen at setup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TurnOrder {
    /// Every player rolls; highest sum goes first, ties keep join order.
    #[default]
    DiceOff,
    /// Players take turns in the order their names were given.
    AsGiven,
}

/// Rules of one game: configuration and board.
///
/// Immutable once built; all changing data lives in [`GameState`].
#[derive(Clone, Debug)]
pub struct MonopolyGame {
    pub(super) config: GameConfig,
    pub(super) board: BoardMap,
}

/// Builder for creating a MonopolyGame.
///
/// ```
/// use rust_monopoly::games::monopoly::{MonopolyBuilder, TurnOrder};
///
/// let (game, state) = MonopolyBuilder::new()
///     .turn_order(TurnOrder::AsGiven)
///     .build(&["Ada", "Bob"], 7)
///     .unwrap();
///
/// assert_eq!(state.player_count(), 2);
/// assert_eq!(state.balance(state.current_player().unwrap()), 1500);
/// assert_eq!(game.board().tiles().count(), 40);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonopolyBuilder {
    config: GameConfig,
    turn_order: TurnOrder,
}

impl MonopolyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn starting_balance(mut self, balance: i64) -> Self {
        self.config.starting_balance = balance;
        self
    }

    #[must_use]
    pub fn turn_order(mut self, order: TurnOrder) -> Self {
        self.turn_order = order;
        self
    }

    /// Build the game and initial state.
    ///
    /// Fails on a player count outside the configured range or on a
    /// repeated name.
    pub fn build<S: AsRef<str>>(self, names: &[S], seed: u64) -> Result<(MonopolyGame, GameState), GameError> {
        if !self.config.accepts_player_count(names.len()) {
            return Err(GameError::InvalidPlayerCount(names.len()));
        }

        let mut seen = FxHashSet::default();
        for name in names {
            let name = name.as_ref();
            if !seen.insert(name) {
                return Err(GameError::DuplicatePlayerName(name.to_string()));
            }
        }

        let names: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
        let board = BoardMap::standard();
        let rng = GameRng::new(seed);

        let (order, dice_off) = match self.turn_order {
            TurnOrder::AsGiven => (PlayerId::all(names.len()).collect(), Vec::new()),
            TurnOrder::DiceOff => dice_off(&rng, names.len()),
        };

        let mut state = GameState::new(&board, &names, self.config.starting_balance, order, rng);
        state.dice_off = dice_off;

        info!(
            players = names.len(),
            seed,
            first = ?state.current_player(),
            "game started"
        );

        let game = MonopolyGame {
            config: self.config,
            board,
        };
        Ok((game, state))
    }
}

/// Start a game with default rules and a dice-off.
pub fn start_game<S: AsRef<str>>(names: &[S], seed: u64) -> Result<(MonopolyGame, GameState), GameError> {
    MonopolyBuilder::new().build(names, seed)
}

/// Roll for turn order.
///
/// Returns the rotation (descending sum, stable for ties) and each player's
/// sum in join order.
fn dice_off(rng: &GameRng, player_count: usize) -> (Vec<PlayerId>, Vec<(PlayerId, u8)>) {
    let mut rng = rng.for_context("dice-off");
    let rolls: Vec<(PlayerId, u8)> = PlayerId::all(player_count)
        .map(|player| (player, rng.roll_dice().sum()))
        .collect();

    let mut ranked = rolls.clone();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    debug!(?rolls, "dice-off");

    (ranked.into_iter().map(|(player, _)| player).collect(), rolls)
}

impl MonopolyGame {
    /// Get the board.
    #[must_use]
    pub fn board(&self) -> &BoardMap {
        &self.board
    }

    // === Turn Operations ===

    /// Roll for the current player (random dice unless `dice` is given) and
    /// resolve the move.
    pub fn roll_and_advance(&self, state: &mut GameState, dice: Option<(u8, u8)>) -> Result<TurnOutcome, GameError> {
        self.apply_action(state, &Action::Roll { dice })
    }

    /// Accept or decline the pending purchase offer.
    pub fn decide_purchase(&self, state: &mut GameState, accept: bool) -> Result<TurnOutcome, GameError> {
        self.apply_action(state, &Action::decide_purchase(accept))
    }

    /// Mortgage `positions` to cover the pending debt.
    pub fn decide_liquidation(&self, state: &mut GameState, positions: &[Position]) -> Result<TurnOutcome, GameError> {
        self.apply_action(state, &Action::liquidate(positions))
    }

    /// Add houses to fully owned color groups.
    pub fn build_houses(&self, state: &mut GameState, builds: &[(Position, u8)]) -> Result<TurnOutcome, GameError> {
        self.apply_action(state, &Action::build_houses(builds))
    }

    /// Replace four houses with a hotel on each tile.
    pub fn build_hotels(&self, state: &mut GameState, positions: &[Position]) -> Result<TurnOutcome, GameError> {
        self.apply_action(state, &Action::build_hotels(positions))
    }

    // === Queries ===

    /// Rent owed by a visitor to an ownable tile, given its improvements.
    ///
    /// `None` for tiles that cannot be owned.
    #[must_use]
    pub fn rent_at(&self, state: &GameState, position: Position) -> Option<i64> {
        let entry = state.ledger.entry(position)?;
        let tile = self.board.tile_at(position);
        let rent = match tile.kind {
            TileKind::Property(deed) if entry.hotel => deed.rent * self.config.hotel_multiplier,
            TileKind::Property(deed) => deed.rent * self.config.house_multiplier(entry.houses),
            TileKind::Station(deed) | TileKind::Utility(deed) => deed.rent,
            _ => return None,
        };
        Some(rent)
    }

    /// The player the current phase is waiting on, or the error for `action`.
    pub(super) fn expect_phase(
        &self,
        state: &GameState,
        action: ActionKind,
        expected: impl Fn(&TurnPhase) -> bool,
    ) -> Result<PlayerId, GameError> {
        let phase = state.turn.phase;
        if expected(&phase) {
            Ok(phase.player())
        } else {
            Err(GameError::IllegalActionForState {
                action,
                phase: phase.kind(),
            })
        }
    }

    /// Run an operation and record it in the history if it succeeds.
    fn execute(
        &self,
        state: &mut GameState,
        action: &Action,
        op: impl FnOnce(&mut GameState) -> Result<TurnOutcome, GameError>,
    ) -> Result<TurnOutcome, GameError> {
        let turn = state.turn.turn_number;
        let sequence = state.turn.action_sequence;

        let outcome = op(state)?;

        if state.turn.turn_number == turn {
            state.turn.action_sequence += 1;
        }
        state.record_action(ActionRecord::new(outcome.player, action.clone(), turn, sequence));
        Ok(outcome)
    }
}

impl RulesEngine for MonopolyGame {
    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState) -> Vec<ActionKind> {
        match state.turn.phase {
            TurnPhase::AwaitingRoll { player } => {
                let mut actions = vec![ActionKind::Roll];
                if !self.house_candidates(state, player).is_empty() {
                    actions.push(ActionKind::BuildHouses);
                }
                if !self.hotel_candidates(state, player).is_empty() {
                    actions.push(ActionKind::BuildHotels);
                }
                actions
            }
            TurnPhase::Resolving { .. } => vec![ActionKind::DecidePurchase],
            TurnPhase::AwaitingLiquidationDecision { .. } => vec![ActionKind::DecideLiquidation],
            TurnPhase::GameOver { .. } => vec![],
        }
    }

    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<TurnOutcome, GameError> {
        match action {
            Action::Roll { dice } => self.execute(state, action, |s| self.roll(s, *dice)),
            Action::DecidePurchase { accept } => self.execute(state, action, |s| self.purchase(s, *accept)),
            Action::DecideLiquidation { positions } => {
                self.execute(state, action, |s| self.liquidate(s, positions))
            }
            Action::BuildHouses { builds } => self.execute(state, action, |s| self.add_houses(s, builds)),
            Action::BuildHotels { positions } => self.execute(state, action, |s| self.add_hotels(s, positions)),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        state.winner().map(|winner| GameResult {
            winner,
            turns: state.turn.turn_number,
        })
    }
}
