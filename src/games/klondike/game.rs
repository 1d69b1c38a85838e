//! The Klondike session: one board, its state, and the player's lifetime
//! statistics.

use tracing::{debug, info};

use super::observer::{StateChanged, StateObserver};
use super::request::{MoveReport, MoveRequest, Request, Response};
use crate::cards::{CardId, Deck};
use crate::core::error::{DrawError, EngineError, MoveRejection, SnapshotError, UndoError};
use crate::core::rng::{GameRng, GameRngState};
use crate::core::{GameState, Settings, Statistics};
use crate::persist::GameSnapshot;
use crate::rules::{self, Analysis, CandidateMove, DrawOutcome, Hint, HintAdvisor, UndoOutcome};
use crate::zones::{Board, PileId};

/// A running Klondike session.
///
/// All board mutation goes through the `rules::executor` functions called
/// from here. Observers are notified after every committed change.
pub struct KlondikeGame {
    board: Board,
    state: GameState,
    rng: GameRng,
    /// RNG position before the current deal's shuffle.
    deal_state: GameRngState,
    stats: Statistics,
    observers: Vec<Box<dyn StateObserver>>,
}

/// Builder for creating a `KlondikeGame`.
pub struct KlondikeGameBuilder {
    seed: u64,
    settings: Settings,
    stats: Statistics,
}

impl Default for KlondikeGameBuilder {
    fn default() -> Self {
        Self {
            seed: 0,
            settings: Settings::default(),
            stats: Statistics::default(),
        }
    }
}

impl KlondikeGameBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn statistics(mut self, stats: Statistics) -> Self {
        self.stats = stats;
        self
    }

    /// Shuffle, deal and start the first game.
    pub fn build(self) -> KlondikeGame {
        let rng = GameRng::new(self.seed);
        let mut game = KlondikeGame {
            board: Board::new(),
            state: GameState::new(self.settings),
            deal_state: rng.state(),
            rng,
            stats: self.stats,
            observers: Vec::new(),
        };
        game.deal();
        game
    }

    /// Check a snapshot as of `now` (unix seconds), then resume it.
    pub fn try_resume(self, snapshot: GameSnapshot, now: u64) -> Result<KlondikeGame, SnapshotError> {
        snapshot.validate(now)?;
        Ok(self.resume(snapshot))
    }

    /// Resume a saved game. The snapshot's settings win over the
    /// builder's; the seed is ignored.
    ///
    /// The snapshot is trusted as is. Pass only output of
    /// `persist::load_snapshot` or `GameSnapshot::decode`, or use
    /// `try_resume`.
    pub fn resume(self, snapshot: GameSnapshot) -> KlondikeGame {
        let rng = GameRng::from_state(&snapshot.rng);
        info!(
            moves = snapshot.state.move_count,
            foundation = snapshot.state.foundation_card_count,
            "game resumed"
        );
        KlondikeGame {
            board: snapshot.board,
            state: snapshot.state,
            deal_state: snapshot.deal.unwrap_or_else(|| rng.state()),
            rng,
            stats: self.stats,
            observers: Vec::new(),
        }
    }
}

impl KlondikeGame {
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.state.settings
    }

    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Register an observer for state changes.
    pub fn subscribe(&mut self, observer: impl StateObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Replace the settings. A new draw count applies from the next draw.
    pub fn set_settings(&mut self, settings: Settings) {
        debug!(?settings, "settings changed");
        self.state.settings = settings;
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let change = StateChanged::capture(&self.board, &self.state);
        for observer in &mut self.observers {
            observer.on_state_changed(&change);
        }
    }

    /// Shuffle a fresh deck from the current RNG position and deal it.
    fn deal(&mut self) {
        self.deal_state = self.rng.state();
        let mut deck = Deck::generate();
        deck.shuffle(&mut self.rng);
        self.board = deck.deal_klondike();
        self.state.reset();
        self.state.start();
        debug_assert!(self.board.check_conservation().is_ok());
        self.notify();
    }

    /// Archive a started, unfinished game as a loss.
    fn abandon_current(&mut self) {
        if self.state.started && !self.state.completed {
            self.stats.record_game(
                false,
                self.state.elapsed_secs,
                self.state.move_count,
                self.state.score,
            );
            info!(moves = self.state.move_count, "game abandoned");
        }
    }

    /// Start a new game with the next shuffle from the session RNG.
    pub fn new_game(&mut self) {
        self.abandon_current();
        self.deal();
        info!(seed = self.rng.seed(), "new game dealt");
    }

    /// Start a new game from a fresh seed.
    pub fn new_game_with_seed(&mut self, seed: u64) {
        self.abandon_current();
        self.rng = GameRng::new(seed);
        self.deal();
        info!(seed, "new game dealt");
    }

    /// Re-deal the current game's opening layout.
    pub fn restart(&mut self) {
        self.abandon_current();
        self.rng = GameRng::from_state(&self.deal_state);
        self.deal();
        info!("game restarted");
    }

    fn on_completed(&mut self) {
        self.stats.record_game(
            true,
            self.state.elapsed_secs,
            self.state.move_count,
            self.state.score,
        );
    }

    /// Move a card, or the run it heads, then turn up any exposed card.
    ///
    /// A request naming the top card is a single move; one naming a card
    /// further down a tableau moves everything above it too.
    pub fn move_cards(&mut self, request: MoveRequest) -> Result<MoveReport, MoveRejection> {
        let MoveRequest { card, from, to } = request;
        if !Board::contains_pile(from) {
            return Err(MoveRejection::InvalidSource);
        }

        let source = self.board.pile(from);
        let outcome = match source.position_of(card) {
            Some(index) if from.is_tableau() && index + 1 < source.len() => {
                let run: Vec<CardId> = source.cards()[index..].iter().map(|c| c.id()).collect();
                rules::execute_multi_move(&mut self.state, &mut self.board, &run, from, to)?
            }
            _ => rules::execute_single_move(&mut self.state, &mut self.board, card, from, to)?,
        };

        let flipped = rules::flip_exposed_cards(&mut self.state, &mut self.board);
        if outcome.completed {
            self.on_completed();
        }
        self.notify();
        Ok(MoveReport { outcome, flipped })
    }

    /// Draw from the stock, recycling the waste when the stock is empty.
    pub fn draw(&mut self) -> Result<DrawOutcome, DrawError> {
        let outcome = rules::draw_from_stock(&mut self.state, &mut self.board)?;
        self.notify();
        Ok(outcome)
    }

    /// Turn up a face-down tableau top.
    pub fn flip(&mut self, pile: PileId) -> Result<CardId, MoveRejection> {
        let card = rules::flip_card(&mut self.state, &mut self.board, pile)?;
        self.notify();
        Ok(card)
    }

    pub fn undo(&mut self) -> Result<UndoOutcome, UndoError> {
        let outcome = rules::undo(&mut self.state, &mut self.board)?;
        self.notify();
        Ok(outcome)
    }

    /// The suggested next action, or `None` on a blocked board.
    pub fn hint(&self) -> Result<Option<Hint>, EngineError> {
        if !self.state.settings.hint_enabled || !self.state.is_playing() {
            return Err(EngineError::HintUnavailable);
        }
        Ok(HintAdvisor::suggest_best_move(&self.board))
    }

    /// Every legal move and flip on the board.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Hint> {
        HintAdvisor::find_legal_moves(&self.board)
    }

    /// Send every card that can go to a foundation there. Does nothing if
    /// auto-complete is switched off or the game is not in play.
    pub fn auto_complete(&mut self) -> Vec<CandidateMove> {
        if !self.state.settings.auto_complete || !self.state.is_playing() {
            return Vec::new();
        }
        let moves = rules::execute_auto_complete(&mut self.state, &mut self.board);
        if moves.is_empty() {
            return moves;
        }
        if self.state.completed {
            self.on_completed();
        }
        self.notify();
        moves
    }

    /// Returns the new pause flag.
    pub fn toggle_pause(&mut self) -> bool {
        let paused = self.state.toggle_pause();
        self.notify();
        paused
    }

    /// Accrue play time; the caller's timer decides the cadence.
    pub fn tick(&mut self, secs: u64) {
        self.state.tick(secs);
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.state.is_playing() && rules::is_blocked(&self.board)
    }

    /// Check for a blocked board and tell observers if so.
    pub fn check_blocked(&mut self) -> bool {
        let blocked = self.is_blocked();
        if blocked {
            info!(moves = self.state.move_count, "no moves left");
            for observer in &mut self.observers {
                observer.on_blocked();
            }
        }
        blocked
    }

    #[must_use]
    pub fn analyze(&self) -> Analysis {
        rules::analyze(&self.board)
    }

    /// Capture the game for saving, as of `now` (unix seconds).
    ///
    /// `None` unless a game is in progress.
    #[must_use]
    pub fn snapshot(&self, now: u64) -> Option<GameSnapshot> {
        if !self.state.started || self.state.completed {
            return None;
        }
        Some(GameSnapshot {
            saved_at: now,
            state: self.state.clone(),
            board: self.board.clone(),
            rng: self.rng.state(),
            deal: Some(self.deal_state.clone()),
        })
    }

    /// Dispatch a request from the input layer.
    pub fn handle(&mut self, request: Request) -> Result<Response, EngineError> {
        let response = match request {
            Request::Move(req) => Response::Moved(self.move_cards(req)?),
            Request::Draw => Response::Drew(self.draw()?),
            Request::Undo => Response::Undone(self.undo()?),
            Request::NewGame => {
                self.new_game();
                Response::Dealt
            }
            Request::Restart => {
                self.restart();
                Response::Dealt
            }
            Request::Hint => Response::Hint(self.hint()?),
            Request::Flip(pile) => Response::Flipped {
                pile,
                card: self.flip(pile)?,
            },
            Request::AutoComplete => {
                let moves = self.auto_complete();
                Response::AutoCompleted {
                    moves,
                    completed: self.state.completed,
                }
            }
            Request::TogglePause => Response::Paused(self.toggle_pause()),
        };
        Ok(response)
    }
}
