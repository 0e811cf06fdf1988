#![cfg(feature = "std")]
//! Sequencing of engine requests around the authoritative game state.
//!
//! Every mutating action follows the same discipline: send the request, and
//! only if the engine accepted it fetch the full state again and replace the
//! local copy wholesale. Rejections and transport failures leave the state
//! untouched and turn into a short-lived notice. At most one mutating
//! sequence runs per session; a second one is refused with
//! [`ActionError::Busy`] instead of racing the first.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use log::{debug, info, warn};

use crate::board::{GameState, Player};
use crate::config::{depth_in_range, MAX_AI_DEPTH, MIN_AI_DEPTH};
use crate::coords::Position;
use crate::engine_api::EngineApi;
use crate::notice::Notice;
use crate::presentation::{present, DisplayModel};
use crate::protocol::EngineMove;
use crate::selection::{ClickOutcome, Rejection, SelectionController, SelectionState};

/// Why an action did not go through.
#[derive(Debug)]
pub enum ActionError {
    /// AI depth outside the accepted range; nothing was sent.
    InvalidDepth(u8),
    /// Another mutating request is still pending; nothing was sent.
    Busy,
    /// No game is running; nothing was sent.
    GameOver,
    /// The engine or the selection protocol refused the action.
    Rejected(Rejection),
    /// The request did not complete or its answer was unreadable.
    Transport {
        context: &'static str,
        source: anyhow::Error,
    },
}

impl ActionError {
    fn transport(context: &'static str) -> impl FnOnce(anyhow::Error) -> ActionError {
        move |source| ActionError::Transport { context, source }
    }

    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            ActionError::Transport { context, .. } => (*context).to_string(),
            other => other.to_string(),
        }
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            ActionError::Rejected(r) => Some(*r),
            _ => None,
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::InvalidDepth(d) => write!(
                f,
                "Please enter a valid depth ({}-{}), got {}",
                MIN_AI_DEPTH, MAX_AI_DEPTH, d
            ),
            ActionError::Busy => write!(f, "Another request is still in progress"),
            ActionError::GameOver => write!(f, "Start a new game first"),
            ActionError::Rejected(r) => write!(f, "{}", r),
            ActionError::Transport { context, source } => write!(f, "{}: {:#}", context, source),
        }
    }
}

impl std::error::Error for ActionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ActionError::Transport { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// What a successful action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Click on a connector during placement.
    Ignored,
    Started,
    Refreshed,
    Selected(Position),
    Placed(Position),
    Moved { from: Position, to: Position },
    Undone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Actor {
    Human,
    Ai,
}

impl Actor {
    fn transport_context(self, placing: bool) -> &'static str {
        match (self, placing) {
            (Actor::Ai, _) => "Failed to make AI move",
            (Actor::Human, true) => "Failed to place piece",
            (Actor::Human, false) => "Failed to move piece",
        }
    }
}

/// Raises an [`AtomicBool`] for as long as it lives.
struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    fn try_raise(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }

    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

struct Inner {
    state: GameState,
    selection: SelectionController,
    notice: Option<Notice>,
    victory: Option<Player>,
}

/// One game session against an engine.
pub struct Session<E: EngineApi> {
    engine: E,
    inner: Mutex<Inner>,
    in_flight: AtomicBool,
    loading: AtomicBool,
}

impl<E: EngineApi> Session<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            inner: Mutex::new(Inner {
                state: GameState::default(),
                selection: SelectionController::new(),
                notice: None,
                victory: None,
            }),
            in_flight: AtomicBool::new(false),
            loading: AtomicBool::new(false),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Last authoritative state.
    pub fn state(&self) -> GameState {
        self.lock().state
    }

    pub fn selection(&self) -> SelectionState {
        self.lock().selection.state()
    }

    /// Winner announced by the last refresh, until a new game starts.
    pub fn victory(&self) -> Option<Player> {
        self.lock().victory
    }

    /// `true` while an AI move is being computed and played.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// `true` while any mutating request is pending.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Current notice, unless it has expired by `now`.
    pub fn notice_at(&self, now: Instant) -> Option<Notice> {
        let mut inner = self.lock();
        if inner.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            inner.notice = None;
        }
        inner.notice.clone()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice_at(Instant::now())
    }

    /// Display model for the current state and selection.
    pub fn display(&self) -> DisplayModel {
        let inner = self.lock();
        present(&inner.state, &inner.selection.state())
    }

    pub fn cancel_selection(&self) {
        self.lock().selection.reset();
    }

    pub async fn start_session(&self) -> Result<Outcome, ActionError> {
        self.start_with("New game started!", "Failed to start new game")
            .await
    }

    pub async fn restart(&self) -> Result<Outcome, ActionError> {
        self.start_with("Game restarted!", "Failed to restart game")
            .await
    }

    /// Dismiss the victory banner and start over.
    pub async fn new_game_after_victory(&self) -> Result<Outcome, ActionError> {
        self.lock().victory = None;
        self.start_session().await
    }

    /// Fetch the authoritative state without changing anything remotely.
    pub async fn refresh(&self) -> Result<Outcome, ActionError> {
        let _flight = self.begin()?;
        let state = self.fetch("Failed to load game state").await?;
        self.lock().selection.reset();
        self.install(state);
        Ok(Outcome::Refreshed)
    }

    pub async fn undo_last_move(&self) -> Result<Outcome, ActionError> {
        self.ensure_active()?;
        let _flight = self.begin()?;
        debug!("requesting undo");
        let undone = self
            .engine
            .undo()
            .await
            .map_err(|e| self.fail(ActionError::transport("Failed to undo move")(e)))?;
        if !undone {
            return Err(self.fail(ActionError::Rejected(Rejection::NothingToUndo)));
        }
        let state = self.fetch("Failed to undo move").await?;
        self.lock().selection.reset();
        self.install(state);
        self.post(Notice::success("Move undone successfully"));
        Ok(Outcome::Undone)
    }

    /// Ask the engine for a move at search depth `depth` and play it.
    pub async fn request_ai_move(&self, depth: u8) -> Result<Outcome, ActionError> {
        if !depth_in_range(depth) {
            return Err(self.fail(ActionError::InvalidDepth(depth)));
        }
        self.ensure_active()?;
        let _flight = self.begin()?;
        let _loading = FlagGuard::raise(&self.loading);

        debug!("requesting computer move at depth {depth}");
        let suggestion = self
            .engine
            .computer_move(depth)
            .await
            .map_err(|e| self.fail(ActionError::transport("Failed to make AI move")(e)))?;
        match suggestion {
            None => Err(self.fail(ActionError::Rejected(Rejection::NoMoveFound))),
            Some(EngineMove::Place(pos)) => self.place(pos, Actor::Ai).await,
            Some(EngineMove::Move { from, to }) => {
                let result = self.move_piece(from, to, Actor::Ai).await;
                self.lock().selection.reset();
                result
            }
        }
    }

    pub async fn apply_placement(&self, pos: Position) -> Result<Outcome, ActionError> {
        self.ensure_active()?;
        let _flight = self.begin()?;
        self.place(pos, Actor::Human).await
    }

    pub async fn apply_move(&self, from: Position, to: Position) -> Result<Outcome, ActionError> {
        self.ensure_active()?;
        let _flight = self.begin()?;
        let result = self.move_piece(from, to, Actor::Human).await;
        self.lock().selection.finish_move();
        result
    }

    /// Handle a click on display cell `(row, col)`.
    pub async fn click(&self, row: usize, col: usize) -> Result<Outcome, ActionError> {
        self.ensure_active()?;
        let _flight = self.begin()?;

        let outcome = {
            let mut inner = self.lock();
            let state = inner.state;
            inner.selection.click(&state, row, col)
        };
        debug!("click ({row}, {col}) -> {outcome:?}");

        match outcome {
            ClickOutcome::Ignored => Ok(Outcome::Ignored),
            ClickOutcome::Rejected(r) => Err(self.fail(ActionError::Rejected(r))),
            ClickOutcome::Place(pos) => self.place(pos, Actor::Human).await,
            ClickOutcome::Select(pos) => self.load_destinations(pos).await,
            ClickOutcome::Move { from, to } => {
                let result = self.move_piece(from, to, Actor::Human).await;
                self.lock().selection.finish_move();
                result
            }
        }
    }

    /// Every legal move of the player to move, as reported by the engine.
    pub async fn valid_moves(&self) -> Result<Vec<EngineMove>, ActionError> {
        self.engine
            .valid_moves()
            .await
            .map_err(|e| self.fail(ActionError::transport("Failed to load valid moves")(e)))
    }

    async fn start_with(
        &self,
        success: &'static str,
        failure: &'static str,
    ) -> Result<Outcome, ActionError> {
        let _flight = self.begin()?;
        self.engine
            .start()
            .await
            .map_err(|e| self.fail(ActionError::transport(failure)(e)))?;
        let mut state = self.fetch(failure).await?;
        state.game_active = state.winner.is_none();
        {
            let mut inner = self.lock();
            inner.victory = None;
            inner.selection.reset();
        }
        self.install(state);
        info!("session started");
        self.post(Notice::success(success));
        Ok(Outcome::Started)
    }

    async fn load_destinations(&self, source: Position) -> Result<Outcome, ActionError> {
        match self.engine.adjacent_positions(source).await {
            Ok(adjacent) => {
                let mut inner = self.lock();
                let state = inner.state;
                inner.selection.set_destinations(&state, source, adjacent);
                Ok(Outcome::Selected(source))
            }
            Err(e) => {
                self.lock().selection.reset();
                Err(self.fail(ActionError::transport("Failed to load valid moves")(e)))
            }
        }
    }

    async fn place(&self, pos: Position, actor: Actor) -> Result<Outcome, ActionError> {
        let context = actor.transport_context(true);
        debug!("placing at {pos}");
        let accepted = self
            .engine
            .place(pos)
            .await
            .map_err(|e| self.fail(ActionError::transport(context)(e)))?;
        if !accepted {
            let rejection = match actor {
                Actor::Human => Rejection::InvalidPlacement,
                Actor::Ai => Rejection::AiInvalidPlacement,
            };
            return Err(self.fail(ActionError::Rejected(rejection)));
        }
        let state = self.fetch(context).await?;
        self.install(state);
        self.post(Notice::success(match actor {
            Actor::Human => format!("Piece placed at {pos}"),
            Actor::Ai => format!("AI placed piece at {pos}"),
        }));
        Ok(Outcome::Placed(pos))
    }

    async fn move_piece(
        &self,
        from: Position,
        to: Position,
        actor: Actor,
    ) -> Result<Outcome, ActionError> {
        let context = actor.transport_context(false);
        debug!("moving {from} -> {to}");
        let accepted = self
            .engine
            .move_piece(from, to)
            .await
            .map_err(|e| self.fail(ActionError::transport(context)(e)))?;
        if !accepted {
            let rejection = match actor {
                Actor::Human => Rejection::InvalidMove,
                Actor::Ai => Rejection::AiInvalidMove,
            };
            return Err(self.fail(ActionError::Rejected(rejection)));
        }
        let state = self.fetch(context).await?;
        self.install(state);
        self.post(Notice::success(match actor {
            Actor::Human => format!("Piece moved from {from} to {to}"),
            Actor::Ai => format!("AI moved piece from {from} to {to}"),
        }));
        Ok(Outcome::Moved { from, to })
    }

    async fn fetch(&self, context: &'static str) -> Result<GameState, ActionError> {
        self.engine
            .board_state()
            .await
            .map_err(|e| self.fail(ActionError::transport(context)(e)))
    }

    /// Replace the local state with a fresh snapshot.
    fn install(&self, mut state: GameState) {
        let mut inner = self.lock();
        match state.winner {
            Some(winner) => {
                state.game_active = false;
                if inner.victory != Some(winner) {
                    info!("{winner} wins");
                }
                inner.victory = Some(winner);
            }
            None => inner.victory = None,
        }
        inner.selection.sync_phase(&state);
        inner.state = state;
    }

    fn ensure_active(&self) -> Result<(), ActionError> {
        let active = self.lock().state.game_active;
        if active {
            Ok(())
        } else {
            Err(self.fail(ActionError::GameOver))
        }
    }

    fn begin(&self) -> Result<FlagGuard<'_>, ActionError> {
        FlagGuard::try_raise(&self.in_flight).ok_or_else(|| self.fail(ActionError::Busy))
    }

    fn fail(&self, err: ActionError) -> ActionError {
        warn!("{err}");
        self.post(Notice::error(err.message()));
        err
    }

    fn post(&self, notice: Notice) {
        self.lock().notice = Some(notice);
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
