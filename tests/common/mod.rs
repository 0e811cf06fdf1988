#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use morris_client::{BoardSnapshot, Cell, EngineApi, EngineMove, GameState, Player, Position};
use tokio::sync::Notify;

pub fn pos(x: usize, y: usize) -> Position {
    Position::new(x, y).unwrap()
}

/// Neighbours on the standard three men's morris board, diagonals included.
pub fn adjacent(p: Position) -> Vec<Position> {
    let table: &[((usize, usize), &[(usize, usize)])] = &[
        ((0, 0), &[(0, 1), (1, 0), (1, 1)]),
        ((0, 1), &[(0, 0), (0, 2), (1, 1)]),
        ((0, 2), &[(0, 1), (1, 1), (1, 2)]),
        ((1, 0), &[(0, 0), (2, 0), (1, 1)]),
        (
            (1, 1),
            &[(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)],
        ),
        ((1, 2), &[(0, 2), (1, 1), (2, 2)]),
        ((2, 0), &[(1, 0), (1, 1), (2, 1)]),
        ((2, 1), &[(1, 1), (2, 0), (2, 2)]),
        ((2, 2), &[(1, 1), (1, 2), (2, 1)]),
    ];
    table
        .iter()
        .find(|(key, _)| *key == (p.x(), p.y()))
        .map(|(_, ns)| ns.iter().map(|(x, y)| pos(*x, *y)).collect())
        .unwrap_or_default()
}

/// Movement-phase state with the given pieces; both sides have placed three.
pub fn movement_state(white: &[(usize, usize)], black: &[(usize, usize)], to_move: Player) -> GameState {
    let mut board = BoardSnapshot::empty();
    for (x, y) in white {
        board = board.with(pos(*x, *y), Cell::White);
    }
    for (x, y) in black {
        board = board.with(pos(*x, *y), Cell::Black);
    }
    GameState {
        board,
        current_player: to_move,
        white_count: 3,
        black_count: 3,
        is_placement_phase: false,
        winner: None,
        game_active: true,
    }
}

fn other(player: Player) -> Player {
    match player {
        Player::White => Player::Black,
        Player::Black => Player::White,
    }
}

/// Requests seen by [`FakeEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Start,
    BoardState,
    Place(Position),
    Move(Position, Position),
    Undo,
    ComputerMove(u8),
    Adjacent(Position),
    ValidMoves,
}

impl Call {
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Call::Start | Call::Place(_) | Call::Move(..) | Call::Undo | Call::ComputerMove(_)
        )
    }
}

struct FakeState {
    state: GameState,
    history: Vec<GameState>,
    calls: Vec<Call>,
    transport_down: bool,
    reject_mutations: bool,
    ai_reply: Option<EngineMove>,
}

/// In-process engine with just enough rules to drive the session.
#[derive(Clone)]
pub struct FakeEngine {
    inner: Arc<Mutex<FakeState>>,
    gate: Option<Arc<Notify>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeState {
                state: GameState::default(),
                history: Vec::new(),
                calls: Vec::new(),
                transport_down: false,
                reject_mutations: false,
                ai_reply: None,
            })),
            gate: None,
        }
    }

    /// Placements wait for `gate` to be notified before answering.
    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new()
        }
    }

    pub fn set_state(&self, state: GameState) {
        self.inner.lock().unwrap().state = state;
    }

    pub fn snapshot(&self) -> GameState {
        self.inner.lock().unwrap().state
    }

    pub fn set_transport_down(&self, down: bool) {
        self.inner.lock().unwrap().transport_down = down;
    }

    pub fn set_reject(&self, reject: bool) {
        self.inner.lock().unwrap().reject_mutations = reject;
    }

    pub fn set_ai_reply(&self, reply: Option<EngineMove>) {
        self.inner.lock().unwrap().ai_reply = reply;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(call);
        if inner.transport_down {
            anyhow::bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl EngineApi for FakeEngine {
    async fn start(&self) -> anyhow::Result<()> {
        self.record(Call::Start)?;
        let mut inner = self.inner.lock().unwrap();
        inner.state = GameState {
            game_active: true,
            ..GameState::default()
        };
        inner.history.clear();
        Ok(())
    }

    async fn board_state(&self) -> anyhow::Result<GameState> {
        self.record(Call::BoardState)?;
        Ok(self.inner.lock().unwrap().state)
    }

    async fn place(&self, p: Position) -> anyhow::Result<bool> {
        self.record(Call::Place(p))?;
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let mut inner = self.inner.lock().unwrap();
        let s = inner.state;
        if inner.reject_mutations || !s.is_placement_phase || !s.board.get(p).is_empty() {
            return Ok(false);
        }
        inner.history.push(s);
        let mut next = s;
        next.board = s.board.with(p, Cell::from(s.current_player));
        match s.current_player {
            Player::White => next.white_count += 1,
            Player::Black => next.black_count += 1,
        }
        next.current_player = other(s.current_player);
        next.is_placement_phase = next.white_count < 3 || next.black_count < 3;
        inner.state = next;
        Ok(true)
    }

    async fn move_piece(&self, from: Position, to: Position) -> anyhow::Result<bool> {
        self.record(Call::Move(from, to))?;
        let mut inner = self.inner.lock().unwrap();
        let s = inner.state;
        let legal = !inner.reject_mutations
            && !s.is_placement_phase
            && s.is_own_piece(from)
            && s.board.get(to).is_empty()
            && adjacent(from).contains(&to);
        if !legal {
            return Ok(false);
        }
        inner.history.push(s);
        let mut next = s;
        next.board = s
            .board
            .with(from, Cell::Empty)
            .with(to, Cell::from(s.current_player));
        next.current_player = other(s.current_player);
        inner.state = next;
        Ok(true)
    }

    async fn undo(&self) -> anyhow::Result<bool> {
        self.record(Call::Undo)?;
        let mut inner = self.inner.lock().unwrap();
        if inner.reject_mutations {
            return Ok(false);
        }
        match inner.history.pop() {
            Some(prev) => {
                inner.state = prev;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn computer_move(&self, depth: u8) -> anyhow::Result<Option<EngineMove>> {
        self.record(Call::ComputerMove(depth))?;
        Ok(self.inner.lock().unwrap().ai_reply)
    }

    async fn adjacent_positions(&self, p: Position) -> anyhow::Result<Vec<Position>> {
        self.record(Call::Adjacent(p))?;
        Ok(adjacent(p))
    }

    async fn valid_moves(&self) -> anyhow::Result<Vec<EngineMove>> {
        self.record(Call::ValidMoves)?;
        let s = self.inner.lock().unwrap().state;
        let moves = if s.is_placement_phase {
            Position::all()
                .filter(|p| s.board.get(*p).is_empty())
                .map(EngineMove::Place)
                .collect()
        } else {
            Position::all()
                .filter(|p| s.is_own_piece(*p))
                .flat_map(|from| {
                    adjacent(from)
                        .into_iter()
                        .filter(|to| s.board.get(*to).is_empty())
                        .map(move |to| EngineMove::Move { from, to })
                })
                .collect()
        };
        Ok(moves)
    }
}
