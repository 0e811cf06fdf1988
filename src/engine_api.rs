#![cfg(feature = "std")]

use crate::board::GameState;
use crate::coords::Position;
use crate::protocol::EngineMove;

/// Request/response contract of the external rule and AI engine.
///
/// `Ok(false)` from a mutating call is a rule rejection reported by the
/// engine; `Err` means the request could not complete or its answer could
/// not be understood.
#[async_trait::async_trait]
pub trait EngineApi: Send + Sync {
    /// Initialize or reset the game.
    async fn start(&self) -> anyhow::Result<()>;
    /// Authoritative snapshot of the whole game.
    async fn board_state(&self) -> anyhow::Result<GameState>;
    async fn place(&self, pos: Position) -> anyhow::Result<bool>;
    async fn move_piece(&self, from: Position, to: Position) -> anyhow::Result<bool>;
    async fn undo(&self) -> anyhow::Result<bool>;
    /// Move recommended at search depth `depth`, or `None` if the engine
    /// found nothing.
    async fn computer_move(&self, depth: u8) -> anyhow::Result<Option<EngineMove>>;
    /// Neighbours of `pos` on the board's fixed topology, occupied or not.
    async fn adjacent_positions(&self, pos: Position) -> anyhow::Result<Vec<Position>>;
    /// Every legal move of the player to move.
    async fn valid_moves(&self) -> anyhow::Result<Vec<EngineMove>>;
}
