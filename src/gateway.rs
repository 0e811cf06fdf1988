#![cfg(feature = "std")]
//! HTTP client for the engine's local JSON endpoint.

use anyhow::Context;
use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::board::GameState;
use crate::coords::Position;
use crate::engine_api::EngineApi;
use crate::protocol::{
    positions, AdjacentResponse, BoardStateResponse, ComputerMoveResponse, EngineMove,
    MoveRequest, PlaceRequest, SuccessResponse, ValidMovesResponse,
};

/// [`EngineApi`] over plain HTTP. No retries; timeouts are whatever the
/// transport applies by default.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: Client,
    base: Url,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("invalid engine url {base_url:?}"))?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> anyhow::Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("cannot build engine url for {path}"))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> anyhow::Result<T> {
        let url = self.url(path)?;
        debug!("GET {url}");
        let body = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {path} failed"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("malformed response from {path}"))?;
        Ok(body)
    }

    async fn post<B, T>(&self, path: &str, payload: &B) -> anyhow::Result<T>
    where
        B: serde::Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!("POST {url}");
        let body = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("POST {path} failed"))?
            .error_for_status()?
            .json()
            .await
            .with_context(|| format!("malformed response from {path}"))?;
        Ok(body)
    }
}

#[async_trait::async_trait]
impl EngineApi for HttpGateway {
    async fn start(&self) -> anyhow::Result<()> {
        let _: SuccessResponse = self.get("start", &[]).await?;
        Ok(())
    }

    async fn board_state(&self) -> anyhow::Result<GameState> {
        let resp: BoardStateResponse = self.get("get_board_state", &[]).await?;
        Ok(GameState::try_from(resp)?)
    }

    async fn place(&self, pos: Position) -> anyhow::Result<bool> {
        let req = PlaceRequest {
            x: pos.x(),
            y: pos.y(),
        };
        let resp: SuccessResponse = self.post("place", &req).await?;
        Ok(resp.success)
    }

    async fn move_piece(&self, from: Position, to: Position) -> anyhow::Result<bool> {
        let req = MoveRequest {
            x: from.x(),
            y: from.y(),
            nx: to.x(),
            ny: to.y(),
        };
        let resp: SuccessResponse = self.post("move", &req).await?;
        Ok(resp.success)
    }

    async fn undo(&self) -> anyhow::Result<bool> {
        let resp: SuccessResponse = self.get("undo", &[]).await?;
        Ok(resp.success)
    }

    async fn computer_move(&self, depth: u8) -> anyhow::Result<Option<EngineMove>> {
        let resp: ComputerMoveResponse = self
            .get("get_computer_move", &[("depth", depth.to_string())])
            .await?;
        match resp.mv.as_deref() {
            None | Some([]) => Ok(None),
            Some(coords) => Ok(Some(EngineMove::from_coords(coords)?)),
        }
    }

    async fn adjacent_positions(&self, pos: Position) -> anyhow::Result<Vec<Position>> {
        let resp: AdjacentResponse = self
            .get(
                "get_adjacent_positions",
                &[("x", pos.x().to_string()), ("y", pos.y().to_string())],
            )
            .await?;
        Ok(positions(&resp.adjacent)?)
    }

    async fn valid_moves(&self) -> anyhow::Result<Vec<EngineMove>> {
        let resp: ValidMovesResponse = self.get("get_valid_moves", &[]).await?;
        let moves = resp
            .moves
            .iter()
            .map(|coords| EngineMove::from_coords(coords))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(moves)
    }
}
