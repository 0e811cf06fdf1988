#![cfg_attr(not(feature = "std"), no_std)]
//! Interaction controller for three men's morris played against a remote
//! rule/AI engine.
//!
//! The `no_std` core maps the decorative 5×5 board onto the 3×3 logical
//! board, runs the click-selection protocol and derives the display model.
//! With `std`, [`Session`] sequences engine requests over HTTP and keeps the
//! authoritative state in sync.

#[cfg(feature = "std")]
extern crate std;

mod board;
mod config;
pub mod coords;
#[cfg(feature = "std")]
pub mod engine_api;
#[cfg(feature = "std")]
pub mod gateway;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod notice;
pub mod positions;
pub mod presentation;
#[cfg(feature = "std")]
pub mod protocol;
pub mod selection;
#[cfg(feature = "std")]
pub mod session;
#[cfg(feature = "std")]
pub mod terminal;

pub use board::*;
pub use config::*;
pub use coords::{
    connector_glyph, display_to_logical, is_connector, logical_to_display, CoordError, Position,
};
pub use positions::PositionSet;
pub use presentation::{present, Controls, DisplayCell, DisplayModel, Marker, StatusLine};
pub use selection::{ClickOutcome, Rejection, SelectionController, SelectionState};

#[cfg(feature = "std")]
pub use engine_api::EngineApi;
#[cfg(feature = "std")]
pub use gateway::HttpGateway;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
#[cfg(feature = "std")]
pub use notice::{Notice, NoticeKind};
#[cfg(feature = "std")]
pub use protocol::{EngineMove, ProtocolError};
#[cfg(feature = "std")]
pub use session::{ActionError, Outcome, Session};
#[cfg(feature = "std")]
pub use terminal::{parse_command, render, run, Command, TerminalOptions};
