#![cfg(feature = "std")]
//! Line-oriented front end: reads commands, drives a [`Session`], prints
//! the board after every command.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::board::Player;
use crate::config::{DEFAULT_AI_DEPTH, PIECES_PER_PLAYER};
use crate::coords::Position;
use crate::engine_api::EngineApi;
use crate::session::Session;

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Click display cell `(row, col)` of the 5×5 grid.
    Click(usize, usize),
    Place(Position),
    Move(Position, Position),
    Undo,
    /// AI move at the given depth, or the configured default.
    Ai(Option<u8>),
    New,
    Restart,
    Cancel,
    Hint,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  click <row> <col>        click a cell of the 5x5 board (rows/cols 0-4)
  place <x> <y>            place a piece at a board position (0-2)
  move <x> <y> <nx> <ny>   move a piece
  undo                     revert the last move
  ai [depth]               let the engine play a move (depth 1-6)
  new | restart            start a new game
  cancel                   drop the current selection
  hint                     list legal moves
  status                   reload the board
  help | quit";

fn parse_numbers(args: &[&str]) -> Result<Vec<usize>, String> {
    args.iter()
        .map(|a| {
            a.parse::<usize>()
                .map_err(|_| format!("Error: {a:?} is not a valid number"))
        })
        .collect()
}

fn parse_position(x: usize, y: usize) -> Result<Position, String> {
    Position::new(x, y).map_err(|_| "Error: Coordinates must be between 0 and 2".to_string())
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((head, args)) = words.split_first() else {
        return Err("Error: empty command".to_string());
    };
    let arity = |n: usize| {
        if args.len() == n {
            Ok(())
        } else {
            Err(format!("Error: {head} takes {n} numbers"))
        }
    };
    match head.to_ascii_lowercase().as_str() {
        "click" | "c" => {
            arity(2)?;
            let n = parse_numbers(args)?;
            Ok(Command::Click(n[0], n[1]))
        }
        "place" | "p" => {
            arity(2)?;
            let n = parse_numbers(args)?;
            Ok(Command::Place(parse_position(n[0], n[1])?))
        }
        "move" | "m" => {
            arity(4)?;
            let n = parse_numbers(args)?;
            Ok(Command::Move(
                parse_position(n[0], n[1])?,
                parse_position(n[2], n[3])?,
            ))
        }
        "ai" => match args {
            [] => Ok(Command::Ai(None)),
            [depth] => depth
                .parse::<u8>()
                .map(|d| Command::Ai(Some(d)))
                .map_err(|_| "Please enter a valid depth (1-6)".to_string()),
            _ => Err("Error: ai takes at most one number".to_string()),
        },
        "undo" | "u" => Ok(Command::Undo),
        "new" => Ok(Command::New),
        "restart" => Ok(Command::Restart),
        "cancel" => Ok(Command::Cancel),
        "hint" => Ok(Command::Hint),
        "status" => Ok(Command::Status),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("Unknown command {other:?}; type help")),
    }
}

/// Front end options.
#[derive(Debug, Clone, Copy)]
pub struct TerminalOptions {
    pub depth: u8,
    /// Side the engine plays automatically, if any.
    pub ai_side: Option<Player>,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            depth: DEFAULT_AI_DEPTH,
            ai_side: None,
        }
    }
}

/// Text shown after every command.
pub fn render<E: EngineApi>(session: &Session<E>) -> String {
    let model = session.display();
    let mut out = format!("{model}\n");
    if let Some(winner) = session.victory() {
        out.push_str(&format!("*** {winner} Wins! ***  (type new to play again)\n"));
    }
    if session.is_loading() {
        out.push_str("AI is thinking...\n");
    }
    if let Some(notice) = session.notice() {
        out.push_str(&format!("{notice}\n"));
    }
    let controls = model.controls;
    let mut offered = Vec::new();
    if controls.new_game {
        offered.push("new");
    }
    if controls.undo {
        offered.push("undo");
    }
    if controls.restart {
        offered.push("restart");
    }
    if controls.ai_move {
        offered.push("ai [depth]");
    }
    out.push_str(&format!("> {}\n", offered.join(" | ")));
    out
}

/// Run commands from `input` until it ends or `quit` is read.
pub async fn run<E, R, W>(
    session: &Session<E>,
    input: R,
    out: &mut W,
    opts: TerminalOptions,
) -> anyhow::Result<()>
where
    E: EngineApi,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    autoplay(session, opts).await;
    write!(out, "{}", render(session))?;
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                continue;
            }
        };
        // Failures are already turned into notices by the session.
        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Command::Hint => {
                if let Ok(moves) = session.valid_moves().await {
                    let listed: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
                    writeln!(out, "Legal moves: {}", listed.join(", "))?;
                }
            }
            Command::Click(row, col) => {
                let _ = session.click(row, col).await;
            }
            Command::Place(pos) => {
                let _ = session.apply_placement(pos).await;
            }
            Command::Move(from, to) => {
                let _ = session.apply_move(from, to).await;
            }
            Command::Undo => {
                let _ = session.undo_last_move().await;
            }
            Command::Ai(depth) => {
                let _ = session.request_ai_move(depth.unwrap_or(opts.depth)).await;
            }
            Command::New => {
                let _ = session.new_game_after_victory().await;
            }
            Command::Restart => {
                let _ = session.restart().await;
            }
            Command::Cancel => session.cancel_selection(),
            Command::Status => {
                let _ = session.refresh().await;
            }
        }
        autoplay(session, opts).await;
        write!(out, "{}", render(session))?;
    }
    Ok(())
}

/// Let the engine answer for its side. Stops on the first failure so a
/// stuck engine cannot loop forever.
async fn autoplay<E: EngineApi>(session: &Session<E>, opts: TerminalOptions) {
    let Some(side) = opts.ai_side else {
        return;
    };
    // Bounded in case the engine keeps handing the turn back.
    for _ in 0..=PIECES_PER_PLAYER {
        let state = session.state();
        if !state.game_active || state.current_player != side {
            return;
        }
        if session.request_ai_move(opts.depth).await.is_err() {
            return;
        }
    }
}
