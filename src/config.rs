use core::time::Duration;

/// Side length of the logical board.
pub const BOARD_SIZE: usize = 3;
/// Side length of the decorative display grid.
pub const DISPLAY_SIZE: usize = 2 * BOARD_SIZE - 1;
/// Pieces each player brings onto the board during placement.
pub const PIECES_PER_PLAYER: u8 = 3;

/// Inclusive range of search depths accepted for AI moves.
pub const MIN_AI_DEPTH: u8 = 1;
pub const MAX_AI_DEPTH: u8 = 6;
pub const DEFAULT_AI_DEPTH: u8 = 3;

/// Where the rule/AI engine listens unless told otherwise.
pub const DEFAULT_ENGINE_URL: &str = "http://localhost:8000";

/// How long a notice stays visible before it expires.
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(3);

/// Board art for the display grid; `*` marks a board point.
pub const BOARD_ART: [&str; DISPLAY_SIZE] = ["*─*─*", "|\\|/|", "*─*─*", "|/|\\|", "*─*─*"];

/// Returns `true` if `depth` is an accepted AI search depth.
pub fn depth_in_range(depth: u8) -> bool {
    (MIN_AI_DEPTH..=MAX_AI_DEPTH).contains(&depth)
}
