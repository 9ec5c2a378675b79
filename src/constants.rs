//! Board geometry, piece symbols, and driver defaults.
//!
//! English draughts is only played on an 8x8 board, so unlike engines that
//! support several sizes there is no feature switch here.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const SIZE: i32 = 8;

/// Number of tiles on the board.
pub const CELLS: usize = (SIZE * SIZE) as usize;

/// Rows of men each side starts with.
pub const START_ROWS: i32 = 3;

/// Men per side at the start of a game.
pub const PIECES_PER_SIDE: usize = 12;

/// Unit offsets `(dx, dy)` of the four diagonal directions.
/// Order: up-left, up-right, down-left, down-right. Row 0 is "up".
pub const DIRECTION_DELTAS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// Step count of a simple move.
pub const STEP: u32 = 1;

/// Step count of a jump.
pub const JUMP: u32 = 2;

// =============================================================================
// Piece Symbols (as bytes for direct comparison)
// =============================================================================

/// White (red) man.
pub const WHITE_MAN: u8 = b'W';

/// Black man.
pub const BLACK_MAN: u8 = b'B';

/// White (red) king.
pub const WHITE_KING: u8 = b'K';

/// Black king.
pub const BLACK_KING: u8 = b'X';

/// Empty tile.
pub const EMPTY: u8 = b'.';

// =============================================================================
// Driver Defaults
// =============================================================================

/// Pause between moves when replaying a script, in milliseconds.
pub const REPLAY_DELAY_MS: u64 = 750;

/// Default seed for the self-play demo.
pub const DEMO_SEED: u64 = 1;

/// Ply limit for a self-play game (kings can shuffle forever).
pub const MAX_PLIES: usize = 400;
