//! Canonical chess-rule constants.
//!
//! Starting position and the thresholds used by draw detection.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-move clock value at which the fifty-move draw applies.
pub const FIFTY_MOVE_HALFMOVE_LIMIT: u16 = 100;

/// Number of occurrences of one position that draws by repetition.
pub const REPETITION_DRAW_COUNT: usize = 3;

/// Upper bound on pieces a single side may have on the board.
pub const MAX_PIECES_PER_SIDE: u32 = 16;
