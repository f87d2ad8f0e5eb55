//! Engine defaults.
//!
//! Board size is a runtime parameter; the values here only seed the CLI and
//! [`crate::config::MctsConfig::default`].

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN) used by the driver.
pub const DEFAULT_BOARD_SIZE: usize = 9;

/// Largest side length the coordinate format can address (A..T without I).
pub const MAX_BOARD_SIZE: usize = 19;

/// Column letters, skipping 'I' (Go convention to avoid confusion with 'J').
pub const COLS: &str = "ABCDEFGHJKLMNOPQRST";

// =============================================================================
// MCTS Parameters
// =============================================================================

/// Default number of simulations per move.
pub const N_SIMS: usize = 500;

/// Default UCT exploration weight.
pub const TEMPERATURE: f64 = 1.5;

/// Rollouts are cut off after this many moves per board point.
/// Matches the usual 3x-area bound on game length.
pub const MAX_GAME_LEN_FACTOR: usize = 3;

// =============================================================================
// Hashing
// =============================================================================

/// Seed mixed into every Zobrist code.
pub const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;
