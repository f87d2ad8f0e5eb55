//! Zobrist codes for incremental position hashing.
//!
//! Codes are derived on demand from `(point, player)` by seeding a wyrand
//! generator with the packed key, so any board size is covered without a
//! precomputed table and the codes are identical for every board in the
//! process.

use crate::constants::ZOBRIST_SEED;
use crate::types::{Player, Point};

/// Hash of a board with no stones.
pub const EMPTY_BOARD: u64 = 0;

/// The 64-bit code for a stone of `player` on `point`.
#[inline]
pub fn hash_code(point: Point, player: Player) -> u64 {
    let key = ((point.row as u64) << 33) | ((point.col as u64) << 1) | player.index() as u64;
    fastrand::Rng::with_seed(ZOBRIST_SEED ^ key).u64(..)
}
