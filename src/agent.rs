//! Move-selecting agents.

use crate::game::{GameState, Move};
use crate::types::Point;

/// Anything that can pick a move for the side to move.
pub trait Agent {
    fn select_move(&mut self, state: &GameState) -> Move;
}

/// Plays a uniformly random valid move that does not fill one of its own
/// eyes; passes when there is none. Never resigns.
pub struct RandomBot {
    rng: fastrand::Rng,
}

impl Default for RandomBot {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomBot {
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn with_rng(rng: fastrand::Rng) -> Self {
        Self { rng }
    }
}

impl Agent for RandomBot {
    fn select_move(&mut self, state: &GameState) -> Move {
        let board = state.board();
        let player = state.next_player();
        let mut candidates: Vec<Point> = board
            .points()
            .filter(|&p| board.get(p).is_none() && !board.is_eye(p, player))
            .collect();

        // The first valid point of a random permutation is uniform over the
        // valid points, and usually avoids testing most of them.
        self.rng.shuffle(&mut candidates);
        candidates
            .into_iter()
            .map(Move::Play)
            .find(|&mv| state.is_valid_move(mv))
            .unwrap_or(Move::Pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Player;

    #[test]
    fn test_random_bot_plays_valid_moves() {
        let mut bot = RandomBot::with_seed(7);
        let mut game = GameState::new_square(5);
        for _ in 0..20 {
            let mv = bot.select_move(&game);
            assert!(game.is_valid_move(mv), "{mv:?} is not valid");
            assert!(!mv.is_resign());
            game = game.apply_move(mv);
        }
    }

    #[test]
    fn test_random_bot_passes_on_full_board_of_eyes() {
        // Black owns the whole 3x3 board except two separate eyes.
        let mut game = GameState::new_square(3);
        for point in [
            Point::new(1, 2),
            Point::new(2, 1),
            Point::new(2, 2),
            Point::new(2, 3),
            Point::new(3, 2),
            Point::new(1, 3),
            Point::new(3, 1),
        ] {
            game = game.apply_move(Move::play(point)).apply_move(Move::Pass);
        }
        assert_eq!(game.next_player(), Player::Black);
        let mut bot = RandomBot::with_seed(1);
        assert_eq!(bot.select_move(&game), Move::Pass);
    }

    #[test]
    fn test_same_seed_same_moves() {
        let game = GameState::new_square(9);
        let mut a = RandomBot::with_seed(99);
        let mut b = RandomBot::with_seed(99);
        for _ in 0..5 {
            assert_eq!(a.select_move(&game), b.select_move(&game));
        }
    }
}
