//! Monte Carlo playouts (random game simulation).
//!
//! A playout plays moves from a policy agent until the game ends or a move
//! cap is reached, then decides the winner. Resignations decide themselves;
//! every other ending is handed to an [`OutcomeJudge`].

use log::warn;

use crate::agent::Agent;
use crate::game::GameState;
use crate::types::Player;

/// Decides the winner of a finished (or abandoned) game that did not end
/// by resignation.
pub trait OutcomeJudge {
    fn winner(&self, state: &GameState) -> Player;
}

/// Counts stones on the board. Ties go to White.
///
/// No territory or komi; only meant to give rollouts a definite result.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoneCountJudge;

impl OutcomeJudge for StoneCountJudge {
    fn winner(&self, state: &GameState) -> Player {
        let board = state.board();
        if board.count_stones(Player::Black) > board.count_stones(Player::White) {
            Player::Black
        } else {
            Player::White
        }
    }
}

/// Winner of a terminal or abandoned `state`.
pub fn decide_winner(state: &GameState, judge: &dyn OutcomeJudge) -> Player {
    state.winner().unwrap_or_else(|| judge.winner(state))
}

/// Play `policy` for both sides from `state` until the game is over or
/// `max_moves` moves have been made, and return the winner.
pub fn simulate_random_game(
    state: &GameState,
    policy: &mut dyn Agent,
    judge: &dyn OutcomeJudge,
    max_moves: usize,
) -> Player {
    let mut game = state.clone();
    let mut moves = 0;

    while !game.is_over() {
        if moves >= max_moves {
            warn!("rollout abandoned after {moves} moves");
            break;
        }
        let mv = policy.select_move(&game);
        game = game.apply_move(mv);
        moves += 1;
    }

    decide_winner(&game, judge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RandomBot;
    use crate::game::Move;
    use crate::types::Point;

    #[test]
    fn test_stone_count_judge() {
        let game = GameState::new_square(5);
        assert_eq!(StoneCountJudge.winner(&game), Player::White);

        let game = game.apply_move(Move::play(Point::new(3, 3)));
        assert_eq!(StoneCountJudge.winner(&game), Player::Black);
    }

    #[test]
    fn test_resignation_beats_judge() {
        let game = GameState::new_square(5)
            .apply_move(Move::play(Point::new(3, 3)))
            .apply_move(Move::Pass)
            .apply_move(Move::Resign);
        // Black resigned with more stones on the board.
        assert_eq!(decide_winner(&game, &StoneCountJudge), Player::White);
    }

    #[test]
    fn test_rollout_from_terminal_state() {
        let game = GameState::new_square(5)
            .apply_move(Move::play(Point::new(1, 1)))
            .apply_move(Move::Pass)
            .apply_move(Move::Pass);
        let mut policy = RandomBot::with_seed(3);
        let winner = simulate_random_game(&game, &mut policy, &StoneCountJudge, 100);
        assert_eq!(winner, Player::Black);
    }

    #[test]
    fn test_rollout_terminates() {
        let game = GameState::new_square(5);
        let mut policy = RandomBot::with_seed(11);
        for _ in 0..10 {
            simulate_random_game(&game, &mut policy, &StoneCountJudge, 75);
        }
    }

    #[test]
    fn test_rollout_respects_cap() {
        let game = GameState::new_square(9);
        let mut policy = RandomBot::with_seed(5);
        // One move: Black has a stone, White none.
        let winner = simulate_random_game(&game, &mut policy, &StoneCountJudge, 1);
        assert_eq!(winner, Player::Black);
    }
}
