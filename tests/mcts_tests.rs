//! Integration tests for the MCTS agent.

use dlgo::agent::Agent;
use dlgo::config::MctsConfig;
use dlgo::game::{GameState, Move};
use dlgo::mcts::{MctsAgent, SearchReport};
use dlgo::playout::OutcomeJudge;
use dlgo::types::{Player, Point};

// =============================================================================
// Helper functions
// =============================================================================

/// Black has the only stone and White has just passed, so a Black pass ends
/// the game with Black ahead and a Black resignation ends it with Black lost.
fn black_after_white_pass() -> GameState {
    GameState::new_square(5)
        .apply_move(Move::play(Point::new(3, 3)))
        .apply_move(Move::Pass)
}

fn search(state: &GameState, sims: usize, seed: u64) -> SearchReport {
    MctsAgent::with_seed(MctsConfig::with_simulations(sims), seed).search(state)
}

// =============================================================================
// Search results
// =============================================================================

#[test]
fn test_dominant_move_statistics() {
    let state = black_after_white_pass();
    assert_eq!(state.next_player(), Player::Black);
    let report = search(&state, 300, 17);

    // 24 plays, pass and resign are all expanded.
    assert_eq!(report.children.len(), 26);
    let pass = report.child(Move::Pass).expect("pass is expanded");
    assert_eq!(pass.win_fraction, 1.0);
    let resign = report.child(Move::Resign).expect("resign is expanded");
    assert_eq!(resign.win_fraction, 0.0);

    let best = report.child(report.best_move).unwrap();
    let max = report
        .children
        .iter()
        .map(|c| c.win_fraction)
        .fold(f64::NEG_INFINITY, f64::max);
    assert_eq!(best.win_fraction, max);
    assert_eq!(best.win_fraction, 1.0);
    assert_ne!(report.best_move, Move::Resign);
}

#[test]
fn test_more_simulations_revisit_the_winning_move() {
    let state = black_after_white_pass();

    let mut short_total = 0;
    let mut long_total = 0;
    for seed in 0..5 {
        let short = search(&state, 40, seed);
        let long = search(&state, 400, seed);
        let short_pass = short.child(Move::Pass).map_or(0, |c| c.num_rollouts);
        let long_pass = long.child(Move::Pass).map_or(0, |c| c.num_rollouts);
        // Same seed: the long search begins with exactly the short one.
        assert!(long_pass >= short_pass, "seed {seed}: {long_pass} < {short_pass}");
        short_total += short_pass;
        long_total += long_pass;
    }
    assert!(long_total > short_total);
}

#[test]
fn test_same_seed_same_search() {
    let state = GameState::new_square(4).apply_move(Move::play(Point::new(2, 2)));
    let a = search(&state, 80, 123);
    let b = search(&state, 80, 123);
    assert_eq!(a.best_move, b.best_move);
    assert_eq!(a.children, b.children);
    assert_eq!(a.tree_size, b.tree_size);
}

#[test]
fn test_root_rollouts_equal_simulations() {
    let state = GameState::new_square(4);
    for sims in [1, 5, 50] {
        let report = search(&state, sims, 9);
        assert_eq!(report.root_rollouts as usize, sims);
        let child_total: u32 = report.children.iter().map(|c| c.num_rollouts).sum();
        assert_eq!(child_total as usize, sims);
        // Each simulation creates at most one node.
        assert!(report.tree_size <= sims + 1);
    }
}

#[test]
fn test_terminal_root_returns_pass() {
    let state = GameState::new_square(5)
        .apply_move(Move::play(Point::new(1, 1)))
        .apply_move(Move::Resign);
    let mut agent = MctsAgent::with_seed(MctsConfig::with_simulations(20), 5);
    assert_eq!(agent.select_move(&state), Move::Pass);
}

#[test]
fn test_custom_judge_is_used() {
    /// White wins every ending that is not a resignation.
    struct WhiteWins;

    impl OutcomeJudge for WhiteWins {
        fn winner(&self, _state: &GameState) -> Player {
            Player::White
        }
    }

    let state = GameState::new_square(5).apply_move(Move::play(Point::new(3, 3)));
    assert_eq!(state.next_player(), Player::White);

    // Few enough simulations that no root child is fully expanded, so no
    // White resignation appears below the root.
    let mut agent =
        MctsAgent::with_seed(MctsConfig::with_simulations(60), 8).with_judge(WhiteWins);
    let report = agent.search(&state);

    let resign = report.child(Move::Resign).unwrap();
    assert_eq!(resign.win_fraction, 0.0);
    for child in report.children.iter().filter(|c| c.mv != Move::Resign) {
        assert_eq!(child.win_fraction, 1.0, "{:?}", child.mv);
    }
    assert_ne!(report.best_move, Move::Resign);
}

#[test]
fn test_mcts_plays_valid_moves_through_a_game() {
    let mut agent = MctsAgent::with_seed(MctsConfig::with_simulations(30), 21);
    let mut game = GameState::new_square(3);
    for _ in 0..10 {
        if game.is_over() {
            break;
        }
        let mv = agent.select_move(&game);
        assert!(game.is_valid_move(mv), "{mv:?} is not valid");
        game = game.apply_move(mv);
    }
}
