//! MCTS configuration parameters.

use crate::constants::{MAX_GAME_LEN_FACTOR, N_SIMS, TEMPERATURE};

/// Parameters controlling [`crate::mcts::MctsAgent`].
#[derive(Clone, Debug, PartialEq)]
pub struct MctsConfig {
    /// Number of simulations per search.
    pub num_simulations: usize,

    /// UCT exploration weight. 0 means pure exploitation.
    pub temperature: f64,

    /// Rollout move cap, in moves per board point.
    pub max_rollout_moves_factor: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: N_SIMS,
            temperature: TEMPERATURE,
            max_rollout_moves_factor: MAX_GAME_LEN_FACTOR,
        }
    }
}

impl MctsConfig {
    /// Create a config with the specified number of simulations.
    pub fn with_simulations(num_simulations: usize) -> Self {
        Self {
            num_simulations,
            ..Default::default()
        }
    }

    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn max_rollout_moves_factor(mut self, factor: usize) -> Self {
        self.max_rollout_moves_factor = factor;
        self
    }

    /// Move cap for a rollout on a board of the given dimensions.
    pub fn max_rollout_moves(&self, num_rows: usize, num_cols: usize) -> usize {
        (num_rows * num_cols * self.max_rollout_moves_factor).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_simulations_keeps_defaults() {
        let config = MctsConfig::with_simulations(42);
        assert_eq!(config.num_simulations, 42);
        assert_eq!(config.temperature, TEMPERATURE);
    }

    #[test]
    fn test_max_rollout_moves() {
        let config = MctsConfig::default().max_rollout_moves_factor(2);
        assert_eq!(config.max_rollout_moves(5, 5), 50);
        assert_eq!(config.max_rollout_moves(9, 9), 162);
    }
}
