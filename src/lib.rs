//! dlgo: Go rules engine and a Monte Carlo Tree Search player.
//!
//! The rules engine keeps an immutable history of positions with incremental
//! Zobrist hashing, so capture, self-capture and positional superko are all
//! decided exactly. The MCTS agent picks moves from random rollouts.
//!
//! ## Modules
//!
//! - [`types`] - Players and points
//! - [`zobrist`] - Per-stone hash codes
//! - [`board`] - Stone strings, placement and capture
//! - [`game`] - Moves, game history and move legality
//! - [`agent`] - The `Agent` trait and the random bot
//! - [`playout`] - Random rollouts and outcome judging
//! - [`mcts`] - Monte Carlo Tree Search
//! - [`coords`] - Coordinate parsing and printing
//! - [`config`], [`constants`] - Engine parameters
//!
//! ## Example
//!
//! ```
//! use dlgo::agent::Agent;
//! use dlgo::config::MctsConfig;
//! use dlgo::coords::parse_point;
//! use dlgo::game::{GameState, Move};
//! use dlgo::mcts::MctsAgent;
//!
//! // Create a new game and play a move
//! let game = GameState::new_square(5);
//! let game = game.apply_move(Move::play(parse_point("C3").unwrap()));
//!
//! // Ask MCTS for the reply
//! let mut bot = MctsAgent::with_seed(MctsConfig::with_simulations(50), 1);
//! let reply = bot.select_move(&game);
//! assert!(game.is_valid_move(reply));
//! ```

pub mod agent;
pub mod board;
pub mod config;
pub mod constants;
pub mod coords;
pub mod error;
pub mod game;
pub mod mcts;
pub mod playout;
pub mod types;
pub mod zobrist;
