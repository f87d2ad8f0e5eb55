//! Monte Carlo Tree Search with UCT selection and random rollouts.
//!
//! Each search builds a fresh tree rooted at the current position. Nodes live
//! in an arena ([`SearchTree`]) and refer to each other by [`NodeId`], so
//! parent links need no shared ownership. A simulation:
//!
//! 1. descends from the root while the current node is fully expanded and not
//!    terminal, picking the child with the best UCT score;
//! 2. expands one random unvisited move of the node it stopped at;
//! 3. plays a random rollout from the new node to the end of the game;
//! 4. records the winner on every node from the new node up to the root.
//!
//! The move played is the root child with the best win fraction for the
//! side to move.

use log::{debug, trace};

use crate::agent::{Agent, RandomBot};
use crate::config::MctsConfig;
use crate::game::{GameState, Move};
use crate::playout::{OutcomeJudge, StoneCountJudge, simulate_random_game};
use crate::types::Player;

/// Index of a node in a [`SearchTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the search tree: one explored game state and its statistics.
pub struct MctsNode {
    /// The game position at this node
    pub game_state: GameState,
    /// Parent node (None for the root)
    pub parent: Option<NodeId>,
    /// Move that led here from the parent (None for the root)
    pub mv: Option<Move>,
    /// Rollouts won, indexed by [`Player::index`]
    win_counts: [u32; 2],
    /// Number of rollouts through this node
    pub num_rollouts: u32,
    /// Expanded children, in expansion order
    pub children: Vec<NodeId>,
    /// Legal moves not yet expanded into children
    unvisited_moves: Vec<Move>,
}

impl MctsNode {
    fn new(game_state: GameState, parent: Option<NodeId>, mv: Option<Move>) -> Self {
        let unvisited_moves = game_state.legal_moves();
        Self {
            game_state,
            parent,
            mv,
            win_counts: [0; 2],
            num_rollouts: 0,
            children: Vec::new(),
            unvisited_moves,
        }
    }

    pub fn record_win(&mut self, winner: Player) {
        self.num_rollouts += 1;
        self.win_counts[winner.index()] += 1;
    }

    pub fn win_count(&self, player: Player) -> u32 {
        self.win_counts[player.index()]
    }

    #[inline]
    pub fn can_add_child(&self) -> bool {
        !self.unvisited_moves.is_empty()
    }

    pub fn unvisited_moves(&self) -> &[Move] {
        &self.unvisited_moves
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.game_state.is_over()
    }

    /// Fraction of rollouts won by `player`; 0 for an unvisited node.
    pub fn winning_fraction(&self, player: Player) -> f64 {
        if self.num_rollouts == 0 {
            return 0.0;
        }
        self.win_count(player) as f64 / self.num_rollouts as f64
    }
}

/// Arena holding every node of one search.
pub struct SearchTree {
    nodes: Vec<MctsNode>,
}

impl SearchTree {
    pub fn new(root_state: GameState) -> Self {
        Self {
            nodes: vec![MctsNode::new(root_state, None, None)],
        }
    }

    /// # Panics
    /// Panics if the id does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0]
    }

    pub fn root(&self) -> &MctsNode {
        self.get(NodeId::ROOT)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Expand one unvisited move of `id`, chosen uniformly at random, and
    /// return the new child.
    ///
    /// # Panics
    /// Panics if the node has no unvisited moves.
    pub fn add_random_child(&mut self, id: NodeId, rng: &mut fastrand::Rng) -> NodeId {
        let node = self.get_mut(id);
        assert!(node.can_add_child(), "node has no unvisited moves");
        let i = rng.usize(..node.unvisited_moves.len());
        let mv = node.unvisited_moves.swap_remove(i);
        let next_state = node.game_state.apply_move(mv);

        let child_id = NodeId(self.nodes.len());
        self.nodes.push(MctsNode::new(next_state, Some(id), Some(mv)));
        self.get_mut(id).children.push(child_id);
        child_id
    }

    /// The child of `id` with the highest UCT score, scored from the point
    /// of view of the player to move at `id`. Ties go to the earliest child.
    pub fn select_child(&self, id: NodeId, temperature: f64) -> Option<NodeId> {
        let node = self.get(id);
        let player = node.game_state.next_player();
        let total_rollouts: u32 = node
            .children
            .iter()
            .map(|&c| self.get(c).num_rollouts)
            .sum();

        let mut best_score = f64::NEG_INFINITY;
        let mut best_child = None;
        for &child_id in &node.children {
            let child = self.get(child_id);
            let score = uct_score(
                total_rollouts,
                child.num_rollouts,
                child.winning_fraction(player),
                temperature,
            );
            if best_child.is_none() || score > best_score {
                best_score = score;
                best_child = Some(child_id);
            }
        }
        best_child
    }

    /// Walk down from the root through fully expanded, non-terminal nodes.
    fn descend(&self, temperature: f64) -> NodeId {
        let mut id = NodeId::ROOT;
        loop {
            let node = self.get(id);
            if node.can_add_child() || node.is_terminal() {
                return id;
            }
            match self.select_child(id, temperature) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    /// Record `winner` on `from` and all of its ancestors.
    pub fn backpropagate(&mut self, from: NodeId, winner: Player) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.record_win(winner);
            current = node.parent;
        }
    }

    /// The root child with the best win fraction for the side to move at
    /// the root. Ties go to the earliest child.
    pub fn best_child(&self) -> Option<NodeId> {
        let root = self.root();
        let player = root.game_state.next_player();
        let mut best_pct = f64::NEG_INFINITY;
        let mut best = None;
        for &child_id in &root.children {
            let pct = self.get(child_id).winning_fraction(player);
            if pct > best_pct {
                best_pct = pct;
                best = Some(child_id);
            }
        }
        best
    }
}

/// UCT score: exploitation term plus `temperature`-weighted exploration.
///
/// A child with no rollouts scores +inf so every child is tried once before
/// any is revisited.
pub fn uct_score(parent_rollouts: u32, child_rollouts: u32, win_pct: f64, temperature: f64) -> f64 {
    if child_rollouts == 0 {
        return f64::INFINITY;
    }
    let exploration = ((parent_rollouts as f64).ln() / child_rollouts as f64).sqrt();
    win_pct + temperature * exploration
}

/// Statistics for one root child after a search.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildStats {
    pub mv: Move,
    pub num_rollouts: u32,
    pub win_fraction: f64,
}

/// Outcome of [`MctsAgent::search`].
#[derive(Clone, Debug)]
pub struct SearchReport {
    /// Chosen move (pass when the root had no children)
    pub best_move: Move,
    /// Rollouts recorded at the root
    pub root_rollouts: u32,
    /// Root children in expansion order
    pub children: Vec<ChildStats>,
    /// Total nodes created
    pub tree_size: usize,
}

impl SearchReport {
    pub fn child(&self, mv: Move) -> Option<&ChildStats> {
        self.children.iter().find(|c| c.mv == mv)
    }
}

/// Agent choosing moves by MCTS with random rollouts.
pub struct MctsAgent {
    config: MctsConfig,
    rng: fastrand::Rng,
    judge: Box<dyn OutcomeJudge>,
}

impl MctsAgent {
    pub fn new(config: MctsConfig) -> Self {
        Self::with_rng(config, fastrand::Rng::new())
    }

    /// Deterministic agent: same seed and position give the same search.
    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        Self::with_rng(config, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(config: MctsConfig, rng: fastrand::Rng) -> Self {
        Self {
            config,
            rng,
            judge: Box::new(StoneCountJudge),
        }
    }

    /// Replace the rule deciding non-resignation game endings.
    pub fn with_judge(mut self, judge: impl OutcomeJudge + 'static) -> Self {
        self.judge = Box::new(judge);
        self
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run `num_simulations` simulations from `state` and report the root
    /// statistics. The tree is dropped before returning.
    pub fn search(&mut self, state: &GameState) -> SearchReport {
        let mut tree = SearchTree::new(state.clone());
        let mut policy = RandomBot::with_rng(self.rng.fork());
        let board = state.board();
        let max_moves = self
            .config
            .max_rollout_moves(board.num_rows(), board.num_cols());

        for i in 0..self.config.num_simulations {
            let mut node = tree.descend(self.config.temperature);

            if tree.get(node).can_add_child() {
                node = tree.add_random_child(node, &mut self.rng);
            }

            let winner = simulate_random_game(
                &tree.get(node).game_state,
                &mut policy,
                self.judge.as_ref(),
                max_moves,
            );
            trace!("simulation {i}: {winner} wins");

            tree.backpropagate(node, winner);
        }

        let player = state.next_player();
        let best_move = tree
            .best_child()
            .and_then(|id| tree.get(id).mv)
            .unwrap_or(Move::Pass);
        let children: Vec<ChildStats> = tree
            .root()
            .children
            .iter()
            .filter_map(|&id| {
                let child = tree.get(id);
                child.mv.map(|mv| ChildStats {
                    mv,
                    num_rollouts: child.num_rollouts,
                    win_fraction: child.winning_fraction(player),
                })
            })
            .collect();

        debug!(
            "search done: {} simulations, {} nodes, {} root children, best {:?}",
            self.config.num_simulations,
            tree.len(),
            children.len(),
            best_move
        );

        SearchReport {
            best_move,
            root_rollouts: tree.root().num_rollouts,
            children,
            tree_size: tree.len(),
        }
    }
}

impl Agent for MctsAgent {
    fn select_move(&mut self, state: &GameState) -> Move {
        self.search(state).best_move
    }
}
