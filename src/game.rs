//! Moves and the game history.
//!
//! A [`GameState`] is a cheap handle to an immutable history node. Each
//! applied move produces a new node pointing back at its predecessor; nodes
//! are never mutated after construction, so any number of handles to earlier
//! states can be held at once (the search tree relies on this).

use std::collections::HashSet;
use std::rc::Rc;

use crate::board::Board;
use crate::error::{GoError, Result};
use crate::types::{Player, Point};

/// A single turn action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Play(Point),
    Pass,
    Resign,
}

impl Move {
    #[inline]
    pub fn play(point: Point) -> Self {
        Move::Play(point)
    }

    #[inline]
    pub fn is_play(&self) -> bool {
        matches!(self, Move::Play(_))
    }

    #[inline]
    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    #[inline]
    pub fn is_resign(&self) -> bool {
        matches!(self, Move::Resign)
    }

    /// The target point of a play move.
    pub fn point(&self) -> Option<Point> {
        match self {
            Move::Play(point) => Some(*point),
            Move::Pass | Move::Resign => None,
        }
    }
}

/// (player to move, board hash) — the unit of positional superko.
pub type Situation = (Player, u64);

struct StateNode {
    board: Board,
    next_player: Player,
    last_move: Option<Move>,
    previous: Option<GameState>,
    /// Situations of every state in this chain, this one included.
    previous_states: HashSet<Situation>,
}

/// One position in a game together with its history.
#[derive(Clone)]
pub struct GameState {
    node: Rc<StateNode>,
}

impl GameState {
    fn from_parts(
        board: Board,
        next_player: Player,
        previous: Option<GameState>,
        last_move: Option<Move>,
    ) -> Self {
        let mut previous_states = previous
            .as_ref()
            .map(|p| p.node.previous_states.clone())
            .unwrap_or_default();
        previous_states.insert((next_player, board.zobrist_hash()));
        Self {
            node: Rc::new(StateNode {
                board,
                next_player,
                last_move,
                previous,
                previous_states,
            }),
        }
    }

    /// Empty `num_rows` x `num_cols` board with Black to move.
    pub fn new_game(num_rows: usize, num_cols: usize) -> Self {
        Self::from_parts(Board::new(num_rows, num_cols), Player::Black, None, None)
    }

    /// Empty `size` x `size` board with Black to move.
    pub fn new_square(size: usize) -> Self {
        Self::new_game(size, size)
    }

    pub fn board(&self) -> &Board {
        &self.node.board
    }

    pub fn next_player(&self) -> Player {
        self.node.next_player
    }

    pub fn last_move(&self) -> Option<Move> {
        self.node.last_move
    }

    pub fn previous_state(&self) -> Option<&GameState> {
        self.node.previous.as_ref()
    }

    /// The (player to move, board hash) pair of this state.
    pub fn situation(&self) -> Situation {
        (self.node.next_player, self.node.board.zobrist_hash())
    }

    /// Whether `situation` occurred anywhere in this game so far.
    pub fn has_seen(&self, situation: Situation) -> bool {
        self.node.previous_states.contains(&situation)
    }

    /// Play `mv` for the side to move.
    ///
    /// Does not check legality; play moves on occupied or off-grid points
    /// panic inside [`Board::place_stone`].
    pub fn apply_move(&self, mv: Move) -> GameState {
        let next_board = match mv {
            Move::Play(point) => {
                let mut board = self.node.board.clone();
                board.place_stone(self.node.next_player, point);
                board
            }
            Move::Pass | Move::Resign => self.node.board.clone(),
        };
        Self::from_parts(
            next_board,
            self.node.next_player.other(),
            Some(self.clone()),
            Some(mv),
        )
    }

    /// Checked variant of [`GameState::apply_move`].
    pub fn try_apply_move(&self, mv: Move) -> Result<GameState> {
        if self.is_over() {
            return Err(GoError::GameOver);
        }
        if let Move::Play(point) = mv {
            let board = self.board();
            if !board.is_on_grid(point) {
                return Err(GoError::OffBoard(point, board.num_rows(), board.num_cols()));
            }
        }
        if !self.is_valid_move(mv) {
            return Err(GoError::IllegalMove(mv));
        }
        Ok(self.apply_move(mv))
    }

    /// Board after `player` plays at `point`, leaving this state untouched.
    fn speculate(&self, player: Player, point: Point) -> Board {
        let mut next_board = self.node.board.clone();
        next_board.place_stone(player, point);
        next_board
    }

    /// Whether `mv` would leave the placed stone's string without liberties.
    pub fn is_move_self_capture(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        Self::leaves_no_liberties(&self.speculate(player, point), point)
    }

    /// Whether `mv` would recreate an earlier (player to move, board) pair.
    pub fn move_violate_ko(&self, player: Player, mv: Move) -> bool {
        let Move::Play(point) = mv else {
            return false;
        };
        let next_board = self.speculate(player, point);
        self.has_seen((player.other(), next_board.zobrist_hash()))
    }

    fn leaves_no_liberties(board: &Board, point: Point) -> bool {
        board
            .get_go_string(point)
            .is_none_or(|string| string.num_liberties() == 0)
    }

    /// Whether the side to move may play `mv` here.
    pub fn is_valid_move(&self, mv: Move) -> bool {
        if self.is_over() {
            return false;
        }
        let point = match mv {
            Move::Pass | Move::Resign => return true,
            Move::Play(point) => point,
        };
        let board = self.board();
        if !board.is_on_grid(point) || board.get(point).is_some() {
            return false;
        }

        // Self-capture and superko share one speculative placement.
        let player = self.next_player();
        let next_board = self.speculate(player, point);
        if Self::leaves_no_liberties(&next_board, point) {
            return false;
        }
        !self.has_seen((player.other(), next_board.zobrist_hash()))
    }

    /// Game ends on a resignation or on two passes in a row.
    pub fn is_over(&self) -> bool {
        let Some(last_move) = self.node.last_move else {
            return false;
        };
        match last_move {
            Move::Resign => true,
            Move::Pass => self
                .previous_state()
                .and_then(GameState::last_move)
                .is_some_and(|m| m.is_pass()),
            Move::Play(_) => false,
        }
    }

    /// The player who won by resignation, if the last move resigned.
    pub fn winner(&self) -> Option<Player> {
        match self.node.last_move {
            Some(Move::Resign) => Some(self.node.next_player),
            _ => None,
        }
    }

    /// All valid plays in board order, then pass and resign.
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        let mut moves: Vec<Move> = self
            .board()
            .points()
            .map(Move::Play)
            .filter(|&mv| self.is_valid_move(mv))
            .collect();
        moves.push(Move::Pass);
        moves.push(Move::Resign);
        moves
    }

    /// Number of moves played since the empty board.
    pub fn move_number(&self) -> usize {
        let mut n = 0;
        let mut state = self;
        while let Some(previous) = state.previous_state() {
            n += 1;
            state = previous;
        }
        n
    }
}

impl Drop for StateNode {
    // Unlink long histories iteratively so a deep chain cannot overflow the
    // stack when its last handle goes away.
    fn drop(&mut self) {
        let mut previous = self.previous.take();
        while let Some(state) = previous {
            match Rc::try_unwrap(state.node) {
                Ok(mut node) => previous = node.previous.take(),
                Err(_) => break,
            }
        }
    }
}
