//! Stone groups and the board grid.
//!
//! Every point holds a shared handle to the [`GoString`] covering it. Strings
//! are immutable values: any change to a group's stones or liberties builds a
//! new string and reinstalls it on all of its points, so cloning a board only
//! copies handles and earlier snapshots stay untouched.

use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::constants::COLS;
use crate::types::{Player, Point};
use crate::zobrist;

/// A maximal group of connected same-colored stones and its liberties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoString {
    color: Player,
    stones: HashSet<Point>,
    liberties: HashSet<Point>,
}

impl GoString {
    pub fn new(
        color: Player,
        stones: impl IntoIterator<Item = Point>,
        liberties: impl IntoIterator<Item = Point>,
    ) -> Self {
        Self {
            color,
            stones: stones.into_iter().collect(),
            liberties: liberties.into_iter().collect(),
        }
    }

    #[inline]
    pub fn color(&self) -> Player {
        self.color
    }

    pub fn stones(&self) -> &HashSet<Point> {
        &self.stones
    }

    pub fn liberties(&self) -> &HashSet<Point> {
        &self.liberties
    }

    #[inline]
    pub fn num_liberties(&self) -> usize {
        self.liberties.len()
    }

    pub fn without_liberty(&self, point: Point) -> GoString {
        let mut liberties = self.liberties.clone();
        liberties.remove(&point);
        Self {
            color: self.color,
            stones: self.stones.clone(),
            liberties,
        }
    }

    pub fn with_liberty(&self, point: Point) -> GoString {
        let mut liberties = self.liberties.clone();
        liberties.insert(point);
        Self {
            color: self.color,
            stones: self.stones.clone(),
            liberties,
        }
    }

    /// Union of two same-colored strings.
    ///
    /// # Panics
    /// Panics if the colors differ.
    pub fn merged_with(&self, other: &GoString) -> GoString {
        assert_eq!(
            self.color, other.color,
            "cannot merge strings of different colors"
        );
        let stones: HashSet<Point> = self.stones.union(&other.stones).copied().collect();
        let liberties = self
            .liberties
            .union(&other.liberties)
            .filter(|p| !stones.contains(p))
            .copied()
            .collect();
        Self {
            color: self.color,
            stones,
            liberties,
        }
    }
}

/// A rows x cols Go board with a running Zobrist hash.
#[derive(Clone, Debug)]
pub struct Board {
    num_rows: usize,
    num_cols: usize,
    grid: Vec<Option<Rc<GoString>>>,
    hash: u64,
}

impl Board {
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(num_rows: usize, num_cols: usize) -> Self {
        assert!(num_rows > 0 && num_cols > 0, "board dimensions must be positive");
        Self {
            num_rows,
            num_cols,
            grid: vec![None; num_rows * num_cols],
            hash: zobrist::EMPTY_BOARD,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Current Zobrist hash of the stones on the board.
    #[inline]
    pub fn zobrist_hash(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn is_on_grid(&self, point: Point) -> bool {
        (1..=self.num_rows).contains(&point.row) && (1..=self.num_cols).contains(&point.col)
    }

    #[inline]
    fn idx(&self, point: Point) -> usize {
        (point.row - 1) * self.num_cols + (point.col - 1)
    }

    /// Stone color at `point`, or `None` if empty or off the grid.
    pub fn get(&self, point: Point) -> Option<Player> {
        self.get_go_string(point).map(GoString::color)
    }

    /// The string covering `point`, or `None` if empty or off the grid.
    pub fn get_go_string(&self, point: Point) -> Option<&GoString> {
        if !self.is_on_grid(point) {
            return None;
        }
        self.grid[self.idx(point)].as_deref()
    }

    /// All on-grid points, row by row from the bottom.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (1..=self.num_rows).flat_map(move |row| (1..=self.num_cols).map(move |col| Point::new(row, col)))
    }

    /// Number of stones of `player` on the board.
    pub fn count_stones(&self, player: Player) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|s| s.color == player)
            .count()
    }

    /// Place a stone and resolve captures.
    ///
    /// # Panics
    /// Panics if `point` is off the grid or occupied. Callers validate moves
    /// through [`crate::game::GameState::is_valid_move`] first.
    pub fn place_stone(&mut self, player: Player, point: Point) {
        assert!(self.is_on_grid(point), "point {point} is off the board");
        assert!(
            self.grid[self.idx(point)].is_none(),
            "point {point} is occupied"
        );

        let mut adjacent_same_color: Vec<Rc<GoString>> = Vec::with_capacity(4);
        let mut adjacent_opposite_color: Vec<Rc<GoString>> = Vec::with_capacity(4);
        let mut liberties = Vec::with_capacity(4);

        for neighbor in point.neighbors() {
            if !self.is_on_grid(neighbor) {
                continue;
            }
            match &self.grid[self.idx(neighbor)] {
                None => liberties.push(neighbor),
                Some(string) if string.color == player => {
                    push_unique(&mut adjacent_same_color, string)
                }
                Some(string) => push_unique(&mut adjacent_opposite_color, string),
            }
        }

        let mut new_string = GoString::new(player, [point], liberties);
        for same_color_string in &adjacent_same_color {
            new_string = new_string.merged_with(same_color_string);
        }
        self.replace_string(new_string);

        self.hash ^= zobrist::hash_code(point, player);

        for other_color_string in &adjacent_opposite_color {
            let updated = other_color_string.without_liberty(point);
            if updated.num_liberties() == 0 {
                self.remove_string(other_color_string);
            } else {
                self.replace_string(updated);
            }
        }
    }

    /// Install `string` on every point it covers.
    fn replace_string(&mut self, string: GoString) {
        let string = Rc::new(string);
        for &point in &string.stones {
            let i = self.idx(point);
            self.grid[i] = Some(Rc::clone(&string));
        }
    }

    /// Take a captured string off the board, returning its points as
    /// liberties to the surrounding strings.
    fn remove_string(&mut self, string: &Rc<GoString>) {
        for &point in &string.stones {
            for neighbor in point.neighbors() {
                if !self.is_on_grid(neighbor) {
                    continue;
                }
                if let Some(neighbor_string) = self.grid[self.idx(neighbor)].clone() {
                    if !Rc::ptr_eq(&neighbor_string, string) {
                        self.replace_string(neighbor_string.with_liberty(point));
                    }
                }
            }
            let i = self.idx(point);
            self.grid[i] = None;
            self.hash ^= zobrist::hash_code(point, string.color);
        }
    }

    /// Check if `point` is a true eye for `color`.
    ///
    /// The point must be empty with every on-grid neighbor owned by `color`.
    /// On the edge every on-grid diagonal must be friendly too; in the
    /// interior one hostile or empty diagonal is tolerated.
    pub fn is_eye(&self, point: Point, color: Player) -> bool {
        if !self.is_on_grid(point) || self.get(point).is_some() {
            return false;
        }
        for neighbor in point.neighbors() {
            if self.is_on_grid(neighbor) && self.get(neighbor) != Some(color) {
                return false;
            }
        }

        let mut friendly_corners = 0;
        let mut off_board_corners = 0;
        for corner in point.diagonals() {
            if self.is_on_grid(corner) {
                if self.get(corner) == Some(color) {
                    friendly_corners += 1;
                }
            } else {
                off_board_corners += 1;
            }
        }

        if off_board_corners > 0 {
            off_board_corners + friendly_corners == 4
        } else {
            friendly_corners >= 3
        }
    }
}

fn push_unique(strings: &mut Vec<Rc<GoString>>, string: &Rc<GoString>) {
    if !strings.iter().any(|s| Rc::ptr_eq(s, string)) {
        strings.push(Rc::clone(string));
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=self.num_rows).rev() {
            write!(f, "{row:>2} ")?;
            for col in 1..=self.num_cols {
                let ch = match self.get(Point::new(row, col)) {
                    Some(Player::Black) => 'x',
                    Some(Player::White) => 'o',
                    None => '.',
                };
                write!(f, " {ch} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "   ")?;
        for col in 0..self.num_cols {
            let letter = COLS.chars().nth(col).unwrap_or('?');
            write!(f, " {letter} ")?;
        }
        writeln!(f)
    }
}
