//! Players and board points.

use std::fmt;

/// One of the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// The opponent.
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Dense index, for per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::Black => 0,
            Player::White => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "black"),
            Player::White => write!(f, "white"),
        }
    }
}

/// A grid point. Rows and columns are 1-based; row 1 is the bottom edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The 4 orthogonal neighbors (S, N, W, E). May lie off the grid.
    ///
    /// Only valid for points with `row >= 1` and `col >= 1`.
    #[inline]
    pub fn neighbors(self) -> [Point; 4] {
        [
            Point::new(self.row - 1, self.col),
            Point::new(self.row + 1, self.col),
            Point::new(self.row, self.col - 1),
            Point::new(self.row, self.col + 1),
        ]
    }

    /// The 4 diagonal neighbors. May lie off the grid.
    #[inline]
    pub fn diagonals(self) -> [Point; 4] {
        [
            Point::new(self.row - 1, self.col - 1),
            Point::new(self.row - 1, self.col + 1),
            Point::new(self.row + 1, self.col - 1),
            Point::new(self.row + 1, self.col + 1),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_is_involution() {
        assert_eq!(Player::Black.other(), Player::White);
        assert_eq!(Player::White.other(), Player::Black);
        assert_eq!(Player::Black.other().other(), Player::Black);
    }

    #[test]
    fn test_neighbors() {
        let p = Point::new(3, 3);
        let n = p.neighbors();
        assert!(n.contains(&Point::new(2, 3)));
        assert!(n.contains(&Point::new(4, 3)));
        assert!(n.contains(&Point::new(3, 2)));
        assert!(n.contains(&Point::new(3, 4)));
    }

    #[test]
    fn test_edge_neighbors_include_row_zero() {
        // Off-grid neighbors are filtered by the board, not here.
        let n = Point::new(1, 1).neighbors();
        assert!(n.contains(&Point::new(0, 1)));
        assert!(n.contains(&Point::new(1, 0)));
    }
}
