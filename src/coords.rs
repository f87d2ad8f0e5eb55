//! Human-readable coordinates.
//!
//! Columns are letters A..T skipping 'I' (Go convention to avoid confusion
//! with 'J'); rows are numbers counted from the bottom edge, so "C3" is
//! row 3, column 3.

use crate::constants::COLS;
use crate::error::{GoError, Result};
use crate::game::Move;
use crate::types::{Player, Point};

/// Parse a coordinate string (e.g., "D4") into a Point.
pub fn parse_point(s: &str) -> Result<Point> {
    let s = s.trim();
    let invalid = || GoError::InvalidCoordinate(s.to_string());

    let mut chars = s.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();
    let col = COLS.find(letter).ok_or_else(invalid)? + 1;
    let row: usize = chars.as_str().parse().map_err(|_| invalid())?;
    if row == 0 {
        return Err(invalid());
    }
    Ok(Point::new(row, col))
}

/// Parse a coordinate, "pass" or "resign".
pub fn parse_move(s: &str) -> Result<Move> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("pass") {
        Ok(Move::Pass)
    } else if s.eq_ignore_ascii_case("resign") {
        Ok(Move::Resign)
    } else {
        parse_point(s).map(Move::Play)
    }
}

/// Convert a Point to a coordinate string (e.g., "D4").
pub fn format_point(point: Point) -> String {
    let letter = COLS.chars().nth(point.col.wrapping_sub(1)).unwrap_or('?');
    format!("{letter}{}", point.row)
}

/// Log line for a move, e.g. "black C3", "white passes".
pub fn format_move(player: Player, mv: Move) -> String {
    match mv {
        Move::Play(point) => format!("{player} {}", format_point(point)),
        Move::Pass => format!("{player} passes"),
        Move::Resign => format!("{player} resigns"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("C3"), Ok(Point::new(3, 3)));
        assert_eq!(parse_point("a1"), Ok(Point::new(1, 1)));
        assert_eq!(parse_point("T19"), Ok(Point::new(19, 19)));
    }

    #[test]
    fn test_parse_point_skips_i() {
        // H and J are adjacent columns.
        assert_eq!(parse_point("H5").unwrap().col, 8);
        assert_eq!(parse_point("J5").unwrap().col, 9);
        assert!(parse_point("I5").is_err());
    }

    #[test]
    fn test_parse_point_rejects_garbage() {
        for bad in ["", "3C", "C", "C0", "Cx", "Z9"] {
            assert_eq!(
                parse_point(bad),
                Err(GoError::InvalidCoordinate(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("pass"), Ok(Move::Pass));
        assert_eq!(parse_move("RESIGN"), Ok(Move::Resign));
        assert_eq!(parse_move(" d4 "), Ok(Move::Play(Point::new(4, 4))));
    }

    #[test]
    fn test_format_roundtrip() {
        for row in 1..=19 {
            for col in 1..=19 {
                let point = Point::new(row, col);
                assert_eq!(parse_point(&format_point(point)), Ok(point));
            }
        }
    }

    #[test]
    fn test_format_move() {
        assert_eq!(format_move(Player::Black, Move::play(Point::new(3, 3))), "black C3");
        assert_eq!(format_move(Player::White, Move::Pass), "white passes");
        assert_eq!(format_move(Player::Black, Move::Resign), "black resigns");
    }
}
