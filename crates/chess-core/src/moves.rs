//! Coordinate-pair move notation ("e2e4", "b7b8q").

use std::fmt;
use std::str::FromStr;

use shakmaty::uci::UciMove;
use shakmaty::{Role, Square};

use crate::engine::RulesError;

/// A from-square/to-square pair with an optional promotion piece.
///
/// This is the notation puzzle solutions are written in and the shape the
/// board widget reports drags in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCoords {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl MoveCoords {
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// True when this move names the same square pair. Promotion is
    /// ignored: drags only carry squares.
    pub fn matches_squares(&self, from: Square, to: Square) -> bool {
        self.from == from && self.to == to
    }
}

impl FromStr for MoveCoords {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match UciMove::from_ascii(s.as_bytes()) {
            Ok(UciMove::Normal {
                from,
                to,
                promotion,
            }) => Ok(Self {
                from,
                to,
                promotion,
            }),
            _ => Err(RulesError::InvalidMove(s.to_string())),
        }
    }
}

impl fmt::Display for MoveCoords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_move() {
        let mv: MoveCoords = "e2e4".parse().unwrap();
        assert_eq!(mv.from, Square::E2);
        assert_eq!(mv.to, Square::E4);
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.to_string(), "e2e4");
    }

    #[test]
    fn test_parse_promotion() {
        let mv: MoveCoords = "b7b8q".parse().unwrap();
        assert_eq!(mv.from, Square::B7);
        assert_eq!(mv.to, Square::B8);
        assert_eq!(mv.promotion, Some(Role::Queen));
        assert_eq!(mv.to_string(), "b7b8q");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<MoveCoords>().is_err());
        assert!("e2".parse::<MoveCoords>().is_err());
        assert!("e2e9".parse::<MoveCoords>().is_err());
        assert!("0000".parse::<MoveCoords>().is_err());
        assert!("hello".parse::<MoveCoords>().is_err());
    }

    #[test]
    fn test_matches_squares_ignores_promotion() {
        let mv: MoveCoords = "b7b8q".parse().unwrap();
        assert!(mv.matches_squares(Square::B7, Square::B8));
        assert!(!mv.matches_squares(Square::B7, Square::C8));
    }
}
