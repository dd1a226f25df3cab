//! The rules-engine boundary: the capability contract the application
//! consumes from chess, and its shakmaty-backed implementation.

use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{
    CastlingMode, Chess, Color, EnPassantMode, File, Move, Position, Rank, Role, Square,
};

use crate::moves::MoveCoords;

/// Standard chess starting position.
pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("invalid FEN '{0}'")]
    InvalidFen(String),

    #[error("illegal position: {0}")]
    IllegalPosition(String),

    #[error("invalid move '{0}'")]
    InvalidMove(String),
}

/// A move the rules engine accepted.
#[derive(Debug, Clone)]
pub struct PlayedMove {
    pub coords: MoveCoords,
    pub san: String,
    /// Serialized position after the move.
    pub fen: String,
    pub capture: bool,
}

/// Capability contract for the rules engine.
///
/// Narrow on purpose: callers hold the only mutable handle to the position
/// and can be tested against a scripted fake.
pub trait Rules {
    /// Replace the current position with the one encoded in `fen`.
    fn load_position(&mut self, fen: &str) -> Result<(), RulesError>;

    /// Try to play `from` -> `to`. Returns `None` when the move is illegal,
    /// leaving the position untouched. `promotion` resolves pawn
    /// promotions and is ignored for every other move.
    fn attempt_move(&mut self, from: Square, to: Square, promotion: Option<Role>)
        -> Option<PlayedMove>;

    /// Legal destination squares for the piece on `from`, for drag
    /// highlighting. Empty when the square is empty or the piece is stuck.
    fn legal_moves_from(&self, from: Square) -> Vec<Square>;

    /// Serialized form of the current position.
    fn fen(&self) -> String;

    /// Side to move.
    fn turn(&self) -> Color;
}

/// `Rules` backed by shakmaty.
#[derive(Debug, Clone)]
pub struct ChessRules {
    pos: Chess,
}

impl ChessRules {
    /// Engine at the standard starting position.
    pub fn new() -> Self {
        Self {
            pos: Chess::default(),
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let mut rules = Self::new();
        rules.load_position(fen)?;
        Ok(rules)
    }

    /// Where the board widget shows this move landing. Castling renders as
    /// the king's two-square hop, not the internal king-takes-rook encoding.
    fn display_target(m: &Move) -> Square {
        match m {
            Move::Castle { king, rook } => {
                let file = if rook.file() > king.file() {
                    File::G
                } else {
                    File::C
                };
                Square::from_coords(file, king.rank())
            }
            _ => m.to(),
        }
    }
}

impl Default for ChessRules {
    fn default() -> Self {
        Self::new()
    }
}

impl Rules for ChessRules {
    fn load_position(&mut self, fen: &str) -> Result<(), RulesError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|_| RulesError::InvalidFen(fen.to_string()))?;
        self.pos = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| RulesError::IllegalPosition(e.to_string()))?;
        Ok(())
    }

    fn attempt_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Option<PlayedMove> {
        // Only pass the promotion piece through when the move actually
        // promotes; shakmaty rejects spurious promotion suffixes.
        let promoting = self
            .pos
            .board()
            .piece_at(from)
            .is_some_and(|p| p.role == Role::Pawn)
            && (to.rank() == Rank::Eighth || to.rank() == Rank::First);
        let uci = UciMove::Normal {
            from,
            to,
            promotion: if promoting { promotion } else { None },
        };

        let m = uci.to_move(&self.pos).ok()?;
        let san = San::from_move(&self.pos, m).to_string();
        let capture = m.is_capture();
        self.pos.play_unchecked(m);

        Some(PlayedMove {
            coords: MoveCoords {
                from,
                to,
                promotion: m.promotion(),
            },
            san,
            fen: self.fen(),
            capture,
        })
    }

    fn legal_moves_from(&self, from: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = self
            .pos
            .legal_moves()
            .iter()
            .filter(|m| m.from() == Some(from))
            .map(Self::display_target)
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    fn fen(&self) -> String {
        Fen::from_position(&self.pos, EnPassantMode::Legal).to_string()
    }

    fn turn(&self) -> Color {
        self.pos.turn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_the_standard_position() {
        let rules = ChessRules::new();
        assert_eq!(rules.fen(), STANDARD_START_FEN);
        assert_eq!(rules.turn(), Color::White);
    }

    #[test]
    fn test_load_position_rejects_bad_fen() {
        let mut rules = ChessRules::new();
        assert!(rules.load_position("not a fen").is_err());
        assert!(rules.load_position("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        // State is whatever it was before the failed load.
        assert_eq!(rules.fen(), STANDARD_START_FEN);
    }

    #[test]
    fn test_attempt_legal_move() {
        let mut rules = ChessRules::new();
        let played = rules
            .attempt_move(Square::E2, Square::E4, Some(Role::Queen))
            .unwrap();
        assert_eq!(played.san, "e4");
        assert!(!played.capture);
        assert_eq!(played.coords.to_string(), "e2e4");
        assert!(played
            .fen
            .starts_with("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"));
        assert_eq!(rules.turn(), Color::Black);
    }

    #[test]
    fn test_illegal_move_leaves_position_untouched() {
        let mut rules = ChessRules::new();
        assert!(rules
            .attempt_move(Square::E2, Square::E5, Some(Role::Queen))
            .is_none());
        assert_eq!(rules.fen(), STANDARD_START_FEN);
        assert_eq!(rules.turn(), Color::White);
    }

    #[test]
    fn test_legal_moves_from_pawn() {
        let rules = ChessRules::new();
        assert_eq!(
            rules.legal_moves_from(Square::E2),
            vec![Square::E3, Square::E4]
        );
        assert!(rules.legal_moves_from(Square::E5).is_empty());
        // Stuck piece: the rook has nowhere to go.
        assert!(rules.legal_moves_from(Square::A1).is_empty());
    }

    #[test]
    fn test_promotion_resolves_to_queen() {
        let mut rules = ChessRules::from_fen("8/P7/8/8/8/8/k7/7K w - - 0 1").unwrap();
        let played = rules
            .attempt_move(Square::A7, Square::A8, Some(Role::Queen))
            .unwrap();
        assert_eq!(played.san, "a8=Q");
        assert_eq!(played.coords.promotion, Some(Role::Queen));
        assert!(played.fen.starts_with("Q7/8"));
    }

    #[test]
    fn test_castling_as_king_two_square_hop() {
        let mut rules = ChessRules::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let targets = rules.legal_moves_from(Square::E1);
        assert!(targets.contains(&Square::G1));
        assert!(targets.contains(&Square::C1));

        let played = rules
            .attempt_move(Square::E1, Square::G1, Some(Role::Queen))
            .unwrap();
        assert_eq!(played.san, "O-O");
        assert!(played.fen.starts_with("r3k2r/8/8/8/8/8/8/R4RK1 b"));
    }
}
