//! Free-exploration board: unrestricted legal play from the standard
//! starting position, with a navigable SAN move history.

use chess_core::{ChessRules, Color, MoveCoords, Role, Rules, RulesError, Square, STANDARD_START_FEN};

/// One played move in the explorer's history.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub coords: MoveCoords,
    pub san: String,
    /// Position after the move.
    pub fen: String,
}

pub struct ExplorerSession {
    rules: ChessRules,
    history: Vec<HistoryEntry>,
    /// How many history moves are applied to the viewed position.
    cursor: usize,
}

impl ExplorerSession {
    pub fn new() -> Self {
        Self {
            rules: ChessRules::new(),
            history: Vec::new(),
            cursor: 0,
        }
    }

    /// Play a move at the current view. Rewound history is truncated
    /// first, so exploring a new line discards the abandoned one. Returns
    /// `None` for illegal moves, position untouched.
    pub fn play(&mut self, from: Square, to: Square) -> Option<&HistoryEntry> {
        let played = self.rules.attempt_move(from, to, Some(Role::Queen))?;
        self.history.truncate(self.cursor);
        self.history.push(HistoryEntry {
            coords: played.coords,
            san: played.san,
            fen: played.fen,
        });
        self.cursor += 1;
        self.history.last()
    }

    /// Step the view through the history; steps past either end are
    /// no-ops. The position is rebuilt by replaying the history prefix.
    pub fn navigate(&mut self, delta: i64) -> Result<(), RulesError> {
        let target = self.cursor as i64 + delta;
        if target < 0 || target > self.history.len() as i64 {
            return Ok(());
        }
        let target = target as usize;

        self.rules.load_position(STANDARD_START_FEN)?;
        for entry in &self.history[..target] {
            let mv = entry.coords;
            self.rules
                .attempt_move(mv.from, mv.to, mv.promotion.or(Some(Role::Queen)))
                .ok_or_else(|| RulesError::InvalidMove(mv.to_string()))?;
        }
        self.cursor = target;
        Ok(())
    }

    /// Legal destinations for a drag starting on `from`.
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        self.rules.legal_moves_from(from)
    }

    pub fn fen(&self) -> String {
        self.rules.fen()
    }

    pub fn turn(&self) -> Color {
        self.rules.turn()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for ExplorerSession {
    fn default() -> Self {
        Self::new()
    }
}
