//! Render payloads for the board widget: a serialized position plus square
//! highlight annotations. The widget itself lives in the browser; this is
//! the whole surface it consumes.

use std::collections::HashMap;

use serde::Serialize;
use shakmaty::Square;

/// Highlight styles the widget knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Highlight {
    /// A legal destination for the piece being dragged.
    LegalTarget,
    /// Origin or destination of the most recent move.
    LastMove,
}

/// What the client needs to redraw the board after an operation.
#[derive(Debug, Clone, Serialize)]
pub struct BoardState {
    pub fen: String,
    pub highlights: HashMap<String, Highlight>,
}

impl BoardState {
    pub fn new(fen: String) -> Self {
        Self {
            fen,
            highlights: HashMap::new(),
        }
    }

    pub fn mark(&mut self, square: Square, highlight: Highlight) {
        self.highlights.insert(square.to_string(), highlight);
    }

    pub fn with_last_move(mut self, from: Square, to: Square) -> Self {
        self.mark(from, Highlight::LastMove);
        self.mark(to, Highlight::LastMove);
        self
    }

    pub fn with_targets(mut self, targets: &[Square]) -> Self {
        for &target in targets {
            self.mark(target, Highlight::LegalTarget);
        }
        self
    }
}
