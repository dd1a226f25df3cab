//! Chess boundary types: the rules-engine capability contract, its
//! shakmaty-backed implementation, and the render payloads handed to the
//! board widget.

pub mod board;
pub mod engine;
pub mod moves;

pub use shakmaty;
pub use shakmaty::{Color, Role, Square};

pub use board::{BoardState, Highlight};
pub use engine::{ChessRules, PlayedMove, Rules, RulesError, STANDARD_START_FEN};
pub use moves::MoveCoords;
