//! Puzzle training core: the rating-banded catalog and the puzzle session
//! state machine. Chess legality itself is delegated to the rules engine
//! behind `chess_core::Rules`.

pub mod catalog;
pub mod puzzle;
pub mod session;

pub use catalog::{Catalog, RatingBand, MAX_RATING, MIN_RATING};
pub use puzzle::Puzzle;
pub use session::{MoveOutcome, Session};

use chess_core::RulesError;

#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    #[error("rating {0} is outside the supported range 800-2500")]
    RatingOutOfRange(u32),

    #[error("invalid puzzle catalog: {0}")]
    InvalidCatalog(String),

    #[error(transparent)]
    Rules(#[from] RulesError),
}
