pub mod explorer;
pub mod health;
pub mod puzzles;

use chess_core::Square;

use crate::error::AppError;

/// Parse a square name from a request ("e2"), mapping failures to a 400.
pub(crate) fn parse_square(s: &str) -> Result<Square, AppError> {
    s.parse()
        .map_err(|_| AppError::BadRequest(format!("'{s}' is not a board square")))
}
