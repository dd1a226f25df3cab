use axum::{extract::Path, Extension, Json};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use validator::Validate;

use chess_core::{BoardState, ChessRules};
use chess_trainer::{Catalog, MoveOutcome, Session};

use crate::config::Config;
use crate::error::AppError;
use crate::routes::parse_square;
use crate::state::{SharedState, TrainerEntry};

#[derive(Deserialize, Validate)]
pub struct NewSessionBody {
    #[validate(range(min = 800, max = 2500))]
    pub rating: u32,
}

#[derive(Deserialize)]
pub struct MoveBody {
    pub from: String,
    pub to: String,
}

/// POST /api/puzzles/session
/// Validate the declared rating, draw a puzzle from the matching band and
/// start a fresh session on it.
pub async fn create_session(
    Extension(state): Extension<SharedState>,
    Json(body): Json<NewSessionBody>,
) -> Result<Json<JsonValue>, AppError> {
    body.validate().map_err(|_| {
        AppError::BadRequest("Please enter a valid chess rating between 800 and 2500".to_string())
    })?;

    let puzzle = Catalog::builtin().draw(body.rating).clone();
    let session = Session::start(puzzle, ChessRules::new())?;

    let board = BoardState::new(session.fen());
    let rating = session.puzzle().rating;
    let themes = session.puzzle().themes.clone();
    let id = state.insert_trainer(TrainerEntry {
        rating: body.rating,
        session,
    });

    Ok(Json(serde_json::json!({
        "session_id": id,
        "board": board,
        "puzzle": { "rating": rating, "themes": themes },
    })))
}

/// GET /api/puzzles/session/{id}
pub async fn get_session(
    Extension(state): Extension<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<JsonValue>, AppError> {
    let sessions = state.trainers();
    let entry = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("No puzzle session {id}")))?;

    Ok(Json(serde_json::json!({
        "session_id": id,
        "board": BoardState::new(entry.session.fen()),
        "cursor": entry.session.cursor(),
        "solved": entry.session.solved(),
        "puzzle": {
            "rating": entry.session.puzzle().rating,
            "themes": entry.session.puzzle().themes,
        },
    })))
}

/// POST /api/puzzles/session/{id}/move
/// The drag-drop completion handler: checks the move against the expected
/// solution move and reports the verdict plus the position to re-render.
pub async fn submit_move(
    Extension(state): Extension<SharedState>,
    Extension(config): Extension<Config>,
    Path(id): Path<u64>,
    Json(body): Json<MoveBody>,
) -> Result<Json<JsonValue>, AppError> {
    let from = parse_square(&body.from)?;
    let to = parse_square(&body.to)?;

    let mut sessions = state.trainers();
    let entry = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("No puzzle session {id}")))?;

    let outcome = entry.session.submit_move(from, to)?;

    let mut board = BoardState::new(entry.session.fen());
    if outcome.accepted() {
        board = board.with_last_move(from, to);
    }

    let mut response = serde_json::json!({
        "outcome": outcome.as_str(),
        "accepted": outcome.accepted(),
        "board": board,
        "cursor": entry.session.cursor(),
        "solved": entry.session.solved(),
    });
    if outcome == MoveOutcome::Solved {
        // The client keeps the solved banner up this long, then asks for
        // the next puzzle.
        response["next_in_ms"] = serde_json::json!(config.next_puzzle_delay_ms);
    }
    Ok(Json(response))
}

/// GET /api/puzzles/session/{id}/solution
/// Readback of the expected line and puzzle metadata; no state change.
pub async fn reveal_solution(
    Extension(state): Extension<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<JsonValue>, AppError> {
    let sessions = state.trainers();
    let entry = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("No puzzle session {id}")))?;
    let puzzle = entry.session.puzzle();

    Ok(Json(serde_json::json!({
        "solution": puzzle.solution_uci(),
        "rating": puzzle.rating,
        "themes": puzzle.themes,
    })))
}

/// POST /api/puzzles/session/{id}/next
/// Replace the session wholesale with a fresh draw at the stored rating.
pub async fn next_puzzle(
    Extension(state): Extension<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<JsonValue>, AppError> {
    let mut sessions = state.trainers();
    let entry = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("No puzzle session {id}")))?;

    let puzzle = Catalog::builtin().draw(entry.rating).clone();
    entry.session = Session::start(puzzle, ChessRules::new())?;

    Ok(Json(serde_json::json!({
        "session_id": id,
        "board": BoardState::new(entry.session.fen()),
        "puzzle": {
            "rating": entry.session.puzzle().rating,
            "themes": entry.session.puzzle().themes,
        },
    })))
}
