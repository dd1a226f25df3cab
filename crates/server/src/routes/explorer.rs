use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use chess_core::BoardState;

use crate::error::AppError;
use crate::explorer::ExplorerSession;
use crate::routes::parse_square;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct MoveBody {
    pub from: String,
    pub to: String,
}

#[derive(Deserialize)]
pub struct NavigateBody {
    /// +1 steps forward through the history, -1 back.
    pub direction: i64,
}

#[derive(Deserialize)]
pub struct TargetsQuery {
    pub from: String,
}

fn history_json(session: &ExplorerSession) -> JsonValue {
    let entries: Vec<JsonValue> = session
        .history()
        .iter()
        .map(|entry| {
            serde_json::json!({
                "san": entry.san,
                "uci": entry.coords.to_string(),
                "fen": entry.fen,
            })
        })
        .collect();
    serde_json::json!(entries)
}

/// POST /api/explorer/session
pub async fn create_session(
    Extension(state): Extension<SharedState>,
) -> Result<Json<JsonValue>, AppError> {
    let session = ExplorerSession::new();
    let fen = session.fen();
    let id = state.insert_explorer(session);

    Ok(Json(serde_json::json!({
        "session_id": id,
        "board": BoardState::new(fen),
        "turn": "w",
    })))
}

/// GET /api/explorer/session/{id}
pub async fn get_session(
    Extension(state): Extension<SharedState>,
    Path(id): Path<u64>,
) -> Result<Json<JsonValue>, AppError> {
    let sessions = state.explorers();
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("No explorer session {id}")))?;

    Ok(Json(serde_json::json!({
        "session_id": id,
        "board": BoardState::new(session.fen()),
        "turn": if session.turn().is_white() { "w" } else { "b" },
        "cursor": session.cursor(),
        "history": history_json(session),
    })))
}

/// POST /api/explorer/session/{id}/move
/// Free play: any legal move is accepted; illegal drags snap back.
pub async fn submit_move(
    Extension(state): Extension<SharedState>,
    Path(id): Path<u64>,
    Json(body): Json<MoveBody>,
) -> Result<Json<JsonValue>, AppError> {
    let from = parse_square(&body.from)?;
    let to = parse_square(&body.to)?;

    let mut sessions = state.explorers();
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("No explorer session {id}")))?;

    let san = session.play(from, to).map(|entry| entry.san.clone());
    let accepted = san.is_some();

    let board = if accepted {
        BoardState::new(session.fen()).with_last_move(from, to)
    } else {
        BoardState::new(session.fen())
    };

    Ok(Json(serde_json::json!({
        "accepted": accepted,
        "san": san,
        "board": board,
        "turn": if session.turn().is_white() { "w" } else { "b" },
        "cursor": session.cursor(),
        "history": history_json(session),
    })))
}

/// POST /api/explorer/session/{id}/navigate
/// Step the view backward or forward through the move history.
pub async fn navigate(
    Extension(state): Extension<SharedState>,
    Path(id): Path<u64>,
    Json(body): Json<NavigateBody>,
) -> Result<Json<JsonValue>, AppError> {
    let mut sessions = state.explorers();
    let session = sessions
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("No explorer session {id}")))?;

    session.navigate(body.direction)?;

    Ok(Json(serde_json::json!({
        "board": BoardState::new(session.fen()),
        "turn": if session.turn().is_white() { "w" } else { "b" },
        "cursor": session.cursor(),
        "history": history_json(session),
    })))
}

/// GET /api/explorer/session/{id}/moves?from=e2
/// Legal destinations for the dragged piece, as highlight annotations.
pub async fn legal_targets(
    Extension(state): Extension<SharedState>,
    Path(id): Path<u64>,
    Query(query): Query<TargetsQuery>,
) -> Result<Json<JsonValue>, AppError> {
    let from = parse_square(&query.from)?;

    let sessions = state.explorers();
    let session = sessions
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("No explorer session {id}")))?;

    let targets = session.legal_targets(from);
    let board = BoardState::new(session.fen()).with_targets(&targets);

    Ok(Json(serde_json::json!({
        "targets": targets.iter().map(ToString::to_string).collect::<Vec<_>>(),
        "board": board,
    })))
}
