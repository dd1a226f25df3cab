use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use chess_core::RulesError;
use chess_trainer::TrainerError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Trainer(#[from] TrainerError),

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Trainer(TrainerError::RatingOutOfRange(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Trainer(e) => {
                tracing::error!("Trainer error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Rules(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Anyhow(e) => {
                tracing::error!("Unexpected error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}
