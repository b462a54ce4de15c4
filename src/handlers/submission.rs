// src/handlers/submission.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::submission::{SaveSubmissionRequest, ScoreSubmissionRequest, TakeQuizRequest},
    services::SubmissionService,
    utils::{caller::Caller, payload::Payload},
};

/// Scores id-based selections and records the raw correct count.
///
/// The returned `score` is a count of correct selections, not a percentage.
pub async fn score_submission(
    State(service): State<SubmissionService>,
    caller: Caller,
    Path(quiz_id): Path<String>,
    Payload(req): Payload<ScoreSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let count = service
        .score(&caller.user_id, &quiz_id, &req.selections)
        .await?;

    Ok(Json(serde_json::json!({ "score": count })))
}

/// Records a percentage score computed by the client.
pub async fn save_submission(
    State(service): State<SubmissionService>,
    caller: Caller,
    Path(quiz_id): Path<String>,
    Payload(payload): Payload<SaveSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let id = service.save(&caller.user_id, &quiz_id, payload.score).await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": id,
            "message": "Quiz submitted successfully"
        })),
    ))
}

/// Scores answer texts against the stored quiz and records the percentage.
pub async fn take_quiz(
    State(service): State<SubmissionService>,
    caller: Caller,
    Path(quiz_id): Path<String>,
    Payload(req): Payload<TakeQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = service.take(&caller.user_id, &quiz_id, &req.answers).await?;

    Ok(Json(outcome))
}
