// src/handlers/history.rs

use axum::{Json, extract::State, response::IntoResponse};

use crate::{error::AppError, services::HistoryService, utils::caller::Caller};

/// Lists the caller's submissions, each joined with its quiz title.
/// Responds 404 when the caller has not submitted anything yet.
pub async fn list_history(
    State(service): State<HistoryService>,
    caller: Caller,
) -> Result<impl IntoResponse, AppError> {
    let entries = service.list_for_user(&caller.user_id).await?;

    Ok(Json(entries))
}
