// src/handlers/quiz.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::quiz::{CreateQuizRequest, UpdateQuizRequest},
    services::QuizService,
    utils::{caller::Caller, payload::Payload},
};

/// Creates a quiz owned by the caller, with all its questions and answers.
pub async fn create_quiz(
    State(service): State<QuizService>,
    caller: Caller,
    Payload(payload): Payload<CreateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = service.create(&caller.user_id, payload).await?;

    Ok((StatusCode::CREATED, Json(serde_json::json!({"id": id}))))
}

/// Lists the caller's quizzes with nested questions and answers.
pub async fn list_quizzes(
    State(service): State<QuizService>,
    caller: Caller,
) -> Result<impl IntoResponse, AppError> {
    let quizzes = service.list_for_user(&caller.user_id).await?;

    Ok(Json(quizzes))
}

/// Returns one quiz with its questions and answers.
pub async fn get_quiz_details(
    State(service): State<QuizService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let details = service.details(&id).await?;

    Ok(Json(details))
}

/// Edits title, score and existing questions/answers of a quiz.
pub async fn update_quiz(
    State(service): State<QuizService>,
    Path(id): Path<String>,
    Payload(payload): Payload<UpdateQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    service.update(&id, payload).await?;

    Ok(Json(serde_json::json!({"message": "Quiz updated successfully"})))
}

/// Deletes a quiz and everything under it.
pub async fn delete_quiz(
    State(service): State<QuizService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_quiz(&id).await?;

    Ok(Json(serde_json::json!({
        "message": "Quiz and associated data deleted successfully"
    })))
}

/// Deletes one question and its answers.
pub async fn delete_question(
    State(service): State<QuizService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_question(&id).await?;

    Ok(Json(serde_json::json!({
        "message": "Question and associated answers deleted successfully"
    })))
}
