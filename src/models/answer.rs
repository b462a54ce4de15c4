// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'answers' table in the database.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,

    /// Owning question.
    pub question_id: String,

    pub text: String,

    /// At most one answer per question carries `true`.
    pub is_correct: bool,

    /// Slot index inside the owning question (0-based).
    pub position: i32,
}

/// Fields needed to insert an answer. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub question_id: String,
    pub text: String,
    pub is_correct: bool,
    pub position: i32,
}

/// Mutable fields of an existing answer.
#[derive(Debug, Clone)]
pub struct AnswerChanges {
    pub text: String,
    pub is_correct: bool,
}
