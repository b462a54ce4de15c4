// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{
    not_blank,
    question::{NewQuestionInput, QuestionDetails, QuestionUpdate},
};

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,

    /// The user who authored the quiz.
    pub owner_id: String,

    pub title: String,

    /// Authoring-time percentage (0–100) snapshotted at the last save.
    /// `None` until the first save computes it.
    pub score: Option<f64>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewQuiz {
    pub owner_id: String,
    pub title: String,
    pub score: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct QuizChanges {
    pub title: String,
    pub score: Option<f64>,
}

/// A quiz with its questions and each question's answers, in authoring order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizDetails {
    #[serde(flatten)]
    pub quiz: Quiz,
    pub questions: Vec<QuestionDetails>,
}

/// DTO for authoring a new quiz.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateQuizRequest {
    #[validate(custom(function = not_blank), length(max = 200))]
    pub title: String,
    #[validate(length(min = 1, message = "A quiz needs at least one question."), nested)]
    pub questions: Vec<NewQuestionInput>,
}

/// DTO for editing an existing quiz.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UpdateQuizRequest {
    #[validate(custom(function = not_blank), length(max = 200))]
    pub title: String,
    /// Caller-computed authoring score. Recomputed from the stored answers when absent.
    #[validate(range(min = 0.0, max = 100.0))]
    pub score: Option<f64>,
    #[serde(default)]
    #[validate(nested)]
    pub questions: Vec<QuestionUpdate>,
}
