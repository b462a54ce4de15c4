// src/models/submission.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use validator::Validate;

/// What the `score` column of a submission measures.
///
/// The id-based scoring path records a raw count of correct selections while the
/// take-quiz path records a percentage; both share one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    CorrectCount,
    Percentage,
}

impl ScoreKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreKind::CorrectCount => "correct_count",
            ScoreKind::Percentage => "percentage",
        }
    }
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "correct_count" => Ok(ScoreKind::CorrectCount),
            "percentage" => Ok(ScoreKind::Percentage),
            other => Err(format!("unknown score kind '{other}'")),
        }
    }
}

/// Represents the 'submissions' table in the database.
/// Append-only: rows are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: f64,
    pub score_kind: ScoreKind,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub user_id: String,
    pub quiz_id: String,
    pub score: f64,
    pub score_kind: ScoreKind,
}

/// A submission joined with the title of the quiz it was made against.
/// `title` is `None` when the quiz has since been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub submission: Submission,
    pub title: Option<String>,
}

/// One learner pick: the answer chosen for a question.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Selection {
    pub question_id: String,
    pub answer_id: String,
}

/// DTO for the id-based scoring path.
#[derive(Debug, Deserialize, Serialize)]
pub struct ScoreSubmissionRequest {
    #[serde(default)]
    pub selections: Vec<Selection>,
}

/// DTO for storing a percentage computed by the caller.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct SaveSubmissionRequest {
    #[validate(range(min = 0.0, max = 100.0, message = "Score must be a percentage between 0 and 100."))]
    pub score: f64,
}

/// DTO for taking a quiz: one answer text per question, in question order.
#[derive(Debug, Deserialize, Serialize)]
pub struct TakeQuizRequest {
    #[serde(default)]
    pub answers: Vec<String>,
}

/// Result of a taken quiz, returned to the learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TakeQuizOutcome {
    pub submission_id: String,
    pub score: f64,
    pub correct_count: usize,
    pub total_questions: usize,
    /// Text of the correct answer for each question that has one.
    pub correct_answers: Vec<String>,
}
