// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{answer::Answer, not_blank};

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: String,

    /// Owning quiz.
    pub quiz_id: String,

    /// The prompt shown to the learner.
    pub text: String,

    /// Order inside the owning quiz (0-based).
    pub position: i32,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub quiz_id: String,
    pub text: String,
    pub position: i32,
}

/// A question together with its answers, in slot order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionDetails {
    pub id: String,
    pub text: String,
    pub answers: Vec<Answer>,
}

impl QuestionDetails {
    /// The answer flagged correct, if the question has one.
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }
}

/// Builder input for one question of a new quiz.
///
/// `answers` holds the labeled slots (A–E) and `correct_answer` the index of the
/// slot marked correct, so a valid input always has exactly one correct answer.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct NewQuestionInput {
    #[validate(custom(function = not_blank), length(max = 1000))]
    pub text: String,
    #[validate(custom(function = validate_answer_slots))]
    pub answers: Vec<String>,
    pub correct_answer: usize,
}

/// Edit input for one question of an existing quiz.
///
/// Entries without an `id` are ignored: editing never inserts rows.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct QuestionUpdate {
    pub id: Option<String>,
    #[validate(custom(function = not_blank), length(max = 1000))]
    pub text: String,
    #[serde(default)]
    #[validate(nested)]
    pub answers: Vec<AnswerUpdate>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AnswerUpdate {
    pub id: Option<String>,
    #[validate(custom(function = not_blank), length(max = 500))]
    pub text: String,
    pub is_correct: bool,
}

pub const MIN_ANSWERS: usize = 2;
pub const MAX_ANSWERS: usize = 5;

fn validate_answer_slots(answers: &[String]) -> Result<(), validator::ValidationError> {
    if answers.len() < MIN_ANSWERS || answers.len() > MAX_ANSWERS {
        return Err(validator::ValidationError::new("answers_must_have_2_to_5_options"));
    }
    for answer in answers {
        if answer.trim().is_empty() {
            return Err(validator::ValidationError::new("answer_cannot_be_blank"));
        }
        if answer.len() > 500 {
            return Err(validator::ValidationError::new("answer_too_long"));
        }
    }
    Ok(())
}
