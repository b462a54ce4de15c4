// src/store/mod.rs

//! Per-collection persistence traits.
//!
//! Each store owns one collection and knows nothing about the others; keeping the
//! quiz/question/answer tree consistent is the job of the aggregate service.
//! Every call is a single row-level (or single foreign-key) operation.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    error::StoreError,
    models::{
        answer::{Answer, AnswerChanges, NewAnswer},
        question::{NewQuestion, Question},
        quiz::{NewQuiz, Quiz, QuizChanges},
        submission::{NewSubmission, Submission},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Inserts a quiz and returns its newly assigned id.
    async fn insert_quiz(&self, quiz: NewQuiz) -> StoreResult<String>;

    async fn get_quiz(&self, id: &str) -> StoreResult<Option<Quiz>>;

    /// Quizzes of one owner, in creation order.
    async fn list_quizzes_by_owner(&self, owner_id: &str) -> StoreResult<Vec<Quiz>>;

    /// Quizzes matching any of `ids`. Unknown ids are skipped.
    async fn list_quizzes_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Quiz>>;

    /// Returns `false` when no quiz has this id.
    async fn update_quiz(&self, id: &str, changes: QuizChanges) -> StoreResult<bool>;

    async fn delete_quiz(&self, id: &str) -> StoreResult<bool>;
}

#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<String>;

    /// Questions of one quiz, ordered by position.
    async fn list_questions_by_quiz(&self, quiz_id: &str) -> StoreResult<Vec<Question>>;

    /// Questions of several quizzes, ordered by position within each quiz.
    async fn list_questions_by_quizzes(&self, quiz_ids: &[String]) -> StoreResult<Vec<Question>>;

    async fn update_question_text(&self, id: &str, text: &str) -> StoreResult<bool>;

    async fn delete_question(&self, id: &str) -> StoreResult<bool>;

    /// Returns the number of deleted rows.
    async fn delete_questions_by_quiz(&self, quiz_id: &str) -> StoreResult<u64>;
}

#[async_trait]
pub trait AnswerStore: Send + Sync {
    async fn insert_answer(&self, answer: NewAnswer) -> StoreResult<String>;

    /// Answers of the given questions, ordered by position within each question.
    async fn list_answers_by_questions(&self, question_ids: &[String]) -> StoreResult<Vec<Answer>>;

    async fn update_answer(&self, id: &str, changes: AnswerChanges) -> StoreResult<bool>;

    async fn delete_answers_by_question(&self, question_id: &str) -> StoreResult<u64>;

    async fn delete_answers_by_questions(&self, question_ids: &[String]) -> StoreResult<u64>;
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert_submission(&self, submission: NewSubmission) -> StoreResult<String>;

    /// Submissions of one user, in insertion order.
    async fn list_submissions_by_user(&self, user_id: &str) -> StoreResult<Vec<Submission>>;
}

/// Handles to every collection, all served by the same backend.
#[derive(Clone)]
pub struct Stores {
    pub quizzes: Arc<dyn QuizStore>,
    pub questions: Arc<dyn QuestionStore>,
    pub answers: Arc<dyn AnswerStore>,
    pub submissions: Arc<dyn SubmissionStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self::from_backend(Arc::new(PgStore::new(pool)))
    }

    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self::from_backend(store)
    }

    fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: QuizStore + QuestionStore + AnswerStore + SubmissionStore + 'static,
    {
        Self {
            quizzes: backend.clone(),
            questions: backend.clone(),
            answers: backend.clone(),
            submissions: backend,
        }
    }
}
