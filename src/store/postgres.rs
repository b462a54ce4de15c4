// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{AnswerStore, QuestionStore, QuizStore, StoreResult, SubmissionStore};
use crate::{
    error::StoreError,
    models::{
        answer::{Answer, AnswerChanges, NewAnswer},
        question::{NewQuestion, Question},
        quiz::{NewQuiz, Quiz, QuizChanges},
        submission::{NewSubmission, ScoreKind, Submission},
    },
};

/// PostgreSQL backend for all four collections. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Raw 'submissions' row; `score_kind` is stored as text.
#[derive(FromRow)]
struct SubmissionRow {
    id: String,
    user_id: String,
    quiz_id: String,
    score: f64,
    score_kind: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = StoreError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let score_kind = row
            .score_kind
            .parse::<ScoreKind>()
            .map_err(|e| StoreError::Corrupt(format!("submission {}: {}", row.id, e)))?;

        Ok(Submission {
            id: row.id,
            user_id: row.user_id,
            quiz_id: row.quiz_id,
            score: row.score,
            score_kind,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl QuizStore for PgStore {
    async fn insert_quiz(&self, quiz: NewQuiz) -> StoreResult<String> {
        let id = new_id();
        sqlx::query("INSERT INTO quizzes (id, owner_id, title, score) VALUES ($1, $2, $3, $4)")
            .bind(&id)
            .bind(&quiz.owner_id)
            .bind(&quiz.title)
            .bind(quiz.score)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn get_quiz(&self, id: &str) -> StoreResult<Option<Quiz>> {
        let quiz = sqlx::query_as::<_, Quiz>(
            "SELECT id, owner_id, title, score, created_at FROM quizzes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(quiz)
    }

    async fn list_quizzes_by_owner(&self, owner_id: &str) -> StoreResult<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, owner_id, title, score, created_at
            FROM quizzes
            WHERE owner_id = $1
            ORDER BY seq
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(quizzes)
    }

    async fn list_quizzes_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, owner_id, title, score, created_at
            FROM quizzes
            WHERE id = ANY($1)
            ORDER BY seq
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(quizzes)
    }

    async fn update_quiz(&self, id: &str, changes: QuizChanges) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE quizzes SET title = $1, score = $2 WHERE id = $3")
            .bind(&changes.title)
            .bind(changes.score)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_quiz(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl QuestionStore for PgStore {
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<String> {
        let id = new_id();
        sqlx::query("INSERT INTO questions (id, quiz_id, text, position) VALUES ($1, $2, $3, $4)")
            .bind(&id)
            .bind(&question.quiz_id)
            .bind(&question.text)
            .bind(question.position)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list_questions_by_quiz(&self, quiz_id: &str) -> StoreResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            "SELECT id, quiz_id, text, position FROM questions WHERE quiz_id = $1 ORDER BY position",
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn list_questions_by_quizzes(&self, quiz_ids: &[String]) -> StoreResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, quiz_id, text, position
            FROM questions
            WHERE quiz_id = ANY($1)
            ORDER BY quiz_id, position
            "#,
        )
        .bind(quiz_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(questions)
    }

    async fn update_question_text(&self, id: &str, text: &str) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE questions SET text = $1 WHERE id = $2")
            .bind(text)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_question(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_questions_by_quiz(&self, quiz_id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM questions WHERE quiz_id = $1")
            .bind(quiz_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl AnswerStore for PgStore {
    async fn insert_answer(&self, answer: NewAnswer) -> StoreResult<String> {
        let id = new_id();
        sqlx::query(
            r#"
            INSERT INTO answers (id, question_id, text, is_correct, position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&id)
        .bind(&answer.question_id)
        .bind(&answer.text)
        .bind(answer.is_correct)
        .bind(answer.position)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_answers_by_questions(&self, question_ids: &[String]) -> StoreResult<Vec<Answer>> {
        let answers = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, question_id, text, is_correct, position
            FROM answers
            WHERE question_id = ANY($1)
            ORDER BY question_id, position
            "#,
        )
        .bind(question_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(answers)
    }

    async fn update_answer(&self, id: &str, changes: AnswerChanges) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE answers SET text = $1, is_correct = $2 WHERE id = $3")
            .bind(&changes.text)
            .bind(changes.is_correct)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_answers_by_question(&self, question_id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM answers WHERE question_id = $1")
            .bind(question_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_answers_by_questions(&self, question_ids: &[String]) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM answers WHERE question_id = ANY($1)")
            .bind(question_ids)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl SubmissionStore for PgStore {
    async fn insert_submission(&self, submission: NewSubmission) -> StoreResult<String> {
        let id = new_id();
        sqlx::query(
            r#"
            INSERT INTO submissions (id, user_id, quiz_id, score, score_kind)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&id)
        .bind(&submission.user_id)
        .bind(&submission.quiz_id)
        .bind(submission.score)
        .bind(submission.score_kind.as_str())
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn list_submissions_by_user(&self, user_id: &str) -> StoreResult<Vec<Submission>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT id, user_id, quiz_id, score, score_kind, created_at
            FROM submissions
            WHERE user_id = $1
            ORDER BY seq
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Submission::try_from).collect()
    }
}
