// src/store/memory.rs

use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::{AnswerStore, QuestionStore, QuizStore, StoreResult, SubmissionStore};
use crate::{
    error::StoreError,
    models::{
        answer::{Answer, AnswerChanges, NewAnswer},
        question::{NewQuestion, Question},
        quiz::{NewQuiz, Quiz, QuizChanges},
        submission::{NewSubmission, Submission},
    },
};

#[derive(Debug, Default)]
struct Tables {
    quizzes: Vec<Quiz>,
    questions: Vec<Question>,
    answers: Vec<Answer>,
    submissions: Vec<Submission>,
}

/// Process-local backend used when no database is configured, and by the tests.
///
/// Rows live in insertion-ordered vectors, so listing order matches the
/// PostgreSQL backend once children are sorted by position.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    /// Remaining successful writes before every write fails. `None` = unlimited.
    write_budget: Mutex<Option<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets `writes` more write calls succeed, then fails all further writes
    /// with `StoreError::Unavailable`. `None` lifts the limit.
    pub fn set_write_budget(&self, writes: Option<usize>) {
        if let Ok(mut budget) = self.write_budget.lock() {
            *budget = writes;
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }

    /// Takes the write lock after charging one unit of the write budget.
    fn write(&self, op: &str) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        {
            let mut budget = self
                .write_budget
                .lock()
                .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
            match budget.as_mut() {
                Some(0) => {
                    return Err(StoreError::Unavailable(format!("{op} rejected")));
                }
                Some(remaining) => *remaining -= 1,
                None => {}
            }
        }

        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn sorted_by_position<T: Clone>(rows: Vec<&T>, key: impl Fn(&T) -> (String, i32)) -> Vec<T> {
    let mut rows: Vec<T> = rows.into_iter().cloned().collect();
    rows.sort_by_key(|row| key(row));
    rows
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn insert_quiz(&self, quiz: NewQuiz) -> StoreResult<String> {
        let mut tables = self.write("insert quiz")?;
        let id = new_id();
        tables.quizzes.push(Quiz {
            id: id.clone(),
            owner_id: quiz.owner_id,
            title: quiz.title,
            score: quiz.score,
            created_at: chrono::Utc::now(),
        });
        Ok(id)
    }

    async fn get_quiz(&self, id: &str) -> StoreResult<Option<Quiz>> {
        let tables = self.read()?;
        Ok(tables.quizzes.iter().find(|q| q.id == id).cloned())
    }

    async fn list_quizzes_by_owner(&self, owner_id: &str) -> StoreResult<Vec<Quiz>> {
        let tables = self.read()?;
        Ok(tables
            .quizzes
            .iter()
            .filter(|q| q.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_quizzes_by_ids(&self, ids: &[String]) -> StoreResult<Vec<Quiz>> {
        let tables = self.read()?;
        Ok(tables
            .quizzes
            .iter()
            .filter(|q| ids.contains(&q.id))
            .cloned()
            .collect())
    }

    async fn update_quiz(&self, id: &str, changes: QuizChanges) -> StoreResult<bool> {
        let mut tables = self.write("update quiz")?;
        match tables.quizzes.iter_mut().find(|q| q.id == id) {
            Some(quiz) => {
                quiz.title = changes.title;
                quiz.score = changes.score;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_quiz(&self, id: &str) -> StoreResult<bool> {
        let mut tables = self.write("delete quiz")?;
        let before = tables.quizzes.len();
        tables.quizzes.retain(|q| q.id != id);
        Ok(tables.quizzes.len() < before)
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn insert_question(&self, question: NewQuestion) -> StoreResult<String> {
        let mut tables = self.write("insert question")?;
        let id = new_id();
        tables.questions.push(Question {
            id: id.clone(),
            quiz_id: question.quiz_id,
            text: question.text,
            position: question.position,
        });
        Ok(id)
    }

    async fn list_questions_by_quiz(&self, quiz_id: &str) -> StoreResult<Vec<Question>> {
        let tables = self.read()?;
        let rows: Vec<&Question> = tables.questions.iter().filter(|q| q.quiz_id == quiz_id).collect();
        Ok(sorted_by_position(rows, |q| (q.quiz_id.clone(), q.position)))
    }

    async fn list_questions_by_quizzes(&self, quiz_ids: &[String]) -> StoreResult<Vec<Question>> {
        let tables = self.read()?;
        let rows: Vec<&Question> = tables
            .questions
            .iter()
            .filter(|q| quiz_ids.contains(&q.quiz_id))
            .collect();
        Ok(sorted_by_position(rows, |q| (q.quiz_id.clone(), q.position)))
    }

    async fn update_question_text(&self, id: &str, text: &str) -> StoreResult<bool> {
        let mut tables = self.write("update question")?;
        match tables.questions.iter_mut().find(|q| q.id == id) {
            Some(question) => {
                question.text = text.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_question(&self, id: &str) -> StoreResult<bool> {
        let mut tables = self.write("delete question")?;
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);
        Ok(tables.questions.len() < before)
    }

    async fn delete_questions_by_quiz(&self, quiz_id: &str) -> StoreResult<u64> {
        let mut tables = self.write("delete questions")?;
        let before = tables.questions.len();
        tables.questions.retain(|q| q.quiz_id != quiz_id);
        Ok((before - tables.questions.len()) as u64)
    }
}

#[async_trait]
impl AnswerStore for MemoryStore {
    async fn insert_answer(&self, answer: NewAnswer) -> StoreResult<String> {
        let mut tables = self.write("insert answer")?;
        let id = new_id();
        tables.answers.push(Answer {
            id: id.clone(),
            question_id: answer.question_id,
            text: answer.text,
            is_correct: answer.is_correct,
            position: answer.position,
        });
        Ok(id)
    }

    async fn list_answers_by_questions(&self, question_ids: &[String]) -> StoreResult<Vec<Answer>> {
        let tables = self.read()?;
        let rows: Vec<&Answer> = tables
            .answers
            .iter()
            .filter(|a| question_ids.contains(&a.question_id))
            .collect();
        Ok(sorted_by_position(rows, |a| (a.question_id.clone(), a.position)))
    }

    async fn update_answer(&self, id: &str, changes: AnswerChanges) -> StoreResult<bool> {
        let mut tables = self.write("update answer")?;
        match tables.answers.iter_mut().find(|a| a.id == id) {
            Some(answer) => {
                answer.text = changes.text;
                answer.is_correct = changes.is_correct;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_answers_by_question(&self, question_id: &str) -> StoreResult<u64> {
        let mut tables = self.write("delete answers")?;
        let before = tables.answers.len();
        tables.answers.retain(|a| a.question_id != question_id);
        Ok((before - tables.answers.len()) as u64)
    }

    async fn delete_answers_by_questions(&self, question_ids: &[String]) -> StoreResult<u64> {
        let mut tables = self.write("delete answers")?;
        let before = tables.answers.len();
        tables.answers.retain(|a| !question_ids.contains(&a.question_id));
        Ok((before - tables.answers.len()) as u64)
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn insert_submission(&self, submission: NewSubmission) -> StoreResult<String> {
        let mut tables = self.write("insert submission")?;
        let id = new_id();
        tables.submissions.push(Submission {
            id: id.clone(),
            user_id: submission.user_id,
            quiz_id: submission.quiz_id,
            score: submission.score,
            score_kind: submission.score_kind,
            created_at: chrono::Utc::now(),
        });
        Ok(id)
    }

    async fn list_submissions_by_user(&self, user_id: &str) -> StoreResult<Vec<Submission>> {
        let tables = self.read()?;
        Ok(tables
            .submissions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }
}
