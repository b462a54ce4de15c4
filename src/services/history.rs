// src/services/history.rs

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    error::AppError,
    models::submission::HistoryEntry,
    store::{QuizStore, Stores, SubmissionStore},
};

/// Joins a user's submissions with the titles of the quizzes they were made against.
#[derive(Clone)]
pub struct HistoryService {
    quizzes: Arc<dyn QuizStore>,
    submissions: Arc<dyn SubmissionStore>,
}

impl HistoryService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            quizzes: stores.quizzes.clone(),
            submissions: stores.submissions.clone(),
        }
    }

    /// Submissions of `user_id` in storage order, each with its quiz title.
    ///
    /// An empty history is reported as `NotFound`.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<HistoryEntry>, AppError> {
        if user_id.trim().is_empty() {
            return Err(AppError::ValidationError("User id is required".to_string()));
        }

        let submissions = self.submissions.list_submissions_by_user(user_id).await?;
        if submissions.is_empty() {
            tracing::debug!(user_id, "No submissions yet");
            return Err(AppError::NotFound("No submissions found for this user".to_string()));
        }

        let mut seen = HashSet::new();
        let quiz_ids: Vec<String> = submissions
            .iter()
            .filter(|submission| seen.insert(submission.quiz_id.as_str()))
            .map(|submission| submission.quiz_id.clone())
            .collect();

        let titles: HashMap<String, String> = self
            .quizzes
            .list_quizzes_by_ids(&quiz_ids)
            .await?
            .into_iter()
            .map(|quiz| (quiz.id, quiz.title))
            .collect();

        Ok(submissions
            .into_iter()
            .map(|submission| {
                let title = titles.get(&submission.quiz_id).cloned();
                HistoryEntry { submission, title }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{question::NewQuestionInput, quiz::CreateQuizRequest},
        services::{quiz::QuizService, submission::SubmissionService},
        store::MemoryStore,
    };

    fn quiz(title: &str) -> CreateQuizRequest {
        CreateQuizRequest {
            title: title.to_string(),
            questions: vec![NewQuestionInput {
                text: "2 + 2?".to_string(),
                answers: vec!["4".to_string(), "5".to_string()],
                correct_answer: 0,
            }],
        }
    }

    #[tokio::test]
    async fn joins_titles_in_submission_order() {
        let stores = Stores::memory(Arc::new(MemoryStore::new()));
        let quizzes = QuizService::new(&stores);
        let submissions = SubmissionService::new(&stores);
        let history = HistoryService::new(&stores);

        let geo = quizzes.create("author", quiz("Geo")).await.unwrap();
        let math = quizzes.create("author", quiz("Math")).await.unwrap();
        submissions.save("learner", &math, 50.0).await.unwrap();
        submissions.save("learner", &geo, 100.0).await.unwrap();
        submissions.save("someone-else", &geo, 0.0).await.unwrap();

        let entries = history.list_for_user("learner").await.unwrap();

        let summary: Vec<(&str, Option<&str>, f64)> = entries
            .iter()
            .map(|e| (e.submission.quiz_id.as_str(), e.title.as_deref(), e.submission.score))
            .collect();
        assert_eq!(
            summary,
            vec![
                (math.as_str(), Some("Math"), 50.0),
                (geo.as_str(), Some("Geo"), 100.0),
            ]
        );
    }

    #[tokio::test]
    async fn deleted_quiz_leaves_entry_without_title() {
        let stores = Stores::memory(Arc::new(MemoryStore::new()));
        let quizzes = QuizService::new(&stores);
        let history = HistoryService::new(&stores);

        let geo = quizzes.create("author", quiz("Geo")).await.unwrap();
        SubmissionService::new(&stores)
            .save("learner", &geo, 100.0)
            .await
            .unwrap();
        quizzes.delete_quiz(&geo).await.unwrap();

        let entries = history.list_for_user("learner").await.unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, None);
    }

    #[tokio::test]
    async fn empty_history_is_not_found() {
        let stores = Stores::memory(Arc::new(MemoryStore::new()));

        let err = HistoryService::new(&stores)
            .list_for_user("learner")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
