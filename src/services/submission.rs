// src/services/submission.rs

use std::{collections::HashSet, sync::Arc};

use crate::{
    error::AppError,
    models::{
        answer::Answer,
        submission::{NewSubmission, ScoreKind, Selection, TakeQuizOutcome},
    },
    services::{
        quiz::QuizService,
        scoring::{self, KeyedQuestion, Responses},
    },
    store::{AnswerStore, Stores, SubmissionStore},
};

/// Scores attempts and appends them to the submission log.
/// Reads quiz data but never writes it.
#[derive(Clone)]
pub struct SubmissionService {
    quizzes: QuizService,
    answers: Arc<dyn AnswerStore>,
    submissions: Arc<dyn SubmissionStore>,
}

impl SubmissionService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            quizzes: QuizService::new(stores),
            answers: stores.answers.clone(),
            submissions: stores.submissions.clone(),
        }
    }

    /// Id-based scoring. Looks up the answers of the selected questions, counts
    /// selections that point at a correct answer and records that raw count.
    ///
    /// Returns the count, not a percentage.
    pub async fn score(
        &self,
        user_id: &str,
        quiz_id: &str,
        selections: &[Selection],
    ) -> Result<usize, AppError> {
        require_ids(user_id, quiz_id)?;

        // Distinct question ids, first-seen order.
        let mut seen = HashSet::new();
        let question_ids: Vec<String> = selections
            .iter()
            .filter(|selection| seen.insert(selection.question_id.as_str()))
            .map(|selection| selection.question_id.clone())
            .collect();

        let answers = if question_ids.is_empty() {
            Vec::new()
        } else {
            self.answers.list_answers_by_questions(&question_ids).await?
        };

        let grouped: Vec<(&str, Vec<Answer>)> = question_ids
            .iter()
            .map(|id| {
                let own = answers
                    .iter()
                    .filter(|a| &a.question_id == id)
                    .cloned()
                    .collect();
                (id.as_str(), own)
            })
            .collect();
        let key: Vec<KeyedQuestion> = grouped
            .iter()
            .map(|(question_id, answers)| KeyedQuestion {
                question_id: *question_id,
                answers: answers.as_slice(),
            })
            .collect();

        let score = scoring::score_quiz(&key, Responses::ById(selections));

        let submission_id = self
            .submissions
            .insert_submission(NewSubmission {
                user_id: user_id.to_string(),
                quiz_id: quiz_id.to_string(),
                score: score.correct as f64,
                score_kind: ScoreKind::CorrectCount,
            })
            .await?;

        tracing::info!(
            submission_id = %submission_id,
            user_id,
            quiz_id,
            correct = score.correct,
            selections = selections.len(),
            "Selections scored"
        );
        Ok(score.correct)
    }

    /// Records a percentage computed by the caller.
    pub async fn save(&self, user_id: &str, quiz_id: &str, percentage: f64) -> Result<String, AppError> {
        require_ids(user_id, quiz_id)?;
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(AppError::ValidationError(
                "Score must be a percentage between 0 and 100".to_string(),
            ));
        }

        let submission_id = self
            .submissions
            .insert_submission(NewSubmission {
                user_id: user_id.to_string(),
                quiz_id: quiz_id.to_string(),
                score: percentage,
                score_kind: ScoreKind::Percentage,
            })
            .await?;

        tracing::info!(submission_id = %submission_id, user_id, quiz_id, percentage, "Submission saved");
        Ok(submission_id)
    }

    /// Scores answer texts (one per question, in question order) against the
    /// stored quiz, then records the resulting percentage.
    pub async fn take(
        &self,
        user_id: &str,
        quiz_id: &str,
        responses: &[String],
    ) -> Result<TakeQuizOutcome, AppError> {
        require_ids(user_id, quiz_id)?;

        let details = self.quizzes.details(quiz_id).await?;
        let key: Vec<KeyedQuestion> = details.questions.iter().map(KeyedQuestion::from).collect();

        let score = scoring::score_quiz(&key, Responses::ByText(responses));
        let percentage = score.percentage();
        let submission_id = self.save(user_id, quiz_id, percentage).await?;

        Ok(TakeQuizOutcome {
            submission_id,
            score: percentage,
            correct_count: score.correct,
            total_questions: score.total,
            correct_answers: scoring::correct_answer_texts(&key),
        })
    }
}

fn require_ids(user_id: &str, quiz_id: &str) -> Result<(), AppError> {
    if user_id.trim().is_empty() {
        return Err(AppError::ValidationError("User id is required".to_string()));
    }
    if quiz_id.trim().is_empty() {
        return Err(AppError::ValidationError("Quiz id is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{question::NewQuestionInput, quiz::CreateQuizRequest},
        store::MemoryStore,
    };

    async fn setup() -> (Arc<MemoryStore>, Stores, SubmissionService, String) {
        let backend = Arc::new(MemoryStore::new());
        let stores = Stores::memory(backend.clone());
        let quiz_id = QuizService::new(&stores)
            .create(
                "author",
                CreateQuizRequest {
                    title: "Geo".to_string(),
                    questions: vec![NewQuestionInput {
                        text: "Capital of France?".to_string(),
                        answers: vec!["Paris".to_string(), "Lyon".to_string()],
                        correct_answer: 0,
                    }],
                },
            )
            .await
            .unwrap();
        let service = SubmissionService::new(&stores);
        (backend, stores, service, quiz_id)
    }

    async fn answer_ids(stores: &Stores, quiz_id: &str) -> (String, Vec<String>) {
        let details = QuizService::new(stores).details(quiz_id).await.unwrap();
        let question = &details.questions[0];
        (
            question.id.clone(),
            question.answers.iter().map(|a| a.id.clone()).collect(),
        )
    }

    #[tokio::test]
    async fn geo_scenario_counts_by_answer_id() {
        let (_, stores, service, quiz_id) = setup().await;
        let (question_id, answers) = answer_ids(&stores, &quiz_id).await;

        let paris = [Selection {
            question_id: question_id.clone(),
            answer_id: answers[0].clone(),
        }];
        let lyon = [Selection {
            question_id,
            answer_id: answers[1].clone(),
        }];

        assert_eq!(service.score("learner", &quiz_id, &paris).await.unwrap(), 1);
        assert_eq!(service.score("learner", &quiz_id, &lyon).await.unwrap(), 0);

        let recorded = stores.submissions.list_submissions_by_user("learner").await.unwrap();
        let scores: Vec<f64> = recorded.iter().map(|s| s.score).collect();
        assert_eq!(scores, vec![1.0, 0.0]);
        assert!(recorded.iter().all(|s| s.score_kind == ScoreKind::CorrectCount));
    }

    #[tokio::test]
    async fn unknown_answer_ids_score_zero() {
        let (_, stores, service, quiz_id) = setup().await;
        let (question_id, _) = answer_ids(&stores, &quiz_id).await;

        let bogus = [Selection {
            question_id,
            answer_id: "not-an-answer".to_string(),
        }];

        assert_eq!(service.score("learner", &quiz_id, &bogus).await.unwrap(), 0);
        assert_eq!(service.score("learner", &quiz_id, &[]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_submission_insert_is_a_persistence_error() {
        let (backend, stores, service, quiz_id) = setup().await;
        let (question_id, answers) = answer_ids(&stores, &quiz_id).await;
        backend.set_write_budget(Some(0));

        let err = service
            .score(
                "learner",
                &quiz_id,
                &[Selection {
                    question_id,
                    answer_id: answers[0].clone(),
                }],
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::PersistenceError(_)));
    }

    #[tokio::test]
    async fn save_accepts_only_percentages() {
        let (_, stores, service, quiz_id) = setup().await;

        service.save("learner", &quiz_id, 75.0).await.unwrap();
        for bad in [-1.0, 100.5, f64::NAN] {
            let err = service.save("learner", &quiz_id, bad).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)));
        }

        let recorded = stores.submissions.list_submissions_by_user("learner").await.unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].score_kind, ScoreKind::Percentage);
    }

    #[tokio::test]
    async fn take_scores_by_text_and_records_percentage() {
        let (_, stores, service, quiz_id) = setup().await;

        let outcome = service
            .take("learner", &quiz_id, &[" PARIS".to_string()])
            .await
            .unwrap();

        assert_eq!(outcome.score, 100.0);
        assert_eq!(outcome.correct_count, 1);
        assert_eq!(outcome.total_questions, 1);
        assert_eq!(outcome.correct_answers, vec!["Paris"]);

        let recorded = stores.submissions.list_submissions_by_user("learner").await.unwrap();
        assert_eq!(recorded[0].id, outcome.submission_id);
        assert_eq!(recorded[0].score, 100.0);
    }

    #[tokio::test]
    async fn take_of_unknown_quiz_is_not_found() {
        let (_, _, service, _) = setup().await;

        let err = service.take("learner", "missing", &[]).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
