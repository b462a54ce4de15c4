// src/services/quiz.rs

//! Quiz Aggregate Service.
//!
//! The only component that writes to more than one store in a single call.
//! Writes run one store call at a time, children are created after their parent
//! and deleted before it. Nothing wraps the steps in a transaction: a failing
//! step aborts the operation, earlier steps stay applied and the returned
//! `PersistenceError` reports how far the operation got.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use validator::Validate;

use crate::{
    error::{AppError, StoreError},
    models::{
        answer::{Answer, AnswerChanges, NewAnswer},
        question::{NewQuestion, Question, QuestionDetails},
        quiz::{CreateQuizRequest, NewQuiz, Quiz, QuizChanges, QuizDetails, UpdateQuizRequest},
    },
    services::scoring,
    store::{AnswerStore, QuestionStore, QuizStore, Stores},
};

/// Completed writes of one multi-step operation.
#[derive(Debug)]
struct WriteLog {
    operation: &'static str,
    steps: Vec<String>,
}

impl WriteLog {
    fn new(operation: &'static str) -> Self {
        Self {
            operation,
            steps: Vec::new(),
        }
    }

    fn record(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    fn fail(&self, failed_step: &str, err: StoreError) -> AppError {
        tracing::error!(
            operation = self.operation,
            completed = ?self.steps,
            "{} failed: {:?}",
            failed_step,
            err
        );
        AppError::PersistenceError(format!(
            "{} stopped at '{}' after {} completed write(s); re-fetch before retrying",
            self.operation,
            failed_step,
            self.steps.len()
        ))
    }
}

#[derive(Clone)]
pub struct QuizService {
    quizzes: Arc<dyn QuizStore>,
    questions: Arc<dyn QuestionStore>,
    answers: Arc<dyn AnswerStore>,
}

impl QuizService {
    pub fn new(stores: &Stores) -> Self {
        Self {
            quizzes: stores.quizzes.clone(),
            questions: stores.questions.clone(),
            answers: stores.answers.clone(),
        }
    }

    /// Creates a quiz, then its questions in order, then each question's answers.
    ///
    /// Returns the new quiz id. On a failed insert the rows written so far are left
    /// in place; the error message names the partially created quiz.
    pub async fn create(&self, owner_id: &str, req: CreateQuizRequest) -> Result<String, AppError> {
        if owner_id.trim().is_empty() {
            return Err(AppError::ValidationError("Owner id is required".to_string()));
        }
        req.validate()?;

        for (index, question) in req.questions.iter().enumerate() {
            if question.correct_answer >= question.answers.len() {
                return Err(AppError::ValidationError(format!(
                    "Question {} marks answer {} as correct but has only {} answers",
                    index + 1,
                    question.correct_answer,
                    question.answers.len()
                )));
            }
        }

        // Every question has exactly one correct slot by now.
        let marked = req.questions.len();
        let score = scoring::percentage(marked, req.questions.len());

        let mut log = WriteLog::new("create quiz");

        let quiz_id = self
            .quizzes
            .insert_quiz(NewQuiz {
                owner_id: owner_id.to_string(),
                title: req.title.clone(),
                score: Some(score),
            })
            .await
            .map_err(|e| log.fail("insert quiz", e))?;
        log.record(format!("quiz {quiz_id}"));

        for (q_pos, question) in req.questions.iter().enumerate() {
            let question_id = self
                .questions
                .insert_question(NewQuestion {
                    quiz_id: quiz_id.clone(),
                    text: question.text.clone(),
                    position: q_pos as i32,
                })
                .await
                .map_err(|e| log.fail(&format!("insert question {} of quiz {quiz_id}", q_pos + 1), e))?;
            log.record(format!("question {question_id}"));

            for (a_pos, text) in question.answers.iter().enumerate() {
                let answer_id = self
                    .answers
                    .insert_answer(NewAnswer {
                        question_id: question_id.clone(),
                        text: text.clone(),
                        is_correct: a_pos == question.correct_answer,
                        position: a_pos as i32,
                    })
                    .await
                    .map_err(|e| {
                        log.fail(
                            &format!("insert answer {} of question {question_id} in quiz {quiz_id}", a_pos + 1),
                            e,
                        )
                    })?;
                log.record(format!("answer {answer_id}"));
            }
        }

        tracing::info!(
            quiz_id = %quiz_id,
            owner_id,
            writes = log.steps.len(),
            "Quiz created"
        );
        Ok(quiz_id)
    }

    /// Updates title and score, then the text of every referenced question, then
    /// text and correctness of every referenced answer.
    ///
    /// Entries without an id are skipped: this path never inserts rows.
    /// All references and the one-correct-answer rule are checked before the first write.
    pub async fn update(&self, quiz_id: &str, req: UpdateQuizRequest) -> Result<(), AppError> {
        req.validate()?;
        if req.score.is_some_and(|s| !s.is_finite()) {
            return Err(AppError::ValidationError("Score must be a finite number".to_string()));
        }

        self.quizzes
            .get_quiz(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz {quiz_id} not found")))?;

        let stored_questions = self.questions.list_questions_by_quiz(quiz_id).await?;
        let question_ids: Vec<String> = stored_questions.iter().map(|q| q.id.clone()).collect();
        let stored_answers = if question_ids.is_empty() {
            Vec::new()
        } else {
            self.answers.list_answers_by_questions(&question_ids).await?
        };

        // Answers as they will look after the update, keyed by question.
        let mut merged: HashMap<&str, Vec<Answer>> = question_ids
            .iter()
            .map(|id| (id.as_str(), Vec::new()))
            .collect();
        for answer in &stored_answers {
            if let Some(list) = merged.get_mut(answer.question_id.as_str()) {
                list.push(answer.clone());
            }
        }

        let known_questions: HashSet<&str> = question_ids.iter().map(String::as_str).collect();
        for update in &req.questions {
            let Some(question_id) = update.id.as_deref() else {
                tracing::warn!(quiz_id, "Skipping question without id: update does not insert");
                continue;
            };
            if !known_questions.contains(question_id) {
                return Err(AppError::ValidationError(format!(
                    "Question {question_id} does not belong to quiz {quiz_id}"
                )));
            }
            if update.answers.is_empty() {
                continue;
            }

            let Some(answers) = merged.get_mut(question_id) else {
                continue;
            };
            for answer_update in &update.answers {
                let Some(answer_id) = answer_update.id.as_deref() else {
                    tracing::warn!(question_id, "Skipping answer without id: update does not insert");
                    continue;
                };
                let stored = answers.iter_mut().find(|a| a.id == answer_id).ok_or_else(|| {
                    AppError::ValidationError(format!(
                        "Answer {answer_id} does not belong to question {question_id}"
                    ))
                })?;
                stored.text = answer_update.text.clone();
                stored.is_correct = answer_update.is_correct;
            }

            let correct = answers.iter().filter(|a| a.is_correct).count();
            if correct != 1 {
                return Err(AppError::ValidationError(format!(
                    "Question {question_id} must have exactly one correct answer, found {correct}"
                )));
            }
        }

        let score = match req.score {
            Some(score) => score,
            None => {
                let marked = merged
                    .values()
                    .filter(|answers| answers.iter().any(|a| a.is_correct))
                    .count();
                scoring::percentage(marked, question_ids.len())
            }
        };

        let mut log = WriteLog::new("update quiz");

        let updated = self
            .quizzes
            .update_quiz(
                quiz_id,
                QuizChanges {
                    title: req.title.clone(),
                    score: Some(score),
                },
            )
            .await
            .map_err(|e| log.fail("update quiz", e))?;
        if !updated {
            return Err(AppError::NotFound(format!("Quiz {quiz_id} not found")));
        }
        log.record(format!("quiz {quiz_id}"));

        for update in &req.questions {
            let Some(question_id) = update.id.as_deref() else {
                continue;
            };
            let updated = self
                .questions
                .update_question_text(question_id, &update.text)
                .await
                .map_err(|e| log.fail(&format!("update question {question_id}"), e))?;
            if !updated {
                return Err(AppError::NotFound(format!("Question {question_id} not found")));
            }
            log.record(format!("question {question_id}"));

            for answer_update in &update.answers {
                let Some(answer_id) = answer_update.id.as_deref() else {
                    continue;
                };
                let updated = self
                    .answers
                    .update_answer(
                        answer_id,
                        AnswerChanges {
                            text: answer_update.text.clone(),
                            is_correct: answer_update.is_correct,
                        },
                    )
                    .await
                    .map_err(|e| log.fail(&format!("update answer {answer_id}"), e))?;
                if !updated {
                    return Err(AppError::NotFound(format!("Answer {answer_id} not found")));
                }
                log.record(format!("answer {answer_id}"));
            }
        }

        tracing::info!(quiz_id, writes = log.steps.len(), "Quiz updated");
        Ok(())
    }

    /// Loads a quiz with its questions and answers: quiz by id, questions by
    /// quiz id, then answers by the resulting question ids.
    pub async fn details(&self, quiz_id: &str) -> Result<QuizDetails, AppError> {
        let quiz = self
            .quizzes
            .get_quiz(quiz_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz {quiz_id} not found")))?;

        let questions = self.questions.list_questions_by_quiz(quiz_id).await?;
        let answers = self.load_answers(&questions).await?;

        let mut details = assemble(vec![quiz], questions, answers);
        details
            .pop()
            .ok_or_else(|| AppError::NotFound(format!("Quiz {quiz_id} not found")))
    }

    /// Every quiz owned by `user_id`, nested. Children are fetched by foreign-key
    /// set, one call per level, instead of once per quiz and question.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<QuizDetails>, AppError> {
        let quizzes = self.quizzes.list_quizzes_by_owner(user_id).await?;
        if quizzes.is_empty() {
            return Ok(Vec::new());
        }

        let quiz_ids: Vec<String> = quizzes.iter().map(|q| q.id.clone()).collect();
        let questions = self.questions.list_questions_by_quizzes(&quiz_ids).await?;
        let answers = self.load_answers(&questions).await?;

        Ok(assemble(quizzes, questions, answers))
    }

    /// Deletes the quiz's answers, then its questions, then the quiz row.
    pub async fn delete_quiz(&self, quiz_id: &str) -> Result<(), AppError> {
        if quiz_id.trim().is_empty() {
            return Err(AppError::ValidationError("Quiz id is required".to_string()));
        }

        let mut log = WriteLog::new("delete quiz");

        let questions = self
            .questions
            .list_questions_by_quiz(quiz_id)
            .await
            .map_err(|e| log.fail("list questions", e))?;
        let question_ids: Vec<String> = questions.into_iter().map(|q| q.id).collect();

        if !question_ids.is_empty() {
            let removed = self
                .answers
                .delete_answers_by_questions(&question_ids)
                .await
                .map_err(|e| log.fail("delete answers", e))?;
            log.record(format!("{removed} answer(s)"));
        }

        let removed = self
            .questions
            .delete_questions_by_quiz(quiz_id)
            .await
            .map_err(|e| log.fail("delete questions", e))?;
        log.record(format!("{removed} question(s)"));

        let existed = self
            .quizzes
            .delete_quiz(quiz_id)
            .await
            .map_err(|e| log.fail("delete quiz row", e))?;
        log.record(format!("quiz {quiz_id}"));

        if !existed {
            tracing::debug!(quiz_id, "Delete of an unknown quiz id");
        }
        tracing::info!(quiz_id, steps = ?log.steps, "Quiz deleted");
        Ok(())
    }

    /// Removes a single question from its quiz: answers first, then the question.
    pub async fn delete_question(&self, question_id: &str) -> Result<(), AppError> {
        if question_id.trim().is_empty() {
            return Err(AppError::ValidationError("Question id is required".to_string()));
        }

        let mut log = WriteLog::new("delete question");

        let removed = self
            .answers
            .delete_answers_by_question(question_id)
            .await
            .map_err(|e| log.fail("delete answers", e))?;
        log.record(format!("{removed} answer(s)"));

        self.questions
            .delete_question(question_id)
            .await
            .map_err(|e| log.fail("delete question row", e))?;

        tracing::info!(question_id, answers = removed, "Question deleted");
        Ok(())
    }

    async fn load_answers(&self, questions: &[Question]) -> Result<Vec<Answer>, AppError> {
        if questions.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = questions.iter().map(|q| q.id.clone()).collect();
        Ok(self.answers.list_answers_by_questions(&ids).await?)
    }
}

/// Nests answers under questions and questions under quizzes. Input order is
/// kept at every level; children without a listed parent are dropped.
fn assemble(quizzes: Vec<Quiz>, questions: Vec<Question>, answers: Vec<Answer>) -> Vec<QuizDetails> {
    let mut answers_by_question: HashMap<String, Vec<Answer>> = HashMap::new();
    for answer in answers {
        answers_by_question
            .entry(answer.question_id.clone())
            .or_default()
            .push(answer);
    }

    let mut questions_by_quiz: HashMap<String, Vec<QuestionDetails>> = HashMap::new();
    for question in questions {
        let answers = answers_by_question.remove(&question.id).unwrap_or_default();
        questions_by_quiz
            .entry(question.quiz_id)
            .or_default()
            .push(QuestionDetails {
                id: question.id,
                text: question.text,
                answers,
            });
    }

    quizzes
        .into_iter()
        .map(|quiz| {
            let questions = questions_by_quiz.remove(&quiz.id).unwrap_or_default();
            QuizDetails { quiz, questions }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::question::{AnswerUpdate, NewQuestionInput, QuestionUpdate},
        store::MemoryStore,
    };

    fn setup() -> (Arc<MemoryStore>, Stores, QuizService) {
        let backend = Arc::new(MemoryStore::new());
        let stores = Stores::memory(backend.clone());
        let service = QuizService::new(&stores);
        (backend, stores, service)
    }

    fn question(text: &str, answers: &[&str], correct_answer: usize) -> NewQuestionInput {
        NewQuestionInput {
            text: text.to_string(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
            correct_answer,
        }
    }

    fn geo_quiz() -> CreateQuizRequest {
        CreateQuizRequest {
            title: "Geo".to_string(),
            questions: vec![
                question("Capital of France?", &["Paris", "Lyon"], 0),
                question("Longest river?", &["Amazon", "Nile", "Danube"], 1),
            ],
        }
    }

    #[tokio::test]
    async fn create_then_details_round_trips() {
        let (_, _, service) = setup();
        let req = geo_quiz();

        let id = service.create("user-1", req.clone()).await.unwrap();
        let details = service.details(&id).await.unwrap();

        assert_eq!(details.quiz.title, "Geo");
        assert_eq!(details.quiz.owner_id, "user-1");
        assert_eq!(details.quiz.score, Some(100.0));
        assert_eq!(details.questions.len(), req.questions.len());
        for (stored, input) in details.questions.iter().zip(&req.questions) {
            assert_eq!(stored.text, input.text);
            let texts: Vec<&str> = stored.answers.iter().map(|a| a.text.as_str()).collect();
            let expected: Vec<&str> = input.answers.iter().map(String::as_str).collect();
            assert_eq!(texts, expected);
            let flags: Vec<bool> = stored.answers.iter().map(|a| a.is_correct).collect();
            let expected_flags: Vec<bool> = (0..input.answers.len())
                .map(|i| i == input.correct_answer)
                .collect();
            assert_eq!(flags, expected_flags);
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_before_writing() {
        let (_, stores, service) = setup();

        let mut empty_title = geo_quiz();
        empty_title.title = "   ".to_string();
        let mut no_questions = geo_quiz();
        no_questions.questions.clear();
        let mut bad_index = geo_quiz();
        bad_index.questions[0].correct_answer = 2;
        let mut one_answer = geo_quiz();
        one_answer.questions[0].answers.truncate(1);
        one_answer.questions[0].correct_answer = 0;

        for req in [empty_title, no_questions, bad_index, one_answer] {
            let err = service.create("user-1", req).await.unwrap_err();
            assert!(matches!(err, AppError::ValidationError(_)), "{err:?}");
        }
        let err = service.create("", geo_quiz()).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));

        assert!(stores.quizzes.list_quizzes_by_owner("user-1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_create_reports_partial_quiz() {
        let (backend, stores, service) = setup();
        // Quiz row and first question succeed, first answer fails.
        backend.set_write_budget(Some(2));

        let err = service.create("user-1", geo_quiz()).await.unwrap_err();
        let AppError::PersistenceError(message) = err else {
            panic!("expected persistence error");
        };
        assert!(message.contains("after 2 completed write(s)"), "{message}");

        backend.set_write_budget(None);
        let left = stores.quizzes.list_quizzes_by_owner("user-1").await.unwrap();
        assert_eq!(left.len(), 1);
        assert!(message.contains(&left[0].id));

        // The partial quiz can still be cleaned up through the aggregate delete.
        service.delete_quiz(&left[0].id).await.unwrap();
        assert!(stores.questions.list_questions_by_quiz(&left[0].id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_quiz_removes_every_child() {
        let (_, stores, service) = setup();
        let id = service.create("user-1", geo_quiz()).await.unwrap();
        let question_ids: Vec<String> = service
            .details(&id)
            .await
            .unwrap()
            .questions
            .into_iter()
            .map(|q| q.id)
            .collect();

        service.delete_quiz(&id).await.unwrap();

        assert!(matches!(service.details(&id).await, Err(AppError::NotFound(_))));
        assert!(stores.questions.list_questions_by_quiz(&id).await.unwrap().is_empty());
        assert!(
            stores
                .answers
                .list_answers_by_questions(&question_ids)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn delete_question_keeps_siblings() {
        let (_, stores, service) = setup();
        let id = service.create("user-1", geo_quiz()).await.unwrap();
        let before = service.details(&id).await.unwrap();
        let removed = before.questions[0].id.clone();

        service.delete_question(&removed).await.unwrap();

        let after = service.details(&id).await.unwrap();
        assert_eq!(after.questions.len(), 1);
        assert_eq!(after.questions[0].text, "Longest river?");
        assert_eq!(after.questions[0].answers.len(), 3);
        assert!(
            stores
                .answers
                .list_answers_by_questions(&[removed])
                .await
                .unwrap()
                .is_empty()
        );

        let err = service.delete_question(" ").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    fn text_only_update(details: &QuizDetails) -> UpdateQuizRequest {
        UpdateQuizRequest {
            title: "Geography".to_string(),
            score: None,
            questions: details
                .questions
                .iter()
                .map(|q| QuestionUpdate {
                    id: Some(q.id.clone()),
                    text: format!("{} (edited)", q.text),
                    answers: Vec::new(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn text_only_update_keeps_correct_flags() {
        let (_, _, service) = setup();
        let id = service.create("user-1", geo_quiz()).await.unwrap();
        let before = service.details(&id).await.unwrap();

        service.update(&id, text_only_update(&before)).await.unwrap();

        let after = service.details(&id).await.unwrap();
        assert_eq!(after.quiz.title, "Geography");
        assert_eq!(after.questions[0].text, "Capital of France? (edited)");
        for (a, b) in before.questions.iter().zip(&after.questions) {
            assert_eq!(a.answers, b.answers);
        }
    }

    #[tokio::test]
    async fn update_moves_the_correct_answer() {
        let (_, _, service) = setup();
        let id = service.create("user-1", geo_quiz()).await.unwrap();
        let before = service.details(&id).await.unwrap();
        let q = &before.questions[0];

        let req = UpdateQuizRequest {
            title: "Geo".to_string(),
            score: Some(50.0),
            questions: vec![QuestionUpdate {
                id: Some(q.id.clone()),
                text: q.text.clone(),
                answers: vec![
                    AnswerUpdate {
                        id: Some(q.answers[0].id.clone()),
                        text: "Paris".to_string(),
                        is_correct: false,
                    },
                    AnswerUpdate {
                        id: Some(q.answers[1].id.clone()),
                        text: "Lyon".to_string(),
                        is_correct: true,
                    },
                ],
            }],
        };
        service.update(&id, req).await.unwrap();

        let after = service.details(&id).await.unwrap();
        assert_eq!(after.quiz.score, Some(50.0));
        assert_eq!(after.questions[0].correct_answer().unwrap().text, "Lyon");
    }

    #[tokio::test]
    async fn update_rejects_two_correct_answers_without_writing() {
        let (_, _, service) = setup();
        let id = service.create("user-1", geo_quiz()).await.unwrap();
        let before = service.details(&id).await.unwrap();
        let q = &before.questions[0];

        let req = UpdateQuizRequest {
            title: "Changed".to_string(),
            score: None,
            questions: vec![QuestionUpdate {
                id: Some(q.id.clone()),
                text: q.text.clone(),
                answers: vec![AnswerUpdate {
                    id: Some(q.answers[1].id.clone()),
                    text: "Lyon".to_string(),
                    is_correct: true,
                }],
            }],
        };
        let err = service.update(&id, req).await.unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(service.details(&id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn update_rejects_foreign_question_ids() {
        let (_, _, service) = setup();
        let first = service.create("user-1", geo_quiz()).await.unwrap();
        let second = service.create("user-1", geo_quiz()).await.unwrap();
        let other = service.details(&second).await.unwrap();

        let err = service
            .update(&first, text_only_update(&other))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn update_skips_entries_without_ids() {
        let (_, _, service) = setup();
        let id = service.create("user-1", geo_quiz()).await.unwrap();

        let req = UpdateQuizRequest {
            title: "Geo".to_string(),
            score: None,
            questions: vec![QuestionUpdate {
                id: None,
                text: "Brand new?".to_string(),
                answers: Vec::new(),
            }],
        };
        service.update(&id, req).await.unwrap();

        assert_eq!(service.details(&id).await.unwrap().questions.len(), 2);
    }

    #[tokio::test]
    async fn failed_update_stops_at_first_question() {
        let (backend, _, service) = setup();
        let id = service.create("user-1", geo_quiz()).await.unwrap();
        let before = service.details(&id).await.unwrap();

        let mut req = text_only_update(&before);
        let river = &before.questions[1];
        req.questions[1].answers = vec![AnswerUpdate {
            id: Some(river.answers[0].id.clone()),
            text: "Amazon River".to_string(),
            is_correct: false,
        }];

        // Only the quiz row update goes through.
        backend.set_write_budget(Some(1));
        let err = service.update(&id, req).await.unwrap_err();
        backend.set_write_budget(None);

        let AppError::PersistenceError(message) = err else {
            panic!("expected persistence error");
        };
        assert!(
            message.contains(&format!("update question {}", before.questions[0].id)),
            "{message}"
        );
        assert!(message.contains("after 1 completed write(s)"), "{message}");

        let after = service.details(&id).await.unwrap();
        assert_eq!(after.quiz.title, "Geography");
        for (a, b) in before.questions.iter().zip(&after.questions) {
            assert_eq!(a.text, b.text);
            assert_eq!(a.answers, b.answers);
        }
    }

    #[tokio::test]
    async fn failed_delete_keeps_parents_of_removed_answers() {
        let (backend, stores, service) = setup();
        let id = service.create("user-1", geo_quiz()).await.unwrap();
        let question_ids: Vec<String> = service
            .details(&id)
            .await
            .unwrap()
            .questions
            .into_iter()
            .map(|q| q.id)
            .collect();

        // Answers go, the question delete fails.
        backend.set_write_budget(Some(1));
        let err = service.delete_quiz(&id).await.unwrap_err();
        backend.set_write_budget(None);

        let AppError::PersistenceError(message) = err else {
            panic!("expected persistence error");
        };
        assert!(message.contains("'delete questions'"), "{message}");
        assert!(message.contains("after 1 completed write(s)"), "{message}");

        assert!(
            stores
                .answers
                .list_answers_by_questions(&question_ids)
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(stores.questions.list_questions_by_quiz(&id).await.unwrap().len(), 2);
        assert!(stores.quizzes.get_quiz(&id).await.unwrap().is_some());

        // Retrying finishes the job.
        service.delete_quiz(&id).await.unwrap();
        assert!(matches!(service.details(&id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_of_missing_quiz_is_not_found() {
        let (_, _, service) = setup();
        let req = UpdateQuizRequest {
            title: "Geo".to_string(),
            score: None,
            questions: Vec::new(),
        };

        let err = service.update("missing", req).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_for_user_nests_only_own_quizzes() {
        let (_, _, service) = setup();
        let a = service.create("user-1", geo_quiz()).await.unwrap();
        service.create("user-2", geo_quiz()).await.unwrap();
        let b = service.create("user-1", geo_quiz()).await.unwrap();

        let list = service.list_for_user("user-1").await.unwrap();

        let ids: Vec<&str> = list.iter().map(|d| d.quiz.id.as_str()).collect();
        assert_eq!(ids, vec![a.as_str(), b.as_str()]);
        assert_eq!(list[0], service.details(&a).await.unwrap());
        assert!(service.list_for_user("nobody").await.unwrap().is_empty());
    }
}
