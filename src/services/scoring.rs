// src/services/scoring.rs

//! One scoring function for both ways a learner's answers arrive.
//!
//! Id-keyed selections and text-keyed responses agree whenever answer text is
//! unique within each question; with duplicate texts the text strategy can
//! credit an answer the id strategy would not.

use std::collections::HashSet;

use crate::models::{answer::Answer, question::QuestionDetails, submission::Selection};

/// The answers of one question, as the scorer sees them.
#[derive(Debug, Clone, Copy)]
pub struct KeyedQuestion<'a> {
    pub question_id: &'a str,
    pub answers: &'a [Answer],
}

impl<'a> From<&'a QuestionDetails> for KeyedQuestion<'a> {
    fn from(question: &'a QuestionDetails) -> Self {
        Self {
            question_id: &question.id,
            answers: &question.answers,
        }
    }
}

impl KeyedQuestion<'_> {
    fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }
}

/// Comparison strategy for learner responses.
#[derive(Debug, Clone, Copy)]
pub enum Responses<'a> {
    /// Each selection counts when its answer id is flagged correct on the
    /// question the selection names. Order does not matter; duplicate
    /// selections each count.
    ById(&'a [Selection]),
    /// One response per question, in question order. A response counts when it
    /// matches the correct answer's text, trimmed and case-insensitively.
    ByText(&'a [String]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn percentage(&self) -> f64 {
        percentage(self.correct, self.total)
    }
}

/// `100 × correct / total`, or 0 when there is nothing to score.
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    100.0 * correct as f64 / total as f64
}

pub fn score_quiz(key: &[KeyedQuestion<'_>], responses: Responses<'_>) -> Score {
    let correct = match responses {
        Responses::ById(selections) => {
            let correct_pairs: HashSet<(&str, &str)> = key
                .iter()
                .flat_map(|q| {
                    q.answers
                        .iter()
                        .filter(|a| a.is_correct)
                        .map(move |a| (q.question_id, a.id.as_str()))
                })
                .collect();

            selections
                .iter()
                .filter(|s| correct_pairs.contains(&(s.question_id.as_str(), s.answer_id.as_str())))
                .count()
        }
        Responses::ByText(texts) => key
            .iter()
            .zip(texts.iter())
            .filter(|(question, response)| {
                question
                    .correct_answer()
                    .is_some_and(|answer| normalize(&answer.text) == normalize(response))
            })
            .count(),
    };

    Score {
        correct,
        total: key.len(),
    }
}

/// Text of each question's correct answer, in question order. Questions
/// without a correct answer are skipped.
pub fn correct_answer_texts(key: &[KeyedQuestion<'_>]) -> Vec<String> {
    key.iter()
        .filter_map(|q| q.correct_answer())
        .map(|a| a.text.clone())
        .collect()
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
