use crate::{
    config::Config,
    services::{HistoryService, QuizService, SubmissionService},
    store::Stores,
};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub quizzes: QuizService,
    pub submissions: SubmissionService,
    pub history: HistoryService,
    pub config: Config,
}

impl AppState {
    pub fn new(stores: &Stores, config: Config) -> Self {
        Self {
            quizzes: QuizService::new(stores),
            submissions: SubmissionService::new(stores),
            history: HistoryService::new(stores),
            config,
        }
    }
}

impl FromRef<AppState> for QuizService {
    fn from_ref(state: &AppState) -> Self {
        state.quizzes.clone()
    }
}

impl FromRef<AppState> for SubmissionService {
    fn from_ref(state: &AppState) -> Self {
        state.submissions.clone()
    }
}

impl FromRef<AppState> for HistoryService {
    fn from_ref(state: &AppState) -> Self {
        state.history.clone()
    }
}
