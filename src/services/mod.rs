// src/services/mod.rs

pub mod history;
pub mod quiz;
pub mod scoring;
pub mod submission;

pub use history::HistoryService;
pub use quiz::QuizService;
pub use submission::SubmissionService;
