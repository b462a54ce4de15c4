// src/routes.rs

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{history, quiz, submission},
    state::AppState,
    utils::caller::USER_ID_HEADER,
};

/// Assembles the main application router.
///
/// * Quiz authoring under `/api/quizzes`, single-question removal under `/api/questions`.
/// * Attempts (`score`, `submissions`, `take`) nested under their quiz.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(USER_ID_HEADER),
        ]);

    let quiz_routes = Router::new()
        .route("/", get(quiz::list_quizzes).post(quiz::create_quiz))
        .route(
            "/{id}",
            get(quiz::get_quiz_details)
                .put(quiz::update_quiz)
                .delete(quiz::delete_quiz),
        )
        .route("/{id}/score", post(submission::score_submission))
        .route("/{id}/submissions", post(submission::save_submission))
        .route("/{id}/take", post(submission::take_quiz));

    let question_routes = Router::new().route("/{id}", delete(quiz::delete_question));

    Router::new()
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/questions", question_routes)
        .route("/api/history", get(history::list_history))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
