use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Chat
        .route("/chat/send", post(handlers::send_message))
        .route("/chat/transcript", get(handlers::get_transcript))
        .route("/chat/reset", post(handlers::reset_chat))
        // Plant analysis
        .route("/plants/analyze", post(handlers::analyze_plant))
        // Voice capture
        .route("/voice/start", post(handlers::voice_start))
        .route("/voice/stop", post(handlers::voice_stop))
        .route("/voice/state", get(handlers::voice_state))
        .route("/voice/event", post(handlers::voice_event))
        // Browser clients live on another origin
        .layer(CorsLayer::permissive())
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
