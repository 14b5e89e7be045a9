//! Endpoints called by the messaging bot on behalf of its users

pub mod registration;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create bot API router
pub fn create_bot_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(registration::register))
        .route(
            "/participants/{telegram_id}",
            get(registration::participant_info),
        )
}
