//! Admin API endpoints for running an exchange

pub mod assignments;
pub mod participants;
pub mod teams;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        // Teams and their codes
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route("/teams/{team_id}", get(teams::get_team))
        .route("/teams/{team_id}/codes", get(teams::list_team_codes))
        .route(
            "/teams/{team_id}/participants",
            get(teams::list_team_participants),
        )
        // Gift draws
        .route(
            "/teams/{team_id}/assignments",
            get(assignments::get_assignments).post(assignments::assign_gifts),
        )
        // Participants
        .route(
            "/participants",
            get(participants::list_participants).post(participants::register_participant),
        )
}
