//! Gift assignment admin endpoints

use axum::extract::State;
use serde::Serialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path};
use crate::infrastructure::assignment::GiftPair;

#[derive(Debug, Clone, Serialize)]
pub struct GiftPairResponse {
    pub giver_id: String,
    pub giver_name: String,
    pub recipient_id: String,
    pub recipient_name: String,
}

impl From<GiftPair> for GiftPairResponse {
    fn from(pair: GiftPair) -> Self {
        Self {
            giver_id: pair.giver_id,
            giver_name: pair.giver_name,
            recipient_id: pair.recipient_id,
            recipient_name: pair.recipient_name,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentsResponse {
    pub team_id: String,
    pub pairs: Vec<GiftPairResponse>,
    pub total: usize,
}

impl AssignmentsResponse {
    fn new(team_id: String, pairs: Vec<GiftPair>) -> Self {
        let pairs: Vec<GiftPairResponse> = pairs.into_iter().map(Into::into).collect();
        Self {
            team_id,
            total: pairs.len(),
            pairs,
        }
    }
}

/// POST /admin/teams/:team_id/assignments
pub async fn assign_gifts(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<AssignmentsResponse>, ApiError> {
    debug!(team_id = %team_id, "Admin assigning gifts");

    let pairs = state
        .assignment_service
        .assign(&team_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(AssignmentsResponse::new(team_id, pairs)))
}

/// GET /admin/teams/:team_id/assignments
pub async fn get_assignments(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<AssignmentsResponse>, ApiError> {
    debug!(team_id = %team_id, "Admin reading assignments");

    let pairs = state
        .assignment_service
        .current(&team_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(AssignmentsResponse::new(team_id, pairs)))
}
