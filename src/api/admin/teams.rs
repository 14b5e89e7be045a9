//! Team management admin endpoints

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::participants::{ListParticipantsResponse, ParticipantResponse};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path};
use crate::domain::team::{CodeStatus, RedemptionCode, Team};
use crate::infrastructure::team::CreateTeamRequest;

/// Request to create a new team
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamApiRequest {
    pub name: String,
    #[serde(default)]
    pub rules: Option<String>,
    #[serde(default)]
    pub participant_count: Option<usize>,
}

/// Team response for admin API
#[derive(Debug, Clone, Serialize)]
pub struct TeamResponse {
    pub id: String,
    pub name: String,
    pub rules: String,
    pub participant_count: usize,
    pub codes: Vec<String>,
    /// Registered names, in registration order
    pub participants: Vec<String>,
    /// Every code has been redeemed
    pub full: bool,
    pub created_at: String,
}

impl From<&Team> for TeamResponse {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id().as_str().to_string(),
            name: team.name().to_string(),
            rules: team.rules().to_string(),
            participant_count: team.capacity(),
            codes: team.codes().iter().map(|c| c.code().to_string()).collect(),
            participants: team
                .participant_names()
                .into_iter()
                .map(String::from)
                .collect(),
            full: team.is_full(),
            created_at: team.created_at().to_rfc3339(),
        }
    }
}

/// List teams response
#[derive(Debug, Clone, Serialize)]
pub struct ListTeamsResponse {
    pub teams: Vec<TeamResponse>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeResponse {
    pub code: String,
    pub redeemed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
}

impl From<&RedemptionCode> for CodeResponse {
    fn from(code: &RedemptionCode) -> Self {
        let participant_id = match code.status() {
            CodeStatus::Redeemed { participant_id } => Some(participant_id.to_string()),
            CodeStatus::Unredeemed => None,
        };

        Self {
            code: code.code().to_string(),
            redeemed: participant_id.is_some(),
            participant_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListCodesResponse {
    pub team_id: String,
    pub codes: Vec<CodeResponse>,
    pub redeemed: usize,
    pub total: usize,
}

/// GET /admin/teams
pub async fn list_teams(
    State(state): State<AppState>,
) -> Result<Json<ListTeamsResponse>, ApiError> {
    debug!("Admin listing all teams");

    let teams = state.team_service.list().await.map_err(ApiError::from)?;

    let team_responses: Vec<TeamResponse> = teams.iter().map(TeamResponse::from).collect();
    let total = team_responses.len();

    Ok(Json(ListTeamsResponse {
        teams: team_responses,
        total,
    }))
}

/// POST /admin/teams
pub async fn create_team(
    State(state): State<AppState>,
    Json(request): Json<CreateTeamApiRequest>,
) -> Result<(StatusCode, Json<TeamResponse>), ApiError> {
    let participant_count = request
        .participant_count
        .unwrap_or(state.exchange.default_participant_count);

    debug!(name = %request.name, participant_count, "Admin creating team");

    if !state.exchange.allows_participant_count(participant_count) {
        return Err(ApiError::bad_request(format!(
            "participant_count must be between {} and {}",
            state.exchange.min_participants, state.exchange.max_participants
        ))
        .with_param("participant_count")
        .with_code("participant_count_out_of_range"));
    }

    let service_request = CreateTeamRequest {
        name: request.name,
        rules: request.rules,
        participant_count,
    };

    let team = state
        .team_service
        .create(service_request)
        .await
        .map_err(ApiError::from)?;

    Ok((StatusCode::CREATED, Json(TeamResponse::from(&team))))
}

/// GET /admin/teams/:team_id
pub async fn get_team(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<TeamResponse>, ApiError> {
    debug!(team_id = %team_id, "Admin getting team");

    let team = find_team(&state, &team_id).await?;

    Ok(Json(TeamResponse::from(&team)))
}

/// GET /admin/teams/:team_id/codes
pub async fn list_team_codes(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<ListCodesResponse>, ApiError> {
    debug!(team_id = %team_id, "Admin listing team codes");

    let team = find_team(&state, &team_id).await?;

    Ok(Json(ListCodesResponse {
        team_id: team.id().to_string(),
        codes: team.codes().iter().map(CodeResponse::from).collect(),
        redeemed: team.redeemed_count(),
        total: team.capacity(),
    }))
}

/// GET /admin/teams/:team_id/participants
pub async fn list_team_participants(
    State(state): State<AppState>,
    Path(team_id): Path<String>,
) -> Result<Json<ListParticipantsResponse>, ApiError> {
    debug!(team_id = %team_id, "Admin listing team participants");

    let participants = state
        .registration_service
        .list_by_team(&team_id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListParticipantsResponse::from_participants(
        participants.iter().map(ParticipantResponse::from).collect(),
    )))
}

async fn find_team(state: &AppState, team_id: &str) -> Result<Team, ApiError> {
    state
        .team_service
        .get(team_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found(format!("Team '{}' not found", team_id)))
}
