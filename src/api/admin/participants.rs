//! Participant admin endpoints

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::Participant;
use crate::infrastructure::participant::RegisterParticipantRequest;

/// Admin-side registration with a code handed out in person
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterParticipantApiRequest {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub team_id: String,
    /// Recipient name once gifts have been assigned
    pub gift_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_id: Option<i64>,
    pub created_at: String,
}

impl From<&Participant> for ParticipantResponse {
    fn from(participant: &Participant) -> Self {
        Self {
            id: participant.id().to_string(),
            name: participant.name().to_string(),
            code: participant.code().to_string(),
            team_id: participant.team_id().to_string(),
            gift_to: participant.gift_to_name().map(String::from),
            telegram_id: participant.telegram_id(),
            created_at: participant.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListParticipantsResponse {
    pub participants: Vec<ParticipantResponse>,
    pub total: usize,
}

impl ListParticipantsResponse {
    pub fn from_participants(participants: Vec<ParticipantResponse>) -> Self {
        let total = participants.len();
        Self {
            participants,
            total,
        }
    }
}

/// GET /admin/participants
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<Json<ListParticipantsResponse>, ApiError> {
    debug!("Admin listing all participants");

    let participants = state
        .registration_service
        .list()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ListParticipantsResponse::from_participants(
        participants.iter().map(ParticipantResponse::from).collect(),
    )))
}

/// POST /admin/participants
pub async fn register_participant(
    State(state): State<AppState>,
    Json(request): Json<RegisterParticipantApiRequest>,
) -> Result<(StatusCode, Json<ParticipantResponse>), ApiError> {
    debug!(code = %request.code, "Admin registering participant");

    let registered = state
        .registration_service
        .register(RegisterParticipantRequest {
            name: request.name,
            code: request.code,
            telegram_id: None,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ParticipantResponse::from(&registered.participant)),
    ))
}
