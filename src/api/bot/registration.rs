//! Code redemption and self-lookup for bot users

use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path};
use crate::infrastructure::participant::RegisterParticipantRequest;

#[derive(Debug, Clone, Deserialize)]
pub struct BotRegisterRequest {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub telegram_id: Option<i64>,
}

/// What the bot tells a freshly registered user
#[derive(Debug, Clone, Serialize)]
pub struct BotRegisterResponse {
    pub participant_id: String,
    pub team_name: String,
    pub team_rules: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BotParticipantResponse {
    pub name: String,
    pub team_name: String,
    pub rules: String,
    /// `null` until the team's draw has run
    pub gift_to: Option<String>,
}

/// POST /bot/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<BotRegisterRequest>,
) -> Result<(StatusCode, Json<BotRegisterResponse>), ApiError> {
    debug!(code = %request.code, telegram_id = ?request.telegram_id, "Bot registration");

    let registered = state
        .registration_service
        .register(RegisterParticipantRequest {
            name: request.name,
            code: request.code,
            telegram_id: request.telegram_id,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(BotRegisterResponse {
            participant_id: registered.participant.id().to_string(),
            team_name: registered.team.name().to_string(),
            team_rules: registered.team.rules().to_string(),
        }),
    ))
}

/// GET /bot/participants/:telegram_id
pub async fn participant_info(
    State(state): State<AppState>,
    Path(telegram_id): Path<i64>,
) -> Result<Json<BotParticipantResponse>, ApiError> {
    debug!(telegram_id, "Bot participant lookup");

    let info = state
        .registration_service
        .find_by_telegram_id(telegram_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Participant not registered"))?;

    Ok(Json(BotParticipantResponse {
        name: info.participant.name().to_string(),
        gift_to: info.participant.gift_to_name().map(String::from),
        team_name: info.team_name,
        rules: info.team_rules,
    }))
}
