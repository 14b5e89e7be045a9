//! Participant entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    validate_participant_id, validate_participant_name, ParticipantValidationError,
};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::team::TeamId;

/// Participant identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Result<Self, ParticipantValidationError> {
        let id = id.into();
        validate_participant_id(&id)?;
        Ok(Self(id))
    }

    /// Generate a fresh, time-ordered identifier
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = ParticipantValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for ParticipantId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Who a participant gives their gift to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftAssignment {
    pub recipient_id: ParticipantId,
    pub recipient_name: String,
}

/// Participant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    code: String,
    team_id: TeamId,
    #[serde(skip_serializing_if = "Option::is_none")]
    gift_to: Option<GiftAssignment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    telegram_id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(
        id: ParticipantId,
        name: impl Into<String>,
        code: impl Into<String>,
        team_id: TeamId,
    ) -> Result<Self, ParticipantValidationError> {
        let name = name.into();
        validate_participant_name(&name)?;

        Ok(Self {
            id,
            name: name.trim().to_string(),
            code: code.into(),
            team_id,
            gift_to: None,
            telegram_id: None,
            created_at: Utc::now(),
        })
    }

    /// Set the messaging-bot user that registered (builder pattern)
    pub fn with_telegram_id(mut self, telegram_id: i64) -> Self {
        self.telegram_id = Some(telegram_id);
        self
    }

    // Getters

    pub fn id(&self) -> &ParticipantId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn team_id(&self) -> &TeamId {
        &self.team_id
    }

    pub fn gift_to(&self) -> Option<&GiftAssignment> {
        self.gift_to.as_ref()
    }

    /// Name of the assigned recipient, if an assignment has run
    pub fn gift_to_name(&self) -> Option<&str> {
        self.gift_to.as_ref().map(|g| g.recipient_name.as_str())
    }

    pub fn telegram_id(&self) -> Option<i64> {
        self.telegram_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // Mutators

    /// Overwrite the gift assignment; the previous run is discarded
    pub fn assign_gift(&mut self, assignment: GiftAssignment) {
        self.gift_to = Some(assignment);
    }
}

impl StorageEntity for Participant {
    type Key = ParticipantId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
