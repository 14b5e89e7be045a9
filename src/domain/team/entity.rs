//! Team entity and redemption code types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{
    validate_team_id, validate_team_name, validate_team_rules, TeamValidationError,
};
use crate::domain::participant::ParticipantId;
use crate::domain::storage::{StorageEntity, StorageKey};

/// Team identifier - alphanumeric + hyphens, max 50 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TeamId(String);

impl TeamId {
    /// Create a new TeamId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, TeamValidationError> {
        let id = id.into();
        validate_team_id(&id)?;
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

impl TryFrom<String> for TeamId {
    type Error = TeamValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TeamId> for String {
    fn from(id: TeamId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for TeamId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Redemption state of a single code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CodeStatus {
    #[default]
    Unredeemed,
    Redeemed { participant_id: ParticipantId },
}

impl CodeStatus {
    pub fn is_redeemed(&self) -> bool {
        matches!(self, Self::Redeemed { .. })
    }
}

/// A code issued for one participant slot of a team
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionCode {
    code: String,
    status: CodeStatus,
}

impl RedemptionCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            status: CodeStatus::Unredeemed,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn status(&self) -> &CodeStatus {
        &self.status
    }

    pub fn is_redeemed(&self) -> bool {
        self.status.is_redeemed()
    }
}

/// A participant that has claimed one of the team's slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub participant_id: ParticipantId,
    pub name: String,
}

/// Team entity
///
/// The code list is fixed at creation. Every successful redemption flips one
/// code to [`CodeStatus::Redeemed`] and appends one [`Registration`], so the
/// number of registrations never exceeds the number of codes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: String,
    rules: String,
    codes: Vec<RedemptionCode>,
    registrations: Vec<Registration>,
    created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with its full batch of codes
    pub fn new(
        id: TeamId,
        name: impl Into<String>,
        rules: impl Into<String>,
        codes: Vec<String>,
    ) -> Result<Self, TeamValidationError> {
        let name = name.into();
        let rules = rules.into();
        validate_team_name(&name)?;
        validate_team_rules(&rules)?;

        Ok(Self {
            id,
            name: name.trim().to_string(),
            rules,
            codes: codes.into_iter().map(RedemptionCode::new).collect(),
            registrations: Vec::new(),
            created_at: Utc::now(),
        })
    }

    // Getters

    pub fn id(&self) -> &TeamId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &str {
        &self.rules
    }

    pub fn codes(&self) -> &[RedemptionCode] {
        &self.codes
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Names of registered participants, in registration order
    pub fn participant_names(&self) -> Vec<&str> {
        self.registrations.iter().map(|r| r.name.as_str()).collect()
    }

    /// Number of participant slots (one per code)
    pub fn capacity(&self) -> usize {
        self.codes.len()
    }

    pub fn redeemed_count(&self) -> usize {
        self.codes.iter().filter(|c| c.is_redeemed()).count()
    }

    pub fn is_full(&self) -> bool {
        self.registrations.len() >= self.codes.len()
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code(code).is_some()
    }

    pub fn code(&self, code: &str) -> Option<&RedemptionCode> {
        self.codes.iter().find(|c| c.code == code)
    }

    // Mutators

    /// Claim `code` for a participant
    ///
    /// Fails without touching the team if the code is unknown or was already
    /// redeemed; the first registrant keeps the slot.
    pub fn redeem(
        &mut self,
        code: &str,
        participant_id: ParticipantId,
        name: impl Into<String>,
    ) -> Result<(), TeamValidationError> {
        let slot = self
            .codes
            .iter_mut()
            .find(|c| c.code == code)
            .ok_or_else(|| TeamValidationError::UnknownCode(code.to_string()))?;

        if slot.is_redeemed() {
            return Err(TeamValidationError::CodeAlreadyUsed(code.to_string()));
        }

        slot.status = CodeStatus::Redeemed {
            participant_id: participant_id.clone(),
        };
        self.registrations.push(Registration {
            participant_id,
            name: name.into(),
        });

        Ok(())
    }
}

impl StorageEntity for Team {
    type Key = TeamId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    fn sample_team() -> Team {
        Team::new(
            TeamId::new("team-1").unwrap(),
            "Snowflakes",
            "Budget: 1000-1500",
            codes(&["MVT123", "MVT456", "MVT789"]),
        )
        .unwrap()
    }

    #[test]
    fn test_team_id_valid() {
        let id = TeamId::new("my-team").unwrap();
        assert_eq!(id.as_str(), "my-team");
    }

    #[test]
    fn test_team_id_invalid() {
        assert!(TeamId::new("").is_err());
        assert!(TeamId::new("-team").is_err());
        assert!(TeamId::new("team_name").is_err());
    }

    #[test]
    fn test_generated_team_ids_are_valid_and_distinct() {
        let a = TeamId::generate();
        let b = TeamId::generate();

        assert_ne!(a, b);
        assert!(TeamId::new(a.as_str()).is_ok());
    }

    #[test]
    fn test_team_creation() {
        let team = sample_team();

        assert_eq!(team.name(), "Snowflakes");
        assert_eq!(team.rules(), "Budget: 1000-1500");
        assert_eq!(team.capacity(), 3);
        assert_eq!(team.redeemed_count(), 0);
        assert!(team.participant_names().is_empty());
        assert!(team.codes().iter().all(|c| !c.is_redeemed()));
    }

    #[test]
    fn test_team_name_is_trimmed() {
        let team = Team::new(TeamId::generate(), "  Elves  ", "", codes(&["MVT100"])).unwrap();
        assert_eq!(team.name(), "Elves");
    }

    #[test]
    fn test_team_invalid_name() {
        assert!(Team::new(TeamId::generate(), "", "", vec![]).is_err());
        assert!(Team::new(TeamId::generate(), "   ", "", vec![]).is_err());
    }

    #[test]
    fn test_redeem_marks_code_and_appends_name() {
        let mut team = sample_team();
        let participant = ParticipantId::generate();

        team.redeem("MVT456", participant.clone(), "Alice").unwrap();

        assert_eq!(team.participant_names(), vec!["Alice"]);
        assert_eq!(team.redeemed_count(), 1);
        assert_eq!(
            team.code("MVT456").unwrap().status(),
            &CodeStatus::Redeemed {
                participant_id: participant
            }
        );
        assert!(!team.code("MVT123").unwrap().is_redeemed());
    }

    #[test]
    fn test_redeem_out_of_issue_order_keeps_explicit_status() {
        let mut team = sample_team();
        let bob = ParticipantId::generate();

        team.redeem("MVT789", bob.clone(), "Bob").unwrap();

        // The third code is the redeemed one even though it was claimed first
        assert!(!team.codes()[0].is_redeemed());
        assert!(team.codes()[2].is_redeemed());
        assert_eq!(team.registrations()[0].participant_id, bob);
    }

    #[test]
    fn test_redeem_twice_is_rejected_and_first_registrant_wins() {
        let mut team = sample_team();
        team.redeem("MVT123", ParticipantId::generate(), "Alice")
            .unwrap();

        let result = team.redeem("MVT123", ParticipantId::generate(), "Mallory");

        assert_eq!(
            result,
            Err(TeamValidationError::CodeAlreadyUsed("MVT123".to_string()))
        );
        assert_eq!(team.participant_names(), vec!["Alice"]);
    }

    #[test]
    fn test_redeem_unknown_code() {
        let mut team = sample_team();

        let result = team.redeem("XYZ000", ParticipantId::generate(), "Alice");

        assert_eq!(
            result,
            Err(TeamValidationError::UnknownCode("XYZ000".to_string()))
        );
        assert!(team.registrations().is_empty());
    }

    #[test]
    fn test_registrations_never_exceed_codes() {
        let mut team = sample_team();

        for (i, code) in ["MVT123", "MVT456", "MVT789"].iter().enumerate() {
            team.redeem(code, ParticipantId::generate(), format!("P{}", i))
                .unwrap();
        }

        assert!(team.is_full());
        assert_eq!(team.registrations().len(), team.capacity());
        assert!(team
            .redeem("MVT123", ParticipantId::generate(), "Late")
            .is_err());
        assert_eq!(team.registrations().len(), team.capacity());
    }

    #[test]
    fn test_code_status_serialization() {
        let json = serde_json::to_value(CodeStatus::Unredeemed).unwrap();
        assert_eq!(json["state"], "unredeemed");
    }
}
