//! Registration service: redeeming codes and looking participants up

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::participant::{
    normalize_code, validate_participant_name, Participant, ParticipantId, ParticipantRepository,
};
use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::exchange_lock::ExchangeLock;
use crate::infrastructure::observability::{record_registration, RegistrationOutcome};

/// Request to redeem a code
#[derive(Debug, Clone)]
pub struct RegisterParticipantRequest {
    pub name: String,
    pub code: String,
    pub telegram_id: Option<i64>,
}

/// A successful redemption: the new participant and the team it joined
#[derive(Debug, Clone)]
pub struct Registered {
    pub participant: Participant,
    pub team: Team,
}

/// What a participant can see about their own exchange
#[derive(Debug, Clone)]
pub struct ParticipantInfo {
    pub participant: Participant,
    pub team_name: String,
    pub team_rules: String,
}

#[derive(Debug)]
pub struct RegistrationService<T: TeamRepository, P: ParticipantRepository> {
    teams: Arc<T>,
    participants: Arc<P>,
    lock: ExchangeLock,
}

impl<T: TeamRepository, P: ParticipantRepository> RegistrationService<T, P> {
    pub fn new(teams: Arc<T>, participants: Arc<P>, lock: ExchangeLock) -> Self {
        Self {
            teams,
            participants,
            lock,
        }
    }

    /// Redeem a code and register its holder
    ///
    /// Fails with `NotFound` for an unknown code and `Conflict` for a code that
    /// was already redeemed. Nothing is written unless every check passes.
    pub async fn register(
        &self,
        request: RegisterParticipantRequest,
    ) -> Result<Registered, DomainError> {
        let (name, code) = match validate_participant_name(&request.name)
            .and_then(|_| normalize_code(&request.code))
        {
            Ok(code) => (request.name.trim().to_string(), code),
            Err(e) => {
                record_registration(RegistrationOutcome::Invalid);
                return Err(e.into());
            }
        };

        let _guard = self.lock.acquire().await;

        let Some(mut team) = self.teams.find_by_code(&code).await? else {
            warn!(code = %code, "Registration with unknown code");
            record_registration(RegistrationOutcome::UnknownCode);
            return Err(DomainError::not_found(format!("Code '{}' not found", code)));
        };

        if team.code(&code).is_some_and(|c| c.is_redeemed()) {
            warn!(code = %code, team_id = %team.id(), "Registration with used code");
            record_registration(RegistrationOutcome::CodeAlreadyUsed);
            return Err(DomainError::conflict(format!(
                "Code '{}' has already been used",
                code
            )));
        }

        let mut participant =
            Participant::new(ParticipantId::generate(), &name, &code, team.id().clone())?;

        if let Some(telegram_id) = request.telegram_id {
            participant = participant.with_telegram_id(telegram_id);
        }

        let unredeemed = team.clone();
        team.redeem(&code, participant.id().clone(), participant.name())?;

        // The team is written first; if the participant cannot be stored the
        // code goes back to unredeemed.
        let team = self.teams.update(team).await?;
        let participant = match self.participants.create(participant).await {
            Ok(participant) => participant,
            Err(e) => {
                warn!(
                    code = %code,
                    team_id = %team.id(),
                    error = %e,
                    "Rolling back code redemption"
                );
                self.teams.update(unredeemed).await?;
                return Err(e);
            }
        };

        info!(
            participant_id = %participant.id(),
            team_id = %team.id(),
            code = %code,
            registered = team.registrations().len(),
            capacity = team.capacity(),
            "Registered participant"
        );
        record_registration(RegistrationOutcome::Registered);

        Ok(Registered { participant, team })
    }

    /// All participants, newest first
    pub async fn list(&self) -> Result<Vec<Participant>, DomainError> {
        self.participants.list().await
    }

    /// One team's participants in registration order
    pub async fn list_by_team(&self, team_id: &str) -> Result<Vec<Participant>, DomainError> {
        let team_id = TeamId::new(team_id)?;

        if self.teams.get(&team_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team_id
            )));
        }

        self.participants.list_by_team(&team_id).await
    }

    /// Look up the latest registration of a messaging-bot user
    pub async fn find_by_telegram_id(
        &self,
        telegram_id: i64,
    ) -> Result<Option<ParticipantInfo>, DomainError> {
        debug!(telegram_id, "Looking up participant by telegram id");

        let Some(participant) = self.participants.find_by_telegram_id(telegram_id).await? else {
            return Ok(None);
        };

        let team = self
            .teams
            .get(participant.team_id())
            .await?
            .ok_or_else(|| {
                DomainError::internal(format!(
                    "Participant '{}' references missing team '{}'",
                    participant.id(),
                    participant.team_id()
                ))
            })?;

        Ok(Some(ParticipantInfo {
            team_name: team.name().to_string(),
            team_rules: team.rules().to_string(),
            participant,
        }))
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.participants.count().await
    }
}
