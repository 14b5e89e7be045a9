//! Team service: team creation and code issuance

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::team::{validate_team_name, Team, TeamId, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::code::RedemptionCodeGenerator;
use crate::infrastructure::exchange_lock::ExchangeLock;
use crate::infrastructure::observability::record_team_created;

/// Request for creating a new team
#[derive(Debug, Clone)]
pub struct CreateTeamRequest {
    pub name: String,
    pub rules: Option<String>,
    /// Number of codes to issue; bounds are checked by the caller
    pub participant_count: usize,
}

/// Team service for managing teams
#[derive(Debug)]
pub struct TeamService<R: TeamRepository> {
    repository: Arc<R>,
    generator: RedemptionCodeGenerator,
    lock: ExchangeLock,
    default_rules: String,
}

impl<R: TeamRepository> TeamService<R> {
    pub fn new(
        repository: Arc<R>,
        generator: RedemptionCodeGenerator,
        lock: ExchangeLock,
        default_rules: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            generator,
            lock,
            default_rules: default_rules.into(),
        }
    }

    /// Create a team and issue one fresh code per participant slot
    pub async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        validate_team_name(&request.name)?;

        let rules = request
            .rules
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| self.default_rules.clone());

        let mut rng = self.lock.acquire().await;

        let issued: HashSet<String> = self.repository.issued_codes().await?.into_iter().collect();
        let codes =
            self.generator
                .generate_batch(request.participant_count, &issued, &mut *rng)?;

        let team = Team::new(TeamId::generate(), &request.name, rules, codes)?;
        let team = self.repository.create(team).await?;

        info!(
            team_id = %team.id(),
            name = %team.name(),
            participant_count = team.capacity(),
            "Created team"
        );
        record_team_created(team.capacity());

        Ok(team)
    }

    /// Insert a team built elsewhere (startup seeding)
    pub async fn import(&self, team: Team) -> Result<Team, DomainError> {
        let _guard = self.lock.acquire().await;

        let issued: HashSet<String> = self.repository.issued_codes().await?.into_iter().collect();

        if let Some(clash) = team.codes().iter().find(|c| issued.contains(c.code())) {
            return Err(DomainError::conflict(format!(
                "Code '{}' has already been issued",
                clash.code()
            )));
        }

        info!(team_id = %team.id(), name = %team.name(), "Importing team");
        self.repository.create(team).await
    }

    pub async fn get(&self, id: &str) -> Result<Option<Team>, DomainError> {
        let team_id = TeamId::new(id)?;
        debug!(team_id = %team_id, "Getting team");
        self.repository.get(&team_id).await
    }

    /// All teams, newest first
    pub async fn list(&self) -> Result<Vec<Team>, DomainError> {
        self.repository.list().await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}
