//! Application state for shared services

use std::sync::Arc;

use crate::config::ExchangeConfig;
use crate::domain::participant::ParticipantRepository;
use crate::domain::team::TeamRepository;
use crate::domain::{DomainError, Participant, Team};
use crate::infrastructure::assignment::{AssignmentService, GiftPair};
use crate::infrastructure::participant::{
    ParticipantInfo, RegisterParticipantRequest, Registered, RegistrationService,
};
use crate::infrastructure::team::{CreateTeamRequest, TeamService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub team_service: Arc<dyn TeamServiceTrait>,
    pub registration_service: Arc<dyn RegistrationServiceTrait>,
    pub assignment_service: Arc<dyn AssignmentServiceTrait>,
    pub exchange: Arc<ExchangeConfig>,
}

/// Trait for team service operations
#[async_trait::async_trait]
pub trait TeamServiceTrait: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Team>, DomainError>;
    async fn list(&self) -> Result<Vec<Team>, DomainError>;
    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError>;
}

/// Trait for registration service operations
#[async_trait::async_trait]
pub trait RegistrationServiceTrait: Send + Sync {
    async fn register(
        &self,
        request: RegisterParticipantRequest,
    ) -> Result<Registered, DomainError>;
    async fn list(&self) -> Result<Vec<Participant>, DomainError>;
    async fn list_by_team(&self, team_id: &str) -> Result<Vec<Participant>, DomainError>;
    async fn find_by_telegram_id(
        &self,
        telegram_id: i64,
    ) -> Result<Option<ParticipantInfo>, DomainError>;
}

/// Trait for assignment service operations
#[async_trait::async_trait]
pub trait AssignmentServiceTrait: Send + Sync {
    /// Run a fresh draw for the team
    async fn assign(&self, team_id: &str) -> Result<Vec<GiftPair>, DomainError>;
    /// Pairs from the last draw
    async fn current(&self, team_id: &str) -> Result<Vec<GiftPair>, DomainError>;
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R: TeamRepository + 'static> TeamServiceTrait for TeamService<R> {
    async fn get(&self, id: &str) -> Result<Option<Team>, DomainError> {
        TeamService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        TeamService::list(self).await
    }

    async fn create(&self, request: CreateTeamRequest) -> Result<Team, DomainError> {
        TeamService::create(self, request).await
    }
}

#[async_trait::async_trait]
impl<T, P> RegistrationServiceTrait for RegistrationService<T, P>
where
    T: TeamRepository + 'static,
    P: ParticipantRepository + 'static,
{
    async fn register(
        &self,
        request: RegisterParticipantRequest,
    ) -> Result<Registered, DomainError> {
        RegistrationService::register(self, request).await
    }

    async fn list(&self) -> Result<Vec<Participant>, DomainError> {
        RegistrationService::list(self).await
    }

    async fn list_by_team(&self, team_id: &str) -> Result<Vec<Participant>, DomainError> {
        RegistrationService::list_by_team(self, team_id).await
    }

    async fn find_by_telegram_id(
        &self,
        telegram_id: i64,
    ) -> Result<Option<ParticipantInfo>, DomainError> {
        RegistrationService::find_by_telegram_id(self, telegram_id).await
    }
}

#[async_trait::async_trait]
impl<T, P> AssignmentServiceTrait for AssignmentService<T, P>
where
    T: TeamRepository + 'static,
    P: ParticipantRepository + 'static,
{
    async fn assign(&self, team_id: &str) -> Result<Vec<GiftPair>, DomainError> {
        AssignmentService::assign(self, team_id).await
    }

    async fn current(&self, team_id: &str) -> Result<Vec<GiftPair>, DomainError> {
        AssignmentService::current(self, team_id).await
    }
}

impl AppState {
    pub fn new(
        team_service: Arc<dyn TeamServiceTrait>,
        registration_service: Arc<dyn RegistrationServiceTrait>,
        assignment_service: Arc<dyn AssignmentServiceTrait>,
        exchange: ExchangeConfig,
    ) -> Self {
        Self {
            team_service,
            registration_service,
            assignment_service,
            exchange: Arc::new(exchange),
        }
    }
}
