//! Participant repository trait

use async_trait::async_trait;

use super::entity::{Participant, ParticipantId};
use crate::domain::team::TeamId;
use crate::domain::DomainError;

#[async_trait]
pub trait ParticipantRepository: Send + Sync + std::fmt::Debug {
    async fn get(&self, id: &ParticipantId) -> Result<Option<Participant>, DomainError>;

    async fn create(&self, participant: Participant) -> Result<Participant, DomainError>;

    async fn update(&self, participant: Participant) -> Result<Participant, DomainError>;

    /// List all participants, newest first
    async fn list(&self) -> Result<Vec<Participant>, DomainError>;

    /// List participants of one team, oldest first
    async fn list_by_team(&self, team_id: &TeamId) -> Result<Vec<Participant>, DomainError>;

    /// Most recent registration made by a messaging-bot user
    async fn find_by_telegram_id(
        &self,
        telegram_id: i64,
    ) -> Result<Option<Participant>, DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;
}
