//! Storage-backed participant repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::participant::{Participant, ParticipantId, ParticipantRepository};
use crate::domain::storage::Storage;
use crate::domain::team::TeamId;
use crate::domain::DomainError;

#[derive(Debug)]
pub struct StorageParticipantRepository {
    storage: Arc<dyn Storage<Participant>>,
}

impl StorageParticipantRepository {
    pub fn new(storage: Arc<dyn Storage<Participant>>) -> Self {
        Self { storage }
    }
}

/// Oldest first; ids are time-ordered so they break timestamp ties
fn by_registration(a: &Participant, b: &Participant) -> std::cmp::Ordering {
    a.created_at()
        .cmp(&b.created_at())
        .then_with(|| a.id().as_str().cmp(b.id().as_str()))
}

#[async_trait]
impl ParticipantRepository for StorageParticipantRepository {
    async fn get(&self, id: &ParticipantId) -> Result<Option<Participant>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, participant: Participant) -> Result<Participant, DomainError> {
        if self.storage.exists(participant.id()).await? {
            return Err(DomainError::conflict(format!(
                "Participant '{}' already exists",
                participant.id()
            )));
        }

        self.storage.create(participant).await
    }

    async fn update(&self, participant: Participant) -> Result<Participant, DomainError> {
        self.storage.update(participant).await
    }

    async fn list(&self) -> Result<Vec<Participant>, DomainError> {
        let mut participants = self.storage.list().await?;
        participants.sort_by(|a, b| by_registration(b, a));
        Ok(participants)
    }

    async fn list_by_team(&self, team_id: &TeamId) -> Result<Vec<Participant>, DomainError> {
        let mut participants: Vec<Participant> = self
            .storage
            .list()
            .await?
            .into_iter()
            .filter(|p| p.team_id() == team_id)
            .collect();

        participants.sort_by(by_registration);
        Ok(participants)
    }

    async fn find_by_telegram_id(
        &self,
        telegram_id: i64,
    ) -> Result<Option<Participant>, DomainError> {
        let participants = self.storage.list().await?;

        Ok(participants
            .into_iter()
            .filter(|p| p.telegram_id() == Some(telegram_id))
            .max_by(by_registration))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}
