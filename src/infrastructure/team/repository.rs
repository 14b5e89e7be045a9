//! Storage-backed team repository implementation

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::storage::Storage;
use crate::domain::team::{Team, TeamId, TeamRepository};
use crate::domain::DomainError;

/// Storage-backed implementation of TeamRepository
#[derive(Debug)]
pub struct StorageTeamRepository {
    storage: Arc<dyn Storage<Team>>,
}

impl StorageTeamRepository {
    pub fn new(storage: Arc<dyn Storage<Team>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl TeamRepository for StorageTeamRepository {
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, team: Team) -> Result<Team, DomainError> {
        if self.storage.exists(team.id()).await? {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.id()
            )));
        }

        self.storage.create(team).await
    }

    async fn update(&self, team: Team) -> Result<Team, DomainError> {
        if !self.storage.exists(team.id()).await? {
            return Err(DomainError::not_found(format!(
                "Team '{}' not found",
                team.id()
            )));
        }

        self.storage.update(team).await
    }

    async fn list(&self) -> Result<Vec<Team>, DomainError> {
        let mut teams = self.storage.list().await?;

        // Newest first; ids are time-ordered so they break timestamp ties
        teams.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().as_str().cmp(a.id().as_str()))
        });

        Ok(teams)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Team>, DomainError> {
        let teams = self.storage.list().await?;
        Ok(teams.into_iter().find(|team| team.has_code(code)))
    }

    async fn issued_codes(&self) -> Result<Vec<String>, DomainError> {
        let teams = self.storage.list().await?;

        Ok(teams
            .iter()
            .flat_map(|team| team.codes().iter().map(|c| c.code().to_string()))
            .collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}
