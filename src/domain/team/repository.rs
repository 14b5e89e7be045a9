//! Team repository trait

use async_trait::async_trait;

use super::entity::{Team, TeamId};
use crate::domain::DomainError;

/// Repository for managing teams
#[async_trait]
pub trait TeamRepository: Send + Sync + std::fmt::Debug {
    /// Get a team by ID
    async fn get(&self, id: &TeamId) -> Result<Option<Team>, DomainError>;

    /// Create a new team
    async fn create(&self, team: Team) -> Result<Team, DomainError>;

    /// Replace an existing team
    async fn update(&self, team: Team) -> Result<Team, DomainError>;

    /// List all teams, newest first
    async fn list(&self) -> Result<Vec<Team>, DomainError>;

    /// Find the team that issued `code`
    async fn find_by_code(&self, code: &str) -> Result<Option<Team>, DomainError>;

    /// Every code issued so far, across all teams
    async fn issued_codes(&self) -> Result<Vec<String>, DomainError>;

    /// Count teams
    async fn count(&self) -> Result<usize, DomainError>;
}
