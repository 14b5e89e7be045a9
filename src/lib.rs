//! Secret Santa exchange service
//!
//! Organisers create teams, each with a fixed batch of one-time redemption
//! codes. Participants redeem a code to join, and a randomised draw decides
//! who gives a gift to whom. Exposed over an admin API and a bot API.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::{Participant, Team, TeamId};
use infrastructure::{
    assignment::AssignmentService,
    code::RedemptionCodeGenerator,
    exchange_lock::ExchangeLock,
    participant::{RegistrationService, StorageParticipantRepository},
    storage::InMemoryStorage,
    team::{StorageTeamRepository, TeamService},
};
use tracing::info;

/// Create the application state with all services initialized
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let exchange = &config.exchange;

    // One lock shared by every service that mutates the exchange
    let lock = ExchangeLock::new(exchange.random_seed);
    if exchange.random_seed.is_some() {
        info!("Using a fixed random seed for code issuance and draws");
    }

    let team_repository = Arc::new(StorageTeamRepository::new(Arc::new(
        InMemoryStorage::<Team>::new(),
    )));
    let participant_repository = Arc::new(StorageParticipantRepository::new(Arc::new(
        InMemoryStorage::<Participant>::new(),
    )));

    let generator = RedemptionCodeGenerator::new(&exchange.code_prefix);

    let team_service = Arc::new(TeamService::new(
        team_repository.clone(),
        generator.clone(),
        lock.clone(),
        &exchange.default_rules,
    ));

    if exchange.seed_sample_team {
        let team = team_service.import(sample_team(&generator)?).await?;
        info!(team_id = %team.id(), "Seeded sample team");
    }

    let registration_service = Arc::new(RegistrationService::new(
        team_repository.clone(),
        participant_repository.clone(),
        lock.clone(),
    ));

    let assignment_service = Arc::new(AssignmentService::new(
        team_repository,
        participant_repository,
        lock,
        exchange.assignment_strategy,
    ));

    info!(
        code_prefix = %generator.prefix(),
        strategy = %exchange.assignment_strategy,
        "Exchange services initialized"
    );

    Ok(AppState::new(
        team_service,
        registration_service,
        assignment_service,
        exchange.clone(),
    ))
}

/// Demo team with fixed, easy to type codes
fn sample_team(generator: &RedemptionCodeGenerator) -> anyhow::Result<Team> {
    let codes = ["123", "456", "789"]
        .iter()
        .map(|suffix| format!("{}{}", generator.prefix(), suffix))
        .collect();

    Ok(Team::new(
        TeamId::new("sample-team")?,
        "Snowflake Team",
        "Gift budget: 1000-1500\nExchange date: December 31\nMeeting place: to be announced",
        codes,
    )?)
}
