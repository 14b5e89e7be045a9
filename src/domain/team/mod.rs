//! Team domain module
//!
//! A team is one gift exchange: a rule set, a fixed batch of redemption codes
//! and the participants who redeemed them.

mod entity;
mod repository;
mod validation;

pub use entity::{CodeStatus, RedemptionCode, Registration, Team, TeamId};
pub use repository::TeamRepository;
pub use validation::{
    validate_team_id, validate_team_name, validate_team_rules, TeamValidationError,
};
