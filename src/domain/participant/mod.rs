//! Participant domain module
//!
//! A participant exists once a redemption code has been claimed; the only
//! field that changes afterwards is the gift assignment.

mod entity;
mod repository;
mod validation;

pub use entity::{GiftAssignment, Participant, ParticipantId};
pub use repository::ParticipantRepository;
pub use validation::{
    normalize_code, validate_participant_id, validate_participant_name,
    ParticipantValidationError,
};
