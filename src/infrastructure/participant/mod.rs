//! Participant infrastructure implementations

mod repository;
mod service;

pub use repository::StorageParticipantRepository;
pub use service::{
    ParticipantInfo, RegisterParticipantRequest, Registered, RegistrationService,
};
