//! Domain layer - Core business logic and entities

pub mod assignment;
pub mod error;
pub mod participant;
pub mod storage;
pub mod team;

pub use assignment::{AssignmentError, AssignmentStrategy};
pub use error::DomainError;
pub use participant::{
    GiftAssignment, Participant, ParticipantId, ParticipantRepository, ParticipantValidationError,
};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use team::{
    CodeStatus, RedemptionCode, Registration, Team, TeamId, TeamRepository, TeamValidationError,
};

impl From<TeamValidationError> for DomainError {
    fn from(err: TeamValidationError) -> Self {
        match err {
            TeamValidationError::UnknownCode(code) => {
                DomainError::not_found(format!("Code '{}' not found", code))
            }
            TeamValidationError::CodeAlreadyUsed(code) => {
                DomainError::conflict(format!("Code '{}' has already been used", code))
            }
            TeamValidationError::EmptyId
            | TeamValidationError::IdTooLong(_)
            | TeamValidationError::InvalidIdCharacters
            | TeamValidationError::InvalidIdFormat => DomainError::invalid_id(err.to_string()),
            other => DomainError::validation(other.to_string()),
        }
    }
}

impl From<ParticipantValidationError> for DomainError {
    fn from(err: ParticipantValidationError) -> Self {
        match err {
            ParticipantValidationError::EmptyId
            | ParticipantValidationError::IdTooLong(_)
            | ParticipantValidationError::InvalidIdCharacters => {
                DomainError::invalid_id(err.to_string())
            }
            other => DomainError::validation(other.to_string()),
        }
    }
}

impl From<AssignmentError> for DomainError {
    fn from(err: AssignmentError) -> Self {
        DomainError::validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redemption_errors_map_to_lookup_outcomes() {
        let unknown: DomainError = TeamValidationError::UnknownCode("MVT000".into()).into();
        assert!(matches!(unknown, DomainError::NotFound { .. }));

        let used: DomainError = TeamValidationError::CodeAlreadyUsed("MVT123".into()).into();
        assert!(matches!(used, DomainError::Conflict { .. }));
    }

    #[test]
    fn test_id_errors_map_to_invalid_id() {
        let err: DomainError = TeamValidationError::InvalidIdFormat.into();
        assert!(matches!(err, DomainError::InvalidId { .. }));

        let err: DomainError = ParticipantValidationError::EmptyId.into();
        assert!(matches!(err, DomainError::InvalidId { .. }));
    }

    #[test]
    fn test_not_enough_participants_is_a_validation_error() {
        let err: DomainError = AssignmentError::NotEnoughParticipants {
            required: 2,
            found: 1,
        }
        .into();

        assert_eq!(
            err.to_string(),
            "Validation error: At least 2 participants are needed to assign gifts, found 1"
        );
    }
}
