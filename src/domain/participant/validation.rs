//! Participant validation

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParticipantValidationError {
    #[error("Participant ID cannot be empty")]
    EmptyId,

    #[error("Participant ID cannot exceed {0} characters")]
    IdTooLong(usize),

    #[error("Participant ID can only contain alphanumeric characters and hyphens")]
    InvalidIdCharacters,

    #[error("Participant name cannot be empty")]
    EmptyName,

    #[error("Participant name cannot exceed {0} characters")]
    NameTooLong(usize),

    #[error("Redemption code cannot be empty")]
    EmptyCode,
}

const MAX_PARTICIPANT_ID_LENGTH: usize = 50;
const MAX_PARTICIPANT_NAME_LENGTH: usize = 100;

pub fn validate_participant_id(id: &str) -> Result<(), ParticipantValidationError> {
    if id.is_empty() {
        return Err(ParticipantValidationError::EmptyId);
    }

    if id.len() > MAX_PARTICIPANT_ID_LENGTH {
        return Err(ParticipantValidationError::IdTooLong(
            MAX_PARTICIPANT_ID_LENGTH,
        ));
    }

    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParticipantValidationError::InvalidIdCharacters);
    }

    Ok(())
}

pub fn validate_participant_name(name: &str) -> Result<(), ParticipantValidationError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ParticipantValidationError::EmptyName);
    }

    if trimmed.chars().count() > MAX_PARTICIPANT_NAME_LENGTH {
        return Err(ParticipantValidationError::NameTooLong(
            MAX_PARTICIPANT_NAME_LENGTH,
        ));
    }

    Ok(())
}

/// Canonical form of a submitted code: surrounding whitespace dropped, upper-cased
pub fn normalize_code(code: &str) -> Result<String, ParticipantValidationError> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ParticipantValidationError::EmptyCode);
    }

    Ok(code.to_uppercase())
}
