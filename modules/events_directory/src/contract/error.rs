use thiserror::Error;

use crate::contract::model::{EventId, UserId};

/// Errors that are safe to expose to callers of the directory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Required field '{field}' is missing")]
    MissingField { field: &'static str },

    #[error("User not found: {id}")]
    UserNotFound { id: UserId },

    #[error("Event not found: {id}")]
    EventNotFound { id: EventId },

    #[error("User with email '{email}' already exists")]
    Conflict { email: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Event {id} is full ({capacity} participants)")]
    EventFull { id: EventId, capacity: u32 },

    #[error("Internal error")]
    Internal,
}

impl DirectoryError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn user_not_found(id: UserId) -> Self {
        Self::UserNotFound { id }
    }

    pub fn event_not_found(id: EventId) -> Self {
        Self::EventNotFound { id }
    }

    pub fn conflict(email: String) -> Self {
        Self::Conflict { email }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for DirectoryError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            UserNotFound { id } => Self::user_not_found(id),
            EventNotFound { id } => Self::event_not_found(id),
            EmailAlreadyExists { email } => Self::conflict(email),
            InvalidEmail { email } => Self::validation(format!("Invalid email: {}", email)),
            EmptyField { field } => Self::validation(format!("{} cannot be empty", field)),
            FieldTooLong { field, len, max } => Self::validation(format!(
                "{} too long: {} characters (max: {})",
                field, len, max
            )),
            InvalidSchedule { starts_at, ends_at } => Self::validation(format!(
                "Event must start before it ends (start: {}, end: {})",
                starts_at, ends_at
            )),
            InvalidRating { rating, max } => {
                Self::validation(format!("Rating {} exceeds maximum {}", rating, max))
            }
            Validation { field, message } => Self::validation(format!("{}: {}", field, message)),
            InvalidCredentials => Self::unauthorized("Invalid email or password"),
            AccountDisabled { .. } => Self::unauthorized("Account is disabled"),
            EventFull { id, capacity } => Self::EventFull { id, capacity },
            DuplicateId { .. } => Self::internal(),
        }
    }
}
