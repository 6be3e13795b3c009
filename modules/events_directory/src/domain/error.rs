use chrono::NaiveDateTime;
use thiserror::Error;

use crate::contract::model::{EventId, UserId};

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("User not found: {id}")]
    UserNotFound { id: UserId },

    #[error("Event not found: {id}")]
    EventNotFound { id: EventId },

    #[error("User with email '{email}' already exists")]
    EmailAlreadyExists { email: String },

    #[error("{kind} id {id} is already registered")]
    DuplicateId { kind: &'static str, id: u64 },

    #[error("Invalid email format: '{email}'")]
    InvalidEmail { email: String },

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("{field} too long: {len} characters (max: {max})")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Event must start before it ends: {starts_at} >= {ends_at}")]
    InvalidSchedule {
        starts_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    },

    #[error("Rating {rating} exceeds maximum {max}")]
    InvalidRating { rating: u8, max: u8 },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User {id} is disabled")]
    AccountDisabled { id: UserId },

    #[error("Event {id} is full ({capacity} participants)")]
    EventFull { id: EventId, capacity: u32 },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },
}

impl DomainError {
    pub fn user_not_found(id: UserId) -> Self {
        Self::UserNotFound { id }
    }

    pub fn event_not_found(id: EventId) -> Self {
        Self::EventNotFound { id }
    }

    pub fn email_already_exists(email: String) -> Self {
        Self::EmailAlreadyExists { email }
    }

    pub fn duplicate_id(kind: &'static str, id: u64) -> Self {
        Self::DuplicateId { kind, id }
    }

    pub fn invalid_email(email: String) -> Self {
        Self::InvalidEmail { email }
    }

    pub fn empty_field(field: &'static str) -> Self {
        Self::EmptyField { field }
    }

    pub fn field_too_long(field: &'static str, len: usize, max: usize) -> Self {
        Self::FieldTooLong { field, len, max }
    }

    pub fn invalid_schedule(starts_at: NaiveDateTime, ends_at: NaiveDateTime) -> Self {
        Self::InvalidSchedule { starts_at, ends_at }
    }

    pub fn invalid_rating(rating: u8, max: u8) -> Self {
        Self::InvalidRating { rating, max }
    }

    pub fn account_disabled(id: UserId) -> Self {
        Self::AccountDisabled { id }
    }

    pub fn event_full(id: EventId, capacity: u32) -> Self {
        Self::EventFull { id, capacity }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
