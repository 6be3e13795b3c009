use chrono::{DateTime, Utc};

use crate::contract::model::{EventId, UserId};

/// Transport-agnostic domain event, published after a mutation succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    UserRegistered { id: UserId, at: DateTime<Utc> },
    UserUpdated { id: UserId, at: DateTime<Utc> },
    UserRemoved { id: UserId, at: DateTime<Utc> },
    EventCreated { id: EventId, organizer: UserId, at: DateTime<Utc> },
    EventUpdated { id: EventId, at: DateTime<Utc> },
    EventRemoved { id: EventId, at: DateTime<Utc> },
    ParticipantJoined { event: EventId, user: UserId, at: DateTime<Utc> },
    ParticipantLeft { event: EventId, user: UserId, at: DateTime<Utc> },
}
